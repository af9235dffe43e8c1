//! Conversion of a row-major 1-bit image into the byte streams the controllers expect.
//!
//! Both controllers store one byte per column per page, bit 0 being the top row of the page. They
//! differ only in how RAM is addressed while the bytes are streamed in:
//!
//! * Paged addressing (SH1106): each page is selected with its own command, followed by that
//!   page's columns in ascending order.
//! * Linear addressing (SSD1306): one command sets the full column and page range, followed by a
//!   single run of all pages, each page's columns in *descending* order. Visiting the columns
//!   left-to-right instead mirrors the image on that hardware.
//!
//! Nothing here touches the bus; the result is a list of [`Transfer`]s for the driver to send.

use alloc::vec;
use alloc::vec::Vec;

use itertools::iproduct;

use crate::bitmap::PixelSource;
use crate::command::consts::*;
use crate::geometry::Geometry;

/// Low column nibble sent with every SH1106 page select. The SH1106 has 132 columns of RAM and a
/// 128 pixel panel is wired to columns 2-129.
pub const SH1106_COLUMN_OFFSET: u8 = 2;

/// One logical write to the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transfer {
    /// Bytes for the control registers.
    Commands(Vec<u8>),
    /// Bytes for display RAM.
    Data(Vec<u8>),
}

/// Pack 8 vertically stacked pixels, top first, into one RAM byte.
///
/// Each pixel is OR-ed into bit 8 and the accumulator shifted right once, so after all 8 pixels the
/// first one read has settled into bit 0 and the last into bit 7.
pub fn pack_column(pixels: [bool; 8]) -> u8 {
    pixels
        .iter()
        .fold(0u16, |byte, &lit| (byte | (lit as u16) << 8) >> 1) as u8
}

/// The RAM byte for column `x` of page `page`.
fn column_byte<S>(src: &S, page: u32, x: u32) -> u8
where
    S: PixelSource + ?Sized,
{
    let mut pixels = [false; 8];
    for (n, px) in pixels.iter_mut().enumerate() {
        *px = src.is_lit(x, page * 8 + n as u32);
    }
    pack_column(pixels)
}

/// Transcode for paged addressing: a 3-byte page select and column reset, then that page's data,
/// for every page in turn.
pub fn paged<S>(geometry: Geometry, src: &S) -> Vec<Transfer>
where
    S: PixelSource + ?Sized,
{
    let pages = geometry.pages();
    let mut transfers = Vec::with_capacity(2 * pages as usize);
    for page in 0..pages {
        transfers.push(Transfer::Commands(vec![
            PAGE_START | page as u8,
            SET_LOW_COLUMN | SH1106_COLUMN_OFFSET,
            SET_HIGH_COLUMN,
        ]));
        let data = (0..geometry.width)
            .map(|x| column_byte(src, page, x))
            .collect();
        transfers.push(Transfer::Data(data));
    }
    transfers
}

/// Transcode for linear addressing: one range command covering the whole panel, then one data run
/// of every page with columns visited right to left.
pub fn linear<S>(geometry: Geometry, src: &S) -> Vec<Transfer>
where
    S: PixelSource + ?Sized,
{
    let pages = geometry.pages();
    let range = vec![
        COLUMN_ADDR,
        0,
        geometry.width.saturating_sub(1) as u8,
        PAGE_ADDR,
        0,
        pages.saturating_sub(1) as u8,
    ];
    let data = iproduct!(0..pages, (0..geometry.width).rev())
        .map(|(page, x)| column_byte(src, page, x))
        .collect();
    vec![Transfer::Commands(range), Transfer::Data(data)]
}
