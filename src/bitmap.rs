//! The 1-bit image consumed by the driver, and the trait through which any other 1-bit image can
//! be rendered.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::image::GetPixel;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::geometry::Geometry;

/// Anything that can be read as a grid of on/off pixels.
///
/// Implemented for every `embedded-graphics` image with `BinaryColor` pixels that knows its own
/// size, including [`Bitmap`] and `ImageRaw<BinaryColor>`.
pub trait PixelSource {
    /// Width and height of the image.
    fn geometry(&self) -> Geometry;

    /// Whether the pixel at column `x`, row `y` is lit. Coordinates outside the image are unlit.
    fn is_lit(&self, x: u32, y: u32) -> bool;
}

impl<T> PixelSource for T
where
    T: GetPixel<Color = BinaryColor> + OriginDimensions,
{
    fn geometry(&self) -> Geometry {
        self.size().into()
    }

    fn is_lit(&self, x: u32, y: u32) -> bool {
        self.pixel(Point::new(x as i32, y as i32)) == Some(BinaryColor::On)
    }
}

/// An owned 1-bit image, stored row-major with 8 pixels per byte (leftmost pixel in the most
/// significant bit). Every row starts on a byte boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    stride: usize,
    buf: Vec<u8>,
}

impl Bitmap {
    /// A blank (all pixels off) image of the given size.
    pub fn new(geometry: Geometry) -> Self {
        let stride = (geometry.width as usize + 7) / 8;
        Self {
            width: geometry.width,
            height: geometry.height,
            stride,
            buf: vec![0u8; stride * geometry.height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let byte = y as usize * self.stride + x as usize / 8;
        Some((byte, 0x80 >> (x % 8)))
    }

    /// Read a pixel, or `None` if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        self.index(x, y).map(|(byte, mask)| self.buf[byte] & mask != 0)
    }

    /// Write a pixel. Writes outside the image are dropped.
    pub fn set(&mut self, x: u32, y: u32, lit: bool) {
        if let Some((byte, mask)) = self.index(x, y) {
            if lit {
                self.buf[byte] |= mask;
            } else {
                self.buf[byte] &= !mask;
            }
        }
    }

    /// Set every pixel to `lit`.
    pub fn fill(&mut self, lit: bool) {
        let value = if lit { 0xFF } else { 0x00 };
        self.buf.iter_mut().for_each(|b| *b = value);
    }

    /// The packed row-major pixel data.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl GetPixel for Bitmap {
    type Color = BinaryColor;

    fn pixel(&self, p: Point) -> Option<BinaryColor> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        self.get(p.x as u32, p.y as u32).map(|lit| {
            if lit {
                BinaryColor::On
            } else {
                BinaryColor::Off
            }
        })
    }
}

impl DrawTarget for Bitmap {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }
            self.set(x as u32, y as u32, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.is_on());
        Ok(())
    }
}
