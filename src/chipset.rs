//! The two supported controllers: what they need at power-on and how a frame is addressed.

use alloc::vec::Vec;

use crate::bitmap::PixelSource;
use crate::command::consts::*;
use crate::geometry::Geometry;
use crate::transcode::{self, Transfer};

#[rustfmt::skip]
const SH1106_INIT: &[u8] = &[
    DISPLAY_OFF,
    MEMORY_MODE,
    SET_HIGH_COLUMN, 0xB0, 0xC8,
    SET_LOW_COLUMN, 0x10, 0x40,
    SET_CONTRAST, 0x7F,
    SEGMENT_REMAP_REVERSE,
    NORMAL_DISPLAY,
    SET_MULTIPLEX, 0x3F,
    DISPLAY_ALL_ON_RESUME,
    SET_DISPLAY_OFFSET, 0x00,
    SET_CLOCK_DIV, 0xF0,
    SET_PRECHARGE, 0x22,
    SET_COM_PINS, 0x12,
    SET_VCOM_DETECT, 0x20,
    CHARGE_PUMP, CHARGE_PUMP_ENABLE,
    DISPLAY_ON,
];

#[rustfmt::skip]
const SSD1306_INIT: &[u8] = &[
    DISPLAY_OFF,
    SET_CLOCK_DIV, 0x80,
    SET_MULTIPLEX, 0x3F,
    SET_DISPLAY_OFFSET, 0x00,
    SET_START_LINE,
    CHARGE_PUMP, CHARGE_PUMP_ENABLE,
    MEMORY_MODE, 0x00,
    SEGMENT_REMAP,
    COM_SCAN_DEC,
    SET_COM_PINS, 0x12,
    SET_CONTRAST, 0xCF,
    SET_PRECHARGE, 0xF1,
    SET_VCOM_DETECT, 0x40,
    DISPLAY_ALL_ON_RESUME,
    NORMAL_DISPLAY,
    DISPLAY_ON,
];

/// The display controller, which decides the init sequence and the RAM addressing scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Chipset {
    /// SH1106: paged addressing, one page select command per page.
    Sh1106,
    /// SSD1306: linear (horizontal) addressing, one range command per frame.
    Ssd1306,
}

impl Chipset {
    /// The command bytes that take the controller from power-on to displaying RAM.
    pub fn init_sequence(self) -> &'static [u8] {
        match self {
            Chipset::Sh1106 => SH1106_INIT,
            Chipset::Ssd1306 => SSD1306_INIT,
        }
    }

    /// Whether a panel of this size can be driven: 1-128 columns and 1-8 complete pages.
    pub fn supports(self, geometry: Geometry) -> bool {
        (1..=NUM_COLUMNS as u32).contains(&geometry.width)
            && (1..=NUM_PAGES as u32).contains(&geometry.pages())
    }

    /// Turn `src` into the command and data transfers that put it on screen.
    pub fn transcode<S>(self, geometry: Geometry, src: &S) -> Vec<Transfer>
    where
        S: PixelSource + ?Sized,
    {
        match self {
            Chipset::Sh1106 => transcode::paged(geometry, src),
            Chipset::Ssd1306 => transcode::linear(geometry, src),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;

    #[test]
    fn sh1106_init_sequence() {
        assert_eq!(
            Chipset::Sh1106.init_sequence(),
            &[
                0xAE, 0x20, 0x10, 0xB0, 0xC8, 0x00, 0x10, 0x40, 0x81, 0x7F, 0xA1, 0xA6, 0xA8, 0x3F,
                0xA4, 0xD3, 0x00, 0xD5, 0xF0, 0xD9, 0x22, 0xDA, 0x12, 0xDB, 0x20, 0x8D, 0x14, 0xAF,
            ][..]
        );
    }

    #[test]
    fn ssd1306_init_sequence() {
        assert_eq!(
            Chipset::Ssd1306.init_sequence(),
            &[
                0xAE, 0xD5, 0x80, 0xA8, 0x3F, 0xD3, 0x00, 0x40, 0x8D, 0x14, 0x20, 0x00, 0xA0, 0xC8,
                0xDA, 0x12, 0x81, 0xCF, 0xD9, 0xF1, 0xDB, 0x40, 0xA4, 0xA6, 0xAF,
            ][..]
        );
    }

    #[test]
    fn supported_geometry() {
        for chip in [Chipset::Sh1106, Chipset::Ssd1306] {
            assert!(chip.supports(Geometry::new(128, 64)));
            assert!(chip.supports(Geometry::new(128, 32)));
            assert!(chip.supports(Geometry::new(64, 48)));
            assert!(chip.supports(Geometry::new(128, 63)));
            assert!(!chip.supports(Geometry::new(129, 64)));
            assert!(!chip.supports(Geometry::new(0, 64)));
            assert!(!chip.supports(Geometry::new(128, 7)));
            assert!(!chip.supports(Geometry::new(128, 72)));
        }
    }

    #[test]
    fn transcode_dispatches_by_addressing() {
        let g = Geometry::new(8, 16);
        let bmp = Bitmap::new(g);
        assert_eq!(Chipset::Sh1106.transcode(g, &bmp).len(), 4);
        assert_eq!(Chipset::Ssd1306.transcode(g, &bmp).len(), 2);
    }
}
