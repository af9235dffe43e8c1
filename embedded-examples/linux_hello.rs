//! Full example code for an SH1106 128x64 module on a Raspberry Pi, connected to the I2C header
//! pins (bus 1) at the usual address 0x3C. Build with `--features linux`.

extern crate embedded_graphics;
extern crate oled_i2c;

use std::thread;
use std::time::Duration;

use embedded_graphics::mono_font::{ascii::FONT_6X10, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use oled_i2c as oled;

fn main() -> Result<(), oled::Error<<oled::LinuxTransport as oled::Transport>::Error>> {
    // Most 1.3" modules are SH1106; swap in `Chipset::Ssd1306` for the 0.96" ones. Flip the image
    // for modules mounted upside down.
    let mut disp = oled::Display::new(
        oled::LinuxTransport::new(),
        1,
        0x3C,
        oled::Chipset::Sh1106,
        oled::Geometry::new(128, 64),
        oled::Config::new().contrast(0x40),
    )?;

    let text = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    for i in 0..10 {
        disp.canvas(|bmp| -> Result<(), oled::Error<_>> {
            Rectangle::new(Point::zero(), Size::new(128, 64))
                .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                .draw(bmp)
                .unwrap_or_else(|e| match e {});
            Text::new("hello, world", Point::new(8, 20), text)
                .draw(bmp)
                .unwrap_or_else(|e| match e {});
            Text::new(&format!("frame {}", i), Point::new(8, 40), text)
                .draw(bmp)
                .unwrap_or_else(|e| match e {});
            Ok(())
        })?;
        thread::sleep(Duration::from_millis(500));
    }

    // The panel keeps showing the last frame until power is removed.
    disp.close()
}
