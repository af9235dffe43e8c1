//! Driver library for cheap monochrome OLED modules built on the Sino Wealth SH1106 or the
//! Solomon Systech SSD1306 controller, attached over a two-wire (I2C) bus.
//!
//! The driver converts a 1-bit, row-major bitmap into the page/column-addressed byte stream the
//! controller expects and pushes it out in bus transactions of at most 32 payload bytes. Drawing
//! is done with `embedded-graphics` on a [`Bitmap`], most conveniently through
//! [`Display::canvas`].

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod bitmap;
pub mod chipset;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod geometry;
pub mod interface;
pub mod transcode;

// Re-exports for primary API.
pub use bitmap::{Bitmap, PixelSource};
pub use chipset::Chipset;
pub use command::{consts, Command};
pub use config::Config;
pub use display::{Display, State};
pub use error::Error;
pub use geometry::Geometry;
pub use interface::hal::HalTransport;
#[cfg(feature = "linux")]
pub use interface::linux::LinuxTransport;
pub use interface::{Device, Mode, Transport};
