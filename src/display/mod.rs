//! The main API to the display driver. A `Display` owns the open bus device, brings the
//! controller up at construction, and renders whole frames from any 1-bit pixel source.

pub mod canvas;

use log::{debug, warn};

use crate::bitmap::PixelSource;
use crate::chipset::Chipset;
use crate::command::Command;
use crate::config::Config;
use crate::error::Error;
use crate::geometry::Geometry;
use crate::interface::{Device, Transport};
use crate::transcode::Transfer;

/// Lifecycle of a [`Display`]. A display is `Initializing` only while `Display::new` is running,
/// so a constructed display starts out `Ready`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Initializing,
    Ready,
    Closed,
}

/// A driver for an SH1106 or SSD1306 display.
pub struct Display<T>
where
    T: Transport,
{
    device: Device<T>,
    chipset: Chipset,
    geometry: Geometry,
    state: State,
}

impl<T> Display<T>
where
    T: Transport,
{
    /// Open the device at `address` on bus `bus` and initialize it: the chipset's init sequence
    /// is sent, followed by the commands in `config`.
    ///
    /// The geometry must be 1-128 columns wide and hold 1-8 complete pages. A height that is not a
    /// multiple of 8 is accepted, but the rows below the last complete page are never drawn.
    ///
    /// Bad geometry or configuration is reported before the bus is touched. A failure to open is
    /// returned without retry. If initialization fails after opening, the device is closed again
    /// and the init failure returned.
    pub fn new(
        transport: T,
        bus: u8,
        address: u8,
        chipset: Chipset,
        geometry: Geometry,
        config: Config,
    ) -> Result<Self, Error<T::Error>> {
        if !chipset.supports(geometry) {
            return Err(Error::UnsupportedGeometry {
                chipset,
                width: geometry.width,
                height: geometry.height,
            });
        }
        if geometry.truncated_rows() != 0 {
            warn!(
                "display height {} is not a multiple of 8, bottom {} rows will not be shown",
                geometry.height,
                geometry.truncated_rows()
            );
        }
        let extra = config.to_bytes()?;

        let device = Device::open(transport, bus, address)?;
        debug!(
            "opened {:?} {}x{} at i2c {}:{:#04x}",
            chipset, geometry.width, geometry.height, bus, address
        );
        let mut display = Display {
            device,
            chipset,
            geometry,
            state: State::Initializing,
        };
        if let Err(e) = display.init(&extra) {
            if let Err(close_err) = display.device.close() {
                warn!("close after failed init also failed: {:?}", close_err);
            }
            return Err(e);
        }
        display.state = State::Ready;
        Ok(display)
    }

    fn init(&mut self, extra: &[u8]) -> Result<(), Error<T::Error>> {
        self.device.write_commands(self.chipset.init_sequence())?;
        self.device.write_commands(extra)?;
        debug!(
            "initialized {:?} with {} extra command bytes",
            self.chipset,
            extra.len()
        );
        Ok(())
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn chipset(&self) -> Chipset {
        self.chipset
    }

    /// Send raw command bytes, chunked into transactions. Prefer the typed methods.
    pub fn write_commands(&mut self, cmds: &[u8]) -> Result<(), Error<T::Error>> {
        self.device.write_commands(cmds)
    }

    /// Send raw display RAM bytes, chunked into transactions. Prefer `render`.
    pub fn write_data(&mut self, data: &[u8]) -> Result<(), Error<T::Error>> {
        self.device.write_data(data)
    }

    /// Send one command. Arguments are range checked before anything is sent.
    pub fn command(&mut self, cmd: Command) -> Result<(), Error<T::Error>> {
        let mut buf = [0u8; 3];
        let bytes = cmd.encode(&mut buf)?;
        self.device.write_commands(bytes)
    }

    /// Set the contrast. See `Command::Contrast`.
    pub fn set_contrast(&mut self, level: u8) -> Result<(), Error<T::Error>> {
        self.command(Command::Contrast(level))
    }

    /// Invert the displayed image. See `Command::Invert`.
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Error<T::Error>> {
        self.command(Command::Invert(inverted))
    }

    /// Turn the panel on or off. The frame in display RAM survives being turned off.
    pub fn set_display_on(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        self.command(Command::DisplayOn(on))
    }

    /// Push a complete frame to the panel. Every transaction has been sent by the time this
    /// returns.
    ///
    /// `src` must be exactly the size of the display. On a transport failure the frame is left
    /// partly drawn.
    pub fn render<S>(&mut self, src: &S) -> Result<(), Error<T::Error>>
    where
        S: PixelSource + ?Sized,
    {
        if self.state != State::Ready {
            return Err(Error::Closed);
        }
        let actual = src.geometry();
        if actual != self.geometry {
            return Err(Error::DimensionMismatch {
                width: self.geometry.width,
                height: self.geometry.height,
                actual_width: actual.width,
                actual_height: actual.height,
            });
        }
        for transfer in self.chipset.transcode(self.geometry, src) {
            match transfer {
                Transfer::Commands(cmds) => self.device.write_commands(&cmds)?,
                Transfer::Data(data) => self.device.write_data(&data)?,
            }
        }
        Ok(())
    }

    /// Close the bus device. Closing twice is harmless; everything else fails with
    /// `Error::Closed` afterwards.
    pub fn close(&mut self) -> Result<(), Error<T::Error>> {
        if self.state == State::Closed {
            return Ok(());
        }
        self.state = State::Closed;
        debug!(
            "closing i2c {}:{:#04x}",
            self.device.bus(),
            self.device.address()
        );
        self.device.close()
    }

    /// Close the display if still open and give back the transport.
    pub fn release(mut self) -> T {
        if let Err(e) = self.close() {
            warn!("close on release failed: {:?}", e);
        }
        self.device.into_transport()
    }
}
