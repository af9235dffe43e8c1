//! The two-wire bus seam. A [`Transport`] opens a device on a bus and writes raw transactions to
//! it; a [`Device`] owns one open handle and turns command and data byte sequences into
//! mode-prefixed transactions no longer than the bus allows.

use core::fmt::Debug;

use log::trace;

use crate::error::Error;

/// Maximum number of payload bytes in one bus transaction. The mode prefix byte is sent in
/// addition to these.
pub const MAX_PAYLOAD: usize = 32;

/// The selector byte that starts every transaction, telling the controller whether the rest of
/// the transaction is register commands or display RAM data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    Command = 0x00,
    Data = 0x40,
}

/// A bus driver able to reach devices by bus index and 7-bit address.
pub trait Transport {
    /// An open connection to one device.
    type Handle;
    type Error: Debug;

    /// Open the device at `address` on bus `bus`.
    fn open(&mut self, bus: u8, address: u8) -> Result<Self::Handle, Self::Error>;

    /// Write `bytes` to the device as a single transaction.
    fn write(&mut self, handle: &mut Self::Handle, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Close the connection.
    fn close(&mut self, handle: Self::Handle) -> Result<(), Self::Error>;
}

/// An open device: the transport, where the device lives, and the handle to it.
pub struct Device<T>
where
    T: Transport,
{
    transport: T,
    bus: u8,
    address: u8,
    handle: Option<T::Handle>,
}

impl<T> Device<T>
where
    T: Transport,
{
    /// Open the device at `address` on bus `bus`. Failure is returned as-is, without retry.
    pub fn open(mut transport: T, bus: u8, address: u8) -> Result<Self, Error<T::Error>> {
        let handle = transport.open(bus, address).map_err(Error::Transport)?;
        Ok(Self {
            transport,
            bus,
            address,
            handle: Some(handle),
        })
    }

    pub fn bus(&self) -> u8 {
        self.bus
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Send `bytes` as consecutive transactions of at most `MAX_PAYLOAD` bytes, each prefixed with
    /// `mode`. An empty sequence sends nothing. The first failed transaction aborts the rest.
    pub fn write(&mut self, mode: Mode, bytes: &[u8]) -> Result<(), Error<T::Error>> {
        let handle = self.handle.as_mut().ok_or(Error::Closed)?;
        let mut packet = [0u8; MAX_PAYLOAD + 1];
        packet[0] = mode as u8;
        for chunk in bytes.chunks(MAX_PAYLOAD) {
            packet[1..=chunk.len()].copy_from_slice(chunk);
            trace!(
                "i2c {}:{:#04x} {:?} {} bytes",
                self.bus,
                self.address,
                mode,
                chunk.len()
            );
            self.transport
                .write(handle, &packet[..=chunk.len()])
                .map_err(Error::Transport)?;
        }
        Ok(())
    }

    pub fn write_commands(&mut self, cmds: &[u8]) -> Result<(), Error<T::Error>> {
        self.write(Mode::Command, cmds)
    }

    pub fn write_data(&mut self, data: &[u8]) -> Result<(), Error<T::Error>> {
        self.write(Mode::Data, data)
    }

    /// Close the handle. Closing an already closed device does nothing.
    pub fn close(&mut self) -> Result<(), Error<T::Error>> {
        match self.handle.take() {
            Some(handle) => self.transport.close(handle).map_err(Error::Transport),
            None => Ok(()),
        }
    }

    /// Give back the transport. The handle, if still open, is dropped without being closed.
    pub fn into_transport(self) -> T {
        self.transport
    }
}

pub mod hal {
    //! A transport over any `embedded-hal` blocking I2C bus. One instance stands for exactly one
    //! bus; the bus index it is constructed with is the only one it will open.

    use embedded_hal::blocking::i2c::Write;
    use thiserror::Error;

    use super::Transport;

    #[derive(Debug, Error)]
    pub enum HalError<E: core::fmt::Debug> {
        #[error("bus {requested} requested but this transport drives bus {available}")]
        UnknownBus { requested: u8, available: u8 },
        #[error("i2c write failed: {0:?}")]
        I2c(E),
    }

    pub struct HalTransport<I2C> {
        /// The I2C master the display is attached to.
        i2c: I2C,
        /// The index the bus is known by.
        bus: u8,
    }

    impl<I2C, E> HalTransport<I2C>
    where
        I2C: Write<Error = E>,
        E: core::fmt::Debug,
    {
        /// Wrap the I2C master `i2c`, which will answer to bus index `bus`.
        pub fn new(i2c: I2C, bus: u8) -> Self {
            Self { i2c, bus }
        }

        /// Give back the I2C master.
        pub fn release(self) -> I2C {
            self.i2c
        }
    }

    impl<I2C, E> Transport for HalTransport<I2C>
    where
        I2C: Write<Error = E>,
        E: core::fmt::Debug,
    {
        /// The device address.
        type Handle = u8;
        type Error = HalError<E>;

        fn open(&mut self, bus: u8, address: u8) -> Result<u8, Self::Error> {
            if bus != self.bus {
                return Err(HalError::UnknownBus {
                    requested: bus,
                    available: self.bus,
                });
            }
            Ok(address)
        }

        fn write(&mut self, handle: &mut u8, bytes: &[u8]) -> Result<(), Self::Error> {
            self.i2c.write(*handle, bytes).map_err(HalError::I2c)
        }

        fn close(&mut self, _handle: u8) -> Result<(), Self::Error> {
            Ok(())
        }
    }
}

#[cfg(feature = "linux")]
pub mod linux {
    //! A transport over the Linux i2c-dev interface. Bus `n` is `/dev/i2c-n`.

    use embedded_hal::blocking::i2c::Write;
    use linux_embedded_hal::I2cdev;

    use super::Transport;

    pub struct LinuxHandle {
        dev: I2cdev,
        address: u8,
    }

    #[derive(Clone, Copy, Debug, Default)]
    pub struct LinuxTransport;

    impl LinuxTransport {
        pub fn new() -> Self {
            LinuxTransport
        }
    }

    impl Transport for LinuxTransport {
        type Handle = LinuxHandle;
        type Error = <I2cdev as Write>::Error;

        fn open(&mut self, bus: u8, address: u8) -> Result<LinuxHandle, Self::Error> {
            let dev = I2cdev::new(format!("/dev/i2c-{}", bus))?;
            Ok(LinuxHandle { dev, address })
        }

        fn write(&mut self, handle: &mut LinuxHandle, bytes: &[u8]) -> Result<(), Self::Error> {
            handle.dev.write(handle.address, bytes)
        }

        fn close(&mut self, handle: LinuxHandle) -> Result<(), Self::Error> {
            // The file descriptor is released when the device is dropped.
            drop(handle);
            Ok(())
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_spy::{Sent, SpyError, TestSpyTransport};
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn open(spy: &TestSpyTransport) -> Device<TestSpyTransport> {
        let dev = Device::open(spy.split(), 1, 0x3C).unwrap();
        spy.clear();
        dev
    }

    #[test]
    fn open_records_bus_and_address() {
        let spy = TestSpyTransport::new();
        let dev = Device::open(spy.split(), 1, 0x3C).unwrap();
        assert_eq!(spy.sent(), vec![Sent::Open { bus: 1, address: 0x3C }]);
        assert!(dev.is_open());
        assert_eq!((dev.bus(), dev.address()), (1, 0x3C));
    }

    #[test]
    fn open_failure_propagates() {
        let spy = TestSpyTransport::new();
        spy.fail_open();
        assert!(matches!(
            Device::open(spy.split(), 1, 0x3C),
            Err(Error::Transport(SpyError))
        ));
        assert!(spy.sent().is_empty());
    }

    #[test]
    fn chunk_of_exactly_32() {
        let spy = TestSpyTransport::new();
        let mut dev = open(&spy);
        let bytes: Vec<u8> = (0..32).collect();
        dev.write_commands(&bytes).unwrap();
        let writes = spy.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].len(), 33);
        assert_eq!(writes[0][0], 0x00);
        assert_eq!(&writes[0][1..], &bytes[..]);
    }

    #[test]
    fn chunk_of_33() {
        let spy = TestSpyTransport::new();
        let mut dev = open(&spy);
        let bytes: Vec<u8> = (0..33).collect();
        dev.write_data(&bytes).unwrap();
        let writes = spy.writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0][0], 0x40);
        assert_eq!(writes[0].len(), 33);
        assert_eq!(writes[1], vec![0x40, 32]);
    }

    #[test]
    fn chunk_of_64() {
        let spy = TestSpyTransport::new();
        let mut dev = open(&spy);
        let bytes: Vec<u8> = (0..64).collect();
        dev.write_data(&bytes).unwrap();
        let writes = spy.writes();
        assert_eq!(writes.len(), 2);
        assert!(writes.iter().all(|w| w.len() == 33 && w[0] == 0x40));
        assert_eq!(spy.payload(0x40), bytes);
    }

    #[test]
    fn empty_sequence_sends_nothing() {
        let spy = TestSpyTransport::new();
        let mut dev = open(&spy);
        dev.write_commands(&[]).unwrap();
        dev.write_data(&[]).unwrap();
        assert!(spy.sent().is_empty());
    }

    #[test]
    fn failed_chunk_aborts_the_rest() {
        let spy = TestSpyTransport::new();
        let mut dev = open(&spy);
        spy.fail_write_at(1);
        let bytes = [0xAAu8; 96];
        assert!(matches!(
            dev.write_data(&bytes),
            Err(Error::Transport(SpyError))
        ));
        // First chunk went out, the second failed, the third was never attempted.
        assert_eq!(spy.writes().len(), 1);
    }

    #[test]
    fn close_is_idempotent_and_blocks_writes() {
        let spy = TestSpyTransport::new();
        let mut dev = open(&spy);
        dev.close().unwrap();
        dev.close().unwrap();
        assert_eq!(spy.sent(), vec![Sent::Close]);
        assert!(!dev.is_open());
        assert!(matches!(dev.write_commands(&[0xAF]), Err(Error::Closed)));
        assert_eq!(spy.sent(), vec![Sent::Close]);
    }
}
