use core::fmt::Debug;

use thiserror::Error;

use crate::chipset::Chipset;
use crate::command::OutOfRange;

/// Everything that can go wrong driving a display. `E` is the error type of the bus transport,
/// which is passed through untouched.
#[derive(Debug, Error)]
pub enum Error<E: Debug> {
    /// The bus transport failed to open, write or close. Already sent transactions are not rolled
    /// back, so a failure mid-frame leaves the panel partially updated.
    #[error("bus transport failure: {0:?}")]
    Transport(E),

    /// A bitmap was rendered whose size is not the display's.
    #[error("bitmap is {actual_width}x{actual_height} but the display is {width}x{height}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    /// The controller cannot drive a panel of this size.
    #[error("{width}x{height} is not a geometry the {chipset:?} can drive")]
    UnsupportedGeometry {
        chipset: Chipset,
        width: u32,
        height: u32,
    },

    /// A configured command has an argument out of range.
    #[error(transparent)]
    InvalidCommand(#[from] OutOfRange),

    /// The display has been closed.
    #[error("display is closed")]
    Closed,
}
