//! Optional commands sent once at init time, after the chipset's fixed init sequence.

use alloc::vec::Vec;

use crate::command::{Command, OutOfRange};

/// A configuration for the display. Builder methods offer a declarative way to either send a
/// configuration command at init time, or to leave the setting from the chipset's init sequence
/// in place. Commands are sent in a fixed order, followed by any raw bytes given to `commands`.
#[derive(Clone, Debug, Default)]
pub struct Config {
    contrast_cmd: Option<Command>,
    invert_cmd: Option<Command>,
    multiplex_cmd: Option<Command>,
    display_offset_cmd: Option<Command>,
    start_line_cmd: Option<Command>,
    segment_remap_cmd: Option<Command>,
    com_scan_cmd: Option<Command>,
    com_pins_cmd: Option<Command>,
    clock_div_cmd: Option<Command>,
    precharge_cmd: Option<Command>,
    vcom_deselect_cmd: Option<Command>,
    raw: Vec<u8>,
}

impl Config {
    /// A configuration that sends nothing beyond the init sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// See `Command::Contrast`.
    pub fn contrast(self, level: u8) -> Self {
        Self {
            contrast_cmd: Some(Command::Contrast(level)),
            ..self
        }
    }

    /// See `Command::Invert`.
    pub fn inverted(self, inverted: bool) -> Self {
        Self {
            invert_cmd: Some(Command::Invert(inverted)),
            ..self
        }
    }

    /// See `Command::Multiplex`. Panels shorter than 64 rows need this to match their height.
    pub fn multiplex(self, ratio: u8) -> Self {
        Self {
            multiplex_cmd: Some(Command::Multiplex(ratio)),
            ..self
        }
    }

    /// See `Command::DisplayOffset`.
    pub fn display_offset(self, offset: u8) -> Self {
        Self {
            display_offset_cmd: Some(Command::DisplayOffset(offset)),
            ..self
        }
    }

    /// See `Command::StartLine`.
    pub fn start_line(self, line: u8) -> Self {
        Self {
            start_line_cmd: Some(Command::StartLine(line)),
            ..self
        }
    }

    /// See `Command::SegmentRemap`.
    pub fn segment_remap(self, remap: bool) -> Self {
        Self {
            segment_remap_cmd: Some(Command::SegmentRemap(remap)),
            ..self
        }
    }

    /// See `Command::ComScanReversed`. Together with `segment_remap` this rotates the image by
    /// 180 degrees.
    pub fn com_scan_reversed(self, reversed: bool) -> Self {
        Self {
            com_scan_cmd: Some(Command::ComScanReversed(reversed)),
            ..self
        }
    }

    /// See `Command::ComPins`.
    pub fn com_pins(self, alternative: bool, remap: bool) -> Self {
        Self {
            com_pins_cmd: Some(Command::ComPins(alternative, remap)),
            ..self
        }
    }

    /// See `Command::ClockDiv`.
    pub fn clock_div(self, fosc: u8, divide: u8) -> Self {
        Self {
            clock_div_cmd: Some(Command::ClockDiv(fosc, divide)),
            ..self
        }
    }

    /// See `Command::Precharge`.
    pub fn precharge(self, phase_1: u8, phase_2: u8) -> Self {
        Self {
            precharge_cmd: Some(Command::Precharge(phase_1, phase_2)),
            ..self
        }
    }

    /// See `Command::VcomDeselect`.
    pub fn vcom_deselect(self, level: u8) -> Self {
        Self {
            vcom_deselect_cmd: Some(Command::VcomDeselect(level)),
            ..self
        }
    }

    /// Append raw command bytes, sent verbatim after everything else. Nothing checks them.
    pub fn commands(mut self, bytes: &[u8]) -> Self {
        self.raw.extend_from_slice(bytes);
        self
    }

    /// Encode the configuration to command bytes. Fails without side effects if any configured
    /// command has an argument out of range.
    pub(crate) fn to_bytes(&self) -> Result<Vec<u8>, OutOfRange> {
        let mut out = Vec::new();
        let mut buf = [0u8; 3];
        for cmd in [
            self.contrast_cmd,
            self.invert_cmd,
            self.multiplex_cmd,
            self.display_offset_cmd,
            self.start_line_cmd,
            self.segment_remap_cmd,
            self.com_scan_cmd,
            self.com_pins_cmd,
            self.clock_div_cmd,
            self.precharge_cmd,
            self.vcom_deselect_cmd,
        ]
        .into_iter()
        .flatten()
        {
            out.extend_from_slice(cmd.encode(&mut buf)?);
        }
        out.extend_from_slice(&self.raw);
        Ok(out)
    }
}
