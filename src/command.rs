//! The command set shared by the SH1106 and SSD1306, plus the few registers only one of them has.
//!
//! Note 1: Display RAM on both chips is split into 8 pages of 8 pixel rows each. One data byte
//! covers 8 vertically stacked pixels of a single column within a page, least significant bit on
//! top. The SH1106 has 132 columns of RAM of which a 128 pixel wide panel shows columns 2-129.
//!
//! Note 2: None of these commands are acknowledged by the controller at the protocol level. A
//! wrong opcode or operand silently misconfigures the panel, so every value here is taken directly
//! from the datasheets.

use thiserror::Error;

pub mod consts {
    //! Raw opcode bytes.

    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    /// SSD1306 only. On the SH1106 this byte is an ignored column nibble command.
    pub const MEMORY_MODE: u8 = 0x20;
    /// SSD1306 only.
    pub const COLUMN_ADDR: u8 = 0x21;
    /// SSD1306 only.
    pub const PAGE_ADDR: u8 = 0x22;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const CHARGE_PUMP: u8 = 0x8D;
    pub const SEGMENT_REMAP: u8 = 0xA0;
    pub const SEGMENT_REMAP_REVERSE: u8 = 0xA1;
    pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;
    pub const DISPLAY_ALL_ON: u8 = 0xA5;
    pub const NORMAL_DISPLAY: u8 = 0xA6;
    pub const INVERT_DISPLAY: u8 = 0xA7;
    pub const SET_MULTIPLEX: u8 = 0xA8;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    /// Page select; the page number is OR-ed into the low 3 bits.
    pub const PAGE_START: u8 = 0xB0;
    pub const COM_SCAN_INC: u8 = 0xC0;
    pub const COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;

    /// Operand of `CHARGE_PUMP` enabling the internal DC-DC converter.
    pub const CHARGE_PUMP_ENABLE: u8 = 0x14;
    /// Operand of `CHARGE_PUMP` disabling the internal DC-DC converter.
    pub const CHARGE_PUMP_DISABLE: u8 = 0x10;

    pub const NUM_PAGES: u8 = 8;
    pub const NUM_COLUMNS: u8 = 128;
    pub const PAGE_MAX: u8 = NUM_PAGES - 1;
    pub const COLUMN_MAX: u8 = NUM_COLUMNS - 1;
    pub const ROW_MAX: u8 = NUM_PAGES * 8 - 1;
}

use self::consts::*;

/// A command argument was outside the range the controller accepts. Carries the name of the
/// offending command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("argument out of range for {0}")]
pub struct OutOfRange(pub &'static str);

/// SSD1306 memory addressing mode, selecting how the RAM pointer advances as data is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    /// Column pointer advances, wrapping to the next page at the end of the column range.
    Horizontal,
    /// Page pointer advances, wrapping to the next column at the end of the page range.
    Vertical,
    /// Column pointer advances and wraps within the current page. Power-on default.
    Page,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Turn the panel on or off. RAM contents are retained while off.
    DisplayOn(bool),
    /// Set the contrast (segment drive current). Range 0-255.
    Contrast(u8),
    /// Light every pixel regardless of RAM contents when `true`; follow RAM when `false`.
    EntireDisplayOn(bool),
    /// Invert the meaning of RAM bits when `true`.
    Invert(bool),
    /// Select the memory addressing mode. SSD1306 only.
    MemoryMode(AddressingMode),
    /// Set the column start and end address for horizontal or vertical addressing. Range 0-127,
    /// start <= end. SSD1306 only.
    ColumnAddress(u8, u8),
    /// Set the page start and end address for horizontal or vertical addressing. Range 0-7,
    /// start <= end. SSD1306 only.
    PageAddress(u8, u8),
    /// Select the page for page addressing. Range 0-7.
    PageStart(u8),
    /// Set the low nibble of the column pointer for page addressing. Range 0-15.
    LowerColumn(u8),
    /// Set the high nibble of the column pointer for page addressing. Range 0-15.
    UpperColumn(u8),
    /// Set the RAM row shown on the first COM line. Range 0-63.
    StartLine(u8),
    /// Map column address 0 to the last segment when `true`, mirroring the image horizontally.
    SegmentRemap(bool),
    /// Scan COM lines from the last to the first when `true`, mirroring the image vertically.
    ComScanReversed(bool),
    /// Set the number of active COM lines. Range 16-64.
    Multiplex(u8),
    /// Shift the mapping of COM lines to rows. Range 0-63.
    DisplayOffset(u8),
    /// Set the oscillator frequency (0-15) and the display clock divide ratio (1-16).
    ClockDiv(u8, u8),
    /// Set the pre-charge phase 1 and phase 2 periods, each 1-15 DCLKs.
    Precharge(u8, u8),
    /// Set the COM pin hardware layout: alternative (interleaved) pin order and left/right remap.
    ComPins(bool, bool),
    /// Set the VCOMH deselect level register.
    VcomDeselect(u8),
    /// Enable or disable the internal charge pump.
    ChargePump(bool),
}

macro_rules! ok_command {
    ($buf:ident, [$($byte:expr),+]) => {{
        let bytes = [$($byte),+];
        $buf[..bytes.len()].copy_from_slice(&bytes);
        Ok(&$buf[..bytes.len()])
    }};
}

impl Command {
    /// Encode the opcode and its operands into `buf`, returning the bytes to transmit in a command
    /// transaction.
    pub fn encode(self, buf: &mut [u8; 3]) -> Result<&[u8], OutOfRange> {
        match self {
            Command::DisplayOn(on) => ok_command!(buf, [if on { DISPLAY_ON } else { DISPLAY_OFF }]),
            Command::Contrast(level) => ok_command!(buf, [SET_CONTRAST, level]),
            Command::EntireDisplayOn(on) => ok_command!(
                buf,
                [if on {
                    DISPLAY_ALL_ON
                } else {
                    DISPLAY_ALL_ON_RESUME
                }]
            ),
            Command::Invert(inv) => ok_command!(
                buf,
                [if inv { INVERT_DISPLAY } else { NORMAL_DISPLAY }]
            ),
            Command::MemoryMode(mode) => {
                let m = match mode {
                    AddressingMode::Horizontal => 0x00,
                    AddressingMode::Vertical => 0x01,
                    AddressingMode::Page => 0x02,
                };
                ok_command!(buf, [MEMORY_MODE, m])
            }
            Command::ColumnAddress(start, end) => match (start, end) {
                (0..=COLUMN_MAX, 0..=COLUMN_MAX) if start <= end => {
                    ok_command!(buf, [COLUMN_ADDR, start, end])
                }
                _ => Err(OutOfRange("ColumnAddress")),
            },
            Command::PageAddress(start, end) => match (start, end) {
                (0..=PAGE_MAX, 0..=PAGE_MAX) if start <= end => {
                    ok_command!(buf, [PAGE_ADDR, start, end])
                }
                _ => Err(OutOfRange("PageAddress")),
            },
            Command::PageStart(page) => match page {
                0..=PAGE_MAX => ok_command!(buf, [PAGE_START | page]),
                _ => Err(OutOfRange("PageStart")),
            },
            Command::LowerColumn(nibble) => match nibble {
                0..=15 => ok_command!(buf, [SET_LOW_COLUMN | nibble]),
                _ => Err(OutOfRange("LowerColumn")),
            },
            Command::UpperColumn(nibble) => match nibble {
                0..=15 => ok_command!(buf, [SET_HIGH_COLUMN | nibble]),
                _ => Err(OutOfRange("UpperColumn")),
            },
            Command::StartLine(line) => match line {
                0..=ROW_MAX => ok_command!(buf, [SET_START_LINE | line]),
                _ => Err(OutOfRange("StartLine")),
            },
            Command::SegmentRemap(remap) => ok_command!(
                buf,
                [if remap {
                    SEGMENT_REMAP_REVERSE
                } else {
                    SEGMENT_REMAP
                }]
            ),
            Command::ComScanReversed(rev) => ok_command!(
                buf,
                [if rev { COM_SCAN_DEC } else { COM_SCAN_INC }]
            ),
            Command::Multiplex(ratio) => match ratio {
                16..=64 => ok_command!(buf, [SET_MULTIPLEX, ratio - 1]),
                _ => Err(OutOfRange("Multiplex")),
            },
            Command::DisplayOffset(offset) => match offset {
                0..=ROW_MAX => ok_command!(buf, [SET_DISPLAY_OFFSET, offset]),
                _ => Err(OutOfRange("DisplayOffset")),
            },
            Command::ClockDiv(fosc, divide) => match (fosc, divide) {
                (0..=15, 1..=16) => ok_command!(buf, [SET_CLOCK_DIV, fosc << 4 | (divide - 1)]),
                _ => Err(OutOfRange("ClockDiv")),
            },
            Command::Precharge(phase_1, phase_2) => match (phase_1, phase_2) {
                (1..=15, 1..=15) => ok_command!(buf, [SET_PRECHARGE, phase_2 << 4 | phase_1]),
                _ => Err(OutOfRange("Precharge")),
            },
            Command::ComPins(alternative, remap) => {
                let alt = if alternative { 0x10 } else { 0x00 };
                let lr = if remap { 0x20 } else { 0x00 };
                ok_command!(buf, [SET_COM_PINS, 0x02 | alt | lr])
            }
            Command::VcomDeselect(level) => ok_command!(buf, [SET_VCOM_DETECT, level]),
            Command::ChargePump(enable) => ok_command!(
                buf,
                [
                    CHARGE_PUMP,
                    if enable {
                        CHARGE_PUMP_ENABLE
                    } else {
                        CHARGE_PUMP_DISABLE
                    }
                ]
            ),
        }
    }
}
