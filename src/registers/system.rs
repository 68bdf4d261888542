//! System-related registers
//!
//! This module contains registers for device-level control:
//! - Operating mode and modem family selection
//! - Silicon version identification
//!
//! `RegOpMode` is the heart of the chip's state machine. Every transition
//! between sleep, standby, transmit and receive goes through it.

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

/// Transceiver mode, bits 2:0 of `RegOpMode`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Lowest power. FIFO is not accessible and only sleep/standby
    /// transitions are allowed. Required to switch LoRa mode on or off.
    Sleep = 0x0,
    /// Crystal oscillator running, ready for configuration
    Standby = 0x1,
    /// Frequency synthesis for transmit
    FsTx = 0x2,
    /// Transmit the FIFO content, returns to standby when done
    Tx = 0x3,
    /// Frequency synthesis for receive
    FsRx = 0x4,
    /// Receive until told otherwise
    RxContinuous = 0x5,
    /// Receive one packet, returns to standby when done or on timeout
    RxSingle = 0x6,
    /// Channel activity detection
    Cad = 0x7,
}

impl Mode {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0x0 => Self::Sleep,
            0x1 => Self::Standby,
            0x2 => Self::FsTx,
            0x3 => Self::Tx,
            0x4 => Self::FsRx,
            0x5 => Self::RxContinuous,
            0x6 => Self::RxSingle,
            _ => Self::Cad,
        }
    }

    /// Whether the chip is listening for a packet
    pub fn is_receiving(self) -> bool {
        matches!(self, Self::RxContinuous | Self::RxSingle)
    }
}

/// Operating mode register (address: 0x01)
///
/// # Bit Layout
/// - Bit 7: LongRangeMode (0 = FSK/OOK, 1 = LoRa)
/// - Bit 6: AccessSharedReg
/// - Bits 5:4: reserved
/// - Bit 3: LowFrequencyModeOn (access to LF test registers)
/// - Bits 2:0: Mode
///
/// # Important Notes
/// - LongRangeMode can only be changed while in sleep
/// - The driver always keeps LongRangeMode set
#[register(0x01u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct OpMode {
    /// LoRa modem selected
    pub long_range: bool,
    /// Low frequency register page selected
    pub low_frequency: bool,
    /// Transceiver mode
    pub mode: Mode,
}

impl OpMode {
    /// LoRa modem in the given transceiver mode
    pub fn lora(mode: Mode) -> Self {
        Self {
            long_range: true,
            low_frequency: false,
            mode,
        }
    }
}

/// Version register (address: 0x42)
///
/// Holds the silicon revision. Full revision in bits 7:4, metal mask revision
/// in bits 3:0. The SX1276/7/8/9 family reports `0x12`.
#[register(0x42u8)]
#[derive(Debug, Clone, Copy, ReadableRegister)]
pub struct Version {
    /// Raw version byte
    pub value: u8,
}

impl FromByteArray for OpMode {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            long_range: bytes[0] & 0x80 != 0,
            low_frequency: bytes[0] & 0x08 != 0,
            mode: Mode::from_bits(bytes[0]),
        })
    }
}

impl ToByteArray for OpMode {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        let mut value = self.mode as u8;
        if self.long_range {
            value |= 0x80;
        }
        if self.low_frequency {
            value |= 0x08;
        }
        Ok([value])
    }
}

impl FromByteArray for Version {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes[0] })
    }
}
