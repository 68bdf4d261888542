//! LoRa modem configuration registers
//!
//! This module contains registers that define the modulation and packet
//! format:
//! - Bandwidth, coding rate and header mode
//! - Spreading factor and payload CRC
//! - Low data rate optimization and AGC
//! - Preamble length and sync word
//! - Spreading factor 6 detection settings
//!
//! Transmitter and receiver must agree on all of these for a link to work.

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

/// Modem configuration 1 register (address: 0x1D)
///
/// # Bit Layout
/// - Bits 7:4: Bw, index into the bandwidth table (0 = 7.8 kHz ... 9 = 500 kHz)
/// - Bits 3:1: CodingRate, 1..=4 for 4/5..=4/8
/// - Bit 0: ImplicitHeaderModeOn
#[register(0x1Du8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct ModemConfig1 {
    /// Bandwidth index, 4 bits
    pub bandwidth: u8,
    /// Coding rate code (denominator - 4), 3 bits
    pub coding_rate: u8,
    /// Implicit header mode enabled
    pub implicit_header: bool,
}

/// Modem configuration 2 register (address: 0x1E)
///
/// # Bit Layout
/// - Bits 7:4: SpreadingFactor (6..=12)
/// - Bit 3: TxContinuousMode
/// - Bit 2: RxPayloadCrcOn
/// - Bits 1:0: SymbTimeout(9:8)
#[register(0x1Eu8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct ModemConfig2 {
    /// Spreading factor, 4 bits
    pub spreading_factor: u8,
    /// Continuous transmit test mode
    pub tx_continuous: bool,
    /// Payload CRC generation and check
    pub crc_on: bool,
    /// Upper two bits of the RX symbol timeout
    pub symbol_timeout_msb: u8,
}

/// Modem configuration 3 register (address: 0x26)
///
/// # Bit Layout
/// - Bits 7:4: reserved
/// - Bit 3: LowDataRateOptimize, mandated when a symbol lasts more than 16 ms
/// - Bit 2: AgcAutoOn
/// - Bits 1:0: reserved
///
/// Reserved bits are carried through unchanged on read-modify-write.
#[register(0x26u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct ModemConfig3 {
    /// Low data rate optimization enabled
    pub low_data_rate_optimize: bool,
    /// LNA gain set by the internal AGC loop
    pub agc_auto: bool,
    /// Reserved bits as read from the chip
    pub reserved: u8,
}

impl ModemConfig3 {
    const LOW_DATA_RATE_OPTIMIZE: u8 = 0x08;
    const AGC_AUTO_ON: u8 = 0x04;
    const RESERVED_MASK: u8 = !(Self::LOW_DATA_RATE_OPTIMIZE | Self::AGC_AUTO_ON);
}

/// Preamble length registers (addresses: 0x20 - 0x21)
///
/// Preamble length in symbols, most significant byte first. The chip adds
/// 4.25 symbols to the programmed value.
#[register(0x20u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct PreambleLength {
    /// Preamble length in symbols
    pub symbols: u16,
}

/// Sync word register (address: 0x39)
///
/// `0x34` is reserved for LoRaWAN public networks, `0x12` is the private
/// network default.
#[register(0x39u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct SyncWord {
    /// Sync word value
    pub value: u8,
}

/// LoRa detection optimize register (address: 0x31)
///
/// Spreading factor 6 needs its own detection setting (datasheet 4.1.1.2).
#[register(0x31u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub enum DetectionOptimize {
    /// SF6
    Sf6,
    /// SF7 to SF12
    Sf7To12,
}

/// LoRa detection threshold register (address: 0x37)
///
/// Paired with [`DetectionOptimize`].
#[register(0x37u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub enum DetectionThreshold {
    /// SF6
    Sf6,
    /// SF7 to SF12
    Sf7To12,
}

impl DetectionOptimize {
    /// Setting matching a spreading factor
    pub fn for_spreading_factor(factor: u8) -> Self {
        if factor == 6 {
            Self::Sf6
        } else {
            Self::Sf7To12
        }
    }
}

impl DetectionThreshold {
    /// Setting matching a spreading factor
    pub fn for_spreading_factor(factor: u8) -> Self {
        if factor == 6 {
            Self::Sf6
        } else {
            Self::Sf7To12
        }
    }
}

impl FromByteArray for ModemConfig1 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            bandwidth: bytes[0] >> 4,
            coding_rate: (bytes[0] >> 1) & 0x07,
            implicit_header: bytes[0] & 0x01 != 0,
        })
    }
}

impl ToByteArray for ModemConfig1 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([((self.bandwidth & 0x0F) << 4)
            | ((self.coding_rate & 0x07) << 1)
            | self.implicit_header as u8])
    }
}

impl FromByteArray for ModemConfig2 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            spreading_factor: bytes[0] >> 4,
            tx_continuous: bytes[0] & 0x08 != 0,
            crc_on: bytes[0] & 0x04 != 0,
            symbol_timeout_msb: bytes[0] & 0x03,
        })
    }
}

impl ToByteArray for ModemConfig2 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([((self.spreading_factor & 0x0F) << 4)
            | if self.tx_continuous { 0x08 } else { 0x00 }
            | if self.crc_on { 0x04 } else { 0x00 }
            | (self.symbol_timeout_msb & 0x03)])
    }
}

impl FromByteArray for ModemConfig3 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            low_data_rate_optimize: bytes[0] & Self::LOW_DATA_RATE_OPTIMIZE != 0,
            agc_auto: bytes[0] & Self::AGC_AUTO_ON != 0,
            reserved: bytes[0] & Self::RESERVED_MASK,
        })
    }
}

impl ToByteArray for ModemConfig3 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        let mut value = self.reserved & Self::RESERVED_MASK;
        if self.low_data_rate_optimize {
            value |= Self::LOW_DATA_RATE_OPTIMIZE;
        }
        if self.agc_auto {
            value |= Self::AGC_AUTO_ON;
        }
        Ok([value])
    }
}

impl FromByteArray for PreambleLength {
    type Error = Infallible;
    type Array = [u8; 2];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            symbols: u16::from_be_bytes(bytes),
        })
    }
}

impl ToByteArray for PreambleLength {
    type Error = Infallible;
    type Array = [u8; 2];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok(self.symbols.to_be_bytes())
    }
}

impl FromByteArray for SyncWord {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes[0] })
    }
}

impl ToByteArray for SyncWord {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.value])
    }
}

/// Error type for detection register conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDetectionValue(pub u8);

impl FromByteArray for DetectionOptimize {
    type Error = InvalidDetectionValue;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        match bytes[0] {
            0xC5 => Ok(Self::Sf6),
            0xC3 => Ok(Self::Sf7To12),
            invalid => Err(InvalidDetectionValue(invalid)),
        }
    }
}

impl ToByteArray for DetectionOptimize {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([match self {
            Self::Sf6 => 0xC5,
            Self::Sf7To12 => 0xC3,
        }])
    }
}

impl FromByteArray for DetectionThreshold {
    type Error = InvalidDetectionValue;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        match bytes[0] {
            0x0C => Ok(Self::Sf6),
            0x0A => Ok(Self::Sf7To12),
            invalid => Err(InvalidDetectionValue(invalid)),
        }
    }
}

impl ToByteArray for DetectionThreshold {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([match self {
            Self::Sf6 => 0x0C,
            Self::Sf7To12 => 0x0A,
        }])
    }
}
