//! RF-related registers
//!
//! This module contains registers related to the RF front end:
//! - Carrier frequency synthesizer
//! - Power amplifier selection and output level
//! - Low noise amplifier gain and boost

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

/// Carrier frequency registers (addresses: 0x06 - 0x08)
///
/// 24-bit synthesizer word, most significant byte first.
///
/// # Frequency Calculation
/// F_rf = F_xosc * frf / 2^19, with F_xosc = 32 MHz (step ~61.035 Hz)
///
/// # Important Notes
/// - The new frequency takes effect when the LSB is written
/// - Should be written in sleep or standby
#[register(0x06u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct FrequencyRf {
    /// Synthesizer word, 24 bits used
    pub frf: u32,
}

/// Power amplifier output pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PaOutput {
    /// RFO pin, up to +14 dBm
    Rfo,
    /// PA_BOOST pin, up to +17 dBm (+20 dBm with PaDac)
    PaBoost,
}

/// PA configuration register (address: 0x09)
///
/// # Bit Layout
/// - Bit 7: PaSelect (0 = RFO, 1 = PA_BOOST)
/// - Bits 6:4: MaxPower, Pmax = 10.8 + 0.6 * MaxPower dBm
/// - Bits 3:0: OutputPower
///
/// # Output Power
/// - RFO: Pout = Pmax - (15 - OutputPower)
/// - PA_BOOST: Pout = 17 - (15 - OutputPower)
#[register(0x09u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct PaConfig {
    /// Selected output pin
    pub output: PaOutput,
    /// Maximum power selector, 3 bits
    pub max_power: u8,
    /// Output power level, 4 bits
    pub output_power: u8,
}

/// LNA settings register (address: 0x0C)
///
/// # Bit Layout
/// - Bits 7:5: LnaGain (1 = G1 highest gain ... 6 = G6 lowest gain)
/// - Bits 4:3: LnaBoostLf (must stay 00)
/// - Bit 2: reserved
/// - Bits 1:0: LnaBoostHf (11 = 150% LNA current)
#[register(0x0Cu8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct Lna {
    /// Gain selector, 3 bits
    pub gain: u8,
    /// Low-frequency band boost, 2 bits
    pub boost_lf: u8,
    /// High-frequency band boost, 2 bits
    pub boost_hf: u8,
    /// Reserved bit 2, written back as read
    pub reserved: u8,
}

impl Lna {
    /// `LnaBoostHf` value selecting 150% LNA current
    pub const BOOST_HF_ON: u8 = 0b11;

    const RESERVED_MASK: u8 = 0x04;
}

impl FromByteArray for FrequencyRf {
    type Error = Infallible;
    type Array = [u8; 3];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            frf: u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]),
        })
    }
}

impl ToByteArray for FrequencyRf {
    type Error = Infallible;
    type Array = [u8; 3];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        let [_, msb, mid, lsb] = self.frf.to_be_bytes();
        Ok([msb, mid, lsb])
    }
}

impl FromByteArray for PaConfig {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            output: if bytes[0] & 0x80 != 0 {
                PaOutput::PaBoost
            } else {
                PaOutput::Rfo
            },
            max_power: (bytes[0] >> 4) & 0x07,
            output_power: bytes[0] & 0x0F,
        })
    }
}

impl ToByteArray for PaConfig {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        let select = match self.output {
            PaOutput::Rfo => 0x00,
            PaOutput::PaBoost => 0x80,
        };
        Ok([select | ((self.max_power & 0x07) << 4) | (self.output_power & 0x0F)])
    }
}

impl FromByteArray for Lna {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            gain: (bytes[0] >> 5) & 0x07,
            boost_lf: (bytes[0] >> 3) & 0x03,
            boost_hf: bytes[0] & 0x03,
            reserved: bytes[0] & Self::RESERVED_MASK,
        })
    }
}

impl ToByteArray for Lna {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([((self.gain & 0x07) << 5)
            | ((self.boost_lf & 0x03) << 3)
            | (self.reserved & Self::RESERVED_MASK)
            | (self.boost_hf & 0x03)])
    }
}
