//! Packet status registers
//!
//! Read-only registers latched by the modem for the last packet received:
//! - Signal to noise ratio
//! - Received signal strength
//! - Frequency error estimate
//!
//! Values are raw. Conversion to physical units depends on the configured
//! carrier and bandwidth and is done by the radio driver.

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister};

/// Packet SNR register (address: 0x19)
///
/// Signed two's complement, in steps of 0.25 dB.
#[register(0x19u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
pub struct PacketSnr {
    /// SNR in quarter dB
    pub quarter_db: i8,
}

/// Packet RSSI register (address: 0x1A)
///
/// # RSSI Calculation
/// RSSI (dBm) = value - 157 on the high frequency port (>= 862 MHz)
/// RSSI (dBm) = value - 164 on the low frequency port
#[register(0x1Au8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
pub struct PacketRssi {
    /// Uncalibrated RSSI value
    pub value: u8,
}

/// Frequency error indication registers (addresses: 0x28 - 0x2A)
///
/// 20-bit two's complement estimate of the carrier offset of the last packet.
/// The MSB register holds bits 19:16 in its low nibble, bit 19 being the
/// sign.
///
/// # Frequency Error Calculation
/// F_err = value * 2^24 / F_xtal * BW / 500 kHz
#[register(0x28u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
pub struct FrequencyError {
    /// Sign-extended raw estimate
    pub value: i32,
}

impl FromByteArray for PacketSnr {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            quarter_db: bytes[0] as i8,
        })
    }
}

impl FromByteArray for PacketRssi {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes[0] })
    }
}

impl FromByteArray for FrequencyError {
    type Error = Infallible;
    type Array = [u8; 3];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        let raw = u32::from_be_bytes([0, bytes[0] & 0x0F, bytes[1], bytes[2]]);
        // shift the 20-bit sign into bit 31 and back to extend it
        Ok(Self {
            value: ((raw << 12) as i32) >> 12,
        })
    }
}
