//! Packet handling related registers
//!
//! This module contains registers for moving payloads through the chip:
//! - FIFO data port and address pointers
//! - Interrupt flags
//! - Payload length and received byte count
//! - Header and packet counters
//!
//! The FIFO is a 256 byte RAM shared by transmit and receive. `RegFifo`
//! reads or writes the byte at `RegFifoAddrPtr` and then increments the
//! pointer, so payloads are streamed one register access per byte.

use core::convert::Infallible;

use bitflags::bitflags;
use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

/// Implements single byte conversions for a `{ value: u8 }` register
macro_rules! byte_register {
    ($($reg:ident),+ $(,)?) => {
        $(
            impl FromByteArray for $reg {
                type Error = Infallible;
                type Array = [u8; 1];

                fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
                    Ok(Self { value: bytes[0] })
                }
            }

            impl ToByteArray for $reg {
                type Error = Infallible;
                type Array = [u8; 1];

                fn to_bytes(self) -> Result<Self::Array, Self::Error> {
                    Ok([self.value])
                }
            }
        )+
    };
}

/// FIFO data port (address: 0x00)
///
/// Each access moves one byte at `RegFifoAddrPtr` and post-increments the
/// pointer. Not accessible in sleep mode.
#[register(0x00u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct Fifo {
    /// Data byte
    pub value: u8,
}

/// FIFO SPI pointer (address: 0x0D)
#[register(0x0Du8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct FifoAddrPtr {
    /// Address in FIFO RAM of the next `RegFifo` access
    pub value: u8,
}

/// FIFO transmit base address (address: 0x0E)
///
/// Reset value 0x80. The driver uses the whole FIFO for either direction
/// and sets this to 0.
#[register(0x0Eu8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct FifoTxBaseAddr {
    /// Start of the transmit payload in FIFO RAM
    pub value: u8,
}

/// FIFO receive base address (address: 0x0F)
#[register(0x0Fu8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct FifoRxBaseAddr {
    /// Start of the receive area in FIFO RAM
    pub value: u8,
}

/// Start address of the last packet received (address: 0x10)
#[register(0x10u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
pub struct FifoRxCurrentAddr {
    /// FIFO RAM address of the first payload byte
    pub value: u8,
}

bitflags! {
    /// Interrupt sources reported in `RegIrqFlags`
    ///
    /// Flags are cleared by writing 1 to their position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Irq: u8 {
        /// Receive timeout
        const RX_TIMEOUT = 1 << 7;
        /// Packet reception complete
        const RX_DONE = 1 << 6;
        /// Payload CRC check failed
        const PAYLOAD_CRC_ERROR = 1 << 5;
        /// Valid header received in RX mode
        const VALID_HEADER = 1 << 4;
        /// Payload transmission complete
        const TX_DONE = 1 << 3;
        /// Channel activity detection finished
        const CAD_DONE = 1 << 2;
        /// Frequency hopping channel change
        const FHSS_CHANGE_CHANNEL = 1 << 1;
        /// Channel activity detected
        const CAD_DETECTED = 1;
    }
}

/// Interrupt flags register (address: 0x12)
///
/// # Important Notes
/// - Writing a 1 to a bit clears the flag, writing the read value back
///   clears every flag that was set
#[register(0x12u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct IrqFlags {
    /// Pending interrupt sources
    pub flags: Irq,
}

impl IrqFlags {
    /// Whether a packet was received with a valid (or disabled) CRC
    pub fn packet_ready(&self) -> bool {
        self.flags.contains(Irq::RX_DONE) && !self.flags.contains(Irq::PAYLOAD_CRC_ERROR)
    }
}

/// Number of payload bytes of the last packet received (address: 0x13)
#[register(0x13u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
pub struct RxNbBytes {
    /// Payload length in bytes
    pub value: u8,
}

/// Valid header counter (addresses: 0x14 - 0x15)
///
/// Number of valid headers received since the last transition into RX.
#[register(0x14u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
pub struct RxHeaderCount {
    /// Header count, wraps at 0xFFFF
    pub count: u16,
}

/// Valid packet counter (addresses: 0x16 - 0x17)
///
/// Number of valid packets received since the last transition into RX.
#[register(0x16u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
pub struct RxPacketCount {
    /// Packet count, wraps at 0xFFFF
    pub count: u16,
}

/// Payload length register (address: 0x22)
///
/// # Important Notes
/// - In implicit header mode this must match the expected payload length
/// - Before transmission it holds the number of bytes to send
/// - A value of 0 is not permitted for transmission
#[register(0x22u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
pub struct PayloadLength {
    /// Payload length in bytes
    pub value: u8,
}

byte_register!(
    Fifo,
    FifoAddrPtr,
    FifoTxBaseAddr,
    FifoRxBaseAddr,
    FifoRxCurrentAddr,
    RxNbBytes,
    PayloadLength,
);

impl FromByteArray for IrqFlags {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            flags: Irq::from_bits_retain(bytes[0]),
        })
    }
}

impl ToByteArray for IrqFlags {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.flags.bits()])
    }
}

impl FromByteArray for RxHeaderCount {
    type Error = Infallible;
    type Array = [u8; 2];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            count: u16::from_be_bytes(bytes),
        })
    }
}

impl FromByteArray for RxPacketCount {
    type Error = Infallible;
    type Array = [u8; 2];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            count: u16::from_be_bytes(bytes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc_error_blocks_packet_ready() {
        let ok = IrqFlags {
            flags: Irq::RX_DONE | Irq::VALID_HEADER,
        };
        let bad = IrqFlags {
            flags: Irq::RX_DONE | Irq::PAYLOAD_CRC_ERROR,
        };
        assert!(ok.packet_ready());
        assert!(!bad.packet_ready());
    }
}
