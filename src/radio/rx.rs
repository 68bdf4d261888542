//! Packet reception
//!
//! Reception is polled. Each [`try_receive`](Radio::try_receive) call either
//! picks up a finished packet or makes sure the chip is listening, and never
//! waits. Payload bytes are then pulled from the FIFO one at a time.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use super::Radio;
use crate::config::HeaderMode;
use crate::registers::{
    Fifo, FifoAddrPtr, FifoRxCurrentAddr, IrqFlags, Mode, OpMode, PayloadLength, RxNbBytes,
};
use crate::Error;

/// Read position within the packet last received
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PacketCursor {
    position: usize,
    length: usize,
}

impl PacketCursor {
    fn start(length: usize) -> Self {
        Self {
            position: 0,
            length,
        }
    }

    fn remaining(&self) -> usize {
        self.length.saturating_sub(self.position)
    }

    fn advance(&mut self) {
        self.position += 1;
    }
}

impl<SPI, BOOT, RESET, DELAY> Radio<SPI, BOOT, RESET, DELAY> {
    /// Payload bytes of the current packet not read yet.
    pub fn available(&self) -> usize {
        if !self.is_ready_state() {
            return 0;
        }
        self.cursor.remaining()
    }
}

impl<SPI, BOOT, RESET, DELAY> Radio<SPI, BOOT, RESET, DELAY>
where
    SPI: SpiDevice,
    BOOT: OutputPin,
    RESET: OutputPin,
    DELAY: DelayNs,
{
    /// Checks for a received packet.
    ///
    /// `expected_size > 0` selects implicit header mode with that payload
    /// length, `0` selects explicit header mode. Returns the payload length
    /// of a packet that is ready to be read, or 0. When nothing arrived the
    /// chip is switched into single receive unless it is already receiving.
    pub fn try_receive(&mut self, expected_size: u8) -> Result<usize, Error> {
        if !self.ensure_ready()? {
            return Ok(0);
        }

        let irq: IrqFlags = self.device.read_register()?;

        if expected_size > 0 {
            self.set_header_mode(HeaderMode::Implicit)?;
            self.device.write_register(PayloadLength {
                value: expected_size,
            })?;
        } else {
            self.set_header_mode(HeaderMode::Explicit)?;
        }

        // clear every flag that was set
        self.device.write_register(irq)?;

        if irq.packet_ready() {
            let length = match self.config.header_mode {
                HeaderMode::Implicit => self.device.read_register::<PayloadLength>()?.value,
                HeaderMode::Explicit => self.device.read_register::<RxNbBytes>()?.value,
            } as usize;
            self.cursor = PacketCursor::start(length);

            let current: FifoRxCurrentAddr = self.device.read_register()?;
            self.device.write_register(FifoAddrPtr {
                value: current.value,
            })?;

            self.write_mode(Mode::Standby)?;
            return Ok(length);
        }

        let op_mode: OpMode = self.device.read_register()?;
        if !(op_mode.long_range && op_mode.mode.is_receiving()) {
            self.cursor = PacketCursor::default();
            self.device.write_register(FifoAddrPtr { value: 0 })?;
            self.write_mode(Mode::RxSingle)?;
        }

        Ok(0)
    }

    /// Reads the next payload byte, `None` once the packet is exhausted.
    pub fn read_byte(&mut self) -> Result<Option<u8>, Error> {
        if self.available() == 0 {
            return Ok(None);
        }
        let fifo: Fifo = self.device.read_register()?;
        self.cursor.advance();
        Ok(Some(fifo.value))
    }

    /// Returns the next payload byte without consuming it.
    pub fn peek_byte(&mut self) -> Result<Option<u8>, Error> {
        if self.available() == 0 {
            return Ok(None);
        }
        let address: FifoAddrPtr = self.device.read_register()?;
        let fifo: Fifo = self.device.read_register()?;
        self.device.write_register(address)?;
        Ok(Some(fifo.value))
    }

    /// Receives a packet in explicit header mode into `buffer`.
    ///
    /// Returns the number of bytes copied, at most `buffer.len()`. Bytes that
    /// do not fit stay available to [`read_byte`](Radio::read_byte).
    pub fn read_buffer(&mut self, buffer: &mut [u8]) -> Result<usize, Error> {
        if self.try_receive(0)? == 0 {
            return Ok(0);
        }

        let mut count = 0;
        for slot in buffer.iter_mut() {
            match self.read_byte()? {
                Some(byte) => *slot = byte,
                None => break,
            }
            count += 1;
        }
        Ok(count)
    }

    /// Receives a packet into `buffer` and returns it as text.
    ///
    /// `None` when nothing was received or the bytes are not valid UTF-8.
    pub fn read_text<'b>(&mut self, buffer: &'b mut [u8]) -> Result<Option<&'b str>, Error> {
        let count = self.read_buffer(buffer)?;
        if count == 0 {
            return Ok(None);
        }
        let buffer: &'b [u8] = buffer;
        Ok(core::str::from_utf8(&buffer[..count]).ok())
    }
}
