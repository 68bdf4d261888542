//! Packet transmission
//!
//! A send is three steps: [`begin_packet`](Radio::begin_packet) resets the
//! FIFO, [`write`](Radio::write) appends payload bytes and
//! [`end_packet`](Radio::end_packet) starts the transmission and polls
//! `RegIrqFlags` until TX_DONE or the [`TxPolling`](crate::TxPolling) budget
//! runs out. TX_DONE is cleared before every transmission and after a
//! timeout.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use super::Radio;
use crate::config::MAX_PAYLOAD_LENGTH;
use crate::registers::{Fifo, FifoAddrPtr, Irq, IrqFlags, Mode, PayloadLength};
use crate::Error;

/// Interrupt flag reads between two "still waiting" log lines
const WAIT_LOG_INTERVAL: u32 = 100;

impl<SPI, BOOT, RESET, DELAY> Radio<SPI, BOOT, RESET, DELAY>
where
    SPI: SpiDevice,
    BOOT: OutputPin,
    RESET: OutputPin,
    DELAY: DelayNs,
{
    /// Sends a packet and blocks until it has left the antenna.
    ///
    /// Payloads longer than 255 bytes are truncated. An empty buffer is
    /// ignored.
    ///
    /// # Errors
    /// * `Error::TxTimeout` - TX_DONE was not raised within the polling budget
    pub fn send_buffer(&mut self, buffer: &[u8]) -> Result<(), Error> {
        if buffer.is_empty() || !self.ensure_ready()? {
            return Ok(());
        }
        debug!("send");
        self.begin_packet()?;
        self.write(buffer)?;
        self.end_packet()
    }

    /// Sends the UTF-8 bytes of `text` as one packet.
    pub fn send_text(&mut self, text: &str) -> Result<(), Error> {
        self.send_buffer(text.as_bytes())
    }

    /// Prepares an empty packet.
    ///
    /// Enters standby, applies the header mode selected by the last
    /// [`try_receive`](Radio::try_receive) and resets the FIFO pointer and
    /// payload length.
    pub fn begin_packet(&mut self) -> Result<(), Error> {
        if !self.ensure_ready()? {
            return Ok(());
        }
        debug!("begin packet");
        self.write_mode(Mode::Standby)?;
        self.set_header_mode(self.config.header_mode)?;

        self.device.write_register(FifoAddrPtr { value: 0 })?;
        self.device.write_register(PayloadLength { value: 0 })?;
        Ok(())
    }

    /// Appends bytes to the packet being built.
    ///
    /// Returns how many bytes were accepted; the payload never grows beyond
    /// 255 bytes.
    pub fn write(&mut self, buffer: &[u8]) -> Result<usize, Error> {
        if !self.ensure_ready()? {
            return Ok(0);
        }
        let current: PayloadLength = self.device.read_register()?;
        let current = current.value as usize;
        let size = buffer.len().min(MAX_PAYLOAD_LENGTH - current);

        if size < buffer.len() {
            debug!("write raw {} -> {} bytes", buffer.len(), size);
        }

        for byte in &buffer[..size] {
            self.device.write_register(Fifo { value: *byte })?;
        }

        self.device.write_register(PayloadLength {
            value: (current + size) as u8,
        })?;
        Ok(size)
    }

    /// Transmits the packet and waits for TX_DONE.
    ///
    /// The wait is the budget set with
    /// [`set_tx_polling`](Radio::set_tx_polling), or twice the packet airtime
    /// plus one second.
    ///
    /// # Errors
    /// * `Error::TxTimeout` - the flag did not rise in time; the chip is put
    ///   back into standby
    pub fn end_packet(&mut self) -> Result<(), Error> {
        if !self.ensure_ready()? {
            return Ok(());
        }
        debug!("end packet");
        let length: PayloadLength = self.device.read_register()?;
        let polling = self.config.tx_polling_for(length.value);

        // a flag left over from an earlier packet must not end this wait
        self.clear_tx_done()?;
        self.write_mode(Mode::Tx)?;

        let attempts = polling.attempts();
        for attempt in 0..=attempts {
            let irq: IrqFlags = self.device.read_register()?;
            if irq.flags.contains(Irq::TX_DONE) {
                return self.clear_tx_done();
            }
            if attempt == attempts {
                break;
            }
            if attempt % WAIT_LOG_INTERVAL == 0 {
                trace!("wait tx");
            }
            self.delay.delay_ms(polling.interval_ms);
        }

        warn!("tx timeout after {} ms", polling.timeout_ms);
        self.write_mode(Mode::Standby)?;
        self.clear_tx_done()?;
        Err(Error::TxTimeout)
    }

    fn clear_tx_done(&mut self) -> Result<(), Error> {
        self.device.write_register(IrqFlags {
            flags: Irq::TX_DONE,
        })?;
        Ok(())
    }
}
