//! Async driver surface
//!
//! Mirrors the blocking lifecycle and transmit path on top of
//! `embedded-hal-async`. Boot and reset stay blocking `OutputPin`s.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiDevice;

use super::{frequency_register, pa_config, Radio, RadioState, FIRMWARE_VERSION};
use crate::config::{low_data_rate_optimize, HeaderMode, MAX_PAYLOAD_LENGTH};
use crate::registers::{
    Fifo, FifoAddrPtr, FifoRxBaseAddr, FifoTxBaseAddr, Irq, IrqFlags, Lna, Mode, ModemConfig1,
    ModemConfig3, OpMode, PaOutput, PayloadLength, Version,
};
use crate::Error;

impl<SPI, BOOT, RESET, DELAY> Radio<SPI, BOOT, RESET, DELAY>
where
    SPI: SpiDevice,
    BOOT: OutputPin,
    RESET: OutputPin,
    DELAY: DelayNs,
{
    async fn ensure_ready_async(&mut self) -> Result<bool, Error> {
        if self.state == RadioState::Uninitialized {
            if let Err(err) = self.initialize_async().await {
                self.state = RadioState::Uninitialized;
                return Err(err);
            }
        }
        Ok(self.is_ready_state())
    }

    async fn initialize_async(&mut self) -> Result<(), Error> {
        info!("init");
        self.state = RadioState::Initializing;

        if self.boot.is_none() || self.reset.is_none() {
            warn!(
                "missing pins (BOOT {} RST {})",
                self.boot.is_some(),
                self.reset.is_some()
            );
            self.state = RadioState::InvalidConfiguration;
            return Ok(());
        }

        self.hardware_reset_async().await?;

        let version: Version = self.device.read_register_async().await?;
        self.version = Some(version.value);
        debug!("version {}, required {}", version.value, FIRMWARE_VERSION);

        if version.value != FIRMWARE_VERSION {
            warn!("firmware upgrade required");
            self.state = RadioState::FirmwareMismatch;
            return Ok(());
        }

        self.program_defaults_async().await?;

        self.state = RadioState::Ready;
        info!("ready");
        Ok(())
    }

    async fn hardware_reset_async(&mut self) -> Result<(), Error> {
        let (Some(boot), Some(reset)) = (self.boot.as_mut(), self.reset.as_mut()) else {
            return Ok(());
        };

        debug!("hw reset");
        boot.set_low().map_err(|_| Error::Pin)?;
        reset.set_high().map_err(|_| Error::Pin)?;
        self.delay.delay_ms(200).await;
        reset.set_low().map_err(|_| Error::Pin)?;
        self.delay.delay_ms(200).await;
        reset.set_high().map_err(|_| Error::Pin)?;
        self.delay.delay_ms(50).await;
        Ok(())
    }

    async fn program_defaults_async(&mut self) -> Result<(), Error> {
        self.device
            .write_register_async(OpMode::lora(Mode::Sleep))
            .await?;
        self.device
            .write_register_async(frequency_register(self.config.frequency))
            .await?;

        self.device
            .write_register_async(FifoTxBaseAddr { value: 0 })
            .await?;
        self.device
            .write_register_async(FifoRxBaseAddr { value: 0 })
            .await?;

        let mut lna: Lna = self.device.read_register_async().await?;
        lna.boost_hf = Lna::BOOST_HF_ON;
        self.device.write_register_async(lna).await?;

        self.device
            .write_register_async(ModemConfig3 {
                low_data_rate_optimize: low_data_rate_optimize(
                    self.config.spreading_factor,
                    self.config.bandwidth,
                ),
                agc_auto: true,
                reserved: 0,
            })
            .await?;

        let (pa, level) = pa_config(17, PaOutput::PaBoost);
        self.device.write_register_async(pa).await?;
        self.config.tx_power = level;
        self.config.pa_output = PaOutput::PaBoost;

        self.write_mode_async(Mode::Standby).await
    }

    async fn write_mode_async(&mut self, mode: Mode) -> Result<(), Error> {
        self.device.write_register_async(OpMode::lora(mode)).await?;
        Ok(())
    }

    async fn set_header_mode_async(&mut self, mode: HeaderMode) -> Result<(), Error> {
        let mut config1: ModemConfig1 = self.device.read_register_async().await?;
        config1.implicit_header = mode == HeaderMode::Implicit;
        self.device.write_register_async(config1).await?;
        self.config.header_mode = mode;
        Ok(())
    }

    /// Runs initialization if needed and reports whether the radio is ready.
    ///
    /// This is the async version of [`is_ready`](Radio::is_ready).
    pub async fn is_ready_async(&mut self) -> Result<bool, Error> {
        self.ensure_ready_async().await
    }

    /// This is the async version of [`firmware_version`](Radio::firmware_version).
    pub async fn firmware_version_async(&mut self) -> Result<Option<u8>, Error> {
        self.ensure_ready_async().await?;
        Ok(self.version)
    }

    /// This is the async version of [`idle`](Radio::idle).
    pub async fn idle_async(&mut self) -> Result<(), Error> {
        if !self.ensure_ready_async().await? {
            return Ok(());
        }
        debug!("idle");
        self.write_mode_async(Mode::Standby).await
    }

    /// Sends a packet and waits until it has left the antenna.
    ///
    /// This is the async version of [`send_buffer`](Radio::send_buffer).
    pub async fn send_buffer_async(&mut self, buffer: &[u8]) -> Result<(), Error> {
        if buffer.is_empty() || !self.ensure_ready_async().await? {
            return Ok(());
        }
        debug!("send");

        self.write_mode_async(Mode::Standby).await?;
        self.set_header_mode_async(self.config.header_mode).await?;
        self.device
            .write_register_async(FifoAddrPtr { value: 0 })
            .await?;

        let size = buffer.len().min(MAX_PAYLOAD_LENGTH);
        for byte in &buffer[..size] {
            self.device
                .write_register_async(Fifo { value: *byte })
                .await?;
        }
        self.device
            .write_register_async(PayloadLength { value: size as u8 })
            .await?;

        self.clear_tx_done_async().await?;
        self.write_mode_async(Mode::Tx).await?;

        let polling = self.config.tx_polling_for(size as u8);
        let attempts = polling.attempts();
        for attempt in 0..=attempts {
            let irq: IrqFlags = self.device.read_register_async().await?;
            if irq.flags.contains(Irq::TX_DONE) {
                return self.clear_tx_done_async().await;
            }
            if attempt == attempts {
                break;
            }
            self.delay.delay_ms(polling.interval_ms).await;
        }

        warn!("tx timeout after {} ms", polling.timeout_ms);
        self.write_mode_async(Mode::Standby).await?;
        self.clear_tx_done_async().await?;
        Err(Error::TxTimeout)
    }

    async fn clear_tx_done_async(&mut self) -> Result<(), Error> {
        self.device
            .write_register_async(IrqFlags {
                flags: Irq::TX_DONE,
            })
            .await?;
        Ok(())
    }

    /// This is the async version of [`send_text`](Radio::send_text).
    pub async fn send_text_async(&mut self, text: &str) -> Result<(), Error> {
        self.send_buffer_async(text.as_bytes()).await
    }
}
