//! Initialization sequence and operating mode control

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use super::{frequency_register, pa_config, Radio, RadioState, FIRMWARE_VERSION};
use crate::config::low_data_rate_optimize;
use crate::registers::{
    FifoRxBaseAddr, FifoTxBaseAddr, Lna, Mode, ModemConfig3, OpMode, PaOutput, Version,
};
use crate::Error;

impl<SPI, BOOT, RESET, DELAY> Radio<SPI, BOOT, RESET, DELAY>
where
    SPI: SpiDevice,
    BOOT: OutputPin,
    RESET: OutputPin,
    DELAY: DelayNs,
{
    /// Runs the initialization sequence if it has not run yet.
    ///
    /// Returns whether the radio is ready. A bus or pin failure midway
    /// returns the driver to [`RadioState::Uninitialized`] so the next call
    /// starts over.
    pub(crate) fn ensure_ready(&mut self) -> Result<bool, Error> {
        if self.state == RadioState::Uninitialized {
            if let Err(err) = self.initialize() {
                self.state = RadioState::Uninitialized;
                return Err(err);
            }
        }
        Ok(self.is_ready_state())
    }

    fn initialize(&mut self) -> Result<(), Error> {
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

        self.hardware_reset()?;

        let version: Version = self.device.read_register()?;
        self.version = Some(version.value);
        debug!("version {}, required {}", version.value, FIRMWARE_VERSION);

        if version.value != FIRMWARE_VERSION {
            warn!("firmware upgrade required");
            self.state = RadioState::FirmwareMismatch;
            return Ok(());
        }

        self.program_defaults()?;

        self.state = RadioState::Ready;
        info!("ready");
        Ok(())
    }

    /// Boot low, then reset high 200 ms, low 200 ms, high 50 ms
    fn hardware_reset(&mut self) -> Result<(), Error> {
        let (Some(boot), Some(reset)) = (self.boot.as_mut(), self.reset.as_mut()) else {
            return Ok(());
        };

        debug!("hw reset");
        boot.set_low().map_err(|_| Error::Pin)?;
        reset.set_high().map_err(|_| Error::Pin)?;
        self.delay.delay_ms(200);
        reset.set_low().map_err(|_| Error::Pin)?;
        self.delay.delay_ms(200);
        reset.set_high().map_err(|_| Error::Pin)?;
        self.delay.delay_ms(50);
        Ok(())
    }

    /// Baseline register programming after a successful version check.
    ///
    /// Settings not written here keep their reset values, which match
    /// [`Configuration::default`](crate::Configuration).
    fn program_defaults(&mut self) -> Result<(), Error> {
        // LoRa mode can only be selected from sleep
        self.device.write_register(OpMode::lora(Mode::Sleep))?;

        self.device
            .write_register(frequency_register(self.config.frequency))?;

        self.device.write_register(FifoTxBaseAddr { value: 0 })?;
        self.device.write_register(FifoRxBaseAddr { value: 0 })?;

        let mut lna: Lna = self.device.read_register()?;
        lna.boost_hf = Lna::BOOST_HF_ON;
        self.device.write_register(lna)?;

        self.device.write_register(ModemConfig3 {
            low_data_rate_optimize: low_data_rate_optimize(
                self.config.spreading_factor,
                self.config.bandwidth,
            ),
            agc_auto: true,
            reserved: 0,
        })?;

        let (pa, level) = pa_config(17, PaOutput::PaBoost);
        self.device.write_register(pa)?;
        self.config.tx_power = level;
        self.config.pa_output = PaOutput::PaBoost;

        self.write_mode(Mode::Standby)
    }

    pub(crate) fn write_mode(&mut self, mode: Mode) -> Result<(), Error> {
        self.device.write_register(OpMode::lora(mode))?;
        Ok(())
    }

    /// Runs initialization if needed and reports whether the radio is ready.
    pub fn is_ready(&mut self) -> Result<bool, Error> {
        self.ensure_ready()
    }

    /// Version byte read during initialization.
    ///
    /// `None` when the chip could not be reached because control lines are
    /// missing.
    pub fn firmware_version(&mut self) -> Result<Option<u8>, Error> {
        self.ensure_ready()?;
        Ok(self.version)
    }

    /// Puts the chip in standby.
    pub fn idle(&mut self) -> Result<(), Error> {
        if !self.ensure_ready()? {
            return Ok(());
        }
        debug!("idle");
        self.write_mode(Mode::Standby)
    }

    /// Puts the chip in sleep, its lowest power mode.
    pub fn sleep(&mut self) -> Result<(), Error> {
        if !self.ensure_ready()? {
            return Ok(());
        }
        debug!("sleep");
        self.write_mode(Mode::Sleep)
    }
}
