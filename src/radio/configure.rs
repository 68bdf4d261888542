//! Physical layer configuration
//!
//! Setters clamp their input, write the affected register fields with
//! read-modify-write so neighbouring fields survive, and update the cached
//! [`Configuration`](crate::Configuration).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use super::{frequency_register, pa_config, Radio};
use crate::config::{
    clamp_coding_rate, clamp_frequency, clamp_spreading_factor, low_data_rate_optimize, Bandwidth,
    HeaderMode, TxPolling,
};
use crate::registers::{
    DetectionOptimize, DetectionThreshold, ModemConfig1, ModemConfig2, ModemConfig3, PaOutput,
    PreambleLength, SyncWord,
};
use crate::Error;

impl<SPI, BOOT, RESET, DELAY> Radio<SPI, BOOT, RESET, DELAY>
where
    SPI: SpiDevice,
    BOOT: OutputPin,
    RESET: OutputPin,
    DELAY: DelayNs,
{
    /// Sets the carrier frequency in Hz, clamped to 137..=1020 MHz.
    pub fn set_frequency(&mut self, hz: u32) -> Result<(), Error> {
        if !self.ensure_ready()? {
            return Ok(());
        }
        let hz = clamp_frequency(hz);
        debug!("frequency {}", hz);
        self.device.write_register(frequency_register(hz))?;
        self.config.frequency = hz;
        Ok(())
    }

    /// Sets the transmit power in dBm.
    ///
    /// The level is clamped to 2..=17 dBm on PA_BOOST and 0..=14 dBm on RFO.
    pub fn set_tx_power(&mut self, dbm: i8, output: PaOutput) -> Result<(), Error> {
        if !self.ensure_ready()? {
            return Ok(());
        }
        let (pa, level) = pa_config(dbm, output);
        self.device.write_register(pa)?;
        self.config.tx_power = level;
        self.config.pa_output = output;
        Ok(())
    }

    /// Sets the spreading factor, clamped to 6..=12.
    pub fn set_spreading_factor(&mut self, factor: u8) -> Result<(), Error> {
        if !self.ensure_ready()? {
            return Ok(());
        }
        let factor = clamp_spreading_factor(factor);

        self.device
            .write_register(DetectionOptimize::for_spreading_factor(factor))?;
        self.device
            .write_register(DetectionThreshold::for_spreading_factor(factor))?;

        let mut config2: ModemConfig2 = self.device.read_register()?;
        config2.spreading_factor = factor;
        self.device.write_register(config2)?;

        self.config.spreading_factor = factor;
        self.update_low_data_rate_optimize()
    }

    /// Spreading factor as currently programmed in the chip.
    pub fn spreading_factor(&mut self) -> Result<Option<u8>, Error> {
        if !self.ensure_ready()? {
            return Ok(None);
        }
        let config2: ModemConfig2 = self.device.read_register()?;
        Ok(Some(config2.spreading_factor))
    }

    /// Sets the signal bandwidth to the smallest supported value of at least
    /// `hz`, or 500 kHz above that.
    pub fn set_bandwidth(&mut self, hz: u32) -> Result<(), Error> {
        if !self.ensure_ready()? {
            return Ok(());
        }
        let bandwidth = Bandwidth::from_hz(hz);

        let mut config1: ModemConfig1 = self.device.read_register()?;
        config1.bandwidth = bandwidth.index();
        self.device.write_register(config1)?;

        self.config.bandwidth = bandwidth;
        self.update_low_data_rate_optimize()
    }

    /// Signal bandwidth in Hz as currently programmed in the chip.
    ///
    /// `None` when not ready or the register holds an unknown code.
    pub fn bandwidth(&mut self) -> Result<Option<u32>, Error> {
        if !self.ensure_ready()? {
            return Ok(None);
        }
        let config1: ModemConfig1 = self.device.read_register()?;
        Ok(Bandwidth::from_index(config1.bandwidth).map(Bandwidth::hz))
    }

    /// Sets the coding rate to 4/`denominator`, clamped to 4/5..=4/8.
    pub fn set_coding_rate(&mut self, denominator: u8) -> Result<(), Error> {
        if !self.ensure_ready()? {
            return Ok(());
        }
        let denominator = clamp_coding_rate(denominator);

        let mut config1: ModemConfig1 = self.device.read_register()?;
        config1.coding_rate = denominator - 4;
        self.device.write_register(config1)?;

        self.config.coding_rate = denominator;
        Ok(())
    }

    /// Sets the preamble length in symbols.
    pub fn set_preamble_length(&mut self, symbols: u16) -> Result<(), Error> {
        if !self.ensure_ready()? {
            return Ok(());
        }
        self.device.write_register(PreambleLength { symbols })?;
        self.config.preamble_length = symbols;
        Ok(())
    }

    /// Sets the sync word.
    pub fn set_sync_word(&mut self, value: u8) -> Result<(), Error> {
        if !self.ensure_ready()? {
            return Ok(());
        }
        self.device.write_register(SyncWord { value })?;
        self.config.sync_word = value;
        Ok(())
    }

    /// Enables or disables payload CRC generation and checking.
    pub fn set_crc_enabled(&mut self, enabled: bool) -> Result<(), Error> {
        if !self.ensure_ready()? {
            return Ok(());
        }
        let mut config2: ModemConfig2 = self.device.read_register()?;
        config2.crc_on = enabled;
        self.device.write_register(config2)?;
        self.config.crc = enabled;
        Ok(())
    }

    pub(crate) fn set_header_mode(&mut self, mode: HeaderMode) -> Result<(), Error> {
        let mut config1: ModemConfig1 = self.device.read_register()?;
        config1.implicit_header = mode == HeaderMode::Implicit;
        self.device.write_register(config1)?;
        self.config.header_mode = mode;
        Ok(())
    }

    fn update_low_data_rate_optimize(&mut self) -> Result<(), Error> {
        let enabled =
            low_data_rate_optimize(self.config.spreading_factor, self.config.bandwidth);

        let mut config3: ModemConfig3 = self.device.read_register()?;
        config3.low_data_rate_optimize = enabled;
        self.device.write_register(config3)?;
        Ok(())
    }
}

impl<SPI, BOOT, RESET, DELAY> Radio<SPI, BOOT, RESET, DELAY> {
    /// Sets how long and how often transmit completion is polled.
    ///
    /// This replaces the wait derived from the airtime of each packet.
    pub fn set_tx_polling(&mut self, polling: TxPolling) {
        self.config.tx_polling = Some(polling);
    }
}
