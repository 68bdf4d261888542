//! Link quality of the last packet and register inspection

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use super::Radio;
use crate::config::{Bandwidth, CRYSTAL_HZ, LOW_BAND_LIMIT_HZ};
use crate::registers::{
    Address, FrequencyError, ModemConfig1, PacketRssi, PacketSnr, RxHeaderCount, RxPacketCount,
};
use crate::Error;

/// RSSI offset on the high frequency port
const RSSI_OFFSET_HF: i16 = 157;
/// RSSI offset on the low frequency port
const RSSI_OFFSET_LF: i16 = 164;

/// Snapshot of every named register except the FIFO data port
///
/// Reading `RegFifo` would advance the FIFO pointer, so it is left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterDump {
    entries: [(Address, u8); Address::COUNT],
    len: usize,
}

impl RegisterDump {
    fn empty() -> Self {
        Self {
            entries: [(Address::Fifo, 0); Address::COUNT],
            len: 0,
        }
    }

    fn push(&mut self, address: Address, value: u8) {
        self.entries[self.len] = (address, value);
        self.len += 1;
    }

    /// Register and value pairs in ascending address order
    pub fn iter(&self) -> impl Iterator<Item = &(Address, u8)> {
        self.entries[..self.len].iter()
    }

    /// Number of registers captured
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing was captured, as for a radio that is not ready
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Value captured for `address`, if it is part of the dump
    pub fn get(&self, address: Address) -> Option<u8> {
        self.iter()
            .find(|(entry, _)| *entry == address)
            .map(|(_, value)| *value)
    }
}

impl<SPI, BOOT, RESET, DELAY> Radio<SPI, BOOT, RESET, DELAY>
where
    SPI: SpiDevice,
    BOOT: OutputPin,
    RESET: OutputPin,
    DELAY: DelayNs,
{
    /// RSSI of the last packet in dBm.
    ///
    /// The calibration offset depends on the frequency port, selected by the
    /// configured carrier.
    pub fn signal_strength_dbm(&mut self) -> Result<Option<i16>, Error> {
        if !self.ensure_ready()? {
            return Ok(None);
        }
        let rssi: PacketRssi = self.device.read_register()?;
        let offset = if self.config.frequency < LOW_BAND_LIMIT_HZ {
            RSSI_OFFSET_LF
        } else {
            RSSI_OFFSET_HF
        };
        Ok(Some(rssi.value as i16 - offset))
    }

    /// SNR of the last packet in dB.
    pub fn signal_to_noise_db(&mut self) -> Result<Option<f32>, Error> {
        if !self.ensure_ready()? {
            return Ok(None);
        }
        let snr: PacketSnr = self.device.read_register()?;
        Ok(Some(snr.quarter_db as f32 * 0.25))
    }

    /// Estimated carrier offset of the last packet in Hz.
    ///
    /// Scaled by the bandwidth currently programmed in `RegModemConfig1`.
    pub fn frequency_error_hz(&mut self) -> Result<Option<i32>, Error> {
        if !self.ensure_ready()? {
            return Ok(None);
        }
        let error: FrequencyError = self.device.read_register()?;
        let config1: ModemConfig1 = self.device.read_register()?;
        let Some(bandwidth) = Bandwidth::from_index(config1.bandwidth) else {
            return Ok(None);
        };

        let scaled = error.value as i64 * (1 << 24) * bandwidth.hz() as i64
            / (CRYSTAL_HZ as i64 * 500_000);
        Ok(Some(scaled as i32))
    }

    /// Valid headers received since the chip last entered receive mode.
    pub fn valid_header_count(&mut self) -> Result<Option<u16>, Error> {
        if !self.ensure_ready()? {
            return Ok(None);
        }
        let count: RxHeaderCount = self.device.read_register()?;
        Ok(Some(count.count))
    }

    /// Valid packets received since the chip last entered receive mode.
    pub fn valid_packet_count(&mut self) -> Result<Option<u16>, Error> {
        if !self.ensure_ready()? {
            return Ok(None);
        }
        let count: RxPacketCount = self.device.read_register()?;
        Ok(Some(count.count))
    }

    /// Reads every named register and logs it.
    ///
    /// Returns an empty dump when the radio is not ready.
    pub fn dump_registers(&mut self) -> Result<RegisterDump, Error> {
        let mut dump = RegisterDump::empty();
        if !self.ensure_ready()? {
            info!("dump skipped, state {}", self.state);
            return Ok(dump);
        }

        for address in Address::ALL {
            if address == Address::Fifo {
                continue;
            }
            let value = self.device.read_address(address.addr())?;
            debug!("{} {:#x} = {:#x}", address.name(), address.addr(), value);
            dump.push(address, value);
        }
        info!("dump done, state {}", self.state);
        Ok(dump)
    }
}
