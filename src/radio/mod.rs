//! SX127x LoRa Radio Driver
//!
//! [`Radio`] owns the chip interface and everything the driver remembers about
//! it: lifecycle state, cached configuration and the receive cursor. One
//! instance drives one physical device and callers serialize access through
//! `&mut self`.
//!
//! # Lifecycle
//! ```text
//! Uninitialized -> Initializing -> Ready
//!                               -> FirmwareMismatch
//!                               -> InvalidConfiguration
//! ```
//! The first operation that needs the chip runs the initialization sequence.
//! `FirmwareMismatch` and `InvalidConfiguration` are sticky until
//! [`Radio::supply_transport`] hands in a new transport.
//!
//! While not [`RadioState::Ready`] every operation skips bus access and
//! returns a neutral value (`0`, `None` or nothing).

mod asynch;
mod configure;
mod diagnostics;
mod lifecycle;
mod rx;
mod tx;

#[cfg(test)]
mod test;

pub use diagnostics::RegisterDump;

use crate::config::{clamp_tx_power, frequency_to_frf, Configuration};
use crate::device::Device;
use crate::registers::{FrequencyRf, PaConfig, PaOutput};

use rx::PacketCursor;

/// Version byte reported by a supported chip
pub const FIRMWARE_VERSION: u8 = 0x12;

/// SPI mode the chip expects
pub const SPI_MODE: embedded_hal::spi::Mode = embedded_hal::spi::MODE_0;

/// SPI clock used by the reference hardware
pub const SPI_FREQUENCY_HZ: u32 = 250_000;

/// Driver lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioState {
    /// Initialization has not run yet
    Uninitialized,
    /// Initialization sequence in progress
    Initializing,
    /// Chip verified and configured
    Ready,
    /// The version register did not report [`FIRMWARE_VERSION`]
    FirmwareMismatch,
    /// Boot or reset line was not supplied
    InvalidConfiguration,
}

/// Hardware connections to the chip
///
/// Chip select is framed by the `SpiDevice` implementation. Boot and reset
/// lines are both required; a transport missing either leaves the radio in
/// [`RadioState::InvalidConfiguration`].
pub struct Transport<SPI, BOOT, RESET> {
    /// Chip-select gated SPI device
    pub spi: SPI,
    /// Boot/mode select line
    pub boot: Option<BOOT>,
    /// Active-low hardware reset line
    pub reset: Option<RESET>,
}

impl<SPI, BOOT, RESET> Transport<SPI, BOOT, RESET> {
    /// Transport with all control lines connected
    pub fn new(spi: SPI, boot: BOOT, reset: RESET) -> Self {
        Self {
            spi,
            boot: Some(boot),
            reset: Some(reset),
        }
    }
}

/// Driver for one SX127x transceiver
pub struct Radio<SPI, BOOT, RESET, DELAY> {
    device: Device<SPI>,
    boot: Option<BOOT>,
    reset: Option<RESET>,
    delay: DELAY,
    state: RadioState,
    version: Option<u8>,
    config: Configuration,
    cursor: PacketCursor,
}

impl<SPI, BOOT, RESET, DELAY> Radio<SPI, BOOT, RESET, DELAY> {
    /// Creates a driver. No bus or pin activity happens until the first
    /// operation that needs the chip.
    pub fn new(transport: Transport<SPI, BOOT, RESET>, delay: DELAY) -> Self {
        Self {
            device: Device::new(transport.spi),
            boot: transport.boot,
            reset: transport.reset,
            delay,
            state: RadioState::Uninitialized,
            version: None,
            config: Configuration::default(),
            cursor: PacketCursor::default(),
        }
    }

    /// Replaces the transport and forces re-initialization.
    ///
    /// Cached configuration returns to defaults, matching the chip after the
    /// hardware reset the next initialization performs. Returns the previous
    /// transport.
    pub fn supply_transport(
        &mut self,
        transport: Transport<SPI, BOOT, RESET>,
    ) -> Transport<SPI, BOOT, RESET> {
        let previous_spi = core::mem::replace(&mut self.device, Device::new(transport.spi));
        let previous = Transport {
            spi: previous_spi.release(),
            boot: core::mem::replace(&mut self.boot, transport.boot),
            reset: core::mem::replace(&mut self.reset, transport.reset),
        };

        self.state = RadioState::Uninitialized;
        self.version = None;
        self.config = Configuration::default();
        self.cursor = PacketCursor::default();
        previous
    }

    /// Consumes the driver and returns transport and delay.
    pub fn release(self) -> (Transport<SPI, BOOT, RESET>, DELAY) {
        (
            Transport {
                spi: self.device.release(),
                boot: self.boot,
                reset: self.reset,
            },
            self.delay,
        )
    }

    /// Current lifecycle state, without triggering initialization
    pub fn state(&self) -> RadioState {
        self.state
    }

    /// Settings last written to the chip
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    fn is_ready_state(&self) -> bool {
        self.state == RadioState::Ready
    }
}

/// Register values for a transmit power level, with the clamped level.
///
/// PA_BOOST: `OutputPower = dbm - 2`. RFO: `MaxPower = 7`, `OutputPower = dbm`.
fn pa_config(dbm: i8, output: PaOutput) -> (PaConfig, i8) {
    let level = clamp_tx_power(dbm, output);
    let config = match output {
        PaOutput::PaBoost => PaConfig {
            output,
            max_power: 0,
            output_power: (level - 2) as u8,
        },
        PaOutput::Rfo => PaConfig {
            output,
            max_power: 7,
            output_power: level as u8,
        },
    };
    (config, level)
}

fn frequency_register(hz: u32) -> FrequencyRf {
    FrequencyRf {
        frf: frequency_to_frf(hz),
    }
}
