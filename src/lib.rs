#![cfg_attr(not(test), no_std)]
//! SX127x LoRa Radio Driver
//!
//! This crate drives the Semtech SX1276/7/8/9 family of LoRa transceivers
//! over SPI. It brings the chip up, configures the LoRa physical layer and
//! exchanges packets of up to 255 bytes by polling.
//!
//! # Features
//! - Frequency range: 137-1020 MHz
//! - LoRa: SF6-12, BW 7.8-500 kHz, CR 4/5-4/8
//! - Output power: 0-14 dBm on RFO, 2-17 dBm on PA_BOOST
//! - Explicit and implicit header modes
//! - Blocking and async (`embedded-hal-async`) transmit paths
//!
//! # Architecture
//! The driver is organized into several modules:
//!
//! - [`device`]: Raw register interface
//!   - One SPI transaction per register address, write flag in bit 7
//!   - Typed register access through `regiface`
//!
//! - [`registers`]: Register definitions for direct hardware access
//!   - `system`: Operating mode and version
//!   - `rf`: Carrier frequency, power amplifier, LNA
//!   - `modem`: Modem configuration and detection settings
//!   - `packet`: FIFO, interrupt flags, packet counters
//!   - `status`: SNR, RSSI and frequency error of the last packet
//!
//! - [`config`]: Setting domains, clamping rules and the cached
//!   [`Configuration`]
//!
//! - [`radio`]: The [`Radio`] driver with its lifecycle, configuration,
//!   transmit, receive and diagnostic operations
//!
//! # Lifecycle
//! A [`Radio`] starts [`RadioState::Uninitialized`]. The first operation that
//! needs the chip pulses the reset line, checks the version register and
//! programs baseline settings. Without boot and reset lines, or with an
//! unexpected version, the radio stays unusable and every operation returns a
//! neutral value until [`Radio::supply_transport`] is called.
//!
//! # Example
//! ```no_run
//! use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
//! use sx1276::{Error, Radio, Transport};
//!
//! fn ping<SPI, PIN, DELAY>(spi: SPI, boot: PIN, reset: PIN, delay: DELAY) -> Result<(), Error>
//! where
//!     SPI: SpiDevice,
//!     PIN: OutputPin,
//!     DELAY: DelayNs,
//! {
//!     let mut radio = Radio::new(Transport::new(spi, boot, reset), delay);
//!
//!     radio.set_frequency(868_100_000)?;
//!     radio.set_spreading_factor(9)?;
//!     radio.send_text("ping")?;
//!
//!     let mut reply = [0u8; 64];
//!     while radio.read_buffer(&mut reply)? == 0 {}
//!     Ok(())
//! }
//! ```

#[macro_use]
mod fmt;

pub mod config;
pub mod device;
pub mod error;
pub mod radio;
pub mod registers;

pub use regiface::errors::Error as RegifaceError;

pub use config::{Bandwidth, Configuration, HeaderMode, TxPolling};
pub use device::Device;
pub use error::Error;
pub use radio::{
    Radio, RadioState, RegisterDump, Transport, FIRMWARE_VERSION, SPI_FREQUENCY_HZ, SPI_MODE,
};
pub use registers::*;
