//! SX127x Register Interface
//!
//! This module provides the low-level register access used by the radio driver.
//! The SX127x exposes a flat map of 8-bit registers. Each access is a single
//! chip-select window holding two bytes:
//!
//! ```text
//! | wnr | addr[6:0] | data[7:0] |
//! ```
//!
//! where `wnr` is set for a write and cleared for a read. Registers wider than
//! one byte occupy consecutive addresses, most significant byte first, and are
//! transferred here as one single-byte access per address (no burst mode).
//!
//! Chip-select handling is delegated to the [`SpiDevice`](embedded_hal::spi::SpiDevice)
//! implementation, which frames every transaction.
//!
//! # Example
//! ```no_run
//! use sx1276::{Device, Version};
//!
//! fn version<SPI: embedded_hal::spi::SpiDevice>(spi: SPI) -> Result<u8, sx1276::RegifaceError> {
//!     let mut device = Device::new(spi);
//!     let version: Version = device.read_register()?;
//!     Ok(version.value)
//! }
//! ```

use core::convert::Infallible;

use regiface::{errors::Error as RegifaceError, ByteArray, ReadableRegister, WritableRegister};

/// Write flag set in the address byte of a register write
pub const WRITE_FLAG: u8 = 0x80;

/// Register interface to an SX127x chip.
///
/// Wraps an SPI device and provides typed register access via `regiface`
/// plus raw single-address access for the FIFO and debugging.
pub struct Device<SPI> {
    spi: SPI,
}

impl<SPI> Device<SPI> {
    /// Creates a new Device instance wrapping the provided SPI interface.
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Releases the underlying SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Device<SPI>
where
    SPI: embedded_hal::spi::SpiDevice,
{
    /// Reads one byte from a register address.
    ///
    /// # Errors
    /// * `RegifaceError::BusError` - SPI communication failed
    pub fn read_address(&mut self, address: u8) -> Result<u8, RegifaceError> {
        let mut value = [0u8];

        self.spi
            .transaction(&mut [
                embedded_hal::spi::Operation::Write(&[address & !WRITE_FLAG]),
                embedded_hal::spi::Operation::Read(&mut value),
            ])
            .map_err(|_| RegifaceError::BusError)?;

        Ok(value[0])
    }

    /// Writes one byte to a register address.
    ///
    /// # Errors
    /// * `RegifaceError::BusError` - SPI communication failed
    pub fn write_address(&mut self, address: u8, value: u8) -> Result<(), RegifaceError> {
        self.spi
            .transaction(&mut [
                embedded_hal::spi::Operation::Write(&[address | WRITE_FLAG]),
                embedded_hal::spi::Operation::Write(&[value]),
            ])
            .map_err(|_| RegifaceError::BusError)
    }

    /// Reads a register value from the device.
    ///
    /// # Type Parameters
    /// * `R` - Register type implementing ReadableRegister with u8 ID
    ///
    /// # Errors
    /// * `RegifaceError::BusError` - SPI communication failed
    /// * `RegifaceError::DeserializationError` - Failed to parse register value
    pub fn read_register<R>(&mut self) -> Result<R, RegifaceError>
    where
        R: ReadableRegister<IdType = u8>,
    {
        let mut raw_value = R::Array::new();

        for (offset, byte) in raw_value.as_mut().iter_mut().enumerate() {
            *byte = self.read_address(R::id() + offset as u8)?;
        }

        R::from_bytes(raw_value).map_err(|_| RegifaceError::DeserializationError)
    }

    /// Writes a value to a device register.
    ///
    /// # Errors
    /// * `RegifaceError::BusError` - SPI communication failed
    pub fn write_register<R>(&mut self, register: R) -> Result<(), RegifaceError>
    where
        R: WritableRegister<IdType = u8, Error = Infallible>,
    {
        let raw_value = match register.to_bytes() {
            Ok(raw) => raw,
            Err(never) => match never {},
        };

        for (offset, byte) in raw_value.as_ref().iter().enumerate() {
            self.write_address(R::id() + offset as u8, *byte)?;
        }
        Ok(())
    }
}

impl<SPI> Device<SPI>
where
    SPI: embedded_hal_async::spi::SpiDevice,
{
    /// Asynchronously reads one byte from a register address.
    ///
    /// This is the async version of [`read_address`](Device::read_address).
    pub async fn read_address_async(&mut self, address: u8) -> Result<u8, RegifaceError> {
        let mut value = [0u8];

        self.spi
            .transaction(&mut [
                embedded_hal_async::spi::Operation::Write(&[address & !WRITE_FLAG]),
                embedded_hal_async::spi::Operation::Read(&mut value),
            ])
            .await
            .map_err(|_| RegifaceError::BusError)?;

        Ok(value[0])
    }

    /// Asynchronously writes one byte to a register address.
    ///
    /// This is the async version of [`write_address`](Device::write_address).
    pub async fn write_address_async(
        &mut self,
        address: u8,
        value: u8,
    ) -> Result<(), RegifaceError> {
        self.spi
            .transaction(&mut [
                embedded_hal_async::spi::Operation::Write(&[address | WRITE_FLAG]),
                embedded_hal_async::spi::Operation::Write(&[value]),
            ])
            .await
            .map_err(|_| RegifaceError::BusError)
    }

    /// Asynchronously reads a register value from the device.
    ///
    /// This is the async version of [`read_register`](Device::read_register).
    pub async fn read_register_async<R>(&mut self) -> Result<R, RegifaceError>
    where
        R: ReadableRegister<IdType = u8>,
    {
        let mut raw_value = R::Array::new();

        for (offset, byte) in raw_value.as_mut().iter_mut().enumerate() {
            *byte = self.read_address_async(R::id() + offset as u8).await?;
        }

        R::from_bytes(raw_value).map_err(|_| RegifaceError::DeserializationError)
    }

    /// Asynchronously writes a value to a device register.
    ///
    /// This is the async version of [`write_register`](Device::write_register).
    pub async fn write_register_async<R>(&mut self, register: R) -> Result<(), RegifaceError>
    where
        R: WritableRegister<IdType = u8, Error = Infallible>,
    {
        let raw_value = match register.to_bytes() {
            Ok(raw) => raw,
            Err(never) => match never {},
        };

        for (offset, byte) in raw_value.as_ref().iter().enumerate() {
            self.write_address_async(R::id() + offset as u8, *byte)
                .await?;
        }
        Ok(())
    }
}
