//! Register definitions for the SX127x radio in LoRa mode
//! Generated from the SX1276/77/78/79 datasheet, rev. 7

mod map;
mod modem;
mod packet;
mod rf;
mod status;
mod system;

pub use map::*;
pub use modem::*;
pub use packet::*;
pub use rf::*;
pub use status::*;
pub use system::*;

#[cfg(test)]
mod tests {
    use super::*;
    use regiface::ReadableRegister;

    fn id<R: ReadableRegister<IdType = u8>>() -> u8 {
        R::id()
    }

    #[test]
    fn typed_registers_match_address_map() {
        assert_eq!(id::<Fifo>(), Address::Fifo.addr());
        assert_eq!(id::<OpMode>(), Address::OpMode.addr());
        assert_eq!(id::<FrequencyRf>(), Address::FrfMsb.addr());
        assert_eq!(id::<PaConfig>(), Address::PaConfig.addr());
        assert_eq!(id::<Lna>(), Address::Lna.addr());
        assert_eq!(id::<FifoAddrPtr>(), Address::FifoAddrPtr.addr());
        assert_eq!(id::<FifoTxBaseAddr>(), Address::FifoTxBaseAddr.addr());
        assert_eq!(id::<FifoRxBaseAddr>(), Address::FifoRxBaseAddr.addr());
        assert_eq!(id::<FifoRxCurrentAddr>(), Address::FifoRxCurrentAddr.addr());
        assert_eq!(id::<IrqFlags>(), Address::IrqFlags.addr());
        assert_eq!(id::<RxNbBytes>(), Address::RxNbBytes.addr());
        assert_eq!(id::<RxHeaderCount>(), Address::RxHeaderCountMsb.addr());
        assert_eq!(id::<RxPacketCount>(), Address::RxPacketCountMsb.addr());
        assert_eq!(id::<PacketSnr>(), Address::PktSnrValue.addr());
        assert_eq!(id::<PacketRssi>(), Address::PktRssiValue.addr());
        assert_eq!(id::<ModemConfig1>(), Address::ModemConfig1.addr());
        assert_eq!(id::<ModemConfig2>(), Address::ModemConfig2.addr());
        assert_eq!(id::<PreambleLength>(), Address::PreambleMsb.addr());
        assert_eq!(id::<PayloadLength>(), Address::PayloadLength.addr());
        assert_eq!(id::<ModemConfig3>(), Address::ModemConfig3.addr());
        assert_eq!(id::<FrequencyError>(), Address::FreqErrorMsb.addr());
        assert_eq!(id::<DetectionOptimize>(), Address::DetectionOptimize.addr());
        assert_eq!(id::<DetectionThreshold>(), Address::DetectionThreshold.addr());
        assert_eq!(id::<SyncWord>(), Address::SyncWord.addr());
        assert_eq!(id::<Version>(), Address::Version.addr());
    }
}
