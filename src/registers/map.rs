//! Register address map
//!
//! Names every LoRa-mode register the driver touches or reports in a
//! register dump. Typed register definitions in the sibling modules carry the
//! same addresses in their `#[register(..)]` attribute.

/// Named SX127x register address (LoRa mode page)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Address {
    Fifo = 0x00,
    OpMode = 0x01,
    FrfMsb = 0x06,
    FrfMid = 0x07,
    FrfLsb = 0x08,
    PaConfig = 0x09,
    PaRamp = 0x0A,
    Ocp = 0x0B,
    Lna = 0x0C,
    FifoAddrPtr = 0x0D,
    FifoTxBaseAddr = 0x0E,
    FifoRxBaseAddr = 0x0F,
    FifoRxCurrentAddr = 0x10,
    IrqFlags = 0x12,
    RxNbBytes = 0x13,
    RxHeaderCountMsb = 0x14,
    RxHeaderCountLsb = 0x15,
    RxPacketCountMsb = 0x16,
    RxPacketCountLsb = 0x17,
    ModemStat = 0x18,
    PktSnrValue = 0x19,
    PktRssiValue = 0x1A,
    ModemConfig1 = 0x1D,
    ModemConfig2 = 0x1E,
    PreambleMsb = 0x20,
    PreambleLsb = 0x21,
    PayloadLength = 0x22,
    MaxPayloadLength = 0x23,
    HopPeriod = 0x24,
    FifoRxByteAddr = 0x25,
    ModemConfig3 = 0x26,
    FreqErrorMsb = 0x28,
    FreqErrorMid = 0x29,
    FreqErrorLsb = 0x2A,
    RssiWideband = 0x2C,
    DetectionOptimize = 0x31,
    InvertIq = 0x33,
    DetectionThreshold = 0x37,
    SyncWord = 0x39,
    DioMapping1 = 0x40,
    DioMapping2 = 0x41,
    Version = 0x42,
    Tcxo = 0x4B,
    PaDac = 0x4D,
    FormerTemp = 0x5B,
    AgcRef = 0x61,
    AgcThresh1 = 0x62,
    AgcThresh2 = 0x63,
    AgcThresh3 = 0x64,
    Pll = 0x70,
}

impl Address {
    /// Number of named registers
    pub const COUNT: usize = Self::ALL.len();

    /// Every named register in ascending address order
    pub const ALL: [Address; 50] = [
        Address::Fifo,
        Address::OpMode,
        Address::FrfMsb,
        Address::FrfMid,
        Address::FrfLsb,
        Address::PaConfig,
        Address::PaRamp,
        Address::Ocp,
        Address::Lna,
        Address::FifoAddrPtr,
        Address::FifoTxBaseAddr,
        Address::FifoRxBaseAddr,
        Address::FifoRxCurrentAddr,
        Address::IrqFlags,
        Address::RxNbBytes,
        Address::RxHeaderCountMsb,
        Address::RxHeaderCountLsb,
        Address::RxPacketCountMsb,
        Address::RxPacketCountLsb,
        Address::ModemStat,
        Address::PktSnrValue,
        Address::PktRssiValue,
        Address::ModemConfig1,
        Address::ModemConfig2,
        Address::PreambleMsb,
        Address::PreambleLsb,
        Address::PayloadLength,
        Address::MaxPayloadLength,
        Address::HopPeriod,
        Address::FifoRxByteAddr,
        Address::ModemConfig3,
        Address::FreqErrorMsb,
        Address::FreqErrorMid,
        Address::FreqErrorLsb,
        Address::RssiWideband,
        Address::DetectionOptimize,
        Address::InvertIq,
        Address::DetectionThreshold,
        Address::SyncWord,
        Address::DioMapping1,
        Address::DioMapping2,
        Address::Version,
        Address::Tcxo,
        Address::PaDac,
        Address::FormerTemp,
        Address::AgcRef,
        Address::AgcThresh1,
        Address::AgcThresh2,
        Address::AgcThresh3,
        Address::Pll,
    ];

    /// Raw 7-bit register address
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Datasheet name of the register
    pub const fn name(self) -> &'static str {
        match self {
            Address::Fifo => "RegFifo",
            Address::OpMode => "RegOpMode",
            Address::FrfMsb => "RegFrfMsb",
            Address::FrfMid => "RegFrfMid",
            Address::FrfLsb => "RegFrfLsb",
            Address::PaConfig => "RegPaConfig",
            Address::PaRamp => "RegPaRamp",
            Address::Ocp => "RegOcp",
            Address::Lna => "RegLna",
            Address::FifoAddrPtr => "RegFifoAddrPtr",
            Address::FifoTxBaseAddr => "RegFifoTxBaseAddr",
            Address::FifoRxBaseAddr => "RegFifoRxBaseAddr",
            Address::FifoRxCurrentAddr => "RegFifoRxCurrentAddr",
            Address::IrqFlags => "RegIrqFlags",
            Address::RxNbBytes => "RegRxNbBytes",
            Address::RxHeaderCountMsb => "RegRxHeaderCntValueMsb",
            Address::RxHeaderCountLsb => "RegRxHeaderCntValueLsb",
            Address::RxPacketCountMsb => "RegRxPacketCntValueMsb",
            Address::RxPacketCountLsb => "RegRxPacketCntValueLsb",
            Address::ModemStat => "RegModemStat",
            Address::PktSnrValue => "RegPktSnrValue",
            Address::PktRssiValue => "RegPktRssiValue",
            Address::ModemConfig1 => "RegModemConfig1",
            Address::ModemConfig2 => "RegModemConfig2",
            Address::PreambleMsb => "RegPreambleMsb",
            Address::PreambleLsb => "RegPreambleLsb",
            Address::PayloadLength => "RegPayloadLength",
            Address::MaxPayloadLength => "RegMaxPayloadLength",
            Address::HopPeriod => "RegHopPeriod",
            Address::FifoRxByteAddr => "RegFifoRxByteAddr",
            Address::ModemConfig3 => "RegModemConfig3",
            Address::FreqErrorMsb => "RegFeiMsb",
            Address::FreqErrorMid => "RegFeiMid",
            Address::FreqErrorLsb => "RegFeiLsb",
            Address::RssiWideband => "RegRssiWideband",
            Address::DetectionOptimize => "RegDetectOptimize",
            Address::InvertIq => "RegInvertIQ",
            Address::DetectionThreshold => "RegDetectionThreshold",
            Address::SyncWord => "RegSyncWord",
            Address::DioMapping1 => "RegDioMapping1",
            Address::DioMapping2 => "RegDioMapping2",
            Address::Version => "RegVersion",
            Address::Tcxo => "RegTcxo",
            Address::PaDac => "RegPaDac",
            Address::FormerTemp => "RegFormerTemp",
            Address::AgcRef => "RegAgcRef",
            Address::AgcThresh1 => "RegAgcThresh1",
            Address::AgcThresh2 => "RegAgcThresh2",
            Address::AgcThresh3 => "RegAgcThresh3",
            Address::Pll => "RegPll",
        }
    }
}
