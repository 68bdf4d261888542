//! Radio configuration
//!
//! Value domain of the LoRa physical layer settings and the numeric rules
//! that map them onto register fields. Nothing here touches the bus; the
//! [`Radio`](crate::Radio) applies these values to the chip.
//!
//! Every setting accepts any input and clamps it to the nearest legal value.

use crate::registers::PaOutput;

/// Crystal oscillator frequency in Hz
pub const CRYSTAL_HZ: u32 = 32_000_000;

/// Carrier frequency applied at initialization
pub const DEFAULT_FREQUENCY_HZ: u32 = 915_000_000;

/// Lowest carrier frequency supported by the synthesizer
pub const MIN_FREQUENCY_HZ: u32 = 137_000_000;

/// Highest carrier frequency supported by the synthesizer
pub const MAX_FREQUENCY_HZ: u32 = 1_020_000_000;

/// Carriers below this use the low frequency port RSSI calibration
pub const LOW_BAND_LIMIT_HZ: u32 = 868_000_000;

/// Largest payload the FIFO can stage
pub const MAX_PAYLOAD_LENGTH: usize = 255;

/// Supported spreading factors
pub const SPREADING_FACTOR_RANGE: (u8, u8) = (6, 12);

/// Supported coding rate denominators (4/5 to 4/8)
pub const CODING_RATE_RANGE: (u8, u8) = (5, 8);

/// Transmit power range in dBm on the RFO pin
pub const RFO_POWER_RANGE: (i8, i8) = (0, 14);

/// Transmit power range in dBm on the PA_BOOST pin
pub const PA_BOOST_POWER_RANGE: (i8, i8) = (2, 17);

/// Symbol duration above which low data rate optimization is mandatory
const LOW_DATA_RATE_SYMBOL_MS: u64 = 16;

/// Signal bandwidth
///
/// The discriminant is the `Bw` field value of `RegModemConfig1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bandwidth {
    Khz7_8 = 0,
    Khz10_4 = 1,
    Khz15_6 = 2,
    Khz20_8 = 3,
    Khz31_25 = 4,
    Khz41_7 = 5,
    Khz62_5 = 6,
    Khz125 = 7,
    Khz250 = 8,
    Khz500 = 9,
}

/// Bandwidths in ascending order with their width in Hz
pub const BANDWIDTHS: [(Bandwidth, u32); 10] = [
    (Bandwidth::Khz7_8, 7_800),
    (Bandwidth::Khz10_4, 10_400),
    (Bandwidth::Khz15_6, 15_600),
    (Bandwidth::Khz20_8, 20_800),
    (Bandwidth::Khz31_25, 31_250),
    (Bandwidth::Khz41_7, 41_700),
    (Bandwidth::Khz62_5, 62_500),
    (Bandwidth::Khz125, 125_000),
    (Bandwidth::Khz250, 250_000),
    (Bandwidth::Khz500, 500_000),
];

/// Returns the first entry of an ascending table whose key is at least
/// `value`, or the last entry when `value` exceeds every key.
pub fn smallest_at_least<T: Copy>(table: &[(T, u32)], value: u32) -> Option<T> {
    table
        .iter()
        .find(|(_, key)| *key >= value)
        .or(table.last())
        .map(|(item, _)| *item)
}

impl Bandwidth {
    /// Smallest supported bandwidth that is at least `hz`, saturating at 500 kHz
    pub fn from_hz(hz: u32) -> Self {
        smallest_at_least(&BANDWIDTHS, hz).unwrap_or(Bandwidth::Khz500)
    }

    /// Decodes the `Bw` register field
    pub fn from_index(index: u8) -> Option<Self> {
        BANDWIDTHS.get(index as usize).map(|(bw, _)| *bw)
    }

    /// `Bw` register field value
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Width in Hz
    pub fn hz(self) -> u32 {
        BANDWIDTHS[self as usize].1
    }
}

/// Packet header mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaderMode {
    /// Length, coding rate and CRC presence travel in a header
    Explicit,
    /// Header omitted, payload length fixed in advance
    Implicit,
}

/// Synthesizer word for a carrier frequency: `floor(hz * 2^19 / 32 MHz)`
pub fn frequency_to_frf(hz: u32) -> u32 {
    (((hz as u64) << 19) / CRYSTAL_HZ as u64) as u32
}

/// Carrier frequency for a synthesizer word, rounded down to whole Hz
pub fn frf_to_frequency(frf: u32) -> u32 {
    ((frf as u64 * CRYSTAL_HZ as u64) >> 19) as u32
}

/// Clamps a carrier frequency into the synthesizer range
pub fn clamp_frequency(hz: u32) -> u32 {
    hz.clamp(MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ)
}

/// Clamps a spreading factor into 6..=12
pub fn clamp_spreading_factor(factor: u8) -> u8 {
    factor.clamp(SPREADING_FACTOR_RANGE.0, SPREADING_FACTOR_RANGE.1)
}

/// Clamps a coding rate denominator into 5..=8
pub fn clamp_coding_rate(denominator: u8) -> u8 {
    denominator.clamp(CODING_RATE_RANGE.0, CODING_RATE_RANGE.1)
}

/// Clamps a transmit power level into the range of the output pin
pub fn clamp_tx_power(dbm: i8, output: PaOutput) -> i8 {
    let (min, max) = match output {
        PaOutput::Rfo => RFO_POWER_RANGE,
        PaOutput::PaBoost => PA_BOOST_POWER_RANGE,
    };
    dbm.clamp(min, max)
}

/// Whether low data rate optimization is required.
///
/// Symbol duration in ms is `1000 * 2^sf / bw`; the optimization is needed
/// above 16 ms.
pub fn low_data_rate_optimize(spreading_factor: u8, bandwidth: Bandwidth) -> bool {
    1000 * (1u64 << spreading_factor) > LOW_DATA_RATE_SYMBOL_MS * bandwidth.hz() as u64
}

/// Delay between two reads of the interrupt flags while transmitting
pub const TX_POLL_INTERVAL_MS: u32 = 10;

/// Slack added to twice the airtime when deriving a transmit wait
const TX_TIMEOUT_MARGIN_MS: u32 = 1_000;

/// Bounded wait for transmit completion
///
/// The flags are read once when transmission starts and again after every
/// interval, the last read falling at or after `timeout_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxPolling {
    /// Delay between two reads of the interrupt flags
    pub interval_ms: u32,
    /// Total time allowed before giving up
    pub timeout_ms: u32,
}

impl TxPolling {
    /// Wait for a packet that spends `airtime_ms` on air: twice the airtime
    /// plus one second
    pub fn for_airtime(airtime_ms: u32) -> Self {
        Self {
            interval_ms: TX_POLL_INTERVAL_MS,
            timeout_ms: airtime_ms
                .saturating_mul(2)
                .saturating_add(TX_TIMEOUT_MARGIN_MS),
        }
    }

    /// Number of intervals waited before giving up
    pub fn attempts(&self) -> u32 {
        self.timeout_ms.div_ceil(self.interval_ms.max(1))
    }
}

/// Settings cached by the driver
///
/// Mirrors what was last written to the chip. Reset to the defaults below
/// whenever the transport is re-supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    /// Carrier frequency in Hz
    pub frequency: u32,
    /// Transmit power in dBm
    pub tx_power: i8,
    /// Transmit output pin
    pub pa_output: PaOutput,
    /// Spreading factor, 6..=12
    pub spreading_factor: u8,
    /// Signal bandwidth
    pub bandwidth: Bandwidth,
    /// Coding rate denominator, 5..=8
    pub coding_rate: u8,
    /// Preamble length in symbols
    pub preamble_length: u16,
    /// Sync word
    pub sync_word: u8,
    /// Payload CRC enabled
    pub crc: bool,
    /// Header mode used for the next transmission
    pub header_mode: HeaderMode,
    /// Transmit completion wait, derived from the packet airtime when `None`
    pub tx_polling: Option<TxPolling>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY_HZ,
            tx_power: 17,
            pa_output: PaOutput::PaBoost,
            spreading_factor: 7,
            bandwidth: Bandwidth::Khz125,
            coding_rate: 5,
            preamble_length: 8,
            sync_word: 0x12,
            crc: false,
            header_mode: HeaderMode::Explicit,
            tx_polling: None,
        }
    }
}

impl Configuration {
    /// Time on air in ms of a packet carrying `payload_length` bytes.
    ///
    /// Preamble plus 4.25 symbols of sync word and start frame, then the
    /// header and payload in blocks of `4 * (sf - 2 * ldro)` bits, each
    /// coded into `coding_rate` symbols. Rounded up to whole ms.
    pub fn time_on_air_ms(&self, payload_length: u8) -> u32 {
        let sf = self.spreading_factor as i64;
        let ldro = low_data_rate_optimize(self.spreading_factor, self.bandwidth) as i64;
        let implicit = (self.header_mode == HeaderMode::Implicit) as i64;
        let crc = self.crc as i64;

        let bits = 8 * payload_length as i64 - 4 * sf + 28 + 16 * crc - 20 * implicit;
        let block = 4 * (sf - 2 * ldro);
        let blocks = if bits > 0 { (bits + block - 1) / block } else { 0 };
        let payload_symbols = 8 + blocks * self.coding_rate as i64;

        // in quarter symbols
        let symbols = 4 * self.preamble_length as u64 + 17 + 4 * payload_symbols as u64;
        let airtime_us =
            symbols * (1u64 << sf) * 1_000_000 / (4 * self.bandwidth.hz() as u64);
        airtime_us.div_ceil(1_000) as u32
    }

    /// Transmit wait for a packet of `payload_length` bytes
    pub fn tx_polling_for(&self, payload_length: u8) -> TxPolling {
        self.tx_polling
            .unwrap_or_else(|| TxPolling::for_airtime(self.time_on_air_ms(payload_length)))
    }
}
