use crate::{DISCORD_EPOCH, Error, Result, TimeSource};
use chrono::{DateTime, Utc};
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A 64-bit Snowflake ID using the Discord layout
///
/// - 42 bits timestamp (ms since [`DISCORD_EPOCH`])
/// - 5 bits worker ID
/// - 5 bits process ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63             22 21         17 16          12 11             0
///              +----------------+-------------+--------------+---------------+
///  Field:      | timestamp (42) |  worker (5) |  process (5) | sequence (12) |
///              +----------------+-------------+--------------+---------------+
///              |<--------- MSB ----------- 64 bits ---------- LSB ---------->|
/// ```
///
/// Field values passed to [`SnowflakeDiscordId::from`] are masked to their
/// field width, so out-of-range worker/process/sequence inputs wrap silently
/// (modular per-field truncation). IDs are numerically time-sortable: callers
/// comparing the decimal rendering must compare as integer magnitude, not as
/// text (or use [`SnowflakeDiscordId::to_padded_string`]).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeDiscordId {
    id: u64,
}

/// A fully unpacked snowflake, as produced by [`SnowflakeDiscordId::decode`].
///
/// `timestamp_ms` is absolute (Unix milliseconds, epoch offset already added
/// back); `date` is the same instant as calendar time.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecodedSnowflake {
    pub timestamp_ms: u64,
    pub date: DateTime<Utc>,
    pub worker_id: u64,
    pub process_id: u64,
    pub sequence: u64,
}

impl SnowflakeDiscordId {
    /// Bitmask for extracting the 42-bit timestamp field. Occupies bits 22
    /// through 63.
    pub const TIMESTAMP_MASK: u64 = (1 << 42) - 1;

    /// Bitmask for extracting the 5-bit worker ID field. Occupies bits 17
    /// through 21.
    pub const WORKER_ID_MASK: u64 = (1 << 5) - 1;

    /// Bitmask for extracting the 5-bit process ID field. Occupies bits 12
    /// through 16.
    pub const PROCESS_ID_MASK: u64 = (1 << 5) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: u64 = (1 << 12) - 1;

    /// Number of bits to shift the timestamp to its correct position (bit 22).
    pub const TIMESTAMP_SHIFT: u64 = 22;

    /// Number of bits to shift the worker ID to its correct position (bit 17).
    pub const WORKER_ID_SHIFT: u64 = 17;

    /// Number of bits to shift the process ID to its correct position (bit 12).
    pub const PROCESS_ID_SHIFT: u64 = 12;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u64 = 0;

    /// Packs the four fields, masking each to its width. `timestamp` is the
    /// millisecond delta from [`DISCORD_EPOCH`], not an absolute time.
    pub const fn from(timestamp: u64, worker_id: u64, process_id: u64, sequence: u64) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let worker_id = (worker_id & Self::WORKER_ID_MASK) << Self::WORKER_ID_SHIFT;
        let process_id = (process_id & Self::PROCESS_ID_MASK) << Self::PROCESS_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | worker_id | process_id | sequence,
        }
    }

    /// Encodes an absolute Unix-millisecond timestamp plus worker, process,
    /// and sequence fields into a packed ID.
    ///
    /// Worker and process IDs are masked to 5 bits, the sequence to 12 bits.
    /// Timestamps older than [`DISCORD_EPOCH`] are rejected with
    /// [`Error::PreEpochTimestamp`] because the 42-bit delta cannot represent
    /// them.
    #[cfg_attr(feature = "tracing", instrument(level = "trace"))]
    pub fn encode(timestamp_ms: u64, worker_id: u64, process_id: u64, sequence: u64) -> Result<Self> {
        let epoch_ms = DISCORD_EPOCH.as_millis() as u64;
        if timestamp_ms < epoch_ms {
            return Err(Error::PreEpochTimestamp { timestamp_ms });
        }
        Ok(Self::from(
            timestamp_ms - epoch_ms,
            worker_id,
            process_id,
            sequence,
        ))
    }

    /// Encodes an ID stamped with the current time from `time`.
    pub fn encode_now<T: TimeSource<u64>>(
        time: &T,
        worker_id: u64,
        process_id: u64,
        sequence: u64,
    ) -> Result<Self> {
        Self::encode(time.current_millis(), worker_id, process_id, sequence)
    }

    /// Unpacks all fields, restoring the absolute timestamp and its calendar
    /// form.
    pub fn decode(&self) -> DecodedSnowflake {
        let timestamp_ms = self.timestamp() + DISCORD_EPOCH.as_millis() as u64;
        // A 42-bit delta plus the epoch stays far inside chrono's supported
        // range, so the conversion cannot fail.
        let date = DateTime::from_timestamp_millis(timestamp_ms as i64).unwrap_or(DateTime::UNIX_EPOCH);
        DecodedSnowflake {
            timestamp_ms,
            date,
            worker_id: self.worker_id(),
            process_id: self.process_id(),
            sequence: self.sequence(),
        }
    }

    /// Extracts the timestamp delta (ms since [`DISCORD_EPOCH`]) from the
    /// packed ID.
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the worker ID from the packed ID.
    pub const fn worker_id(&self) -> u64 {
        (self.id >> Self::WORKER_ID_SHIFT) & Self::WORKER_ID_MASK
    }

    /// Extracts the process ID from the packed ID.
    pub const fn process_id(&self) -> u64 {
        (self.id >> Self::PROCESS_ID_SHIFT) & Self::PROCESS_ID_MASK
    }

    /// Extracts the sequence number from the packed ID.
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Converts this type into its raw type representation
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Converts a raw type into this type
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the ID as a zero-padded 20-digit string.
    ///
    /// Padding makes the decimal rendering lexicographically sortable, which
    /// the plain [`fmt::Display`] form is not.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

impl FromStr for SnowflakeDiscordId {
    type Err = Error;

    /// Parses a base-10 ID, tolerating surrounding whitespace. Non-numeric
    /// input propagates as [`Error::ParseId`].
    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim().parse::<u64>()?;
        Ok(Self::from_raw(raw))
    }
}

impl fmt::Display for SnowflakeDiscordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeDiscordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeDiscordId")
            .field("id", &format_args!("{} (0x{:x})", self.id, self.id))
            .field("timestamp", &self.timestamp())
            .field("worker_id", &self.worker_id())
            .field("process_id", &self.process_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}
