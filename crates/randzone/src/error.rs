pub type Result<T> = core::result::Result<T, Error>;

/// All possible errors that `randzone` can produce.
///
/// Most APIs are infallible: the fairness engine clamps bad input instead of
/// failing and the password/digit generators return empty strings for empty
/// domains. Only the snowflake codec can fail, on malformed text or a
/// timestamp older than its epoch.
#[derive(Clone, thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The input string was not a base-10 64-bit integer after trimming.
    #[error("invalid snowflake id: {0}")]
    ParseId(#[from] core::num::ParseIntError),

    /// The timestamp predates the codec epoch, so the 42-bit delta would be
    /// negative. Rejected rather than wrapped; see [`DISCORD_EPOCH`].
    ///
    /// [`DISCORD_EPOCH`]: crate::DISCORD_EPOCH
    #[error("timestamp {timestamp_ms} ms predates the snowflake epoch")]
    PreEpochTimestamp { timestamp_ms: u64 },
}
