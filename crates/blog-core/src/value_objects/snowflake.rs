//! Snowflake ID - time-ordered 64-bit identifier for blogs, comments and replies
//!
//! Layout: 41 bits of milliseconds since [`Snowflake::EPOCH`], 10 bits of
//! worker id, 12 bits of per-millisecond sequence.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

const WORKER_BITS: i64 = 10;
const SEQUENCE_BITS: i64 = 12;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;
const MAX_WORKER_ID: u16 = 1 << WORKER_BITS;

/// 64-bit identifier, serialized to JSON as a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// 2024-01-01 00:00:00 UTC in milliseconds
    pub const EPOCH: i64 = 1_704_067_200_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.trim()
            .parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid id: {0:?}")]
    InvalidFormat(String),
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

// Accepts both "123" and 123 so that clients and stored JSONB documents
// may use either form.
impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(Snowflake(n)),
            Repr::Text(s) => Snowflake::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Lock-free Snowflake generator.
///
/// The last timestamp and sequence are packed into one atomic word, so a
/// single compare-exchange claims both.
pub struct SnowflakeGenerator {
    worker_id: u16,
    state: AtomicI64,
}

impl SnowflakeGenerator {
    /// # Panics
    /// Panics if `worker_id` does not fit in 10 bits
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id < MAX_WORKER_ID, "Worker ID must be < 1024");
        Self {
            worker_id,
            state: AtomicI64::new(0),
        }
    }

    pub fn generate(&self) -> Snowflake {
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let last_ms = current >> SEQUENCE_BITS;
            let last_seq = current & SEQUENCE_MASK;
            let now = Self::elapsed_millis();

            let (ms, seq) = if now > last_ms {
                (now, 0)
            } else if last_seq < SEQUENCE_MASK {
                // same millisecond, or the clock went backwards
                (last_ms, last_seq + 1)
            } else {
                std::hint::spin_loop();
                current = self.state.load(Ordering::Acquire);
                continue;
            };

            let next = (ms << SEQUENCE_BITS) | seq;
            match self
                .state
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    return Snowflake(
                        (ms << (WORKER_BITS + SEQUENCE_BITS))
                            | (i64::from(self.worker_id) << SEQUENCE_BITS)
                            | seq,
                    );
                }
                Err(actual) => current = actual,
            }
        }
    }

    fn elapsed_millis() -> i64 {
        Utc::now().timestamp_millis() - Snowflake::EPOCH
    }
}
