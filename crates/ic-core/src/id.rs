use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

const PREFIX: &str = "layer_";

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Identifier of a layer in the stack.
///
/// A plain counter value; the string form (`layer_3`) is what crosses the
/// JS boundary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl LayerId {
    pub const fn new(n: u64) -> Self {
        LayerId(n)
    }

    /// Generate a fresh, process-unique layer id.
    pub fn next() -> Self {
        LayerId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Parse the `layer_<n>` string form. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix(PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(LayerId)
    }
}

impl fmt::Debug for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{PREFIX}{}", self.0)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.0)
    }
}

impl Serialize for LayerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LayerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        LayerId::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid layer id {s:?}")))
    }
}
