//! Per-request height snapshot.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::rpc::SENTINEL_HEIGHT;

/// Height of one endpoint at one point in time. `0` means the fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightReading {
    pub name: String,
    pub height: u64,
    pub local: bool,
}

impl HeightReading {
    pub fn is_sentinel(&self) -> bool {
        self.height == SENTINEL_HEIGHT
    }
}

/// Heights gathered by one fetch, in endpoint set order.
///
/// Serializes as a JSON object `{name: height}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    readings: Vec<HeightReading>,
}

impl Snapshot {
    pub fn new(readings: Vec<HeightReading>) -> Self {
        Self { readings }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.readings.iter().find(|r| r.name == name).map(|r| r.height)
    }

    pub fn local_height(&self) -> u64 {
        self.readings
            .iter()
            .find(|r| r.local)
            .map(|r| r.height)
            .unwrap_or(SENTINEL_HEIGHT)
    }

    /// Highest trusted height. One reachable trusted endpoint is enough.
    pub fn best_trusted_height(&self) -> u64 {
        self.readings
            .iter()
            .filter(|r| !r.local)
            .map(|r| r.height)
            .max()
            .unwrap_or(SENTINEL_HEIGHT)
    }

    pub fn readings(&self) -> &[HeightReading] {
        &self.readings
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.readings.len()))?;
        for reading in &self.readings {
            map.serialize_entry(&reading.name, &reading.height)?;
        }
        map.end()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, reading) in self.readings.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={}", reading.name, reading.height)?;
        }
        Ok(())
    }
}
