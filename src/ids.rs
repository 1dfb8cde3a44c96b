use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/////////////////////////////////////////////// FarmId ///////////////////////////////////////////////

/// Opaque identifier of a farm.
///
/// Identifiers are generated server-side as UUID v4 text. Lookups take whatever string
/// the caller sends, so a malformed identifier is simply an unknown one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FarmId(String);

impl FarmId {
    /// Generates a fresh, previously unseen identifier.
    pub fn generate() -> Self {
        FarmId(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FarmId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FarmId {
    fn from(s: String) -> Self {
        FarmId(s)
    }
}

impl From<&str> for FarmId {
    fn from(s: &str) -> Self {
        FarmId(s.to_string())
    }
}

////////////////////////////////////////////// SensorId //////////////////////////////////////////////

/// Opaque identifier of a sensor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorId(String);

impl SensorId {
    /// Generates a fresh, previously unseen identifier.
    pub fn generate() -> Self {
        SensorId(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SensorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SensorId {
    fn from(s: String) -> Self {
        SensorId(s)
    }
}

impl From<&str> for SensorId {
    fn from(s: &str) -> Self {
        SensorId(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        let a = FarmId::generate();
        let b = FarmId::generate();
        assert_ne!(a, b);

        let c = SensorId::generate();
        let d = SensorId::generate();
        assert_ne!(c, d);
    }

    #[test]
    fn serializes_as_bare_string() {
        let id = FarmId::from("farm-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"farm-1\"");
        let parsed: SensorId = serde_json::from_str("\"sensor-1\"").unwrap();
        assert_eq!(parsed.as_str(), "sensor-1");
    }
}
