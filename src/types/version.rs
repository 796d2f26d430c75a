use std::fmt::{
    self,
    Display,
};
use std::str::FromStr;

use serde::{
    Deserialize,
    Deserializer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuntimeVersion {
    V8_3_20,
    V8_3_21,
    V8_3_22,
    V8_3_23,
    V8_3_24,
}

impl RuntimeVersion {
    pub const LATEST: RuntimeVersion = RuntimeVersion::V8_3_24;

    pub fn all() -> &'static [RuntimeVersion] {
        &[
            RuntimeVersion::V8_3_20,
            RuntimeVersion::V8_3_21,
            RuntimeVersion::V8_3_22,
            RuntimeVersion::V8_3_23,
            RuntimeVersion::V8_3_24,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeVersion::V8_3_20 => "8.3.20",
            RuntimeVersion::V8_3_21 => "8.3.21",
            RuntimeVersion::V8_3_22 => "8.3.22",
            RuntimeVersion::V8_3_23 => "8.3.23",
            RuntimeVersion::V8_3_24 => "8.3.24",
        }
    }
}

impl Default for RuntimeVersion {
    fn default() -> Self {
        RuntimeVersion::LATEST
    }
}

impl Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported runtime version '{0}'. Expected one of 8.3.20 - 8.3.24")]
pub struct VersionParseError(pub String);

impl FromStr for RuntimeVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        RuntimeVersion::all()
            .iter()
            .find(|v| v.as_str() == trimmed)
            .copied()
            .ok_or_else(|| VersionParseError(trimmed.to_string()))
    }
}

impl<'de> Deserialize<'de> for RuntimeVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version() {
        assert_eq!("8.3.22".parse(), Ok(RuntimeVersion::V8_3_22));
        assert_eq!(" 8.3.24 ".parse(), Ok(RuntimeVersion::LATEST));
        assert_eq!(
            "8.2.19".parse::<RuntimeVersion>(),
            Err(VersionParseError("8.2.19".to_string()))
        );
    }
}
