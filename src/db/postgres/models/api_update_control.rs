// src/db/postgres/models/api_update_control.rs
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// External market-data feed guarded by the update gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApiType {
    Forex,
    Crypto,
    Stock,
}

impl ApiType {
    pub const ALL: [ApiType; 3] = [ApiType::Forex, ApiType::Crypto, ApiType::Stock];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiType::Forex => "FOREX",
            ApiType::Crypto => "CRYPTO",
            ApiType::Stock => "STOCK",
        }
    }

    /// Refresh cadence written on every recorded update.
    pub fn update_interval_minutes(&self) -> i32 {
        match self {
            ApiType::Forex => 32,
            ApiType::Crypto => 5,
            ApiType::Stock => 16,
        }
    }
}

impl fmt::Display for ApiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid api type: {0}")]
pub struct ParseApiTypeError(pub String);

impl FromStr for ApiType {
    type Err = ParseApiTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FOREX" => Ok(ApiType::Forex),
            "CRYPTO" => Ok(ApiType::Crypto),
            "STOCK" => Ok(ApiType::Stock),
            _ => Err(ParseApiTypeError(s.to_string())),
        }
    }
}

// Same case-insensitive parsing as path segments.
impl<'de> Deserialize<'de> for ApiType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

impl TryFrom<String> for ApiType {
    type Error = ParseApiTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Represents a record in the api_update_control table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ApiUpdateControl {
    pub id: i64,

    #[sqlx(try_from = "String")]
    pub api_type: ApiType,

    /// When the feed was last refreshed successfully
    pub last_update: DateTime<Utc>,

    pub update_interval_minutes: i32,
}

impl ApiUpdateControl {
    pub fn next_update(&self) -> DateTime<Utc> {
        self.last_update + Duration::minutes(i64::from(self.update_interval_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("crypto".parse::<ApiType>().unwrap(), ApiType::Crypto);
        assert_eq!("Forex".parse::<ApiType>().unwrap(), ApiType::Forex);
        assert_eq!("STOCK".parse::<ApiType>().unwrap(), ApiType::Stock);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "invalidtype".parse::<ApiType>().unwrap_err();
        assert_eq!(err, ParseApiTypeError("invalidtype".to_string()));
        assert_eq!(err.to_string(), "invalid api type: invalidtype");
        assert!("".parse::<ApiType>().is_err());
    }

    #[test]
    fn test_deserialize_is_case_insensitive() {
        assert_eq!(serde_json::from_str::<ApiType>("\"forex\"").unwrap(), ApiType::Forex);
        assert!(serde_json::from_str::<ApiType>("\"bonds\"").is_err());
    }

    #[test]
    fn test_intervals() {
        assert_eq!(ApiType::Forex.update_interval_minutes(), 32);
        assert_eq!(ApiType::Crypto.update_interval_minutes(), 5);
        assert_eq!(ApiType::Stock.update_interval_minutes(), 16);
    }

    #[test]
    fn test_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&ApiType::Crypto).unwrap(), "\"CRYPTO\"");
        for api_type in ApiType::ALL {
            assert_eq!(api_type.to_string().parse::<ApiType>().unwrap(), api_type);
        }
    }

    #[test]
    fn test_next_update() {
        let record = ApiUpdateControl {
            id: 1,
            api_type: ApiType::Stock,
            last_update: Utc.with_ymd_and_hms(2025, 1, 1, 23, 50, 0).unwrap(),
            update_interval_minutes: 16,
        };
        assert_eq!(
            record.next_update(),
            Utc.with_ymd_and_hms(2025, 1, 2, 0, 6, 0).unwrap()
        );
    }
}
