use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, de};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetType {
    Stock,
    Crypto,
    Forex,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Stock => "STOCK",
            AssetType::Crypto => "CRYPTO",
            AssetType::Forex => "FOREX",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid asset type: {0}")]
pub struct ParseAssetTypeError(pub String);

impl FromStr for AssetType {
    type Err = ParseAssetTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "STOCK" => Ok(AssetType::Stock),
            "CRYPTO" => Ok(AssetType::Crypto),
            "FOREX" => Ok(AssetType::Forex),
            _ => Err(ParseAssetTypeError(s.to_string())),
        }
    }
}

// Same case-insensitive parsing as path segments.
impl<'de> Deserialize<'de> for AssetType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

impl TryFrom<String> for AssetType {
    type Error = ParseAssetTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Represents a record in the market_data table
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    pub id: i64,
    #[sqlx(try_from = "String")]
    pub asset_type: AssetType,
    pub symbol: String,
    /// Trading day the quote belongs to
    pub date: Option<NaiveDate>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
    pub market: Option<String>,
    pub base_currency: Option<String>,
}

/// Incoming quote, before it has a row id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMarketData {
    pub asset_type: AssetType,
    pub symbol: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub base_currency: Option<String>,
}
