use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Continent-level label attached to a country, or `Unknown` when the
/// country name could not be resolved.
///
/// Variants are declared in label order, so the derived `Ord` sorts regions
/// the same way their display names sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Region {
    Africa,
    Antarctica,
    Asia,
    Europe,
    #[serde(rename = "North America")]
    NorthAmerica,
    Oceania,
    #[serde(rename = "South America")]
    SouthAmerica,
    #[default]
    Unknown,
}

impl Region {
    pub const ALL: [Region; 8] = [
        Region::Africa,
        Region::Antarctica,
        Region::Asia,
        Region::Europe,
        Region::NorthAmerica,
        Region::Oceania,
        Region::SouthAmerica,
        Region::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Antarctica => "Antarctica",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::NorthAmerica => "North America",
            Region::Oceania => "Oceania",
            Region::SouthAmerica => "South America",
            Region::Unknown => "Unknown",
        }
    }

    /// Map a two-letter continent code (`AF`, `AN`, `AS`, `EU`, `NA`, `OC`, `SA`).
    pub fn from_continent_code(code: &str) -> Option<Region> {
        match code.trim().to_ascii_uppercase().as_str() {
            "AF" => Some(Region::Africa),
            "AN" => Some(Region::Antarctica),
            "AS" => Some(Region::Asia),
            "EU" => Some(Region::Europe),
            "NA" => Some(Region::NorthAmerica),
            "OC" => Some(Region::Oceania),
            "SA" => Some(Region::SouthAmerica),
            _ => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    /// Case-insensitive; accepts the display label, the label without spaces,
    /// or the continent code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if let Some(r) = Region::from_continent_code(&wanted) {
            return Ok(r);
        }
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.as_str().replace(' ', "").eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unknown region: {}", s.trim()))
    }
}

/// One platform user; only the country is needed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "Country")]
    pub country: String,
}

/// Per-country medal efficiency, enriched with its region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryMetric {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "MedalEfficiency")]
    pub medal_efficiency: f64,
    #[serde(rename = "Region", default)]
    pub region: Region,
}

impl CountryMetric {
    pub fn new(country: impl Into<String>, medal_efficiency: f64) -> Self {
        Self {
            country: country.into(),
            medal_efficiency,
            region: Region::Unknown,
        }
    }
}

/// Average notebook title length for one country in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "NotebookLength")]
    pub notebook_length: f64,
}

/// Wide-form usage table: one row per country, one value per named column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WideTable {
    /// Metric column names, in file order.
    pub columns: Vec<String>,
    pub rows: Vec<WideRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WideRow {
    pub country: String,
    /// Same length and order as [`WideTable::columns`].
    pub values: Vec<f64>,
}

impl WideTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }
}

/// Long-form table of `(entity, country, value)` triples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LongTable {
    /// Header for the entity column, e.g. "Keyword" or "Tool".
    pub entity_label: String,
    /// Header for the value column, e.g. "Frequency" or "Usage".
    pub value_label: String,
    pub rows: Vec<LongRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRow {
    pub entity: String,
    pub country: String,
    pub value: f64,
}

impl LongTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct entities in row order.
    pub fn entities(&self) -> Vec<&str> {
        distinct(self.rows.iter().map(|r| r.entity.as_str()))
    }

    /// Distinct countries in row order.
    pub fn countries(&self) -> Vec<&str> {
        distinct(self.rows.iter().map(|r| r.country.as_str()))
    }

    pub fn value(&self, entity: &str, country: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.entity == entity && r.country == country)
            .map(|r| r.value)
    }
}

fn distinct<'a>(items: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for s in items {
        if !out.contains(&s) {
            out.push(s);
        }
    }
    out
}

/// Number of users per country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "User Count")]
    pub users: u64,
}

/// Summary card for one country of the filtered view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyCard {
    pub country: String,
    pub region: Region,
    pub medal_efficiency: f64,
    pub flag_url: Option<String>,
}

/// Notebook title length over time for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub country: String,
    /// `(year, notebook_length)`, ascending by year.
    pub points: Vec<(i32, f64)>,
}
