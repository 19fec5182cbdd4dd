//! Dashboard settings, read from an optional TOML file.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! data_dir = "data"
//! top_users = 15
//! top_cards = 15
//! flag_url_template = "https://flagcdn.com/w80/{code}.png"
//! locale = "en"
//!
//! [keywords]
//! top_countries = 5
//! top_entities = 20
//!
//! [tools]
//! top_countries = 5
//! top_entities = 15
//! ```

use crate::aggregate::AggregateSpec;
use crate::error::{DataError, Result};
use crate::region::DEFAULT_FLAG_URL_TEMPLATE;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub files: InputFiles,
    pub top_users: usize,
    pub top_cards: usize,
    #[serde(deserialize_with = "keyword_limits")]
    pub keywords: TopK,
    #[serde(deserialize_with = "tool_limits")]
    pub tools: TopK,
    pub flag_url_template: String,
    /// Number formatting for chart labels (`en`, `de`, `fr`, ...).
    pub locale: String,
}

/// File names inside [`DashboardConfig::data_dir`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFiles {
    pub users: String,
    pub medal_efficiency: String,
    pub token_trends: String,
    pub keywords: String,
    pub tools: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopK {
    pub top_countries: usize,
    pub top_entities: usize,
}

impl TopK {
    pub const KEYWORDS: TopK = TopK {
        top_countries: 5,
        top_entities: 20,
    };
    pub const TOOLS: TopK = TopK {
        top_countries: 5,
        top_entities: 15,
    };

    pub fn spec(&self, entity_label: &str, value_label: &str) -> AggregateSpec {
        AggregateSpec::new(self.top_countries, self.top_entities).labels(entity_label, value_label)
    }
}

/// A `[keywords]` / `[tools]` table where either key may be left out.
#[derive(Deserialize)]
struct PartialTopK {
    top_countries: Option<usize>,
    top_entities: Option<usize>,
}

impl PartialTopK {
    fn or(self, fallback: TopK) -> TopK {
        TopK {
            top_countries: self.top_countries.unwrap_or(fallback.top_countries),
            top_entities: self.top_entities.unwrap_or(fallback.top_entities),
        }
    }
}

fn keyword_limits<'de, D>(deserializer: D) -> std::result::Result<TopK, D::Error>
where
    D: Deserializer<'de>,
{
    PartialTopK::deserialize(deserializer).map(|p| p.or(TopK::KEYWORDS))
}

fn tool_limits<'de, D>(deserializer: D) -> std::result::Result<TopK, D::Error>
where
    D: Deserializer<'de>,
{
    PartialTopK::deserialize(deserializer).map(|p| p.or(TopK::TOOLS))
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            users: "users_clean.csv".into(),
            medal_efficiency: "medal_efficiency.csv".into(),
            token_trends: "notebook_token_trends.csv".into(),
            keywords: "top_modeling_keywords.csv".into(),
            tools: "popular_tools.csv".into(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            files: InputFiles::default(),
            top_users: 15,
            top_cards: 15,
            keywords: TopK::KEYWORDS,
            tools: TopK::TOOLS,
            flag_url_template: DEFAULT_FLAG_URL_TEMPLATE.to_string(),
            locale: "en".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(s: &str, origin: &Path) -> Result<Self> {
        toml::from_str(s).map_err(|e| DataError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                DataError::MissingInput {
                    path: path.to_path_buf(),
                }
            } else {
                DataError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_toml_str(&text, path)
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.users)
    }

    pub fn medal_efficiency_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.medal_efficiency)
    }

    pub fn token_trends_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.token_trends)
    }

    pub fn keywords_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.keywords)
    }

    pub fn tools_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.tools)
    }
}
