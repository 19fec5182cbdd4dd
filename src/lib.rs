//! kaggle_insights
//!
//! A small Rust library for the Kaggle-by-country dashboard data: load the
//! pre-computed CSV tables, attach continent regions to countries, filter by
//! region and medal-efficiency range, rank, aggregate usage tables into long
//! form, export the filtered view and render SVG charts. Pairs with the `kgi`
//! CLI.
//!
//! ### Features
//! - Country → region resolution with an `Unknown` fallback, never an error
//! - Region / efficiency-range filtering and stable top-N ranking
//! - Top-countries × top-entities reshaping of wide usage tables
//! - CSV, JSON and plain-text export of the filtered table
//! - SVG bar and line charts
//!
//! ### Example
//! ```no_run
//! use kaggle_insights::{DashboardConfig, Dataset, Region, RegionFilter};
//! use kaggle_insights::dashboard::Dashboard;
//! use kaggle_insights::registry::CountryCatalog;
//!
//! let config = DashboardConfig::default();
//! let data = Dataset::load(&config)?;
//! let mut dash = Dashboard::new(config, data, CountryCatalog::global());
//! let mut filter = dash.default_filter();
//! filter.regions.retain(|r| *r == Region::Asia);
//! let view = dash.view(&filter);
//! if let Some(top) = &view.most_efficient {
//!     println!("{} ({}) {:.2}", top.country, top.region, top.medal_efficiency);
//! }
//! kaggle_insights::storage::save_csv(&view.filtered, "kaggle_efficiency.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod models;
pub mod ranking;
pub mod region;
pub mod registry;
pub mod storage;
pub mod viz;

pub use config::DashboardConfig;
pub use dashboard::{DashboardView, Dataset};
pub use error::DataError;
pub use filter::RegionFilter;
pub use models::{CountryMetric, LongTable, Region, WideTable};
