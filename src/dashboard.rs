//! One full recomputation pass over the loaded tables.
//!
//! Raw tables → region enrichment → filter → ranking / aggregation. The pass
//! is a pure function of the dataset, the config and the filter; the only
//! state carried between passes is the optional [`LookupCache`].

use crate::aggregate::{aggregate, country_counts};
use crate::config::DashboardConfig;
use crate::error::{DataError, Result};
use crate::filter::{RegionFilter, available_regions, efficiency_bounds};
use crate::models::{
    CountryCount, CountryMetric, EfficiencyCard, LongTable, Region, TrendPoint, TrendSeries,
    UserRecord, WideTable,
};
use crate::ranking::{top_1, top_n};
use crate::region::{LookupCache, RegionResolver, enrich_regions};
use crate::registry::CountryLookup;
use crate::storage;
use log::info;
use serde::{Deserialize, Serialize};

/// The five input tables, loaded once and then only read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub users: Vec<UserRecord>,
    /// Medal efficiency per country, before region enrichment.
    pub metrics: Vec<CountryMetric>,
    pub trends: Vec<TrendPoint>,
    pub keywords: WideTable,
    pub tools: WideTable,
}

impl Dataset {
    /// Load every input file named by `config`. A missing data directory or
    /// file is a [`DataError::MissingInput`].
    pub fn load(config: &DashboardConfig) -> Result<Self> {
        if !config.data_dir.is_dir() {
            return Err(DataError::MissingInput {
                path: config.data_dir.clone(),
            });
        }
        Ok(Self {
            users: storage::load_users(config.users_path())?,
            metrics: storage::load_medal_efficiency(config.medal_efficiency_path())?,
            trends: storage::load_token_trends(config.token_trends_path())?,
            keywords: storage::load_wide(config.keywords_path())?,
            tools: storage::load_wide(config.tools_path())?,
        })
    }
}

/// Everything the dashboard shows for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Regions available for selection (over the whole table).
    pub regions: Vec<Region>,
    /// Efficiency bounds over the whole table.
    pub efficiency_bounds: Option<(f64, f64)>,
    pub filter: RegionFilter,
    /// Rows passing the filter, in file order.
    pub filtered: Vec<CountryMetric>,
    pub top_users: Vec<CountryCount>,
    /// `None` when no row passes the filter.
    pub most_efficient: Option<EfficiencyCard>,
    pub cards: Vec<EfficiencyCard>,
    pub token_trends: Vec<TrendSeries>,
    pub keywords: LongTable,
    pub tools: LongTable,
}

/// Group trend points per country (first-appearance order), each series
/// sorted by year.
pub fn trend_series(points: &[TrendPoint]) -> Vec<TrendSeries> {
    let mut out: Vec<TrendSeries> = Vec::new();
    for p in points {
        let idx = match out.iter().position(|s| s.country == p.country) {
            Some(i) => i,
            None => {
                out.push(TrendSeries {
                    country: p.country.clone(),
                    points: Vec::new(),
                });
                out.len() - 1
            }
        };
        out[idx].points.push((p.year, p.notebook_length));
    }
    for s in &mut out {
        s.points.sort_by_key(|(y, _)| *y);
    }
    out
}

fn card<L: CountryLookup>(
    m: &CountryMetric,
    resolver: &RegionResolver<L>,
    cache: Option<&mut LookupCache>,
) -> EfficiencyCard {
    let flag_url = match cache {
        Some(c) => resolver.flag_url_cached(c, &m.country),
        None => resolver.flag_url(&m.country),
    };
    EfficiencyCard {
        country: m.country.clone(),
        region: m.region,
        medal_efficiency: m.medal_efficiency,
        flag_url,
    }
}

/// Run one pass. With `filter = None` the covering selection (all regions,
/// full efficiency range) is used.
pub fn compute<L: CountryLookup>(
    data: &Dataset,
    config: &DashboardConfig,
    resolver: &RegionResolver<L>,
    filter: Option<&RegionFilter>,
    mut cache: Option<&mut LookupCache>,
) -> DashboardView {
    let enriched = enrich_regions(&data.metrics, resolver, cache.as_deref_mut());
    let filter = filter
        .cloned()
        .unwrap_or_else(|| RegionFilter::covering(&enriched));
    let filtered = filter.apply_owned(&enriched);
    if filtered.is_empty() {
        info!("no countries match the selected filters");
    }

    let eff = |m: &CountryMetric| m.medal_efficiency;
    let most_efficient =
        top_1(&filtered, eff).map(|m| card(m, resolver, cache.as_deref_mut()));
    let cards = top_n(&filtered, eff, config.top_cards)
        .into_iter()
        .map(|m| card(m, resolver, cache.as_deref_mut()))
        .collect();

    DashboardView {
        regions: available_regions(&enriched),
        efficiency_bounds: efficiency_bounds(&enriched),
        top_users: country_counts(&data.users, config.top_users),
        most_efficient,
        cards,
        token_trends: trend_series(&data.trends),
        keywords: aggregate(&data.keywords, &config.keywords.spec("Keyword", "Frequency")),
        tools: aggregate(&data.tools, &config.tools.spec("Tool", "Usage")),
        filter,
        filtered,
    }
}

/// A loaded dataset together with its resolver and lookup cache.
pub struct Dashboard<L> {
    config: DashboardConfig,
    data: Dataset,
    resolver: RegionResolver<L>,
    cache: LookupCache,
}

impl<L: CountryLookup> Dashboard<L> {
    pub fn new(config: DashboardConfig, data: Dataset, lookup: L) -> Self {
        let resolver =
            RegionResolver::new(lookup).with_flag_template(config.flag_url_template.clone());
        Self {
            config,
            data,
            resolver,
            cache: LookupCache::new(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn data(&self) -> &Dataset {
        &self.data
    }

    pub fn resolver(&self) -> &RegionResolver<L> {
        &self.resolver
    }

    /// Metric rows with their regions attached.
    pub fn enriched(&mut self) -> Vec<CountryMetric> {
        enrich_regions(&self.data.metrics, &self.resolver, Some(&mut self.cache))
    }

    /// Selection covering the whole table (the initial sidebar state).
    pub fn default_filter(&mut self) -> RegionFilter {
        RegionFilter::covering(&self.enriched())
    }

    pub fn view(&mut self, filter: &RegionFilter) -> DashboardView {
        compute(
            &self.data,
            &self.config,
            &self.resolver,
            Some(filter),
            Some(&mut self.cache),
        )
    }
}
