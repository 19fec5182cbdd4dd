//! Country → region resolution and flag-image lookup.
//!
//! Both lookups are total: any name that cannot be resolved maps to
//! [`Region::Unknown`] or to "no flag". Results only depend on the input
//! string, so they can be memoized in a caller-owned [`LookupCache`];
//! skipping the cache gives identical output.

use crate::models::{CountryMetric, Region};
use crate::registry::{CountryCatalog, CountryLookup};
use ahash::{AHashMap, AHashSet};
use log::debug;

/// Default flag image URL; `{code}` is replaced by the lower-case alpha-2 code.
pub const DEFAULT_FLAG_URL_TEMPLATE: &str = "https://flagcdn.com/w80/{code}.png";

/// Memo table for region and flag lookups, keyed by the raw input string.
#[derive(Debug, Default, Clone)]
pub struct LookupCache {
    regions: AHashMap<String, Region>,
    flags: AHashMap<String, Option<String>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.regions.len() + self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty() && self.flags.is_empty()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
        self.flags.clear();
    }
}

/// Resolve a free-text country name to its region. Never fails.
pub fn resolve_region<L: CountryLookup + ?Sized>(lookup: &L, country_name: &str) -> Region {
    lookup
        .alpha2(country_name)
        .and_then(|code| lookup.continent_code(&code))
        .and_then(|continent| Region::from_continent_code(&continent))
        .unwrap_or(Region::Unknown)
}

/// Resolve a free-text country name to a flag image URL built from `template`.
pub fn lookup_flag_url<L: CountryLookup + ?Sized>(
    lookup: &L,
    template: &str,
    country_name: &str,
) -> Option<String> {
    let code = lookup.alpha2(country_name)?;
    let code = code.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(template.replace("{code}", &code.to_ascii_lowercase()))
}

/// Resolver backed by the compiled-in country catalog.
pub type CatalogResolver = RegionResolver<&'static CountryCatalog>;

/// Region and flag resolution over an injected [`CountryLookup`].
#[derive(Debug, Clone)]
pub struct RegionResolver<L> {
    lookup: L,
    flag_template: String,
}

impl Default for CatalogResolver {
    fn default() -> Self {
        Self::new(CountryCatalog::global())
    }
}

impl<L: CountryLookup> RegionResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            flag_template: DEFAULT_FLAG_URL_TEMPLATE.to_string(),
        }
    }

    pub fn with_flag_template(mut self, template: impl Into<String>) -> Self {
        self.flag_template = template.into();
        self
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn resolve(&self, country_name: &str) -> Region {
        resolve_region(&self.lookup, country_name)
    }

    pub fn resolve_cached(&self, cache: &mut LookupCache, country_name: &str) -> Region {
        if let Some(r) = cache.regions.get(country_name) {
            return *r;
        }
        let r = self.resolve(country_name);
        cache.regions.insert(country_name.to_string(), r);
        r
    }

    pub fn flag_url(&self, country_name: &str) -> Option<String> {
        lookup_flag_url(&self.lookup, &self.flag_template, country_name)
    }

    pub fn flag_url_cached(&self, cache: &mut LookupCache, country_name: &str) -> Option<String> {
        if let Some(url) = cache.flags.get(country_name) {
            return url.clone();
        }
        let url = self.flag_url(country_name);
        cache.flags.insert(country_name.to_string(), url.clone());
        url
    }
}

/// Attach a region to every metric row. Returns new rows; the input is untouched.
pub fn enrich_regions<L: CountryLookup>(
    metrics: &[CountryMetric],
    resolver: &RegionResolver<L>,
    mut cache: Option<&mut LookupCache>,
) -> Vec<CountryMetric> {
    let mut unresolved: AHashSet<&str> = AHashSet::new();
    let out: Vec<CountryMetric> = metrics
        .iter()
        .map(|m| {
            let region = match cache.as_deref_mut() {
                Some(c) => resolver.resolve_cached(c, &m.country),
                None => resolver.resolve(&m.country),
            };
            if region == Region::Unknown && unresolved.insert(m.country.as_str()) {
                debug!("no region for country '{}'", m.country);
            }
            CountryMetric {
                region,
                ..m.clone()
            }
        })
        .collect();
    if !unresolved.is_empty() {
        debug!("{} distinct countries left as Unknown", unresolved.len());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_countries() {
        let r = CatalogResolver::default();
        assert_eq!(r.resolve("Japan"), Region::Asia);
        assert_eq!(r.resolve("France"), Region::Europe);
        assert_eq!(r.resolve("United States of America"), Region::NorthAmerica);
        assert_eq!(r.resolve("Brazil"), Region::SouthAmerica);
        assert_eq!(r.resolve("Nigeria"), Region::Africa);
        assert_eq!(r.resolve("Australia"), Region::Oceania);
    }

    #[test]
    fn unresolvable_names_are_unknown() {
        let r = CatalogResolver::default();
        for name in ["", "Other", "Narnia", "I do not wish to disclose my location"] {
            assert_eq!(r.resolve(name), Region::Unknown);
            assert_eq!(r.flag_url(name), None);
        }
    }

    #[test]
    fn flag_url_uses_lowercase_code() {
        let r = CatalogResolver::default();
        assert_eq!(
            r.flag_url("Germany").as_deref(),
            Some("https://flagcdn.com/w80/de.png")
        );
        let r = r.with_flag_template("http://x/{code}.svg");
        assert_eq!(r.flag_url("Viet Nam").as_deref(), Some("http://x/vn.svg"));
    }

    #[test]
    fn cached_and_uncached_agree() {
        let r = CatalogResolver::default();
        let mut cache = LookupCache::new();
        for name in ["India", "India", "Nowhere", "Kenya", "Nowhere"] {
            assert_eq!(r.resolve_cached(&mut cache, name), r.resolve(name));
            assert_eq!(r.flag_url_cached(&mut cache, name), r.flag_url(name));
        }
        assert_eq!(cache.len(), 6);
    }

    #[test]
    fn enrich_does_not_touch_input() {
        let rows = vec![CountryMetric::new("Japan", 1.0), CountryMetric::new("???", 2.0)];
        let r = CatalogResolver::default();
        let out = enrich_regions(&rows, &r, None);
        assert_eq!(rows[0].region, Region::Unknown);
        assert_eq!(out[0].region, Region::Asia);
        assert_eq!(out[1].region, Region::Unknown);
        assert_eq!(out[1].medal_efficiency, 2.0);
    }
}
