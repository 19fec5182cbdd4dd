use crate::models::{CountryMetric, Region};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Keep the rows whose category is in `allowed` and whose numeric value lies
/// in `lo..=hi`.
///
/// The result borrows from `rows` and preserves their order. An empty
/// `allowed` set, or `lo > hi`, matches nothing.
pub fn filter_rows<'a, T, C, FC, FN>(
    rows: &'a [T],
    category: FC,
    allowed: &BTreeSet<C>,
    numeric: FN,
    (lo, hi): (f64, f64),
) -> Vec<&'a T>
where
    C: Ord,
    FC: Fn(&T) -> C,
    FN: Fn(&T) -> f64,
{
    if allowed.is_empty() || lo > hi {
        return Vec::new();
    }
    rows.iter()
        .filter(|r| allowed.contains(&category(*r)))
        .filter(|r| {
            let v = numeric(*r);
            lo <= v && v <= hi
        })
        .collect()
}

/// Region / medal-efficiency selection applied to the metric table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionFilter {
    pub regions: BTreeSet<Region>,
    /// Inclusive `(min, max)` medal-efficiency bounds.
    pub range: (f64, f64),
}

impl RegionFilter {
    pub fn new(regions: impl IntoIterator<Item = Region>, range: (f64, f64)) -> Self {
        Self {
            regions: regions.into_iter().collect(),
            range,
        }
    }

    /// Selection that lets every row of `metrics` through: all of its regions
    /// and its full efficiency range. `(0.0, 0.0)` for an empty table.
    pub fn covering(metrics: &[CountryMetric]) -> Self {
        Self {
            regions: available_regions(metrics).into_iter().collect(),
            range: efficiency_bounds(metrics).unwrap_or((0.0, 0.0)),
        }
    }

    pub fn apply<'a>(&self, metrics: &'a [CountryMetric]) -> Vec<&'a CountryMetric> {
        filter_rows(
            metrics,
            |m| m.region,
            &self.regions,
            |m| m.medal_efficiency,
            self.range,
        )
    }

    /// Owned copy of [`RegionFilter::apply`], suitable for export.
    pub fn apply_owned(&self, metrics: &[CountryMetric]) -> Vec<CountryMetric> {
        self.apply(metrics).into_iter().cloned().collect()
    }
}

/// Sorted distinct regions present in `metrics`.
pub fn available_regions(metrics: &[CountryMetric]) -> Vec<Region> {
    metrics
        .iter()
        .map(|m| m.region)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `(min, max)` medal efficiency, or `None` for an empty table.
pub fn efficiency_bounds(metrics: &[CountryMetric]) -> Option<(f64, f64)> {
    let mut it = metrics.iter().map(|m| m.medal_efficiency);
    let first = it.next()?;
    Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(country: &str, region: Region, eff: f64) -> CountryMetric {
        CountryMetric {
            country: country.into(),
            medal_efficiency: eff,
            region,
        }
    }

    #[test]
    fn region_and_range_both_apply() {
        let rows = vec![m("Japan", Region::Asia, 50.0), m("France", Region::Europe, 80.0)];
        let f = RegionFilter::new([Region::Asia], (0.0, 100.0));
        let got = f.apply(&rows);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].country, "Japan");
    }

    #[test]
    fn bounds_are_inclusive() {
        let rows = vec![
            m("A", Region::Asia, 1.0),
            m("B", Region::Asia, 2.0),
            m("C", Region::Asia, 3.0),
        ];
        let f = RegionFilter::new([Region::Asia], (1.0, 2.0));
        let got: Vec<&str> = f
            .apply(&rows)
            .iter()
            .map(|r| r.country.as_str())
            .collect();
        assert_eq!(got, vec!["A", "B"]);
    }

    #[test]
    fn empty_selection_or_inverted_range_matches_nothing() {
        let rows = vec![m("A", Region::Asia, 1.0)];
        assert!(RegionFilter::new([], (0.0, 10.0)).apply(&rows).is_empty());
        assert!(RegionFilter::new([Region::Asia], (5.0, 1.0)).apply(&rows).is_empty());
    }

    #[test]
    fn covering_filter_keeps_everything() {
        let rows = vec![
            m("A", Region::Asia, 0.5),
            m("B", Region::Unknown, 3.0),
            m("C", Region::Europe, 1.5),
        ];
        let f = RegionFilter::covering(&rows);
        assert_eq!(f.range, (0.5, 3.0));
        assert_eq!(
            available_regions(&rows),
            vec![Region::Asia, Region::Europe, Region::Unknown]
        );
        assert_eq!(f.apply(&rows).len(), 3);
        assert_eq!(RegionFilter::covering(&[]).range, (0.0, 0.0));
    }

    #[test]
    fn generic_filter_over_tuples() {
        let rows = [("x", 1.0), ("y", 2.0), ("x", 9.0)];
        let allowed: BTreeSet<&str> = ["x"].into_iter().collect();
        let got = filter_rows(&rows, |r| r.0, &allowed, |r| r.1, (0.0, 5.0));
        assert_eq!(got, vec![&("x", 1.0)]);
    }
}
