//! Group-by / top-K aggregation of wide per-country usage tables.

use crate::models::{CountryCount, LongRow, LongTable, UserRecord, WideTable};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Parameters for [`aggregate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSpec {
    /// How many countries (by number of rows) to keep.
    pub top_countries: usize,
    /// How many metric columns (by total over the kept countries) to keep.
    pub top_entities: usize,
    /// Header for the entity column of the output, e.g. "Keyword".
    pub entity_label: String,
    /// Header for the value column of the output, e.g. "Frequency".
    pub value_label: String,
}

impl AggregateSpec {
    pub fn new(top_countries: usize, top_entities: usize) -> Self {
        Self {
            top_countries,
            top_entities,
            entity_label: "Entity".into(),
            value_label: "Value".into(),
        }
    }

    pub fn labels(mut self, entity: impl Into<String>, value: impl Into<String>) -> Self {
        self.entity_label = entity.into();
        self.value_label = value.into();
        self
    }
}

/// Count how often each country appears, most frequent first.
///
/// Countries with equal counts keep the order of their first appearance.
/// Blank names are missing values and are not counted.
pub fn rank_countries<'a, I>(countries: I) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut pos: AHashMap<&str, usize> = AHashMap::new();
    let mut counts: Vec<(&str, u64)> = Vec::new();
    for c in countries.into_iter().filter(|c| !c.trim().is_empty()) {
        match pos.get(c) {
            Some(&i) => counts[i].1 += 1,
            None => {
                pos.insert(c, counts.len());
                counts.push((c, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(c, n)| (c.to_string(), n)).collect()
}

/// Top `n` countries by number of users.
pub fn country_counts(users: &[UserRecord], n: usize) -> Vec<CountryCount> {
    rank_countries(users.iter().map(|u| u.country.as_str()))
        .into_iter()
        .take(n)
        .map(|(country, users)| CountryCount { country, users })
        .collect()
}

/// Reshape a wide table into long form, restricted to the top countries and
/// the top metric columns.
///
/// 1. Countries are ranked by how many rows they have; the first
///    `top_countries` are kept (ties by first appearance). Rows without a
///    country are dropped.
/// 2. Metric columns are ranked by their sum over the kept rows; the first
///    `top_entities` are kept (ties by column order).
/// 3. Values are summed per `(column, country)`. Every pair is emitted, with
///    `0.0` when the country had nothing in that column.
/// 4. Entities are ordered by their value for the highest-ranked country,
///    descending. Output rows run country by country, in rank order.
///
/// An empty table, a table without metric columns or a zero limit yields an
/// empty result.
pub fn aggregate(table: &WideTable, spec: &AggregateSpec) -> LongTable {
    let mut out = LongTable {
        entity_label: spec.entity_label.clone(),
        value_label: spec.value_label.clone(),
        rows: Vec::new(),
    };
    if table.is_empty() || spec.top_countries == 0 || spec.top_entities == 0 {
        return out;
    }

    let ranked = rank_countries(table.rows.iter().map(|r| r.country.as_str()));
    let top: Vec<&str> = ranked
        .iter()
        .take(spec.top_countries)
        .map(|(c, _)| c.as_str())
        .collect();
    let slot: AHashMap<&str, usize> = top
        .iter()
        .enumerate()
        .map(|(i, c)| (*c, i))
        .collect();

    let ncols = table.columns.len();
    let mut sums = vec![vec![0.0f64; ncols]; top.len()];
    for row in &table.rows {
        if let Some(&ci) = slot.get(row.country.as_str()) {
            for (acc, v) in sums[ci].iter_mut().zip(&row.values) {
                *acc += *v;
            }
        }
    }

    let totals: Vec<f64> = (0..ncols)
        .map(|j| sums.iter().map(|per_country| per_country[j]).sum())
        .collect();
    let mut cols: Vec<usize> = (0..ncols).collect();
    cols.sort_by(|&a, &b| totals[b].total_cmp(&totals[a]));
    cols.truncate(spec.top_entities);
    // order by the leading country's value
    cols.sort_by(|&a, &b| sums[0][b].total_cmp(&sums[0][a]));

    for (ci, country) in top.iter().enumerate() {
        for &j in &cols {
            out.rows.push(LongRow {
                entity: table.columns[j].clone(),
                country: (*country).to_string(),
                value: sums[ci][j],
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WideRow;

    fn wide(columns: &[&str], rows: &[(&str, &[f64])]) -> WideTable {
        WideTable {
            columns: columns.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|(c, v)| WideRow {
                    country: c.to_string(),
                    values: v.to_vec(),
                })
                .collect(),
        }
    }

    #[test]
    fn rank_is_stable_on_ties() {
        let got = rank_countries(["B", "A", "C", "A", "C"]);
        assert_eq!(
            got,
            vec![("A".to_string(), 2), ("C".to_string(), 2), ("B".to_string(), 1)]
        );
    }

    #[test]
    fn two_countries_two_keywords() {
        let t = wide(
            &["kw1", "kw2"],
            &[("A", &[1.0, 0.0]), ("A", &[2.0, 1.0]), ("B", &[0.0, 5.0])],
        );
        let got = aggregate(&t, &AggregateSpec::new(2, 2).labels("Keyword", "Frequency"));
        let triples: Vec<(&str, &str, f64)> = got
            .rows
            .iter()
            .map(|r| (r.entity.as_str(), r.country.as_str(), r.value))
            .collect();
        assert_eq!(
            triples,
            vec![("kw1", "A", 3.0), ("kw2", "A", 1.0), ("kw1", "B", 0.0), ("kw2", "B", 5.0)]
        );
        assert_eq!(got.entity_label, "Keyword");
        assert_eq!(got.value_label, "Frequency");
    }

    #[test]
    fn truncation_keeps_highest_totals() {
        let t = wide(
            &["a", "b", "c"],
            &[("X", &[1.0, 9.0, 5.0]), ("Y", &[1.0, 0.0, 5.0]), ("Z", &[100.0, 100.0, 100.0])],
        );
        // X and Y both appear once, Z once; ties keep input order -> X, Y
        let got = aggregate(&t, &AggregateSpec::new(2, 2));
        assert_eq!(got.countries(), vec!["X", "Y"]);
        // totals over X+Y: a=2, b=9, c=10 -> keep c, b; X's values order b(9) before c(5)
        assert_eq!(got.entities(), vec!["b", "c"]);
        assert_eq!(got.rows.len(), 4);
    }

    #[test]
    fn empty_inputs_give_empty_output() {
        let empty = wide(&["a"], &[]);
        assert!(aggregate(&empty, &AggregateSpec::new(5, 5)).is_empty());
        let no_cols = wide(&[], &[("A", &[])]);
        assert!(aggregate(&no_cols, &AggregateSpec::new(5, 5)).is_empty());
        let t = wide(&["a"], &[("A", &[1.0])]);
        assert!(aggregate(&t, &AggregateSpec::new(0, 5)).is_empty());
    }

    #[test]
    fn country_counts_take_top_n() {
        let users: Vec<UserRecord> = ["India", "USA", "India", "Japan", "USA", "India"]
            .iter()
            .map(|c| UserRecord {
                country: c.to_string(),
            })
            .collect();
        let got = country_counts(&users, 2);
        assert_eq!(got.len(), 2);
        assert_eq!(
            got[0],
            CountryCount {
                country: "India".into(),
                users: 3,
            }
        );
        assert_eq!(
            got[1],
            CountryCount {
                country: "USA".into(),
                users: 2,
            }
        );
    }

    #[test]
    fn blank_countries_are_not_ranked() {
        let got = rank_countries(["", " ", "", "India", "India", "Japan"]);
        assert_eq!(got, vec![("India".to_string(), 2), ("Japan".to_string(), 1)]);
    }

    #[test]
    fn blank_country_rows_do_not_reach_the_output() {
        let t = wide(
            &["xgb"],
            &[("", &[1.0]), ("", &[1.0]), ("", &[1.0]), ("India", &[4.0])],
        );
        let got = aggregate(&t, &AggregateSpec::new(1, 1));
        assert_eq!(
            got.rows,
            vec![LongRow {
                entity: "xgb".into(),
                country: "India".into(),
                value: 4.0,
            }]
        );
    }
}
