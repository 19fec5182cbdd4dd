/// First `n` rows by `key`, largest first. Equal keys keep their input order.
pub fn top_n<'a, T, F>(rows: &'a [T], key: F, n: usize) -> Vec<&'a T>
where
    F: Fn(&T) -> f64,
{
    let mut sorted: Vec<&T> = rows.iter().collect();
    // sort_by is stable
    sorted.sort_by(|a, b| key(*b).total_cmp(&key(*a)));
    sorted.truncate(n);
    sorted
}

/// The single largest row by `key`, or `None` for an empty table.
///
/// Ties go to the row that comes first in the input.
pub fn top_1<'a, T, F>(rows: &'a [T], key: F) -> Option<&'a T>
where
    F: Fn(&T) -> f64,
{
    top_n(rows, key, 1).into_iter().next()
}
