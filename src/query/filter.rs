// src/query/filter.rs

use std::cmp::Ordering;

use crate::models::Record;
use crate::query::Criteria;

/// Keep the records matching `criteria`, preserving order.
///
/// No criteria, or empty criteria, keeps everything.
pub fn apply(records: Vec<Record>, criteria: Option<&Criteria>) -> Vec<Record> {
    match criteria {
        Some(criteria) if !criteria.is_empty() => {
            let total = records.len();
            let matched: Vec<Record> = records
                .into_iter()
                .filter(|record| criteria.matches(record))
                .collect();
            log::debug!(
                "{} of {} records matched {} predicate(s)",
                matched.len(),
                total,
                criteria.len()
            );
            matched
        }
        _ => records,
    }
}

/// Sort by salary, highest first. Records without a numeric salary go last.
///
/// The sort is stable, so ties keep persisted order.
pub fn sort_by_salary_desc(records: &mut [Record]) {
    records.sort_by(|a, b| match (a.salary(), b.salary()) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
