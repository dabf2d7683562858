use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::{self, FieldSource};

/// Frequency counts of a single field's values across a record set.
///
/// `labels` and `values` are parallel: `values[i]` is the number of records
/// whose cleaned field value is `labels[i]`. Entries are ordered by
/// descending count, ties broken by ascending label, so the output is
/// reproducible for a given input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    /// Distinct cleaned field values.
    pub labels: Vec<String>,
    /// Number of records carrying each label.
    pub values: Vec<u64>,
}

impl Distribution {
    /// Counts the values of `field` across `records`.
    ///
    /// Absent and blank values are counted under
    /// [`UNKNOWN`](crate::field::UNKNOWN).
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::collections::BTreeMap;
    /// # use homevisit_stats::distribution::Distribution;
    /// let records = [
    ///     BTreeMap::from([("Gender", "F")]),
    ///     BTreeMap::from([("Gender", "M")]),
    ///     BTreeMap::from([("Gender", "F")]),
    /// ];
    /// let dist = Distribution::from_records(&records, "Gender");
    /// assert_eq!(dist.labels, ["F", "M"]);
    /// assert_eq!(dist.values, [2, 1]);
    /// ```
    #[must_use]
    pub fn from_records<I>(records: I, field: &str) -> Self
    where
        I: IntoIterator,
        I::Item: FieldSource,
    {
        let mut counts = BTreeMap::<String, u64>::new();
        for record in records {
            *counts.entry(field::category(&record, field)).or_default() += 1;
        }

        // BTreeMap yields labels in ascending order and the sort is stable,
        // so equal counts keep lexicographic order.
        let mut entries = counts.into_iter().collect::<Vec<_>>();
        entries.sort_by(|(_, a), (_, b)| b.cmp(a));

        let (labels, values) = entries.into_iter().unzip();
        Self { labels, values }
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Sum of all counts; equals the number of input records.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    /// Returns the count recorded for `label`, if it was observed.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<u64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|idx| self.values[idx])
    }

    /// Iterates over `(label, count)` pairs in distribution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}
