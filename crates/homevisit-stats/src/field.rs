use std::{
    borrow::{Borrow, Cow},
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

/// Label substituted for absent, null, or blank field values.
pub const UNKNOWN: &str = "Unknown";

/// Read access to the named fields of a record.
///
/// Records handed to the statistics core are loosely typed field maps. The
/// core only ever needs the textual form of a field, so implementors render
/// numbers and other scalars to text and return `None` for absent or null
/// fields.
pub trait FieldSource {
    /// Returns the raw text of the named field, or `None` if it is absent.
    fn field_text(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl<T> FieldSource for &T
where
    T: FieldSource + ?Sized,
{
    fn field_text(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).field_text(name)
    }
}

impl<K, V> FieldSource for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn field_text(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_ref()))
    }
}

impl<K, V, S> FieldSource for HashMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn field_text(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_ref()))
    }
}

/// Normalizes a raw field value into a category label.
///
/// Absent values and values that are empty after trimming become
/// [`UNKNOWN`]. Any other value is returned verbatim.
///
/// # Examples
///
/// ```
/// # use homevisit_stats::field::{clean_value, UNKNOWN};
/// assert_eq!(clean_value(None), UNKNOWN);
/// assert_eq!(clean_value(Some("   ")), UNKNOWN);
/// assert_eq!(clean_value(Some("Cancer")), "Cancer");
/// ```
#[must_use]
pub fn clean_value(raw: Option<&str>) -> String {
    match raw {
        Some(value) if !value.trim().is_empty() => value.to_owned(),
        _ => UNKNOWN.to_owned(),
    }
}

/// Reads a field from `record` and normalizes it with [`clean_value`].
#[must_use]
pub fn category<R>(record: &R, name: &str) -> String
where
    R: FieldSource + ?Sized,
{
    clean_value(record.field_text(name).as_deref())
}
