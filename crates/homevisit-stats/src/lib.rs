//! Categorical statistics for the home-visit patient registry.
//!
//! This crate provides the pure, stateless analysis core used by the
//! dashboard and analysis views:
//!
//! - **Field access**: Read named fields from loosely typed records, normalizing
//!   absent or blank values to `"Unknown"`
//! - **Distributions**: Frequency counts of one field, most common first
//! - **Cross-tabulation**: Two-way contingency tables with derived totals
//! - **Chi-square test**: Pearson test of independence against fixed p = 0.05
//!   critical values
//!
//! # Modules
//!
//! - [`field`]: The [`FieldSource`](field::FieldSource) trait and value cleaning
//! - [`distribution`]: Single-field frequency distributions
//! - [`crosstab`]: Contingency tables
//! - [`chi_square`]: Chi-square significance evaluation
//!
//! # Examples
//!
//! ## Counting a field
//!
//! ```
//! use std::collections::BTreeMap;
//! use homevisit_stats::distribution::Distribution;
//!
//! let records = [
//!     BTreeMap::from([("Gender", "F")]),
//!     BTreeMap::from([("Gender", "")]),
//! ];
//! let dist = Distribution::from_records(&records, "Gender");
//! assert_eq!(dist.labels, ["F", "Unknown"]);
//! ```
//!
//! ## Testing two fields for association
//!
//! ```
//! use std::collections::BTreeMap;
//! use homevisit_stats::{chi_square::ChiSquareResult, crosstab::ContingencyTable};
//!
//! let records = [
//!     BTreeMap::from([("Diagnosis", "Cancer"), ("Gender", "F")]),
//!     BTreeMap::from([("Diagnosis", "Cancer"), ("Gender", "M")]),
//!     BTreeMap::from([("Diagnosis", "Heart failure"), ("Gender", "M")]),
//! ];
//! let table = ContingencyTable::from_records(&records, "Diagnosis", Some("Gender"));
//! let result = ChiSquareResult::evaluate(&table).unwrap();
//! println!("{}", result.summary());
//! ```

pub mod chi_square;
pub mod crosstab;
pub mod distribution;
pub mod field;
