//! Domain model of the home-visit patient registry
//!
//! This crate holds everything the front end does with the patient list
//! between fetching it from the registry backend and displaying it. All
//! operations are synchronous and work on data already in memory.
//!
//! # Overview
//!
//! ## Browsing Workflow
//!
//! 1. **Decode Feed** ([`record::PatientFeed`]): Accept a bare array or a `data` wrapper
//! 2. **Hold State** ([`view::ViewState`]): Keep the patient list with the active filter
//! 3. **Group by Area** ([`area::group_by_area`]): Build one summary card per area
//! 4. **Open an Area** ([`area::AreaDetail`]): Split an area's patients into active and deceased
//!
//! ## Analytics Workflow
//!
//! 1. **Dashboard** ([`dashboard::Dashboard`]): Headline metrics and standard distributions
//! 2. **Cross-tabulation** ([`analysis::CrossTabReport`]): Contingency table of two fields
//!    with a chi-square test
//!
//! ## Update Workflow
//!
//! 1. **Build Updates** ([`update::VisitUpdate`], [`update::DeathRecord`]): Compute the
//!    changed cells
//! 2. **Apply Locally** ([`view::ViewState::apply_updates`]): Reflect the change before
//!    the backend confirms it
//! 3. **Send** ([`request::BackendRequest`]): Serialize the body posted to a backend
//!
//! # Examples
//!
//! ```
//! use homevisit_registry::{
//!     area, record::PatientFeed,
//!     view::{ViewFilter, ViewState},
//! };
//!
//! let feed: PatientFeed = serde_json::from_str(
//!     r#"{ "data": [
//!         { "Pt Name": "Jane Doe", "Pt file Num.": 1042, "Adress": "zarqa" },
//!         { "Pt Name": "John Roe", "Pt file Num.": 2001, "Adress": "Amman" }
//!     ] }"#,
//! )?;
//! let state = ViewState::new(feed.into_patients()).with_filter(ViewFilter::new("zar", ""));
//!
//! let areas = area::group_by_area(state.visible());
//! assert_eq!(areas.len(), 1);
//! assert_eq!(areas[0].name, "Zarqa");
//! # Ok::<(), serde_json::Error>(())
//! ```

pub mod analysis;
pub mod area;
pub mod columns;
pub mod dashboard;
pub mod record;
pub mod request;
pub mod transfer;
pub mod update;
pub mod view;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RegistryError {
    #[display("patient with file number '{id}' not found")]
    PatientNotFound { id: String },
    #[display("patient has no file number")]
    MissingFileNumber,
}
