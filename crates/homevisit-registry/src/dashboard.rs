use homevisit_stats::distribution::Distribution;
use serde::Serialize;

use crate::{columns, record::PatientRecord};

/// Fields charted on the dashboard, in display order.
pub const DASHBOARD_FIELDS: [&str; 7] = [
    columns::DIAGNOSIS,
    columns::GENDER,
    columns::AREA,
    columns::INTENT_OF_CARE,
    columns::SITE_OF_REFERRAL,
    columns::STAGE_OF_DISEASE,
    columns::SOCIAL_STATUS,
];

/// Headline counts over the whole registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    pub total: usize,
    pub active: usize,
    pub deceased: usize,
    pub high_priority: usize,
    pub total_visits: u64,
}

impl DashboardMetrics {
    #[must_use]
    pub fn from_records(records: &[PatientRecord]) -> Self {
        let deceased = records.iter().filter(|p| p.is_deceased()).count();
        Self {
            total: records.len(),
            active: records.len() - deceased,
            deceased,
            high_priority: records.iter().filter(|p| p.is_high_priority()).count(),
            total_visits: records
                .iter()
                .map(PatientRecord::visit_count)
                .fold(0, u64::saturating_add),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDistribution {
    pub field: &'static str,
    pub distribution: Distribution,
}

/// Metrics and per-field distributions for the dashboard page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub metrics: DashboardMetrics,
    pub distributions: Vec<FieldDistribution>,
}

impl Dashboard {
    #[must_use]
    pub fn from_records(records: &[PatientRecord]) -> Self {
        let distributions = DASHBOARD_FIELDS
            .iter()
            .map(|&field| FieldDistribution {
                field,
                distribution: Distribution::from_records(records, field),
            })
            .collect();
        Self {
            metrics: DashboardMetrics::from_records(records),
            distributions,
        }
    }
}
