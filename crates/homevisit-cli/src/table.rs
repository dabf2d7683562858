//! Text rendering of registry tables
//!
//! Every function renders into a `String` so the commands can print it and
//! tests can inspect it.

use std::fmt::{self, Write as _};

use homevisit_registry::{
    analysis::CrossTabReport,
    area::AreaSummary,
    columns,
    dashboard::DashboardMetrics,
    record::PatientRecord,
};
use homevisit_stats::{crosstab::TOTAL_COLUMN, distribution::Distribution};

const LABEL_WIDTH: usize = 24;
const COUNT_WIDTH: usize = 8;

/// Optional columns of the patient list
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum ExtraColumn {
    Visits,
    Stage,
    Ecog,
    Referral,
    Survival,
}

impl ExtraColumn {
    fn header(self) -> &'static str {
        match self {
            ExtraColumn::Visits => "Visits",
            ExtraColumn::Stage => "Stage",
            ExtraColumn::Ecog => "ECOG",
            ExtraColumn::Referral => "Referral",
            ExtraColumn::Survival => "Survival",
        }
    }

    fn value(self, patient: &PatientRecord) -> String {
        let or_dash = |name: &str| {
            patient
                .filled(name)
                .map_or_else(|| "-".to_owned(), |s| s.into_owned())
        };
        match self {
            ExtraColumn::Visits => patient
                .filled(columns::VISIT_COUNT)
                .map_or_else(|| "0".to_owned(), |s| s.into_owned()),
            ExtraColumn::Stage => or_dash(columns::STAGE_OF_DISEASE),
            ExtraColumn::Ecog => or_dash(columns::ECOG),
            ExtraColumn::Referral => or_dash(columns::SITE_OF_REFERRAL),
            ExtraColumn::Survival => or_dash(columns::SURVIVAL_STATUS),
        }
    }
}

fn separator(out: &mut String, width: usize) -> fmt::Result {
    writeln!(out, "  {}", "-".repeat(width))
}

#[expect(clippy::cast_precision_loss)]
fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

pub fn render_metrics(metrics: &DashboardMetrics) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "Registry Overview:")?;
    writeln!(out, "  Patients total:   {}", metrics.total)?;
    writeln!(out, "  Active:           {}", metrics.active)?;
    writeln!(out, "  Passed:           {}", metrics.deceased)?;
    writeln!(out, "  High priority:    {}", metrics.high_priority)?;
    writeln!(out, "  Visits recorded:  {}", metrics.total_visits)?;
    Ok(out)
}

pub fn render_distribution(field: &str, distribution: &Distribution) -> anyhow::Result<String> {
    let mut out = String::new();
    let total = distribution.total();
    writeln!(out, "{field}")?;
    writeln!(
        out,
        "  {:<LABEL_WIDTH$} {:>COUNT_WIDTH$} {:>8}",
        "Value", "Patients", "Share"
    )?;
    separator(&mut out, LABEL_WIDTH + COUNT_WIDTH + 10)?;
    if distribution.is_empty() {
        writeln!(out, "  (no data)")?;
    }
    for (label, count) in distribution.iter() {
        writeln!(
            out,
            "  {label:<LABEL_WIDTH$} {count:>COUNT_WIDTH$} {:>7.1}%",
            percent(count, total)
        )?;
    }
    Ok(out)
}

/// Pivot table with row totals, a column-total footer, and the chi-square
/// summary when two variables were cross-tabulated.
pub fn render_crosstab(report: &CrossTabReport) -> anyhow::Result<String> {
    let mut out = String::new();
    let table = &report.table;
    let column_heading = report.column_field.as_deref().unwrap_or(TOTAL_COLUMN);
    let show_row_total = report.column_field.is_some();

    let corner = format!("{} \\ {column_heading}", report.row_field);
    write!(out, "  {corner:<LABEL_WIDTH$}")?;
    for column in table.columns() {
        write!(out, " {column:>COUNT_WIDTH$}")?;
    }
    if show_row_total {
        write!(out, " {:>COUNT_WIDTH$}", "Total")?;
    }
    writeln!(out)?;

    let num_columns = table.columns().len() + usize::from(show_row_total);
    separator(&mut out, LABEL_WIDTH + num_columns * (COUNT_WIDTH + 1))?;

    for (r, row) in table.rows().iter().enumerate() {
        write!(out, "  {row:<LABEL_WIDTH$}")?;
        let mut row_total = 0;
        for count in table.row_cells(r) {
            row_total += count;
            write!(out, " {count:>COUNT_WIDTH$}")?;
        }
        if show_row_total {
            write!(out, " {row_total:>COUNT_WIDTH$}")?;
        }
        writeln!(out)?;
    }

    separator(&mut out, LABEL_WIDTH + num_columns * (COUNT_WIDTH + 1))?;
    write!(out, "  {:<LABEL_WIDTH$}", "Total")?;
    for total in table.column_totals() {
        write!(out, " {total:>COUNT_WIDTH$}")?;
    }
    if show_row_total {
        write!(out, " {:>COUNT_WIDTH$}", table.grand_total())?;
    }
    writeln!(out)?;

    if let Some(significance) = &report.significance {
        writeln!(out)?;
        writeln!(out, "  {}", significance.summary())?;
    }
    Ok(out)
}

pub fn render_area_cards(areas: &[AreaSummary]) -> anyhow::Result<String> {
    let mut out = String::new();
    if areas.is_empty() {
        writeln!(out, "No areas found matching your filter.")?;
        return Ok(out);
    }
    writeln!(
        out,
        "  {:<LABEL_WIDTH$} {:>COUNT_WIDTH$} {:>COUNT_WIDTH$} {:>COUNT_WIDTH$} {:>COUNT_WIDTH$} {:>8}",
        "Area", "Patients", "Active", "Passed", "Visits", "Active%"
    )?;
    separator(&mut out, LABEL_WIDTH + 4 * (COUNT_WIDTH + 1) + 9)?;
    for area in areas {
        writeln!(
            out,
            "  {:<LABEL_WIDTH$} {:>COUNT_WIDTH$} {:>COUNT_WIDTH$} {:>COUNT_WIDTH$} {:>COUNT_WIDTH$} {:>7.1}%",
            area.name,
            area.total(),
            area.active.len(),
            area.deceased.len(),
            area.total_visits,
            100.0 * area.active_ratio(),
        )?;
    }
    Ok(out)
}

/// Street and city lines of a patient's address.
///
/// `N/A` placeholders are dropped, a city equal to the street is not
/// repeated, and a lone city moves up to the street line.
fn address_lines(patient: &PatientRecord) -> (String, String) {
    let clean = |s: &str| if s == "N/A" { String::new() } else { s.to_owned() };
    let mut street = clean(&patient.home_address());
    let mut city = clean(&patient.text_or_empty(columns::AREA));
    if street.trim() == city.trim() {
        city.clear();
    }
    if street.is_empty() && !city.is_empty() {
        street = std::mem::take(&mut city);
    }
    (street, city)
}

pub fn render_patient_list(
    title: &str,
    patients: &[&PatientRecord],
    extra_columns: &[ExtraColumn],
) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "{title} ({})", patients.len())?;

    write!(
        out,
        "  {:<24} {:<12} {:<20} {:<24} {:<16} {:>8}",
        "Patient", "File No.", "Diagnosis", "Address", "Status", "Priority"
    )?;
    for column in extra_columns {
        write!(out, " {:>10}", column.header())?;
    }
    writeln!(out)?;
    separator(&mut out, 109 + 11 * extra_columns.len())?;

    if patients.is_empty() {
        writeln!(out, "  No patients found.")?;
        return Ok(out);
    }

    for patient in patients {
        let mut name = patient.name().into_owned();
        if patient.is_high_priority() {
            name.push_str(" [HIGH]");
        }
        if patient.is_deceased() {
            name.push_str(" [DIED]");
        }
        let (street, city) = address_lines(patient);
        let address = if city.is_empty() {
            street
        } else {
            format!("{street}, {city}")
        };
        write!(
            out,
            "  {:<24} {:<12} {:<20} {:<24} {:<16} {:>8}",
            name,
            patient.text_or_empty(columns::FILE_NUMBER),
            patient.text_or_empty(columns::DIAGNOSIS),
            address,
            patient
                .filled(columns::INTENT_OF_CARE)
                .unwrap_or("Unknown".into()),
            patient.filled(columns::PRIORITY).unwrap_or("-".into()),
        )?;
        for column in extra_columns {
            write!(out, " {:>10}", column.value(patient))?;
        }
        writeln!(out)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use homevisit_registry::area;
    use serde_json::json;

    use super::*;

    fn patients() -> Vec<PatientRecord> {
        serde_json::from_value(json!([
            { "Pt Name": "Jane Doe", "Pt file Num.": 1042, "Diagnosis": "A", "Gender": "F",
              "Adress": "Zarqa", "Home Address ": "N/A", "priority": 1, "number of visits": 2 },
            { "Pt Name": "John Roe", "Pt file Num.": 2001, "Diagnosis": "A", "Gender": "M",
              "Adress": "Zarqa", "Home Address ": "12 Main St", "Servival Status": "Died" },
            { "Pt Name": "Ali Saleh", "Pt file Num.": 3310, "Diagnosis": "B", "Gender": "M",
              "Adress": "Amman", "Home Address ": "Amman" },
        ]))
        .unwrap()
    }

    #[test]
    fn test_address_lines() {
        let patients = patients();
        assert_eq!(address_lines(&patients[0]), ("Zarqa".to_owned(), String::new()));
        assert_eq!(
            address_lines(&patients[1]),
            ("12 Main St".to_owned(), "Zarqa".to_owned())
        );
        assert_eq!(address_lines(&patients[2]), ("Amman".to_owned(), String::new()));
    }

    #[test]
    fn test_render_metrics() {
        let metrics = DashboardMetrics {
            total: 3,
            active: 2,
            deceased: 1,
            high_priority: 1,
            total_visits: 2,
        };
        let text = render_metrics(&metrics).unwrap();
        assert_eq!(text.lines().count(), 6);
        assert!(text.contains("  Passed:           1\n"));
    }

    #[test]
    fn test_render_distribution() {
        let patients = patients();
        let dist = Distribution::from_records(&patients, "Gender");
        let text = render_distribution("Gender", &dist).unwrap();
        assert!(text.starts_with("Gender\n"));
        assert!(text.contains("66.7%"));
        assert!(text.contains("33.3%"));

        let empty = render_distribution("Gender", &Distribution::default()).unwrap();
        assert!(empty.contains("(no data)"));
    }

    #[test]
    fn test_render_crosstab_with_totals() {
        let report = CrossTabReport::new(&patients(), "Diagnosis", Some("Gender")).unwrap();
        let text = render_crosstab(&report).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert!(lines[0].contains("Diagnosis \\ Gender"));
        assert!(lines[0].trim_end().ends_with("Total"));
        let footer = lines.iter().find(|l| l.trim_start().starts_with("Total")).unwrap();
        let numbers = footer
            .split_whitespace()
            .skip(1)
            .map(|n| n.parse::<u64>().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(numbers, [1, 2, 3]);
        assert!(text.contains("Chi²:"));
    }

    #[test]
    fn test_render_crosstab_single_variable() {
        let report = CrossTabReport::new(&patients(), "Diagnosis", None).unwrap();
        let text = render_crosstab(&report).unwrap();
        assert!(text.contains("Diagnosis \\ Total"));
        assert!(!text.contains("Chi²"));
    }

    #[test]
    fn test_render_area_cards() {
        let patients = patients();
        let text = render_area_cards(&area::group_by_area(&patients)).unwrap();
        assert!(text.contains("Amman"));
        assert!(text.contains("Zarqa"));
        assert!(text.contains("50.0%"));
        assert_eq!(
            render_area_cards(&[]).unwrap(),
            "No areas found matching your filter.\n"
        );
    }

    #[test]
    fn test_render_patient_list() {
        let patients = patients();
        let refs = patients.iter().collect::<Vec<_>>();
        let text = render_patient_list("Active", &refs, &[ExtraColumn::Visits]).unwrap();
        assert!(text.starts_with("Active (3)"));
        assert!(text.contains("Jane Doe [HIGH]"));
        assert!(text.contains("John Roe [DIED]"));
        assert!(text.contains("Visits"));

        let empty = render_patient_list("Deceased", &[], &[]).unwrap();
        assert!(empty.contains("No patients found."));
    }

    #[test]
    fn test_extra_column_parse() {
        assert_eq!("visits".parse::<ExtraColumn>().unwrap(), ExtraColumn::Visits);
        assert_eq!("Ecog".parse::<ExtraColumn>().unwrap(), ExtraColumn::Ecog);
        assert!("weight".parse::<ExtraColumn>().is_err());
    }
}
