//! Batch-wide duplicate detection.

use std::collections::{BTreeMap, HashMap};

use vessel_model::{
    DuplicateFinding, DuplicateKind, FieldIssue, IssueDetail, IssueKind, RowIndex, VesselRecord,
    fields,
};

use crate::imo::validate_imo;

/// Find IMO and `(vessel_name, flag_code)` groups shared by more than one
/// record.
///
/// IMO keys are normalized IMO numbers, so `IMO 9074729` and `9074729`
/// collide; blank values and values that fail [`validate_imo`] are ignored,
/// since they already carry their own warning. Name/flag keys are
/// compared exactly as supplied and skipped when either part is blank.
/// IMO findings come first, each kind sorted by key.
pub fn detect_duplicates(records: &[VesselRecord]) -> Vec<DuplicateFinding> {
    let mut by_imo: BTreeMap<String, Vec<RowIndex>> = BTreeMap::new();
    let mut by_name_flag: BTreeMap<(&str, &str), Vec<RowIndex>> = BTreeMap::new();

    for record in records {
        if let Ok(Some(imo)) = validate_imo(record.value(fields::IMO)) {
            by_imo.entry(imo).or_default().push(record.row);
        }

        if !record.is_blank(fields::VESSEL_NAME) && !record.is_blank(fields::FLAG_CODE) {
            let key = (
                record.value(fields::VESSEL_NAME),
                record.value(fields::FLAG_CODE),
            );
            by_name_flag.entry(key).or_default().push(record.row);
        }
    }

    let imo_findings = by_imo
        .into_iter()
        .filter(|(_, rows)| rows.len() > 1)
        .map(|(key, rows)| finding(DuplicateKind::ImoDuplicate, key, rows));
    let name_flag_findings = by_name_flag
        .into_iter()
        .filter(|(_, rows)| rows.len() > 1)
        .map(|((name, flag), rows)| {
            finding(DuplicateKind::NameFlagDuplicate, format!("{name}|{flag}"), rows)
        });
    imo_findings.chain(name_flag_findings).collect()
}

fn finding(kind: DuplicateKind, key: String, rows: Vec<RowIndex>) -> DuplicateFinding {
    DuplicateFinding {
        kind,
        key,
        count: rows.len(),
        rows,
    }
}

/// Expand findings into per-row warnings, ready to merge into outcomes.
pub fn duplicate_warnings(findings: &[DuplicateFinding]) -> HashMap<RowIndex, Vec<FieldIssue>> {
    let mut by_row: HashMap<RowIndex, Vec<FieldIssue>> = HashMap::new();
    for finding in findings {
        let (kind, field, message) = match finding.kind {
            DuplicateKind::ImoDuplicate => (
                IssueKind::DuplicateImo,
                fields::IMO,
                format!("IMO {} shared by {} records", finding.key, finding.count),
            ),
            DuplicateKind::NameFlagDuplicate => (
                IssueKind::DuplicateNameFlag,
                fields::VESSEL_NAME,
                format!("vessel name and flag shared by {} records", finding.count),
            ),
        };
        let issue = FieldIssue::new(kind, field, message).with_detail(IssueDetail::Duplicate {
            key: finding.key.clone(),
            count: finding.count,
        });
        for row in &finding.rows {
            by_row.entry(*row).or_default().push(issue.clone());
        }
    }
    by_row
}
