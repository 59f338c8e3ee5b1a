//! Per-record field checks and the fold that turns them into an outcome.

use std::collections::BTreeMap;

use vessel_model::{
    FieldIssue, FieldKind, IssueDetail, IssueKind, RowIndex, ValidationOutcome, VesselRecord,
    fields,
};

use crate::imo::{InvalidImo, validate_imo};
use crate::resolve::{MatchKind, ReferenceResolver, Resolution, Unresolved};

/// Result of resolving one reference field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldResolution {
    /// Trimmed input value.
    pub raw: String,
    pub result: Result<Option<Resolution>, Unresolved>,
}

/// Independent field results for one record, before classification.
///
/// Produced without touching any shared state, so records can be checked
/// in parallel and combined afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChecks {
    pub row: RowIndex,
    pub name_present: bool,
    pub imo: Result<Option<String>, InvalidImo>,
    pub flag: FieldResolution,
    pub gear_type: FieldResolution,
    pub vessel_type: FieldResolution,
}

impl FieldChecks {
    pub fn resolution(&self, kind: FieldKind) -> &FieldResolution {
        match kind {
            FieldKind::Flag => &self.flag,
            FieldKind::GearType => &self.gear_type,
            FieldKind::VesselType => &self.vessel_type,
        }
    }
}

/// Run every field check for one record.
pub fn check_record(record: &VesselRecord, resolver: &ReferenceResolver<'_>) -> FieldChecks {
    let resolve = |kind: FieldKind| {
        let raw = record.value(kind.field_name()).trim();
        FieldResolution {
            raw: raw.to_string(),
            result: resolver.resolve(kind, raw),
        }
    };
    FieldChecks {
        row: record.row,
        name_present: !record.is_blank(fields::VESSEL_NAME),
        imo: validate_imo(record.value(fields::IMO)),
        flag: resolve(FieldKind::Flag),
        gear_type: resolve(FieldKind::GearType),
        vessel_type: resolve(FieldKind::VesselType),
    }
}

/// Fold field checks and batch-wide duplicate warnings into an outcome.
///
/// Blocking problems are a missing name and an unknown flag. Everything
/// else is a warning, and warnings never lift a record out of `ERROR`.
pub fn classify(checks: &FieldChecks, duplicate_warnings: &[FieldIssue]) -> ValidationOutcome {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut resolved = BTreeMap::new();

    if !checks.name_present {
        errors.push(FieldIssue::new(
            IssueKind::MissingName,
            fields::VESSEL_NAME,
            "missing vessel name",
        ));
    }

    let imo_normalized = match &checks.imo {
        Ok(normalized) => normalized.clone(),
        Err(reason) => {
            warnings.push(FieldIssue::new(
                IssueKind::InvalidImo,
                fields::IMO,
                reason.to_string(),
            ));
            None
        }
    };

    for kind in FieldKind::ALL {
        let field = checks.resolution(kind);
        match &field.result {
            Ok(Some(resolution)) => {
                if let MatchKind::Approximate { similarity } = resolution.matched_by {
                    warnings.push(fuzzy_warning(kind, &field.raw, resolution, similarity));
                }
                resolved.insert(kind, resolution.id.clone());
            }
            Ok(None) => {}
            Err(unresolved) => {
                let issue =
                    FieldIssue::new(unknown_kind(kind), kind.field_name(), unresolved.to_string());
                if kind == FieldKind::Flag {
                    errors.push(issue);
                } else {
                    warnings.push(issue);
                }
            }
        }
    }

    warnings.extend_from_slice(duplicate_warnings);
    ValidationOutcome::new(checks.row, errors, warnings, resolved, imo_normalized)
}

fn unknown_kind(kind: FieldKind) -> IssueKind {
    match kind {
        FieldKind::Flag => IssueKind::UnknownFlag,
        FieldKind::GearType => IssueKind::UnknownGearType,
        FieldKind::VesselType => IssueKind::UnknownVesselType,
    }
}

fn fuzzy_warning(
    kind: FieldKind,
    original: &str,
    resolution: &Resolution,
    similarity: f64,
) -> FieldIssue {
    FieldIssue::new(
        IssueKind::GearFuzzyMatch,
        kind.field_name(),
        format!(
            "{} '{original}' matched '{}' (similarity {similarity:.2})",
            kind.label(),
            resolution.code
        ),
    )
    .with_detail(IssueDetail::FuzzyMatch {
        original: original.to_string(),
        matched: resolution.code.clone(),
        similarity,
    })
}

#[cfg(test)]
mod tests {
    use vessel_model::{RecordStatus, ReferenceId};

    use super::*;

    fn unresolved(kind: FieldKind, raw: &str) -> FieldResolution {
        FieldResolution {
            raw: raw.to_string(),
            result: Err(Unresolved {
                kind,
                raw: raw.to_string(),
            }),
        }
    }

    fn blank() -> FieldResolution {
        FieldResolution {
            raw: String::new(),
            result: Ok(None),
        }
    }

    fn clean_checks() -> FieldChecks {
        FieldChecks {
            row: RowIndex(3),
            name_present: true,
            imo: Ok(Some("9074729".to_string())),
            flag: FieldResolution {
                raw: "GBR".to_string(),
                result: Ok(Some(Resolution {
                    id: ReferenceId::new("c-gbr").unwrap(),
                    code: "GBR".to_string(),
                    matched_by: MatchKind::Exact,
                })),
            },
            gear_type: blank(),
            vessel_type: blank(),
        }
    }

    #[test]
    fn clean_record_is_valid() {
        let outcome = classify(&clean_checks(), &[]);
        assert_eq!(outcome.status(), RecordStatus::Valid);
        assert_eq!(outcome.row(), RowIndex(3));
        assert_eq!(outcome.imo_normalized(), Some("9074729"));
        assert_eq!(
            outcome.resolved_id(FieldKind::Flag).map(ReferenceId::as_str),
            Some("c-gbr")
        );
        assert!(outcome.resolved_id(FieldKind::GearType).is_none());
    }

    #[test]
    fn bad_imo_and_unknown_gear_are_warnings() {
        let mut checks = clean_checks();
        checks.imo = Err(InvalidImo::WrongLength { length: 5 });
        checks.gear_type = unresolved(FieldKind::GearType, "XYZ");
        let outcome = classify(&checks, &[]);
        assert_eq!(outcome.status(), RecordStatus::Warning);
        let kinds: Vec<_> = outcome.warnings().iter().map(|w| w.kind).collect();
        assert_eq!(kinds, vec![IssueKind::InvalidImo, IssueKind::UnknownGearType]);
        assert!(outcome.imo_normalized().is_none());
    }

    #[test]
    fn unknown_flag_blocks() {
        let mut checks = clean_checks();
        checks.flag = unresolved(FieldKind::Flag, "XXX");
        let outcome = classify(&checks, &[]);
        assert_eq!(outcome.status(), RecordStatus::Error);
        assert_eq!(outcome.errors()[0].kind, IssueKind::UnknownFlag);
        assert_eq!(outcome.errors()[0].message, "unknown flag code: XXX");
    }

    #[test]
    fn duplicates_never_lift_an_error() {
        let mut checks = clean_checks();
        checks.name_present = false;
        let duplicate = FieldIssue::new(IssueKind::DuplicateImo, fields::IMO, "IMO shared");
        let outcome = classify(&checks, std::slice::from_ref(&duplicate));
        assert_eq!(outcome.status(), RecordStatus::Error);
        assert_eq!(outcome.warnings(), &[duplicate]);
    }

    #[test]
    fn fuzzy_match_warns_with_audit_detail() {
        let mut checks = clean_checks();
        checks.gear_type = FieldResolution {
            raw: "LONGLINES".to_string(),
            result: Ok(Some(Resolution {
                id: ReferenceId::new("g-ll").unwrap(),
                code: "LONGLINE".to_string(),
                matched_by: MatchKind::Approximate { similarity: 0.75 },
            })),
        };
        let outcome = classify(&checks, &[]);
        assert_eq!(outcome.status(), RecordStatus::Warning);
        assert_eq!(
            outcome.resolved_id(FieldKind::GearType).map(ReferenceId::as_str),
            Some("g-ll")
        );
        let warning = &outcome.warnings()[0];
        assert_eq!(warning.kind, IssueKind::GearFuzzyMatch);
        assert_eq!(
            warning.message,
            "gear type 'LONGLINES' matched 'LONGLINE' (similarity 0.75)"
        );
    }
}
