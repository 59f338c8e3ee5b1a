use std::collections::BTreeMap;
use std::fs;

use tempfile::tempdir;

use vessel_model::{
    FieldIssue, IssueKind, RecordStatus, ReportOptions, RowIndex, ValidationOutcome,
    VesselRecord, fields,
};
use vessel_report::{
    ReportArtifact, build_report, default_report_path, sha256_file, write_report_json,
};

fn outcome(row: usize, errors: Vec<FieldIssue>, warnings: Vec<FieldIssue>) -> ValidationOutcome {
    ValidationOutcome::new(RowIndex(row), errors, warnings, BTreeMap::new(), None)
}

fn batch() -> (Vec<VesselRecord>, Vec<ValidationOutcome>) {
    let records = vec![
        VesselRecord::new(RowIndex(0))
            .with_field(fields::VESSEL_NAME, "ASTRID")
            .with_field(fields::FLAG_CODE, "NOR"),
        VesselRecord::new(RowIndex(1))
            .with_field(fields::VESSEL_NAME, "BRIGHT STAR")
            .with_field(fields::IMO, "12345"),
        VesselRecord::new(RowIndex(2))
            .with_field(fields::VESSEL_NAME, "")
            .with_field(fields::FLAG_CODE, "GBR"),
        VesselRecord::new(RowIndex(3))
            .with_field(fields::VESSEL_NAME, "CORMORANT")
            .with_field(fields::FLAG_CODE, "XX"),
    ];
    let outcomes = vec![
        outcome(0, vec![], vec![]),
        outcome(
            1,
            vec![],
            vec![FieldIssue::new(
                IssueKind::InvalidImo,
                fields::IMO,
                "invalid length: 5 digits",
            )],
        ),
        outcome(
            2,
            vec![FieldIssue::new(
                IssueKind::MissingName,
                fields::VESSEL_NAME,
                "missing vessel name",
            )],
            vec![],
        ),
        outcome(
            3,
            vec![FieldIssue::new(
                IssueKind::UnknownFlag,
                fields::FLAG_CODE,
                "unknown flag code: XX",
            )],
            vec![],
        ),
    ];
    (records, outcomes)
}

#[test]
fn report_counts_and_samples() {
    let (records, outcomes) = batch();
    let report = build_report(&records, &outcomes, &ReportOptions { sample_limit: 1 });

    assert_eq!(report.count(RecordStatus::Error), 2);
    insta::assert_json_snapshot!(report, @r#"
    {
      "total": 4,
      "valid": 1,
      "warning": 1,
      "error": 2,
      "accepted": 2,
      "validation_rate": 0.5,
      "errors_by_type": {
        "MISSING_NAME": 1,
        "UNKNOWN_FLAG": 1
      },
      "warnings_by_type": {
        "INVALID_IMO": 1
      },
      "sample_errors": [
        {
          "row": 2,
          "fields": {
            "flag_code": "GBR",
            "vessel_name": ""
          },
          "errors": [
            {
              "type": "MISSING_NAME",
              "field": "vessel_name",
              "message": "missing vessel name"
            }
          ],
          "warnings": []
        }
      ],
      "sample_warnings": [
        {
          "row": 1,
          "fields": {
            "imo": "12345",
            "vessel_name": "BRIGHT STAR"
          },
          "errors": [],
          "warnings": [
            {
              "type": "INVALID_IMO",
              "field": "imo",
              "message": "invalid length: 5 digits"
            }
          ]
        }
      ]
    }
    "#);
}

#[test]
fn report_is_idempotent() {
    let (records, outcomes) = batch();
    let options = ReportOptions::default();
    assert_eq!(
        build_report(&records, &outcomes, &options),
        build_report(&records, &outcomes, &options)
    );
}

#[test]
fn samples_are_bounded() {
    let records: Vec<_> = (0..25)
        .map(|row| VesselRecord::new(RowIndex(row)).with_field(fields::VESSEL_NAME, ""))
        .collect();
    let outcomes: Vec<_> = (0..25)
        .map(|row| {
            outcome(
                row,
                vec![FieldIssue::new(
                    IssueKind::MissingName,
                    fields::VESSEL_NAME,
                    "missing vessel name",
                )],
                vec![],
            )
        })
        .collect();

    let report = build_report(&records, &outcomes, &ReportOptions::default());
    assert_eq!(report.error, 25);
    assert_eq!(report.sample_errors.len(), 10);
    assert_eq!(report.sample_errors[9].row, RowIndex(9));
    assert_eq!(report.errors_by_type[&IssueKind::MissingName], 25);
    assert_eq!(report.validation_rate, 0.0);
}

#[test]
fn artifact_round_trips_with_source_hash() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("vessels.csv");
    fs::write(&input, "vessel_name\nASTRID\n").unwrap();

    let (records, outcomes) = batch();
    let report = build_report(&records, &outcomes, &ReportOptions::default());
    let artifact = ReportArtifact::new(report, 0.9)
        .with_source(&input)
        .unwrap();
    assert!(!artifact.threshold_met);

    let path = default_report_path(&input);
    write_report_json(&path, &artifact).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let parsed: ReportArtifact = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, artifact);
    assert_eq!(
        parsed.source_sha256.as_deref(),
        Some(sha256_file(&input).unwrap().as_str())
    );
    assert_eq!(parsed.report.error, 2);
}
