use vessel_model::{
    DuplicateKind, FieldKind, IssueKind, RecordStatus, ReferenceId, RowIndex, ValidationOptions,
    VesselRecord, fields,
};
use vessel_reference::{ReferenceEntry, ReferenceIndex, ReferenceSet};
use vessel_validate::{ReferenceResolver, validate_batch};

fn id(value: &str) -> ReferenceId {
    ReferenceId::new(value).unwrap()
}

fn reference_index() -> ReferenceIndex {
    let mut set = ReferenceSet::default();
    set.flags
        .push(ReferenceEntry::new(id("c-gbr"), "GBR").with_secondary("GB"));
    set.flags
        .push(ReferenceEntry::new(id("c-nor"), "NOR").with_secondary("NO"));
    set.gear_types.push(ReferenceEntry::new(id("g-ll"), "LONGLINE"));
    set.gear_types.push(ReferenceEntry::new(id("g-otb"), "OTB"));
    set.vessel_types
        .push(ReferenceEntry::new(id("v-ll"), "07.1.0").with_secondary("LL"));
    ReferenceIndex::build(&set)
}

fn vessel(row: usize, name: &str, imo: &str, flag: &str, gear: &str) -> VesselRecord {
    VesselRecord::new(RowIndex(row))
        .with_field(fields::VESSEL_NAME, name)
        .with_field(fields::IMO, imo)
        .with_field(fields::FLAG_CODE, flag)
        .with_field(fields::GEAR_TYPE, gear)
}

#[test]
fn mixed_batch_classification() {
    let index = reference_index();
    let options = ValidationOptions::default();
    let resolver = ReferenceResolver::new(&index, &options);

    let records = vec![
        vessel(0, "ASTRID", "9074729", "NOR", "OTB"),
        vessel(1, "BRIGHT STAR", "", "UK", "LONGLINES"),
        vessel(2, "", "1234567", "GBR", ""),
        vessel(3, "CORMORANT", "12345", "XX", "TRAWLZ"),
        vessel(4, "DAWN", "", "gb", "").with_field(fields::VESSEL_TYPE, "ll"),
    ];
    let batch = validate_batch(&records, &resolver);
    let statuses: Vec<_> = batch.outcomes.iter().map(|o| o.status()).collect();
    assert_eq!(
        statuses,
        vec![
            RecordStatus::Valid,
            RecordStatus::Warning,
            RecordStatus::Error,
            RecordStatus::Error,
            RecordStatus::Valid,
        ]
    );

    let fuzzy = &batch.outcomes[1];
    assert_eq!(fuzzy.warnings()[0].kind, IssueKind::GearFuzzyMatch);
    assert_eq!(
        fuzzy.resolved_id(FieldKind::GearType).map(ReferenceId::as_str),
        Some("g-ll")
    );
    assert_eq!(
        fuzzy.resolved_id(FieldKind::Flag).map(ReferenceId::as_str),
        Some("c-gbr")
    );

    let missing_name = &batch.outcomes[2];
    assert_eq!(missing_name.errors()[0].kind, IssueKind::MissingName);
    assert_eq!(missing_name.imo_normalized(), Some("1234567"));

    let kinds: Vec<_> = batch.outcomes[3]
        .errors()
        .iter()
        .chain(batch.outcomes[3].warnings())
        .map(|issue| issue.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            IssueKind::UnknownFlag,
            IssueKind::InvalidImo,
            IssueKind::UnknownGearType
        ]
    );

    assert_eq!(
        batch.outcomes[4]
            .resolved_id(FieldKind::VesselType)
            .map(ReferenceId::as_str),
        Some("v-ll")
    );
}

#[test]
fn duplicates_are_merged_as_warnings() {
    let index = reference_index();
    let options = ValidationOptions::default();
    let resolver = ReferenceResolver::new(&index, &options);

    let records = vec![
        vessel(0, "ASTRID", "9074729", "NOR", ""),
        vessel(1, "ASTRID II", "9074729", "NOR", ""),
        vessel(2, "", "9074729", "NOR", ""),
        vessel(3, "HERON", "", "GBR", ""),
    ];
    let batch = validate_batch(&records, &resolver);

    assert_eq!(batch.duplicates.len(), 1);
    assert_eq!(batch.duplicates[0].kind, DuplicateKind::ImoDuplicate);
    assert_eq!(batch.duplicates[0].count, 3);

    assert_eq!(batch.outcomes[0].status(), RecordStatus::Warning);
    assert_eq!(batch.outcomes[0].warnings()[0].kind, IssueKind::DuplicateImo);
    assert_eq!(batch.outcomes[2].status(), RecordStatus::Error);
    assert_eq!(batch.outcomes[2].warnings().len(), 1);
    assert_eq!(batch.outcomes[3].status(), RecordStatus::Valid);
}

#[test]
fn repeated_bad_imo_is_not_a_duplicate() {
    let index = reference_index();
    let options = ValidationOptions::default();
    let resolver = ReferenceResolver::new(&index, &options);

    let records = vec![
        vessel(0, "ASTRID", "12345", "NOR", ""),
        vessel(1, "HERON", "12345", "GBR", ""),
    ];
    let batch = validate_batch(&records, &resolver);

    assert!(batch.duplicates.is_empty());
    for outcome in &batch.outcomes {
        assert_eq!(outcome.status(), RecordStatus::Warning);
        assert_eq!(outcome.warnings().len(), 1);
        assert_eq!(outcome.warnings()[0].kind, IssueKind::InvalidImo);
    }
}

#[test]
fn classification_is_idempotent_and_ordered() {
    let index = reference_index();
    let options = ValidationOptions::default();
    let resolver = ReferenceResolver::new(&index, &options);

    let records: Vec<_> = (0..500)
        .map(|row| {
            let name = if row % 7 == 0 { "" } else { "VESSEL" };
            let flag = if row % 11 == 0 { "ZZZ" } else { "GBR" };
            vessel(row, name, &format!("{:07}", row), flag, "LONGLINE")
        })
        .collect();

    let first = validate_batch(&records, &resolver);
    let second = validate_batch(&records, &resolver);
    assert_eq!(first, second);

    let rows: Vec<_> = first.outcomes.iter().map(|o| o.row()).collect();
    let expected: Vec<_> = (0..500).map(RowIndex).collect();
    assert_eq!(rows, expected);
}
