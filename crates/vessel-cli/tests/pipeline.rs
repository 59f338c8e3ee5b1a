//! Integration tests for the batch pipeline.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tempfile::tempdir;

use vessel_cli::config::QcConfig;
use vessel_cli::pipeline::{
    BatchRequest, LoadStatus, ReferenceSource, StagingTarget, load_references, run_batch,
};

fn write_references(dir: &Path) {
    fs::write(
        dir.join("country_iso.csv"),
        "id,alpha_3_code,alpha_2_code\n1,GBR,GB\n2,NOR,NO\n",
    )
    .unwrap();
    fs::write(
        dir.join("gear_types_fao.csv"),
        "id,fao_isscfg_code\n10,LONGLINE\n11,OTB\n",
    )
    .unwrap();
    fs::write(
        dir.join("vessel_types.csv"),
        "id,vessel_type_isscfv_code,vessel_type_isscfv_alpha\n20,07.1.0,LL\n",
    )
    .unwrap();
}

/// `good` rows with a name and flag, then `bad` rows without a name.
fn write_batch(path: &Path, good: usize, bad: usize) {
    let mut csv = String::from("vessel_name,imo,flag_code,gear_type,vessel_type\n");
    for row in 0..good {
        writeln!(csv, "VESSEL {row},,UK,LONGLINES,LL").unwrap();
    }
    for _ in 0..bad {
        csv.push_str(",,GBR,OTB,\n");
    }
    fs::write(path, csv).unwrap();
}

#[test]
fn accepted_batch_is_staged_and_reported() {
    let dir = tempdir().unwrap();
    write_references(dir.path());
    let input = dir.path().join("vessels.csv");
    write_batch(&input, 92, 8);
    let db = dir.path().join("staging.db");

    let result = run_batch(&BatchRequest {
        input: input.clone(),
        references: ReferenceSource::Directory(dir.path().to_path_buf()),
        target: StagingTarget::Database(db.clone()),
        report_path: None,
        config: QcConfig::default(),
    })
    .unwrap();

    assert!(result.succeeded());
    assert_eq!(result.report.warning, 92);
    assert_eq!(result.report.error, 8);
    match &result.load {
        LoadStatus::Loaded(summary) => assert_eq!(summary.written, 92),
        other => panic!("unexpected load status: {other:?}"),
    }

    let conn = Connection::open(&db).unwrap();
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM vessel_staging_validated", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(rows, 92);

    let report_path = dir.path().join("vessels.csv.validation_report.json");
    assert_eq!(result.report_path, report_path);
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["threshold_met"], true);
    assert_eq!(json["report"]["warnings_by_type"]["GEAR_FUZZY_MATCH"], 92);
}

#[test]
fn refused_batch_still_writes_report() {
    let dir = tempdir().unwrap();
    write_references(dir.path());
    let input = dir.path().join("vessels.csv");
    write_batch(&input, 20, 80);
    let db = dir.path().join("staging.db");
    let report_path = dir.path().join("reports").join("batch.json");

    let result = run_batch(&BatchRequest {
        input,
        references: ReferenceSource::Directory(dir.path().to_path_buf()),
        target: StagingTarget::Database(db.clone()),
        report_path: Some(report_path.clone()),
        config: QcConfig::default(),
    })
    .unwrap();

    assert!(!result.succeeded());
    assert!(matches!(
        result.load,
        LoadStatus::Refused {
            accepted: 20,
            total: 100,
            ..
        }
    ));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["report"]["error"], 80);
    assert_eq!(json["threshold_met"], false);

    assert!(!db.exists());
}

#[test]
fn refused_batch_leaves_existing_database_untouched() {
    let dir = tempdir().unwrap();
    write_references(dir.path());
    let input = dir.path().join("vessels.csv");
    write_batch(&input, 1, 2);
    let db = dir.path().join("staging.db");
    Connection::open(&db)
        .unwrap()
        .execute_batch("CREATE TABLE unrelated (id INTEGER);")
        .unwrap();

    let result = run_batch(&BatchRequest {
        input,
        references: ReferenceSource::Directory(dir.path().to_path_buf()),
        target: StagingTarget::Database(db.clone()),
        report_path: None,
        config: QcConfig::default(),
    })
    .unwrap();
    assert!(matches!(result.load, LoadStatus::Refused { .. }));

    let conn = Connection::open(&db).unwrap();
    let staging_tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE name = 'vessel_staging_validated'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(staging_tables, 0);
}

#[test]
fn dry_run_reports_verdict_without_staging() {
    let dir = tempdir().unwrap();
    write_references(dir.path());
    let input = dir.path().join("vessels.csv");
    write_batch(&input, 10, 0);

    let result = run_batch(&BatchRequest {
        input,
        references: ReferenceSource::Directory(dir.path().to_path_buf()),
        target: StagingTarget::DryRun,
        report_path: None,
        config: QcConfig::default(),
    })
    .unwrap();
    assert_eq!(result.load, LoadStatus::Skipped { threshold_met: true });
}

#[test]
fn references_load_from_sqlite() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("refs.db");
    let conn = Connection::open(&db).unwrap();
    conn.execute_batch(
        "CREATE TABLE country_iso (id INTEGER, alpha_3_code TEXT, alpha_2_code TEXT);
         CREATE TABLE gear_types_fao (id INTEGER, fao_isscfg_code TEXT);
         CREATE TABLE vessel_types (id INTEGER, vessel_type_isscfv_code TEXT, vessel_type_isscfv_alpha TEXT);
         INSERT INTO country_iso VALUES (1, 'GBR', 'GB');",
    )
    .unwrap();
    drop(conn);

    let set = load_references(&ReferenceSource::Database(db)).unwrap();
    assert_eq!(set.flags.len(), 1);
    assert!(set.gear_types.is_empty());
}

#[test]
fn reference_source_needs_a_location() {
    assert!(ReferenceSource::resolve(None, None).is_err());
    assert_eq!(
        ReferenceSource::resolve(Some(Path::new("refs")), Some(Path::new("db.sqlite"))).unwrap(),
        ReferenceSource::Directory("refs".into())
    );
}
