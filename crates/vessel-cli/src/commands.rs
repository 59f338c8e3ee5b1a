use anyhow::{Result, bail};
use comfy_table::{Cell, CellAlignment, Table};

use vessel_cli::config::{ConfigOverrides, QcConfig};
use vessel_cli::pipeline::{
    BatchRequest, BatchResult, ReferenceSource, StagingTarget, load_references, run_batch,
};
use vessel_model::FieldKind;
use vessel_validate::validate_imo;

use crate::cli::{CheckImoArgs, ReferenceArgs, ValidateArgs};
use crate::summary::{apply_table_style, header_cell};

pub fn run_validate(args: &ValidateArgs) -> Result<BatchResult> {
    let overrides = ConfigOverrides {
        threshold: args.threshold,
        staging_table: args.staging_table.clone(),
        sample_limit: args.sample_limit,
    };
    let config = QcConfig::load(args.config.as_deref(), &overrides)?;
    let references =
        ReferenceSource::resolve(args.source.references.as_deref(), args.source.database.as_deref())?;
    let target = if args.dry_run {
        StagingTarget::DryRun
    } else {
        match &args.source.database {
            Some(path) => StagingTarget::Database(path.clone()),
            None => bail!(
                "staging needs a database: pass --database PATH, set VESSEL_QC_DATABASE, \
                 or use --dry-run"
            ),
        }
    };
    run_batch(&BatchRequest {
        input: args.input.clone(),
        references,
        target,
        report_path: args.report.clone(),
        config,
    })
}

pub fn run_references(args: &ReferenceArgs) -> Result<()> {
    let source = ReferenceSource::resolve(args.references.as_deref(), args.database.as_deref())?;
    let set = load_references(&source)?;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Table"), header_cell("Field"), header_cell("Rows")]);
    apply_table_style(&mut table);
    for kind in FieldKind::ALL {
        let rows = set.table(kind).len();
        table.add_row(vec![
            Cell::new(kind.label()),
            Cell::new(kind.field_name()),
            Cell::new(rows).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_check_imo(args: &CheckImoArgs) -> Result<bool> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Result"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    let mut all_valid = true;
    for value in &args.values {
        let (result, detail) = match validate_imo(value) {
            Ok(Some(normalized)) => ("valid".to_string(), normalized),
            Ok(None) => ("blank".to_string(), "-".to_string()),
            Err(reason) => {
                all_valid = false;
                ("invalid".to_string(), reason.to_string())
            }
        };
        table.add_row(vec![Cell::new(value), Cell::new(result), Cell::new(detail)]);
    }
    println!("{table}");
    Ok(all_valid)
}
