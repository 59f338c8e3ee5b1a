use serde::{Deserialize, Serialize};

use vessel_model::{
    FieldKind, RecordStatus, ReferenceId, RowIndex, ValidationOutcome, VesselRecord, fields,
};

/// One row of the staging table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingRow {
    pub source_row: RowIndex,
    pub vessel_name: String,
    pub imo_normalized: Option<String>,
    pub flag_ref: Option<ReferenceId>,
    pub gear_type_ref: Option<ReferenceId>,
    pub vessel_type_ref: Option<ReferenceId>,
    pub status: RecordStatus,
    pub errors_json: String,
    pub warnings_json: String,
}

impl StagingRow {
    pub fn from_outcome(
        record: &VesselRecord,
        outcome: &ValidationOutcome,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            source_row: outcome.row(),
            vessel_name: record.value(fields::VESSEL_NAME).trim().to_string(),
            imo_normalized: outcome.imo_normalized().map(str::to_string),
            flag_ref: outcome.resolved_id(FieldKind::Flag).cloned(),
            gear_type_ref: outcome.resolved_id(FieldKind::GearType).cloned(),
            vessel_type_ref: outcome.resolved_id(FieldKind::VesselType).cloned(),
            status: outcome.status(),
            errors_json: serde_json::to_string(outcome.errors())?,
            warnings_json: serde_json::to_string(outcome.warnings())?,
        })
    }
}
