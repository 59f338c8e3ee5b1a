//! Reference table rows and their storage layout.

use serde::{Deserialize, Serialize};

use vessel_model::{FieldKind, ReferenceId};

/// Where a reference kind lives in the relational store.
///
/// The CSV loader reads `<table>.csv` with the same column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub kind: FieldKind,
    pub table: &'static str,
    pub id_column: &'static str,
    pub code_column: &'static str,
    pub secondary_column: Option<&'static str>,
}

pub const FLAG_TABLE: TableSpec = TableSpec {
    kind: FieldKind::Flag,
    table: "country_iso",
    id_column: "id",
    code_column: "alpha_3_code",
    secondary_column: Some("alpha_2_code"),
};

pub const GEAR_TYPE_TABLE: TableSpec = TableSpec {
    kind: FieldKind::GearType,
    table: "gear_types_fao",
    id_column: "id",
    code_column: "fao_isscfg_code",
    secondary_column: None,
};

pub const VESSEL_TYPE_TABLE: TableSpec = TableSpec {
    kind: FieldKind::VesselType,
    table: "vessel_types",
    id_column: "id",
    code_column: "vessel_type_isscfv_code",
    secondary_column: Some("vessel_type_isscfv_alpha"),
};

pub const TABLE_SPECS: [TableSpec; 3] = [FLAG_TABLE, GEAR_TYPE_TABLE, VESSEL_TYPE_TABLE];

/// One row of a reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub id: ReferenceId,
    /// Canonical code (e.g. ISO alpha-3 for flags).
    pub code: String,
    /// Alternate short code (ISO alpha-2 for flags, ISSCFV alpha for vessel types).
    pub secondary_code: Option<String>,
}

impl ReferenceEntry {
    pub fn new(id: ReferenceId, code: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            secondary_code: None,
        }
    }

    #[must_use]
    pub fn with_secondary(mut self, code: impl Into<String>) -> Self {
        self.secondary_code = Some(code.into());
        self
    }
}

/// Rows of one reference kind, in source order.
///
/// Order is significant: approximate matching breaks ties by first-seen row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTable {
    kind: FieldKind,
    entries: Vec<ReferenceEntry>,
}

impl ReferenceTable {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn push(&mut self, entry: ReferenceEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All reference tables needed for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSet {
    pub flags: ReferenceTable,
    pub gear_types: ReferenceTable,
    pub vessel_types: ReferenceTable,
}

impl Default for ReferenceSet {
    fn default() -> Self {
        Self {
            flags: ReferenceTable::new(FieldKind::Flag),
            gear_types: ReferenceTable::new(FieldKind::GearType),
            vessel_types: ReferenceTable::new(FieldKind::VesselType),
        }
    }
}

impl ReferenceSet {
    pub fn table(&self, kind: FieldKind) -> &ReferenceTable {
        match kind {
            FieldKind::Flag => &self.flags,
            FieldKind::GearType => &self.gear_types,
            FieldKind::VesselType => &self.vessel_types,
        }
    }

    pub fn table_mut(&mut self, kind: FieldKind) -> &mut ReferenceTable {
        match kind {
            FieldKind::Flag => &mut self.flags,
            FieldKind::GearType => &mut self.gear_types,
            FieldKind::VesselType => &mut self.vessel_types,
        }
    }
}
