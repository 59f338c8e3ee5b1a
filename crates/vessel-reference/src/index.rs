//! In-memory lookup structures built once per batch.

use std::collections::HashMap;

use vessel_model::FieldKind;

use crate::table::{ReferenceEntry, ReferenceSet, ReferenceTable};

/// Which index produced an exact hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKey {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy)]
pub struct ReferenceHit<'a> {
    pub entry: &'a ReferenceEntry,
    pub key: IndexKey,
}

#[derive(Debug, Clone, Default)]
struct KindIndex {
    entries: Vec<ReferenceEntry>,
    primary: HashMap<String, usize>,
    secondary: HashMap<String, usize>,
}

impl KindIndex {
    fn build(table: &ReferenceTable) -> Self {
        let entries = table.entries().to_vec();
        let mut primary = HashMap::with_capacity(entries.len());
        let mut secondary = HashMap::new();
        for (position, entry) in entries.iter().enumerate() {
            let code = entry.code.trim().to_uppercase();
            if !code.is_empty() {
                primary.entry(code).or_insert(position);
            }
            if let Some(short) = entry.secondary_code.as_deref() {
                let short = short.trim().to_uppercase();
                if !short.is_empty() {
                    secondary.entry(short).or_insert(position);
                }
            }
        }
        Self {
            entries,
            primary,
            secondary,
        }
    }
}

/// Exact-match maps and fuzzy candidate lists for every reference kind.
///
/// Immutable after [`ReferenceIndex::build`], so it can be shared across
/// worker threads for the whole batch.
#[derive(Debug, Clone)]
pub struct ReferenceIndex {
    flags: KindIndex,
    gear_types: KindIndex,
    vessel_types: KindIndex,
}

impl ReferenceIndex {
    pub fn build(set: &ReferenceSet) -> Self {
        Self {
            flags: KindIndex::build(&set.flags),
            gear_types: KindIndex::build(&set.gear_types),
            vessel_types: KindIndex::build(&set.vessel_types),
        }
    }

    fn kind(&self, kind: FieldKind) -> &KindIndex {
        match kind {
            FieldKind::Flag => &self.flags,
            FieldKind::GearType => &self.gear_types,
            FieldKind::VesselType => &self.vessel_types,
        }
    }

    /// Exact lookup of an upper-cased code: primary code first, then the
    /// secondary short code.
    pub fn lookup(&self, kind: FieldKind, code: &str) -> Option<ReferenceHit<'_>> {
        let index = self.kind(kind);
        if let Some(&position) = index.primary.get(code) {
            return Some(ReferenceHit {
                entry: &index.entries[position],
                key: IndexKey::Primary,
            });
        }
        index.secondary.get(code).map(|&position| ReferenceHit {
            entry: &index.entries[position],
            key: IndexKey::Secondary,
        })
    }

    /// Candidates for approximate matching, in source order.
    pub fn candidates(&self, kind: FieldKind) -> &[ReferenceEntry] {
        &self.kind(kind).entries
    }

    pub fn len(&self, kind: FieldKind) -> usize {
        self.kind(kind).entries.len()
    }
}
