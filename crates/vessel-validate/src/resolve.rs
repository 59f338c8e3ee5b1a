//! Resolution of free-text reference codes to reference identifiers.

use thiserror::Error;
use tracing::debug;

use vessel_model::{FieldKind, ReferenceId, ValidationOptions};
use vessel_reference::{IndexKey, ReferenceEntry, ReferenceIndex, flag_alias};

use crate::similarity::similarity;

/// How a code was matched.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchKind {
    /// Canonical code, case-insensitive.
    Exact,
    /// Alternate short code (flag alpha-2, vessel type alpha).
    SecondaryCode,
    /// Static alias substituted before the exact lookup.
    Alias { alias: &'static str },
    /// Approximate match above the configured threshold.
    Approximate { similarity: f64 },
}

/// A successfully resolved code.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub id: ReferenceId,
    /// Canonical code of the matched row, as stored.
    pub code: String,
    pub matched_by: MatchKind,
}

impl Resolution {
    fn from_entry(entry: &ReferenceEntry, matched_by: MatchKind) -> Self {
        Self {
            id: entry.id.clone(),
            code: entry.code.clone(),
            matched_by,
        }
    }

    pub fn is_approximate(&self) -> bool {
        matches!(self.matched_by, MatchKind::Approximate { .. })
    }
}

/// A non-blank code with no matching reference row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {}: {raw}", .kind.label())]
pub struct Unresolved {
    pub kind: FieldKind,
    pub raw: String,
}

/// Resolves codes against a prebuilt [`ReferenceIndex`].
///
/// Holds only shared references, so one resolver serves every worker
/// thread of a batch.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver<'a> {
    index: &'a ReferenceIndex,
    options: &'a ValidationOptions,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(index: &'a ReferenceIndex, options: &'a ValidationOptions) -> Self {
        Self { index, options }
    }

    pub fn index(&self) -> &'a ReferenceIndex {
        self.index
    }

    /// Resolve one raw value.
    ///
    /// Blank input yields `Ok(None)`. Steps stop at the first hit: exact
    /// lookup on the upper-cased value (primary then secondary code), one
    /// alias substitution for flags, then approximate matching for gear
    /// types only.
    pub fn resolve(&self, kind: FieldKind, raw: &str) -> Result<Option<Resolution>, Unresolved> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let code = trimmed.to_uppercase();

        if let Some(resolution) = self.exact(kind, &code) {
            return Ok(Some(resolution));
        }

        if kind == FieldKind::Flag
            && let Some(canonical) = flag_alias(&code)
            && let Some(hit) = self.index.lookup(kind, canonical)
        {
            return Ok(Some(Resolution::from_entry(
                hit.entry,
                MatchKind::Alias { alias: canonical },
            )));
        }

        if kind == FieldKind::GearType
            && let Some(resolution) = self.approximate(kind, trimmed)
        {
            debug!(
                original = trimmed,
                matched = %resolution.code,
                "approximate reference match"
            );
            return Ok(Some(resolution));
        }

        Err(Unresolved {
            kind,
            raw: trimmed.to_string(),
        })
    }

    fn exact(&self, kind: FieldKind, code: &str) -> Option<Resolution> {
        let hit = self.index.lookup(kind, code)?;
        let matched_by = match hit.key {
            IndexKey::Primary => MatchKind::Exact,
            IndexKey::Secondary => MatchKind::SecondaryCode,
        };
        Some(Resolution::from_entry(hit.entry, matched_by))
    }

    /// Highest-scoring candidate strictly above the threshold; the first
    /// candidate in table order wins ties.
    fn approximate(&self, kind: FieldKind, raw: &str) -> Option<Resolution> {
        let mut best: Option<(&ReferenceEntry, f64)> = None;
        for entry in self.index.candidates(kind) {
            let score = similarity(self.options.similarity, raw, &entry.code);
            if score <= self.options.fuzzy_threshold {
                continue;
            }
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((entry, score));
            }
        }
        best.map(|(entry, score)| {
            Resolution::from_entry(entry, MatchKind::Approximate { similarity: score })
        })
    }
}
