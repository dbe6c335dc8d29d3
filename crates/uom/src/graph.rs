use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use unitforge_core::UomId;

use crate::record::ConversionRecord;
use crate::unit::{UnitCode, UnitOfMeasure};

/// One directed edge of the conversion graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ConversionEdge {
    pub(crate) to: UomId,
    pub(crate) factor: f64,
}

/// Derived, in-memory conversion graph for one tenant/session context.
///
/// Nodes are every unit id appearing in a retained record; each retained
/// record contributes its directed edge plus a synthetic reverse edge with
/// factor `1/f` (conversion is always invertible). The graph is a plain
/// owned value: build one per snapshot, discard it when the record set
/// changes, never mutate it in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionGraph {
    pub(crate) adjacency: HashMap<UomId, Vec<ConversionEdge>>,
    pub(crate) code_to_id: HashMap<UnitCode, UomId>,
    pub(crate) id_to_code: HashMap<UomId, UnitCode>,
    dropped: usize,
}

impl ConversionGraph {
    /// Build a graph from the records visible to the current tenant context.
    ///
    /// `units` feeds only the code→id alias index; graph nodes come
    /// exclusively from the records. Per ordered pair `(from, to)` a
    /// tenant-scoped record wins over the global one outright (replaced, not
    /// merged); within equal precedence the last record wins. Malformed
    /// records (missing unit id, non-positive or non-finite factor or
    /// reciprocal, self-conversion) are dropped silently with a debug log and a bump of
    /// [`Self::dropped_records`]; upstream UI validates before submission.
    ///
    /// Pure function of its input: never fails, no side effects beyond the
    /// debug logs.
    pub fn build(units: &[UnitOfMeasure], records: &[ConversionRecord]) -> Self {
        let mut code_to_id: HashMap<UnitCode, UomId> = HashMap::new();
        let mut id_to_code: HashMap<UomId, UnitCode> = HashMap::new();
        for unit in units {
            code_to_id.entry(unit.code.clone()).or_insert(unit.id);
            id_to_code.entry(unit.id).or_insert_with(|| unit.code.clone());
        }

        // Override resolution: one retained record per ordered pair, in
        // first-occurrence order so adjacency (and therefore BFS discovery
        // order) is stable across rebuilds from the same input.
        let mut retained: Vec<ConversionRecord> = Vec::new();
        let mut by_pair: HashMap<(UomId, UomId), usize> = HashMap::new();
        let mut dropped = 0usize;

        for record in records {
            if let Some(reason) = record.malformed_reason() {
                debug!(
                    from = %record.from_unit,
                    to = %record.to_unit,
                    factor = record.factor,
                    reason,
                    "dropping malformed conversion record"
                );
                dropped += 1;
                continue;
            }
            match by_pair.entry((record.from_unit, record.to_unit)) {
                Entry::Vacant(slot) => {
                    slot.insert(retained.len());
                    retained.push(*record);
                }
                Entry::Occupied(slot) => {
                    let current = &mut retained[*slot.get()];
                    // A tenant-scoped retention is never displaced by a
                    // global record.
                    if record.scope.is_tenant() || !current.scope.is_tenant() {
                        *current = *record;
                    }
                }
            }
        }

        let mut adjacency: HashMap<UomId, Vec<ConversionEdge>> = HashMap::new();
        for record in &retained {
            adjacency.entry(record.from_unit).or_default().push(ConversionEdge {
                to: record.to_unit,
                factor: record.factor,
            });
            adjacency.entry(record.to_unit).or_default().push(ConversionEdge {
                to: record.from_unit,
                factor: 1.0 / record.factor,
            });
        }

        Self {
            adjacency,
            code_to_id,
            id_to_code,
            dropped,
        }
    }

    /// An empty graph (no units, no edges). Identity conversions still hold.
    pub fn empty() -> Self {
        Self::build(&[], &[])
    }

    pub fn contains_unit(&self, unit: UomId) -> bool {
        self.adjacency.contains_key(&unit)
    }

    /// Number of distinct units appearing in retained records.
    pub fn unit_count(&self) -> usize {
        self.adjacency.len()
    }

    /// How many input records were dropped as malformed during the build.
    ///
    /// Diagnostics for the settings screen; resolver outcomes never depend
    /// on it.
    pub fn dropped_records(&self) -> usize {
        self.dropped
    }

    /// Resolve an external string reference to a canonical unit id via the
    /// normalized code index.
    pub fn resolve_code(&self, code: &str) -> Option<UomId> {
        let code = UnitCode::new(code).ok()?;
        self.code_to_id.get(&code).copied()
    }
}
