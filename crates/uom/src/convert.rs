use std::collections::{HashSet, VecDeque};

use thiserror::Error;

use unitforge_core::UomId;

use crate::graph::ConversionGraph;

/// Why a conversion request could not be resolved.
///
/// Both variants mean "not convertible" and carry the same handling contract
/// for callers (present an actionable message, never default to a 1:1
/// factor); the distinction only lets the message name the precise cause.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConversionError {
    /// The endpoint id is absent from the graph entirely. An absent node is,
    /// by construction, unreachable.
    #[error("unknown unit: {unit}")]
    UnknownUnit { unit: UomId },

    /// Both endpoints are known but not connected by any chain of factors.
    #[error("no conversion path from {from} to {to}")]
    NoPath { from: UomId, to: UomId },
}

impl ConversionGraph {
    /// Convert `qty` from one unit to another.
    ///
    /// Breadth-first search from `from`, composing the multiplicative product
    /// of edge factors along the first discovered path; the result is
    /// `qty * composed_factor` in plain f64 arithmetic with no rounding
    /// (rounding is a caller/display concern). Zero or negative quantities
    /// pass through the same multiplication unmodified.
    ///
    /// `from == to`, or two ids carrying the same normalized code in the
    /// alias index, short-circuits to `qty` unchanged without touching the
    /// graph; identity holds on an empty graph too.
    ///
    /// When multiple paths connect the endpoints with disagreeing composed
    /// factors (a direct tenant override next to a multi-hop default), the
    /// first-discovered path wins: BFS fixes a node's factor at first
    /// discovery, so fewest hops win and ties fall to adjacency insertion
    /// order. Repeated identical calls against the same graph, and against a
    /// graph rebuilt from the same input sequence, return the same answer. No
    /// disagreement detection is attempted.
    pub fn convert(&self, qty: f64, from: UomId, to: UomId) -> Result<f64, ConversionError> {
        if self.is_alias(from, to) {
            return Ok(qty);
        }
        if !self.contains_unit(from) {
            return Err(ConversionError::UnknownUnit { unit: from });
        }
        if !self.contains_unit(to) {
            return Err(ConversionError::UnknownUnit { unit: to });
        }
        match self.compose_factor(from, to) {
            Some(factor) => Ok(qty * factor),
            None => Err(ConversionError::NoPath { from, to }),
        }
    }

    /// Non-failing variant of [`Self::convert`] for quick-test UI flows:
    /// `None` where `convert` would fail.
    pub fn try_convert(&self, qty: f64, from: UomId, to: UomId) -> Option<f64> {
        self.convert(qty, from, to).ok()
    }

    /// Unit aliasing: same id, or same normalized code in the alias index.
    fn is_alias(&self, from: UomId, to: UomId) -> bool {
        if from == to {
            return true;
        }
        match (self.id_to_code.get(&from), self.id_to_code.get(&to)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// BFS over the adjacency map, accumulating the product of edge factors.
    ///
    /// The visited set guarantees termination: the graph always contains
    /// cycles because every edge has an implicit reverse.
    fn compose_factor(&self, from: UomId, to: UomId) -> Option<f64> {
        let mut visited: HashSet<UomId> = HashSet::new();
        let mut queue: VecDeque<(UomId, f64)> = VecDeque::new();
        visited.insert(from);
        queue.push_back((from, 1.0));

        while let Some((unit, acc)) = queue.pop_front() {
            if unit == to {
                return Some(acc);
            }
            let Some(edges) = self.adjacency.get(&unit) else {
                continue;
            };
            for edge in edges {
                if visited.insert(edge.to) {
                    queue.push_back((edge.to, acc * edge.factor));
                }
            }
        }
        None
    }
}
