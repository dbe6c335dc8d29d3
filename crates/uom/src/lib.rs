//! Unit-of-measure conversion engine.
//!
//! Converts quantities between arbitrary units via a graph of pairwise
//! conversion factors, supporting multi-hop derived conversions
//! (BOX → DOZEN → EACH) and per-tenant factor overrides layered over global
//! defaults. Implemented purely as deterministic domain logic (no IO, no
//! HTTP, no storage): callers load the record snapshot, build a
//! [`ConversionGraph`], and resolve conversions against that value.
//!
//! The graph is rebuilt in full whenever the underlying record set changes;
//! it is never patched incrementally and never cached across snapshots.

pub mod convert;
pub mod graph;
pub mod record;
pub mod unit;

pub use convert::ConversionError;
pub use graph::ConversionGraph;
pub use record::{ConversionRecord, ConversionScope};
pub use unit::{UnitCode, UnitFamily, UnitOfMeasure};
