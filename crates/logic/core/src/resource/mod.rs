//! Resource model: the rechargeable ledger and its consumable pool view.
//!
//! Kind enumerations live in `logic-graph` (the data model references them
//! from requirement leaves); this module owns the numeric state and the
//! consumption semantics.
mod ledger;

pub use ledger::ResourceLedger;
