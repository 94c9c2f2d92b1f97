//! Static property propagation.
//!
//! Re-derives the Never/Always/Free/Relevant classification of every graph
//! object whenever the rule configuration changes. The flags live in side
//! tables owned by [`AppliedLogic`], never on the shared graph, so a
//! half-applied configuration is unrepresentable.
mod flags;
mod pass;

pub use flags::FlagSet;
pub use pass::{AppliedLogic, StaticFlags};
