//! Decision types and rule tables shared by both hooks.

pub mod decision;
pub mod rules;

pub use decision::{Decision, ModifiedParams, Verdict};
pub use rules::{RuleCategory, RuleList};
