//! Choice gates and eligibility.
//!
//! A choice is eligible when its condition holds, its requirements are all
//! met, and its skill check passes. Locked choices are still shown, with the
//! first unmet reason in that order.

mod condition;
mod eligibility;
mod requirements;

pub use condition::Condition;
pub use eligibility::{Eligibility, UnmetReason, evaluate, is_eligible};
pub use requirements::{MissingRequirement, Requirements, SkillCheck};
