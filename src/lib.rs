//! Snowalert: one-shot overnight snowfall check with a persistent
//! push alert when there is enough snow to shovel before work.

pub mod rules;
pub mod run;

pub use rules::{evaluate, ThresholdRule, RULES};
pub use run::{run, RunError, RunOutcome};
