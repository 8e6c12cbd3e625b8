//! CLI command implementations.

mod build;
mod check;
mod eval;
mod plural;
mod source;

pub use build::{BuildArgs, run_build};
pub use check::{CheckArgs, run_check};
pub use eval::{EvalArgs, run_eval};
pub use plural::{PluralArgs, run_plural};
