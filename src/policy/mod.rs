//! Policy facts: raw input, validation, and batch loading

mod data;
mod normalize;
pub mod loader;

pub use data::{PolicyFacts, PolicyFactsInput, DEFAULT_CURRENCY};
pub use loader::{load_policy_inputs, load_policy_inputs_from_reader};
pub use normalize::normalize;
