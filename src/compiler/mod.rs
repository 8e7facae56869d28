//! Front half of the toolchain: source text -> value tree -> `Process`,
//! then semantic checks and the advisory optimizer.

pub mod loader;
pub mod minimal;
pub mod optimizer;
pub mod parser;
pub mod semantic;

pub use loader::Reader;
pub use optimizer::{find_optimizations, MergeCandidate, Optimizer};
pub use parser::{parse, parse_value, parse_with};
pub use semantic::validate;
