pub mod assembler;
pub mod conflict;
pub mod eligibility;
pub mod engine;
pub mod location;
pub mod predicate;
pub mod quota;
pub mod ranker;

pub use engine::{SearchConfig, SearchEngine, Stores};
