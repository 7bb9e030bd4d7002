pub mod companion;
pub mod git;
pub mod platform;
pub mod preconditions;
pub mod prompt;
pub mod runner;
