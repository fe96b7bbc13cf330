// Reusable library API, visible to the CLI binaries and integration tests
pub mod errors;
mod free;
pub mod generator;
pub mod grid;
mod intersecting;
pub mod log;
pub mod placement;
pub mod rng;
pub mod wordlist;
