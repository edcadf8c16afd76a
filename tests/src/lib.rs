//! Out-of-crate test suite, mirroring each workspace member with its
//! own module so a failure reads as "engine::engine_tests" rather than
//! an anonymous integration binary.

pub mod core;
pub mod engine;
pub mod frontend;
pub mod integration;
