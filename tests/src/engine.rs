mod engine_tests;
mod hashset_tests;
