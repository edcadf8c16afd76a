mod compile_tests;
mod eval_tests;
