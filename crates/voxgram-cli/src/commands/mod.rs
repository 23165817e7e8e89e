pub mod check;
pub mod dump;
pub mod grammar_loader;
pub mod interpret;
pub mod matching;
pub mod trace;

#[cfg(test)]
mod grammar_loader_tests;
