//! Translation handlers.

mod translator;

pub use translator::Translator;
