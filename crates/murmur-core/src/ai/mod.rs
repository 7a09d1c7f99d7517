//! External text-generation abstraction.

pub mod generator;

pub use generator::TextGenerator;
