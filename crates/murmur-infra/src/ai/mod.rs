//! Text generation through an external model command.

pub mod command;

pub use command::CommandTextGenerator;
