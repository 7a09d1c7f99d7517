//! Message routing: classify each inbound line and dispatch it to the
//! registry, the transcript store and the text generator.

pub mod classify;
pub mod dispatch;
pub mod framing;

pub use classify::classify;
pub use dispatch::MessageRouter;
