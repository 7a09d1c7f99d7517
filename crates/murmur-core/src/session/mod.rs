//! Connected-session bookkeeping.
//!
//! - `handle` -- `Session`, the id plus outbound line channel of one client
//! - `registry` -- `SessionRegistry`, the authoritative set of live sessions

pub mod handle;
pub mod registry;

pub use handle::{Outbound, Session};
pub use registry::SessionRegistry;
