// ntagi2c/src/transport/mod.rs
//! Link to the tag: the transport trait and the simulated tag.

pub mod mock;
pub mod traits;

pub use mock::{MockTag, MockTransport, SimulatedTag};
pub use traits::{TagHandle, Technology, Transport};
