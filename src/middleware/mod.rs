pub mod gate;

pub use gate::{session_gate, SessionContext};
