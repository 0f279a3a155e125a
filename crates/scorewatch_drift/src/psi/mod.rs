pub mod drift;
pub mod monitor;

pub use drift::*;
pub use monitor::*;
