pub mod error;
pub mod psi;
pub mod utils;

pub use error::DriftError;
pub use psi::*;
pub use utils::*;
