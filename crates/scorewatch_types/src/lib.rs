pub mod binning;
pub mod error;
pub mod metrics;
pub mod psi;
pub mod table;
pub mod util;

pub use binning::*;
pub use metrics::*;
pub use psi::*;
pub use table::*;
pub use util::*;
