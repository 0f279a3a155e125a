pub mod quantile;

pub use quantile::*;
