//! Seeded synthetic vector sources.

mod errors;
mod numeric;

pub use errors::SyntheticError;
pub use numeric::{Anisotropy, GaussianBlobConfig, SyntheticConfig, SyntheticSource};
