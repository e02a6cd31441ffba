//! The dua record set: model, the built-in records and TOML data files.
//!
//! Records are loaded once at startup and never mutated afterwards.

mod builtin;
mod load;
mod model;

pub use builtin::builtin_duas;
pub use load::{load_catalog, validate};
pub use model::{Dua, IconKind};

#[cfg(test)]
mod tests;
