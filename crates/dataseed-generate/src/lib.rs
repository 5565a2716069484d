//! Seeded dataset generators for the batch jobs.
//!
//! Every generator draws from a `ChaCha8Rng` seeded by the caller, so the
//! same seed always yields the same rows. That keeps work-item keys stable
//! when a job is regenerated and resumed.

pub mod catalog;
pub mod errors;
pub mod output;
pub mod sources;
pub mod titles;
pub mod users;

pub use catalog::{CatalogOptions, Product, generate_catalog};
pub use errors::GenerationError;
pub use sources::{TitlesFileSource, UsersCsvSource};
pub use titles::{ProductTitle, TitleOptions, generate_titles};
pub use users::{UserOptions, UserRecord, UserStrategy, generate_users};
