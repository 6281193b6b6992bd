//! Release-availability classification.
//!
//! [`classify`] labels a title from its release records and watch-provider
//! listings. [`AvailabilityService`] fetches both inputs concurrently and
//! never fails; [`ClassificationCache`] memoizes results per title.

pub mod cache;
pub mod classify;
pub mod service;

pub use cache::ClassificationCache;
pub use classify::{DEFAULT_HOME_COUNTRY, classify};
pub use service::AvailabilityService;
