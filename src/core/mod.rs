//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod currency;
pub mod history;
pub mod log;
pub mod movie;
pub mod normalize;
pub mod poster;
pub mod session;

// Re-export main types for cleaner imports
pub use currency::{CurrencyRateProvider, RateError};
pub use history::SearchHistory;
pub use movie::{BoxOffice, HitStatus, LookupError, MovieMetadata, MovieProvider, MovieRecord};
pub use poster::PosterFetcher;
pub use session::Session;
