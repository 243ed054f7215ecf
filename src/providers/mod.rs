pub mod caching;
pub mod exchange_rate;
pub mod omdb;
pub mod poster;

pub use caching::CachingCurrencyRateProvider;
pub use exchange_rate::ExchangeRateApiProvider;
pub use omdb::OmdbProvider;
pub use poster::HttpPosterFetcher;
