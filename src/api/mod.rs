mod coingecko;

pub use coingecko::RateClient;
