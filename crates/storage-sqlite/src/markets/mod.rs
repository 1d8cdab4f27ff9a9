//! SQLite storage implementation for markets.

mod model;
mod repository;

pub use model::{MarketChangesetDB, MarketDB};
pub use repository::MarketRepository;
