//! Markets module - domain models, territory catalog, services, and traits.

mod markets_model;
mod markets_service;
mod markets_traits;
pub mod territory;


pub use markets_model::{Market, MarketUpdate, NewMarket};
pub use markets_service::MarketService;
pub use markets_traits::{MarketRepositoryTrait, MarketServiceTrait};
pub use territory::{sample_counties, state_name, Territory, US_STATES};
