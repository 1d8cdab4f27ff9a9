//! Reporting module - aggregation views and the weekly change feed.
//!
//! Nothing here is persisted. Every view is recomputed from the current
//! collections on each request.

pub mod aggregation;
mod reporting_model;
mod reporting_service;
mod reporting_traits;
pub mod weekly_updates;


pub use aggregation::{
    clients_with_details, count_properties_by_market, dashboard_stats, markets_with_details,
};
pub use reporting_model::*;
pub use reporting_service::ReportingService;
pub use reporting_traits::ReportingServiceTrait;
pub use weekly_updates::weekly_updates;
