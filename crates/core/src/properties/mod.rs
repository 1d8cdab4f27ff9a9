//! Properties module - domain models, map projection, services, and traits.

pub mod map;
mod properties_model;
mod properties_service;
mod properties_traits;


pub use map::{map_points, MapPoint, DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM};
pub use properties_model::{NewProperty, Property, PropertyPhase, PropertyUpdate};
pub use properties_service::PropertyService;
pub use properties_traits::{PropertyRepositoryTrait, PropertyServiceTrait};
