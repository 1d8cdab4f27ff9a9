//! Plotting properties on the interactive map.

use serde::{Deserialize, Serialize};

use super::properties_model::{Property, PropertyPhase};

/// Initial map center (longitude, latitude): the continental US.
pub const DEFAULT_MAP_CENTER: (f64, f64) = (-100.5284, 35.014);

/// Initial zoom level for the map view.
pub const DEFAULT_MAP_ZOOM: f64 = 3.5;

/// A geocoded property ready for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub property_id: String,
    pub market_id: Option<String>,
    pub label: String,
    pub lat: f64,
    pub lng: f64,
    pub phase: PropertyPhase,
}

/// Map points for every property with both coordinates, in input order.
pub fn map_points(properties: &[Property]) -> Vec<MapPoint> {
    properties
        .iter()
        .filter_map(|property| {
            let (lat, lng) = property.coordinates()?;
            Some(MapPoint {
                property_id: property.id.clone(),
                market_id: property.market_id.clone(),
                label: property.display_name().to_string(),
                lat,
                lng,
                phase: property.phase,
            })
        })
        .collect()
}
