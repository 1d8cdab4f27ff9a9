//! Property domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::UNTITLED_PROPERTY;
use crate::entity::{non_blank, EntityType, Timestamped};
use crate::errors::{Error, Result, ValidationError};

/// Lifecycle stage of a property, from site selection to disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PropertyPhase {
    #[default]
    SiteSelection,
    UnderContract,
    DueDiligence,
    Closing,
    Closed,
    Owned,
    Leased,
    Sold,
}

impl PropertyPhase {
    pub const ALL: [PropertyPhase; 8] = [
        PropertyPhase::SiteSelection,
        PropertyPhase::UnderContract,
        PropertyPhase::DueDiligence,
        PropertyPhase::Closing,
        PropertyPhase::Closed,
        PropertyPhase::Owned,
        PropertyPhase::Leased,
        PropertyPhase::Sold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyPhase::SiteSelection => "site_selection",
            PropertyPhase::UnderContract => "under_contract",
            PropertyPhase::DueDiligence => "due_diligence",
            PropertyPhase::Closing => "closing",
            PropertyPhase::Closed => "closed",
            PropertyPhase::Owned => "owned",
            PropertyPhase::Leased => "leased",
            PropertyPhase::Sold => "sold",
        }
    }

    /// Display label, e.g. "Under Contract".
    pub fn label(&self) -> &'static str {
        match self {
            PropertyPhase::SiteSelection => "Site Selection",
            PropertyPhase::UnderContract => "Under Contract",
            PropertyPhase::DueDiligence => "Due Diligence",
            PropertyPhase::Closing => "Closing",
            PropertyPhase::Closed => "Closed",
            PropertyPhase::Owned => "Owned",
            PropertyPhase::Leased => "Leased",
            PropertyPhase::Sold => "Sold",
        }
    }
}

impl fmt::Display for PropertyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyPhase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PropertyPhase::ALL
            .into_iter()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| {
                ValidationError::InvalidInput(format!("Unknown property phase '{}'", s)).into()
            })
    }
}

/// A site tracked through the acquisition pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Property {
    pub id: String,
    /// Owning market. May reference a market that no longer exists.
    #[serde(default)]
    pub market_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub address_line: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub size_sqft: Option<f64>,
    #[serde(default)]
    pub base_rent_psf: Option<f64>,
    #[serde(default)]
    pub expenses_psf: Option<f64>,
    #[serde(default, deserialize_with = "crate::utils::lenient::deserialize_or_default")]
    pub phase: PropertyPhase,
    #[serde(default)]
    pub display_number: Option<i32>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Title, falling back to the street address, then to a placeholder.
    pub fn display_name(&self) -> &str {
        non_blank(self.title.as_deref())
            .or_else(|| non_blank(self.address_line.as_deref()))
            .unwrap_or(UNTITLED_PROPERTY)
    }

    /// Both coordinates, when the property has been geocoded.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

impl Timestamped for Property {
    const ENTITY_TYPE: EntityType = EntityType::Property;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Input model for creating a new property.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewProperty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_sqft: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_rent_psf: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses_psf: Option<f64>,
    #[serde(default)]
    pub phase: PropertyPhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_number: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewProperty {
    pub fn validate(&self) -> Result<()> {
        validate_figures(
            self.lat,
            self.lng,
            [
                ("size_sqft", self.size_sqft),
                ("base_rent_psf", self.base_rent_psf),
                ("expenses_psf", self.expenses_psf),
            ],
        )
    }
}

/// Partial update for an existing property. `None` fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PropertyUpdate {
    #[serde(default, skip_serializing)]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_sqft: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_rent_psf: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses_psf: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<PropertyPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_number: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PropertyUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            return Err(ValidationError::InvalidInput(
                "Property ID is required for updates".to_string(),
            )
            .into());
        }
        validate_figures(
            self.lat,
            self.lng,
            [
                ("size_sqft", self.size_sqft),
                ("base_rent_psf", self.base_rent_psf),
                ("expenses_psf", self.expenses_psf),
            ],
        )
    }
}

fn validate_figures(
    lat: Option<f64>,
    lng: Option<f64>,
    figures: [(&str, Option<f64>); 3],
) -> Result<()> {
    if let Some(lat) = lat {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ValidationError::InvalidInput(format!(
                "Latitude {} is outside [-90, 90]",
                lat
            ))
            .into());
        }
    }
    if let Some(lng) = lng {
        if !(-180.0..=180.0).contains(&lng) {
            return Err(ValidationError::InvalidInput(format!(
                "Longitude {} is outside [-180, 180]",
                lng
            ))
            .into());
        }
    }
    for (field, value) in figures {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidInput(format!(
                    "'{}' must be a non-negative number",
                    field
                ))
                .into());
            }
        }
    }
    Ok(())
}
