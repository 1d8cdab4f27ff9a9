//! Market domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::territory::Territory;
use crate::entity::{EntityType, Timestamped};
use crate::errors::{Result, ValidationError};

/// A client's geographic market, grouping the properties pursued there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Market {
    pub id: String,
    /// Owning client. May reference a client that no longer exists.
    #[serde(default)]
    pub client_id: Option<String>,
    pub name: String,
    /// Free-form in the hosted store; documents that are not a `Territory` read as `None`.
    #[serde(default, deserialize_with = "crate::utils::lenient::deserialize_option")]
    pub territory: Option<Territory>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Timestamped for Market {
    const ENTITY_TYPE: EntityType = EntityType::Market;

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

/// Input model for creating a new market.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewMarket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub territory: Option<Territory>,
}

impl NewMarket {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        match &self.territory {
            Some(territory) => territory.validate(),
            None => Ok(()),
        }
    }
}

/// Partial update for an existing market. `None` fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MarketUpdate {
    #[serde(default, skip_serializing)]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub territory: Option<Territory>,
}

impl MarketUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            return Err(ValidationError::InvalidInput(
                "Market ID is required for updates".to_string(),
            )
            .into());
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ValidationError::InvalidInput(
                    "Market name cannot be empty".to_string(),
                )
                .into());
            }
        }
        match &self.territory {
            Some(territory) => territory.validate(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_territory_document_reads_as_none() {
        let rows = r#"[
            {"id":"m1","name":"Los Angeles","territory":{"state":"CA","counties":["Los Angeles","Orange"]},
             "created_at":"2024-06-01T00:00:00Z","updated_at":"2024-06-01T00:00:00Z"},
            {"id":"m2","name":"Austin","territory":{"states":["TX"],"counties":{"TX":["Travis"]}},
             "created_at":"2024-06-02T00:00:00Z","updated_at":"2024-06-02T00:00:00Z"},
            {"id":"m3","name":"Denver","territory":null,
             "created_at":"2024-06-03T00:00:00Z","updated_at":"2024-06-03T00:00:00Z"}
        ]"#;
        let markets: Vec<Market> = serde_json::from_str(rows).unwrap();
        assert_eq!(markets.len(), 3);
        assert_eq!(markets[0].territory, None);
        assert!(markets[1].territory.as_ref().unwrap().contains_state("TX"));
        assert_eq!(markets[2].territory, None);
    }

    #[test]
    fn test_new_market_keeps_strict_territory() {
        let input = r#"{"name":"Los Angeles","territory":{"state":"CA","counties":["Orange"]}}"#;
        assert!(serde_json::from_str::<NewMarket>(input).is_err());
    }
}
