//! Client domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entity::{EntityType, Timestamped};
use crate::errors::{Error, Result, ValidationError};

/// Commercial relationship with a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClientType {
    #[default]
    Franchise,
    Corporate,
    OneOff,
}

impl ClientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Franchise => "franchise",
            ClientType::Corporate => "corporate",
            ClientType::OneOff => "one_off",
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "franchise" => Ok(ClientType::Franchise),
            "corporate" => Ok(ClientType::Corporate),
            "one_off" => Ok(ClientType::OneOff),
            other => Err(ValidationError::InvalidInput(format!("Unknown client type '{}'", other)).into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
    Prospect,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "active",
            ClientStatus::Inactive => "inactive",
            ClientStatus::Prospect => "prospect",
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(ClientStatus::Active),
            "inactive" => Ok(ClientStatus::Inactive),
            "prospect" => Ok(ClientStatus::Prospect),
            other => Err(ValidationError::InvalidInput(format!("Unknown client status '{}'", other)).into()),
        }
    }
}

/// A franchisor, corporate tenant or one-off buyer that owns markets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "crate::utils::lenient::deserialize_or_default")]
    pub client_type: ClientType,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::lenient::deserialize_or_default")]
    pub status: ClientStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Timestamped for Client {
    const ENTITY_TYPE: EntityType = EntityType::Client;

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

/// Input model for creating a new client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewClient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub client_type: ClientType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ClientStatus,
}

impl NewClient {
    /// Validates the new client data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        validate_email(self.email.as_deref())
    }
}

/// Partial update for an existing client. `None` fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientUpdate {
    #[serde(default, skip_serializing)]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_type: Option<ClientType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ClientStatus>,
}

impl ClientUpdate {
    /// Validates the client update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            return Err(ValidationError::InvalidInput(
                "Client ID is required for updates".to_string(),
            )
            .into());
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ValidationError::InvalidInput(
                    "Client name cannot be empty".to_string(),
                )
                .into());
            }
        }
        validate_email(self.email.as_deref())
    }
}

/// Rejects addresses that are present but obviously not an email.
pub(crate) fn validate_email(email: Option<&str>) -> Result<()> {
    match email.map(str::trim) {
        Some(value) if !value.is_empty() && !value.contains('@') => Err(
            ValidationError::InvalidInput(format!("'{}' is not a valid email address", value))
                .into(),
        ),
        _ => Ok(()),
    }
}
