//! User domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::clients::validate_email;
use crate::constants::UNNAMED_USER;
use crate::entity::{non_blank, EntityType, Timestamped};
use crate::errors::{Error, Result, ValidationError};

/// Access level of a CRM user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Franchisor,
    Franchisee,
    Manager,
    Employee,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Franchisor => "franchisor",
            UserRole::Franchisee => "franchisee",
            UserRole::Manager => "manager",
            UserRole::Employee => "employee",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UserRole::Admin => "Full system access and control",
            UserRole::Franchisor => "Franchise system management and oversight",
            UserRole::Franchisee => "Individual franchise location management",
            UserRole::Manager => "Team and location management",
            UserRole::Employee => "Basic system access for daily operations",
        }
    }

    pub fn permissions(&self) -> &'static [&'static str] {
        match self {
            UserRole::Admin => &[
                "Full Access: Complete system control",
                "User Management: Create, edit, delete users",
                "System Settings: Configure application settings",
            ],
            UserRole::Franchisor => &[
                "Franchise Management: Oversee franchise operations",
                "User Management: Manage franchise users",
                "Reporting: Access to franchise analytics",
            ],
            UserRole::Franchisee => &[
                "Location Management: Manage franchise location",
                "User Management: Manage location staff",
                "Operations: Daily operational tasks",
            ],
            UserRole::Manager => &[
                "Team Management: Lead and manage team members",
                "Location Oversight: Monitor location performance",
                "Reporting: Access to team analytics",
            ],
            UserRole::Employee => &[
                "Basic Access: Perform assigned tasks",
                "Data Entry: Update relevant information",
                "Reporting: View assigned reports",
            ],
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "franchisor" => Ok(UserRole::Franchisor),
            "franchisee" => Ok(UserRole::Franchisee),
            "manager" => Ok(UserRole::Manager),
            "employee" => Ok(UserRole::Employee),
            other => Err(ValidationError::InvalidInput(format!("Unknown user role '{}'", other)).into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            other => Err(ValidationError::InvalidInput(format!("Unknown user status '{}'", other)).into()),
        }
    }
}

/// A person with access to the CRM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::lenient::deserialize_option")]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::lenient::deserialize_or_default")]
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn display_name(&self) -> &str {
        non_blank(self.full_name.as_deref()).unwrap_or(UNNAMED_USER)
    }
}

impl Timestamped for User {
    const ENTITY_TYPE: EntityType = EntityType::User;

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

/// Input model for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default)]
    pub status: UserStatus,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        validate_email(self.email.as_deref())
    }
}

/// Partial update for an existing user. `None` fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserUpdate {
    #[serde(default, skip_serializing)]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            return Err(ValidationError::InvalidInput(
                "User ID is required for updates".to_string(),
            )
            .into());
        }
        validate_email(self.email.as_deref())
    }
}
