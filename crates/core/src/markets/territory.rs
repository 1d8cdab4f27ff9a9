//! Geographic scope of a market: selected US states and per-state counties.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{Result, ValidationError};

/// Two-letter code and display name of every US state.
pub static US_STATES: [(&str, &str); 50] = [
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// Largest counties of the states with a county catalog.
static SAMPLE_COUNTIES: [(&str, [&str; 5]); 10] = [
    ("CA", ["Los Angeles", "San Diego", "Orange", "Riverside", "San Bernardino"]),
    ("TX", ["Harris", "Dallas", "Tarrant", "Bexar", "Travis"]),
    ("NY", ["Kings", "Queens", "New York", "Suffolk", "Bronx"]),
    ("FL", ["Miami-Dade", "Broward", "Palm Beach", "Hillsborough", "Orange"]),
    ("IL", ["Cook", "DuPage", "Lake", "Will", "Kane"]),
    ("PA", ["Allegheny", "Philadelphia", "Montgomery", "Bucks", "Delaware"]),
    ("OH", ["Cuyahoga", "Franklin", "Hamilton", "Summit", "Montgomery"]),
    ("GA", ["Fulton", "Gwinnett", "Cobb", "DeKalb", "Clayton"]),
    ("NC", ["Mecklenburg", "Wake", "Guilford", "Forsyth", "Cumberland"]),
    ("MI", ["Wayne", "Oakland", "Macomb", "Kent", "Genesee"]),
];

/// Display name for a state code, if the code is known.
pub fn state_name(code: &str) -> Option<&'static str> {
    US_STATES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

/// Catalogued counties for a state. Empty for states without a catalog.
pub fn sample_counties(code: &str) -> &'static [&'static str] {
    SAMPLE_COUNTIES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, counties)| counties.as_slice())
        .unwrap_or(&[])
}

/// Selected states plus optional county lists keyed by state code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Territory {
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub counties: BTreeMap<String, Vec<String>>,
}

impl Territory {
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains_state(&self, code: &str) -> bool {
        self.states.iter().any(|s| s == code)
    }

    /// Selects or deselects a state. Deselecting drops its counties.
    pub fn toggle_state(&mut self, code: &str) {
        if self.contains_state(code) {
            self.states.retain(|s| s != code);
            self.counties.remove(code);
        } else {
            self.states.push(code.to_string());
        }
    }

    /// Selects or deselects a county within an already selected state.
    ///
    /// Returns false, leaving the territory unchanged, if the state is not selected.
    pub fn toggle_county(&mut self, state: &str, county: &str) -> bool {
        if !self.contains_state(state) {
            return false;
        }
        let counties = self.counties.entry(state.to_string()).or_default();
        if let Some(pos) = counties.iter().position(|c| c == county) {
            counties.remove(pos);
            if counties.is_empty() {
                self.counties.remove(state);
            }
        } else {
            counties.push(county.to_string());
        }
        true
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(unknown) = self.states.iter().find(|s| state_name(s).is_none()) {
            return Err(ValidationError::InvalidInput(format!(
                "Unknown state code '{}' in territory",
                unknown
            ))
            .into());
        }
        if let Some(orphan) = self.counties.keys().find(|k| !self.contains_state(k)) {
            return Err(ValidationError::InvalidInput(format!(
                "Counties listed for unselected state '{}'",
                orphan
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_lookup() {
        assert_eq!(state_name("CA"), Some("California"));
        assert_eq!(state_name("wy"), Some("Wyoming"));
        assert_eq!(state_name("ZZ"), None);
        assert_eq!(sample_counties("TX")[0], "Harris");
        assert!(sample_counties("VT").is_empty());
    }

    #[test]
    fn test_deselecting_state_drops_its_counties() {
        let mut territory = Territory::default();
        territory.toggle_state("CA");
        assert!(territory.toggle_county("CA", "Orange"));
        assert_eq!(territory.counties["CA"], vec!["Orange".to_string()]);

        territory.toggle_state("CA");
        assert!(territory.states.is_empty());
        assert!(territory.counties.is_empty());
    }

    #[test]
    fn test_toggle_county_requires_selected_state() {
        let mut territory = Territory::default();
        assert!(!territory.toggle_county("TX", "Travis"));
        assert!(territory.counties.is_empty());

        territory.toggle_state("TX");
        territory.toggle_county("TX", "Travis");
        territory.toggle_county("TX", "Travis");
        assert!(!territory.counties.contains_key("TX"));
    }

    #[test]
    fn test_validate_rejects_unknown_and_orphaned_entries() {
        let unknown = Territory {
            states: vec!["XX".to_string()],
            counties: BTreeMap::new(),
        };
        assert!(unknown.validate().is_err());

        let mut orphaned = Territory {
            states: vec!["GA".to_string()],
            counties: BTreeMap::new(),
        };
        orphaned
            .counties
            .insert("FL".to_string(), vec!["Broward".to_string()]);
        assert!(orphaned.validate().is_err());

        orphaned.toggle_state("FL");
        assert!(orphaned.validate().is_ok());
    }

    #[test]
    fn test_deserialization_defaults_missing_fields() {
        let territory: Territory =
            serde_json::from_str(r#"{"states":["CA","TX"],"counties":{"CA":["Orange","Kern"]}}"#)
                .unwrap();
        assert!(territory.contains_state("TX"));
        assert_eq!(territory.counties["CA"].len(), 2);

        let empty: Territory = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
