//! The parish/town taxonomy used to scope non-GPS location search.
//!
//! Jamaica has exactly 14 parishes; each carries the named towns a seeker can
//! pick from when no device position is available.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parish {
    pub name: String,
    /// Parish capital, shown as the default town in scoped search.
    pub capital: String,
    pub towns: Vec<String>,
}

impl Parish {
    /// Generate a URL-safe slug from the parish name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}

#[derive(Debug, Deserialize)]
pub struct ParishesFile {
    pub parishes: Vec<Parish>,
}

/// Jamaica's parish count is fixed; a catalogue with any other count is a
/// config error, not a variant to support.
pub const PARISH_COUNT: usize = 14;

/// Load and validate the parish taxonomy from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_parishes(path: &Path) -> Result<ParishesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParishesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let parishes_file: ParishesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::ParishesFileParse)?;

    validate_parishes(&parishes_file)?;

    Ok(parishes_file)
}

/// Find the parish containing the given town, case-insensitively.
#[must_use]
pub fn parish_of_town<'a>(file: &'a ParishesFile, town: &str) -> Option<&'a Parish> {
    let needle = town.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    file.parishes
        .iter()
        .find(|p| p.towns.iter().any(|t| t.to_lowercase() == needle))
}

fn validate_parishes(parishes_file: &ParishesFile) -> Result<(), ConfigError> {
    if parishes_file.parishes.len() != PARISH_COUNT {
        return Err(ConfigError::Validation(format!(
            "expected {PARISH_COUNT} parishes, found {}",
            parishes_file.parishes.len()
        )));
    }

    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for parish in &parishes_file.parishes {
        if parish.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "parish name must be non-empty".to_string(),
            ));
        }

        if parish.towns.is_empty() {
            return Err(ConfigError::Validation(format!(
                "parish '{}' has no towns",
                parish.name
            )));
        }

        let capital = parish.capital.to_lowercase();
        if !parish.towns.iter().any(|t| t.to_lowercase() == capital) {
            return Err(ConfigError::Validation(format!(
                "parish '{}' does not list its capital '{}' among its towns",
                parish.name, parish.capital
            )));
        }

        let lower_name = parish.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate parish name: '{}'",
                parish.name
            )));
        }

        let slug = parish.slug();
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate parish slug: '{}' (from parish '{}')",
                slug, parish.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parish(name: &str, capital: &str, towns: &[&str]) -> Parish {
        Parish {
            name: name.to_string(),
            capital: capital.to_string(),
            towns: towns.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    /// A syntactically valid 14-entry catalogue for validation tests.
    fn full_catalogue() -> ParishesFile {
        let names = [
            "Kingston",
            "St. Andrew",
            "St. Thomas",
            "Portland",
            "St. Mary",
            "St. Ann",
            "Trelawny",
            "St. James",
            "Hanover",
            "Westmoreland",
            "St. Elizabeth",
            "Manchester",
            "Clarendon",
            "St. Catherine",
        ];
        ParishesFile {
            parishes: names
                .iter()
                .map(|n| parish(n, "Townville", &["Townville"]))
                .collect(),
        }
    }

    #[test]
    fn slug_simple_name() {
        let p = parish("Portland", "Port Antonio", &["Port Antonio"]);
        assert_eq!(p.slug(), "portland");
    }

    #[test]
    fn slug_abbreviated_saint() {
        let p = parish("St. Andrew", "Half Way Tree", &["Half Way Tree"]);
        // The '.' is stripped, the space becomes a dash
        assert_eq!(p.slug(), "st-andrew");
    }

    #[test]
    fn slug_keeps_existing_dashes() {
        let p = parish("Savanna-la-Mar Area", "Savanna-la-Mar", &["Savanna-la-Mar"]);
        assert_eq!(p.slug(), "savanna-la-mar-area");
    }

    #[test]
    fn validate_rejects_wrong_parish_count() {
        let mut file = full_catalogue();
        file.parishes.pop();
        let err = validate_parishes(&file).unwrap_err();
        assert!(err.to_string().contains("expected 14 parishes"));
    }

    #[test]
    fn validate_rejects_parish_without_towns() {
        let mut file = full_catalogue();
        file.parishes[3].towns.clear();
        let err = validate_parishes(&file).unwrap_err();
        assert!(err.to_string().contains("has no towns"));
    }

    #[test]
    fn validate_rejects_capital_missing_from_towns() {
        let mut file = full_catalogue();
        file.parishes[0].capital = "Somewhere Else".to_string();
        let err = validate_parishes(&file).unwrap_err();
        assert!(err.to_string().contains("does not list its capital"));
    }

    #[test]
    fn validate_rejects_duplicate_name() {
        let mut file = full_catalogue();
        file.parishes[1].name = "kingston".to_string();
        let err = validate_parishes(&file).unwrap_err();
        assert!(err.to_string().contains("duplicate parish name"));
    }

    #[test]
    fn parish_of_town_is_case_insensitive() {
        let file = ParishesFile {
            parishes: vec![
                parish("St. James", "Montego Bay", &["Montego Bay", "Cambridge"]),
                parish("St. Ann", "St. Ann's Bay", &["St. Ann's Bay", "Ocho Rios"]),
            ],
        };
        let found = parish_of_town(&file, "ocho rios").unwrap();
        assert_eq!(found.name, "St. Ann");
        assert!(parish_of_town(&file, "Port Antonio").is_none());
        assert!(parish_of_town(&file, "   ").is_none());
    }

    #[test]
    fn load_parishes_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("parishes.yaml");
        assert!(
            path.exists(),
            "parishes.yaml missing at {path:?}; required for this test"
        );
        let result = load_parishes(&path);
        assert!(result.is_ok(), "failed to load parishes.yaml: {result:?}");
        let file = result.unwrap();
        assert_eq!(file.parishes.len(), PARISH_COUNT);

        let st_james = parish_of_town(&file, "Montego Bay").unwrap();
        assert_eq!(st_james.name, "St. James");
    }
}
