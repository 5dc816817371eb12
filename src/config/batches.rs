//! Batch seed configuration loading from config.toml
//!
//! A deployment describes its cohorts (name, timing, seat capacity) in a TOML
//! file; on startup, batches that are not yet in the database are inserted.
//! Batches that already exist are left untouched so their remaining-seat
//! counters survive restarts.

use crate::entities::{Batch, batch};
use crate::errors::{Error, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of batch configurations to seed
    pub batches: Vec<BatchConfig>,
}

/// Configuration for a single batch
#[derive(Debug, Deserialize, Clone)]
pub struct BatchConfig {
    /// Name of the batch
    pub name: String,
    /// Timeslot label (e.g., "09:00-11:00")
    pub timing: String,
    /// Initial seat capacity
    pub seats: i32,
}

/// Loads batch configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads batch configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}

/// Inserts every configured batch that does not already exist (matched by
/// name). Returns the number of batches inserted.
pub async fn seed_initial_batches(db: &DatabaseConnection, config: &Config) -> Result<usize> {
    let mut inserted = 0;

    for batch_config in &config.batches {
        let existing = Batch::find()
            .filter(batch::Column::Name.eq(batch_config.name.clone()))
            .one(db)
            .await?;

        if existing.is_some() {
            continue;
        }

        if batch_config.seats < 0 {
            return Err(Error::Config {
                message: format!("Batch '{}' has negative seat capacity", batch_config.name),
            });
        }

        batch::ActiveModel {
            name: Set(batch_config.name.clone()),
            timing: Set(batch_config.timing.clone()),
            remaining_seats: Set(batch_config.seats),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(name = %batch_config.name, seats = batch_config.seats, "Seeded batch");
        inserted += 1;
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[test]
    fn test_parse_batch_config() {
        let toml_str = r#"
            [[batches]]
            name = "Morning A"
            timing = "09:00-11:00"
            seats = 30

            [[batches]]
            name = "Evening B"
            timing = "17:00-19:00"
            seats = 25
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.batches.len(), 2);
        assert_eq!(config.batches[0].name, "Morning A");
        assert_eq!(config.batches[0].seats, 30);
        assert_eq!(config.batches[1].timing, "17:00-19:00");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result: std::result::Result<Config, _> = toml::from_str("[[batches]]\nname = 1");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_seed_initial_batches() -> Result<()> {
        let db = setup_test_db().await?;
        let config = Config {
            batches: vec![
                BatchConfig {
                    name: "Morning A".to_string(),
                    timing: "09:00-11:00".to_string(),
                    seats: 30,
                },
                BatchConfig {
                    name: "Evening B".to_string(),
                    timing: "17:00-19:00".to_string(),
                    seats: 25,
                },
            ],
        };

        let inserted = seed_initial_batches(&db, &config).await?;
        assert_eq!(inserted, 2);

        let all = Batch::find().all(&db).await?;
        assert_eq!(all.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_preserves_existing_seat_counts() -> Result<()> {
        let db = setup_test_db().await?;
        let config = Config {
            batches: vec![BatchConfig {
                name: "Morning A".to_string(),
                timing: "09:00-11:00".to_string(),
                seats: 30,
            }],
        };

        seed_initial_batches(&db, &config).await?;

        // Simulate registrations consuming seats
        let existing = Batch::find().one(&db).await?.unwrap();
        let mut active: batch::ActiveModel = existing.into();
        active.remaining_seats = Set(12);
        active.update(&db).await?;

        // Re-seeding must not reset the counter or duplicate the batch
        let inserted = seed_initial_batches(&db, &config).await?;
        assert_eq!(inserted, 0);

        let all = Batch::find().all(&db).await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].remaining_seats, 12);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_rejects_negative_capacity() -> Result<()> {
        let db = setup_test_db().await?;
        let config = Config {
            batches: vec![BatchConfig {
                name: "Broken".to_string(),
                timing: "00:00-00:00".to_string(),
                seats: -1,
            }],
        };

        let result = seed_initial_batches(&db, &config).await;
        assert!(matches!(result, Err(Error::Config { .. })));
        Ok(())
    }
}
