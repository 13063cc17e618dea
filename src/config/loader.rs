//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a school's fee
//! configuration from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::calculation::FeeScheduleIndex;
use crate::error::{EngineError, EngineResult};

use super::types::{FeeScheduleFile, SchoolConfig, SchoolMetadata};

/// Loads and provides access to a school's fee configuration.
///
/// # Directory Structure
///
/// ```text
/// config/demo_school/
/// ├── school.yaml            # School metadata and current session
/// └── fee_schedules/
///     └── 2024-25.yaml       # Fee line items for one session
/// ```
///
/// # Example
///
/// ```no_run
/// use school_fee_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/demo_school").unwrap();
/// let schedule = loader.schedule("2024-25").unwrap();
/// println!("{} line items", schedule.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SchoolConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `school.yaml` or the `fee_schedules` directory is missing
    /// - Any file contains invalid YAML
    /// - No schedule files are present
    /// - Two schedule files declare the same session
    ///
    /// Individual malformed line items are skipped, not fatal.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<SchoolMetadata>(&path.join("school.yaml"))?;
        let schedules = Self::load_schedules(&path.join("fee_schedules"))?;

        if !schedules.contains_key(&metadata.current_session) {
            warn!(
                session = %metadata.current_session,
                "Current session has no fee schedule configured"
            );
        }

        info!(
            school = %metadata.code,
            sessions = schedules.len(),
            "Loaded school fee configuration"
        );

        Ok(Self {
            config: SchoolConfig::new(metadata, schedules),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every schedule file in the schedules directory.
    fn load_schedules(dir: &Path) -> EngineResult<BTreeMap<String, FeeScheduleIndex>> {
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut schedules = BTreeMap::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let file = Self::load_yaml::<FeeScheduleFile>(&path)?;
                let session = file.session.clone();
                let records = file.items.into_iter().map(|mut record| {
                    record.session.get_or_insert_with(|| session.clone());
                    record
                });
                let index = FeeScheduleIndex::from_records(records);
                if index.skipped() > 0 {
                    warn!(
                        path = %path.display(),
                        skipped = index.skipped(),
                        "Skipped malformed fee line items"
                    );
                }
                if schedules.contains_key(&file.session) {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!(
                            "session '{}' is already declared by another schedule file",
                            file.session
                        ),
                    });
                }
                schedules.insert(file.session, index);
            }
        }

        if schedules.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no fee schedule files found)", dir_str),
            });
        }

        Ok(schedules)
    }

    /// Returns the underlying school configuration.
    pub fn config(&self) -> &SchoolConfig {
        &self.config
    }

    /// Returns the school metadata.
    pub fn school(&self) -> &SchoolMetadata {
        self.config.school()
    }

    /// The session used when none is given.
    pub fn current_session(&self) -> &str {
        &self.config.school().current_session
    }

    /// All configured sessions, sorted.
    pub fn sessions(&self) -> Vec<&str> {
        self.config.schedules().keys().map(String::as_str).collect()
    }

    /// Gets the fee schedule for a session.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SessionNotFound`] if no schedule file declared
    /// that session.
    pub fn schedule(&self, session: &str) -> EngineResult<&FeeScheduleIndex> {
        self.config
            .schedules()
            .get(session)
            .ok_or_else(|| EngineError::SessionNotFound {
                session: session.to_string(),
            })
    }
}
