//! Configuration types for school fee schedules.
//!
//! This module contains the structures deserialized from a school's YAML
//! configuration files, and the assembled [`SchoolConfig`].

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::calculation::FeeScheduleIndex;
use crate::models::FeeLineItemRecord;

/// Metadata about the school, from `school.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SchoolMetadata {
    /// Short school code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Session used when a request does not name one (e.g. "2024-25").
    pub current_session: String,
}

/// One session's fee schedule file, from `fee_schedules/<session>.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeScheduleFile {
    /// The session every item in this file belongs to.
    pub session: String,
    /// Raw line items; items without a `session` inherit the file's.
    #[serde(default)]
    pub items: Vec<FeeLineItemRecord>,
}

/// The complete school configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct SchoolConfig {
    metadata: SchoolMetadata,
    schedules: BTreeMap<String, FeeScheduleIndex>,
}

impl SchoolConfig {
    /// Creates a new SchoolConfig from its component parts.
    pub fn new(metadata: SchoolMetadata, schedules: BTreeMap<String, FeeScheduleIndex>) -> Self {
        Self {
            metadata,
            schedules,
        }
    }

    /// Returns the school metadata.
    pub fn school(&self) -> &SchoolMetadata {
        &self.metadata
    }

    /// Returns the fee schedules keyed by session (sorted).
    pub fn schedules(&self) -> &BTreeMap<String, FeeScheduleIndex> {
        &self.schedules
    }
}
