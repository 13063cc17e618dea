//! Configuration loading for the school fee engine.
//!
//! This module loads a school's fee schedules from YAML files, one file per
//! academic session, together with the school's metadata.
//!
//! # Example
//!
//! ```no_run
//! use school_fee_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/demo_school").unwrap();
//! println!("Loaded school: {}", config.school().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{FeeScheduleFile, SchoolConfig, SchoolMetadata};
