//! School Fee Engine
//!
//! This crate prices a student's school fees month by month from a class and
//! session fee schedule, decides when late fees apply, builds payment
//! submissions, and reconciles paid and due months for reporting.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
