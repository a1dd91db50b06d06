//! Core engine services
//!
//! Currently configuration loading; the home for future cross-cutting
//! services that are neither physics nor foundation utilities.

pub mod config;
