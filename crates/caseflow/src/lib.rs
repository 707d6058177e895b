//! Core library for municipal case-type configuration administration.

pub mod admin;
pub mod config;
pub mod error;
pub mod telemetry;
