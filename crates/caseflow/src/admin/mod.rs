//! Administration surface: master data and per-case-type configuration.

pub mod casetype;
pub mod masterdata;
