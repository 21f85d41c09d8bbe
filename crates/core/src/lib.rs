//! Core business logic for RAO.
//!
//! This crate contains pure business logic with ZERO web or IO dependencies.
//! Every function here is a synchronous, side-effect-free transformation of
//! the record sets it is handed; malformed input degrades to defaults
//! instead of failing.
//!
//! # Modules
//!
//! - `budget` - Budget items, obligations, per-category aggregation and detail join
//! - `funding` - Funding types (PS, MOOE, CO) and active record set selection
//! - `dates` - Display and CSV date normalization
//! - `export` - CSV export of the category breakdown with obligation details

pub mod budget;
pub mod dates;
pub mod export;
pub mod funding;
