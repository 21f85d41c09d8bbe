//! Common types used across the application.

pub mod id;
pub mod lenient;
pub mod money;

pub use id::*;
pub use money::Money;
