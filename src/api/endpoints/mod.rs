//! API endpoint handlers.
//!
//! Handlers are thin: decode, call into `intelligence`, wrap the result.

pub mod bmi;
pub mod health;
pub mod index;
pub mod predict;
