//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser concerns (location, file inputs, login redirect) live here so
//! pages and components stay free of `web_sys` calls.

pub mod auth;
#[cfg(feature = "csr")]
pub mod files;
pub mod location;
