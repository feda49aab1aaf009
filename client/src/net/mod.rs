//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the shared backend contract over `fetch`. Wire types live
//! in the core crate.

pub mod api;
