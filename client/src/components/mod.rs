//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome and the generation workflow while reading
//! and writing shared state from Leptos context providers.

pub mod generate_panel;
pub mod nav_bar;
pub mod notice_banner;
pub mod thumbnail_card;
