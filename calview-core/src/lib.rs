//! Core engine for the calview ecosystem.
//!
//! This crate provides everything the CLI renders from:
//! - `Event` and related types for calendar events
//! - `calendar` for the .ics directory store
//! - `grid` for month/week/day geometry and event placement
//! - `nav` and `view` for moving between periods

pub mod calendar;
pub mod calview;
pub mod calview_config;
pub mod clock;
pub mod error;
pub mod event;
pub mod grid;
pub mod ics;
pub mod labels;
pub mod nav;
pub mod view;

// Re-export all event types at crate root for convenience
pub use event::*;
