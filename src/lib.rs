//! Forecast TUI - current conditions and a 7-day temperature chart
//!
//! The library exposes the app's modules so the binary and tests share them.

pub mod action;
pub mod api;
pub mod chart;
pub mod components;
pub mod effect;
pub mod icon;
pub mod reducer;
pub mod state;
