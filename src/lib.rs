//! Turn-by-turn score tracking for carom practice sessions.
//!
//! The engine records turns for the session in progress, keeps live
//! statistics (total, turn count, scoreless turns, moyenne), archives
//! completed sessions and rebuilds a past session's turn table and
//! cumulative-score series for inspection.

pub mod app;
pub mod catalog;
pub mod config;
pub mod db;
pub mod detail;
pub mod error;
pub mod history;
pub mod models;
pub mod render;
pub mod session;
pub mod stager;
pub mod stats;
