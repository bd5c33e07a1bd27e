//! AIQO Backend Library
//!
//! The local runtime around the pure domain in `aiqo-shared`: configuration,
//! persistence, the daily session, timers and export.

pub mod config;
pub mod error;
pub mod repositories;
pub mod services;
pub mod state;
pub mod storage;
pub mod timers;
