//! API Routes
//!
//! Route handlers organized by functionality.

pub mod export;
pub mod health;
pub mod hits;
pub mod stats;
