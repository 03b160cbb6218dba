//! API handlers

pub mod health;
pub mod process;
