//! API route handlers

pub mod drivers;
pub mod health;
