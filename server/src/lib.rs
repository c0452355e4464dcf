//! RideLens server library
//!
//! Computes per-driver trip analytics from four related tables using either
//! a single joined query or a multi-query fan-out merged in memory.

pub mod api;
mod app;
pub mod core;
pub mod data;
pub mod domain;
