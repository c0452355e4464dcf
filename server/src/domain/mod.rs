//! Domain logic

pub mod analytics;
