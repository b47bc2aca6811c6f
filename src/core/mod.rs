//! Configuration and domain models shared by both handlers

pub mod config;
pub mod models;
