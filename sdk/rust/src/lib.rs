//! Minimal Rust client for the Economic Data API.

pub mod client;

pub use client::EconomicDataClient;
