//! Core types and trait definitions for the Closet outfit tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; storage and weather lookups are reached
//! only through the [`store::OutfitStore`] and [`weather::WeatherSource`]
//! traits.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod outfit;
pub mod recommend;
pub mod store;
pub mod view;
pub mod wear;
pub mod weather;

pub use error::{Error, Result};
