//! Document source: API client and outline normalisation

pub mod client;
pub mod normalize;

pub use client::{Document, OutlineClient};
pub use normalize::normalize_outline;
