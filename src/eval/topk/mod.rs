//! Top-k accuracy metrics
//!
//! Provides:
//! - Per-example top-k membership (`in_top_k`)
//! - Top-k accuracy over integer targets (`top_k_accuracy`)
//! - Top-k accuracy over one-hot targets (`top_k_categorical_accuracy`)

mod metrics;

#[cfg(test)]
mod tests;

pub use metrics::{in_top_k, top_k_accuracy, top_k_categorical_accuracy};
