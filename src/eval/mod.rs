//! Model evaluation metrics
//!
//! - `topk`: top-k membership and accuracy for classifier outputs
//!
//! ## Example
//!
//! ```
//! use ndarray::array;
//! use snnkit::eval::top_k_accuracy;
//!
//! let scores = array![[0.1f32, 0.6, 0.3], [0.8, 0.15, 0.05]];
//! let acc = top_k_accuracy(scores.view(), &[2, 0], 1).unwrap();
//! assert_eq!(acc, 0.5);
//! ```

pub mod topk;

pub use topk::{in_top_k, top_k_accuracy, top_k_categorical_accuracy};
