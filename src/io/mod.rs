//! File input and output
//!
//! - `json`: JSON export of result dictionaries
//! - `overwrite`: interactive overwrite confirmation
//! - `weights`: F32 tensors in SafeTensors files

mod json;
mod overwrite;
mod weights;

pub use json::{to_json, to_json_string, ExportValue};
pub use overwrite::{confirm_overwrite, confirm_overwrite_stdin};
pub use weights::{load_weights, save_weights, WeightFile};
