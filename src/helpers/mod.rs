//! User-supplied helper libraries
//!
//! A helper library is a native dynamic library exporting a versioned C ABI.
//! Contracts ([`HelperContract`]) name the functions a caller needs; the
//! loader checks them before handing out a [`HelperModule`].

mod path;
mod plugin;

pub use path::get_abs_path;
pub use plugin::{
    load_helpers, ActivationHelpers, HelperContract, HelperModule, ABI_VERSION_SYMBOL,
    HELPER_ABI_VERSION,
};
