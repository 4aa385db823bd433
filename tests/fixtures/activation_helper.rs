//! Helper library compiled by `tests/helper_plugin.rs`
//!
//! `--cfg abi_mismatch` reports a foreign ABI revision and
//! `--cfg without_activation` drops the activation export.

#[cfg(not(abi_mismatch))]
const ABI_VERSION: u32 = 1;
#[cfg(abi_mismatch)]
const ABI_VERSION: u32 = 99;

#[no_mangle]
pub extern "C" fn snn_helper_abi_version() -> u32 {
    ABI_VERSION
}

/// Leaky ReLU with slope 0.5 below zero
#[cfg(not(without_activation))]
#[no_mangle]
pub extern "C" fn snn_helper_activation(x: f32) -> f32 {
    if x > 0.0 {
        x
    } else {
        0.5 * x
    }
}
