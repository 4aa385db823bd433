//! Native helper plugins loaded at runtime

use super::path::get_abs_path;
use crate::error::{Error, Result};
use libloading::Library;
use ndarray::{Array, Dimension};
use std::ffi::c_void;
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// ABI revision a helper library must report through [`ABI_VERSION_SYMBOL`]
pub const HELPER_ABI_VERSION: u32 = 1;

/// `extern "C" fn() -> u32` exported by every helper library
pub const ABI_VERSION_SYMBOL: &str = "snn_helper_abi_version";

/// Set of functions a helper library must export
pub trait HelperContract: Sized {
    /// Symbols checked before [`HelperContract::bind`] is called
    const REQUIRED_SYMBOLS: &'static [&'static str];

    /// Resolve the contract's functions from `library`, loaded from `path`
    ///
    /// # Safety
    ///
    /// The library's exports must have the signatures the contract expects.
    /// Bound function pointers are only valid while `library` is loaded.
    unsafe fn bind(library: &Library, path: &Path) -> Result<Self>;
}

/// A loaded helper library with its bound contract
///
/// Dereferences to the contract. The library stays loaded for the lifetime
/// of this value.
pub struct HelperModule<C> {
    helpers: C,
    path: PathBuf,
    // Dropped after `helpers`
    _library: Library,
}

impl<C> HelperModule<C> {
    /// Resolved location of the loaded library
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<C> Deref for HelperModule<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.helpers
    }
}

impl<C> std::fmt::Debug for HelperModule<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelperModule")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Load a helper library and bind contract `C`
///
/// `filepath` is resolved with [`get_abs_path`]; a file name without an
/// extension gets the platform's dynamic-library extension (`so`, `dylib`,
/// `dll`).
///
/// # Safety
///
/// Loading runs the library's initialisation code, and the library must
/// honour contract `C`. Only load libraries built for this toolbox.
pub unsafe fn load_helpers<C: HelperContract>(
    filepath: impl AsRef<Path>,
    working_dir: impl AsRef<Path>,
) -> Result<HelperModule<C>> {
    let (dir, file_name) = get_abs_path(filepath, working_dir)?;
    let mut path = dir.join(&file_name);
    if Path::new(&file_name).extension().is_none() {
        path.set_extension(std::env::consts::DLL_EXTENSION);
    }

    if !path.is_file() {
        return Err(Error::HelperNotFound { path });
    }

    tracing::debug!(path = %path.display(), "loading helper library");
    let library = Library::new(&path).map_err(|e| Error::HelperLoad {
        path: path.clone(),
        message: e.to_string(),
    })?;

    for &symbol in std::iter::once(&ABI_VERSION_SYMBOL).chain(C::REQUIRED_SYMBOLS) {
        if library.get::<*const c_void>(symbol.as_bytes()).is_err() {
            return Err(Error::MissingSymbol {
                symbol: symbol.to_string(),
                path,
            });
        }
    }

    let abi_version = library
        .get::<unsafe extern "C" fn() -> u32>(ABI_VERSION_SYMBOL.as_bytes())
        .map_err(|e| Error::HelperLoad {
            path: path.clone(),
            message: e.to_string(),
        })?;
    let found = abi_version();
    if found != HELPER_ABI_VERSION {
        return Err(Error::HelperAbiMismatch {
            expected: HELPER_ABI_VERSION,
            found,
        });
    }

    let helpers = C::bind(&library, &path)?;
    tracing::debug!(path = %path.display(), abi = found, "helper library bound");

    Ok(HelperModule {
        helpers,
        path,
        _library: library,
    })
}

/// Helper library exporting a custom scalar activation
///
/// Expected export: `extern "C" fn snn_helper_activation(x: f32) -> f32`.
#[derive(Debug, Clone, Copy)]
pub struct ActivationHelpers {
    activation: unsafe extern "C" fn(f32) -> f32,
}

impl ActivationHelpers {
    pub const ACTIVATION_SYMBOL: &'static str = "snn_helper_activation";

    pub fn apply(&self, x: f32) -> f32 {
        // Signature checked by `bind`; the owning HelperModule keeps the library loaded
        unsafe { (self.activation)(x) }
    }

    pub fn apply_array<D: Dimension>(&self, x: &Array<f32, D>) -> Array<f32, D> {
        x.mapv(|v| self.apply(v))
    }
}

impl HelperContract for ActivationHelpers {
    const REQUIRED_SYMBOLS: &'static [&'static str] = &[Self::ACTIVATION_SYMBOL];

    unsafe fn bind(library: &Library, path: &Path) -> Result<Self> {
        let activation = library
            .get::<unsafe extern "C" fn(f32) -> f32>(Self::ACTIVATION_SYMBOL.as_bytes())
            .map_err(|_| Error::MissingSymbol {
                symbol: Self::ACTIVATION_SYMBOL.to_string(),
                path: path.to_path_buf(),
            })?;
        Ok(Self {
            activation: *activation,
        })
    }
}
