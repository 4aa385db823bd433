//! SafeTensors weight loading and saving

use crate::error::{Error, Result};
use ndarray::{ArrayD, IxDyn};
use safetensors::tensor::{Dtype, TensorView};
use safetensors::SafeTensors;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// F32 tensors read from a SafeTensors file, keyed by tensor name
#[derive(Debug, Clone, Default)]
pub struct WeightFile {
    pub tensors: BTreeMap<String, ArrayD<f32>>,
    /// Names of tensors skipped because they are not F32
    pub skipped: Vec<String>,
}

/// Load every F32 tensor from a SafeTensors file
///
/// Tensors of other dtypes are listed in [`WeightFile::skipped`] and left out.
pub fn load_weights(path: impl AsRef<Path>) -> Result<WeightFile> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let tensors = SafeTensors::deserialize(&data)
        .map_err(|e| Error::Serialization(format!("SafeTensors parsing failed: {e}")))?;

    let mut names: Vec<&str> = tensors.names().into_iter().collect();
    names.sort_unstable();

    let mut weights = WeightFile::default();
    for name in names {
        let view = tensors
            .tensor(name)
            .map_err(|e| Error::Serialization(format!("Failed to get tensor {name}: {e}")))?;

        if view.dtype() != Dtype::F32 {
            tracing::debug!(tensor = name, dtype = ?view.dtype(), "skipping non-F32 tensor");
            weights.skipped.push(name.to_string());
            continue;
        }

        // Tensor data is not guaranteed to be 4-byte aligned inside the file buffer
        let values: Vec<f32> = bytemuck::pod_collect_to_vec(view.data());
        let array = ArrayD::from_shape_vec(IxDyn(view.shape()), values).map_err(|e| {
            Error::Serialization(format!("Tensor {name} has inconsistent shape: {e}"))
        })?;
        weights.tensors.insert(name.to_string(), array);
    }

    tracing::debug!(
        path = %path.display(),
        loaded = weights.tensors.len(),
        skipped = weights.skipped.len(),
        "loaded SafeTensors weights"
    );
    Ok(weights)
}

/// Write F32 tensors to a SafeTensors file, with optional string metadata
pub fn save_weights(
    tensors: &BTreeMap<String, ArrayD<f32>>,
    metadata: HashMap<String, String>,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();

    let tensor_data: Vec<(&str, Vec<u8>, Vec<usize>)> = tensors
        .iter()
        .map(|(name, array)| {
            // Logical (row-major) order regardless of memory layout
            let values: Vec<f32> = array.iter().copied().collect();
            let bytes: Vec<u8> = bytemuck::cast_slice(&values).to_vec();
            (name.as_str(), bytes, array.shape().to_vec())
        })
        .collect();

    let views = tensor_data
        .iter()
        .map(|(name, bytes, shape)| {
            TensorView::new(Dtype::F32, shape.clone(), bytes)
                .map(|view| (*name, view))
                .map_err(|e| Error::Serialization(format!("Invalid tensor {name}: {e}")))
        })
        .collect::<Result<Vec<_>>>()?;

    let metadata = (!metadata.is_empty()).then_some(metadata);
    let bytes = safetensors::serialize(views, metadata)
        .map_err(|e| Error::Serialization(format!("SafeTensors serialization failed: {e}")))?;
    std::fs::write(path, &bytes)?;

    tracing::debug!(
        path = %path.display(),
        tensors = tensors.len(),
        bytes = bytes.len(),
        "wrote SafeTensors weights"
    );
    Ok(())
}
