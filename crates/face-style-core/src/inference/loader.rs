//! Safetensors weight loading.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use once_cell::sync::OnceCell;
use safetensors::SafeTensors;
use tracing::{debug, warn};

/// Network constructor from loaded weights.
pub type Builder<T> = fn(VarBuilder) -> Result<T>;

/// A model that is built from disk on first use.
///
/// The first outcome is cached, failures included, so a missing weights
/// file is reported once per process instead of once per image.
pub struct LazyModel<T> {
    path: PathBuf,
    device: Device,
    builder: Builder<T>,
    model: OnceCell<std::result::Result<T, String>>,
}

impl<T: Send + Sync> LazyModel<T> {
    #[must_use]
    pub fn new(path: impl AsRef<Path>, device: Device, builder: Builder<T>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            device,
            builder,
            model: OnceCell::new(),
        }
    }

    /// Path the weights are read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the model, building it on the first call.
    ///
    /// # Errors
    ///
    /// Returns the cached load error if the weights could not be read or
    /// did not match the network.
    pub fn get(&self) -> Result<&T> {
        let outcome = self.model.get_or_init(|| {
            debug!(path = %self.path.display(), "loading model");
            load_safetensors(&self.path, &self.device)
                .and_then(self.builder)
                .map_err(|e| {
                    warn!(path = %self.path.display(), error = %e, "model failed to load");
                    format!("{e:#}")
                })
        });
        outcome.as_ref().map_err(|e| anyhow!("{e}"))
    }

    /// True once a load has been attempted and succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self.model.get(), Some(Ok(_)))
    }
}

/// Reads a safetensors file into a `VarBuilder` on `device`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid safetensors.
pub fn load_safetensors(path: impl AsRef<Path>, device: &Device) -> Result<VarBuilder<'static>> {
    let path = path.as_ref();

    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read model file: {}", path.display()))?;
    let tensors = SafeTensors::deserialize(&data)
        .with_context(|| format!("Failed to parse safetensors: {}", path.display()))?;

    let tensor_map = tensors
        .tensors()
        .into_iter()
        .map(|(name, view)| {
            let dtype = to_candle_dtype(view.dtype())?;
            let tensor = Tensor::from_raw_buffer(view.data(), dtype, view.shape(), device)
                .with_context(|| format!("Failed to create tensor '{name}'"))?;
            Ok((name, tensor))
        })
        .collect::<Result<HashMap<_, _>>>()?;

    debug!(tensors = tensor_map.len(), "safetensors loaded");
    Ok(VarBuilder::from_tensors(tensor_map, DType::F32, device))
}

fn to_candle_dtype(dtype: safetensors::Dtype) -> Result<DType> {
    use safetensors::Dtype as S;
    Ok(match dtype {
        S::F32 => DType::F32,
        S::F64 => DType::F64,
        S::F16 => DType::F16,
        S::BF16 => DType::BF16,
        S::I64 => DType::I64,
        S::U8 => DType::U8,
        S::U32 => DType::U32,
        other => anyhow::bail!("Unsupported dtype: {other:?}"),
    })
}
