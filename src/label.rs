//! Layer label parsing.
//!
//! Converted layers are labelled `<index><Name>_<d1>x<d2>x...x<dN>`, for
//! example `03Conv2D_3x32x32`: layer 3, a 2-D convolution producing a
//! `3x32x32` output.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Components of a layer label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerLabel {
    /// Position of the layer in the network, if the label carries one
    pub index: Option<u32>,
    /// Layer type with digits and one trailing `D` removed (`Conv2D` → `Conv`)
    pub name: String,
    /// Output shape; empty when the label has no dimension suffix
    pub shape: Vec<usize>,
}

/// Split a layer label into index, name and shape
///
/// ```
/// use snnkit::label::extract_label;
///
/// let label = extract_label("03Conv2D_3x32x32").unwrap();
/// assert_eq!(label.index, Some(3));
/// assert_eq!(label.name, "Conv");
/// assert_eq!(label.shape, vec![3, 32, 32]);
/// ```
pub fn extract_label(label: &str) -> Result<LayerLabel> {
    let invalid = |reason: &str| Error::InvalidLabel {
        label: label.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = label.split('_').collect();
    let head = parts[0];

    let digits_end = head
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(head.len());
    let index = match &head[..digits_end] {
        "" => None,
        digits => Some(
            digits
                .parse::<u32>()
                .map_err(|_| invalid("layer index out of range"))?,
        ),
    };

    let mut name: String = head.chars().filter(|c| !c.is_ascii_digit()).collect();
    if name.is_empty() {
        return Err(invalid("missing layer name"));
    }
    if name.ends_with('D') {
        name.pop();
    }

    let shape = if parts.len() > 1 {
        parts[parts.len() - 1]
            .split('x')
            .map(|dim| dim.parse::<usize>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| invalid("shape dimensions must be unsigned integers"))?
    } else {
        Vec::new()
    };

    Ok(LayerLabel { index, name, shape })
}

impl FromStr for LayerLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        extract_label(s)
    }
}
