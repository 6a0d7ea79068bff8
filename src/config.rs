//! JSON attribute sets for [`crate::view::RoundedImageView`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{MaskError, MaskResult};
use crate::view::ScaleType;

/// Declarative view attributes.
///
/// ```json
/// { "corner_radius": 12.0, "scale_type": "center_crop", "width": 200, "height": 120 }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewAttrs {
    pub corner_radius: f64,
    pub scale_type: ScaleType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ViewAttrs {
    /// Parse attributes from a JSON reader. The result is not validated.
    pub fn from_reader<R: std::io::Read>(r: R) -> MaskResult<Self> {
        serde_json::from_reader(r).map_err(|e| MaskError::serde(format!("parse view attrs JSON: {e}")))
    }

    pub fn from_json_str(s: &str) -> MaskResult<Self> {
        serde_json::from_str(s).map_err(|e| MaskError::serde(format!("parse view attrs JSON: {e}")))
    }

    /// Parse attributes from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MaskResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MaskError::validation(format!("open view attrs JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> MaskResult<()> {
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(MaskError::validation(format!(
                "corner_radius must be finite and >= 0, got {}",
                self.corner_radius
            )));
        }
        if self.width == Some(0) || self.height == Some(0) {
            return Err(MaskError::validation("width/height must be > 0"));
        }
        if self.width.is_some() != self.height.is_some() {
            return Err(MaskError::validation(
                "width and height must be given together",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
