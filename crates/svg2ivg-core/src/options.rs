use crate::number::split_list;
use crate::{Error, Result};
use serde::Deserialize;
use std::str::FromStr;

/// Conversion settings supplied by the host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConvertOptions {
    /// Canvas width used when a root element has no `width` attribute.
    pub default_width: f64,
    /// Canvas height used when a root element has no `height` attribute.
    pub default_height: f64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            default_width: 800.0,
            default_height: 800.0,
        }
    }
}

impl ConvertOptions {
    pub fn with_default_size(mut self, size: DefaultSize) -> Self {
        self.default_width = size.width;
        self.default_height = size.height;
        self
    }
}

/// The `width,height` canvas override accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultSize {
    pub width: f64,
    pub height: f64,
}

impl FromStr for DefaultSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidDefaultSize {
            value: s.to_string(),
        };
        if !s.contains(',') {
            return Err(invalid());
        }
        let parts = split_list(s);
        let [w, h] = parts.as_slice() else {
            return Err(invalid());
        };
        let width = w.parse::<f64>().map_err(|_| invalid())?;
        let height = h.parse::<f64>().map_err(|_| invalid())?;
        if !(width.is_finite() && height.is_finite()) {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}
