//! Configuration for the windowing and layout pipeline.
//!
//! Every field has a default; a JSON config file only needs the keys it
//! overrides.
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::layout::types::LayoutOptions;
use crate::window::rules::PedigreeRules;
use crate::window::types::Size;

/// Default box sizes handed to the solver for each node kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSizes {
    pub union: Size,
    pub person: Size,
    pub junction: Size,
}

impl Default for NodeSizes {
    fn default() -> Self {
        Self {
            union: Size::new(260.0, 52.0),
            person: Size::new(120.0, 40.0),
            junction: Size::new(6.0, 6.0),
        }
    }
}

/// Gaps for the two overlap-resolution sweeps, applied in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlapConfig {
    pub gaps: Vec<f64>,
    /// Height of one y bucket; nodes whose `round(y / bucket)` match share a layer.
    pub bucket_height: f64,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            gaps: vec![20.0, 30.0],
            bucket_height: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    /// Locale whose `full` name is displayed and used for name ordering.
    pub primary_locale: String,
    pub node_sizes: NodeSizes,
    pub layout: LayoutOptions,
    pub overlap: OverlapConfig,
    pub rules: PedigreeRules,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            primary_locale: "zh".to_string(),
            node_sizes: NodeSizes::default(),
            layout: LayoutOptions::default(),
            overlap: OverlapConfig::default(),
            rules: PedigreeRules::default(),
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(src: &str) -> Result<Self> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ChartError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
