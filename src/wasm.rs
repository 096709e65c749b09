//! WASM bindings for family-chart.
//!
//! Exposes `windowChart` and `layoutChart` to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::{ChartConfig, Dataset, SugiyamaSolver};

fn parse_toggles(toggles_json: &str) -> Result<Vec<String>, JsError> {
    if toggles_json.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(toggles_json).map_err(|e| JsError::new(&e.to_string()))
}

fn parse_config(config_json: &str) -> Result<ChartConfig, JsError> {
    if config_json.trim().is_empty() {
        return Ok(ChartConfig::default());
    }
    ChartConfig::from_json_str(config_json).map_err(|e| JsError::new(&e.to_string()))
}

/// Windowed graph JSON (no positions).
///
/// - `toggles_json`: JSON array of union ids to toggle, or empty string
/// - `config_json`: partial `ChartConfig` JSON, or empty string for defaults
#[wasm_bindgen(js_name = "windowChart")]
pub fn window_chart(
    dataset_json: &str,
    root_union_id: &str,
    toggles_json: &str,
    config_json: &str,
) -> Result<String, JsError> {
    let dataset = Dataset::from_json_str(dataset_json).map_err(|e| JsError::new(&e.to_string()))?;
    let toggles = parse_toggles(toggles_json)?;
    let config = parse_config(config_json)?;
    let graph = crate::window_chart(&dataset, root_union_id, &toggles, &config)
        .map_err(|e| JsError::new(&e.to_string()))?;
    serde_json::to_string(&graph).map_err(|e| JsError::new(&e.to_string()))
}

/// Positioned graph JSON, laid out with the bundled solver.
#[wasm_bindgen(js_name = "layoutChart")]
pub fn layout_chart(
    dataset_json: &str,
    root_union_id: &str,
    toggles_json: &str,
    config_json: &str,
) -> Result<String, JsError> {
    let dataset = Dataset::from_json_str(dataset_json).map_err(|e| JsError::new(&e.to_string()))?;
    let toggles = parse_toggles(toggles_json)?;
    let config = parse_config(config_json)?;
    let positioned = pollster::block_on(crate::layout_chart(
        &dataset,
        root_union_id,
        &toggles,
        &config,
        &SugiyamaSolver,
    ))
    .map_err(|e| JsError::new(&e.to_string()))?;
    serde_json::to_string(&positioned).map_err(|e| JsError::new(&e.to_string()))
}
