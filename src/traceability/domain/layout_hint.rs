use serde::Serialize;

/// Size of the canvas the tree is rendered into, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Translate {
    pub x: f64,
    pub y: f64,
}

/// Render geometry derived from the shape of a tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutHint {
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    pub zoom: f64,
    pub translate: Translate,
}
