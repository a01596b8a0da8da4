use crate::traceability::domain::{LayoutHint, Translate, TreeNode, Viewport};

const MIN_HORIZONTAL_SPACING: f64 = 150.0;
const MAX_HORIZONTAL_SPACING: f64 = 250.0;
const MIN_VERTICAL_SPACING: f64 = 100.0;
const MAX_VERTICAL_SPACING: f64 = 180.0;
const MIN_ZOOM: f64 = 0.3;
const MAX_ZOOM: f64 = 1.2;

/// LayoutEstimator service deriving render geometry from tree shape
///
/// Pure and cheap; safe to call on every viewport resize.
pub struct LayoutEstimator;

impl LayoutEstimator {
    /// Estimates spacing, zoom and translation for a tree
    ///
    /// # Arguments
    /// * `depth` - Number of tree levels (root only = 1)
    /// * `node_count` - Total number of tree nodes
    /// * `viewport_width`, `viewport_height` - Canvas size in pixels
    ///
    /// Zero counts are treated as 1. Negative or non-finite viewport sizes
    /// are treated as 0.
    pub fn estimate(
        depth: usize,
        node_count: usize,
        viewport_width: f64,
        viewport_height: f64,
    ) -> LayoutHint {
        let width = Self::sanitize(viewport_width);
        let height = Self::sanitize(viewport_height);
        let levels = depth.max(1) as f64;
        let breadth = (node_count.max(1) as f64).sqrt();

        let horizontal_spacing = (width / breadth.max(3.0))
            .clamp(MIN_HORIZONTAL_SPACING, MAX_HORIZONTAL_SPACING);
        let vertical_spacing =
            (height / levels.max(2.0)).clamp(MIN_VERTICAL_SPACING, MAX_VERTICAL_SPACING);

        let zoom = (width / (horizontal_spacing * breadth))
            .min(height / (vertical_spacing * levels))
            .clamp(MIN_ZOOM, MAX_ZOOM);

        LayoutHint {
            horizontal_spacing,
            vertical_spacing,
            zoom,
            translate: Translate {
                x: width / 2.0,
                y: height / 2.0,
            },
        }
    }

    /// Estimates the layout for an already materialized tree
    pub fn for_tree(tree: &TreeNode, viewport: Viewport) -> LayoutHint {
        Self::estimate(
            tree.depth(),
            tree.node_count(),
            viewport.width,
            viewport.height,
        )
    }

    fn sanitize(dimension: f64) -> f64 {
        if dimension.is_finite() && dimension > 0.0 {
            dimension
        } else {
            0.0
        }
    }
}

impl LayoutHint {
    /// Same as [`LayoutEstimator::for_tree`]
    pub fn for_tree(tree: &TreeNode, viewport: Viewport) -> LayoutHint {
        LayoutEstimator::for_tree(tree, viewport)
    }
}
