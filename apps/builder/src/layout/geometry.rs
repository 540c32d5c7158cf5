//! Page geometry — the single source of truth for export and preview sizing.
#![allow(dead_code)]
//!
//! The output format is fixed: one A4 page with the margin set tuned for a
//! single-page resume. All document-space values are in PostScript points;
//! screen-space mirrors are CSS px at 96 dpi. The preview column is widened
//! by a fixed factor so input controls are roomier than the rendered text
//! column; the export path always uses the true content width.

use serde::{Deserialize, Serialize};

use crate::layout::viewport::Viewport;

// ────────────────────────────────────────────────────────────────────────────
// Fixed constants
// ────────────────────────────────────────────────────────────────────────────

/// A4 in PostScript points (210 × 297 mm).
pub const PAGE_WIDTH_PT: f32 = 595.28;
pub const PAGE_HEIGHT_PT: f32 = 841.89;

/// CSS reference pixel: 96 px per inch against 72 pt per inch.
pub const PX_PER_PT: f32 = 96.0 / 72.0;
pub const PT_PER_PX: f32 = 72.0 / 96.0;

/// Margins in inches: tight left/right/top, roomier bottom.
const MARGIN_TOP_IN: f32 = 0.05;
const MARGIN_RIGHT_IN: f32 = 0.15;
const MARGIN_BOTTOM_IN: f32 = 0.35;
const MARGIN_LEFT_IN: f32 = 0.15;

const PT_PER_IN: f32 = 72.0;

/// Editing controls render 20% wider than the true text column.
pub const PREVIEW_WIDEN_FACTOR: f32 = 1.2;

// ────────────────────────────────────────────────────────────────────────────
// Geometry types
// ────────────────────────────────────────────────────────────────────────────

/// Margin set in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// Physical page geometry in points, with the derived content width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margins: Margins,
    /// `page_width - margins.left - margins.right`.
    pub content_width: f32,
}

impl PageGeometry {
    /// Content width in CSS px — the width the capture region is laid out at.
    pub fn content_width_px(&self) -> f32 {
        self.content_width * PX_PER_PT
    }
}

/// Fixed two-tier typography, in CSS px (the unit the capture surface lays
/// text out in). Headings are sans-serif, body text serif.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    pub name_size_px: f32,
    pub heading_size_px: f32,
    pub body_size_px: f32,
    pub line_height: f32,
    pub section_line_height: f32,
}

/// Everything the preview and the export renderer must agree on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub geometry: PageGeometry,
    pub typography: Typography,
    /// Width of on-screen input controls, px (`content_width_px × 1.2`).
    pub preview_width_px: f32,
}

impl LayoutParams {
    /// Computes layout parameters for a viewport.
    ///
    /// The output is a pure function of fixed constants — the viewport only
    /// triggers recomputation on resize and never changes the result, so
    /// repeated calls are idempotent by construction.
    pub fn compute(_viewport: &Viewport) -> Self {
        let margins = Margins {
            top: MARGIN_TOP_IN * PT_PER_IN,
            right: MARGIN_RIGHT_IN * PT_PER_IN,
            bottom: MARGIN_BOTTOM_IN * PT_PER_IN,
            left: MARGIN_LEFT_IN * PT_PER_IN,
        };
        let geometry = PageGeometry {
            page_width: PAGE_WIDTH_PT,
            page_height: PAGE_HEIGHT_PT,
            margins,
            content_width: PAGE_WIDTH_PT - margins.left - margins.right,
        };
        let typography = Typography {
            name_size_px: 11.8,
            heading_size_px: 10.0,
            body_size_px: 8.8,
            line_height: 1.2,
            section_line_height: 1.15,
        };
        LayoutParams {
            geometry,
            typography,
            preview_width_px: geometry.content_width_px() * PREVIEW_WIDEN_FACTOR,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
