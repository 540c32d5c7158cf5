//! The fixed two-tier typography scheme as data.
#![allow(dead_code)]
//!
//! Styling is computed, not patched: `screen_styles` and
//! `compute_export_styles` are pure functions of [`LayoutParams`], and the
//! snapshot applies the resulting sheet declaratively before capture. That
//! keeps style computation testable independently of rasterization.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontFace;
use crate::layout::geometry::LayoutParams;

/// Every style knob the layout pass and the painter read. All lengths in
/// CSS px, fractions of the content width where noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    pub body_face: FontFace,
    pub heading_face: FontFace,
    pub name_size_px: f32,
    pub heading_size_px: f32,
    pub body_size_px: f32,
    pub line_height: f32,
    pub section_line_height: f32,

    /// Vertical gap above each section header.
    pub section_gap_px: f32,
    /// Gap above an entry's first row (institution/company/title).
    pub entry_gap_px: f32,
    /// Upward pull applied to the second row of a paired entry row.
    pub grouped_row_pull_px: f32,
    /// Gap between consecutive bullet lines.
    pub bullet_gap_px: f32,

    /// Left/right column split of entry rows.
    pub left_col_fraction: f32,
    pub right_col_fraction: f32,
    /// Padding between the columns, charged to the left column.
    pub col_gap_px: f32,
    /// Right column never wraps; overflow is the author's problem.
    pub nowrap_right_column: bool,

    /// Hanging indent of bullet text, in `ch` units of the body face.
    pub hanging_indent_ch: f32,
    /// Oversized tokens are hard-broken inside the column.
    pub break_long_tokens: bool,

    pub rule_thickness_px: f32,
    /// Horizontal inset of separator rules.
    pub rule_inset_px: f32,
    /// Gap between a header baseline box and its rule.
    pub rule_gap_px: f32,

    /// Font stack handed to the painter, most specific first.
    pub font_stack: Vec<String>,
}

/// Styles for the live on-screen preview.
pub fn screen_styles(params: &LayoutParams) -> StyleSheet {
    let t = params.typography;
    StyleSheet {
        body_face: FontFace::TimesNewRoman,
        heading_face: FontFace::Arial,
        name_size_px: t.name_size_px,
        heading_size_px: t.heading_size_px,
        body_size_px: t.body_size_px,
        line_height: t.line_height,
        section_line_height: t.section_line_height,
        section_gap_px: 8.0,
        entry_gap_px: 4.8,
        grouped_row_pull_px: 0.0,
        bullet_gap_px: 2.0,
        left_col_fraction: 0.75,
        right_col_fraction: 0.25,
        col_gap_px: 8.0,
        nowrap_right_column: true,
        hanging_indent_ch: 1.5,
        break_long_tokens: true,
        rule_thickness_px: 1.0,
        rule_inset_px: 16.0,
        rule_gap_px: 3.0,
        font_stack: vec!["Times New Roman".to_string(), "serif".to_string()],
    }
}

/// Export style overrides, computed once from the layout parameters.
///
/// Same type sizes as the screen sheet — the capture must match the preview —
/// but with the print tightenings the screen forgoes: paired rows pulled
/// together, wider column padding, and a font stack led by the CJK face so
/// mixed-script text rasterizes with substituted glyphs instead of tofu.
pub fn compute_export_styles(params: &LayoutParams) -> StyleSheet {
    StyleSheet {
        grouped_row_pull_px: 4.0,
        col_gap_px: 12.0,
        font_stack: vec![
            "Noto Sans TC".to_string(),
            "Times New Roman".to_string(),
            "serif".to_string(),
        ],
        ..screen_styles(params)
    }
}

impl StyleSheet {
    /// The font stack as a CSS `font-family` value (multiword names quoted).
    pub fn font_family_css(&self) -> String {
        self.font_stack
            .iter()
            .map(|name| {
                if name.contains(' ') {
                    format!("'{name}'")
                } else {
                    name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
