//! Headless layout pass: visual tree → placed boxes.
#![allow(dead_code)]
//!
//! Walks the tree top to bottom, wrapping text with the static font metrics
//! and assigning every element a rectangle in capture-region px space. The
//! output drives both `measure` (hotspot reconciliation reads link rects from
//! here) and the SVG painter, so the painted pixels and the measured geometry
//! cannot drift apart.
//!
//! Controls are laid out unconditionally and skipped only at paint time —
//! hiding them must not reflow anything (visibility semantics, not removal).

use std::collections::HashMap;

use crate::layout::font_metrics::{get_metrics, FontFace};
use crate::render::snapshot::RectPx;
use crate::render::style::StyleSheet;
use crate::render::tree::{Block, ElementId, InlinePiece, VisualTree};

/// Fraction of the font size above the baseline.
const ASCENT_FACTOR: f32 = 0.8;
/// Padding below the last element.
const BOTTOM_PAD_PX: f32 = 4.0;
/// Reorder arrows, painted after the owning heading.
const CONTROLS_TEXT: &str = "\u{2191} \u{2193}";
const CONTROLS_GAP_PX: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// One positioned run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    /// Anchor-relative x: left edge, center, or right edge per `anchor`.
    pub x: f32,
    pub baseline_y: f32,
    pub size_px: f32,
    pub face: FontFace,
    pub bold: bool,
    pub anchor: TextAnchor,
    /// Editing-only content, skipped when controls are hidden.
    pub control: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRule {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub thickness: f32,
}

/// The laid-out capture region.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowLayout {
    pub width_px: f32,
    pub height_px: f32,
    pub lines: Vec<PlacedLine>,
    pub rules: Vec<PlacedRule>,
    rects: HashMap<ElementId, RectPx>,
}

impl FlowLayout {
    /// Bounding box of one element, in capture-region space.
    pub fn rect(&self, id: ElementId) -> Option<RectPx> {
        self.rects.get(&id).copied()
    }
}

/// Lays out the tree at `content_width_px`.
pub fn flow_tree(tree: &VisualTree, styles: &StyleSheet, content_width_px: f32) -> FlowLayout {
    let body = get_metrics(styles.body_face);
    let heading = get_metrics(styles.heading_face);
    let width = content_width_px;

    let mut lines: Vec<PlacedLine> = Vec::new();
    let mut rules: Vec<PlacedRule> = Vec::new();
    let mut rects: HashMap<ElementId, RectPx> = HashMap::new();

    let mut cursor = 0.0_f32;
    let mut prev: Option<&Block> = None;
    // End-of-text position of the last heading, for attaching reorder arrows.
    let mut last_heading: Option<(f32, f32, f32)> = None; // (end_x, top_y, line_h)

    let body_line_h = styles.body_size_px * styles.line_height;
    let body_ascent = styles.body_size_px * ASCENT_FACTOR;

    for element in &tree.elements {
        match &element.block {
            Block::Name(text) => {
                let size = styles.name_size_px;
                let line_h = size * styles.line_height;
                lines.push(PlacedLine {
                    text: text.clone(),
                    x: width / 2.0,
                    baseline_y: cursor + size * ASCENT_FACTOR,
                    size_px: size,
                    face: styles.heading_face,
                    bold: true,
                    anchor: TextAnchor::Middle,
                    control: false,
                });
                let text_w = heading.measure_px(text, size);
                last_heading = Some((width / 2.0 + text_w / 2.0, cursor, line_h));
                rects.insert(element.id, RectPx::new(0.0, cursor, width, line_h));
                cursor += line_h;
            }

            Block::ContactLine(pieces) => {
                let size = styles.body_size_px;
                let line_h = size * styles.line_height;
                let sep_w = body.measure_px(" | ", size);
                let total: f32 = pieces
                    .iter()
                    .map(|p| match p {
                        InlinePiece::Text(t) => body.measure_px(t, size),
                        InlinePiece::Link { text, .. } => body.measure_px(text, size),
                        InlinePiece::Separator => sep_w,
                    })
                    .sum();
                let mut x = (width - total) / 2.0;
                let start_x = x;
                let mut rendered = String::new();
                for piece in pieces {
                    let (text, piece_w) = match piece {
                        InlinePiece::Text(t) => (t.as_str(), body.measure_px(t, size)),
                        InlinePiece::Link { text, .. } => (text.as_str(), body.measure_px(text, size)),
                        InlinePiece::Separator => (" | ", sep_w),
                    };
                    if let InlinePiece::Link { id, .. } = piece {
                        rects.insert(*id, RectPx::new(x, cursor, piece_w, line_h));
                    }
                    rendered.push_str(text);
                    x += piece_w;
                }
                lines.push(PlacedLine {
                    text: rendered,
                    x: start_x,
                    baseline_y: cursor + size * ASCENT_FACTOR,
                    size_px: size,
                    face: styles.body_face,
                    bold: false,
                    anchor: TextAnchor::Start,
                    control: false,
                });
                rects.insert(element.id, RectPx::new(0.0, cursor, width, line_h));
                cursor += line_h;
            }

            Block::SectionHeader(title) => {
                if cursor > 0.0 {
                    cursor += styles.section_gap_px;
                }
                let size = styles.heading_size_px;
                let line_h = size * styles.section_line_height;
                lines.push(PlacedLine {
                    text: title.clone(),
                    x: 0.0,
                    baseline_y: cursor + size * ASCENT_FACTOR,
                    size_px: size,
                    face: styles.heading_face,
                    bold: true,
                    anchor: TextAnchor::Start,
                    control: false,
                });
                last_heading = Some((heading.measure_px(title, size), cursor, line_h));
                rects.insert(element.id, RectPx::new(0.0, cursor, width, line_h));
                cursor += line_h;
            }

            Block::ReorderControls => {
                // Attached to the previous heading; no vertical advance.
                if let Some((end_x, top_y, line_h)) = last_heading {
                    let size = styles.body_size_px;
                    let x = end_x + CONTROLS_GAP_PX;
                    lines.push(PlacedLine {
                        text: CONTROLS_TEXT.to_string(),
                        x,
                        baseline_y: top_y + size * ASCENT_FACTOR,
                        size_px: size,
                        face: styles.heading_face,
                        bold: false,
                        anchor: TextAnchor::Start,
                        control: true,
                    });
                    let w = heading.measure_px(CONTROLS_TEXT, size);
                    rects.insert(element.id, RectPx::new(x, top_y, w, line_h));
                }
            }

            Block::Rule => {
                cursor += styles.rule_gap_px;
                let inset = styles.rule_inset_px;
                rules.push(PlacedRule {
                    x: inset,
                    y: cursor,
                    width: (width - 2.0 * inset).max(0.0),
                    thickness: styles.rule_thickness_px,
                });
                rects.insert(
                    element.id,
                    RectPx::new(inset, cursor, (width - 2.0 * inset).max(0.0), styles.rule_thickness_px),
                );
                cursor += styles.rule_thickness_px + styles.rule_gap_px;
            }

            Block::TwoColRow {
                left,
                right,
                left_bold,
                grouped,
            } => {
                if *grouped {
                    cursor = (cursor - styles.grouped_row_pull_px).max(0.0);
                } else if matches!(prev, Some(Block::TwoColRow { .. }) | Some(Block::BulletLine(_))) {
                    cursor += styles.entry_gap_px;
                }
                let size = styles.body_size_px;
                let left_width = width * styles.left_col_fraction - styles.col_gap_px;
                let mut left_lines = body.wrap_lines(left, left_width / size);
                if left_lines.is_empty() {
                    left_lines.push(String::new());
                }
                for (i, line) in left_lines.iter().enumerate() {
                    lines.push(PlacedLine {
                        text: line.clone(),
                        x: 0.0,
                        baseline_y: cursor + i as f32 * body_line_h + body_ascent,
                        size_px: size,
                        face: styles.body_face,
                        bold: *left_bold,
                        anchor: TextAnchor::Start,
                        control: false,
                    });
                }
                if !right.is_empty() {
                    // Single non-wrapping line, flush right, on the first baseline.
                    lines.push(PlacedLine {
                        text: right.clone(),
                        x: width,
                        baseline_y: cursor + body_ascent,
                        size_px: size,
                        face: styles.body_face,
                        bold: false,
                        anchor: TextAnchor::End,
                        control: false,
                    });
                }
                let row_h = left_lines.len() as f32 * body_line_h;
                rects.insert(element.id, RectPx::new(0.0, cursor, width, row_h));
                cursor += row_h;
            }

            Block::BulletLine(text) => {
                cursor += styles.bullet_gap_px;
                let size = styles.body_size_px;
                let ch = body.char_width('0') * size;
                let indent = styles.hanging_indent_ch * ch;
                let mut wrapped = body.wrap_lines(text, (width - indent) / size);
                if wrapped.is_empty() {
                    wrapped.push(String::new());
                }
                lines.push(PlacedLine {
                    text: "\u{2022}".to_string(),
                    x: 0.0,
                    baseline_y: cursor + body_ascent,
                    size_px: size,
                    face: styles.body_face,
                    bold: false,
                    anchor: TextAnchor::Start,
                    control: false,
                });
                for (i, line) in wrapped.iter().enumerate() {
                    lines.push(PlacedLine {
                        text: line.clone(),
                        x: indent,
                        baseline_y: cursor + i as f32 * body_line_h + body_ascent,
                        size_px: size,
                        face: styles.body_face,
                        bold: false,
                        anchor: TextAnchor::Start,
                        control: false,
                    });
                }
                let block_h = wrapped.len() as f32 * body_line_h;
                rects.insert(element.id, RectPx::new(0.0, cursor, width, block_h));
                cursor += block_h;
            }
        }
        prev = Some(&element.block);
    }

    FlowLayout {
        width_px: width,
        height_px: cursor + BOTTOM_PAD_PX,
        lines,
        rules,
        rects,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
