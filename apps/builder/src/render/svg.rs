//! SVG painter for the headless capture surface.
#![allow(dead_code)]
//!
//! Serializes a [`FlowLayout`] into a standalone SVG document. Positions come
//! straight from the layout pass; the painter adds nothing but glyphs, so the
//! rasterized pixels line up with the measured rects underneath.

use std::fmt::Write as _;

use crate::render::flow::{FlowLayout, TextAnchor};
use crate::render::style::StyleSheet;

/// Paints the layout. Control lines are dropped when `controls_hidden` —
/// their space is already reserved by the layout pass, so hiding them leaves
/// every other pixel where it was.
pub fn paint_svg(
    layout: &FlowLayout,
    styles: &StyleSheet,
    controls_hidden: bool,
    background: [u8; 3],
) -> String {
    let w = layout.width_px;
    let h = layout.height_px;
    let family = styles.font_family_css();

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}" height="{h:.2}" viewBox="0 0 {w:.2} {h:.2}">"#
    );
    let _ = writeln!(
        svg,
        r#"  <rect x="0" y="0" width="{w:.2}" height="{h:.2}" fill="rgb({},{},{})"/>"#,
        background[0], background[1], background[2]
    );

    for rule in &layout.rules {
        let _ = writeln!(
            svg,
            r##"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="#000"/>"##,
            rule.x, rule.y, rule.width, rule.thickness
        );
    }

    for line in &layout.lines {
        if line.control && controls_hidden {
            continue;
        }
        if line.text.is_empty() {
            continue;
        }
        let anchor = match line.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let weight = if line.bold { " font-weight=\"bold\"" } else { "" };
        let _ = writeln!(
            svg,
            r##"  <text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" text-anchor="{}"{} fill="#000">{}</text>"##,
            line.x,
            line.baseline_y,
            family,
            line.size_px,
            anchor,
            weight,
            escape_xml(&line.text)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::LayoutParams;
    use crate::layout::viewport::Viewport;
    use crate::models::resume::Resume;
    use crate::render::flow::flow_tree;
    use crate::render::style::compute_export_styles;
    use crate::render::tree::{build_tree, RenderMode};

    fn painted(controls_hidden: bool) -> String {
        let params = LayoutParams::compute(&Viewport::default());
        let mut resume = Resume::new();
        resume.name = "Jane & Co".to_string();
        let tree = build_tree(&resume, RenderMode::PrintAccurate);
        let styles = compute_export_styles(&params);
        let layout = flow_tree(&tree, &styles, params.geometry.content_width_px());
        paint_svg(&layout, &styles, controls_hidden, [0xff, 0xff, 0xff])
    }

    #[test]
    fn test_svg_is_well_formed_enough_to_parse() {
        let svg = painted(true);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        let opt = usvg::Options::default();
        usvg::Tree::from_str(&svg, &opt).expect("usvg parses painter output");
    }

    #[test]
    fn test_controls_painted_only_when_visible() {
        assert!(painted(false).contains('\u{2191}'));
        assert!(!painted(true).contains('\u{2191}'));
    }

    #[test]
    fn test_text_is_escaped() {
        let svg = painted(true);
        assert!(svg.contains("Jane &amp; Co"));
        assert!(!svg.contains("Jane & Co<"));
    }

    #[test]
    fn test_headers_present_in_paint() {
        let svg = painted(true);
        for header in ["EDUCATION", "SKILLS", "EXPERIENCE", "PROJECTS"] {
            assert!(svg.contains(header), "{header} missing from paint");
        }
    }
}
