//! Headless capture surface.
#![allow(dead_code)]
//!
//! Implements [`RenderSnapshot`] without a browser: the visual tree is laid
//! out by [`flow_tree`], painted to SVG, and rasterized with resvg against
//! system fonts. Geometry reported by `measure` comes from the same layout
//! pass the painter consumes, so hotspots and pixels agree by construction.

use image::RgbaImage;

use crate::layout::geometry::LayoutParams;
use crate::models::resume::Resume;
use crate::render::flow::{flow_tree, FlowLayout};
use crate::render::snapshot::{
    RasterImage, RasterOptions, RectPx, RenderSnapshot, SnapshotError,
};
use crate::render::style::{screen_styles, StyleSheet};
use crate::render::svg::paint_svg;
use crate::render::tree::{build_tree, ElementId, LinkRef, RenderMode, VisualTree};

pub struct HeadlessSnapshot {
    tree: VisualTree,
    params: LayoutParams,
    styles: StyleSheet,
    layout: FlowLayout,
    preview_active: bool,
    controls_hidden: bool,
    /// Top-left of the capture region in page coordinates. The real surface
    /// sits somewhere inside a scrolled document; tests exercise nonzero
    /// origins to prove the exporter only ever uses relative offsets.
    origin: (f32, f32),
}

impl HeadlessSnapshot {
    /// A mounted print-accurate preview of `resume`.
    pub fn mounted(resume: &Resume, params: LayoutParams) -> Self {
        Self::build(resume, params, true)
    }

    /// A surface whose preview is not showing. Rasterization fails until
    /// `set_preview_mode(true)` mounts it.
    pub fn unmounted(resume: &Resume, params: LayoutParams) -> Self {
        Self::build(resume, params, false)
    }

    fn build(resume: &Resume, params: LayoutParams, preview_active: bool) -> Self {
        let tree = build_tree(resume, RenderMode::PrintAccurate);
        let styles = screen_styles(&params);
        let layout = flow_tree(&tree, &styles, params.geometry.content_width_px());
        Self {
            tree,
            params,
            styles,
            layout,
            preview_active,
            controls_hidden: false,
            origin: (0.0, 0.0),
        }
    }

    /// Places the capture region at a nonzero page offset.
    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = (x, y);
        self
    }

    /// The current paint, for inspection.
    pub fn svg(&self) -> String {
        paint_svg(&self.layout, &self.styles, self.controls_hidden, [0xff, 0xff, 0xff])
    }

    fn reflow(&mut self) {
        self.layout = flow_tree(
            &self.tree,
            &self.styles,
            self.params.geometry.content_width_px(),
        );
    }

    fn offset(&self, rect: RectPx) -> RectPx {
        RectPx {
            x: rect.x + self.origin.0,
            y: rect.y + self.origin.1,
            ..rect
        }
    }
}

impl RenderSnapshot for HeadlessSnapshot {
    fn preview_active(&self) -> bool {
        self.preview_active
    }

    fn set_preview_mode(&mut self, active: bool) {
        self.preview_active = active;
    }

    fn apply_styles(&mut self, styles: &StyleSheet) {
        if *styles != self.styles {
            self.styles = styles.clone();
            self.reflow();
        }
    }

    fn set_controls_hidden(&mut self, hidden: bool) {
        // Visibility only: the layout keeps the controls' space reserved.
        self.controls_hidden = hidden;
    }

    fn controls_hidden(&self) -> bool {
        self.controls_hidden
    }

    fn capture_bounds(&self) -> Option<RectPx> {
        if !self.preview_active {
            return None;
        }
        Some(RectPx::new(
            self.origin.0,
            self.origin.1,
            self.layout.width_px,
            self.layout.height_px,
        ))
    }

    fn measure(&self, element: ElementId) -> Option<RectPx> {
        self.layout.rect(element).map(|r| self.offset(r))
    }

    fn links(&self) -> Vec<LinkRef> {
        self.tree.links()
    }

    fn rasterize(&mut self, opts: &RasterOptions) -> Result<RasterImage, SnapshotError> {
        if !self.preview_active {
            return Err(SnapshotError::TargetMissing);
        }

        let svg = paint_svg(&self.layout, &self.styles, self.controls_hidden, opts.background);

        let mut usvg_opts = usvg::Options::default();
        usvg_opts.fontdb_mut().load_system_fonts();
        let tree = usvg::Tree::from_str(&svg, &usvg_opts)
            .map_err(|e| SnapshotError::Raster(format!("svg parse: {e}")))?;

        let width = (self.layout.width_px * opts.scale).ceil().max(1.0) as u32;
        let height = (self.layout.height_px * opts.scale).ceil().max(1.0) as u32;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| SnapshotError::Raster("pixmap allocation failed".to_string()))?;
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(
            opts.background[0],
            opts.background[1],
            opts.background[2],
            0xff,
        ));
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(opts.scale, opts.scale),
            &mut pixmap.as_mut(),
        );

        // Opaque background means premultiplied and straight alpha coincide.
        let image = RgbaImage::from_raw(width, height, pixmap.take())
            .ok_or_else(|| SnapshotError::Raster("pixmap buffer size mismatch".to_string()))?;
        Ok(RasterImage {
            image,
            scale: opts.scale,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::viewport::Viewport;
    use crate::models::ops::{self, ScalarField};
    use crate::render::style::compute_export_styles;

    fn params() -> LayoutParams {
        LayoutParams::compute(&Viewport::default())
    }

    fn jane() -> Resume {
        let r = Resume::new();
        ops::set_field(&r, ScalarField::Name, "Jane Doe")
    }

    #[test]
    fn test_rasterize_dimensions_follow_scale() {
        let mut snap = HeadlessSnapshot::mounted(&jane(), params());
        let opts = RasterOptions::default();
        let raster = snap.rasterize(&opts).expect("mounted preview rasterizes");
        let bounds = snap.capture_bounds().unwrap();
        assert_eq!(raster.image.width(), (bounds.width * 4.0).ceil() as u32);
        assert_eq!(raster.image.height(), (bounds.height * 4.0).ceil() as u32);
        assert_eq!(raster.scale, 4.0);
    }

    #[test]
    fn test_rasterize_unmounted_fails_with_target_missing() {
        let mut snap = HeadlessSnapshot::unmounted(&jane(), params());
        let err = snap.rasterize(&RasterOptions::default()).unwrap_err();
        assert_eq!(err, SnapshotError::TargetMissing);
        assert!(snap.capture_bounds().is_none());
    }

    #[test]
    fn test_mounting_preview_enables_capture() {
        let mut snap = HeadlessSnapshot::unmounted(&jane(), params());
        snap.set_preview_mode(true);
        assert!(snap.capture_bounds().is_some());
        assert!(snap.rasterize(&RasterOptions::default()).is_ok());
    }

    #[test]
    fn test_measure_applies_capture_origin() {
        let r = ops::set_field(&jane(), ScalarField::Email, "a@b.com");
        let at_origin = HeadlessSnapshot::mounted(&r, params());
        let offset = HeadlessSnapshot::mounted(&r, params()).with_origin(40.0, 300.0);

        let link = at_origin.links()[0].id;
        let base = at_origin.measure(link).unwrap();
        let moved = offset.measure(link).unwrap();
        assert!((moved.x - base.x - 40.0).abs() < 1e-3);
        assert!((moved.y - base.y - 300.0).abs() < 1e-3);

        // Relative to capture bounds the rects agree regardless of origin.
        let rel_a = base.relative_to(&at_origin.capture_bounds().unwrap());
        let rel_b = moved.relative_to(&offset.capture_bounds().unwrap());
        assert!((rel_a.x - rel_b.x).abs() < 1e-3);
        assert!((rel_a.y - rel_b.y).abs() < 1e-3);
    }

    #[test]
    fn test_apply_styles_reflows() {
        let mut snap = HeadlessSnapshot::mounted(&jane(), params());
        let before = snap.capture_bounds().unwrap().height;
        snap.apply_styles(&compute_export_styles(&params()));
        let after = snap.capture_bounds().unwrap().height;
        // Export styles pull grouped rows together: the page gets shorter.
        assert!(after < before);
    }

    #[test]
    fn test_hidden_controls_leave_geometry_untouched() {
        let mut snap = HeadlessSnapshot::mounted(&jane(), params());
        let before = snap.capture_bounds().unwrap();
        snap.set_controls_hidden(true);
        assert_eq!(snap.capture_bounds().unwrap(), before);
        assert!(!snap.svg().contains('\u{2191}'));
        snap.set_controls_hidden(false);
        assert!(snap.svg().contains('\u{2191}'));
    }
}
