//! The capture surface abstraction.
#![allow(dead_code)]
//!
//! The exporter never reads live layout state directly: everything it needs
//! from the rendered tree — element geometry, hyperlinks, style application,
//! control visibility, pixels — goes through [`RenderSnapshot`]. The browser
//! surface is an external collaborator; this crate ships the headless
//! implementation in [`crate::render::headless`].

use image::RgbaImage;
use thiserror::Error;

use crate::render::style::StyleSheet;
use crate::render::tree::{ElementId, LinkRef};

/// Axis-aligned rectangle in CSS px. `y` grows downward (screen space).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPx {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectPx {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// This rect expressed relative to `origin`'s top-left corner.
    pub fn relative_to(&self, origin: &RectPx) -> RectPx {
        RectPx {
            x: self.x - origin.x,
            y: self.y - origin.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Rasterization parameters: supersampling factor and the opaque background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    pub scale: f32,
    pub background: [u8; 3],
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 4.0,
            background: [0xff, 0xff, 0xff],
        }
    }
}

/// A captured bitmap plus the supersampling factor it was rendered at.
#[derive(Debug)]
pub struct RasterImage {
    pub image: RgbaImage,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The capture region is absent from the document (preview not mounted).
    #[error("capture target is not mounted")]
    TargetMissing,

    #[error("rasterization failed: {0}")]
    Raster(String),
}

/// Measured, style-patchable view of the rendered resume.
pub trait RenderSnapshot {
    /// Whether the print-accurate preview is currently showing.
    fn preview_active(&self) -> bool;

    /// Toggles the print-accurate preview on or off.
    fn set_preview_mode(&mut self, active: bool);

    /// Applies a computed style sheet to the rendered tree.
    fn apply_styles(&mut self, styles: &StyleSheet);

    /// Hides or restores editing-only controls. Hidden controls keep their
    /// geometry (visibility, not removal) so capture and restore are
    /// position-stable.
    fn set_controls_hidden(&mut self, hidden: bool);

    fn controls_hidden(&self) -> bool;

    /// Bounding box of the capture region, if mounted.
    fn capture_bounds(&self) -> Option<RectPx>;

    /// On-screen bounding box of one element.
    fn measure(&self, element: ElementId) -> Option<RectPx>;

    /// All hyperlink elements in the rendered tree.
    fn links(&self) -> Vec<LinkRef>;

    /// Rasterizes the capture region. Fails with
    /// [`SnapshotError::TargetMissing`] when the preview is not mounted.
    fn rasterize(&mut self, opts: &RasterOptions) -> Result<RasterImage, SnapshotError>;
}
