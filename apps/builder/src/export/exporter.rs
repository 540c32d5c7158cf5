//! The export orchestration state machine.
#![allow(dead_code)]
//!
//! `Idle → Preparing → Rendering → Finalizing → Idle`, with `Failed` as the
//! transitional error state on the way back to `Idle`. One export at a time:
//! a request while another is in flight is rejected, never interleaved, since
//! both would fight over preview mode and control visibility.
//!
//! Restore discipline: whatever happens, preview mode and control visibility
//! go back to their pre-export values before `export` returns, and no
//! partial file is ever produced.

use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::export::pdf::{assemble_single_page, file_name_for, page_link_rect, DocMeta, PageLink};
use crate::layout::geometry::LayoutParams;
use crate::models::resume::Resume;
use crate::render::snapshot::{RasterOptions, RenderSnapshot, SnapshotError};
use crate::render::style::compute_export_styles;

/// One rendering cycle for the preview to settle before pixels are captured.
const SETTLE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Idle,
    Preparing,
    Rendering,
    Finalizing,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    AlreadyRunning,

    /// The capture step could not produce pixels (preview missing from the
    /// document, rasterizer failure). Fatal to this attempt, recoverable for
    /// the next.
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    #[error("document assembly failed: {0}")]
    Assembly(String),
}

/// The finished download: file name, serialized bytes, page count.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Bytes,
    pub page_count: u32,
}

pub struct DocumentExporter {
    phase: ExportPhase,
    settle: Duration,
    raster: RasterOptions,
}

impl DocumentExporter {
    pub fn new() -> Self {
        Self {
            phase: ExportPhase::Idle,
            settle: SETTLE_DELAY,
            raster: RasterOptions::default(),
        }
    }

    pub fn phase(&self) -> ExportPhase {
        self.phase
    }

    #[cfg(test)]
    pub(crate) fn force_phase(&mut self, phase: ExportPhase) {
        self.phase = phase;
    }

    /// Runs one export against the capture surface.
    ///
    /// On success and failure alike, the surface's preview mode and control
    /// visibility are restored to their pre-export state and the exporter
    /// returns to `Idle`.
    pub async fn export<S: RenderSnapshot>(
        &mut self,
        resume: &Resume,
        params: &LayoutParams,
        snapshot: &mut S,
    ) -> Result<ExportedDocument, ExportError> {
        if self.phase != ExportPhase::Idle {
            return Err(ExportError::AlreadyRunning);
        }

        let prior_preview = snapshot.preview_active();
        let prior_controls = snapshot.controls_hidden();

        let result = self.run(resume, params, snapshot).await;

        // Guaranteed release: restore the surface on every path.
        snapshot.set_controls_hidden(prior_controls);
        snapshot.set_preview_mode(prior_preview);

        match &result {
            Ok(doc) => {
                info!(file = %doc.file_name, bytes = doc.bytes.len(), "export complete");
            }
            Err(e) => {
                error!("export failed: {e}");
                self.phase = ExportPhase::Failed;
            }
        }
        self.phase = ExportPhase::Idle;
        result
    }

    async fn run<S: RenderSnapshot>(
        &mut self,
        resume: &Resume,
        params: &LayoutParams,
        snapshot: &mut S,
    ) -> Result<ExportedDocument, ExportError> {
        // Preparing: force the print preview on, wait a rendering cycle, and
        // apply the computed export styling. The raster step captures pixels,
        // so the applied styles must match the geometry exactly.
        self.phase = ExportPhase::Preparing;
        if !snapshot.preview_active() {
            snapshot.set_preview_mode(true);
        }
        tokio::time::sleep(self.settle).await;
        snapshot.apply_styles(&compute_export_styles(params));

        // Rendering: hide editing controls from the capture region and
        // rasterize at the supersampling factor over an opaque background.
        self.phase = ExportPhase::Rendering;
        snapshot.set_controls_hidden(true);
        let raster = snapshot.rasterize(&self.raster).map_err(|e| match e {
            SnapshotError::TargetMissing => {
                ExportError::RenderingFailed("capture target is not mounted".to_string())
            }
            SnapshotError::Raster(msg) => ExportError::RenderingFailed(msg),
        })?;

        // Finalizing: re-derive link hotspots from the live geometry and
        // serialize the page.
        self.phase = ExportPhase::Finalizing;
        let capture = snapshot.capture_bounds().ok_or_else(|| {
            ExportError::RenderingFailed("capture bounds unavailable".to_string())
        })?;

        let mut hotspots: Vec<PageLink> = Vec::new();
        for link in snapshot.links() {
            match snapshot.measure(link.id) {
                Some(rect) => hotspots.push(page_link_rect(
                    rect,
                    capture,
                    &params.geometry.margins,
                    &link.href,
                )),
                None => debug!(link_id = ?link.id, "link element not measurable; hotspot skipped"),
            }
        }

        let meta = DocMeta::for_resume(&resume.name);
        let bytes = assemble_single_page(&raster, &params.geometry, &hotspots, &meta)?;

        Ok(ExportedDocument {
            file_name: file_name_for(&resume.name),
            bytes: Bytes::from(bytes),
            page_count: 1,
        })
    }
}

impl Default for DocumentExporter {
    fn default() -> Self {
        Self::new()
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
    use crate::render::headless::HeadlessSnapshot;
    use crate::render::snapshot::{RasterImage, RectPx};
    use crate::render::style::StyleSheet;
    use crate::render::tree::LinkRef;

    fn params() -> LayoutParams {
        LayoutParams::compute(&Viewport::default())
    }

    fn jane() -> Resume {
        let r = Resume::new();
        let r = ops::set_field(&r, ScalarField::Name, "Jane Doe");
        ops::set_field(&r, ScalarField::Email, "a@b.com")
    }

    fn exporter() -> DocumentExporter {
        DocumentExporter::new()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    // ── success path ────────────────────────────────────────────────────────

    // The paused clock auto-advances through the settle delay, so these
    // tests never wait on real time.
    #[tokio::test(start_paused = true)]
    async fn test_export_jane_doe_produces_named_single_page_pdf() {
        let resume = jane();
        let p = params();
        let mut snapshot = HeadlessSnapshot::unmounted(&resume, p);
        let mut exporter = exporter();

        let doc = exporter
            .export(&resume, &p, &mut snapshot)
            .await
            .expect("export succeeds");
        assert_eq!(doc.file_name, "Jane Doe.pdf");
        assert_eq!(doc.page_count, 1);
        assert!(doc.bytes.starts_with(b"%PDF"));
        assert!(contains(&doc.bytes, b"mailto:a@b.com"), "hotspot embedded");
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_restores_preview_and_controls_on_success() {
        let resume = jane();
        let p = params();
        // Preview off before export — like clicking Download from the form.
        let mut snapshot = HeadlessSnapshot::unmounted(&resume, p);
        let mut exporter = exporter();

        exporter.export(&resume, &p, &mut snapshot).await.unwrap();
        assert!(!snapshot.preview_active(), "preview returned to prior state");
        assert!(!snapshot.controls_hidden(), "controls visible again");
        assert_eq!(exporter.phase(), ExportPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_with_nonzero_capture_origin_matches_originless() {
        let resume = jane();
        let p = params();
        let mut at_origin = HeadlessSnapshot::mounted(&resume, p);
        let mut offset = HeadlessSnapshot::mounted(&resume, p).with_origin(120.0, 480.0);

        let a = exporter().export(&resume, &p, &mut at_origin).await.unwrap();
        let b = exporter().export(&resume, &p, &mut offset).await.unwrap();
        // Hotspots are capture-relative, so the two documents are identical.
        assert_eq!(a.bytes, b.bytes);
    }

    // ── rejection and failure paths ─────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_second_export_rejected_while_in_flight() {
        let resume = jane();
        let p = params();
        let mut snapshot = HeadlessSnapshot::mounted(&resume, p);
        let mut exporter = exporter();
        exporter.force_phase(ExportPhase::Rendering);

        let err = exporter
            .export(&resume, &p, &mut snapshot)
            .await
            .unwrap_err();
        assert_eq!(err, ExportError::AlreadyRunning);
    }

    /// A surface whose rasterizer always fails, for restore-path coverage.
    struct FailingSurface {
        preview_active: bool,
        controls_hidden: bool,
    }

    impl RenderSnapshot for FailingSurface {
        fn preview_active(&self) -> bool {
            self.preview_active
        }
        fn set_preview_mode(&mut self, active: bool) {
            self.preview_active = active;
        }
        fn apply_styles(&mut self, _styles: &StyleSheet) {}
        fn set_controls_hidden(&mut self, hidden: bool) {
            self.controls_hidden = hidden;
        }
        fn controls_hidden(&self) -> bool {
            self.controls_hidden
        }
        fn capture_bounds(&self) -> Option<RectPx> {
            None
        }
        fn measure(&self, _element: crate::render::tree::ElementId) -> Option<RectPx> {
            None
        }
        fn links(&self) -> Vec<LinkRef> {
            Vec::new()
        }
        fn rasterize(&mut self, _opts: &RasterOptions) -> Result<RasterImage, SnapshotError> {
            Err(SnapshotError::TargetMissing)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_export_reports_rendering_failed_and_restores() {
        let resume = jane();
        let p = params();
        let mut surface = FailingSurface {
            preview_active: false,
            controls_hidden: false,
        };
        let mut exporter = exporter();

        let err = exporter
            .export(&resume, &p, &mut surface)
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::RenderingFailed(_)));
        assert!(!surface.preview_active, "preview restored after failure");
        assert!(!surface.controls_hidden, "controls restored after failure");
        assert_eq!(exporter.phase(), ExportPhase::Idle, "recoverable for next attempt");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_attempt_does_not_poison_the_next() {
        let resume = jane();
        let p = params();
        let mut exporter = exporter();

        let mut failing = FailingSurface {
            preview_active: false,
            controls_hidden: false,
        };
        assert!(exporter.export(&resume, &p, &mut failing).await.is_err());

        let mut good = HeadlessSnapshot::mounted(&resume, p);
        assert!(exporter.export(&resume, &p, &mut good).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_name_falls_back_to_generic_file_name() {
        let resume = Resume::new();
        let p = params();
        let mut snapshot = HeadlessSnapshot::mounted(&resume, p);
        let doc = exporter()
            .export(&resume, &p, &mut snapshot)
            .await
            .unwrap();
        assert_eq!(doc.file_name, "resume.pdf");
    }
}
