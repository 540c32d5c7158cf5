//! Single-page PDF assembly.
#![allow(dead_code)]
//!
//! The captured bitmap becomes a DCT-encoded image XObject placed at the
//! page margins and scaled to the content width; hyperlinks become invisible
//! URI link annotations at the translated hotspot rects. Coordinates arrive
//! in capture-relative CSS px (top-left origin) and leave in PDF points
//! (bottom-left origin).

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::export::ExportError;
use crate::layout::geometry::{Margins, PageGeometry, PT_PER_PX};
use crate::render::snapshot::{RasterImage, RectPx};

/// JPEG quality for the embedded page image. The 4× supersampled capture
/// keeps text legible well below lossless.
const JPEG_QUALITY: u8 = 90;

// ────────────────────────────────────────────────────────────────────────────
// Metadata and hotspots
// ────────────────────────────────────────────────────────────────────────────

/// Document information dictionary fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DocMeta {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub keywords: String,
    pub creator: String,
}

impl DocMeta {
    /// Metadata defaulted from the resume's name field.
    pub fn for_resume(name: &str) -> Self {
        let display = if name.trim().is_empty() { "Resume" } else { name };
        let author = if name.trim().is_empty() { "User" } else { name };
        Self {
            title: format!("{display} - CV"),
            author: author.to_string(),
            subject: "Resume".to_string(),
            keywords: "resume, cv, job application".to_string(),
            creator: "Instant Resume Builder".to_string(),
        }
    }
}

/// One clickable region in page space: top-left-origin points.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLink {
    pub x: f32,
    pub y_top: f32,
    pub width: f32,
    pub height: f32,
    pub url: String,
}

/// Translates a measured link rect into page coordinates: the element's
/// offset from the capture region, converted to points, shifted by the
/// margins. This is the reconciliation step — rasterization destroyed the
/// live hyperlink, so its rectangle is re-derived here.
pub fn page_link_rect(link_px: RectPx, capture_px: RectPx, margins: &Margins, url: &str) -> PageLink {
    let rel = link_px.relative_to(&capture_px);
    PageLink {
        x: margins.left + rel.x * PT_PER_PX,
        y_top: margins.top + rel.y * PT_PER_PX,
        width: rel.width * PT_PER_PX,
        height: rel.height * PT_PER_PX,
        url: url.to_string(),
    }
}

/// Derives the download file name from the resume's name field.
pub fn file_name_for(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("{trimmed}.pdf")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

/// Serializes the one-page document: fixed page size, the bitmap at the
/// margins scaled to the content width (aspect preserved), link annotations,
/// document info.
pub fn assemble_single_page(
    raster: &RasterImage,
    geometry: &PageGeometry,
    links: &[PageLink],
    meta: &DocMeta,
) -> Result<Vec<u8>, ExportError> {
    let img_w = raster.image.width();
    let img_h = raster.image.height();
    if img_w == 0 || img_h == 0 {
        return Err(ExportError::Assembly("empty capture image".to_string()));
    }

    // Strip alpha (the background is opaque) and DCT-encode.
    let rgb = DynamicImage::ImageRgba8(raster.image.clone()).to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| ExportError::Assembly(format!("jpeg encode: {e}")))?;

    // Display size: full content width, height from the aspect ratio.
    let display_w = geometry.content_width;
    let display_h = img_h as f32 * display_w / img_w as f32;
    let margins = geometry.margins;
    let page_h = geometry.page_height;
    if display_h > page_h - margins.top - margins.bottom {
        tracing::warn!(
            display_h,
            "capture taller than the content box; single-page output will clip"
        );
    }

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let content_id = Ref::new(5);
    let info_id = Ref::new(6);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, geometry.page_width, page_h));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources()
        .x_objects()
        .pair(Name(b"Im0"), image_id);

    if !links.is_empty() {
        let mut annotations = page.annotations();
        for link in links {
            let mut annotation = annotations.push();
            annotation.subtype(AnnotationType::Link);
            // Flip to bottom-left origin.
            annotation.rect(Rect::new(
                link.x,
                page_h - (link.y_top + link.height),
                link.x + link.width,
                page_h - link.y_top,
            ));
            // No visible border: the hotspot overlays the rasterized text.
            annotation.border(0.0, 0.0, 0.0, None);
            annotation
                .action()
                .action_type(ActionType::Uri)
                .uri(Str(link.url.as_bytes()));
            annotation.finish();
        }
        annotations.finish();
    }
    page.finish();

    let mut image = pdf.image_xobject(image_id, &jpeg);
    image.filter(Filter::DctDecode);
    image.width(img_w as i32);
    image.height(img_h as i32);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    image.finish();

    let mut content = Content::new();
    content.save_state();
    content.transform([
        display_w,
        0.0,
        0.0,
        display_h,
        margins.left,
        page_h - margins.top - display_h,
    ]);
    content.x_object(Name(b"Im0"));
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    pdf.document_info(info_id)
        .title(TextStr(&meta.title))
        .author(TextStr(&meta.author))
        .subject(TextStr(&meta.subject))
        .keywords(TextStr(&meta.keywords))
        .creator(TextStr(&meta.creator));

    Ok(pdf.finish())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::LayoutParams;
    use crate::layout::viewport::Viewport;
    use image::RgbaImage;

    fn geometry() -> PageGeometry {
        LayoutParams::compute(&Viewport::default()).geometry
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn white_raster(w: u32, h: u32) -> RasterImage {
        RasterImage {
            image: RgbaImage::from_pixel(w, h, image::Rgba([0xff, 0xff, 0xff, 0xff])),
            scale: 4.0,
        }
    }

    // ── coordinate translation ──────────────────────────────────────────────

    #[test]
    fn test_page_link_rect_is_margin_plus_relative_offset() {
        let g = geometry();
        // Capture region mounted at (100, 200); link 10px right, 45px down.
        let capture = RectPx::new(100.0, 200.0, 760.0, 900.0);
        let link = RectPx::new(110.0, 245.0, 80.0, 12.0);
        let hotspot = page_link_rect(link, capture, &g.margins, "mailto:a@b.com");

        assert!((hotspot.x - (g.margins.left + 10.0 * PT_PER_PX)).abs() < 1e-3);
        assert!((hotspot.y_top - (g.margins.top + 45.0 * PT_PER_PX)).abs() < 1e-3);
        assert!((hotspot.width - 80.0 * PT_PER_PX).abs() < 1e-3);
        assert!((hotspot.height - 12.0 * PT_PER_PX).abs() < 1e-3);
        assert_eq!(hotspot.url, "mailto:a@b.com");
    }

    #[test]
    fn test_page_link_rect_independent_of_capture_origin() {
        let g = geometry();
        let link_rel = RectPx::new(10.0, 45.0, 80.0, 12.0);
        let a = page_link_rect(link_rel, RectPx::new(0.0, 0.0, 760.0, 900.0), &g.margins, "u");
        let shifted = RectPx::new(310.0, 745.0, 80.0, 12.0);
        let b = page_link_rect(shifted, RectPx::new(300.0, 700.0, 760.0, 900.0), &g.margins, "u");
        assert!((a.x - b.x).abs() < 1e-3);
        assert!((a.y_top - b.y_top).abs() < 1e-3);
    }

    // ── file name ───────────────────────────────────────────────────────────

    #[test]
    fn test_file_name_from_resume_name_with_fallback() {
        assert_eq!(file_name_for("Jane Doe"), "Jane Doe.pdf");
        assert_eq!(file_name_for("  Jane  "), "Jane.pdf");
        assert_eq!(file_name_for(""), "resume.pdf");
        assert_eq!(file_name_for("   "), "resume.pdf");
    }

    #[test]
    fn test_doc_meta_defaults_from_name() {
        let meta = DocMeta::for_resume("Jane Doe");
        assert_eq!(meta.title, "Jane Doe - CV");
        assert_eq!(meta.author, "Jane Doe");
        let blank = DocMeta::for_resume("");
        assert_eq!(blank.title, "Resume - CV");
        assert_eq!(blank.author, "User");
    }

    // ── assembly ────────────────────────────────────────────────────────────

    #[test]
    fn test_assemble_produces_single_page_pdf_with_annotation() {
        let g = geometry();
        let links = vec![PageLink {
            x: 20.0,
            y_top: 40.0,
            width: 60.0,
            height: 9.0,
            url: "mailto:a@b.com".to_string(),
        }];
        let bytes =
            assemble_single_page(&white_raster(400, 200), &g, &links, &DocMeta::for_resume("Jane"))
                .expect("assembles");

        assert!(bytes.starts_with(b"%PDF"));
        assert!(contains(&bytes, b"/URI"), "URI action present");
        assert!(contains(&bytes, b"mailto:a@b.com"), "target URL embedded");
        assert!(contains(&bytes, b"/DCTDecode"), "image stream is JPEG");
        assert!(contains(&bytes, b"/Count 1"), "exactly one page");
        assert!(contains(&bytes, b"Jane - CV"), "title metadata embedded");
    }

    #[test]
    fn test_assemble_without_links_omits_annotations() {
        let g = geometry();
        let bytes = assemble_single_page(&white_raster(40, 20), &g, &[], &DocMeta::for_resume(""))
            .expect("assembles");
        assert!(!contains(&bytes, b"/Annots"));
        assert!(contains(&bytes, b"Resume - CV"));
    }

    #[test]
    fn test_assemble_rejects_empty_capture() {
        let g = geometry();
        let raster = RasterImage {
            image: RgbaImage::new(0, 0),
            scale: 4.0,
        };
        assert!(matches!(
            assemble_single_page(&raster, &g, &[], &DocMeta::for_resume("x")),
            Err(ExportError::Assembly(_))
        ));
    }
}
