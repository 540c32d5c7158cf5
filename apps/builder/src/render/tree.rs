//! The visual tree the preview renders and the exporter captures.
#![allow(dead_code)]
//!
//! `build_tree` turns a resume plus its section order into a flat list of
//! typed blocks: the centered name, the single-line contact row, uppercase
//! section headers with separator rules, two-column entry rows, and
//! hanging-indent bullet lines. Reorder arrows travel in the tree as control
//! elements; capture hides them without disturbing geometry.

use serde::{Deserialize, Serialize};

use crate::models::resume::{Resume, SectionKey};

// ────────────────────────────────────────────────────────────────────────────
// Identity and mode
// ────────────────────────────────────────────────────────────────────────────

/// Stable identity of one element within a built tree. Hyperlinks get their
/// own ids so hotspot reconciliation can measure them individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u32);

/// Rendering mode: the on-screen preview, or the print-accurate tree the
/// export pipeline captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    Screen,
    PrintAccurate,
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

/// One piece of the contact line.
#[derive(Debug, Clone, PartialEq)]
pub enum InlinePiece {
    Text(String),
    Link {
        id: ElementId,
        text: String,
        href: String,
    },
    /// The `|` divider between contact items.
    Separator,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Centered name heading.
    Name(String),
    /// Centered, non-wrapping contact row.
    ContactLine(Vec<InlinePiece>),
    /// Uppercase section header.
    SectionHeader(String),
    /// Horizontal separator rule under a header.
    Rule,
    /// Two-column entry row: primary text left, dates/location right-aligned.
    /// `grouped` marks the second row of a visual pair (institution+degree,
    /// company+position) rendered with reduced inter-row spacing.
    TwoColRow {
        left: String,
        right: String,
        left_bold: bool,
        grouped: bool,
    },
    /// One hanging-indent bullet line.
    BulletLine(String),
    /// Reorder arrows attached to the preceding heading. Control-only.
    ReorderControls,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub section: SectionKey,
    pub block: Block,
    pub is_control: bool,
}

/// A hyperlink within the tree, by element id.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRef {
    pub id: ElementId,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualTree {
    pub mode: RenderMode,
    pub elements: Vec<Element>,
}

impl VisualTree {
    /// All hyperlinks in document order.
    pub fn links(&self) -> Vec<LinkRef> {
        let mut out = Vec::new();
        for element in &self.elements {
            if let Block::ContactLine(pieces) = &element.block {
                for piece in pieces {
                    if let InlinePiece::Link { id, href, .. } = piece {
                        out.push(LinkRef {
                            id: *id,
                            href: href.clone(),
                        });
                    }
                }
            }
        }
        out
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tree construction
// ────────────────────────────────────────────────────────────────────────────

struct IdAlloc(u32);

impl IdAlloc {
    fn next(&mut self) -> ElementId {
        let id = ElementId(self.0);
        self.0 += 1;
        id
    }
}

/// Builds the visual tree for a resume in its section order.
pub fn build_tree(resume: &Resume, mode: RenderMode) -> VisualTree {
    let mut ids = IdAlloc(0);
    let mut elements = Vec::new();

    for &section in &resume.section_order {
        match section {
            SectionKey::Profile => build_profile(resume, &mut ids, &mut elements),
            SectionKey::Education => {
                build_header(section, &mut ids, &mut elements);
                for entry in &resume.education {
                    push(
                        &mut elements,
                        &mut ids,
                        section,
                        Block::TwoColRow {
                            left: entry.institution.clone(),
                            right: entry.dates.clone(),
                            left_bold: true,
                            grouped: false,
                        },
                    );
                    push(
                        &mut elements,
                        &mut ids,
                        section,
                        Block::TwoColRow {
                            left: entry.degree.clone(),
                            right: entry.location.clone(),
                            left_bold: false,
                            grouped: true,
                        },
                    );
                    for bullet in &entry.details {
                        push(&mut elements, &mut ids, section, Block::BulletLine(bullet.clone()));
                    }
                }
            }
            SectionKey::Skills => {
                build_header(section, &mut ids, &mut elements);
                for entry in &resume.skills {
                    push(&mut elements, &mut ids, section, Block::BulletLine(entry.skill.clone()));
                }
            }
            SectionKey::Experience => {
                build_header(section, &mut ids, &mut elements);
                for entry in &resume.experience {
                    push(
                        &mut elements,
                        &mut ids,
                        section,
                        Block::TwoColRow {
                            left: entry.company.clone(),
                            right: entry.dates.clone(),
                            left_bold: true,
                            grouped: false,
                        },
                    );
                    push(
                        &mut elements,
                        &mut ids,
                        section,
                        Block::TwoColRow {
                            left: entry.position.clone(),
                            right: entry.location.clone(),
                            left_bold: false,
                            grouped: true,
                        },
                    );
                    for bullet in &entry.details {
                        push(&mut elements, &mut ids, section, Block::BulletLine(bullet.clone()));
                    }
                }
            }
            SectionKey::Projects => {
                build_header(section, &mut ids, &mut elements);
                for entry in &resume.projects {
                    push(
                        &mut elements,
                        &mut ids,
                        section,
                        Block::TwoColRow {
                            left: entry.title.clone(),
                            right: entry.dates.clone(),
                            left_bold: true,
                            grouped: false,
                        },
                    );
                    for bullet in &entry.description {
                        push(&mut elements, &mut ids, section, Block::BulletLine(bullet.clone()));
                    }
                }
            }
        }
    }

    VisualTree { mode, elements }
}

fn push(elements: &mut Vec<Element>, ids: &mut IdAlloc, section: SectionKey, block: Block) {
    elements.push(Element {
        id: ids.next(),
        section,
        block,
        is_control: false,
    });
}

fn push_controls(elements: &mut Vec<Element>, ids: &mut IdAlloc, section: SectionKey) {
    elements.push(Element {
        id: ids.next(),
        section,
        block: Block::ReorderControls,
        is_control: true,
    });
}

fn build_header(section: SectionKey, ids: &mut IdAlloc, elements: &mut Vec<Element>) {
    push(
        elements,
        ids,
        section,
        Block::SectionHeader(section.title().to_uppercase()),
    );
    push_controls(elements, ids, section);
    push(elements, ids, section, Block::Rule);
}

fn build_profile(resume: &Resume, ids: &mut IdAlloc, elements: &mut Vec<Element>) {
    push(elements, ids, SectionKey::Profile, Block::Name(resume.name.clone()));
    push_controls(elements, ids, SectionKey::Profile);

    let mut pieces: Vec<InlinePiece> = Vec::new();
    let add = |pieces: &mut Vec<InlinePiece>, piece: InlinePiece| {
        if !pieces.is_empty() {
            pieces.push(InlinePiece::Separator);
        }
        pieces.push(piece);
    };

    if !resume.location.is_empty() {
        add(&mut pieces, InlinePiece::Text(resume.location.clone()));
    }
    if !resume.phone.is_empty() {
        add(&mut pieces, InlinePiece::Text(resume.phone.clone()));
    }
    if !resume.email.is_empty() {
        let piece = InlinePiece::Link {
            id: ids.next(),
            text: resume.email.clone(),
            href: format!("mailto:{}", resume.email),
        };
        add(&mut pieces, piece);
    }
    if !resume.linkedin.is_empty() {
        let piece = InlinePiece::Link {
            id: ids.next(),
            text: resume.linkedin.clone(),
            href: ensure_scheme(&resume.linkedin),
        };
        add(&mut pieces, piece);
    }
    if !resume.github.is_empty() {
        let piece = InlinePiece::Link {
            id: ids.next(),
            text: strip_scheme(&resume.github),
            href: ensure_scheme(&resume.github),
        };
        add(&mut pieces, piece);
    }

    if !pieces.is_empty() {
        push(elements, ids, SectionKey::Profile, Block::ContactLine(pieces));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// URL helpers
// ────────────────────────────────────────────────────────────────────────────

/// Prefixes `https://` onto bare URLs; already-schemed URLs pass through.
pub fn ensure_scheme(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Display form of a profile URL: scheme and `www.` removed.
pub fn strip_scheme(url: &str) -> String {
    let mut rest = url;
    let lower = url.to_ascii_lowercase();
    for prefix in ["https://", "http://"] {
        if lower.starts_with(prefix) {
            rest = &rest[prefix.len()..];
            break;
        }
    }
    if rest.to_ascii_lowercase().starts_with("www.") {
        rest = &rest[4..];
    }
    rest.to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
