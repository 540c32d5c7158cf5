// Preview rendering: the visual tree, the computed style sheets, the
// headless layout pass, and the capture-surface abstraction the exporter
// talks to.

pub mod flow;
pub mod headless;
pub mod snapshot;
pub mod style;
pub mod svg;
pub mod tree;

pub use headless::HeadlessSnapshot;
pub use snapshot::{RasterImage, RasterOptions, RectPx, RenderSnapshot, SnapshotError};
pub use style::{compute_export_styles, screen_styles, StyleSheet};
pub use tree::{build_tree, Block, Element, ElementId, LinkRef, RenderMode, VisualTree};
