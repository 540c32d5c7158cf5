// Page geometry, font metrics, and resize plumbing. The preview and the
// export renderer both read layout exclusively from here so they can never
// disagree about widths.

pub mod font_metrics;
pub mod geometry;
pub mod viewport;

pub use font_metrics::{contains_cjk, get_metrics, FontFace, FontMetricTable};
pub use geometry::{LayoutParams, Margins, PageGeometry, PT_PER_PX, PX_PER_PT};
pub use viewport::{ResizeSubscription, Viewport, ViewportFeed};
