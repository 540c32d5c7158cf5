pub mod ops;
pub mod resume;

pub use ops::{Direction, EntryField, ModelError, ScalarField};
pub use resume::{Resume, SectionKey};
