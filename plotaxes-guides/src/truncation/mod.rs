pub mod layout;
pub mod opts;
pub mod shapes;

pub use layout::{truncation_layout, TruncationLayout};
pub use opts::{HighlightStyle, ShapeLayer};
pub use shapes::{truncation_shapes, ShapeRef, ShapeSpan, TruncationShape};
