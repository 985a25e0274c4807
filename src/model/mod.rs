//! The course document tree, in its lenient draft form and its normalized form.

mod course;
mod draft;
mod ids;
mod slug;

pub use course::*;
pub use draft::*;
pub use ids::*;
pub use slug::*;
