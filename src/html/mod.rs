//! Small, allocation-light helpers for the HTML the exporters emit.

mod escape;
mod format;

pub use escape::*;
pub use format::format;

pub(crate) use format::starts_with_block_tag;
