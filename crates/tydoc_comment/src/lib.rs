//! tydoc_comment: the comment-block collaborator model and the reassembly
//! layer that maps formatted text back onto the original comment layout.

pub mod block;
pub mod reassemble;

pub use block::{CommentLine, TagRegion};
pub use reassemble::{indent_for, min_indent, reindent, slice_location, splice};
