//! tydoc_ast: tokens and syntax tree nodes for the comment type and import
//! grammars.

pub mod build;
pub mod node;
pub mod token;

pub use node::*;
pub use token::{Keyword, Punct, Token, TokenKind};
