//! # Syntax Primitives
//!
//! Byte-offset spans and line bookkeeping shared by the lexer and the
//! document highlighter.

pub mod line_col;
pub mod text;

pub use line_col::LineIndex;
pub use text::{TextRange, TextSize};
