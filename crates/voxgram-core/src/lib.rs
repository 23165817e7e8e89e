#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the voxgram crates.
//!
//! - **Documents**: a generic element tree (`Element`, `Content`) and the XML
//!   reader that produces it. Grammar loading only sees the tree.
//! - **Interning**: `Interner`/`Symbol` for rule identifiers.
//! - **Text**: utterance normalization applied to grammar words and input alike.
//! - **Colors**: ANSI palette for CLI and trace output.

pub mod colors;
pub mod document;
pub mod interner;
pub mod text;


pub use colors::Colors;
pub use document::{Content, DocumentError, Element, parse_xml};
pub use interner::{Interner, Symbol};
pub use text::normalize;
