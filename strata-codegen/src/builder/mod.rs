//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - fluent API for building indented code
//! - [`CodeFragment`] - intermediate representation for code pieces
//! - [`Renderable`] - types that can be converted to code fragments
//! - [`Indent`] - indentation configuration

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
