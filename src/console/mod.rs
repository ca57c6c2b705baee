//! In-process command console.
//!
//! Commands live in a namespace tree addressed by dotted paths such as
//! `time.scale`. A raw input line is split into a path and a parameter
//! string, the path is resolved case-insensitively, and the leaf's callback
//! receives the parameter string. Typed functions and variables are exposed
//! through the [`Binder`], which converts parameter tokens with the
//! [`TypeRegistry`].

mod binder;
pub mod commands;
mod complete;
mod convert;
mod dispatcher;
pub mod formatting;
pub mod parser;
mod tokenizer;
mod tree;
mod types;

pub use binder::{Binder, BoundCommand, ParamInfo, ParamList};
pub use complete::{complete, first_common_prefix_length};
pub use convert::{TypeRegistry, Vec2, Vec3, Vec4, VectorParseError, numbers_in};
pub use dispatcher::{Console, OutputSink};
pub use parser::{ParsedLine, parse_line};
pub use tokenizer::tokenize;
pub use tree::{ClosestMatch, CommandLeaf, CommandTree, NodeRef};
pub use types::{Command, CommandResult, ConsoleError, Invocation};

#[cfg(test)]
mod tests;
