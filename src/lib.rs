//! Turns a parsed Handlebars-style template tree back into template text.
//!
//! The tree is produced by an external parser; this crate only reads it. A
//! single targeting rule ([`Options`]) can rewrite one positional argument of
//! one named helper call wherever it occurs.

mod ast;
mod error;
mod escape;
mod interface;
mod serializer;

// Crate-level imports to make convenient imports for the rest of the library.
pub(crate) use error::UnparseResult;

// Public exports.
pub use ast::{
    BlockStatement, BooleanLiteral, CommentStatement, ContentStatement, ElseChain, ElseClause,
    Hash, HashPair, MustacheStatement, Node, NodeType, NumberLiteral, PartialBlockStatement,
    PartialName, PartialStatement, PathExpression, Program, StringLiteral, SubExpression,
};
pub use error::UnparseError;
pub use interface::{Modifier, Options, quote_single};
pub use serializer::{Serializer, serialize, serialize_with};
