//! Parser module for CODEOWNERS files.
//!
//! This module turns CODEOWNERS document text into an ordered [`RuleSet`]
//! with span metadata pointing back into the source.
//!
//! # Example
//!
//! ```rust
//! use codeowners_resolver_core::parse::parse_codeowners;
//!
//! let input = r#"
//! # CODEOWNERS file
//! *.rs @rustacean
//! /docs/ @docs-team
//! "#;
//!
//! let rules = parse_codeowners(input);
//! for rule in &rules {
//!     println!("line {}: {} -> {:?}", rule.line_number, rule.pattern, rule.owners);
//! }
//! ```

mod ast;
mod lexer;
mod parser;
pub mod span;

pub use ast::{Rule, RuleSet};
pub use parser::parse_codeowners;
pub use span::Span;

// Re-export lexer utilities that are useful to token-level callers
pub use lexer::{Field, OwnerKind, classify_owner, split_fields, strip_inline_comment};
