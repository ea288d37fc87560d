//! Configuration module for Trendsift
//!
//! This module resolves the two external inputs of a run: credential tokens
//! (from named environment channels) and the keyword list (first column of a
//! CSV file). Both are parsed once at startup, before any session is opened.

mod keywords;
mod tokens;

pub use keywords::read_keywords;
pub use tokens::{CredentialSources, TokenSet};
