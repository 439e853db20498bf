//! snippets-view - browse code snippets across every store
//!
//! Collects snippet definitions from workspace folders, the user's global
//! snippet store and installed extensions, and serves them as a two-level tree
//! (file → snippets) or a flat list.
//!
//! ## Pipeline
//!
//! 1. **Locate** ([`source`]): enumerate snippet files per source class
//! 2. **Parse** ([`parser`]): decode relaxed JSON into [`SnippetRecord`]s
//! 3. **Cache** ([`cache`]): memoize enumeration and parsing for the session
//! 4. **Filter/sort** ([`filter`]): exclusion regex, active language, scope specificity
//!
//! [`SnippetProvider`] ties these together and is what a host queries.

pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod fs;
pub mod notify;
pub mod parser;
pub mod presentation;
pub mod provider;
pub mod source;

pub use domain::*;
pub use error::SnippetError;
pub use provider::{ChangeOutcome, SnippetProvider};
