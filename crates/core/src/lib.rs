//! Core types for the docsync documentation ingestion system
//!
//! This crate provides the foundational abstractions used throughout
//! docsync, including:
//!
//! - **Reflections**: the TypeDoc JSON reflection tree and its type expressions
//! - **Models**: package, version and page records written to the document store
//! - **Configuration**: layered system configuration
//! - **Error handling**: Unified error types
//!

pub mod config;
pub mod error;
pub mod models;
pub mod reflection;

// Re-export main types for convenience
pub use config::{Config, DocsConfig, FunctionNaming, KindOverride, StaticDoc, StorageConfig};
pub use error::{Error, Result, ResultExt};
pub use models::{
    MarkdownPage, Package, Page, PageBase, PageKind, PagePreview, PageType, Submodule, TypeDocPage,
    Version, VersionPreview,
};
pub use reflection::{
    Comment, Reflection, ReflectionId, ReflectionKind, Signature, SomeType, TypeParameter,
    TypeParameters,
};

