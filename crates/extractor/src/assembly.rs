//! Page assembly
//!
//! Turns each top-level module reflection of a TypeDoc document into a page:
//! a function page for modules exporting a function, a constants page for
//! modules configured as such. Modules are independent of each other and share
//! only the read-only global index, so they are assembled in parallel.

use crate::comments::{find_category, find_exported_fn, find_fn_summary, find_fn_tag, find_summary};
use crate::index::{build_index, ReflectionIndex};
use crate::recovery::complete_reflection;
use docsync_core::config::DocsConfig;
use docsync_core::error::{Error, Result};
use docsync_core::models::{PageBase, PageKind, Submodule, TypeDocPage};
use docsync_core::reflection::Reflection;
use rayon::prelude::*;
use tracing::{debug, info};

/// Category of pages no group or override places elsewhere
pub const FALLBACK_CATEGORY: &str = "Misc";

/// A module selected for publishing
#[derive(Debug, Clone, Copy)]
pub enum ModuleReflection<'a> {
    Function {
        module: &'a Reflection,
        function: &'a Reflection,
        category: Option<&'a str>,
    },
    Constants {
        module: &'a Reflection,
        category: Option<&'a str>,
    },
}

impl<'a> ModuleReflection<'a> {
    pub fn module(&self) -> &'a Reflection {
        match self {
            ModuleReflection::Function { module, .. } | ModuleReflection::Constants { module, .. } => {
                module
            }
        }
    }

    pub fn kind(&self) -> PageKind {
        match self {
            ModuleReflection::Function { .. } => PageKind::Function,
            ModuleReflection::Constants { .. } => PageKind::Constants,
        }
    }
}

/// Decide what page, if any, a top-level module produces
pub fn classify_module<'a>(
    module: &'a Reflection,
    docs: &'a DocsConfig,
) -> Option<ModuleReflection<'a>> {
    let kind_override = module
        .file_name()
        .and_then(|file_name| docs.kind_override(file_name));
    let category = kind_override.and_then(|o| o.category.as_deref());

    if kind_override.is_some_and(|o| o.kind == PageKind::Constants) {
        return Some(ModuleReflection::Constants { module, category });
    }

    match find_exported_fn(module, docs.function_naming) {
        Some(function) => Some(ModuleReflection::Function {
            module,
            function,
            category,
        }),
        None => {
            debug!(module = %module.name, "No exported function found, skipping module");
            None
        }
    }
}

/// Build the pages of every top-level module of `document`
///
/// Pages come out in document order. An unsupported type expression anywhere
/// in a published module fails the whole run.
pub fn assemble_pages(
    document: &Reflection,
    docs: &DocsConfig,
    version: &str,
) -> Result<Vec<TypeDocPage>> {
    let global = build_index(document);
    info!(
        modules = document.children.len(),
        reflections = global.len(),
        "Indexed TypeDoc document"
    );

    let pages: Vec<Option<TypeDocPage>> = document
        .children
        .par_iter()
        .map(|module| match classify_module(module, docs) {
            Some(selected) => assemble_page(selected, &global, docs, version).map(Some),
            None => Ok(None),
        })
        .collect::<Result<_>>()?;

    let pages: Vec<TypeDocPage> = pages.into_iter().flatten().collect();
    info!(pages = pages.len(), "Assembled TypeDoc pages");
    Ok(pages)
}

/// Build the page for one selected module
pub fn assemble_page<'a>(
    selected: ModuleReflection<'a>,
    global: &ReflectionIndex<'a>,
    docs: &DocsConfig,
    version: &str,
) -> Result<TypeDocPage> {
    let module = selected.module();
    let completed = complete_reflection(module, global)?;
    if !completed.dangling.is_empty() {
        debug!(
            module = %module.name,
            dangling = ?completed.dangling,
            "Module keeps unresolved references"
        );
    }

    let (category, summary, pure) = match selected {
        ModuleReflection::Function {
            module,
            function,
            category,
        } => (
            category.or_else(|| find_category(module, function.id)),
            find_fn_summary(function),
            is_pure(function),
        ),
        ModuleReflection::Constants { module, category } => (
            category.or_else(|| find_category(module, module.id)),
            find_summary(module),
            true,
        ),
    };

    let submodules = if pure {
        docs.submodules.clone()
    } else {
        vec![Submodule::Default]
    };

    let doc = serde_json::to_string(&completed.reflection)
        .map_err(|e| Error::parse(module.name.clone(), format!("Failed to serialize reflection: {e}")))?;

    let name = module.name.clone();
    Ok(TypeDocPage {
        base: PageBase {
            package: docs.package_name.clone(),
            version: version.to_string(),
            slug: name.clone(),
            category: category.unwrap_or(FALLBACK_CATEGORY).to_string(),
            title: name.clone(),
            summary: summary.unwrap_or_default(),
            submodules,
        },
        name,
        doc,
        kind: selected.kind(),
        pure,
    })
}

/// Functions are pure unless tagged `@pure false`
pub fn is_pure(function: &Reflection) -> bool {
    find_fn_tag(function, "@pure").is_none_or(|tag| tag.trim() != "false")
}
