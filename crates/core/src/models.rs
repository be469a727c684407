//! Records written to the document store
//!
//! A published package version consists of one [`Package`] entry (shared by all
//! versions), one [`Version`] entry carrying the page index, and one [`Page`]
//! per documented function, constants module or static Markdown document.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Package submodule a page is available in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Submodule {
    Default,
    Fp,
}

impl Submodule {
    pub const ALL: [Submodule; 2] = [Submodule::Default, Submodule::Fp];
}

/// What a TypeDoc page documents
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PageKind {
    #[default]
    Function,
    Constants,
}

/// Page discriminator, as stored in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PageType {
    Markdown,
    TypeDoc,
}

/// Fields shared by every page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBase {
    pub package: String,
    pub version: String,
    pub slug: String,
    pub category: String,
    pub title: String,
    pub summary: String,
    pub submodules: Vec<Submodule>,
}

/// Static Markdown document page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownPage {
    #[serde(flatten)]
    pub base: PageBase,
    pub markdown: String,
}

/// Page generated from a TypeDoc module reflection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDocPage {
    #[serde(flatten)]
    pub base: PageBase,
    pub name: String,
    /// Stringified JSON of the self-contained reflection
    pub doc: String,
    pub kind: PageKind,
    pub pure: bool,
}

/// A documentation page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Page {
    Markdown(MarkdownPage),
    #[serde(rename = "typedoc")]
    TypeDoc(TypeDocPage),
}

impl Page {
    pub fn base(&self) -> &PageBase {
        match self {
            Page::Markdown(page) => &page.base,
            Page::TypeDoc(page) => &page.base,
        }
    }

    pub fn page_type(&self) -> PageType {
        match self {
            Page::Markdown(_) => PageType::Markdown,
            Page::TypeDoc(_) => PageType::TypeDoc,
        }
    }

    pub fn slug(&self) -> &str {
        &self.base().slug
    }

    /// Build the index entry stored in the version record
    pub fn preview(&self) -> PagePreview {
        let base = self.base();
        PagePreview {
            page_type: Some(self.page_type()),
            slug: base.slug.clone(),
            category: base.category.clone(),
            title: base.title.clone(),
            summary: base.summary.clone(),
            submodules: base.submodules.clone(),
        }
    }
}

impl From<MarkdownPage> for Page {
    fn from(page: MarkdownPage) -> Self {
        Page::Markdown(page)
    }
}

impl From<TypeDocPage> for Page {
    fn from(page: TypeDocPage) -> Self {
        Page::TypeDoc(page)
    }
}

/// Minimal page data used to render the pages index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePreview {
    /// Absent on records written before the field existed
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub page_type: Option<PageType>,
    pub slug: String,
    pub category: String,
    pub title: String,
    pub summary: String,
    pub submodules: Vec<Submodule>,
}

/// Minimal version data used to render the version picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionPreview {
    pub version: String,
    pub pre_release: bool,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
    pub submodules: Vec<Submodule>,
}

/// Package version record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub package: String,
    pub version: String,
    pub pre_release: bool,
    pub pages: Vec<PagePreview>,
    pub created_at: i64,
    pub categories: Vec<String>,
    pub submodules: Vec<Submodule>,
}

impl Version {
    pub fn preview(&self) -> VersionPreview {
        VersionPreview {
            version: self.version.clone(),
            pre_release: self.pre_release,
            created_at: self.created_at,
            submodules: self.submodules.clone(),
        }
    }
}

/// Package record listing every published version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub versions: Vec<VersionPreview>,
}
