//! Lookups over doc comments, groups and categories
//!
//! Tags are given with their `@` prefix. Both TypeDoc comment layouts are read:
//! `summary`/`blockTags` and the legacy `shortText`/`text`/`tags`.

use docsync_core::config::FunctionNaming;
use docsync_core::reflection::{
    Comment, CommentDisplayPart, CommentTag, Reflection, ReflectionId, ReflectionKind, Signature,
};

/// Anything carrying a doc comment
pub trait Commented {
    fn comment(&self) -> Option<&Comment>;
}

impl Commented for Reflection {
    fn comment(&self) -> Option<&Comment> {
        self.comment.as_ref()
    }
}

impl Commented for Signature {
    fn comment(&self) -> Option<&Comment> {
        self.comment.as_ref()
    }
}

pub fn join_comment_parts(parts: &[CommentDisplayPart]) -> String {
    parts.iter().map(|part| part.text.as_str()).collect()
}

pub fn join_tag(tag: &CommentTag) -> String {
    join_comment_parts(&tag.content)
}

fn legacy_name(tag: &str) -> &str {
    tag.trim_start_matches('@')
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Content of the first `tag` in the comment
///
/// `@summary` reads the comment summary and `@description` the legacy comment
/// text before falling back to an explicit tag.
pub fn find_tag(item: &impl Commented, tag: &str) -> Option<String> {
    let comment = item.comment()?;

    match tag {
        "@summary" => {
            if !comment.summary.is_empty() {
                return Some(join_comment_parts(&comment.summary));
            }
            if let Some(text) = comment.short_text.as_deref().and_then(non_empty) {
                return Some(text);
            }
        }
        "@description" => {
            if let Some(text) = comment.text.as_deref().and_then(non_empty) {
                return Some(text);
            }
        }
        _ => {}
    }

    if let Some(found) = comment.block_tags.iter().find(|b| b.tag == tag) {
        return Some(join_tag(found));
    }

    comment
        .tags
        .iter()
        .find(|t| t.tag == legacy_name(tag))
        .map(|t| t.text.trim().to_string())
}

/// Content of every `tag` in the comment
pub fn find_tags(item: &impl Commented, tag: &str) -> Vec<String> {
    let Some(comment) = item.comment() else {
        return Vec::new();
    };

    let block = comment
        .block_tags
        .iter()
        .filter(|b| b.tag == tag)
        .map(join_tag);
    let legacy = comment
        .tags
        .iter()
        .filter(|t| t.tag == legacy_name(tag))
        .map(|t| t.text.trim().to_string());
    block.chain(legacy).collect()
}

pub fn find_summary(item: &impl Commented) -> Option<String> {
    find_tag(item, "@summary")
}

pub fn find_description(item: &impl Commented) -> Option<String> {
    find_tag(item, "@description")
}

pub fn find_examples(item: &impl Commented) -> Vec<String> {
    find_tags(item, "@example")
}

/// First non-empty `tag` across the function's signatures
pub fn find_fn_tag(function: &Reflection, tag: &str) -> Option<String> {
    function
        .signatures
        .iter()
        .filter_map(|signature| find_tag(signature, tag))
        .find(|content| !content.is_empty())
}

/// Every `tag` across the function's signatures
pub fn find_fn_tags(function: &Reflection, tag: &str) -> Vec<String> {
    function
        .signatures
        .iter()
        .flat_map(|signature| find_tags(signature, tag))
        .collect()
}

pub fn find_fn_summary(function: &Reflection) -> Option<String> {
    find_fn_tag(function, "@summary")
}

pub fn find_fn_description(function: &Reflection) -> Option<String> {
    find_fn_tag(function, "@description")
}

pub fn find_fn_returns(function: &Reflection) -> Option<String> {
    find_fn_tag(function, "@returns")
}

pub fn find_fn_examples(function: &Reflection) -> Vec<String> {
    find_fn_tags(function, "@example")
}

/// Category title of the reflection `id` within `container`
///
/// Looks in the categories of the group listing `id`, then in the container's
/// own categories.
pub fn find_category(container: &Reflection, id: ReflectionId) -> Option<&str> {
    let grouped = container
        .groups
        .iter()
        .find(|group| group.children.contains(&id))
        .and_then(|group| {
            group
                .categories
                .iter()
                .find(|category| category.children.contains(&id))
        });

    grouped
        .or_else(|| {
            container
                .categories
                .iter()
                .find(|category| category.children.contains(&id))
        })
        .map(|category| category.title.as_str())
}

/// The function a module reflection exports
pub fn find_exported_fn(module: &Reflection, naming: FunctionNaming) -> Option<&Reflection> {
    let name = match naming {
        FunctionNaming::ModuleName => module.name.as_str(),
        FunctionNaming::Default => "default",
    };
    module.find_child(name, ReflectionKind::Function)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Reflection {
        serde_json::from_value(value).expect("valid reflection")
    }

    fn add_days() -> Reflection {
        parse(json!({
            "id": 10,
            "name": "addDays",
            "kind": 2,
            "groups": [{ "title": "Functions", "children": [11],
                "categories": [{ "title": "Day Helpers", "children": [11] }] }],
            "children": [{
                "id": 11,
                "name": "addDays",
                "kind": 64,
                "signatures": [
                    { "id": 12, "name": "addDays", "kind": 4096, "comment": {
                        "summary": [],
                        "blockTags": [{ "tag": "@example", "content": [{ "kind": "code", "text": "addDays(d, 1)" }] }]
                    }},
                    { "id": 13, "name": "addDays", "kind": 4096, "comment": {
                        "summary": [
                            { "kind": "text", "text": "Add the specified number of " },
                            { "kind": "code", "text": "`days`" }
                        ],
                        "blockTags": [
                            { "tag": "@description", "content": [{ "kind": "text", "text": "Longer text." }] },
                            { "tag": "@returns", "content": [{ "kind": "text", "text": "The new date" }] },
                            { "tag": "@example", "content": [{ "kind": "code", "text": "addDays(d, 2)" }] }
                        ]
                    }}
                ]
            }]
        }))
    }

    #[test]
    fn test_fn_tags_across_signatures() {
        let module = add_days();
        let function =
            find_exported_fn(&module, FunctionNaming::ModuleName).expect("exported function");

        assert_eq!(
            find_fn_summary(function).as_deref(),
            Some("Add the specified number of `days`")
        );
        assert_eq!(find_fn_description(function).as_deref(), Some("Longer text."));
        assert_eq!(find_fn_returns(function).as_deref(), Some("The new date"));
        assert_eq!(
            find_fn_examples(function),
            vec!["addDays(d, 1)".to_string(), "addDays(d, 2)".to_string()]
        );
        assert_eq!(find_fn_tag(function, "@pure"), None);
    }

    #[test]
    fn test_legacy_comment_layout() {
        let signature: Signature = serde_json::from_value(json!({
            "id": 1,
            "name": "format",
            "kind": 4096,
            "comment": {
                "shortText": "Format the date.",
                "text": "Returns the formatted date string.\n",
                "tags": [
                    { "tag": "example", "text": "format(d, 'yyyy')\n" },
                    { "tag": "pure", "text": "false" }
                ]
            }
        }))
        .expect("valid signature");

        assert_eq!(find_summary(&signature).as_deref(), Some("Format the date."));
        assert_eq!(
            find_description(&signature).as_deref(),
            Some("Returns the formatted date string.")
        );
        assert_eq!(find_tag(&signature, "@pure").as_deref(), Some("false"));
        assert_eq!(find_examples(&signature), vec!["format(d, 'yyyy')".to_string()]);
    }

    #[test]
    fn test_summary_falls_back_to_block_tag() {
        let reflection = parse(json!({
            "id": 1,
            "name": "constants",
            "kind": 2,
            "comment": { "summary": [], "blockTags": [
                { "tag": "@summary", "content": [{ "kind": "text", "text": "Useful constants" }] }
            ]}
        }));

        assert_eq!(find_summary(&reflection).as_deref(), Some("Useful constants"));
        assert_eq!(find_description(&reflection), None);
    }

    #[test]
    fn test_missing_comment() {
        let reflection = parse(json!({ "id": 1, "name": "x", "kind": 64 }));
        assert_eq!(find_summary(&reflection), None);
        assert!(find_examples(&reflection).is_empty());
        assert_eq!(find_fn_summary(&reflection), None);
    }

    #[test]
    fn test_find_category() {
        let module = add_days();
        assert_eq!(find_category(&module, ReflectionId(11)), Some("Day Helpers"));
        assert_eq!(find_category(&module, ReflectionId(99)), None);

        let flat = parse(json!({
            "id": 1, "name": "m", "kind": 2,
            "groups": [{ "title": "Functions", "children": [2] }],
            "categories": [{ "title": "Common Helpers", "children": [2] }]
        }));
        assert_eq!(find_category(&flat, ReflectionId(2)), Some("Common Helpers"));
    }

    #[test]
    fn test_find_exported_fn_naming() {
        let module = parse(json!({
            "id": 1,
            "name": "addDays",
            "kind": 2,
            "children": [
                { "id": 2, "name": "default", "kind": 64 },
                { "id": 3, "name": "AddDaysOptions", "kind": 256 },
                { "id": 4, "name": "addDays", "kind": 32 }
            ]
        }));

        assert_eq!(
            find_exported_fn(&module, FunctionNaming::Default).map(|f| f.id),
            Some(ReflectionId(2))
        );
        // A variable with the module name is not a function
        assert!(find_exported_fn(&module, FunctionNaming::ModuleName).is_none());
    }
}
