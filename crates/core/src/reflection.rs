//! TypeDoc JSON reflection model
//!
//! Only the fields the extractor reads are typed. Every other field of a
//! reflection, signature or type expression is kept in an `extra` map so that a
//! serialized page document carries the complete reflection the renderer expects.

use serde::de::{DeserializeOwned, Error as DeError};
use serde::ser::{Error as SerError, SerializeMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::ops::Deref;

/// Unique reflection identifier within one TypeDoc document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReflectionId(pub u64);

impl fmt::Display for ReflectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ReflectionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// TypeDoc reflection kind, stored in JSON as a numeric bit flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum ReflectionKind {
    Project,
    Module,
    Namespace,
    Enum,
    EnumMember,
    Variable,
    Function,
    Class,
    Interface,
    Constructor,
    Property,
    Method,
    CallSignature,
    IndexSignature,
    ConstructorSignature,
    Parameter,
    TypeLiteral,
    TypeParameter,
    Accessor,
    GetSignature,
    SetSignature,
    TypeAlias,
    Reference,
    /// A flag this model does not name; round-trips unchanged
    Unknown(u32),
}

impl Default for ReflectionKind {
    fn default() -> Self {
        Self::Unknown(0)
    }
}

impl From<u32> for ReflectionKind {
    fn from(flag: u32) -> Self {
        match flag {
            0x1 => Self::Project,
            0x2 => Self::Module,
            0x4 => Self::Namespace,
            0x8 => Self::Enum,
            0x10 => Self::EnumMember,
            0x20 => Self::Variable,
            0x40 => Self::Function,
            0x80 => Self::Class,
            0x100 => Self::Interface,
            0x200 => Self::Constructor,
            0x400 => Self::Property,
            0x800 => Self::Method,
            0x1000 => Self::CallSignature,
            0x2000 => Self::IndexSignature,
            0x4000 => Self::ConstructorSignature,
            0x8000 => Self::Parameter,
            0x10000 => Self::TypeLiteral,
            0x20000 => Self::TypeParameter,
            0x40000 => Self::Accessor,
            0x80000 => Self::GetSignature,
            0x100000 => Self::SetSignature,
            0x200000 => Self::TypeAlias,
            0x400000 => Self::Reference,
            other => Self::Unknown(other),
        }
    }
}

impl From<ReflectionKind> for u32 {
    fn from(kind: ReflectionKind) -> Self {
        match kind {
            ReflectionKind::Project => 0x1,
            ReflectionKind::Module => 0x2,
            ReflectionKind::Namespace => 0x4,
            ReflectionKind::Enum => 0x8,
            ReflectionKind::EnumMember => 0x10,
            ReflectionKind::Variable => 0x20,
            ReflectionKind::Function => 0x40,
            ReflectionKind::Class => 0x80,
            ReflectionKind::Interface => 0x100,
            ReflectionKind::Constructor => 0x200,
            ReflectionKind::Property => 0x400,
            ReflectionKind::Method => 0x800,
            ReflectionKind::CallSignature => 0x1000,
            ReflectionKind::IndexSignature => 0x2000,
            ReflectionKind::ConstructorSignature => 0x4000,
            ReflectionKind::Parameter => 0x8000,
            ReflectionKind::TypeLiteral => 0x10000,
            ReflectionKind::TypeParameter => 0x20000,
            ReflectionKind::Accessor => 0x40000,
            ReflectionKind::GetSignature => 0x80000,
            ReflectionKind::SetSignature => 0x100000,
            ReflectionKind::TypeAlias => 0x200000,
            ReflectionKind::Reference => 0x400000,
            ReflectionKind::Unknown(flag) => flag,
        }
    }
}

/// A node of the TypeDoc reflection tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
    pub id: ReflectionId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: ReflectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Reflection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signatures: Vec<Signature>,
    #[serde(flatten)]
    pub type_parameters: TypeParameters,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<SomeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<SomeType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extended_types: Vec<SomeType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<ReflectionGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<ReflectionCategory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceReference>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Reflection {
    /// Create a bare reflection; mostly useful for building trees in code
    pub fn new(id: impl Into<ReflectionId>, name: impl Into<String>, kind: ReflectionKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            comment: None,
            children: Vec::new(),
            signatures: Vec::new(),
            type_parameters: TypeParameters::default(),
            type_: None,
            inherited_from: None,
            extended_types: Vec::new(),
            groups: Vec::new(),
            categories: Vec::new(),
            sources: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn is_function(&self) -> bool {
        self.kind == ReflectionKind::Function
    }

    /// File name of the first source the reflection is declared in
    pub fn file_name(&self) -> Option<&str> {
        self.sources.first().map(|s| s.file_name.as_str())
    }

    /// Find a direct child by name and kind
    pub fn find_child(&self, name: &str, kind: ReflectionKind) -> Option<&Reflection> {
        self.children
            .iter()
            .find(|child| child.kind == kind && child.name == name)
    }
}

/// Call or construct signature of a function-like reflection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub id: ReflectionId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: ReflectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Reflection>,
    #[serde(flatten)]
    pub type_parameters: TypeParameters,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<SomeType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const TYPE_PARAMETERS_KEY: &str = "typeParameters";
const LEGACY_TYPE_PARAMETERS_KEY: &str = "typeParameter";

/// Type parameters of a reflection or signature
///
/// Older TypeDoc versions write them under `typeParameter`. The key found in
/// the input is the key written back out; `typeParameters` wins if both appear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeParameters {
    params: Vec<TypeParameter>,
    legacy_key: bool,
}

impl TypeParameters {
    pub fn new(params: Vec<TypeParameter>) -> Self {
        Self {
            params,
            legacy_key: false,
        }
    }

    /// Whether the list is read from and written to `typeParameter`
    pub fn uses_legacy_key(&self) -> bool {
        self.legacy_key
    }
}

impl Deref for TypeParameters {
    type Target = [TypeParameter];

    fn deref(&self) -> &[TypeParameter] {
        &self.params
    }
}

impl From<Vec<TypeParameter>> for TypeParameters {
    fn from(params: Vec<TypeParameter>) -> Self {
        Self::new(params)
    }
}

impl Serialize for TypeParameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(usize::from(!self.params.is_empty())))?;
        if !self.params.is_empty() {
            let key = if self.legacy_key {
                LEGACY_TYPE_PARAMETERS_KEY
            } else {
                TYPE_PARAMETERS_KEY
            };
            map.serialize_entry(key, &self.params)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TypeParameters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Keys {
            #[serde(default, rename = "typeParameters")]
            current: Option<Vec<TypeParameter>>,
            #[serde(default, rename = "typeParameter")]
            legacy: Option<Vec<TypeParameter>>,
        }

        let keys = Keys::deserialize(deserializer)?;
        Ok(match (keys.current, keys.legacy) {
            (Some(params), _) => Self::new(params),
            (None, Some(params)) => Self {
                params,
                legacy_key: true,
            },
            (None, None) => Self::default(),
        })
    }
}

/// Generic type parameter with optional constraint and default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParameter {
    pub id: ReflectionId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: ReflectionKind,
    /// Constraint (`T extends ...`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<SomeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<SomeType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Doc comment, in either the current (`summary`/`blockTags`) or the legacy
/// (`shortText`/`text`/`tags`) TypeDoc layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub summary: Vec<CommentDisplayPart>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub block_tags: Vec<CommentTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<LegacyCommentTag>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentDisplayPart {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommentDisplayPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
            extra: Map::new(),
        }
    }
}

/// Block tag such as `@returns` or `@example`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentTag {
    pub tag: String,
    #[serde(default)]
    pub content: Vec<CommentDisplayPart>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Tag of the legacy comment layout; the tag name carries no `@`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyCommentTag {
    pub tag: String,
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionGroup {
    pub title: String,
    #[serde(default)]
    pub children: Vec<ReflectionId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<ReflectionCategory>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionCategory {
    pub title: String,
    #[serde(default)]
    pub children: Vec<ReflectionId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReference {
    pub file_name: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub character: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Type expression, discriminated by the JSON `type` field
///
/// Kinds this model does not handle deserialize into [`SomeType::Unsupported`]
/// so the decision to reject them is left to the code walking the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SomeType {
    Intrinsic(IntrinsicType),
    Literal(LiteralType),
    Reference(ReferenceType),
    Array(ArrayType),
    Union(UnionType),
    Intersection(IntersectionType),
    Tuple(TupleType),
    TypeOperator(TypeOperatorType),
    Conditional(ConditionalType),
    Mapped(MappedType),
    IndexedAccess(IndexedAccessType),
    Reflection(ReflectionType),
    Unsupported { kind: String, raw: Value },
}

impl SomeType {
    /// The `type` discriminator string
    pub fn kind(&self) -> &str {
        match self {
            SomeType::Intrinsic(_) => "intrinsic",
            SomeType::Literal(_) => "literal",
            SomeType::Reference(_) => "reference",
            SomeType::Array(_) => "array",
            SomeType::Union(_) => "union",
            SomeType::Intersection(_) => "intersection",
            SomeType::Tuple(_) => "tuple",
            SomeType::TypeOperator(_) => "typeOperator",
            SomeType::Conditional(_) => "conditional",
            SomeType::Mapped(_) => "mapped",
            SomeType::IndexedAccess(_) => "indexedAccess",
            SomeType::Reflection(_) => "reflection",
            SomeType::Unsupported { kind, .. } => kind,
        }
    }

    pub fn intrinsic(name: impl Into<String>) -> Self {
        SomeType::Intrinsic(IntrinsicType {
            name: name.into(),
            extra: Map::new(),
        })
    }

    /// Reference to a reflection of the same document
    pub fn reference(name: impl Into<String>, target: impl Into<ReflectionId>) -> Self {
        SomeType::Reference(ReferenceType {
            name: name.into(),
            target: Some(ReferenceTarget::Id(target.into())),
            id: None,
            type_arguments: Vec::new(),
            package: None,
            refers_to_type_parameter: false,
            extra: Map::new(),
        })
    }

    /// Target id when this is a reference into the same document
    pub fn reference_target(&self) -> Option<ReflectionId> {
        match self {
            SomeType::Reference(reference) => reference.target_id(),
            _ => None,
        }
    }
}

fn from_payload<T: DeserializeOwned, E: DeError>(kind: &str, value: Value) -> Result<T, E> {
    serde_json::from_value(value).map_err(|e| E::custom(format!("invalid {kind} type: {e}")))
}

impl<'de> Deserialize<'de> for SomeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| D::Error::missing_field("type"))?;

        let mut payload = value.clone();
        if let Value::Object(map) = &mut payload {
            map.remove("type");
        }

        let ty = match kind.as_str() {
            "intrinsic" => SomeType::Intrinsic(from_payload(&kind, payload)?),
            "literal" => SomeType::Literal(from_payload(&kind, payload)?),
            "reference" => SomeType::Reference(from_payload(&kind, payload)?),
            "array" => SomeType::Array(from_payload(&kind, payload)?),
            "union" => SomeType::Union(from_payload(&kind, payload)?),
            "intersection" => SomeType::Intersection(from_payload(&kind, payload)?),
            "tuple" => SomeType::Tuple(from_payload(&kind, payload)?),
            "typeOperator" => SomeType::TypeOperator(from_payload(&kind, payload)?),
            "conditional" => SomeType::Conditional(from_payload(&kind, payload)?),
            "mapped" => SomeType::Mapped(from_payload(&kind, payload)?),
            "indexedAccess" => SomeType::IndexedAccess(from_payload(&kind, payload)?),
            "reflection" => SomeType::Reflection(from_payload(&kind, payload)?),
            _ => SomeType::Unsupported { kind, raw: value },
        };
        Ok(ty)
    }
}

impl Serialize for SomeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let payload = match self {
            SomeType::Unsupported { raw, .. } => return raw.serialize(serializer),
            SomeType::Intrinsic(t) => serde_json::to_value(t),
            SomeType::Literal(t) => serde_json::to_value(t),
            SomeType::Reference(t) => serde_json::to_value(t),
            SomeType::Array(t) => serde_json::to_value(t),
            SomeType::Union(t) => serde_json::to_value(t),
            SomeType::Intersection(t) => serde_json::to_value(t),
            SomeType::Tuple(t) => serde_json::to_value(t),
            SomeType::TypeOperator(t) => serde_json::to_value(t),
            SomeType::Conditional(t) => serde_json::to_value(t),
            SomeType::Mapped(t) => serde_json::to_value(t),
            SomeType::IndexedAccess(t) => serde_json::to_value(t),
            SomeType::Reflection(t) => serde_json::to_value(t),
        };

        let mut value = payload.map_err(S::Error::custom)?;
        if let Value::Object(map) = &mut value {
            map.insert("type".to_string(), Value::String(self.kind().to_string()));
        }
        value.serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntrinsicType {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralType {
    #[serde(default)]
    pub value: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Where a reference points: a reflection id of this document, or a symbol
/// descriptor for declarations outside of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceTarget {
    Id(ReflectionId),
    Symbol(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceType {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ReferenceTarget>,
    /// Target id in documents written before `target` existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ReflectionId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<SomeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Set when the name is a type parameter in scope rather than a declaration
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub refers_to_type_parameter: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReferenceType {
    /// Id of the referenced reflection, if it lives in this document
    pub fn target_id(&self) -> Option<ReflectionId> {
        if self.refers_to_type_parameter {
            return None;
        }
        match &self.target {
            Some(ReferenceTarget::Id(id)) => Some(*id),
            Some(ReferenceTarget::Symbol(_)) => None,
            None => self.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayType {
    pub element_type: Box<SomeType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionType {
    pub types: Vec<SomeType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionType {
    pub types: Vec<SomeType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleType {
    #[serde(default)]
    pub elements: Vec<SomeType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeOperatorType {
    pub operator: String,
    pub target: Box<SomeType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalType {
    pub check_type: Box<SomeType>,
    pub extends_type: Box<SomeType>,
    pub true_type: Box<SomeType>,
    pub false_type: Box<SomeType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedType {
    #[serde(default)]
    pub parameter: String,
    pub parameter_type: Box<SomeType>,
    pub template_type: Box<SomeType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedAccessType {
    pub object_type: Box<SomeType>,
    pub index_type: Box<SomeType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Inline anonymous declaration (object literal or function type)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionType {
    pub declaration: Box<Reflection>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
