//! Module metadata: declared types, their methods, and the tags attached to each.
//!
//! A module manifest is the build's declarative record of what a compiled test
//! artifact declares. The extractor only ever reads it through [`Tagged`], so
//! tag lookup stays an exact-name match on `(name, arguments)` pairs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One constructor-style argument attached to a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagArgument {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl TagArgument {
    /// The raw value: strings unquoted, booleans as `True`/`False`.
    pub fn value(&self) -> String {
        match self {
            TagArgument::Bool(true) => "True".to_string(),
            TagArgument::Bool(false) => "False".to_string(),
            TagArgument::Integer(i) => i.to_string(),
            TagArgument::Float(f) => f.to_string(),
            TagArgument::String(s) => s.clone(),
        }
    }

    /// The value as a typed argument prints itself: strings wrapped in `"`.
    pub fn literal(&self) -> String {
        match self {
            TagArgument::String(s) => format!("\"{s}\""),
            other => other.value(),
        }
    }
}

impl fmt::Display for TagArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal())
    }
}

impl From<&str> for TagArgument {
    fn from(s: &str) -> Self {
        TagArgument::String(s.to_string())
    }
}

/// A declarative tag (attribute) attached to a type or method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<TagArgument>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<TagArgument>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    pub fn first_argument(&self) -> Option<&TagArgument> {
        self.arguments.first()
    }
}

/// Anything that carries tags: declared types and methods.
pub trait Tagged {
    fn tags(&self) -> &[Tag];

    /// First tag with exactly this name, in attachment order.
    fn first_tag(&self, name: &str) -> Option<&Tag> {
        self.tags().iter().find(|t| t.name == name)
    }

    /// Every tag with exactly this name, in attachment order.
    fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags().iter().filter(move |t| t.name == name)
    }

    fn has_tag(&self, name: &str) -> bool {
        self.first_tag(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodMetadata {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Tagged for MethodMetadata {
    fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeMetadata {
    /// Short name, without namespace. Not unique within a module.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Base type, short or namespace-qualified, resolved against the same module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub methods: Vec<MethodMetadata>,
}

impl TypeMetadata {
    /// `namespace.name`, or just `name` outside any namespace.
    pub fn full_name(&self) -> String {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("{ns}.{}", self.name),
            _ => self.name.clone(),
        }
    }
}

impl Tagged for TypeMetadata {
    fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

/// Everything one compiled artifact declares, in declaration order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModuleMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeMetadata>,
}

impl ModuleMetadata {
    /// Look up a type by qualified name, falling back to the first short-name match.
    pub fn find_type(&self, name: &str) -> Option<&TypeMetadata> {
        self.types
            .iter()
            .find(|t| t.full_name() == name)
            .or_else(|| self.types.iter().find(|t| t.name == name))
    }

    // A short base name prefers a type in the deriving type's own namespace.
    fn resolve_base(&self, from: &TypeMetadata, base_name: &str) -> Option<&TypeMetadata> {
        self.types
            .iter()
            .find(|t| t.full_name() == base_name)
            .or_else(|| {
                self.types
                    .iter()
                    .find(|t| t.name == base_name && t.namespace == from.namespace)
            })
            .or_else(|| self.find_type(base_name))
    }

    /// Public methods visible on `ty`: its own first, then those inherited
    /// through its base chain. A derived method hides a base method of the
    /// same name. Unknown bases end the chain; cycles are cut at the repeat.
    pub fn visible_methods<'a>(&'a self, ty: &'a TypeMetadata) -> Vec<&'a MethodMetadata> {
        let mut methods: Vec<&MethodMetadata> = ty.methods.iter().collect();
        let mut seen: Vec<&TypeMetadata> = vec![ty];
        let mut current = ty;

        while let Some(base_name) = current.base_type.as_deref() {
            let Some(base_ty) = self.resolve_base(current, base_name) else {
                break;
            };
            if seen.iter().any(|s| std::ptr::eq(*s, base_ty)) {
                break;
            }
            seen.push(base_ty);
            for m in &base_ty.methods {
                if !methods.iter().any(|existing| existing.name == m.name) {
                    methods.push(m);
                }
            }
            current = base_ty;
        }

        methods
    }
}
