//! The on-disk format of an exported symbol table.

use serde_derive::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub package: PackageSpec,
    #[serde(default)]
    pub types: Vec<TypeSpec>,
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
    /// Imported packages whose types are known.
    #[serde(default)]
    pub packages: Vec<DependencySpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSpec {
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub imports: Vec<ImportSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencySpec {
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub imports: Vec<ImportSpec>,
    #[serde(default)]
    pub types: Vec<TypeSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportSpec {
    pub path: String,
    /// Defaults to the last segment of the path.
    pub name: Option<String>,
}

impl ImportSpec {
    pub fn short_name(&self) -> &str {
        match &self.name {
            Some(name) => name,
            None => self.path.rsplit('/').next().unwrap_or(&self.path),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Struct,
    Interface,
    #[default]
    Defined,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeSpec {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub embeds: Vec<String>,
    pub underlying: Option<String>,
    #[serde(default)]
    pub methods: Vec<MethodSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub typ: String,
    #[serde(default)]
    pub embedded: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiverSpec {
    #[default]
    Value,
    Pointer,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodSpec {
    pub name: String,
    #[serde(default)]
    pub receiver: ReceiverSpec,
    #[serde(default)]
    pub params: Vec<VarSpec>,
    #[serde(default)]
    pub results: Vec<VarSpec>,
}

/// A parameter or result: either a bare type or a table with an optional name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VarSpec {
    Bare(String),
    Full {
        name: Option<String>,
        #[serde(rename = "type")]
        typ: String,
    },
}

impl VarSpec {
    pub fn name(&self) -> Option<&str> {
        match self {
            VarSpec::Bare(_) => None,
            VarSpec::Full { name, .. } => name.as_deref().filter(|name| !name.is_empty()),
        }
    }

    pub fn typ(&self) -> &str {
        match self {
            VarSpec::Bare(typ) | VarSpec::Full { typ, .. } => typ,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
}
