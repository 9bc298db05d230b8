use std::fmt;

use crate::HashMap;
use crate::ident::is_exported;
use crate::types::{Receiver, Signature, Type, Var};

// PackageRef
//
//

/// Identity of a package: its import path and the short name used to qualify it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageRef {
    pub path: String,
    pub name: String,
}

impl PackageRef {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        PackageRef { path: path.into(), name: name.into() }
    }

    /// The pseudo package of predeclared identifiers.
    pub fn universe() -> Self {
        PackageRef { path: String::new(), name: String::new() }
    }

    pub fn is_universe(&self) -> bool {
        self.path.is_empty()
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

// TypeName
//
//

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    pub package: PackageRef,
    pub name: String,
}

impl TypeName {
    pub fn new(package: PackageRef, name: impl Into<String>) -> Self {
        TypeName { package, name: name.into() }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_universe() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.package.path, self.name)
        }
    }
}

// NamedType
//
//

#[derive(Debug, Clone)]
pub struct NamedType {
    pub name: TypeName,
    pub underlying: Underlying,
    /// Methods declared with this type as receiver, in declaration order.
    pub methods: Vec<MethodDecl>,
}

#[derive(Debug, Clone)]
pub enum Underlying {
    Struct(Vec<Field>),
    Interface(Interface),
    /// Any other type definition, e.g. `type Celsius float64`.
    Type(Type),
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub typ: Type,
    /// Embedded fields have the form `T` or `*T` and are named after `T`.
    pub embedded: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Interface {
    pub methods: Vec<MethodDecl>,
    pub embeds: Vec<Type>,
}

#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: String,
    pub receiver: Receiver,
    pub signature: Signature,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, receiver: Receiver, signature: Signature) -> Self {
        MethodDecl { name: name.into(), receiver, signature }
    }
}

// Object
//
//

/// A package level entity, e.g. a variable.
#[derive(Debug, Clone)]
pub struct Object {
    pub name: String,
    pub typ: Type,
}

impl Object {
    pub fn new(name: impl Into<String>, typ: Type) -> Self {
        Object { name: name.into(), typ }
    }

    pub fn exported(&self) -> bool {
        is_exported(&self.name)
    }
}

// Package
//
//

/// The top-level scope of one package.
#[derive(Debug, Clone)]
pub struct Package {
    pub pkg: PackageRef,
    pub objects: HashMap<String, Object>,
    pub types: HashMap<String, NamedType>,
}

impl Package {
    pub fn new(pkg: PackageRef) -> Self {
        Package { pkg, objects: HashMap::default(), types: HashMap::default() }
    }

    pub fn name(&self) -> &str {
        &self.pkg.name
    }

    pub fn path(&self) -> &str {
        &self.pkg.path
    }

    pub fn lookup(&self, name: &str) -> Option<&Object> {
        self.objects.get(name)
    }

    pub fn lookup_type(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name)
    }
}

// SymbolTable
//
//

/// The symbol table of one package together with the named types of its imports.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    home: PackageRef,
    packages: HashMap<String, Package>,
    universe: HashMap<String, NamedType>,
}

impl SymbolTable {
    pub fn new(home: Package) -> Self {
        let mut packages = HashMap::default();
        let home_ref = home.pkg.clone();
        packages.insert(home_ref.path.clone(), home);
        SymbolTable { home: home_ref, packages, universe: universe() }
    }

    /// Add an imported package. Returns the previous package with the same path.
    pub fn insert(&mut self, package: Package) -> Option<Package> {
        self.packages.insert(package.pkg.path.clone(), package)
    }

    pub fn home(&self) -> &Package {
        &self.packages[&self.home.path]
    }

    pub fn package(&self, path: &str) -> Option<&Package> {
        self.packages.get(path)
    }

    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// The declaration of a named type, including the predeclared `error` and `any`.
    pub fn declared(&self, typ: &Type) -> Option<&NamedType> {
        match typ {
            Type::Named(name) => self.package(&name.package.path)?.lookup_type(&name.name),
            Type::Basic(name) => self.universe.get(name),
            _ => None,
        }
    }

    /// The named type whose definition is a struct or an interface and which `typ`
    /// is defined in terms of. Follows chains like `type A B; type B struct{..}`.
    pub fn under(&self, typ: &Type) -> Option<&NamedType> {
        let mut current = typ;
        for _ in 0..=self.type_count() {
            let named = self.declared(current)?;
            match &named.underlying {
                Underlying::Type(next) => current = next,
                Underlying::Struct(_) | Underlying::Interface(_) => return Some(named),
            }
        }
        log::warn!("Cyclic type definition involving {typ:?}");
        None
    }

    pub fn is_interface(&self, typ: &Type) -> bool {
        matches!(self.under(typ), Some(NamedType { underlying: Underlying::Interface(_), .. }))
    }

    fn type_count(&self) -> usize {
        self.packages.values().map(|pkg| pkg.types.len()).sum::<usize>() + self.universe.len()
    }
}

/// Named types of the universe scope which carry methods.
fn universe() -> HashMap<String, NamedType> {
    let string = Type::Basic("string".to_owned());
    let error = NamedType {
        name: TypeName::new(PackageRef::universe(), "error"),
        underlying: Underlying::Interface(Interface {
            methods: vec![MethodDecl::new(
                "Error",
                Receiver::Value,
                Signature::new(vec![], vec![Var::unnamed(string)]),
            )],
            embeds: vec![],
        }),
        methods: vec![],
    };
    let any = NamedType {
        name: TypeName::new(PackageRef::universe(), "any"),
        underlying: Underlying::Interface(Interface::default()),
        methods: vec![],
    };
    let mut universe = HashMap::default();
    universe.insert("error".to_owned(), error);
    universe.insert("any".to_owned(), any);
    universe
}
