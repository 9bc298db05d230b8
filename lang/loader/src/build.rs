use hoist_symbols::{
    Field, HashMap, HashSet, Interface, MethodDecl, NamedType, Object, Package, PackageRef,
    Receiver, Signature, SymbolTable, Type, TypeName, Underlying, Var,
};

use crate::manifest::*;
use crate::result::{LoadError, LoadResult};
use crate::type_expr::{FuncExpr, SyntaxError, TypeExpr, VarExpr, parse_type};

/// Predeclared type names of the universe scope.
const UNIVERSE: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

/// Build the symbol table described by a manifest.
///
/// Names are collected for every package first so that declarations may refer to
/// types declared later in the manifest or in other packages.
pub fn build_symbol_table(manifest: &Manifest) -> LoadResult<SymbolTable> {
    let Manifest { package, types, objects, packages } = manifest;

    let mut known: HashMap<String, Known> = HashMap::default();
    known.insert(package.path.clone(), Known::collect(&package.path, &package.name, types)?);
    for dep in packages {
        if known.contains_key(&dep.path) {
            return Err(LoadError::AlreadyDefined {
                name: dep.path.clone(),
                package: package.path.clone(),
            });
        }
        known.insert(dep.path.clone(), Known::collect(&dep.path, &dep.name, &dep.types)?);
    }

    let home_scope = Scope::new(&package.path, &package.name, &package.imports, &known);
    let mut home = Package::new(home_scope.pkg.clone());
    for spec in types {
        let typ = spec.build(&home_scope)?;
        home.types.insert(spec.name.clone(), typ);
    }
    for ObjectSpec { name, typ } in objects {
        if home.types.contains_key(name) || home.objects.contains_key(name) {
            return Err(LoadError::AlreadyDefined {
                name: name.clone(),
                package: package.path.clone(),
            });
        }
        let typ = home_scope.resolve_str(typ, &format!("object {name}"))?;
        home.objects.insert(name.clone(), Object::new(name, typ));
    }

    let mut table = SymbolTable::new(home);
    for dep in packages {
        let scope = Scope::new(&dep.path, &dep.name, &dep.imports, &known);
        let mut pkg = Package::new(scope.pkg.clone());
        for spec in &dep.types {
            pkg.types.insert(spec.name.clone(), spec.build(&scope)?);
        }
        table.insert(pkg);
    }

    log::debug!(
        "Built symbol table for {} with {} objects, {} types and {} imported packages",
        package.path,
        objects.len(),
        types.len(),
        packages.len()
    );

    Ok(table)
}

/// The names declared by a package of the manifest.
struct Known {
    name: String,
    types: HashSet<String>,
}

impl Known {
    fn collect(path: &str, name: &str, types: &[TypeSpec]) -> LoadResult<Known> {
        let mut names = HashSet::default();
        for spec in types {
            if !names.insert(spec.name.clone()) {
                return Err(LoadError::AlreadyDefined {
                    name: spec.name.clone(),
                    package: path.to_owned(),
                });
            }
        }
        Ok(Known { name: name.to_owned(), types: names })
    }
}

/// Name resolution inside one package.
struct Scope<'k> {
    pkg: PackageRef,
    imports: HashMap<String, PackageRef>,
    known: &'k HashMap<String, Known>,
}

impl<'k> Scope<'k> {
    fn new(
        path: &str,
        name: &str,
        imports: &[ImportSpec],
        known: &'k HashMap<String, Known>,
    ) -> Self {
        let imports = imports
            .iter()
            .map(|import| {
                // Qualified names are rendered with the real name of the package.
                let name = match known.get(&import.path) {
                    Some(pkg) => pkg.name.clone(),
                    None => import.short_name().to_owned(),
                };
                (import.short_name().to_owned(), PackageRef::new(&import.path, name))
            })
            .collect();
        Scope { pkg: PackageRef::new(path, name), imports, known }
    }

    fn resolve_str(&self, src: &str, context: &str) -> LoadResult<Type> {
        let expr = parse_type(src).map_err(|SyntaxError { span, expected }| {
            LoadError::TypeSyntax {
                context: context.to_owned(),
                src: src.to_owned(),
                span: span.into(),
                expected,
            }
        })?;
        self.resolve(&expr, src, context)
    }

    fn resolve(&self, expr: &TypeExpr, src: &str, context: &str) -> LoadResult<Type> {
        match expr {
            TypeExpr::Name { qualifier: None, name, span } => {
                if self.declares(&self.pkg.path, name) {
                    Ok(TypeName::new(self.pkg.clone(), name).into())
                } else if UNIVERSE.contains(&name.as_str()) {
                    Ok(Type::Basic(name.clone()))
                } else {
                    Err(LoadError::UndefinedType {
                        name: name.clone(),
                        context: context.to_owned(),
                        src: src.to_owned(),
                        span: span.clone().into(),
                    })
                }
            }
            TypeExpr::Name { qualifier: Some(qualifier), name, span } => {
                let Some(pkg) = self.imports.get(qualifier) else {
                    return Err(LoadError::UnknownPackage {
                        qualifier: qualifier.clone(),
                        context: context.to_owned(),
                        src: src.to_owned(),
                        span: span.clone().into(),
                    });
                };
                // Types of packages without a declaration in the manifest are opaque.
                if self.known.contains_key(&pkg.path) && !self.declares(&pkg.path, name) {
                    return Err(LoadError::UndefinedType {
                        name: format!("{qualifier}.{name}"),
                        context: context.to_owned(),
                        src: src.to_owned(),
                        span: span.clone().into(),
                    });
                }
                Ok(TypeName::new(pkg.clone(), name).into())
            }
            TypeExpr::Pointer(elem) => Ok(self.resolve(elem, src, context)?.pointer_to()),
            TypeExpr::Slice(elem) => Ok(Type::Slice(Box::new(self.resolve(elem, src, context)?))),
            TypeExpr::Array(len, elem) => {
                Ok(Type::Array(*len, Box::new(self.resolve(elem, src, context)?)))
            }
            TypeExpr::Map(key, value) => Ok(Type::Map(
                Box::new(self.resolve(key, src, context)?),
                Box::new(self.resolve(value, src, context)?),
            )),
            TypeExpr::Func(FuncExpr { params, results }) => Ok(Type::Signature(Signature::new(
                self.resolve_vars(params, src, context)?,
                self.resolve_vars(results, src, context)?,
            ))),
        }
    }

    fn resolve_vars(&self, vars: &[VarExpr], src: &str, context: &str) -> LoadResult<Vec<Var>> {
        vars.iter()
            .map(|VarExpr { name, typ }| {
                Ok(Var { name: name.clone(), typ: self.resolve(typ, src, context)? })
            })
            .collect()
    }

    fn declares(&self, path: &str, name: &str) -> bool {
        self.known.get(path).is_some_and(|pkg| pkg.types.contains(name))
    }
}

trait Build {
    type Target;

    fn build(&self, scope: &Scope) -> LoadResult<Self::Target>;
}

impl Build for TypeSpec {
    type Target = NamedType;

    fn build(&self, scope: &Scope) -> LoadResult<NamedType> {
        let TypeSpec { name, kind, fields, embeds, underlying, methods } = self;
        let invalid = |reason: &str| LoadError::InvalidDecl {
            name: name.clone(),
            reason: reason.to_owned(),
        };

        let underlying = match kind {
            TypeKind::Struct => {
                if underlying.is_some() || !embeds.is_empty() {
                    return Err(invalid("a struct has neither `underlying` nor `embeds`"));
                }
                let fields = fields
                    .iter()
                    .map(|field| build_field(field, name, scope))
                    .collect::<LoadResult<_>>()?;
                Underlying::Struct(fields)
            }
            TypeKind::Interface => {
                if underlying.is_some() || !fields.is_empty() {
                    return Err(invalid("an interface has neither `underlying` nor `fields`"));
                }
                let embeds = embeds
                    .iter()
                    .map(|embed| scope.resolve_str(embed, &format!("interface {name}")))
                    .collect::<LoadResult<_>>()?;
                let methods = methods
                    .iter()
                    .map(|method| build_method(method, name, scope))
                    .map(|method| method.map(|m| MethodDecl { receiver: Receiver::Value, ..m }))
                    .collect::<LoadResult<_>>()?;
                Underlying::Interface(Interface { methods, embeds })
            }
            TypeKind::Defined => {
                let Some(underlying) = underlying else {
                    return Err(invalid("a defined type needs an `underlying` type"));
                };
                if !fields.is_empty() || !embeds.is_empty() {
                    return Err(invalid("a defined type has neither `fields` nor `embeds`"));
                }
                Underlying::Type(scope.resolve_str(underlying, &format!("type {name}"))?)
            }
        };

        // Interfaces carry their methods in the underlying type.
        let methods = match kind {
            TypeKind::Interface => vec![],
            _ => methods
                .iter()
                .map(|method| build_method(method, name, scope))
                .collect::<LoadResult<_>>()?,
        };

        let mut seen = HashSet::default();
        for method in &methods {
            let MethodDecl { name: method_name, .. } = method;
            if !seen.insert(method_name.clone()) {
                return Err(invalid(&format!("method {method_name} is declared twice")));
            }
        }

        Ok(NamedType { name: TypeName::new(scope.pkg.clone(), name), underlying, methods })
    }
}

fn build_field(field: &FieldSpec, owner: &str, scope: &Scope) -> LoadResult<Field> {
    let FieldSpec { name, typ, embedded } = field;
    let context = format!("field of {owner}");
    let expr = parse_type(typ).map_err(|SyntaxError { span, expected }| LoadError::TypeSyntax {
        context: context.clone(),
        src: typ.clone(),
        span: span.into(),
        expected,
    })?;

    let name = match (name, embedded) {
        (Some(name), _) => name.clone(),
        (None, true) => match expr.embedded_name() {
            Some(name) => name.to_owned(),
            None => {
                return Err(LoadError::InvalidDecl {
                    name: owner.to_owned(),
                    reason: format!("embedded field `{typ}` is not of the form T or *T"),
                });
            }
        },
        (None, false) => {
            return Err(LoadError::InvalidDecl {
                name: owner.to_owned(),
                reason: format!("field of type `{typ}` needs a name"),
            });
        }
    };

    Ok(Field { typ: scope.resolve(&expr, typ, &context)?, name, embedded: *embedded })
}

fn build_method(method: &MethodSpec, owner: &str, scope: &Scope) -> LoadResult<MethodDecl> {
    let MethodSpec { name, receiver, params, results } = method;
    let context = format!("method {name} of {owner}");
    let vars = |specs: &[VarSpec]| -> LoadResult<Vec<Var>> {
        specs
            .iter()
            .map(|spec| {
                let typ = scope.resolve_str(spec.typ(), &context)?;
                Ok(Var { name: spec.name().map(ToOwned::to_owned), typ })
            })
            .collect()
    };
    let receiver = match receiver {
        ReceiverSpec::Value => Receiver::Value,
        ReceiverSpec::Pointer => Receiver::Pointer,
    };
    Ok(MethodDecl::new(name, receiver, Signature::new(vars(params)?, vars(results)?)))
}
