use hoist_printer::theme::ThemeExt;
use hoist_printer::tokens::*;
use hoist_printer::{Alloc, Builder, DocAllocator, PrintCfg, PrintInCtx};

use crate::decls::{Field, NamedType, SymbolTable, TypeName, Underlying};
use crate::ident::is_exported;
use crate::qualifier::Qualifier;
use crate::types::{Receiver, Signature, Type};
use crate::{HashMap, HashSet};

// Method
//
//

/// A method as a member of a method set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub signature: Signature,
    pub exported: bool,
    pub origin: MethodOrigin,
    /// Names of the embedded fields through which the method is promoted.
    /// Empty for methods of the type itself.
    pub path: Vec<String>,
    /// Whether the method is reached through at least one pointer.
    pub indirect: bool,
}

/// Where a method is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodOrigin {
    pub owner: TypeName,
    pub receiver: Receiver,
}

impl Method {
    /// Unique name of the method: exported names are unique by themselves, unexported
    /// ones only within their package.
    pub fn id(&self) -> String {
        unique_id(&self.name, &self.origin.owner)
    }

    pub fn is_promoted(&self) -> bool {
        !self.path.is_empty()
    }
}

fn unique_id(name: &str, owner: &TypeName) -> String {
    if is_exported(name) { name.to_owned() } else { format!("{}.{}", owner.package.path, name) }
}

/// Prints the method like a declaration header, e.g. `func (*Counter).Reset(n int)`.
impl PrintInCtx for Method {
    type Ctx = Qualifier;

    fn print_in_ctx<'a>(
        &'a self,
        cfg: &PrintCfg,
        ctx: &'a Self::Ctx,
        alloc: &'a Alloc<'a>,
    ) -> Builder<'a> {
        let Method { name, signature, origin, .. } = self;

        let owner = origin.owner.print_in_ctx(cfg, ctx, alloc);
        let receiver = match origin.receiver {
            Receiver::Value => owner,
            Receiver::Pointer => alloc.text(STAR).append(owner),
        };

        alloc
            .keyword(FUNC)
            .append(alloc.space())
            .append(receiver.enclose("(", ")"))
            .append(DOT)
            .append(alloc.func(name))
            .append(signature.print_in_ctx(cfg, ctx, alloc))
    }
}

// MethodSet
//
//

/// The methods of a type, sorted by their unique name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodSet {
    methods: Vec<Method>,
}

impl MethodSet {
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Method> {
        self.methods.iter()
    }

    pub fn lookup(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|method| method.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.methods.iter().map(|method| method.name.as_str()).collect()
    }
}

impl IntoIterator for MethodSet {
    type Item = Method;
    type IntoIter = std::vec::IntoIter<Method>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods.into_iter()
    }
}

impl<'a> IntoIterator for &'a MethodSet {
    type Item = &'a Method;
    type IntoIter = std::slice::Iter<'a, Method>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods.iter()
    }
}

/// A type reached by following embedded fields.
#[derive(Debug, Clone)]
struct Embedded {
    typ: Type,
    path: Vec<String>,
    indirect: bool,
    /// Whether the type was reached more than once at the same depth.
    multiples: bool,
}

/// Entries found at one depth. `None` marks a collision which hides the name
/// at all deeper depths.
type Candidates = HashMap<String, Option<Method>>;

impl SymbolTable {
    /// Compute the method set of `typ`.
    ///
    /// Embedded fields are searched breadth first. The shallowest depth at which a
    /// name occurs wins, several occurrences at that depth cancel each other out.
    /// Methods with a pointer receiver only belong to the set if they can be reached
    /// through a pointer.
    pub fn method_set(&self, typ: &Type) -> MethodSet {
        let (typ, is_ptr) = typ.deref();

        // Pointers to interfaces have no methods.
        if is_ptr && self.is_interface(typ) {
            return MethodSet::default();
        }

        let mut base: Candidates = HashMap::default();
        let mut seen: HashSet<TypeName> = HashSet::default();
        let mut current = vec![Embedded {
            typ: typ.clone(),
            path: vec![],
            indirect: is_ptr,
            multiples: false,
        }];

        while !current.is_empty() {
            let mut next = Vec::new();
            let mut methods: Candidates = HashMap::default();
            let mut fields: HashSet<String> = HashSet::default();

            for embedded in &current {
                if let Some(named) = self.declared(&embedded.typ) {
                    if !seen.insert(named.name.clone()) {
                        continue;
                    }
                    for decl in &named.methods {
                        let method = Method {
                            name: decl.name.clone(),
                            signature: decl.signature.clone(),
                            exported: is_exported(&decl.name),
                            origin: MethodOrigin {
                                owner: named.name.clone(),
                                receiver: decl.receiver,
                            },
                            path: embedded.path.clone(),
                            indirect: embedded.indirect,
                        };
                        add_method(&mut methods, method, embedded.indirect, embedded.multiples);
                    }
                }

                let Some(named) = self.under(&embedded.typ) else { continue };
                match &named.underlying {
                    Underlying::Struct(struct_fields) => {
                        for field in struct_fields {
                            fields.insert(unique_id(&field.name, &named.name));
                            if field.embedded {
                                next.push(embed(embedded, field));
                            }
                        }
                    }
                    Underlying::Interface(_) => {
                        for method in self.interface_methods(named, embedded) {
                            add_method(&mut methods, method, true, embedded.multiples);
                        }
                    }
                    Underlying::Type(_) => {}
                }
            }

            for (id, method) in methods {
                if !base.contains_key(&id) {
                    // Fields collide with methods of the same name at this depth.
                    let method = if fields.contains(&id) { None } else { method };
                    base.insert(id, method);
                }
            }

            // Fields hide methods of the same name further down.
            for id in fields {
                base.entry(id).or_insert(None);
            }

            current = consolidate_multiples(next);
        }

        let mut methods: Vec<Method> = base.into_values().flatten().collect();
        methods.sort_by_key(Method::id);

        log::trace!(
            "Method set of {typ:?}: {:?}",
            methods.iter().map(Method::id).collect::<Vec<_>>()
        );

        MethodSet { methods }
    }

    /// All methods of an interface including those of embedded interfaces.
    fn interface_methods(&self, named: &NamedType, embedded: &Embedded) -> Vec<Method> {
        let mut out: Vec<Method> = Vec::new();
        let mut visited: HashSet<TypeName> = HashSet::default();
        self.collect_interface_methods(named, embedded, &mut visited, &mut out);
        out
    }

    fn collect_interface_methods(
        &self,
        named: &NamedType,
        embedded: &Embedded,
        visited: &mut HashSet<TypeName>,
        out: &mut Vec<Method>,
    ) {
        if !visited.insert(named.name.clone()) {
            return;
        }
        let Underlying::Interface(iface) = &named.underlying else { return };

        for decl in &iface.methods {
            if out.iter().any(|method| method.name == decl.name) {
                continue;
            }
            out.push(Method {
                name: decl.name.clone(),
                signature: decl.signature.clone(),
                exported: is_exported(&decl.name),
                origin: MethodOrigin { owner: named.name.clone(), receiver: Receiver::Value },
                path: embedded.path.clone(),
                indirect: true,
            });
        }

        for embed in &iface.embeds {
            if let Some(inner) = self.under(embed) {
                self.collect_interface_methods(inner, embedded, visited, out);
            }
        }
    }
}

fn add_method(set: &mut Candidates, method: Method, indirect: bool, multiples: bool) {
    let id = method.id();
    let reachable = indirect || method.origin.receiver == Receiver::Value;
    if !multiples && reachable && !set.contains_key(&id) {
        set.insert(id, Some(method));
    } else {
        set.insert(id, None);
    }
}

fn embed(parent: &Embedded, field: &Field) -> Embedded {
    let (typ, is_ptr) = field.typ.deref();
    let mut path = parent.path.clone();
    path.push(field.name.clone());
    Embedded {
        typ: typ.clone(),
        path,
        indirect: parent.indirect || is_ptr,
        multiples: parent.multiples,
    }
}

/// Merge entries of the same type. A type occurring more than once is marked
/// so that all of its members collide.
fn consolidate_multiples(list: Vec<Embedded>) -> Vec<Embedded> {
    let mut out: Vec<Embedded> = Vec::with_capacity(list.len());
    let mut index: HashMap<Type, usize> = HashMap::default();
    for embedded in list {
        match index.get(&embedded.typ) {
            Some(&i) => out[i].multiples = true,
            None => {
                index.insert(embedded.typ.clone(), out.len());
                out.push(embedded);
            }
        }
    }
    out
}

#[cfg(test)]
mod method_set_tests {
    use hoist_printer::PrintInCtx;

    use crate::decls::{Interface, MethodDecl, Object, Package, PackageRef};
    use crate::types::Var;

    use super::*;

    fn home() -> PackageRef {
        PackageRef::new("example.com/seq", "seq")
    }

    fn named(name: &str) -> Type {
        TypeName::new(home(), name).into()
    }

    fn int() -> Type {
        Type::Basic("int".to_owned())
    }

    fn getter(name: &str, receiver: Receiver) -> MethodDecl {
        MethodDecl::new(name, receiver, Signature::new(vec![], vec![Var::unnamed(int())]))
    }

    fn field(name: &str, typ: Type) -> Field {
        Field { name: name.to_owned(), typ, embedded: false }
    }

    fn embedded(name: &str, typ: Type) -> Field {
        Field { name: name.to_owned(), typ, embedded: true }
    }

    fn add(pkg: &mut Package, name: &str, underlying: Underlying, methods: Vec<MethodDecl>) {
        let typ = NamedType { name: TypeName::new(pkg.pkg.clone(), name), underlying, methods };
        pkg.types.insert(name.to_owned(), typ);
    }

    /// `counter` with `Next` (pointer), `Peek` (value), `Reset` (pointer) and `bump` (value).
    fn counter_table() -> SymbolTable {
        let mut pkg = Package::new(home());
        add(
            &mut pkg,
            "Counter",
            Underlying::Struct(vec![field("n", int())]),
            vec![
                getter("Peek", Receiver::Value),
                getter("Next", Receiver::Pointer),
                MethodDecl::new(
                    "Reset",
                    Receiver::Pointer,
                    Signature::new(vec![Var::new("n", int())], vec![]),
                ),
                getter("bump", Receiver::Value),
            ],
        );
        pkg.objects.insert("counter".to_owned(), Object::new("counter", named("Counter")));
        SymbolTable::new(pkg)
    }

    #[test]
    fn pointer_form_is_sorted_and_complete() {
        let table = counter_table();
        let mset = table.method_set(&named("Counter").pointer_to());
        assert_eq!(mset.names(), vec!["Next", "Peek", "Reset", "bump"]);
        assert_eq!(mset.iter().last().unwrap().id(), "example.com/seq.bump");
    }

    #[test]
    fn value_form_excludes_pointer_receivers() {
        let table = counter_table();
        let mset = table.method_set(&named("Counter"));
        assert_eq!(mset.names(), vec!["Peek", "bump"]);
    }

    #[test]
    fn pointer_form_is_superset_of_value_form() {
        let table = counter_table();
        let value = table.method_set(&named("Counter"));
        let pointer = table.method_set(&named("Counter").pointer_to());
        for method in &value {
            assert!(pointer.lookup(&method.name).is_some(), "{} missing", method.name);
        }
        assert!(pointer.len() >= value.len());
    }

    #[test]
    fn promotion_through_embedded_value_and_pointer() {
        let mut pkg = Package::new(home());
        add(&mut pkg, "Base", Underlying::Struct(vec![]), vec![
            getter("Value", Receiver::Value),
            getter("Ptr", Receiver::Pointer),
        ]);
        add(&mut pkg, "Other", Underlying::Struct(vec![]), vec![getter("Deep", Receiver::Pointer)]);
        add(
            &mut pkg,
            "ByValue",
            Underlying::Struct(vec![embedded("Base", named("Base"))]),
            vec![],
        );
        add(
            &mut pkg,
            "ByPointer",
            Underlying::Struct(vec![embedded("Other", named("Other").pointer_to())]),
            vec![],
        );
        let table = SymbolTable::new(pkg);

        // A value embedding a value only sees value receivers.
        assert_eq!(table.method_set(&named("ByValue")).names(), vec!["Value"]);
        assert_eq!(table.method_set(&named("ByValue").pointer_to()).names(), vec!["Ptr", "Value"]);

        // An embedded pointer makes pointer receivers reachable from a value.
        let mset = table.method_set(&named("ByPointer"));
        assert_eq!(mset.names(), vec!["Deep"]);
        let deep = mset.lookup("Deep").unwrap();
        assert_eq!(deep.path, vec!["Other".to_owned()]);
        assert!(deep.is_promoted());
        assert_eq!(deep.origin.owner, TypeName::new(home(), "Other"));
    }

    #[test]
    fn shallow_methods_shadow_deep_ones() {
        let mut pkg = Package::new(home());
        add(&mut pkg, "Inner", Underlying::Struct(vec![]), vec![getter("Get", Receiver::Value)]);
        add(
            &mut pkg,
            "Outer",
            Underlying::Struct(vec![embedded("Inner", named("Inner"))]),
            vec![getter("Get", Receiver::Value)],
        );
        let table = SymbolTable::new(pkg);

        let mset = table.method_set(&named("Outer").pointer_to());
        assert_eq!(mset.len(), 1);
        assert_eq!(mset.lookup("Get").unwrap().origin.owner, TypeName::new(home(), "Outer"));
    }

    #[test]
    fn same_depth_methods_collide() {
        let mut pkg = Package::new(home());
        add(&mut pkg, "A", Underlying::Struct(vec![]), vec![
            getter("Get", Receiver::Value),
            getter("OnlyA", Receiver::Value),
        ]);
        add(&mut pkg, "B", Underlying::Struct(vec![]), vec![getter("Get", Receiver::Value)]);
        add(
            &mut pkg,
            "Both",
            Underlying::Struct(vec![embedded("A", named("A")), embedded("B", named("B"))]),
            vec![],
        );
        let table = SymbolTable::new(pkg);

        assert_eq!(table.method_set(&named("Both").pointer_to()).names(), vec!["OnlyA"]);
    }

    #[test]
    fn fields_hide_deeper_methods() {
        let mut pkg = Package::new(home());
        add(&mut pkg, "Inner", Underlying::Struct(vec![]), vec![
            getter("Len", Receiver::Value),
            getter("Cap", Receiver::Value),
        ]);
        add(
            &mut pkg,
            "Outer",
            Underlying::Struct(vec![field("Len", int()), embedded("Inner", named("Inner"))]),
            vec![],
        );
        let table = SymbolTable::new(pkg);

        assert_eq!(table.method_set(&named("Outer").pointer_to()).names(), vec!["Cap"]);
    }

    #[test]
    fn embedded_twice_at_same_depth_collides() {
        let mut pkg = Package::new(home());
        add(&mut pkg, "Leaf", Underlying::Struct(vec![]), vec![getter("Get", Receiver::Value)]);
        add(&mut pkg, "L", Underlying::Struct(vec![embedded("Leaf", named("Leaf"))]), vec![]);
        add(&mut pkg, "R", Underlying::Struct(vec![embedded("Leaf", named("Leaf"))]), vec![]);
        add(
            &mut pkg,
            "Top",
            Underlying::Struct(vec![embedded("L", named("L")), embedded("R", named("R"))]),
            vec![],
        );
        let table = SymbolTable::new(pkg);

        assert!(table.method_set(&named("Top").pointer_to()).is_empty());
    }

    #[test]
    fn interfaces_and_embedded_interfaces() {
        let mut pkg = Package::new(home());
        add(
            &mut pkg,
            "Reader",
            Underlying::Interface(Interface {
                methods: vec![getter("Read", Receiver::Value)],
                embeds: vec![],
            }),
            vec![],
        );
        add(
            &mut pkg,
            "ReadCloser",
            Underlying::Interface(Interface {
                methods: vec![getter("Close", Receiver::Value)],
                embeds: vec![named("Reader"), Type::Basic("error".to_owned())],
            }),
            vec![],
        );
        add(
            &mut pkg,
            "Wrapper",
            Underlying::Struct(vec![embedded("ReadCloser", named("ReadCloser"))]),
            vec![],
        );
        let table = SymbolTable::new(pkg);

        // Pointers to interfaces have no methods.
        assert!(table.method_set(&named("ReadCloser").pointer_to()).is_empty());
        assert_eq!(table.method_set(&named("ReadCloser")).names(), vec!["Close", "Error", "Read"]);
        assert_eq!(
            table.method_set(&named("Wrapper").pointer_to()).names(),
            vec!["Close", "Error", "Read"]
        );
    }

    #[test]
    fn defined_type_keeps_promoted_but_not_declared_methods() {
        let mut pkg = Package::new(home());
        add(&mut pkg, "Inner", Underlying::Struct(vec![]), vec![getter("Get", Receiver::Value)]);
        add(
            &mut pkg,
            "Outer",
            Underlying::Struct(vec![embedded("Inner", named("Inner"))]),
            vec![getter("Own", Receiver::Value)],
        );
        add(&mut pkg, "Alias", Underlying::Type(named("Outer")), vec![]);
        let table = SymbolTable::new(pkg);

        assert_eq!(table.method_set(&named("Alias").pointer_to()).names(), vec!["Get"]);
    }

    #[test]
    fn types_without_methods() {
        let table = counter_table();
        assert!(table.method_set(&int().pointer_to()).is_empty());
        assert!(table.method_set(&Type::Slice(Box::new(named("Counter")))).is_empty());
    }

    #[test]
    fn print_method_header() {
        let table = counter_table();
        let qf = Qualifier::new(&home());
        let mset = table.method_set(&named("Counter").pointer_to());
        let reset = mset.lookup("Reset").unwrap();
        assert_eq!(reset.print_to_string_in_ctx(&qf), "func (*Counter).Reset(n int)");
        let peek = mset.lookup("Peek").unwrap();
        assert_eq!(peek.print_to_string_in_ctx(&qf), "func (Counter).Peek() int");

        let foreign = Qualifier::new(&PackageRef::new("example.com/main", "main"));
        assert_eq!(reset.print_to_string_in_ctx(&foreign), "func (*seq.Counter).Reset(n int)");
    }
}
