use hoist_symbols::{MethodSet, SymbolTable, Type};

/// The method set of a package level value as seen through its address.
///
/// Non-pointer types are promoted to a pointer first, so methods with pointer
/// receivers are part of the result.
pub fn extract(table: &SymbolTable, typ: &Type) -> MethodSet {
    let methods = if typ.is_pointer() {
        table.method_set(typ)
    } else {
        table.method_set(&typ.clone().pointer_to())
    };
    log::debug!("Found {} methods in the method set", methods.len());
    methods
}

#[cfg(test)]
mod extract_tests {
    use hoist_symbols::{
        MethodDecl, NamedType, Package, PackageRef, Receiver, Signature, TypeName, Underlying,
    };

    use super::*;

    fn table() -> (SymbolTable, Type) {
        let pkg = PackageRef::new("example.com/counter", "counter");
        let name = TypeName::new(pkg.clone(), "Counter");
        let mut home = Package::new(pkg);
        home.types.insert(
            "Counter".to_owned(),
            NamedType {
                name: name.clone(),
                underlying: Underlying::Struct(vec![]),
                methods: vec![
                    MethodDecl::new("Peek", Receiver::Value, Signature::default()),
                    MethodDecl::new("Reset", Receiver::Pointer, Signature::default()),
                ],
            },
        );
        (SymbolTable::new(home), name.into())
    }

    #[test]
    fn values_are_promoted_to_pointers() {
        let (table, counter) = table();
        assert_eq!(table.method_set(&counter).names(), vec!["Peek"]);
        assert_eq!(extract(&table, &counter).names(), vec!["Peek", "Reset"]);
    }

    #[test]
    fn pointers_are_kept() {
        let (table, counter) = table();
        let pointer = counter.pointer_to();
        assert_eq!(extract(&table, &pointer), table.method_set(&pointer));
    }
}
