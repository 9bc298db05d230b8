use hoist_symbols::{Object, SymbolTable};

use crate::result::{GeneratorError, GeneratorResult};

/// Look up a package level object of the home package.
pub fn resolve<'t>(table: &'t SymbolTable, name: &str) -> GeneratorResult<&'t Object> {
    let home = table.home();
    home.lookup(name).ok_or_else(|| GeneratorError::SymbolNotFound {
        name: name.to_owned(),
        package: home.path().to_owned(),
    })
}
