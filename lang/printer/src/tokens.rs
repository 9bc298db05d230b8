//! This module contains the symbols and keywords of the generated Go source.
//! These constants are used when we prettyprint forwarding declarations.

// Symbols
//
//

/// The symbol `,`
pub const COMMA: &str = ",";

/// The symbol `.`
pub const DOT: &str = ".";

/// The symbol `*`
pub const STAR: &str = "*";

/// The symbol `[]`
pub const BRACKETS: &str = "[]";

/// The symbol `//`
pub const COMMENT: &str = "//";

/// The blank identifier `_`
pub const BLANK: &str = "_";

// Keywords
//
//

/// The keyword `package`
pub const PACKAGE: &str = "package";

/// The keyword `func`
pub const FUNC: &str = "func";

/// The keyword `return`
pub const RETURN: &str = "return";

/// The keyword `map`
pub const MAP: &str = "map";
