use hoist_printer::tokens::BLANK;

/// Whether a Go identifier is visible outside of its package.
///
/// Go decides this by the first character alone: it must be an upper case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// The blank identifier `_` cannot be referred to.
pub fn is_blank(name: &str) -> bool {
    name == BLANK
}
