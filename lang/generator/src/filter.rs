use std::fmt;

use hoist_symbols::Method;
use regex::Regex;

use crate::result::{GeneratorError, GeneratorResult, PatternKind};

/// Matches every name.
pub const DEFAULT_ALLOW: &str = "";
/// Matches no method name.
pub const DEFAULT_BLOCK: &str = "^$";

/// Decides which methods of a method set are forwarded.
///
/// Patterns are searched for anywhere in the method name, so `Reset` blocks
/// `Reset` as well as `ResetAll`.
#[derive(Debug, Clone)]
pub struct NameFilter {
    allow: Regex,
    block: Regex,
}

/// The outcome of filtering a single method. Checks are applied in the order of
/// the variants and the first failing check wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    NotAllowed,
    Blocked,
    Unexported,
}

impl NameFilter {
    pub fn new(allow: &str, block: &str) -> GeneratorResult<Self> {
        Ok(NameFilter {
            allow: compile(PatternKind::Allow, allow)?,
            block: compile(PatternKind::Block, block)?,
        })
    }

    pub fn verdict(&self, method: &Method) -> Verdict {
        if !self.allow.is_match(&method.name) {
            Verdict::NotAllowed
        } else if self.block.is_match(&method.name) {
            Verdict::Blocked
        } else if !method.exported {
            Verdict::Unexported
        } else {
            Verdict::Keep
        }
    }

    pub fn keep(&self, method: &Method) -> bool {
        self.verdict(method) == Verdict::Keep
    }
}

fn compile(which: PatternKind, pattern: &str) -> GeneratorResult<Regex> {
    Regex::new(pattern).map_err(|source| GeneratorError::InvalidPattern {
        which,
        pattern: pattern.to_owned(),
        source,
    })
}

impl Verdict {
    pub fn is_keep(self) -> bool {
        self == Verdict::Keep
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Keep => write!(f, "keep"),
            Verdict::NotAllowed => write!(f, "not allowed"),
            Verdict::Blocked => write!(f, "blocked"),
            Verdict::Unexported => write!(f, "unexported"),
        }
    }
}

#[cfg(test)]
mod filter_tests {
    use hoist_symbols::{MethodOrigin, PackageRef, Receiver, Signature, TypeName, is_exported};

    use super::*;

    fn method(name: &str) -> Method {
        Method {
            name: name.to_owned(),
            signature: Signature::default(),
            exported: is_exported(name),
            origin: MethodOrigin {
                owner: TypeName::new(PackageRef::new("example.com/counter", "counter"), "Counter"),
                receiver: Receiver::Pointer,
            },
            path: vec![],
            indirect: true,
        }
    }

    #[test]
    fn defaults_keep_every_exported_method() {
        let filter = NameFilter::new(DEFAULT_ALLOW, DEFAULT_BLOCK).unwrap();
        assert!(filter.keep(&method("Next")));
        assert!(filter.keep(&method("Reset")));
        assert_eq!(filter.verdict(&method("bump")), Verdict::Unexported);
    }

    #[test]
    fn all_pattern_combinations() {
        // (allow, block, expected verdict for `Reset`)
        let cases = [
            ("Res", "^$", Verdict::Keep),
            ("Res", "set", Verdict::Blocked),
            ("^Next$", "^$", Verdict::NotAllowed),
            ("^Next$", "set", Verdict::NotAllowed),
        ];
        for (allow, block, expected) in cases {
            let filter = NameFilter::new(allow, block).unwrap();
            assert_eq!(filter.verdict(&method("Reset")), expected, "allow={allow} block={block}");
            assert_eq!(filter.keep(&method("Reset")), expected.is_keep());
        }
    }

    #[test]
    fn patterns_are_checked_before_visibility() {
        let filter = NameFilter::new("^Next$", "^$").unwrap();
        assert_eq!(filter.verdict(&method("bump")), Verdict::NotAllowed);
        let filter = NameFilter::new("", "bump").unwrap();
        assert_eq!(filter.verdict(&method("bump")), Verdict::Blocked);
    }

    #[test]
    fn invalid_patterns_are_reported() {
        let err = NameFilter::new("(", "^$").unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidPattern { which: PatternKind::Allow, .. }));
        let err = NameFilter::new("", "[").unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidPattern { which: PatternKind::Block, .. }));
        assert_eq!(err.to_string(), "Can't parse block pattern \"[\"");
    }
}
