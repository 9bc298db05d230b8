//! Synthesis of package level functions which forward to the methods of one
//! package level value.
//!
//! Generation runs in fixed stages over a read-only [`SymbolTable`]: the value is
//! resolved by name, its pointer promoted method set is extracted, filtered by
//! name and emitted as one forwarding declaration per surviving method.

use hoist_printer::PrintInCtx;
use hoist_symbols::{Qualifier, SymbolTable};

mod delegate;
mod emit;
mod extract;
mod filter;
mod listing;
mod render;
mod resolve;
mod result;

pub use delegate::*;
pub use emit::*;
pub use extract::*;
pub use filter::*;
pub use listing::*;
pub use render::*;
pub use resolve::*;
pub use result::*;

/// What to generate: the package level value and the patterns selecting its methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub local: String,
    pub allow: String,
    pub block: String,
}

impl Request {
    pub fn new(local: impl Into<String>) -> Self {
        Request {
            local: local.into(),
            allow: DEFAULT_ALLOW.to_owned(),
            block: DEFAULT_BLOCK.to_owned(),
        }
    }

    pub fn allow(self, allow: impl Into<String>) -> Self {
        Request { allow: allow.into(), ..self }
    }

    pub fn block(self, block: impl Into<String>) -> Self {
        Request { block: block.into(), ..self }
    }
}

/// Generate the forwarding functions for the value named in `request`.
///
/// The patterns are compiled before anything is looked up, so an invalid pattern
/// is reported even if the value does not exist.
pub fn generate(table: &SymbolTable, request: &Request) -> GeneratorResult<ForwardingFile> {
    let filter = NameFilter::new(&request.allow, &request.block)?;
    let object = resolve(table, &request.local)?;
    let methods = extract(table, &object.typ);

    let home = table.home();
    let qualifier = Qualifier::new(&home.pkg);

    let kept = methods.into_iter().filter(|method| match filter.verdict(method) {
        Verdict::Keep => true,
        verdict => {
            log::trace!("Skipping method {} ({verdict})", method.name);
            false
        }
    });
    let file = emit(home.name(), &request.local, kept, &qualifier);

    log::debug!("Generated {} forwarding functions for {}", file.decls.len(), request.local);
    Ok(file)
}

/// List the method set of the value named in `request` with a verdict per method.
pub fn list(table: &SymbolTable, request: &Request) -> GeneratorResult<Listing> {
    let filter = NameFilter::new(&request.allow, &request.block)?;
    let object = resolve(table, &request.local)?;
    let methods = extract(table, &object.typ);

    let qualifier = Qualifier::new(&table.home().pkg);
    let typ = match &object.typ {
        typ if typ.is_pointer() => typ.clone(),
        typ => typ.clone().pointer_to(),
    };

    let entries = methods
        .iter()
        .map(|method| Entry {
            method: object_string(method, &qualifier),
            path: method.path.clone(),
            verdict: filter.verdict(method),
        })
        .collect();

    Ok(Listing {
        local: request.local.clone(),
        typ: typ.print_to_string_in_ctx(&qualifier),
        entries,
    })
}

#[cfg(test)]
mod generator_tests {
    use std::path::Path;

    use hoist_loader::{build_symbol_table, parse_manifest};
    use hoist_printer::Print;

    use super::*;

    const COUNTER: &str = r#"
        [package]
        path = "example.com/counter"
        name = "counter"

        [[objects]]
        name = "counter"
        type = "Counter"

        [[types]]
        name = "Counter"
        kind = "struct"
        fields = [{ name = "n", type = "int" }]

        [[types.methods]]
        name = "Next"
        receiver = "pointer"
        results = ["int"]

        [[types.methods]]
        name = "Peek"
        results = ["int"]

        [[types.methods]]
        name = "Reset"
        receiver = "pointer"
        params = [{ name = "n", type = "int" }]

        [[types.methods]]
        name = "bump"
        receiver = "pointer"
    "#;

    fn table(text: &str) -> SymbolTable {
        let manifest = parse_manifest(Path::new("symbols.toml"), text).unwrap();
        build_symbol_table(&manifest).unwrap()
    }

    fn names(file: &ForwardingFile) -> Vec<&str> {
        file.decls.iter().map(|decl| decl.name.as_str()).collect()
    }

    #[test]
    fn forward_counter_methods() {
        let file = generate(&table(COUNTER), &Request::new("counter")).unwrap();
        assert_eq!(names(&file), vec!["Next", "Peek", "Reset"]);
        assert_eq!(
            file.print_to_string(None),
            "package counter\n\
             \n\
             // Next is package exported version of \"func (*Counter).Next() int\" called on a package level value.\n\
             func Next() int {\n\
             \treturn counter.Next()\n\
             }\n\
             \n\
             // Peek is package exported version of \"func (Counter).Peek() int\" called on a package level value.\n\
             func Peek() int {\n\
             \treturn counter.Peek()\n\
             }\n\
             \n\
             // Reset is package exported version of \"func (*Counter).Reset(n int)\" called on a package level value.\n\
             func Reset(n int) {\n\
             \tcounter.Reset(n)\n\
             }\n"
        );
    }

    #[test]
    fn block_reset() {
        let request = Request::new("counter").block("^Reset$");
        let file = generate(&table(COUNTER), &request).unwrap();
        assert_eq!(names(&file), vec!["Next", "Peek"]);
    }

    #[test]
    fn allow_and_block_combinations() {
        let table = table(COUNTER);
        let cases: [(&str, &str, &[&str]); 4] = [
            ("", "^$", &["Next", "Peek", "Reset"]),
            ("", "e", &[]),
            ("^(Next|bump)$", "^$", &["Next"]),
            ("^(Next|Peek)$", "Peek", &["Next"]),
        ];
        for (allow, block, expected) in cases {
            let file = generate(&table, &Request::new("counter").allow(allow).block(block)).unwrap();
            assert_eq!(names(&file), expected, "allow={allow} block={block}");
        }
    }

    #[test]
    fn no_exported_methods_yield_header_only() {
        let text = r#"
            [package]
            path = "example.com/quiet"
            name = "quiet"

            [[objects]]
            name = "state"
            type = "*ticker"

            [[types]]
            name = "ticker"
            kind = "struct"

            [[types.methods]]
            name = "tick"
        "#;
        let file = generate(&table(text), &Request::new("state")).unwrap();
        assert!(file.decls.is_empty());
        assert_eq!(file.to_string(), "package quiet\n");
    }

    #[test]
    fn generation_is_deterministic() {
        let request = Request::new("counter");
        let first = generate(&table(COUNTER), &request).unwrap().to_string();
        let second = generate(&table(COUNTER), &request).unwrap().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn foreign_types_are_qualified() {
        let text = r#"
            [package]
            path = "example.com/sink"
            name = "sink"
            imports = [{ path = "bytes" }, { path = "example.com/internal/codec" }]

            [[objects]]
            name = "defaultSink"
            type = "*Sink"

            [[types]]
            name = "Sink"
            kind = "struct"

            [[types.methods]]
            name = "Drain"
            params = [{ name = "buf", type = "*bytes.Buffer" }, { name = "into", type = "*Sink" }]
            results = ["codec.Frame", "error"]

            [[packages]]
            path = "example.com/internal/codec"
            name = "codec"

            [[packages.types]]
            name = "Frame"
            kind = "struct"
        "#;
        let file = generate(&table(text), &Request::new("defaultSink")).unwrap();
        assert_eq!(file.decls[0].signature, "(buf *bytes.Buffer, into *Sink) (codec.Frame, error)");
        assert_eq!(
            file.decls[0].delegation.print_to_string(None),
            "return defaultSink.Drain(buf, into)"
        );
    }

    #[test]
    fn promoted_methods_are_forwarded() {
        let text = r#"
            [package]
            path = "example.com/server"
            name = "server"
            imports = [{ path = "example.com/internal/base" }]

            [[objects]]
            name = "srv"
            type = "Server"

            [[types]]
            name = "Server"
            kind = "struct"
            fields = [{ type = "*base.Conn", embedded = true }]

            [[types.methods]]
            name = "Serve"

            [[packages]]
            path = "example.com/internal/base"
            name = "base"

            [[packages.types]]
            name = "Conn"
            kind = "struct"

            [[packages.types.methods]]
            name = "Close"
            receiver = "pointer"
            results = ["error"]
        "#;
        let file = generate(&table(text), &Request::new("srv")).unwrap();
        assert_eq!(names(&file), vec!["Close", "Serve"]);
        assert_eq!(file.decls[0].method, "func (*base.Conn).Close() error");
    }

    #[test]
    fn unnamed_params_are_forwarded_by_position() {
        let text = r#"
            [package]
            path = "example.com/kv"
            name = "kv"

            [[objects]]
            name = "store"
            type = "Store"

            [[types]]
            name = "Store"
            kind = "struct"

            [[types.methods]]
            name = "Put"
            params = ["string", { name = "_", type = "[]byte" }]
        "#;
        let file = generate(&table(text), &Request::new("store")).unwrap();
        let decl = &file.decls[0];
        assert_eq!(decl.signature, "(p0 string, p1 []byte)");
        assert_eq!(decl.method, "func (Store).Put(string, _ []byte)");
        assert_eq!(decl.delegation.print_to_string(None), "store.Put(p0, p1)");
    }

    #[test]
    fn missing_symbol_is_reported() {
        let err = generate(&table(COUNTER), &Request::new("missing")).unwrap_err();
        assert!(matches!(err, GeneratorError::SymbolNotFound { .. }));
    }

    #[test]
    fn invalid_pattern_wins_over_missing_symbol() {
        let err = generate(&table(COUNTER), &Request::new("missing").allow("(")).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidPattern { .. }));
    }

    #[test]
    fn list_methods_with_verdicts() {
        let listing = list(&table(COUNTER), &Request::new("counter").block("^Reset$")).unwrap();
        assert_eq!(listing.typ, "*Counter");
        let verdicts: Vec<_> = listing.entries.iter().map(|entry| entry.verdict).collect();
        assert_eq!(
            verdicts,
            vec![Verdict::Keep, Verdict::Keep, Verdict::Blocked, Verdict::Unexported]
        );
        assert_eq!(listing.entries[3].method, "func (*Counter).bump()");
    }
}
