use std::fmt;

use hoist_printer::theme::ThemeExt;
use hoist_printer::tokens::*;
use hoist_printer::{Alloc, Anno, Builder, DocAllocator, Print, PrintCfg};
use hoist_symbols::{Method, Qualifier};

use crate::delegate::{Delegation, synthesize};
use crate::render::{bind_params, object_string, render};

/// The generated source text of one package, before any formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardingFile {
    pub package: String,
    pub decls: Vec<ForwardDecl>,
}

/// A package level function forwarding to a method of a package level value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardDecl {
    pub name: String,
    /// The forwarded method as Go would print it, e.g. `func (*Counter).Next() int`.
    pub method: String,
    /// Parameters and results, e.g. `(n int) error`.
    pub signature: String,
    pub delegation: Delegation,
}

/// Build the declarations for `methods` in the given order.
pub fn emit<I>(package: &str, local: &str, methods: I, qualifier: &Qualifier) -> ForwardingFile
where
    I: IntoIterator<Item = Method>,
{
    let decls = methods
        .into_iter()
        .map(|method| {
            let signature = bind_params(&method.signature);
            ForwardDecl {
                method: object_string(&method, qualifier),
                signature: render(&signature, qualifier),
                delegation: synthesize(local, &method.name, &signature),
                name: method.name,
            }
        })
        .collect();
    ForwardingFile { package: package.to_owned(), decls }
}

impl Print for ForwardingFile {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let ForwardingFile { package, decls } = self;

        let header = alloc.keyword(PACKAGE).append(alloc.space()).append(alloc.text(package));

        let decls = decls.iter().map(|decl| {
            alloc.hardline().append(alloc.hardline()).append(decl.print(cfg, alloc))
        });

        header.append(alloc.concat(decls)).append(alloc.hardline())
    }
}

impl Print for ForwardDecl {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let ForwardDecl { name, method, signature, delegation } = self;

        let doc = alloc
            .comment(COMMENT)
            .append(alloc.space())
            .append(alloc.comment(name))
            .append(
                alloc
                    .text(format!(
                        " is package exported version of {} called on a package level value.",
                        quote(method)
                    ))
                    .annotate(Anno::Comment),
            );

        let head = alloc
            .keyword(FUNC)
            .append(alloc.space())
            .append(alloc.func(name))
            .append(alloc.text(signature))
            .append(alloc.space())
            .append("{");

        let body = alloc.text(cfg.indentation()).append(delegation.print(cfg, alloc));

        doc.append(alloc.hardline())
            .append(head)
            .append(alloc.hardline())
            .append(body)
            .append(alloc.hardline())
            .append("}")
    }
}

impl fmt::Display for ForwardingFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.print_to_string(None))
    }
}

/// Quote a string as a Go string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
