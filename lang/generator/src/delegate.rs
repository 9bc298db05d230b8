use hoist_printer::theme::ThemeExt;
use hoist_printer::tokens::*;
use hoist_printer::util::{ParensExt, comma_separated};
use hoist_printer::{Alloc, Builder, DocAllocator, Print, PrintCfg};
use hoist_symbols::Signature;

use crate::render::bind_params;

/// The body of a forwarding function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delegation {
    /// The method has no results: `local.Method(args)`.
    CallOnly(Call),
    /// `return local.Method(args)`
    ReturnCall(Call),
}

/// A call of a method on a package level value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub receiver: String,
    pub method: String,
    pub args: Vec<String>,
}

/// Build the body forwarding to `local.method`.
///
/// The arguments are the parameter names of `signature` in order. Unnamed and
/// blank parameters are bound the way [`bind_params`] binds them.
pub fn synthesize(local: &str, method: &str, signature: &Signature) -> Delegation {
    let bound = bind_params(signature);
    let call = Call {
        receiver: local.to_owned(),
        method: method.to_owned(),
        args: bound.params.into_iter().filter_map(|var| var.name).collect(),
    };
    if signature.has_results() { Delegation::ReturnCall(call) } else { Delegation::CallOnly(call) }
}

impl Delegation {
    pub fn call(&self) -> &Call {
        match self {
            Delegation::CallOnly(call) | Delegation::ReturnCall(call) => call,
        }
    }
}

impl Print for Delegation {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            Delegation::CallOnly(call) => call.print(cfg, alloc),
            Delegation::ReturnCall(call) => {
                alloc.keyword(RETURN).append(alloc.space()).append(call.print(cfg, alloc))
            }
        }
    }
}

impl Print for Call {
    fn print<'a>(&'a self, _cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let Call { receiver, method, args } = self;
        let args = comma_separated(alloc, args.iter().map(|arg| alloc.param(arg)));
        alloc.text(receiver).append(DOT).append(alloc.func(method)).append(args.parens_tuple())
    }
}
