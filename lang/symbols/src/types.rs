use std::fmt;

use hoist_printer::theme::ThemeExt;
use hoist_printer::tokens::*;
use hoist_printer::util::{ParensExt, comma_separated};
use hoist_printer::{Alloc, Builder, DocAllocator, PrintCfg, PrintInCtx};

use crate::decls::TypeName;
use crate::qualifier::Qualifier;

// Type
//
//

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A predeclared type of the universe scope, e.g. `int` or `error`.
    Basic(String),
    Named(TypeName),
    Pointer(Box<Type>),
    Slice(Box<Type>),
    Array(u64, Box<Type>),
    Map(Box<Type>, Box<Type>),
    Signature(Signature),
}

impl Type {
    pub fn pointer_to(self) -> Type {
        Type::Pointer(Box::new(self))
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Type::Pointer(_))
    }

    /// Strip one level of pointer indirection.
    ///
    /// Returns the pointee and whether there was a pointer to strip.
    pub fn deref(&self) -> (&Type, bool) {
        match self {
            Type::Pointer(elem) => (elem, true),
            typ => (typ, false),
        }
    }
}

impl From<TypeName> for Type {
    fn from(name: TypeName) -> Self {
        Type::Named(name)
    }
}

impl PrintInCtx for Type {
    type Ctx = Qualifier;

    fn print_in_ctx<'a>(
        &'a self,
        cfg: &PrintCfg,
        ctx: &'a Self::Ctx,
        alloc: &'a Alloc<'a>,
    ) -> Builder<'a> {
        match self {
            Type::Basic(name) => alloc.typ(name),
            Type::Named(name) => name.print_in_ctx(cfg, ctx, alloc),
            Type::Pointer(elem) => alloc.text(STAR).append(elem.print_in_ctx(cfg, ctx, alloc)),
            Type::Slice(elem) => alloc.text(BRACKETS).append(elem.print_in_ctx(cfg, ctx, alloc)),
            Type::Array(len, elem) => alloc
                .text(len.to_string())
                .enclose("[", "]")
                .append(elem.print_in_ctx(cfg, ctx, alloc)),
            Type::Map(key, value) => alloc
                .keyword(MAP)
                .append(key.print_in_ctx(cfg, ctx, alloc).enclose("[", "]"))
                .append(value.print_in_ctx(cfg, ctx, alloc)),
            Type::Signature(sig) => alloc.keyword(FUNC).append(sig.print_in_ctx(cfg, ctx, alloc)),
        }
    }
}

impl PrintInCtx for TypeName {
    type Ctx = Qualifier;

    fn print_in_ctx<'a>(
        &'a self,
        _cfg: &PrintCfg,
        ctx: &'a Self::Ctx,
        alloc: &'a Alloc<'a>,
    ) -> Builder<'a> {
        let qualified = ctx.qualify(&self.package);
        if qualified.is_empty() {
            alloc.typ(&self.name)
        } else {
            alloc.text(qualified).append(DOT).append(alloc.typ(&self.name))
        }
    }
}

// Signature
//
//

/// Parameters and results of a function or method. The receiver of a method is
/// not part of its signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    pub params: Vec<Var>,
    pub results: Vec<Var>,
}

impl Signature {
    pub fn new(params: Vec<Var>, results: Vec<Var>) -> Self {
        Signature { params, results }
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}

/// Prints the signature as it follows the name of a function declaration,
/// e.g. `(n int) (int, error)`.
impl PrintInCtx for Signature {
    type Ctx = Qualifier;

    fn print_in_ctx<'a>(
        &'a self,
        cfg: &PrintCfg,
        ctx: &'a Self::Ctx,
        alloc: &'a Alloc<'a>,
    ) -> Builder<'a> {
        let Signature { params, results } = self;

        let params = print_vars(params, cfg, ctx, alloc).parens_tuple();

        match results.as_slice() {
            [] => params,
            [Var { name: None, typ }] => {
                params.append(alloc.space()).append(typ.print_in_ctx(cfg, ctx, alloc))
            }
            results => params
                .append(alloc.space())
                .append(print_vars(results, cfg, ctx, alloc).parens_tuple()),
        }
    }
}

fn print_vars<'a>(
    vars: &'a [Var],
    cfg: &PrintCfg,
    ctx: &'a Qualifier,
    alloc: &'a Alloc<'a>,
) -> Builder<'a> {
    comma_separated(alloc, vars.iter().map(|var| var.print_in_ctx(cfg, ctx, alloc)))
}

// Var
//
//

/// A parameter or result of a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Var {
    pub name: Option<String>,
    pub typ: Type,
}

impl Var {
    pub fn new(name: impl Into<String>, typ: Type) -> Self {
        Var { name: Some(name.into()), typ }
    }

    pub fn unnamed(typ: Type) -> Self {
        Var { name: None, typ }
    }
}

impl PrintInCtx for Var {
    type Ctx = Qualifier;

    fn print_in_ctx<'a>(
        &'a self,
        cfg: &PrintCfg,
        ctx: &'a Self::Ctx,
        alloc: &'a Alloc<'a>,
    ) -> Builder<'a> {
        let Var { name, typ } = self;
        match name {
            Some(name) => {
                alloc.param(name).append(alloc.space()).append(typ.print_in_ctx(cfg, ctx, alloc))
            }
            None => typ.print_in_ctx(cfg, ctx, alloc),
        }
    }
}

/// Receiver form of a declared method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Receiver {
    #[default]
    Value,
    Pointer,
}

impl fmt::Display for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Receiver::Value => write!(f, "value"),
            Receiver::Pointer => write!(f, "pointer"),
        }
    }
}
