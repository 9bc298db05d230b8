use hoist_printer::PrintInCtx;
use hoist_symbols::{HashSet, Method, Qualifier, Signature, Var, is_blank};

/// Render a signature as it follows the name of a function declaration, e.g.
/// `(n int) (int, error)`. Types of the home package stay unqualified.
pub fn render(signature: &Signature, qualifier: &Qualifier) -> String {
    signature.print_to_string_in_ctx(qualifier)
}

/// Render a method the way Go prints a method object, e.g.
/// `func (*Counter).Reset(n int)`.
pub fn object_string(method: &Method, qualifier: &Qualifier) -> String {
    method.print_to_string_in_ctx(qualifier)
}

/// Give every parameter a name that can be referred to in a call.
///
/// Unnamed and blank parameters are called `p<index>`, with `_` appended until the
/// name is unused in the signature. Named parameters and all results are kept as
/// they are.
pub fn bind_params(signature: &Signature) -> Signature {
    let mut taken: HashSet<String> = signature
        .params
        .iter()
        .chain(&signature.results)
        .filter_map(|var| var.name.clone())
        .collect();

    let params = signature
        .params
        .iter()
        .enumerate()
        .map(|(index, Var { name, typ })| match name {
            Some(name) if !is_blank(name) => Var::new(name, typ.clone()),
            _ => {
                let mut fresh = format!("p{index}");
                while taken.contains(&fresh) {
                    fresh.push('_');
                }
                taken.insert(fresh.clone());
                Var::new(fresh, typ.clone())
            }
        })
        .collect();

    Signature::new(params, signature.results.clone())
}
