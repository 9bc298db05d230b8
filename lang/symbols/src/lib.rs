//! The read-only model of a compiled Go package: its objects, its named types and
//! the named types of the packages it imports.
//!
//! Everything in here is built once by a provider and never mutated afterwards.

mod decls;
mod ident;
mod method_set;
mod qualifier;
mod types;

pub use decls::*;
pub use ident::*;
pub use method_set::*;
pub use qualifier::*;
pub use types::*;

pub type HashMap<K, V> = fxhash::FxHashMap<K, V>;
pub type HashSet<V> = fxhash::FxHashSet<V>;
