use pretty::DocAllocator;

use super::tokens::COMMA;
use super::types::*;

/// Separate the given documents by `, ` without introducing line breaks.
pub fn comma_separated<'a, I>(alloc: &'a Alloc<'a>, docs: I) -> Builder<'a>
where
    I: IntoIterator<Item = Builder<'a>>,
{
    alloc.intersperse(docs, alloc.text(COMMA).append(alloc.space()))
}

pub trait ParensExt<'a> {
    fn parens_tuple(self) -> Builder<'a>;
}

impl<'a> ParensExt<'a> for Builder<'a> {
    fn parens_tuple(self) -> Builder<'a> {
        self.enclose("(", ")")
    }
}
