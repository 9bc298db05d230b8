use pretty::DocAllocator;

use super::types::*;

pub trait ThemeExt<'a> {
    fn keyword(&'a self, text: &'a str) -> Builder<'a>;
    fn func(&'a self, text: &'a str) -> Builder<'a>;
    fn param(&'a self, text: &'a str) -> Builder<'a>;
    fn typ(&'a self, text: &'a str) -> Builder<'a>;
    fn comment(&'a self, text: &'a str) -> Builder<'a>;
}

impl<'a> ThemeExt<'a> for Alloc<'a> {
    fn keyword(&'a self, text: &'a str) -> Builder<'a> {
        self.text(text).annotate(Anno::Keyword)
    }

    fn func(&'a self, text: &'a str) -> Builder<'a> {
        self.text(text).annotate(Anno::Func)
    }

    fn param(&'a self, text: &'a str) -> Builder<'a> {
        self.text(text).annotate(Anno::Param)
    }

    fn typ(&'a self, text: &'a str) -> Builder<'a> {
        self.text(text).annotate(Anno::Type)
    }

    fn comment(&'a self, text: &'a str) -> Builder<'a> {
        self.text(text).annotate(Anno::Comment)
    }
}
