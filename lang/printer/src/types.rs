use std::io;

use pretty::termcolor::WriteColor;

use crate::render::RenderTermcolor;

#[derive(Debug, Clone, Copy)]
pub enum Anno {
    Keyword,
    Func,
    Param,
    Type,
    Comment,
    Keep,
    Skip,
}

pub type Alloc<'a> = pretty::Arena<'a, Anno>;
pub type Builder<'a> = pretty::DocBuilder<'a, Alloc<'a>, Anno>;

pub trait Print {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a>;

    fn print_to_string(&self, cfg: Option<&PrintCfg>) -> String {
        let alloc = Alloc::new();
        let def = PrintCfg::default();
        let cfg = cfg.unwrap_or(&def);
        let mut buf = Vec::new();
        self.print(cfg, &alloc).1.render(cfg.width, &mut buf).expect("Failed to print to string");
        String::from_utf8(buf).expect("Printer produced invalid UTF-8")
    }

    fn print_colored<W: WriteColor>(&self, cfg: &PrintCfg, out: &mut W) -> io::Result<()> {
        let alloc = Alloc::new();
        self.print(cfg, &alloc).1.render_raw(cfg.width, &mut RenderTermcolor::new(out))
    }
}

/// Printing which depends on a context that lives outside of the printed value,
/// e.g. the qualifier used to abbreviate names of other packages.
pub trait PrintInCtx {
    type Ctx;

    fn print_in_ctx<'a>(
        &'a self,
        cfg: &PrintCfg,
        ctx: &'a Self::Ctx,
        alloc: &'a Alloc<'a>,
    ) -> Builder<'a>;

    fn print_to_string_in_ctx(&self, ctx: &Self::Ctx) -> String {
        let alloc = Alloc::new();
        let cfg = PrintCfg::default();
        let mut buf = Vec::new();
        self.print_in_ctx(&cfg, ctx, &alloc)
            .1
            .render(cfg.width, &mut buf)
            .expect("Failed to print to string");
        String::from_utf8(buf).expect("Printer produced invalid UTF-8")
    }
}

pub struct PrintCfg {
    /// The width of the output terminal/device. Width is used for
    /// the insertion of linebreaks.
    pub width: usize,
    /// How many spaces of indentation are used
    pub indent: isize,
    /// Whether to indent with a single tab instead of `indent` spaces.
    pub tabs: bool,
}

impl PrintCfg {
    /// The text of one level of indentation.
    pub fn indentation(&self) -> String {
        if self.tabs { "\t".to_owned() } else { " ".repeat(self.indent.max(0) as usize) }
    }
}

impl Default for PrintCfg {
    fn default() -> Self {
        Self { width: crate::DEFAULT_WIDTH, indent: 4, tabs: true }
    }
}

#[cfg(test)]
mod print_cfg_tests {
    use super::*;

    #[test]
    fn indentation() {
        assert_eq!(PrintCfg::default().indentation(), "\t");
        let spaces = PrintCfg { tabs: false, indent: 2, ..PrintCfg::default() };
        assert_eq!(spaces.indentation(), "  ");
    }
}
