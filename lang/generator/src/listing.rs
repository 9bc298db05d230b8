use hoist_printer::theme::ThemeExt;
use hoist_printer::{Alloc, Anno, Builder, DocAllocator, Print, PrintCfg};

use crate::filter::Verdict;

/// The method set of a package level value together with the verdict of the
/// name filter for each method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub local: String,
    /// The pointer promoted type of the value, e.g. `*Counter`.
    pub typ: String,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The method as Go would print it, e.g. `func (*Counter).Next() int`.
    pub method: String,
    /// Embedded fields through which the method is promoted.
    pub path: Vec<String>,
    pub verdict: Verdict,
}

impl Listing {
    pub fn kept(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|entry| entry.verdict.is_keep())
    }
}

const VERDICT_WIDTH: usize = 12;

impl Print for Listing {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let Listing { local, typ, entries } = self;

        let header = alloc.text(local).append(alloc.space()).append(alloc.typ(typ));
        let entries = entries.iter().map(|entry| alloc.hardline().append(entry.print(cfg, alloc)));

        header.append(alloc.concat(entries)).append(alloc.hardline())
    }
}

impl Print for Entry {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let Entry { method, path, verdict } = self;

        let anno = if verdict.is_keep() { Anno::Keep } else { Anno::Skip };
        let verdict = format!("{:<width$}", verdict.to_string(), width = VERDICT_WIDTH);

        let entry = alloc
            .text(cfg.indentation())
            .append(alloc.text(verdict).annotate(anno))
            .append(alloc.text(method));

        if path.is_empty() {
            entry
        } else {
            let via = alloc.text(format!("// via {}", path.join("."))).annotate(Anno::Comment);
            entry.append(alloc.space()).append(via)
        }
    }
}
