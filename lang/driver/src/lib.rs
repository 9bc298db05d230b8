//! Runs generation end to end: load the package, generate the forwarding
//! functions, prefix the generated marker, format and write the result.

use hoist_generator::{Listing, Request};
use hoist_loader::Provider;
use hoist_printer::Print;
use hoist_symbols::SymbolTable;

mod format;
pub mod marker;
mod output;
mod result;

pub use format::*;
pub use output::*;
pub use result::*;

/// One generation run.
#[derive(Debug, Clone)]
pub struct Job {
    /// The package pattern handed to the provider.
    pub package: String,
    pub request: Request,
    pub output: Output,
    /// Build tag of the constraint excluding the generated file.
    pub tag: String,
    /// Arguments recorded in the generated marker.
    pub args: Vec<String>,
}

impl Job {
    pub fn new(package: impl Into<String>, request: Request) -> Self {
        let output = Output::from_arg(None, &request.local);
        Job {
            package: package.into(),
            request,
            output,
            tag: marker::DEFAULT_TAG.to_owned(),
            args: vec![],
        }
    }
}

pub struct Driver {
    provider: Box<dyn Provider>,
    formatter: Box<dyn Formatter>,
}

impl Driver {
    pub fn new(provider: impl Provider + 'static, formatter: impl Formatter + 'static) -> Self {
        Driver { provider: Box::new(provider), formatter: Box::new(formatter) }
    }

    pub fn load(&self, package: &str) -> DriverResult<SymbolTable> {
        let table = self.provider.load(package)?;
        let home = table.home();
        log::debug!("Load: package {} ({})", home.name(), home.path());
        Ok(table)
    }

    /// The formatted source of a job, without writing it anywhere.
    pub fn render(&self, job: &Job) -> DriverResult<String> {
        let table = self.load(&job.package)?;
        let file = hoist_generator::generate(&table, &job.request)?;

        let mut source = marker::header(&job.args, &job.tag);
        source.push_str(&file.print_to_string(None));

        let filename = job.output.filename(&job.request.local);
        Ok(self.formatter.format(&filename, &source)?)
    }

    /// Render a job and write it to its output. Nothing is written if any step fails.
    pub fn run(&self, job: &Job) -> DriverResult {
        let code = self.render(job)?;
        job.output.write(&code)?;
        log::info!("Wrote forwarding functions for {} to {}", job.request.local, job.output);
        Ok(())
    }

    /// The method set of a value with the verdict of the name filter per method.
    pub fn list(&self, package: &str, request: &Request) -> DriverResult<Listing> {
        let table = self.load(package)?;
        Ok(hoist_generator::list(&table, request)?)
    }
}

#[cfg(test)]
mod driver_tests {
    use std::fs;
    use std::path::PathBuf;

    use hoist_generator::GeneratorError;
    use hoist_loader::{LoadError, LoadResult, MANIFEST_FILE, ManifestProvider};

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

        [[types.methods]]
        name = "Next"
        receiver = "pointer"
        results = ["int"]

        [[types.methods]]
        name = "Reset"
        receiver = "pointer"
        params = [{ name = "n", type = "int" }]
    "#;

    fn package() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), COUNTER).unwrap();
        dir
    }

    fn job(dir: &tempfile::TempDir, request: Request) -> Job {
        Job::new(dir.path().to_str().unwrap(), request)
    }

    struct Rejecting;

    impl Formatter for Rejecting {
        fn format(&self, _filename: &str, _source: &str) -> FormatResult<String> {
            Err(FormatError::InvalidUtf8 { program: "rejecting".to_owned() })
        }
    }

    struct Missing;

    impl Provider for Missing {
        fn load(&self, package: &str) -> LoadResult<SymbolTable> {
            let path = PathBuf::from(package);
            Err(LoadError::Manifest { path, message: "missing".to_owned() })
        }
    }

    #[test]
    fn render_prefixes_marker() {
        let dir = package();
        let driver = Driver::new(ManifestProvider::new(), Builtin);
        let mut job = job(&dir, Request::new("counter"));
        job.args = vec!["generate".to_owned(), "--local".to_owned(), "counter".to_owned()];
        let code = driver.render(&job).unwrap();
        assert!(code.starts_with(
            "// Code generated by hoist [\"generate\" \"--local\" \"counter\"] -- DO NOT EDIT.\n\
             //go:build !hoist\n\
             \n\
             package counter\n\
             \n"
        ));
        assert!(code.contains("func Reset(n int) {\n\tcounter.Reset(n)\n}\n"));
        assert!(code.ends_with("}\n"));
    }

    #[test]
    fn run_writes_default_file() {
        let dir = package();
        let driver = Driver::new(ManifestProvider::new(), Builtin);
        let mut job = job(&dir, Request::new("counter"));
        let path = dir.path().join("counter.funcs.go");
        job.output = Output::File(path.clone());
        driver.run(&job).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), driver.render(&job).unwrap());
    }

    #[test]
    fn failed_formatting_writes_nothing() {
        let dir = package();
        let driver = Driver::new(ManifestProvider::new(), Rejecting);
        let mut job = job(&dir, Request::new("counter"));
        let path = dir.path().join("counter.funcs.go");
        job.output = Output::File(path.clone());
        assert!(matches!(driver.run(&job), Err(DriverError::Format(_))));
        assert!(!path.exists());
    }

    #[test]
    fn errors_keep_their_stage() {
        let dir = package();
        let driver = Driver::new(ManifestProvider::new(), Builtin);
        let missing = driver.render(&job(&dir, Request::new("missing")));
        assert!(matches!(
            missing,
            Err(DriverError::Generate(GeneratorError::SymbolNotFound { .. }))
        ));

        let invalid = driver.render(&job(&dir, Request::new("counter").block("(")));
        assert!(matches!(
            invalid,
            Err(DriverError::Generate(GeneratorError::InvalidPattern { .. }))
        ));

        let driver = Driver::new(Missing, Builtin);
        let unloaded = driver.render(&job(&dir, Request::new("counter")));
        assert!(matches!(unloaded, Err(DriverError::Load(_))));
    }

    #[test]
    fn list_reports_verdicts() {
        let dir = package();
        let driver = Driver::new(ManifestProvider::new(), Builtin);
        let request = Request::new("counter").allow("^Next$");
        let listing = driver.list(dir.path().to_str().unwrap(), &request).unwrap();
        assert_eq!(listing.kept().count(), 1);
        assert_eq!(listing.entries.len(), 2);
    }
}
