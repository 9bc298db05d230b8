//! Formatting of the generated source before it is written.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

pub type FormatResult<T = ()> = Result<T, FormatError>;

#[derive(Error, Diagnostic, Debug)]
pub enum FormatError {
    #[error("Can't format output: {message}")]
    #[diagnostic(code("F-001"))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },
    #[error("Can't format output: failed to run {program}")]
    #[diagnostic(code("F-002"), help("Check that {program} is installed and on the PATH"))]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Can't format output: {program} exited with {status}")]
    #[diagnostic(code("F-003"))]
    Failed {
        program: String,
        status: String,
        #[help]
        stderr: Option<String>,
    },
    #[error("Can't format output: {program} produced invalid UTF-8")]
    #[diagnostic(code("F-004"))]
    InvalidUtf8 { program: String },
}

/// Turns generated source into its final form.
///
/// `filename` is the name the output is written to. It is used in diagnostics
/// and never read.
pub trait Formatter {
    fn format(&self, filename: &str, source: &str) -> FormatResult<String>;
}

// Builtin
//
//

/// Checks that brackets are balanced and normalizes whitespace.
///
/// Trailing whitespace is removed, runs of blank lines are collapsed into one and
/// the result ends with exactly one newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Builtin;

impl Formatter for Builtin {
    fn format(&self, filename: &str, source: &str) -> FormatResult<String> {
        check_balanced(source).map_err(|(span, message)| FormatError::Syntax {
            message,
            src: NamedSource::new(filename, source.to_owned()),
            span: span.into(),
        })?;
        Ok(normalize(source))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexical {
    Code,
    LineComment,
    BlockComment,
    /// A string or rune literal with its delimiter.
    Literal(char),
}

/// Find the first unbalanced bracket, ignoring comments and literals.
fn check_balanced(source: &str) -> Result<(), ((usize, usize), String)> {
    let mut open: Vec<(usize, char)> = Vec::new();
    let mut state = Lexical::Code;
    let mut literal_start = 0;
    let mut chars = source.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match state {
            Lexical::Code => match c {
                '/' if chars.peek().map(|(_, c)| *c) == Some('/') => {
                    chars.next();
                    state = Lexical::LineComment;
                }
                '/' if chars.peek().map(|(_, c)| *c) == Some('*') => {
                    chars.next();
                    literal_start = offset;
                    state = Lexical::BlockComment;
                }
                '"' | '`' | '\'' => {
                    literal_start = offset;
                    state = Lexical::Literal(c);
                }
                '(' | '[' | '{' => open.push((offset, c)),
                ')' | ']' | '}' => match open.pop() {
                    Some((_, o)) if closing(o) == c => {}
                    _ => return Err(((offset, 1), format!("unmatched `{c}`"))),
                },
                _ => {}
            },
            Lexical::LineComment => {
                if c == '\n' {
                    state = Lexical::Code;
                }
            }
            Lexical::BlockComment => {
                if c == '*' && chars.peek().map(|(_, c)| *c) == Some('/') {
                    chars.next();
                    state = Lexical::Code;
                }
            }
            Lexical::Literal(delim) => match c {
                '\\' if delim != '`' => {
                    chars.next();
                }
                '\n' if delim != '`' => {
                    let span = (literal_start, offset - literal_start);
                    return Err((span, "newline in literal".to_owned()));
                }
                c if c == delim => state = Lexical::Code,
                _ => {}
            },
        }
    }

    match state {
        Lexical::BlockComment => {
            return Err(((literal_start, 2), "comment not terminated".to_owned()));
        }
        Lexical::Literal(_) => {
            return Err(((literal_start, 1), "literal not terminated".to_owned()));
        }
        Lexical::Code | Lexical::LineComment => {}
    }

    match open.pop() {
        Some((offset, c)) => Err(((offset, 1), format!("unclosed `{c}`"))),
        None => Ok(()),
    }
}

fn closing(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

fn normalize(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut blank = false;
    for line in source.lines().map(str::trim_end) {
        if line.is_empty() {
            blank = !out.is_empty();
            continue;
        }
        if blank {
            out.push('\n');
            blank = false;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

// External
//
//

/// Pipes the source through an external program such as `goimports`.
#[derive(Debug, Clone)]
pub struct External {
    program: String,
    args: Vec<String>,
}

impl External {
    pub fn new(program: impl Into<String>) -> Self {
        External { program: program.into(), args: vec![] }
    }

    /// Parse a command line such as `gofmt -s` into program and arguments.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut words = command.split_whitespace();
        let program = words.next()?;
        let args = words.map(ToOwned::to_owned).collect();
        Some(External { program: program.to_owned(), args })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Formatter for External {
    fn format(&self, filename: &str, source: &str) -> FormatResult<String> {
        log::debug!("Formatting {filename} with {} {}", self.program, self.args.join(" "));

        let spawn_error =
            |source: io::Error| FormatError::Spawn { program: self.program.clone(), source };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // Stdin is fed from another thread while stdout is drained.
        let mut stdin = child.stdin.take().ok_or_else(|| {
            spawn_error(io::Error::new(io::ErrorKind::BrokenPipe, "stdin is not piped"))
        })?;
        let input = source.to_owned();
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output().map_err(spawn_error)?;
        // The program may exit without reading all of its input.
        if let Ok(Err(err)) = writer.join() {
            log::debug!("Could not pass all input to {}: {err}", self.program);
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            return Err(FormatError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: (!stderr.is_empty()).then_some(stderr),
            });
        }

        String::from_utf8(output.stdout)
            .map_err(|_| FormatError::InvalidUtf8 { program: self.program.clone() })
    }
}
