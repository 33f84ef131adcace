//! Live module loader that scans Ruby-style source for module and method
//! declarations.
//!
//! This is a line scanner, not an interpreter. It understands `module` and
//! `class` openers (including `A::B` paths), `def` (one-line and block
//! forms), the common block openers and `end`. Singleton methods
//! (`def self.x`) are not instance methods and are skipped.

use std::path::Path;

use crate::ports::filesystem::FileSystem;
use crate::ports::loader::{ModuleDefinition, ModuleLoader};

/// Loader that reads files through a [`FileSystem`] and scans them.
pub struct SourceScanLoader<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> SourceScanLoader<F> {
    /// Creates a loader reading through `fs`.
    pub fn new(fs: F) -> Self {
        Self { fs }
    }
}

impl<F: FileSystem> ModuleLoader for SourceScanLoader<F> {
    fn load(
        &self,
        path: &Path,
    ) -> Result<Vec<ModuleDefinition>, Box<dyn std::error::Error + Send + Sync>> {
        let source = self.fs.read_to_string(path)?;
        scan(&source).map_err(|line| format!("unbalanced `end` at line {line}").into())
    }
}

enum Frame {
    Named(Vec<String>),
    Singleton,
    Other,
}

/// Scans `source` and returns every module/class it defines, in order of
/// first appearance. Reopened modules are merged.
///
/// Returns the 1-based line number of a stray `end` on failure.
pub fn scan(source: &str) -> Result<Vec<ModuleDefinition>, usize> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut defs: Vec<ModuleDefinition> = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = keyword(line, "module").or_else(|| keyword(line, "class")) {
            // `class << self` opens a singleton scope, not a named type.
            if rest.starts_with("<<") {
                stack.push(Frame::Singleton);
                continue;
            }
            let Some(path) = rest.split([' ', ';', '<', '(']).next().filter(|p| !p.is_empty())
            else {
                continue;
            };
            let segments: Vec<String> = path.split("::").map(str::to_string).collect();
            let mut full = current_name(&stack);
            full.extend(segments.iter().cloned());
            let name = full.join("::");
            if !defs.iter().any(|d| d.name == name) {
                defs.push(ModuleDefinition::new(name, Vec::<String>::new()));
            }
            if !closes_inline(line) {
                stack.push(Frame::Named(segments));
            }
            continue;
        }

        if let Some(rest) = keyword(line, "def") {
            let name: String = rest
                .chars()
                .take_while(|c| !matches!(c, '(' | ' ' | ';' | '='))
                .collect();
            // Setter methods keep their `=`.
            let tail = &rest[name.len()..];
            let setter = tail.starts_with("=(") || tail.starts_with("= ");
            let name = if setter { format!("{name}=") } else { name };
            let singleton = stack.iter().any(|f| matches!(f, Frame::Singleton));
            if !name.is_empty() && !name.starts_with("self.") && !singleton {
                let owner = current_name(&stack).join("::");
                if let Some(def) = defs.iter_mut().find(|d| d.name == owner) {
                    def.methods.insert(name);
                }
            }
            if !closes_inline(line) && !is_endless_def(rest) {
                stack.push(Frame::Other);
            }
            continue;
        }

        if is_end(line) {
            if stack.pop().is_none() {
                return Err(idx + 1);
            }
            continue;
        }

        if opens_block(line) {
            stack.push(Frame::Other);
        }
    }

    Ok(defs)
}

fn current_name(stack: &[Frame]) -> Vec<String> {
    stack
        .iter()
        .filter_map(|f| match f {
            Frame::Named(segments) => Some(segments.iter().cloned()),
            Frame::Singleton | Frame::Other => None,
        })
        .flatten()
        .collect()
}

fn keyword<'a>(line: &'a str, word: &str) -> Option<&'a str> {
    line.strip_prefix(word).and_then(|rest| rest.strip_prefix(' ')).map(str::trim_start)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        // Keep `#{...}` interpolation and `#` inside strings roughly intact by
        // only treating a `#` preceded by whitespace (or at start) as a comment.
        Some(0) => "",
        Some(i) if line[..i].ends_with(char::is_whitespace) && !in_string(&line[..i]) => &line[..i],
        _ => line,
    }
}

fn in_string(prefix: &str) -> bool {
    prefix.matches('\'').count() % 2 == 1 || prefix.matches('"').count() % 2 == 1
}

// `module M; end`, `def x; 1; end`, `if a then b end`
fn closes_inline(line: &str) -> bool {
    line.ends_with(" end") || line.ends_with(";end")
}

fn is_endless_def(rest: &str) -> bool {
    // `def name = expr` / `def name(args) = expr`
    let after_params = match rest.find(')') {
        Some(i) if rest.find('(').is_some_and(|o| o < i) => &rest[i + 1..],
        _ => rest.split_once(' ').map_or("", |(_, r)| r),
    };
    after_params.trim_start().starts_with("= ")
}

fn is_end(line: &str) -> bool {
    line == "end"
        || line.starts_with("end ")
        || line.starts_with("end.")
        || line.starts_with("end)")
        || line.starts_with("end,")
}

const BLOCK_OPENERS: [&str; 8] = ["if", "unless", "case", "while", "until", "begin", "for", "do"];

fn opens_block(line: &str) -> bool {
    if closes_inline(line) {
        return false;
    }
    BLOCK_OPENERS.iter().any(|w| line == *w || keyword(line, w).is_some())
        || assigns_block(line)
        || line.ends_with(" do")
        || (line.contains(" do |") && line.ends_with('|'))
}

// `x = if ...`, `@y ||= begin`, `z += case ...`
fn assigns_block(line: &str) -> bool {
    line.match_indices('=').any(|(i, _)| {
        let (before, after) = (&line[..i], &line[i + 1..]);
        if before.ends_with(['=', '!', '<', '>']) || after.starts_with(['=', '~', '>']) {
            return false;
        }
        let rest = after.trim_start();
        BLOCK_OPENERS[..6].iter().any(|w| rest == *w || keyword(rest, w).is_some())
    })
}
