//! `SKILL.md` frontmatter parsing.
//!
//! A skill document opens with a `---` line, a block of `key: value` pairs,
//! and a closing `---` line. Everything after that is the Markdown body.
//!
//! A lightweight YAML subset parser is used instead of a full YAML crate.
//! It understands what skill frontmatter actually contains:
//!
//! - plain scalars (`name: my-skill`, with an optional ` # comment`), which
//!   may wrap onto indented lines;
//! - single- and double-quoted scalars;
//! - block scalars (`description: >-`, `|`, with `-`/`+` chomping);
//! - an empty value followed by indented lines: `metadata` mappings and
//!   `allowed-tools` block sequences are kept as dedented raw text, any
//!   other lines fold into a plain scalar.
//!
//! Values are flattened to strings: the validators only ever look at `name`
//! and `description` contents and at the set of keys.

use crate::error::{Error, FrontmatterError, Result};
use std::path::{Path, PathBuf};

const DELIMITER: &str = "---";

/// One `key: value` pair from the frontmatter block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    /// 1-indexed line of the key in the source file.
    pub line: usize,
}

/// Parsed frontmatter: entries in declaration order, keys unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: Vec<Entry>,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(|e| e.value.as_str())
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of splitting a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<'a> {
    pub frontmatter: Frontmatter,
    pub body: &'a str,
    /// 1-indexed line on which `body` starts.
    pub body_line: usize,
}

/// Splits `raw` into frontmatter and body.
///
/// # Errors
///
/// Fails when the opening delimiter is not the very first line, when the
/// block is never closed, or when a line inside it cannot be parsed.
///
/// ```
/// use validate_skill::frontmatter;
///
/// let doc = "---\nname: my-skill\n---\n# ABOUTME: hi\n";
/// let parsed = frontmatter::parse(doc).unwrap();
/// assert_eq!(parsed.frontmatter.value("name"), Some("my-skill"));
/// assert_eq!(parsed.body, "# ABOUTME: hi\n");
/// assert_eq!(parsed.body_line, 4);
///
/// assert!(frontmatter::parse("\n---\nname: x\n---\n").is_err());
/// ```
pub fn parse(raw: &str) -> std::result::Result<Parsed<'_>, FrontmatterError> {
    let mut segments = raw.split_inclusive('\n');

    let first = segments.next().ok_or(FrontmatterError::NotOnFirstLine)?;
    if !is_delimiter(first) {
        return Err(FrontmatterError::NotOnFirstLine);
    }

    let mut offset = first.len();
    let mut block: Vec<(usize, &str)> = Vec::new();
    let mut closing_line = None;

    // Line 1 is the opening delimiter; block lines start at 2.
    for (idx, segment) in segments.enumerate() {
        let line_num = idx + 2;
        offset += segment.len();
        if is_delimiter(segment) {
            closing_line = Some(line_num);
            break;
        }
        block.push((line_num, strip_eol(segment)));
    }

    let closing_line = closing_line.ok_or(FrontmatterError::Unterminated)?;

    Ok(Parsed {
        frontmatter: parse_block(&block)?,
        body: &raw[offset..],
        body_line: closing_line + 1,
    })
}

fn strip_eol(segment: &str) -> &str {
    let s = segment.strip_suffix('\n').unwrap_or(segment);
    s.strip_suffix('\r').unwrap_or(s)
}

fn is_delimiter(segment: &str) -> bool {
    strip_eol(segment).trim_end() == DELIMITER
}

// ---------------------------------------------------------------------------
// Block parser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chomp {
    Strip,
    Clip,
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    /// Inline value, possibly wrapped onto indented lines.
    Plain,
    /// Quoted value, possibly wrapped onto indented lines.
    Quoted,
    /// `>` block scalar.
    Folded(Chomp),
    /// `|` block scalar.
    Literal(Chomp),
    /// Empty inline value with an indented mapping or sequence below.
    Nested,
}

/// An entry whose value may still be continued by following lines.
struct OpenEntry<'a> {
    key: String,
    line: usize,
    style: Style,
    head: &'a str,
    continuation: Vec<&'a str>,
}

fn parse_block(lines: &[(usize, &str)]) -> std::result::Result<Frontmatter, FrontmatterError> {
    let mut entries: Vec<Entry> = Vec::new();
    let mut open: Option<OpenEntry<'_>> = None;

    for &(line_num, line) in lines {
        if line.trim().is_empty() {
            if let Some(ref mut entry) = open {
                entry.continuation.push("");
            }
            continue;
        }

        let indented = line.starts_with([' ', '\t']);
        // Unindented `- item` lines continue a block sequence.
        if indented || line.starts_with("- ") || line == "-" {
            match open {
                Some(ref mut entry) => entry.continuation.push(line),
                None => return Err(FrontmatterError::OrphanContinuation { line: line_num }),
            }
            continue;
        }

        if line.starts_with('#') {
            continue;
        }

        if let Some(entry) = open.take() {
            entries.push(close(entry)?);
        }

        let (key, rest) = split_key_value(line).ok_or(FrontmatterError::InvalidLine { line: line_num })?;
        if entries.iter().any(|e| e.key == key) {
            return Err(FrontmatterError::DuplicateKey {
                key: key.to_string(),
                line: line_num,
            });
        }

        let rest = rest.trim();
        open = Some(OpenEntry {
            key: key.to_string(),
            line: line_num,
            style: style_of(rest),
            head: rest,
            continuation: Vec::new(),
        });
    }

    if let Some(entry) = open.take() {
        entries.push(close(entry)?);
    }

    Ok(Frontmatter { entries })
}

/// Split a top-level `key: value` line. The key may not contain whitespace
/// and the colon must be followed by a space or end-of-line.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let colon = line.find(':')?;
    let key = line[..colon].trim_end();
    let key = unquote_key(key);
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    let after = &line[colon + 1..];
    if !after.is_empty() && !after.starts_with([' ', '\t']) {
        return None;
    }
    Some((key, after))
}

fn unquote_key(key: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = key.strip_prefix(q).and_then(|k| k.strip_suffix(q)) {
            return inner;
        }
    }
    key
}

fn style_of(rest: &str) -> Style {
    let (indicator, chomp_char) = {
        let mut chars = rest.chars();
        (chars.next(), chars.next())
    };
    let block_header = matches!(indicator, Some('|') | Some('>'))
        && rest.chars().count() <= 2
        && matches!(chomp_char, None | Some('-') | Some('+'));
    if block_header {
        let chomp = match chomp_char {
            Some('-') => Chomp::Strip,
            Some('+') => Chomp::Keep,
            _ => Chomp::Clip,
        };
        return if indicator == Some('|') {
            Style::Literal(chomp)
        } else {
            Style::Folded(chomp)
        };
    }
    if rest.is_empty() {
        Style::Nested
    } else if rest.starts_with(['"', '\'']) {
        Style::Quoted
    } else {
        Style::Plain
    }
}

fn close(entry: OpenEntry<'_>) -> std::result::Result<Entry, FrontmatterError> {
    let style = match entry.style {
        Style::Nested if !starts_collection(&entry.continuation) => Style::Plain,
        style => style,
    };
    let value = match style {
        Style::Plain => {
            let mut lines = vec![strip_inline_comment(entry.head).to_string()];
            lines.extend(entry.continuation.iter().map(|l| l.trim().to_string()));
            fold(&lines).trim().to_string()
        }
        Style::Quoted => {
            let mut joined = entry.head.to_string();
            for l in entry.continuation.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
                joined.push(' ');
                joined.push_str(l);
            }
            unquote(&joined).ok_or(FrontmatterError::InvalidLine { line: entry.line })?
        }
        Style::Folded(chomp) => chomp_value(fold(&dedent(&entry.continuation)), chomp),
        Style::Literal(chomp) => chomp_value(dedent(&entry.continuation).join("\n"), chomp),
        Style::Nested => dedent(&entry.continuation).join("\n").trim_end().to_string(),
    };
    Ok(Entry {
        key: entry.key,
        value,
        line: entry.line,
    })
}

/// An empty inline value opens a mapping or sequence only when the first
/// non-blank line below it is a `- item` or a `key:` line. Anything else is
/// a plain scalar wrapped onto indented lines.
fn starts_collection(continuation: &[&str]) -> bool {
    let Some(first) = continuation.iter().map(|l| l.trim()).find(|l| !l.is_empty()) else {
        return true;
    };
    first == "-" || first.starts_with("- ") || split_key_value(first).is_some()
}

/// Cut a plain scalar at ` #`, YAML's inline comment marker.
fn strip_inline_comment(value: &str) -> &str {
    match value.find(" #") {
        Some(pos) => value[..pos].trim_end(),
        None => value,
    }
}

/// Strip the common leading indentation of the non-blank lines.
fn dedent(lines: &[&str]) -> Vec<String> {
    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                String::new()
            } else {
                l.get(indent..).unwrap_or_else(|| l.trim_start()).to_string()
            }
        })
        .collect()
}

/// Folded style: adjacent lines join with a space, blank lines become `\n`.
fn fold(lines: &[String]) -> String {
    let mut out = String::new();
    let mut at_break = true;
    for line in lines {
        if line.trim().is_empty() {
            out.push('\n');
            at_break = true;
            continue;
        }
        if !at_break {
            out.push(' ');
        }
        out.push_str(line.trim_end());
        at_break = false;
    }
    out
}

fn chomp_value(value: String, chomp: Chomp) -> String {
    let trimmed = value.trim_end_matches('\n');
    match chomp {
        Chomp::Strip => trimmed.to_string(),
        Chomp::Clip if trimmed.is_empty() => String::new(),
        Chomp::Clip => format!("{trimmed}\n"),
        Chomp::Keep => format!("{value}\n"),
    }
}

/// Resolve a quoted scalar up to its closing quote. Only whitespace or a
/// ` #` comment may follow; `None` when the quote is never closed or other
/// text trails it.
fn unquote(value: &str) -> Option<String> {
    let mut chars = value.char_indices();
    let (_, quote) = chars.next()?;
    let mut out = String::with_capacity(value.len());
    let mut end = None;

    while let Some((idx, c)) = chars.next() {
        match (quote, c) {
            ('"', '\\') => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, other)) => out.push(other),
                None => return None,
            },
            ('\'', '\'') if value[idx + 1..].starts_with('\'') => {
                chars.next();
                out.push('\'');
            }
            _ if c == quote => {
                end = Some(idx + c.len_utf8());
                break;
            }
            _ => out.push(c),
        }
    }

    let rest = &value[end?..];
    let trailing = rest.trim_start();
    let comment = trailing.starts_with('#') && rest.len() > trailing.len();
    (trailing.is_empty() || comment).then_some(out)
}

// ---------------------------------------------------------------------------
// SkillDocument
// ---------------------------------------------------------------------------

/// A skill definition file, read and split once per validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDocument {
    pub path: PathBuf,
    pub raw_text: String,
    pub frontmatter: Frontmatter,
    /// Byte offset of the body inside `raw_text`.
    body_offset: usize,
    pub body_line: usize,
    /// Base name of the directory holding the file.
    pub directory_name: String,
}

impl SkillDocument {
    /// Parses `raw_text` read from `path`.
    pub fn parse(
        path: &Path,
        raw_text: String,
        directory_name: &str,
    ) -> std::result::Result<Self, FrontmatterError> {
        let (frontmatter, body_offset, body_line) = {
            let parsed = parse(&raw_text)?;
            let offset = raw_text.len() - parsed.body.len();
            (parsed.frontmatter, offset, parsed.body_line)
        };
        Ok(SkillDocument {
            path: path.to_path_buf(),
            raw_text,
            frontmatter,
            body_offset,
            body_line,
            directory_name: directory_name.to_string(),
        })
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the file cannot be read, and
    /// [`Error::MalformedFrontmatter`] when it cannot be split.
    pub fn load(path: &Path, directory_name: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(path, raw, directory_name)?)
    }

    pub fn body(&self) -> &str {
        &self.raw_text[self.body_offset..]
    }
}
