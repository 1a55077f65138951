//! Line-oriented parser for the Movable Type export format
//!
//! ```text
//! AUTHOR: alice
//! TITLE: Hello
//! DATE: 01/02/2020 03:04:05 PM
//! -----
//! BODY:
//! <p>Hi</p>
//! -----
//! --------
//! ```

use chrono::NaiveDateTime;
use log::debug;

use super::entry::{Comment, Entry};
use crate::error::{MigrateError, Result};

const ENTRY_SEPARATOR: &str = "--------";
const SECTION_SEPARATOR: &str = "-----";

/// 12-hour clock as written by Movable Type, then the 24-hour variant
const DATE_FORMATS: &[&str] = &["%m/%d/%Y %I:%M:%S %p", "%m/%d/%Y %H:%M:%S"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextField {
    Body,
    ExtendedBody,
    Excerpt,
    Keywords,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// `KEY: value` lines, or the header line of the next section
    Meta,
    Text(TextField),
    CommentMeta,
    CommentBody,
    Ping,
}

fn section_header(line: &str) -> Option<Section> {
    match line.trim_end() {
        "BODY:" => Some(Section::Text(TextField::Body)),
        "EXTENDED BODY:" => Some(Section::Text(TextField::ExtendedBody)),
        "EXCERPT:" => Some(Section::Text(TextField::Excerpt)),
        "KEYWORDS:" => Some(Section::Text(TextField::Keywords)),
        "COMMENT:" => Some(Section::CommentMeta),
        "PING:" => Some(Section::Ping),
        _ => None,
    }
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}

fn parse_date(value: &str, line: usize) -> Result<NaiveDateTime> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| MigrateError::Export {
            line,
            message: format!("unrecognized date '{value}'"),
        })
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

/// Split a `TAGS` value: comma separated, double quotes around tags that
/// contain spaces or commas.
fn parse_tags(value: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in value.chars() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                let tag = current.trim();
                if !tag.is_empty() {
                    tags.push(tag.to_string());
                }
                current.clear();
            }
            _ => current.push(c),
        }
    }
    let tag = current.trim();
    if !tag.is_empty() {
        tags.push(tag.to_string());
    }
    tags
}

struct Parser {
    entries: Vec<Entry>,
    entry: Entry,
    comment: Comment,
    section: Section,
    lines: Vec<String>,
    /// Anything other than separators and blank lines seen in this entry
    has_content: bool,
}

impl Parser {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            entry: Entry::default(),
            comment: Comment::default(),
            section: Section::Meta,
            lines: Vec::new(),
            has_content: false,
        }
    }

    fn feed(&mut self, line: &str, line_no: usize) -> Result<()> {
        if line == ENTRY_SEPARATOR {
            self.close_section();
            self.close_entry();
            return Ok(());
        }
        if line == SECTION_SEPARATOR {
            self.close_section();
            return Ok(());
        }

        match self.section {
            Section::Meta => self.feed_meta(line, line_no)?,
            Section::Text(_) | Section::CommentBody => self.lines.push(line.to_string()),
            Section::CommentMeta => self.feed_comment_meta(line, line_no)?,
            Section::Ping => {}
        }
        Ok(())
    }

    fn feed_meta(&mut self, line: &str, line_no: usize) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }
        self.has_content = true;

        if let Some(section) = section_header(line) {
            self.section = section;
            return Ok(());
        }

        let (key, value) = split_key_value(line).ok_or_else(|| MigrateError::Export {
            line: line_no,
            message: format!("expected 'KEY: value', found '{line}'"),
        })?;

        let entry = &mut self.entry;
        match key {
            "AUTHOR" => entry.author = value.to_string(),
            "TITLE" => entry.title = value.to_string(),
            "BASENAME" => entry.basename = value.to_string(),
            "STATUS" => entry.status = value.to_string(),
            "ALLOW COMMENTS" => entry.allow_comments = parse_flag(value),
            "ALLOW PINGS" => entry.allow_pings = parse_flag(value),
            "CONVERT BREAKS" => entry.convert_breaks = Some(value.to_string()),
            "PRIMARY CATEGORY" => entry.set_primary_category(value),
            "CATEGORY" => entry.add_category(value),
            "DATE" => entry.date = Some(parse_date(value, line_no)?),
            "TAGS" => entry.tags = parse_tags(value),
            "IMAGE" => entry.image = Some(value.to_string()),
            other => debug!("Ignoring export key '{other}' at line {line_no}"),
        }
        Ok(())
    }

    fn feed_comment_meta(&mut self, line: &str, line_no: usize) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }

        let comment = &mut self.comment;
        match split_key_value(line) {
            Some(("AUTHOR", value)) => comment.author = value.to_string(),
            Some(("EMAIL", value)) => comment.email = value.to_string(),
            Some(("URL", value)) => comment.url = value.to_string(),
            Some(("IP", value)) => comment.ip = value.to_string(),
            Some(("DATE", value)) => comment.date = Some(parse_date(value, line_no)?),
            _ => {
                self.section = Section::CommentBody;
                self.lines.push(line.to_string());
            }
        }
        Ok(())
    }

    fn close_section(&mut self) {
        let text = std::mem::take(&mut self.lines).join("\n");
        match self.section {
            Section::Text(TextField::Body) => self.entry.body = text,
            Section::Text(TextField::ExtendedBody) => self.entry.extended_body = text,
            Section::Text(TextField::Excerpt) => self.entry.excerpt = text,
            Section::Text(TextField::Keywords) => self.entry.keywords = text,
            Section::CommentMeta | Section::CommentBody => {
                let mut comment = std::mem::take(&mut self.comment);
                comment.body = text;
                self.entry.comments.push(comment);
            }
            Section::Meta | Section::Ping => {}
        }
        self.section = Section::Meta;
    }

    fn close_entry(&mut self) {
        let entry = std::mem::take(&mut self.entry);
        if self.has_content {
            self.entries.push(entry);
        }
        self.has_content = false;
    }

    fn finish(mut self) -> Vec<Entry> {
        // Tolerate a missing final entry separator
        self.close_section();
        self.close_entry();
        self.entries
    }
}

/// Parse the full text of a Movable Type export.
///
/// # Errors
///
/// Returns `MigrateError::Export` with the offending line number when a
/// metadata line is malformed or a date cannot be parsed.
pub fn parse_export(input: &str) -> Result<Vec<Entry>> {
    let mut parser = Parser::new();
    for (index, line) in input.lines().enumerate() {
        parser.feed(line, index + 1)?;
    }
    let entries = parser.finish();
    debug!("Parsed {} export entries", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = "AUTHOR: alice
TITLE: First / Post
BASENAME: 2020/01/02/first
STATUS: Publish
ALLOW COMMENTS: 1
CONVERT BREAKS: 0
PRIMARY CATEGORY: Diary
CATEGORY: Tech
CATEGORY: Diary
DATE: 01/02/2020 03:04:05 PM
TAGS: rust,\"web dev\",go
-----
BODY:
<p>Hello</p>
<p>World</p>
-----
EXTENDED BODY:
<p>More</p>
-----
EXCERPT:
Short
-----
COMMENT:
AUTHOR: bob
EMAIL: bob@example.com
DATE: 01/03/2020 10:00:00 AM
Nice post!
Really.
-----
--------
AUTHOR: alice
TITLE: Second
STATUS: Draft
DATE: 12/31/2021 23:59:59
-----
BODY:
<p>Two</p>
-----
--------
";

    #[test]
    fn test_parses_entries() {
        let entries = parse_export(SAMPLE).unwrap();
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.author, "alice");
        assert_eq!(first.title, "First / Post");
        assert_eq!(first.slug(), "20200102first");
        assert_eq!(first.status, "Publish");
        assert_eq!(first.allow_comments, Some(true));
        assert_eq!(first.categories, vec!["Diary", "Tech"]);
        assert_eq!(first.tags, vec!["rust", "web dev", "go"]);
        assert_eq!(
            first.date,
            NaiveDate::from_ymd_opt(2020, 1, 2).and_then(|d| d.and_hms_opt(15, 4, 5))
        );
        assert_eq!(first.body, "<p>Hello</p>\n<p>World</p>");
        assert_eq!(first.extended_body, "<p>More</p>");
        assert_eq!(first.full_body(), "<p>Hello</p>\n<p>World</p><p>More</p>");
        assert_eq!(first.excerpt, "Short");

        assert_eq!(first.comments.len(), 1);
        assert_eq!(first.comments[0].author, "bob");
        assert_eq!(first.comments[0].body, "Nice post!\nReally.");

        let second = &entries[1];
        assert_eq!(second.status, "Draft");
        assert_eq!(
            second.date,
            NaiveDate::from_ymd_opt(2021, 12, 31).and_then(|d| d.and_hms_opt(23, 59, 59))
        );
    }

    #[test]
    fn test_crlf_and_missing_final_separator() {
        let input = "TITLE: Only\r\nDATE: 05/06/2019 08:00:00 AM\r\n-----\r\nBODY:\r\n<p>x</p>\r\n-----\r\n";
        let entries = parse_export(input).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Only");
        assert_eq!(entries[0].body, "<p>x</p>");
    }

    #[test]
    fn test_bad_date_reports_line() {
        let input = "TITLE: x\nDATE: yesterday\n-----\n--------\n";
        let err = parse_export(input).unwrap_err();
        assert!(matches!(err, MigrateError::Export { line: 2, .. }));
    }

    #[test]
    fn test_malformed_meta_line() {
        let input = "TITLE: x\nthis is not metadata\n--------\n";
        let err = parse_export(input).unwrap_err();
        assert!(matches!(err, MigrateError::Export { line: 2, .. }));
    }

    #[test]
    fn test_pings_are_skipped() {
        let input = "TITLE: x\n-----\nPING:\nTITLE: other blog\nURL: https://example.com\n-----\n--------\n";
        let entries = parse_export(input).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "x");
        assert!(entries[0].comments.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_export("").unwrap().is_empty());
        assert!(parse_export("\n--------\n").unwrap().is_empty());
    }
}
