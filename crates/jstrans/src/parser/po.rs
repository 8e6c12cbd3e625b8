//! GNU gettext `.po` reader.
//!
//! Reads the subset of the PO format a runtime catalog needs: `msgid`,
//! `msgid_plural`, `msgstr`, `msgstr[N]`, `msgctxt`, multi-line string
//! continuation, C escapes, and `#, fuzzy` flags. Comments and obsolete
//! (`#~`) entries are ignored.

use std::mem;

use tracing::{debug, warn};
use winnow::ascii::{digit1, space0, space1};
use winnow::combinator::{alt, delimited, eof, preceded, repeat};
use winnow::prelude::*;
use winnow::token::{none_of, one_of, take_while};

use super::error::{PoError, calculate_position};
use crate::types::{Catalog, MessageKey, RawCatalog, Translation};

/// Read a `.po` file into a [`Catalog`].
///
/// Untranslated messages, fuzzy messages (except the header), and messages
/// with a `msgctxt` are left out of the catalog.
///
/// # Errors
///
/// Returns [`PoError`] for syntax errors, `msgstr[N]` indices that skip or
/// repeat, and duplicate messages.
///
/// # Example
///
/// ```
/// use jstrans::parser::parse_po;
/// use jstrans::{MessageKey, Translation};
///
/// let catalog = parse_po(r#"
/// msgid ""
/// msgstr "Plural-Forms: nplurals=2; plural=(n > 1);\n"
///
/// msgid "Hello"
/// msgstr "Bonjour"
/// "#).unwrap();
///
/// assert!(catalog.metadata.starts_with("Plural-Forms"));
/// assert_eq!(
///     catalog.raw.get(&MessageKey::singular("Hello")),
///     Some(&Translation::Single("Bonjour".into()))
/// );
/// ```
pub fn parse_po(input: &str) -> Result<Catalog, PoError> {
    let mut reader = Reader::default();
    for (index, line) in input.lines().enumerate() {
        reader.line(index + 1, line)?;
    }
    reader.flush()?;
    debug!(
        messages = reader.catalog.raw.len(),
        "read PO catalog"
    );
    Ok(reader.catalog)
}

/// Which field a continuation string extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Msgctxt,
    Msgid,
    MsgidPlural,
    Msgstr(usize),
}

/// A keyword line: `msgid "..."`, `msgstr[1] "..."`, and so on.
struct Keyword {
    field: Field,
    text: String,
}

#[derive(Debug, Default)]
struct Entry {
    line: usize,
    fuzzy: bool,
    msgctxt: Option<String>,
    msgid: Option<String>,
    msgid_plural: Option<String>,
    msgstr: Vec<String>,
    last: Option<Field>,
}

impl Entry {
    fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    fn has_msgstr(&self) -> bool {
        !self.msgstr.is_empty()
    }

    fn has_field(&self, field: Field) -> bool {
        match field {
            Field::Msgctxt => self.msgctxt.is_some(),
            Field::Msgid => self.msgid.is_some(),
            Field::MsgidPlural => self.msgid_plural.is_some(),
            Field::Msgstr(index) => index < self.msgstr.len(),
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Msgctxt => self.msgctxt.get_or_insert_with(String::new),
            Field::Msgid => self.msgid.get_or_insert_with(String::new),
            Field::MsgidPlural => self.msgid_plural.get_or_insert_with(String::new),
            Field::Msgstr(index) => &mut self.msgstr[index],
        }
    }
}

#[derive(Default)]
struct Reader {
    catalog: Catalog,
    entry: Entry,
    pending_fuzzy: bool,
}

impl Reader {
    fn line(&mut self, number: usize, line: &str) -> Result<(), PoError> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if self.entry.has_msgstr() {
                self.flush()?;
            }
            return Ok(());
        }

        if let Some(comment) = trimmed.strip_prefix('#') {
            if self.entry.has_msgstr() {
                self.flush()?;
            }
            if let Some(flags) = comment.strip_prefix(',') {
                if flags.split(',').any(|flag| flag.trim() == "fuzzy") {
                    self.pending_fuzzy = true;
                }
            }
            return Ok(());
        }

        if trimmed.starts_with('"') {
            let text = parse_line(line, number, continuation)?;
            let Some(field) = self.entry.last else {
                return Err(syntax(number, 1, "string continuation without a keyword"));
            };
            self.entry.field_mut(field).push_str(&text);
            return Ok(());
        }

        let keyword = parse_line(line, number, keyword_line)?;
        self.keyword(number, keyword)
    }

    fn keyword(&mut self, number: usize, keyword: Keyword) -> Result<(), PoError> {
        let starts_entry = matches!(keyword.field, Field::Msgctxt | Field::Msgid);
        if starts_entry && self.entry.has_msgstr() {
            self.flush()?;
        }
        if self.entry.is_empty() {
            self.entry.line = number;
            self.entry.fuzzy = mem::take(&mut self.pending_fuzzy);
        }

        match keyword.field {
            Field::Msgctxt | Field::Msgid | Field::MsgidPlural => {
                if self.entry.has_msgstr() {
                    return Err(syntax(number, 1, "msgid after msgstr"));
                }
                if self.entry.has_field(keyword.field) {
                    return Err(syntax(number, 1, "keyword repeated within one entry"));
                }
            }
            Field::Msgstr(index) => {
                if self.entry.msgid.is_none() {
                    return Err(syntax(number, 1, "msgstr without msgid"));
                }
                let expected = self.entry.msgstr.len();
                if index != expected {
                    return Err(PoError::IndexOutOfOrder {
                        line: number,
                        index,
                        expected,
                    });
                }
                self.entry.msgstr.push(String::new());
            }
        }

        self.entry.field_mut(keyword.field).push_str(&keyword.text);
        self.entry.last = Some(keyword.field);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), PoError> {
        let entry = mem::take(&mut self.entry);
        if entry.is_empty() {
            return Ok(());
        }
        let Some(msgid) = entry.msgid else {
            return Err(syntax(entry.line, 1, "entry without msgid"));
        };
        if entry.msgstr.is_empty() {
            return Err(syntax(entry.line, 1, format!("no msgstr for '{msgid}'")));
        }

        if msgid.is_empty() && entry.msgctxt.is_none() {
            self.catalog.metadata = entry.msgstr.concat();
            return Ok(());
        }
        if entry.fuzzy {
            debug!(msgid = %msgid, line = entry.line, "skipping fuzzy message");
            return Ok(());
        }
        if let Some(context) = entry.msgctxt {
            warn!(
                msgid = %msgid,
                context = %context,
                line = entry.line,
                "skipping message with context"
            );
            return Ok(());
        }
        if entry.msgstr.iter().all(String::is_empty) {
            debug!(msgid = %msgid, line = entry.line, "skipping untranslated message");
            return Ok(());
        }
        if entry.msgstr.iter().any(String::is_empty) {
            debug!(msgid = %msgid, line = entry.line, "skipping partially translated message");
            return Ok(());
        }

        let (key, translation) = match entry.msgid_plural {
            Some(plural) => (
                MessageKey::pair(msgid, plural),
                Translation::Forms(entry.msgstr),
            ),
            None => {
                let mut msgstr = entry.msgstr;
                if msgstr.len() > 1 {
                    return Err(syntax(entry.line, 1, "msgstr[N] without msgid_plural"));
                }
                (MessageKey::Singular(msgid), Translation::Single(msgstr.remove(0)))
            }
        };

        insert_unique(&mut self.catalog.raw, entry.line, key, translation)
    }
}

fn insert_unique(
    raw: &mut RawCatalog,
    line: usize,
    key: MessageKey,
    translation: Translation,
) -> Result<(), PoError> {
    if raw.get(&key).is_some() {
        return Err(PoError::DuplicateMessage {
            line,
            msgid: key.singular_text().to_string(),
        });
    }
    raw.insert(key, translation);
    Ok(())
}

fn syntax(line: usize, column: usize, message: impl Into<String>) -> PoError {
    PoError::Syntax {
        line,
        column,
        message: message.into(),
    }
}

/// Run a line parser over a whole line, converting failures to [`PoError`].
fn parse_line<O>(
    line: &str,
    number: usize,
    mut parser: impl FnMut(&mut &str) -> ModalResult<O>,
) -> Result<O, PoError> {
    let mut remaining = line;
    match parser(&mut remaining) {
        Ok(output) => Ok(output),
        Err(e) => {
            let (_, column) = calculate_position(line, remaining);
            Err(syntax(number, column, format!("parse error: {e}")))
        }
    }
}

/// `keyword string`
fn keyword_line(input: &mut &str) -> ModalResult<Keyword> {
    delimited(space0, (field, preceded(space1, quoted)), (space0, eof))
        .map(|(field, text)| Keyword { field, text })
        .parse_next(input)
}

/// A line holding only a string.
fn continuation(input: &mut &str) -> ModalResult<String> {
    delimited(space0, quoted, (space0, eof)).parse_next(input)
}

fn field(input: &mut &str) -> ModalResult<Field> {
    alt((
        "msgctxt".value(Field::Msgctxt),
        "msgid_plural".value(Field::MsgidPlural),
        "msgid".value(Field::Msgid),
        delimited("msgstr[", digit1.try_map(|d: &str| d.parse::<usize>()), ']')
            .map(Field::Msgstr),
        "msgstr".value(Field::Msgstr(0)),
    ))
    .parse_next(input)
}

/// A double-quoted string with C escapes.
fn quoted(input: &mut &str) -> ModalResult<String> {
    delimited('"', repeat(0.., alt((escape, none_of(['"', '\\'])))), '"')
        .map(|chars: Vec<char>| chars.into_iter().collect())
        .parse_next(input)
}

/// `\n`, `\t`, `\"`, octal `\NNN`, hex `\xHH`, ...
fn escape(input: &mut &str) -> ModalResult<char> {
    preceded(
        '\\',
        alt((
            preceded('x', take_while(1..=2, |c: char| c.is_ascii_hexdigit()))
                .try_map(|hex: &str| u8::from_str_radix(hex, 16).map(char::from)),
            take_while(1..=3, |c: char| c.is_digit(8))
                .try_map(|oct: &str| u8::from_str_radix(oct, 8).map(char::from)),
            one_of(['n', 't', 'r', 'a', 'b', 'f', 'v', '\\', '"', '\'', '?']).map(|c| match c {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    'a' => '\u{07}',
                    'b' => '\u{08}',
                    'f' => '\u{0c}',
                    'v' => '\u{0b}',
                    other => other,
                }),
        )),
    )
    .parse_next(input)
}
