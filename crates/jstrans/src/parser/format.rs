//! Format string scanner.
//!
//! Recognizes `%(name)[width]type` directives in a single linear pass.
//! Everything else, including a lone `%`, is literal text. There is no escape
//! for a literal percent sign.

use winnow::ascii::digit1;
use winnow::combinator::{alt, opt, repeat};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use super::ast::{Conversion, Directive, FormatSpec, Segment};
use crate::interpreter::FormatError;

/// Largest accepted directive width.
pub const MAX_FORMAT_WIDTH: usize = 1024;

/// A scanned piece before the type letter is resolved.
enum Piece<'i> {
    Literal(&'i str),
    Directive {
        name: &'i str,
        width: Option<&'i str>,
        letter: char,
    },
}

/// Parse a format string into a [`FormatSpec`].
///
/// # Errors
///
/// Returns [`FormatError::UnknownSpecifier`] when a directive ends in a type
/// letter other than `s`, `d`, or `f`, and [`FormatError::WidthTooLarge`]
/// when its width exceeds [`MAX_FORMAT_WIDTH`].
///
/// # Example
///
/// ```
/// use jstrans::parser::{Conversion, Segment, parse_format};
///
/// let spec = parse_format("%(count)03d files").unwrap();
/// match &spec.segments[0] {
///     Segment::Directive(d) => {
///         assert_eq!(d.name, "count");
///         assert_eq!(d.width, Some(3));
///         assert!(d.zero_pad);
///         assert_eq!(d.kind, Conversion::Integer);
///     }
///     Segment::Literal(_) => panic!("expected directive"),
/// }
/// ```
pub fn parse_format(input: &str) -> Result<FormatSpec, FormatError> {
    let mut remaining = input;
    let pieces: Vec<Piece<'_>> = repeat(0.., piece)
        .parse_next(&mut remaining)
        .unwrap_or_default();

    let mut segments: Vec<Segment> = Vec::with_capacity(pieces.len());
    for piece in pieces {
        match piece {
            Piece::Literal(text) => {
                if let Some(Segment::Literal(prev)) = segments.last_mut() {
                    prev.push_str(text);
                } else {
                    segments.push(Segment::Literal(text.to_string()));
                }
            }
            Piece::Directive {
                name,
                width,
                letter,
            } => {
                let kind = Conversion::from_letter(letter)
                    .ok_or(FormatError::UnknownSpecifier { letter })?;
                segments.push(Segment::Directive(Directive {
                    name: name.to_string(),
                    width: width.map(|w| parse_width(name, w)).transpose()?,
                    zero_pad: width.is_some_and(|w| w.starts_with('0')),
                    kind,
                }));
            }
        }
    }

    // The scanner accepts any character, so nothing can be left over.
    if !remaining.is_empty() {
        segments.push(Segment::Literal(remaining.to_string()));
    }

    Ok(FormatSpec { segments })
}

/// Digits of a directive width, bounded by [`MAX_FORMAT_WIDTH`].
fn parse_width(name: &str, digits: &str) -> Result<usize, FormatError> {
    digits
        .parse::<usize>()
        .ok()
        .filter(|&width| width <= MAX_FORMAT_WIDTH)
        .ok_or_else(|| FormatError::WidthTooLarge {
            name: name.to_string(),
            width: digits.to_string(),
            limit: MAX_FORMAT_WIDTH,
        })
}

/// A directive, a run of text without `%`, or a lone `%`.
fn piece<'i>(input: &mut &'i str) -> ModalResult<Piece<'i>> {
    alt((
        directive,
        take_while(1.., |c: char| c != '%').map(Piece::Literal),
        any.take().map(Piece::Literal),
    ))
    .parse_next(input)
}

/// `%(` identifier `)` digits? lowercase-letter
fn directive<'i>(input: &mut &'i str) -> ModalResult<Piece<'i>> {
    ("%(", identifier, ')', opt(digit1), one_of(|c: char| c.is_ascii_lowercase()))
        .map(|(_, name, _, width, letter)| Piece::Directive {
            name,
            width,
            letter,
        })
        .parse_next(input)
}

/// An ASCII letter followed by letters, digits, or underscores.
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}
