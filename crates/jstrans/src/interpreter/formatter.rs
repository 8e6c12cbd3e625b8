//! Directive substitution for `%(name)[width]kind` format strings.

use std::collections::HashMap;
use std::iter;

use crate::interpreter::error::compute_suggestions;
use crate::interpreter::number::{number_to_string, to_int32};
use crate::interpreter::FormatError;
use crate::parser::{Conversion, Directive, FormatSpec, Segment, parse_format};
use crate::types::Value;

/// Parse `template` and substitute its directives from `bindings`.
///
/// # Errors
///
/// - [`FormatError::UnknownSpecifier`] if a directive's type letter is not
///   `s`, `d`, or `f`.
/// - [`FormatError::WidthTooLarge`] if a directive's width exceeds
///   [`MAX_FORMAT_WIDTH`](crate::parser::MAX_FORMAT_WIDTH).
/// - [`FormatError::MissingVariable`] if a directive names a variable absent
///   from `bindings`.
///
/// # Example
///
/// ```
/// use jstrans::{format, params};
///
/// assert_eq!(format("%(name)s", &params! { "name" => "world" }).unwrap(), "world");
/// assert_eq!(format("%(count)03d", &params! { "count" => 5 }).unwrap(), "005");
/// ```
pub fn format(template: &str, bindings: &HashMap<String, Value>) -> Result<String, FormatError> {
    render(&parse_format(template)?, bindings)
}

/// Substitute the directives of an already-parsed format string.
pub fn render(spec: &FormatSpec, bindings: &HashMap<String, Value>) -> Result<String, FormatError> {
    let mut output = String::new();
    for segment in &spec.segments {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Directive(directive) => {
                let value = bindings.get(&directive.name).ok_or_else(|| {
                    FormatError::MissingVariable {
                        name: directive.name.clone(),
                        suggestions: compute_suggestions(
                            &directive.name,
                            bindings.keys().map(String::as_str),
                        ),
                    }
                })?;
                render_directive(directive, value, &mut output);
            }
        }
    }
    Ok(output)
}

fn render_directive(directive: &Directive, value: &Value, output: &mut String) {
    let rendered = match directive.kind {
        Conversion::String => value.to_string(),
        Conversion::Integer => to_int32(value.to_number()).to_string(),
        Conversion::Float => number_to_string(value.to_number()),
    };

    // Widths count UTF-16 code units, as `String.prototype.length` does.
    let length = rendered.encode_utf16().count();
    if let Some(width) = directive.width.filter(|&width| width > length) {
        let pad = if directive.zero_pad && directive.kind.is_numeric() {
            '0'
        } else {
            ' '
        };
        output.extend(iter::repeat_n(pad, width - length));
    }
    output.push_str(&rendered);
}
