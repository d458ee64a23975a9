//! Enum block extraction.
//!
//! Input is free-form text containing any number of blocks of the form
//!
//! ```text
//! enum TimeUnit {
//!   // TIME_UNIT_UNSPECIFIED.
//!   TIME_UNIT_UNSPECIFIED = 0;
//!   // TIME_UNIT_SECOND.
//!   TIME_UNIT_SECOND = 1;
//! }
//! ```
//!
//! Text outside the blocks is ignored. Each block body is scanned line by
//! line with a two-state machine: comment lines accumulate into a pending
//! doc buffer, and the next value line takes the buffer.

use crate::descriptor::{EnumDescriptor, ValueDescriptor};
use crate::error::ParseError;

/// Single-line comment marker inside enum bodies.
pub const COMMENT_MARKER: &str = "//";

const ENUM_KEYWORD: &str = "enum";

/// Parses every enum block in `input`.
///
/// # Arguments
/// * `input` - Text containing zero or more `enum Title { ... }` blocks
///
/// # Returns
/// Enum descriptors in input order, values sorted by ordinal.
///
/// # Errors
/// Returns `ParseError` naming the enum and line of the first malformed
/// value line, or of an enum block that is never closed.
pub fn parse_enums(input: &str) -> Result<Vec<EnumDescriptor>, ParseError> {
    let mut enums = Vec::new();

    for block in find_blocks(input)? {
        let mut descriptor = EnumDescriptor::new(block.title, parse_body(&block)?);
        descriptor.sort_values();
        tracing::debug!(
            title = %descriptor.title,
            values = descriptor.values.len(),
            "extracted enum"
        );
        enums.push(descriptor);
    }

    Ok(enums)
}

/// An `enum Title { body }` block located in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawBlock<'a> {
    title: &'a str,
    body: &'a str,
    /// Line number of the opening brace; the body's first line.
    first_line: usize,
}

/// Line classifier state.
#[derive(Debug)]
enum LineState {
    ExpectingValue,
    AccumulatingComment(Vec<String>),
}

impl LineState {
    fn push_comment(self, text: String) -> Self {
        match self {
            Self::ExpectingValue => Self::AccumulatingComment(vec![text]),
            Self::AccumulatingComment(mut lines) => {
                lines.push(text);
                Self::AccumulatingComment(lines)
            }
        }
    }

    fn take_doc(&mut self) -> Vec<String> {
        match std::mem::replace(self, Self::ExpectingValue) {
            Self::ExpectingValue => Vec::new(),
            Self::AccumulatingComment(lines) => lines,
        }
    }
}

fn find_blocks(input: &str) -> Result<Vec<RawBlock<'_>>, ParseError> {
    let bytes = input.as_bytes();
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while let Some(found) = input[cursor..].find(ENUM_KEYWORD) {
        let start = cursor + found;
        cursor = start + ENUM_KEYWORD.len();

        if start > 0 && is_ident_byte(bytes[start - 1]) {
            continue;
        }

        let rest = &input[cursor..];
        let after_space = rest.trim_start();
        if after_space.len() == rest.len() {
            continue;
        }

        let title_len = after_space.bytes().take_while(|b| is_ident_byte(*b)).count();
        if title_len == 0 {
            continue;
        }
        let title = &after_space[..title_len];

        let Some(body_and_rest) = after_space[title_len..].trim_start().strip_prefix('{') else {
            continue;
        };
        let body_start = input.len() - body_and_rest.len();

        let Some(close) = body_and_rest.find('}') else {
            return Err(ParseError::UnterminatedEnum {
                title: title.to_string(),
                line: line_number(input, start),
            });
        };

        blocks.push(RawBlock {
            title,
            body: &body_and_rest[..close],
            first_line: line_number(input, body_start),
        });
        cursor = body_start + close + 1;
    }

    Ok(blocks)
}

fn parse_body(block: &RawBlock<'_>) -> Result<Vec<ValueDescriptor>, ParseError> {
    let mut state = LineState::ExpectingValue;
    let mut values = Vec::new();

    for (offset, raw) in block.body.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix(COMMENT_MARKER) {
            let text = comment.trim_start_matches('/');
            let text = text.strip_prefix(' ').unwrap_or(text);
            state = state.push_comment(text.trim_end().to_string());
            continue;
        }

        let (original, ordinal) = parse_value_line(block.title, block.first_line + offset, line)?;
        values.push(ValueDescriptor::new(original, ordinal, state.take_doc()));
    }

    Ok(values)
}

/// Parses `IDENTIFIER = INTEGER` with optional whitespace and terminator.
fn parse_value_line(title: &str, line_no: usize, raw: &str) -> Result<(String, i32), ParseError> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ';')
        .collect();

    let mut parts = compact.split('=');
    let (Some(name), Some(number), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ParseError::malformed(title, line_no, raw));
    };

    if !is_identifier(name) {
        return Err(ParseError::malformed(title, line_no, raw));
    }

    let ordinal = number.parse::<i32>().map_err(|_| ParseError::InvalidOrdinal {
        title: title.to_string(),
        line: line_no,
        raw: raw.to_string(),
        value: number.to_string(),
    })?;

    Ok((name.to_string(), ordinal))
}

fn is_identifier(s: &str) -> bool {
    s.bytes().next().is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
        && s.bytes().all(is_ident_byte)
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn line_number(input: &str, offset: usize) -> usize {
    input[..offset].matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIME_UNIT: &str = r#"syntax = "proto3";

package delivery_settings_entities;

enum TimeUnit {
  // TIME_UNIT_UNSPECIFIED.
  TIME_UNIT_UNSPECIFIED = 0;
  // TIME_UNIT_SECOND.
  TIME_UNIT_SECOND = 1;
  // TIME_UNIT_MINUTE.
  TIME_UNIT_MINUTE = 2;
}
"#;

    #[test]
    fn test_parse_single_enum() {
        let enums = parse_enums(TIME_UNIT).expect("Failed to parse");
        assert_eq!(enums.len(), 1);

        let time_unit = &enums[0];
        assert_eq!(time_unit.title, "TimeUnit");
        let locals: Vec<&str> = time_unit.values.iter().map(|v| v.local.as_str()).collect();
        assert_eq!(
            locals,
            vec!["TimeUnitUnspecified", "TimeUnitSecond", "TimeUnitMinute"]
        );
        assert_eq!(time_unit.values[1].original, "TIME_UNIT_SECOND");
        assert_eq!(time_unit.values[1].ordinal, 1);
        assert_eq!(time_unit.values[1].doc, vec!["TIME_UNIT_SECOND."]);
    }

    #[test]
    fn test_multi_line_doc_comment() {
        let input = "enum RetentionGroupEvent {
    RETENTION_GROUP_EVENT_UNSPECIFIED = 0;
    // RETENTION_GROUP_EVENT_INFLOW represents the retention for the event
    // when the end user has the first interaction with our chatbot.
    RETENTION_GROUP_EVENT_INFLOW = 1;
}";
        let enums = parse_enums(input).expect("Failed to parse");
        let values = &enums[0].values;
        assert!(values[0].doc.is_empty());
        assert_eq!(values[1].doc.len(), 2);
        assert!(values[1].doc[1].starts_with("when the end user"));
    }

    #[test]
    fn test_blank_lines_keep_pending_comment() {
        let input = "enum Flag {\n  // doc\n\n  FLAG_UNSPECIFIED = 0;\n}";
        let enums = parse_enums(input).expect("Failed to parse");
        assert_eq!(enums[0].values[0].doc, vec!["doc"]);
    }

    #[test]
    fn test_values_sorted_by_ordinal() {
        let input = "enum Side { SIDE_SELL = 2;\n SIDE_UNSPECIFIED = 0;\n SIDE_BUY = 1; }";
        let enums = parse_enums(input).expect("Failed to parse");
        let ordinals: Vec<i32> = enums[0].values.iter().map(|v| v.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
    }

    #[test]
    fn test_multiple_blocks_keep_input_order() {
        let input = "enum B { B_UNSPECIFIED = 0; }\nmessage M { int32 x = 1; }\nenum A { A_UNSPECIFIED = 0; }";
        let enums = parse_enums(input).expect("Failed to parse");
        let titles: Vec<&str> = enums.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn test_missing_terminator_and_spacing() {
        let input = "enum Mode {\n  MODE_UNSPECIFIED=0\n  MODE_FAST =   1 ;\n}";
        let enums = parse_enums(input).expect("Failed to parse");
        assert_eq!(enums[0].values.len(), 2);
        assert_eq!(enums[0].values[1].original, "MODE_FAST");
    }

    #[test]
    fn test_malformed_value_line() {
        let input = "enum Mode {\n  MODE_UNSPECIFIED = 0;\n  MODE_FAST;\n}";
        let err = parse_enums(input).unwrap_err();
        assert_eq!(err, ParseError::malformed("Mode", 3, "MODE_FAST;"));
    }

    #[test]
    fn test_too_many_parts() {
        let input = "enum Mode {\n  MODE_A = 0 = 1;\n}";
        let err = parse_enums(input).unwrap_err();
        assert!(matches!(err, ParseError::MalformedValue { line: 2, .. }));
    }

    #[test]
    fn test_invalid_ordinal() {
        let input = "enum Mode {\n  MODE_UNSPECIFIED = zero;\n}";
        let err = parse_enums(input).unwrap_err();
        match err {
            ParseError::InvalidOrdinal { title, line, value, .. } => {
                assert_eq!(title, "Mode");
                assert_eq!(line, 2);
                assert_eq!(value, "zero");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse_enums("\nenum Mode {\n  MODE_UNSPECIFIED = 0;\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnterminatedEnum {
                title: "Mode".into(),
                line: 2,
            }
        );
    }

    #[test]
    fn test_enum_inside_word_is_ignored() {
        let input = "myenum Fake { nonsense }\nenums { also nonsense }";
        assert!(parse_enums(input).expect("Failed to parse").is_empty());
    }

    #[test]
    fn test_dangling_comment_is_dropped() {
        let input = "enum Mode {\n  MODE_UNSPECIFIED = 0;\n  // trailing\n}";
        let enums = parse_enums(input).expect("Failed to parse");
        assert_eq!(enums[0].values.len(), 1);
    }
}
