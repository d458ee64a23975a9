//! Identifier casing.
//!
//! Casing is a pure function of the input text and a [`Casing`] strategy.
//! Words are split on `_`, `-`, whitespace and case boundaries, so both
//! `TIME_UNIT_SECOND` and `timeUnitSecond` yield `time`, `unit`, `second`.

/// Identifier casing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Casing {
    /// `TimeUnitSecond`
    Pascal,
    /// `time_unit_second`
    Snake,
    /// `TIME_UNIT_SECOND`
    ScreamingSnake,
    /// Input returned unchanged.
    Verbatim,
}

impl Casing {
    /// Applies this casing to an identifier.
    #[must_use]
    pub fn apply(self, ident: &str) -> String {
        match self {
            Self::Pascal => split_words(ident).iter().map(|w| title_word(w)).collect(),
            Self::Snake => join_words(ident, str::to_lowercase),
            Self::ScreamingSnake => join_words(ident, str::to_uppercase),
            Self::Verbatim => ident.to_string(),
        }
    }
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    Casing::Pascal.apply(s)
}

/// Converts a string to snake_case.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    Casing::Snake.apply(s)
}

/// Strips the enum-title prefix from a wire value name.
///
/// `TIME_UNIT_SECOND` in enum `TimeUnit` becomes `SECOND`. The name is
/// returned unchanged when it does not carry the prefix or when stripping
/// would leave nothing usable as an identifier.
#[must_use]
pub fn strip_enum_prefix<'a>(title: &str, value: &'a str) -> &'a str {
    let prefix = format!("{}_", Casing::ScreamingSnake.apply(title));
    match value.strip_prefix(prefix.as_str()) {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_alphabetic()) => rest,
        _ => value,
    }
}

/// Splits an identifier into words.
#[must_use]
pub fn split_words(ident: &str) -> Vec<String> {
    let chars: Vec<char> = ident.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // `HTTPServer` splits as `HTTP`, `Server`
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn join_words(ident: &str, convert: fn(&str) -> String) -> String {
    split_words(ident)
        .iter()
        .map(|w| convert(w))
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("TIME_UNIT_UNSPECIFIED"), "TimeUnitUnspecified");
        assert_eq!(to_pascal_case("message_header"), "MessageHeader");
        assert_eq!(to_pascal_case("order-type"), "OrderType");
        assert_eq!(to_pascal_case("side"), "Side");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("DeliveryTiming"), "delivery_timing");
        assert_eq!(to_snake_case("clOrdId"), "cl_ord_id");
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case("time_transition"), "time_transition");
    }

    #[test]
    fn test_screaming_snake() {
        assert_eq!(
            Casing::ScreamingSnake.apply("RetentionGroupEvent"),
            "RETENTION_GROUP_EVENT"
        );
    }

    #[test]
    fn test_verbatim_is_identity() {
        assert_eq!(Casing::Verbatim.apply("TIME_UNIT_SECOND"), "TIME_UNIT_SECOND");
    }

    #[test]
    fn test_digits_stay_in_word() {
        assert_eq!(split_words("V2_API"), vec!["V2", "API"]);
        assert_eq!(to_pascal_case("LEVEL_10"), "Level10");
    }

    #[test]
    fn test_strip_enum_prefix() {
        assert_eq!(strip_enum_prefix("TimeUnit", "TIME_UNIT_SECOND"), "SECOND");
        assert_eq!(strip_enum_prefix("TimeUnit", "SECOND"), "SECOND");
        // Stripping would leave a leading digit.
        assert_eq!(strip_enum_prefix("Level", "LEVEL_1"), "LEVEL_1");
    }

    #[test]
    fn test_empty_input() {
        assert!(split_words("").is_empty());
        assert_eq!(to_pascal_case("__"), "");
    }
}
