use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Best-effort reading of a free-text serving size such as `"15 g"`.
///
/// Advisory only: the source text comes from a third party and the heuristic
/// is not guaranteed to be right for every input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServingSize {
    pub size: Option<f64>,
    pub unit: Option<String>,
}

lazy_static! {
    static ref NUMBER_RE: Regex = Regex::new(r"\d+(?:[.,]\d+)?").unwrap();
    static ref LETTERS_RE: Regex = Regex::new(r"\p{L}+").unwrap();
    static ref PARENS_RE: Regex = Regex::new(r"\([^)]*\)").unwrap();
}

/// First number (comma accepted as decimal mark) and last letter run.
///
/// Parenthesized segments are annotations: `"1 cup (240ml)"` reads as one
/// cup. Only when the letters all sit inside parentheses is the last run of
/// the whole string used. Never fails; unreadable input gives empty fields.
pub fn parse_serving_size(raw: Option<&str>) -> ServingSize {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return ServingSize::default();
    };

    let size = NUMBER_RE
        .find(raw)
        .and_then(|m| m.as_str().replace(',', ".").parse::<f64>().ok());

    let outside = PARENS_RE.replace_all(raw, " ");
    let unit = LETTERS_RE
        .find_iter(&outside)
        .last()
        .or_else(|| LETTERS_RE.find_iter(raw).last())
        .map(|m| m.as_str().to_string());

    ServingSize { size, unit }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(size: Option<f64>, unit: Option<&str>) -> ServingSize {
        ServingSize {
            size,
            unit: unit.map(str::to_string),
        }
    }

    #[test]
    fn plain_grams() {
        assert_eq!(parse_serving_size(Some("15 g")), parsed(Some(15.0), Some("g")));
    }

    #[test]
    fn parenthesized_metric_is_an_annotation() {
        assert_eq!(
            parse_serving_size(Some("1 cup (240ml)")),
            parsed(Some(1.0), Some("cup"))
        );
    }

    #[test]
    fn letters_only_inside_parentheses() {
        assert_eq!(
            parse_serving_size(Some("(240ml)")),
            parsed(Some(240.0), Some("ml"))
        );
    }

    #[test]
    fn comma_decimal_separator() {
        assert_eq!(parse_serving_size(Some("2,5 dl")), parsed(Some(2.5), Some("dl")));
    }

    #[test]
    fn missing_or_blank_input() {
        assert_eq!(parse_serving_size(None), ServingSize::default());
        assert_eq!(parse_serving_size(Some("")), ServingSize::default());
        assert_eq!(parse_serving_size(Some("   ")), ServingSize::default());
    }

    #[test]
    fn partial_matches() {
        assert_eq!(parse_serving_size(Some("30")), parsed(Some(30.0), None));
        assert_eq!(parse_serving_size(Some("one slice")), parsed(None, Some("slice")));
        assert_eq!(parse_serving_size(Some("--")), ServingSize::default());
    }

    #[test]
    fn last_letter_run_wins() {
        assert_eq!(
            parse_serving_size(Some("2 biscuits 25 g")),
            parsed(Some(2.0), Some("g"))
        );
    }
}
