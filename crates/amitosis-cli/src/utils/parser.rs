use amitosis::engine::config::SegregationMode;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Invalid segregation mode '{0}'. Expected 'amitosis' or 'mitosis'.")]
    InvalidMode(String),

    #[error("Value list for {0} cannot be empty")]
    EmptyList(String),
}

/// Splits `KEY=VALUE` at the first `=`.
pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidKeyValue(pair.to_string())),
    }
}

pub fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Parses a comma-separated list such as `2,8,45`. Surrounding brackets are accepted.
pub fn parse_list<T: FromStr>(key: &str, value: &str) -> Result<Vec<T>, ParseError> {
    let inner = value
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim();
    if inner.is_empty() {
        return Err(ParseError::EmptyList(key.to_string()));
    }
    inner
        .split(',')
        .map(|item| parse_value(key, item.trim()))
        .collect()
}

pub fn parse_mode(value: &str) -> Result<SegregationMode, ParseError> {
    match value.trim().trim_matches('"').to_ascii_lowercase().as_str() {
        "amitosis" => Ok(SegregationMode::Amitosis),
        "mitosis" => Ok(SegregationMode::Mitosis),
        _ => Err(ParseError::InvalidMode(value.to_string())),
    }
}

pub fn parse_modes(key: &str, value: &str) -> Result<Vec<SegregationMode>, ParseError> {
    let raw: Vec<String> = parse_list(key, value)?;
    raw.iter().map(|m| parse_mode(m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_splits_at_first_equals() {
        assert_eq!(
            parse_key_value("run.seed=42").unwrap(),
            ("run.seed", "42")
        );
        assert_eq!(parse_key_value("a=b=c").unwrap(), ("a", "b=c"));
    }

    #[test]
    fn key_value_without_equals_or_key_is_rejected() {
        assert!(matches!(
            parse_key_value("run.seed"),
            Err(ParseError::InvalidKeyValue(_))
        ));
        assert!(matches!(
            parse_key_value("=3"),
            Err(ParseError::InvalidKeyValue(_))
        ));
    }

    #[test]
    fn list_parses_plain_and_bracketed_forms() {
        assert_eq!(parse_list::<u32>("p", "2,8,45").unwrap(), vec![2, 8, 45]);
        assert_eq!(
            parse_list::<f64>("s", "[-0.01, 0.01]").unwrap(),
            vec![-0.01, 0.01]
        );
    }

    #[test]
    fn list_reports_bad_items_and_empty_lists() {
        assert_eq!(
            parse_list::<u32>("sweep.ploidies", "2,x"),
            Err(ParseError::InvalidValue {
                key: "sweep.ploidies".to_string(),
                value: "x".to_string()
            })
        );
        assert_eq!(
            parse_list::<u32>("sweep.ploidies", "[]"),
            Err(ParseError::EmptyList("sweep.ploidies".to_string()))
        );
    }

    #[test]
    fn modes_are_case_insensitive_and_may_be_quoted() {
        assert_eq!(parse_mode("Amitosis").unwrap(), SegregationMode::Amitosis);
        assert_eq!(parse_mode("\"mitosis\"").unwrap(), SegregationMode::Mitosis);
        assert!(parse_mode("meiosis").is_err());
        assert_eq!(
            parse_modes("sweep.modes", "amitosis,mitosis").unwrap(),
            vec![SegregationMode::Amitosis, SegregationMode::Mitosis]
        );
    }
}
