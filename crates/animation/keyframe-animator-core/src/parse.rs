//! Literal parsers turning one script token into a typed [`Value`].
//!
//! Decimal literals always use `.` as the decimal point regardless of locale.
//! Components of vector and array literals are separated by commas; whitespace
//! around each component is ignored.

use crate::value::{Value, ValueKind, Vector3, Vector4};
use crate::AnimatorError;

/// Trait for value literal parsers
pub trait ValueParser: Send + Sync {
    /// Get the name of this parser
    fn name(&self) -> &str;

    /// Kind of every value this parser produces
    fn kind(&self) -> ValueKind;

    /// Convert one literal to a value
    fn parse(&self, token: &str) -> Result<Value, AnimatorError>;
}

/// Parse a single decimal literal.
pub fn parse_scalar(s: &str) -> Result<f64, AnimatorError> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| AnimatorError::parse(ValueKind::Scalar.name(), s))
}

fn parse_components(s: &str, kind: ValueKind) -> Result<Vec<f64>, AnimatorError> {
    s.split(',')
        .map(|c| {
            c.trim()
                .parse::<f64>()
                .map_err(|_| AnimatorError::parse(kind.name(), s))
        })
        .collect()
}

fn parse_fixed<const N: usize>(s: &str, kind: ValueKind) -> Result<[f64; N], AnimatorError> {
    let components = parse_components(s, kind)?;
    components
        .try_into()
        .map_err(|_| AnimatorError::parse(kind.name(), s))
}

/// Parse `A, B, C`.
pub fn parse_vector3(s: &str) -> Result<Vector3, AnimatorError> {
    parse_fixed::<3>(s, ValueKind::Vector3).map(Vector3::from)
}

/// Parse `A, B, C, D`.
pub fn parse_vector4(s: &str) -> Result<Vector4, AnimatorError> {
    parse_fixed::<4>(s, ValueKind::Vector4).map(Vector4::from)
}

/// Parse `A, B, ..., N`; the length is whatever the literal holds.
pub fn parse_array(s: &str) -> Result<Vec<f64>, AnimatorError> {
    parse_components(s, ValueKind::Array)
}

/// Parser for a single double
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarParser;

impl ValueParser for ScalarParser {
    fn name(&self) -> &str {
        "double"
    }

    fn kind(&self) -> ValueKind {
        ValueKind::Scalar
    }

    fn parse(&self, token: &str) -> Result<Value, AnimatorError> {
        parse_scalar(token).map(Value::Scalar)
    }
}

/// Parser for three comma-separated doubles
#[derive(Debug, Clone, Copy, Default)]
pub struct Vector3Parser;

impl ValueParser for Vector3Parser {
    fn name(&self) -> &str {
        "vector3"
    }

    fn kind(&self) -> ValueKind {
        ValueKind::Vector3
    }

    fn parse(&self, token: &str) -> Result<Value, AnimatorError> {
        parse_vector3(token).map(Value::Vector3)
    }
}

/// Parser for four comma-separated doubles
#[derive(Debug, Clone, Copy, Default)]
pub struct Vector4Parser;

impl ValueParser for Vector4Parser {
    fn name(&self) -> &str {
        "vector4"
    }

    fn kind(&self) -> ValueKind {
        ValueKind::Vector4
    }

    fn parse(&self, token: &str) -> Result<Value, AnimatorError> {
        parse_vector4(token).map(Value::Vector4)
    }
}

/// Parser for any number of comma-separated doubles
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayParser;

impl ValueParser for ArrayParser {
    fn name(&self) -> &str {
        "array"
    }

    fn kind(&self) -> ValueKind {
        ValueKind::Array
    }

    fn parse(&self, token: &str) -> Result<Value, AnimatorError> {
        parse_array(token).map(Value::Array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_is_locale_invariant() {
        assert_eq!(parse_scalar("2.5").unwrap(), 2.5);
        assert_eq!(parse_scalar("-1e-3").unwrap(), -0.001);
        assert!(matches!(
            parse_scalar("2,5"),
            Err(AnimatorError::Parse { .. })
        ));
        assert!(parse_scalar("").is_err());
    }

    #[test]
    fn vector3_requires_exactly_three_components() {
        assert_eq!(
            parse_vector3("1, 2.5, -3").unwrap(),
            Vector3::new(1.0, 2.5, -3.0)
        );
        assert!(parse_vector3("1,2").is_err());
        assert!(parse_vector3("1,2,3,4").is_err());
        assert!(parse_vector3("1,x,3").is_err());
    }

    #[test]
    fn vector4_requires_exactly_four_components() {
        assert_eq!(
            parse_vector4("0,0,1,1").unwrap(),
            Vector4::new(0.0, 0.0, 1.0, 1.0)
        );
        assert!(parse_vector4("0,0,1").is_err());
    }

    #[test]
    fn array_accepts_any_count() {
        assert_eq!(parse_array("0.1").unwrap(), vec![0.1]);
        assert_eq!(parse_array("1,0.6,0.1").unwrap(), vec![1.0, 0.6, 0.1]);
        assert!(parse_array("1,,2").is_err());
    }

    #[test]
    fn parsers_report_their_kind() {
        let err = Vector3Parser.parse("1,2").unwrap_err();
        assert_eq!(
            err,
            AnimatorError::Parse {
                kind: "Vector3".to_string(),
                token: "1,2".to_string()
            }
        );
        assert_eq!(ArrayParser.parse("4,5").unwrap().kind(), ValueKind::Array);
        assert_eq!(ScalarParser.kind(), ValueKind::Scalar);
    }
}
