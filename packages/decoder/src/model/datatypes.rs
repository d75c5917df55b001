//! XSD scalar types and their lexical parsing.
//!
//! `valueType` declares one of the XML Schema built-in types below; the
//! corresponding `value` text is parsed according to that type's lexical
//! rules. Non-string types are whitespace-collapsed before parsing.

use std::cmp::Ordering;
use std::sync::LazyLock;

use base64::Engine;
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use super::base::XmlEnum;

/// Declared XSD value type of a property, range or qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataTypeDef {
    Duration,
    DateTime,
    Date,
    Time,
    GYearMonth,
    GYear,
    GMonthDay,
    GDay,
    GMonth,
    Boolean,
    Base64Binary,
    HexBinary,
    Float,
    Double,
    Decimal,
    Integer,
    Long,
    Int,
    Short,
    Byte,
    NonPositiveInteger,
    NegativeInteger,
    NonNegativeInteger,
    PositiveInteger,
    UnsignedLong,
    UnsignedInt,
    UnsignedShort,
    UnsignedByte,
    AnyUri,
    String,
    NormalizedString,
}

impl XmlEnum for DataTypeDef {
    const TABLE: &'static [(&'static str, Self)] = &[
        ("xs:duration", Self::Duration),
        ("xs:dateTime", Self::DateTime),
        ("xs:date", Self::Date),
        ("xs:time", Self::Time),
        ("xs:gYearMonth", Self::GYearMonth),
        ("xs:gYear", Self::GYear),
        ("xs:gMonthDay", Self::GMonthDay),
        ("xs:gDay", Self::GDay),
        ("xs:gMonth", Self::GMonth),
        ("xs:boolean", Self::Boolean),
        ("xs:base64Binary", Self::Base64Binary),
        ("xs:hexBinary", Self::HexBinary),
        ("xs:float", Self::Float),
        ("xs:double", Self::Double),
        ("xs:decimal", Self::Decimal),
        ("xs:integer", Self::Integer),
        ("xs:long", Self::Long),
        ("xs:int", Self::Int),
        ("xs:short", Self::Short),
        ("xs:byte", Self::Byte),
        ("xs:nonPositiveInteger", Self::NonPositiveInteger),
        ("xs:negativeInteger", Self::NegativeInteger),
        ("xs:nonNegativeInteger", Self::NonNegativeInteger),
        ("xs:positiveInteger", Self::PositiveInteger),
        ("xs:unsignedLong", Self::UnsignedLong),
        ("xs:unsignedInt", Self::UnsignedInt),
        ("xs:unsignedShort", Self::UnsignedShort),
        ("xs:unsignedByte", Self::UnsignedByte),
        ("xs:anyURI", Self::AnyUri),
        ("xs:string", Self::String),
        ("xs:normalizedString", Self::NormalizedString),
    ];

    /// Accepts the type name with or without the `xs:` prefix.
    fn from_xml(text: &str) -> Option<Self> {
        let local = text.strip_prefix("xs:").unwrap_or(text);
        Self::TABLE
            .iter()
            .find(|(name, _)| name.strip_prefix("xs:") == Some(local))
            .map(|(_, value)| *value)
    }
}

impl DataTypeDef {
    /// Inclusive bounds of the fixed-width integer types.
    fn integer_bounds(self) -> Option<(i128, i128)> {
        let bounds = match self {
            Self::Long => (i64::MIN.into(), i64::MAX.into()),
            Self::Int => (i32::MIN.into(), i32::MAX.into()),
            Self::Short => (i16::MIN.into(), i16::MAX.into()),
            Self::Byte => (i8::MIN.into(), i8::MAX.into()),
            Self::UnsignedLong => (0, u64::MAX.into()),
            Self::UnsignedInt => (0, u32::MAX.into()),
            Self::UnsignedShort => (0, u16::MAX.into()),
            Self::UnsignedByte => (0, u8::MAX.into()),
            _ => return None,
        };
        Some(bounds)
    }

    /// Sign accepted by the arbitrary-precision integer types.
    fn integer_sign(self) -> Option<fn(Ordering) -> bool> {
        let accepts: fn(Ordering) -> bool = match self {
            Self::Integer => |_| true,
            Self::NonPositiveInteger => Ordering::is_le,
            Self::NegativeInteger => Ordering::is_lt,
            Self::NonNegativeInteger => Ordering::is_ge,
            Self::PositiveInteger => Ordering::is_gt,
            _ => return None,
        };
        Some(accepts)
    }
}

/// A parsed XSD scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum XsdValue {
    Boolean(bool),
    Float(f32),
    Double(f64),
    /// Decimal in its validated lexical form.
    Decimal(String),
    /// Any of the integer types, range-checked against the declared type.
    Integer(i128),
    /// An arbitrary-precision integer beyond the `i128` range, in canonical
    /// form (optional `-`, no leading zeros).
    BigInteger(String),
    DateTime {
        value: NaiveDateTime,
        offset: Option<FixedOffset>,
    },
    Date {
        value: NaiveDate,
        offset: Option<FixedOffset>,
    },
    Time {
        value: NaiveTime,
        offset: Option<FixedOffset>,
    },
    /// base64Binary and hexBinary.
    Binary(Vec<u8>),
    /// Duration and the Gregorian fragments, in their validated lexical form.
    Lexical(String),
    /// string, normalizedString and anyURI.
    String(String),
}

const TZ: &str = r"(Z|[+-]\d{2}:\d{2})?";

macro_rules! lexical_regex {
    ($name:ident, $pattern:expr) => {
        #[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(&$pattern).expect("valid regex"));
    };
}

lexical_regex!(
    DURATION,
    r"^-?P(\d+Y)?(\d+M)?(\d+D)?(T(\d+H)?(\d+M)?(\d+(\.\d+)?S)?)?$"
);
lexical_regex!(G_YEAR_MONTH, format!(r"^-?\d{{4,}}-(0[1-9]|1[0-2]){TZ}$"));
lexical_regex!(G_YEAR, format!(r"^-?\d{{4,}}{TZ}$"));
lexical_regex!(
    G_MONTH_DAY,
    format!(r"^--(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01]){TZ}$")
);
lexical_regex!(G_DAY, format!(r"^---(0[1-9]|[12]\d|3[01]){TZ}$"));
lexical_regex!(G_MONTH, format!(r"^--(0[1-9]|1[0-2]){TZ}$"));
lexical_regex!(INTEGER, r"^[+-]?\d+$");
lexical_regex!(DECIMAL, r"^[+-]?(\d+(\.\d*)?|\.\d+)$");

impl XsdValue {
    /// Parse `text` according to the lexical rules of `value_type`.
    ///
    /// Returns `None` if the text is not a valid literal of that type.
    ///
    /// # Examples
    /// ```
    /// use aas_xml_decoder::model::{DataTypeDef, XsdValue};
    ///
    /// assert_eq!(XsdValue::parse("23.5", DataTypeDef::Double), Some(XsdValue::Double(23.5)));
    /// assert_eq!(XsdValue::parse("300", DataTypeDef::UnsignedByte), None);
    /// ```
    #[must_use]
    pub fn parse(text: &str, value_type: DataTypeDef) -> Option<Self> {
        use DataTypeDef as T;

        match value_type {
            T::String | T::AnyUri => return Some(Self::String(text.to_string())),
            T::NormalizedString => {
                return (!text.contains(['\r', '\n', '\t']))
                    .then(|| Self::String(text.to_string()));
            }
            _ => {}
        }

        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let text = collapsed.as_str();

        if let Some((min, max)) = value_type.integer_bounds() {
            let digits = text.strip_prefix('+').unwrap_or(text);
            let value: i128 = digits.parse().ok()?;
            return (min..=max).contains(&value).then_some(Self::Integer(value));
        }
        if let Some(accepts) = value_type.integer_sign() {
            return parse_unbounded_integer(text, accepts);
        }

        match value_type {
            T::Boolean => match text {
                "true" | "1" => Some(Self::Boolean(true)),
                "false" | "0" => Some(Self::Boolean(false)),
                _ => None,
            },
            T::Float => parse_float(text).map(|v| Self::Float(v as f32)),
            T::Double => parse_float(text).map(Self::Double),
            T::Decimal => DECIMAL
                .is_match(text)
                .then(|| Self::Decimal(text.to_string())),
            T::DateTime => {
                let (body, offset) = split_timezone(text)?;
                let value = NaiveDateTime::parse_from_str(body, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
                Some(Self::DateTime { value, offset })
            }
            T::Date => {
                let (body, offset) = split_timezone(text)?;
                let value = NaiveDate::parse_from_str(body, "%Y-%m-%d").ok()?;
                Some(Self::Date { value, offset })
            }
            T::Time => {
                let (body, offset) = split_timezone(text)?;
                let value = NaiveTime::parse_from_str(body, "%H:%M:%S%.f").ok()?;
                Some(Self::Time { value, offset })
            }
            T::Base64Binary => {
                let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                base64::engine::general_purpose::STANDARD
                    .decode(compact)
                    .ok()
                    .map(Self::Binary)
            }
            T::HexBinary => hex::decode(text).ok().map(Self::Binary),
            T::Duration => {
                let valid = DURATION.is_match(text)
                    && text.chars().any(|c| c.is_ascii_digit())
                    && !text.ends_with('T');
                valid.then(|| Self::Lexical(text.to_string()))
            }
            T::GYearMonth => lexical(&G_YEAR_MONTH, text),
            T::GYear => lexical(&G_YEAR, text),
            T::GMonthDay => lexical(&G_MONTH_DAY, text),
            T::GDay => lexical(&G_DAY, text),
            T::GMonth => lexical(&G_MONTH, text),
            _ => None,
        }
    }

    /// The value as a double, for the numeric variants.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            Self::Float(v) => Some(f64::from(*v)),
            Self::Integer(v) => Some(*v as f64),
            Self::BigInteger(v) => v.parse().ok(),
            Self::Decimal(v) => v.parse().ok(),
            _ => None,
        }
    }
}

/// Parse an `xs:integer` literal of any magnitude whose sign `accepts`.
fn parse_unbounded_integer(text: &str, accepts: fn(Ordering) -> bool) -> Option<XsdValue> {
    if !INTEGER.is_match(text) {
        return None;
    }
    let (negative, digits) = match text.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits = digits.trim_start_matches('0');
    let sign = match (digits.is_empty(), negative) {
        (true, _) => Ordering::Equal,
        (false, true) => Ordering::Less,
        (false, false) => Ordering::Greater,
    };
    if !accepts(sign) {
        return None;
    }

    let canonical = match sign {
        Ordering::Equal => "0".to_string(),
        Ordering::Less => format!("-{digits}"),
        Ordering::Greater => digits.to_string(),
    };
    Some(match canonical.parse::<i128>() {
        Ok(value) => XsdValue::Integer(value),
        Err(_) => XsdValue::BigInteger(canonical),
    })
}

fn lexical(pattern: &Regex, text: &str) -> Option<XsdValue> {
    pattern
        .is_match(text)
        .then(|| XsdValue::Lexical(text.to_string()))
}

/// Parse an XSD float or double literal.
///
/// `INF`, `-INF` and `NaN` are the only non-numeric literals; Rust's own
/// spellings (`inf`, `infinity`, `nan`) are rejected.
fn parse_float(text: &str) -> Option<f64> {
    match text {
        "INF" | "+INF" => return Some(f64::INFINITY),
        "-INF" => return Some(f64::NEG_INFINITY),
        "NaN" => return Some(f64::NAN),
        _ => {}
    }
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || "+-.eE".contains(c)) {
        return None;
    }
    text.parse().ok()
}

/// Split an optional `Z` or `±hh:mm` suffix off a date/time literal.
///
/// Returns `None` if a suffix is present but not a valid offset.
fn split_timezone(text: &str) -> Option<(&str, Option<FixedOffset>)> {
    if !text.is_ascii() {
        return None;
    }
    if let Some(body) = text.strip_suffix('Z') {
        return Some((body, FixedOffset::east_opt(0)));
    }
    let bytes = text.as_bytes();
    if bytes.len() > 6 {
        let start = bytes.len() - 6;
        let sign = bytes[start];
        if (sign == b'+' || sign == b'-') && bytes[start + 3] == b':' {
            let hours: i32 = text[start + 1..start + 3].parse().ok()?;
            let minutes: i32 = text[start + 4..].parse().ok()?;
            if hours > 14 || minutes > 59 {
                return None;
            }
            let seconds = (hours * 60 + minutes) * 60;
            let seconds = if sign == b'-' { -seconds } else { seconds };
            return Some((&text[..start], Some(FixedOffset::east_opt(seconds)?)));
        }
    }
    Some((text, None))
}
