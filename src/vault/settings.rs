//! Typed values for the vault-scoped `vault_settings` table.
//!
//! Each row stores the value as text plus a type tag so booleans,
//! integers and doubles come back as the type they went in with.

use std::fmt;

use crate::errors::{Result, VaultError};

/// A single typed setting value.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(String),
}

impl SettingValue {
    /// The tag written to the `type` column.
    pub fn type_tag(&self) -> &'static str {
        match self {
            SettingValue::Bool(_) => "bool",
            SettingValue::Int(_) => "int",
            SettingValue::Double(_) => "double",
            SettingValue::Text(_) => "string",
        }
    }

    /// The text written to the `value` column.
    pub fn to_stored(&self) -> String {
        match self {
            SettingValue::Bool(b) => b.to_string(),
            SettingValue::Int(i) => i.to_string(),
            SettingValue::Double(d) => d.to_string(),
            SettingValue::Text(s) => s.clone(),
        }
    }

    /// Rebuild a value from its stored text and type tag.
    pub fn from_stored(key: &str, value: &str, type_tag: &str) -> Result<Self> {
        let bad = |what: &str| {
            VaultError::InvalidVaultFormat(format!(
                "setting '{key}' has {what} value '{value}'"
            ))
        };

        match type_tag {
            "bool" => value
                .parse::<bool>()
                .map(SettingValue::Bool)
                .map_err(|_| bad("a malformed bool")),
            "int" => value
                .parse::<i64>()
                .map(SettingValue::Int)
                .map_err(|_| bad("a malformed int")),
            "double" => value
                .parse::<f64>()
                .map(SettingValue::Double)
                .map_err(|_| bad("a malformed double")),
            "string" => Ok(SettingValue::Text(value.to_string())),
            other => Err(VaultError::InvalidVaultFormat(format!(
                "setting '{key}' has unknown type '{other}'"
            ))),
        }
    }

    /// Parse a value typed on the command line, using `type_tag` if given
    /// and otherwise guessing bool, then int, then double, then string.
    pub fn parse_with_tag(value: &str, type_tag: Option<&str>) -> Result<Self> {
        match type_tag {
            Some(tag) => Self::from_stored("<input>", value, tag),
            None => Ok(if let Ok(b) = value.parse::<bool>() {
                SettingValue::Bool(b)
            } else if let Ok(i) = value.parse::<i64>() {
                SettingValue::Int(i)
            } else if let Ok(d) = value.parse::<f64>() {
                SettingValue::Double(d)
            } else {
                SettingValue::Text(value.to_string())
            }),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to doubles.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            SettingValue::Double(d) => Some(*d),
            SettingValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_stored())
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        SettingValue::Bool(v)
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        SettingValue::Int(v)
    }
}

impl From<i32> for SettingValue {
    fn from(v: i32) -> Self {
        SettingValue::Int(i64::from(v))
    }
}

impl From<u32> for SettingValue {
    fn from(v: u32) -> Self {
        SettingValue::Int(i64::from(v))
    }
}

impl From<f64> for SettingValue {
    fn from(v: f64) -> Self {
        SettingValue::Double(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::Text(v.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        SettingValue::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_form_keeps_type() {
        for value in [
            SettingValue::Bool(true),
            SettingValue::Int(-42),
            SettingValue::Double(2.5),
            SettingValue::Text("backups".into()),
        ] {
            let back =
                SettingValue::from_stored("k", &value.to_stored(), value.type_tag()).unwrap();
            assert_eq!(back, value);
        }
    }

    #[test]
    fn text_that_looks_numeric_stays_text() {
        let back = SettingValue::from_stored("k", "10", "string").unwrap();
        assert_eq!(back, SettingValue::Text("10".into()));
        assert_eq!(back.as_int(), None);
    }

    #[test]
    fn malformed_and_unknown_tags_are_rejected() {
        assert!(SettingValue::from_stored("k", "yes", "bool").is_err());
        assert!(SettingValue::from_stored("k", "1.5", "int").is_err());
        assert!(SettingValue::from_stored("k", "1", "uuid").is_err());
    }

    #[test]
    fn parse_guesses_types_without_tag() {
        assert_eq!(SettingValue::parse_with_tag("true", None).unwrap(), SettingValue::Bool(true));
        assert_eq!(SettingValue::parse_with_tag("10", None).unwrap(), SettingValue::Int(10));
        assert_eq!(SettingValue::parse_with_tag("0.5", None).unwrap(), SettingValue::Double(0.5));
        assert_eq!(
            SettingValue::parse_with_tag("10", Some("string")).unwrap(),
            SettingValue::Text("10".into())
        );
    }

    #[test]
    fn int_widens_to_double() {
        assert_eq!(SettingValue::Int(3).as_double(), Some(3.0));
        assert_eq!(SettingValue::Double(3.0).as_int(), None);
    }
}
