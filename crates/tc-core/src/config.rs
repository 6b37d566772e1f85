//! Syntax-independent configuration tree.
//!
//! Reaction schemes and other run-time inputs arrive as nested tables of
//! numbers, strings and lists. The tree is parsed once (from YAML or JSON)
//! and consumers walk it by recursive descent using the typed accessors on
//! [`ConfigTable`], which turn every mismatch into a [`ConfigError`].

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One node of the configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<ConfigValue>),
    Table(ConfigTable),
}

impl ConfigValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ConfigValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&ConfigTable> {
        match self {
            ConfigValue::Table(t) => Some(t),
            _ => None,
        }
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        ConfigValue::Number(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        ConfigValue::Text(v.to_string())
    }
}

impl From<ConfigTable> for ConfigValue {
    fn from(v: ConfigTable) -> Self {
        ConfigValue::Table(v)
    }
}

/// A string-keyed table of configuration values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigTable {
    entries: BTreeMap<String, ConfigValue>,
}

impl ConfigTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for assembling trees in code.
    pub fn with(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Required numeric field.
    pub fn number(&self, key: &str, context: &str) -> ConfigResult<f64> {
        self.optional_number(key, context)?
            .ok_or_else(|| ConfigError::missing(key, context))
    }

    /// Numeric field that may be absent; present-but-not-a-number is an error.
    pub fn optional_number(&self, key: &str, context: &str) -> ConfigResult<Option<f64>> {
        match self.get(key) {
            None => Ok(None),
            Some(ConfigValue::Number(v)) => Ok(Some(*v)),
            Some(_) => Err(wrong_type(key, context, "number")),
        }
    }

    /// Required integer field (a number with no fractional part).
    pub fn integer(&self, key: &str, context: &str) -> ConfigResult<i64> {
        let v = self.number(key, context)?;
        if v.fract() != 0.0 || !v.is_finite() {
            return Err(wrong_type(key, context, "integer"));
        }
        Ok(v as i64)
    }

    pub fn text(&self, key: &str, context: &str) -> ConfigResult<&str> {
        match self.get(key) {
            None => Err(ConfigError::missing(key, context)),
            Some(ConfigValue::Text(s)) => Ok(s),
            Some(_) => Err(wrong_type(key, context, "string")),
        }
    }

    pub fn table(&self, key: &str, context: &str) -> ConfigResult<&ConfigTable> {
        self.optional_table(key, context)?
            .ok_or_else(|| ConfigError::missing(key, context))
    }

    pub fn optional_table(&self, key: &str, context: &str) -> ConfigResult<Option<&ConfigTable>> {
        match self.get(key) {
            None => Ok(None),
            Some(ConfigValue::Table(t)) => Ok(Some(t)),
            Some(_) => Err(wrong_type(key, context, "table")),
        }
    }

    pub fn list(&self, key: &str, context: &str) -> ConfigResult<&[ConfigValue]> {
        match self.get(key) {
            None => Err(ConfigError::missing(key, context)),
            Some(ConfigValue::List(items)) => Ok(items),
            Some(_) => Err(wrong_type(key, context, "list")),
        }
    }

    pub fn from_yaml_str(source: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

fn wrong_type(key: &str, context: &str, expected: &'static str) -> ConfigError {
    ConfigError::WrongType {
        field: key.to_string(),
        context: context.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nested_yaml() {
        let table = ConfigTable::from_yaml_str(
            r#"
model: Troe
kInf: { A: 1.0e10, n: 0, C: 100 }
efficiencies: { N2: 1.0, O2: 0.4 }
"#,
        )
        .unwrap();

        assert_eq!(table.text("model", "test").unwrap(), "Troe");
        let k_inf = table.table("kInf", "test").unwrap();
        assert_eq!(k_inf.number("A", "kInf").unwrap(), 1.0e10);
        // Integers in the source are read as numbers.
        assert_eq!(k_inf.number("n", "kInf").unwrap(), 0.0);
        assert_eq!(table.table("efficiencies", "test").unwrap().len(), 2);
    }

    #[test]
    fn parse_json() {
        let table = ConfigTable::from_json_str(r#"{"model": "Arrhenius", "A": 2.0}"#).unwrap();
        assert_eq!(table.number("A", "json").unwrap(), 2.0);
    }

    #[test]
    fn missing_and_wrong_type_fields() {
        let table = ConfigTable::new().with("A", 1.0).with("model", "Arrhenius");

        let err = table.number("C", "Arrhenius").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { .. }));

        let err = table.number("model", "Arrhenius").unwrap_err();
        assert!(matches!(err, ConfigError::WrongType { .. }));

        let err = table.text("A", "Arrhenius").unwrap_err();
        assert!(matches!(err, ConfigError::WrongType { .. }));
    }

    #[test]
    fn integers_and_optional_numbers() {
        let table = ConfigTable::new().with("mode", 0.0).with("bad", 1.5);
        assert_eq!(table.integer("mode", "t").unwrap(), 0);
        assert!(table.integer("bad", "t").is_err());
        assert_eq!(table.optional_number("n", "t").unwrap(), None);
    }
}
