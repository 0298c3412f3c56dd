//! Typed filters for `find`.
//!
//! Each resource kind accepts a closed set of keys, named as on the wire.
//! Every set field must equal the item's field exactly. Keys are trimmed in
//! `key=value` pairs, values are not.

use ups_schema::{PushApplication, Variant, VariantType};

use crate::error::{Error, Result};

/// A predicate over items of type `T` that may name a direct-lookup key.
pub trait Filter<T> {
    /// Wire name of the identifier key, e.g. `pushApplicationID`.
    const IDENTIFIER_KEY: &'static str;

    /// Identifier to look up directly, if the filter names one.
    fn identifier(&self) -> Option<&str>;

    /// True when no field is set.
    fn is_empty(&self) -> bool;

    /// True when every set field equals the item's field.
    fn matches(&self, item: &T) -> bool;
}

/// Filter over applications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub push_application_id: Option<String>,
    pub name: Option<String>,
    pub developer: Option<String>,
}

impl ApplicationFilter {
    pub const KEYS: [&'static str; 3] = ["pushApplicationID", "name", "developer"];

    pub fn by_id(push_application_id: impl Into<String>) -> Self {
        Self {
            push_application_id: Some(push_application_id.into()),
            ..Self::default()
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn by_developer(developer: impl Into<String>) -> Self {
        Self {
            developer: Some(developer.into()),
            ..Self::default()
        }
    }

    /// Set one field by its wire name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFilter`] for unknown keys or empty values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let slot = match key {
            "pushApplicationID" => &mut self.push_application_id,
            "name" => &mut self.name,
            "developer" => &mut self.developer,
            _ => return Err(unknown_key(key, &Self::KEYS)),
        };
        *slot = Some(non_empty(key, value)?.to_string());
        Ok(())
    }

    /// Build a filter from `key=value` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFilter`] if any pair is malformed or names an
    /// unknown key.
    pub fn parse<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        for pair in pairs {
            let (key, value) = split_pair(pair.as_ref())?;
            filter.set(key, value)?;
        }
        Ok(filter)
    }
}

impl Filter<PushApplication> for ApplicationFilter {
    const IDENTIFIER_KEY: &'static str = "pushApplicationID";

    fn identifier(&self) -> Option<&str> {
        self.push_application_id.as_deref()
    }

    fn is_empty(&self) -> bool {
        self.push_application_id.is_none() && self.name.is_none() && self.developer.is_none()
    }

    fn matches(&self, app: &PushApplication) -> bool {
        field_matches(self.push_application_id.as_deref(), &app.push_application_id)
            && field_matches(self.name.as_deref(), &app.name)
            && field_matches(self.developer.as_deref(), &app.developer)
    }
}

/// Filter over the variants of one application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantFilter {
    pub variant_id: Option<String>,
    pub name: Option<String>,
    pub developer: Option<String>,
    pub variant_type: Option<VariantType>,
}

impl VariantFilter {
    pub const KEYS: [&'static str; 4] = ["variantID", "name", "developer", "type"];

    pub fn by_id(variant_id: impl Into<String>) -> Self {
        Self {
            variant_id: Some(variant_id.into()),
            ..Self::default()
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn by_type(variant_type: VariantType) -> Self {
        Self {
            variant_type: Some(variant_type),
            ..Self::default()
        }
    }

    /// Set one field by its wire name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFilter`] for unknown keys, empty values, or an
    /// unrecognized `type`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = non_empty(key, value)?;
        match key {
            "variantID" => self.variant_id = Some(value.to_string()),
            "name" => self.name = Some(value.to_string()),
            "developer" => self.developer = Some(value.to_string()),
            "type" => {
                let parsed = value
                    .parse::<VariantType>()
                    .map_err(|e| Error::InvalidFilter(e.to_string()))?;
                self.variant_type = Some(parsed);
            }
            _ => return Err(unknown_key(key, &Self::KEYS)),
        }
        Ok(())
    }

    /// Build a filter from `key=value` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFilter`] if any pair is malformed or names an
    /// unknown key.
    pub fn parse<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        for pair in pairs {
            let (key, value) = split_pair(pair.as_ref())?;
            filter.set(key, value)?;
        }
        Ok(filter)
    }
}

impl Filter<Variant> for VariantFilter {
    const IDENTIFIER_KEY: &'static str = "variantID";

    fn identifier(&self) -> Option<&str> {
        self.variant_id.as_deref()
    }

    fn is_empty(&self) -> bool {
        self.variant_id.is_none()
            && self.name.is_none()
            && self.developer.is_none()
            && self.variant_type.is_none()
    }

    fn matches(&self, variant: &Variant) -> bool {
        field_matches(self.variant_id.as_deref(), &variant.variant_id)
            && field_matches(self.name.as_deref(), &variant.name)
            && field_matches(self.developer.as_deref(), &variant.developer)
            && self
                .variant_type
                .is_none_or(|t| t == variant.variant_type())
    }
}

fn field_matches(wanted: Option<&str>, actual: &str) -> bool {
    wanted.is_none_or(|w| w == actual)
}

fn split_pair(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .map(|(k, v)| (k.trim(), v))
        .ok_or_else(|| Error::InvalidFilter(format!("expected key=value, got '{pair}'")))
}

fn non_empty<'a>(key: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        Err(Error::InvalidFilter(format!("empty value for '{key}'")))
    } else {
        Ok(value)
    }
}

fn unknown_key(key: &str, known: &[&str]) -> Error {
    Error::InvalidFilter(format!(
        "unknown key '{key}' (expected one of: {})",
        known.join(", ")
    ))
}
