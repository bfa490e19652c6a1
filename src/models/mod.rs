use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned identity of an entry.
///
/// json-server style backends emit either numbers or strings here. Any JSON
/// number is kept as-is (negative and fractional included) and echoed back
/// verbatim in request paths.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub(crate) enum EntryId {
    Num(serde_json::Number),
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Num(n) => write!(f, "{n}"),
            EntryId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for EntryId {
    fn from(n: u64) -> Self {
        EntryId::Num(n.into())
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        EntryId::Text(s.to_string())
    }
}

/// The six user-editable fields of an entry. Also the request body for
/// create/update (identity is never part of it).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct EntryFields {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub surname: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub age: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub total: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub workplace: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub(crate) enum EntryField {
    Name,
    Surname,
    Age,
    Description,
    Total,
    Workplace,
}

impl EntryField {
    /// Form input `name` attribute, matching the JSON key.
    pub fn key(self) -> &'static str {
        match self {
            EntryField::Name => "name",
            EntryField::Surname => "surname",
            EntryField::Age => "age",
            EntryField::Description => "description",
            EntryField::Total => "total",
            EntryField::Workplace => "workplace",
        }
    }
}

impl EntryFields {
    pub fn get(&self, field: EntryField) -> &str {
        match field {
            EntryField::Name => &self.name,
            EntryField::Surname => &self.surname,
            EntryField::Age => &self.age,
            EntryField::Description => &self.description,
            EntryField::Total => &self.total,
            EntryField::Workplace => &self.workplace,
        }
    }

    pub fn set(&mut self, field: EntryField, value: String) {
        let slot = match field {
            EntryField::Name => &mut self.name,
            EntryField::Surname => &mut self.surname,
            EntryField::Age => &mut self.age,
            EntryField::Description => &mut self.description,
            EntryField::Total => &mut self.total,
            EntryField::Workplace => &mut self.workplace,
        };
        *slot = value;
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Entry {
    pub id: EntryId,
    #[serde(flatten)]
    pub fields: EntryFields,
}

/// Accepts strings, numbers and booleans as text; `null` becomes empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Current user profile as returned by the auth service.
///
/// Only the display fields are typed; the rest is kept opaque.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SessionUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(default, rename = "lastName")]
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SessionUser {
    pub fn display_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(f), Some(l)) if !f.is_empty() => Some(format!("{f} {l}").trim().to_string()),
            (Some(f), _) if !f.is_empty() => Some(f.clone()),
            _ => self.username.clone().filter(|u| !u.is_empty()),
        }
    }
}
