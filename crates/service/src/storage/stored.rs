use serde::Serialize;
use serde_json::Value;

/// Records that carry a string identifier.
pub trait Record {
    fn id(&self) -> &str;
}

/// One element of a persisted collection.
///
/// Elements that do not decode into `T` stay `Raw` and are written back
/// untouched, so a stray malformed record never costs the rest of the file.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Stored<T> {
    Typed(T),
    Raw(Value),
}

impl<T> Stored<T> {
    pub fn typed(&self) -> Option<&T> {
        match self {
            Self::Typed(record) => Some(record),
            Self::Raw(_) => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

impl<T: Record> Stored<T> {
    /// Identifier of the element; raw elements are looked up by their `id` key.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Typed(record) => Some(record.id()),
            Self::Raw(value) => value.get("id").and_then(Value::as_str),
        }
    }
}
