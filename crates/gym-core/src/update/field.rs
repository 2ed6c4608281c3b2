use chrono::NaiveDateTime;
use std::fmt::Debug;

/// A closed set of writable fields for one table.
///
/// `key` is the name accepted in request payloads, `column` the name written
/// to the store. They differ only where a value is transformed on the way in
/// (a submitted `password` is persisted as `password_hash`).
pub trait Column: Copy + Eq + Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn key(self) -> &'static str;

    fn column(self) -> &'static str {
        self.key()
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }
}

/// A persisted table addressed by a single surrogate primary key.
pub trait Table {
    type Field: Column;

    const TABLE: &'static str;
    const PRIMARY_KEY: &'static str;
    const TOUCHES_UPDATED_AT: bool = false;
}

/// A normalized value ready to be bound as a query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(Option<String>),
    Integer(Option<i32>),
    SmallInt(i16),
    Number(f64),
    Timestamp(Option<NaiveDateTime>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(Some(value.into()))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(Some(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            FieldValue::Integer(v) => *v,
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_small_int(&self) -> Option<i16> {
        match self {
            FieldValue::SmallInt(v) => Some(*v),
            _ => None,
        }
    }

    /// `Some(None)` means the timestamp is explicitly cleared.
    pub fn as_timestamp(&self) -> Option<Option<NaiveDateTime>> {
        match self {
            FieldValue::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(
            self,
            FieldValue::Text(None) | FieldValue::Integer(None) | FieldValue::Timestamp(None)
        )
    }
}

/// Validated fields in submission order. Setting a field twice keeps the
/// original position and the latest value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet<F: Column> {
    entries: Vec<(F, FieldValue)>,
}

impl<F: Column> Default for FieldSet<F> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<F: Column> FieldSet<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: F, value: FieldValue) {
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    pub fn get(&self, field: F) -> Option<&FieldValue> {
        self.entries.iter().find(|(f, _)| *f == field).map(|(_, v)| v)
    }

    pub fn contains(&self, field: F) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(F, FieldValue)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<(F, FieldValue)> {
        self.entries
    }
}
