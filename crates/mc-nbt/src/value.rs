//! Owned NBT tree.

use std::fmt;

use crate::tag_type;

/// An NBT value
#[derive(Debug, Clone, PartialEq)]
pub enum NbtValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(NbtList),
    Compound(NbtCompound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

/// An NBT list (all elements must be same type)
#[derive(Debug, Clone, PartialEq)]
pub enum NbtList {
    Empty,
    Byte(Vec<i8>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    ByteArray(Vec<Vec<i8>>),
    String(Vec<String>),
    List(Vec<NbtList>),
    Compound(Vec<NbtCompound>),
    IntArray(Vec<Vec<i32>>),
    LongArray(Vec<Vec<i64>>),
}

/// An NBT compound (map of string -> value)
///
/// Entries keep file order. Lookups are linear, which is fine for the
/// handful of keys a tile entity carries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NbtCompound {
    entries: Vec<(String, NbtValue)>,
}

impl NbtCompound {
    /// Create a new empty compound
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a value into the compound, replacing an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<NbtValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Build a compound from entries
    #[must_use]
    pub fn from_entries(entries: Vec<(String, NbtValue)>) -> Self {
        Self { entries }
    }

    /// Iterate entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NbtValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&NbtValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Nested compound under `key`.
    #[must_use]
    pub fn get_compound(&self, key: &str) -> Option<&NbtCompound> {
        match self.get(key)? {
            NbtValue::Compound(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_list(&self, key: &str) -> Option<&NbtList> {
        match self.get(key)? {
            NbtValue::List(l) => Some(l),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    /// Integer value under `key`, widened from any integral tag.
    #[must_use]
    pub fn get_long(&self, key: &str) -> Option<i64> {
        self.get(key)?.as_long()
    }

    /// Integer value under `key` that fits in an `i32`.
    #[must_use]
    pub fn get_int(&self, key: &str) -> Option<i32> {
        self.get_long(key).and_then(|v| i32::try_from(v).ok())
    }
}

impl NbtValue {
    /// Get the type ID for this value
    pub(crate) fn type_id(&self) -> u8 {
        match self {
            Self::Byte(_) => tag_type::BYTE,
            Self::Short(_) => tag_type::SHORT,
            Self::Int(_) => tag_type::INT,
            Self::Long(_) => tag_type::LONG,
            Self::Float(_) => tag_type::FLOAT,
            Self::Double(_) => tag_type::DOUBLE,
            Self::ByteArray(_) => tag_type::BYTE_ARRAY,
            Self::String(_) => tag_type::STRING,
            Self::List(_) => tag_type::LIST,
            Self::Compound(_) => tag_type::COMPOUND,
            Self::IntArray(_) => tag_type::INT_ARRAY,
            Self::LongArray(_) => tag_type::LONG_ARRAY,
        }
    }

    /// Integral tags widened to `i64`; `None` for everything else.
    #[must_use]
    pub fn as_long(&self) -> Option<i64> {
        match *self {
            Self::Byte(v) => Some(i64::from(v)),
            Self::Short(v) => Some(i64::from(v)),
            Self::Int(v) => Some(i64::from(v)),
            Self::Long(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Scalars and strings print bare; containers fall back to `Debug`.
impl fmt::Display for NbtValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(v) => write!(f, "{v}"),
            Self::Short(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            other => write!(f, "{other:?}"),
        }
    }
}

impl NbtList {
    /// Get the element type ID
    pub(crate) fn element_type_id(&self) -> u8 {
        match self {
            Self::Empty => tag_type::END,
            Self::Byte(_) => tag_type::BYTE,
            Self::Short(_) => tag_type::SHORT,
            Self::Int(_) => tag_type::INT,
            Self::Long(_) => tag_type::LONG,
            Self::Float(_) => tag_type::FLOAT,
            Self::Double(_) => tag_type::DOUBLE,
            Self::ByteArray(_) => tag_type::BYTE_ARRAY,
            Self::String(_) => tag_type::STRING,
            Self::List(_) => tag_type::LIST,
            Self::Compound(_) => tag_type::COMPOUND,
            Self::IntArray(_) => tag_type::INT_ARRAY,
            Self::LongArray(_) => tag_type::LONG_ARRAY,
        }
    }

    /// Get the length
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Byte(v) => v.len(),
            Self::Short(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Long(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Double(v) => v.len(),
            Self::ByteArray(v) => v.len(),
            Self::String(v) => v.len(),
            Self::List(v) => v.len(),
            Self::Compound(v) => v.len(),
            Self::IntArray(v) => v.len(),
            Self::LongArray(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compound elements; empty for lists of any other element type.
    #[must_use]
    pub fn compounds(&self) -> &[NbtCompound] {
        match self {
            Self::Compound(v) => v,
            _ => &[],
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for NbtValue {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    NbtCompound => Compound,
    NbtList => List,
}

impl From<&str> for NbtValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

/// An empty vector becomes [`NbtList::Empty`] so it encodes with an END
/// element type.
impl From<Vec<NbtCompound>> for NbtValue {
    fn from(v: Vec<NbtCompound>) -> Self {
        if v.is_empty() {
            Self::List(NbtList::Empty)
        } else {
            Self::List(NbtList::Compound(v))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nbt;

    #[test]
    fn test_integer_widening() {
        let compound = nbt! {
            "b" => 3i8,
            "s" => -7i16,
            "i" => 70_000i32,
            "l" => 1i64 << 40,
            "f" => NbtValue::Float(1.5),
        };

        assert_eq!(compound.get_long("b"), Some(3));
        assert_eq!(compound.get_int("s"), Some(-7));
        assert_eq!(compound.get_int("i"), Some(70_000));
        // Too wide for i32
        assert_eq!(compound.get_int("l"), None);
        assert_eq!(compound.get_long("l"), Some(1 << 40));
        assert_eq!(compound.get_long("f"), None);
        assert_eq!(compound.get_long("missing"), None);
    }

    #[test]
    fn test_insert_replaces() {
        let mut compound = nbt! { "k" => 1i32 };
        compound.insert("k", 2i32);
        assert_eq!(compound.len(), 1);
        assert_eq!(compound.get_int("k"), Some(2));
    }

    #[test]
    fn test_nested_access() {
        let compound = nbt! {
            "storage" => nbt! {
                "current_item" => nbt! { "id" => "minecraft:stone" },
            },
        };

        let item = compound
            .get_compound("storage")
            .and_then(|s| s.get_compound("current_item"))
            .unwrap();
        assert_eq!(item.get_str("id"), Some("minecraft:stone"));
        assert!(compound.get_compound("missing").is_none());
        assert!(compound.get_list("storage").is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(NbtValue::Short(263).to_string(), "263");
        assert_eq!(NbtValue::from("minecraft:coal").to_string(), "minecraft:coal");
    }

    #[test]
    fn test_compound_list_from_vec() {
        let value = NbtValue::from(Vec::<NbtCompound>::new());
        assert_eq!(value, NbtValue::List(NbtList::Empty));

        let value = NbtValue::from(vec![nbt! { "a" => 1i32 }]);
        match value {
            NbtValue::List(list) => assert_eq!(list.compounds().len(), 1),
            other => panic!("expected list, got {other:?}"),
        }
    }
}
