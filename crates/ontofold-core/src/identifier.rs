//! Identifier management using string interning for efficient storage and comparison
//!
//! Every model element, view and shape carries an [`Id`]. Ids are `Copy`, so the
//! abstraction engine can pass them around as cheap node handles.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};
use uuid::Uuid;

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Efficient identifier type using string interning
///
/// # Examples
///
/// ```
/// use ontofold_core::identifier::Id;
///
/// let class_id = Id::new("class_person");
/// let shape_id = class_id.with_suffix("_shape");
/// assert_eq!(shape_id, "class_person_shape");
///
/// // Fresh identities for copied elements
/// let fresh = Id::generate();
/// assert_ne!(fresh, Id::generate());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Examples
    ///
    /// ```
    /// use ontofold_core::identifier::Id;
    ///
    /// let id = Id::new("rel_1");
    /// assert_eq!(id, "rel_1");
    /// ```
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Generates a new, globally unique identifier.
    ///
    /// Used whenever an element is copied into an abstraction so that the copy
    /// never aliases an element of the original project.
    pub fn generate() -> Self {
        Self::new(&Uuid::new_v4().simple().to_string())
    }

    /// Creates a derived ID by appending `suffix` to this identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use ontofold_core::identifier::Id;
    ///
    /// let relation = Id::new("r1");
    /// assert_eq!(relation.with_suffix("_prop0"), "r1_prop0");
    /// ```
    pub fn with_suffix(&self, suffix: &str) -> Self {
        with_interner(|interner| {
            let base = interner
                .resolve(self.0)
                .expect("Base ID should exist in interner");
            let derived = format!("{base}{suffix}");
            Self(interner.get_or_intern(&derived))
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_string()
        });
        write!(f, "{value}")
    }
}

impl std::str::FromStr for Id {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                == other
        })
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::new(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("Person");
        let id2 = Id::new("Person");
        let id3 = Id::new("Company");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "Person");
    }

    #[test]
    fn test_generate_is_unique() {
        let ids: Vec<Id> = (0..100).map(|_| Id::generate()).collect();
        let unique: std::collections::HashSet<Id> = ids.iter().copied().collect();

        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_with_suffix() {
        let id = Id::new("view_1");

        assert_eq!(id.with_suffix("_shape"), "view_1_shape");
        assert_eq!(id.with_suffix(""), id);
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("display_test");
        assert_eq!(format!("{id}"), "display_test");
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("Engine");

        assert!(id == "Engine");
        assert!(id != "engine");

        let name = String::from("Engine");
        assert!(id == name.as_str());
    }

    #[test]
    fn test_serde_as_plain_string() {
        let id = Id::new("c_42");

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"c_42\"");

        let back: Id = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(Id::new("key1"), "value1");
        map.insert(Id::new("key2"), "value2");

        assert_eq!(map.get(&Id::new("key1")), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }
}
