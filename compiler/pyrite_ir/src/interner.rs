//! String interner owned by a single parse.
//!
//! Every identifier and decoded string constant of a parse lives here, so the
//! interner is dropped together with the arena when the parse result goes away.

use super::Name;
use rustc_hash::FxHashMap;
use std::fmt;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// More than `u32::MAX` distinct strings.
    Overflow { count: usize },
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "interner exceeded capacity: {count} strings, max is {}",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

/// Deduplicating string table handing out [`Name`] handles.
pub struct StringInterner {
    /// Map from string content to index.
    map: FxHashMap<Box<str>, u32>,
    /// Storage for string contents, indexed by `Name`.
    strings: Vec<Box<str>>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned as [`Name::EMPTY`].
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        map.insert(Box::<str>::from(""), 0);
        StringInterner {
            map,
            strings: vec![Box::from("")],
        }
    }

    /// Intern a string, returning its `Name` or an error on overflow.
    pub fn try_intern(&mut self, s: &str) -> Result<Name, InternError> {
        if let Some(&index) = self.map.get(s) {
            return Ok(Name::new(index));
        }
        let index = u32::try_from(self.strings.len()).map_err(|_| InternError::Overflow {
            count: self.strings.len(),
        })?;
        self.strings.push(Box::from(s));
        self.map.insert(Box::from(s), index);
        Ok(Name::new(index))
    }

    /// Intern a string.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&mut self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the string for a `Name`. Unknown names resolve to `""`.
    pub fn lookup(&self, name: Name) -> &str {
        self.strings.get(name.index()).map_or("", |s| s)
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.strings.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_deduplicates() {
        let mut interner = StringInterner::new();
        let a = interner.intern("spam");
        let b = interner.intern("eggs");
        let c = interner.intern("spam");
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(interner.lookup(a), "spam");
        assert_eq!(interner.len(), 3);
    }

    #[test]
    fn test_empty_is_preinterned() {
        let mut interner = StringInterner::new();
        assert!(interner.is_empty());
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.lookup(Name::EMPTY), "");
    }

    #[test]
    fn test_unicode_round_trip() {
        let mut interner = StringInterner::new();
        let name = interner.intern("naïve_π");
        assert_eq!(interner.lookup(name), "naïve_π");
    }

    #[test]
    fn test_lookup_unknown_name() {
        let interner = StringInterner::new();
        assert_eq!(interner.lookup(Name::new(99)), "");
    }
}
