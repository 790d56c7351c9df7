//! Typed handles into the [`AstArena`](crate::AstArena).
//!
//! - `ExprId(u32)`/`StmtId(u32)`/... instead of `Box<Expr>`: 4-byte handles,
//!   O(1) equality, contiguous storage
//! - [`IdRange`] for child sequences (start + length into a side table)
//!
//! Optional children use the `INVALID` sentinel of the handle type.

use std::fmt;
use std::marker::PhantomData;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Sentinel for an absent child.
            pub const INVALID: $name = $name(u32::MAX);

            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }

            /// `None` for the `INVALID` sentinel.
            #[inline]
            pub const fn get(self) -> Option<Self> {
                if self.is_valid() {
                    Some(self)
                } else {
                    None
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", stringify!($name), self.0)
                } else {
                    write!(f, "{}::INVALID", stringify!($name))
                }
            }
        }
    };
}

define_id!(
    /// Index into the expression table.
    ExprId
);
define_id!(
    /// Index into the statement table.
    StmtId
);
define_id!(
    /// Index into the parameter table.
    ArgId
);
define_id!(
    /// Index into the parameter-list table.
    ArgumentsId
);
define_id!(
    /// Index into the bytes-constant table.
    BytesId
);

/// Range of items in one of the arena's flattened side tables.
///
/// The type parameter only records which table the range points into.
pub struct IdRange<T> {
    pub start: u32,
    pub len: u32,
    marker: PhantomData<fn() -> T>,
}

impl<T> IdRange<T> {
    /// Empty range.
    pub const EMPTY: IdRange<T> = IdRange::new(0, 0);

    #[inline]
    pub const fn new(start: u32, len: u32) -> Self {
        IdRange {
            start,
            len,
            marker: PhantomData,
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..(self.start as usize + self.len as usize)
    }
}

impl<T> Copy for IdRange<T> {}

impl<T> Clone for IdRange<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for IdRange<T> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.len == other.len
    }
}

impl<T> Eq for IdRange<T> {}

impl<T> std::hash::Hash for IdRange<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.len.hash(state);
    }
}

impl<T> Default for IdRange<T> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<T> fmt::Debug for IdRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdRange({}..{})", self.start, self.start + self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_id_sentinel() {
        assert!(ExprId::new(0).is_valid());
        assert!(!ExprId::INVALID.is_valid());
        assert_eq!(ExprId::default(), ExprId::INVALID);
        assert_eq!(ExprId::INVALID.get(), None);
        assert_eq!(ExprId::new(3).get(), Some(ExprId::new(3)));
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", StmtId::new(7)), "StmtId(7)");
        assert_eq!(format!("{:?}", ArgId::INVALID), "ArgId::INVALID");
    }

    #[test]
    fn test_range() {
        let range: IdRange<ExprId> = IdRange::new(4, 3);
        assert_eq!(range.len(), 3);
        assert_eq!(range.to_range(), 4..7);
        assert!(IdRange::<ExprId>::EMPTY.is_empty());
    }
}
