//! Stack growth for recursive-descent rule functions.
//!
//! Grammar rules recurse once per nesting level of the input (`((((x))))`,
//! `a[b[c[d]]]`, nested f-string replacement fields). The parser caps the
//! logical depth with its own limit; this crate keeps the physical stack
//! from running out before that limit is reached.
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: passthrough.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// close to exhaustion.
///
/// ```text
/// fn nested<T>(&mut self, body: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
///     ensure_sufficient_stack(|| body(self))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mimics a rule that recurses once per open bracket.
    fn nesting_depth(input: &[u8]) -> usize {
        ensure_sufficient_stack(|| match input.split_first() {
            Some((b'(', rest)) => 1 + nesting_depth(rest),
            _ => 0,
        })
    }

    #[test]
    fn test_shallow_nesting() {
        assert_eq!(nesting_depth(b"(((x)))"), 3);
    }

    #[test]
    fn test_deep_nesting_grows_stack() {
        let input = vec![b'('; 200_000];
        assert_eq!(nesting_depth(&input), 200_000);
    }

    #[test]
    fn test_passes_through_option() {
        let result: Option<u32> = ensure_sufficient_stack(|| Some(7));
        assert_eq!(result, Some(7));
    }
}
