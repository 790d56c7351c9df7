#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use pyrite_ir::{ArgId, ExprId};

use super::*;

fn args(range: std::ops::Range<u32>) -> Vec<ArgId> {
    range.map(ArgId::new).collect()
}

fn pairs(range: std::ops::Range<u32>) -> Vec<NameDefaultPair> {
    range
        .map(|i| name_default_pair(ArgId::new(i), Some(ExprId::new(i))))
        .collect()
}

#[test]
fn test_all_absent_is_empty() {
    assert_eq!(assemble(SignatureParts::default()), AssembledArguments::default());
}

#[test]
fn test_slash_without_default() {
    // def f(a, b, /, c, d=1)
    let assembled = assemble(SignatureParts {
        slash_without_default: Some(args(0..2)),
        plain_names: Some(args(2..3)),
        names_with_default: Some(pairs(3..4)),
        ..SignatureParts::default()
    });
    assert_eq!(assembled.posonlyargs, args(0..2));
    assert_eq!(assembled.args, args(2..4));
    assert_eq!(assembled.defaults, vec![ExprId::new(3)]);
}

#[test]
fn test_slash_with_default() {
    // def f(a, b=1, /, c=2)
    let assembled = assemble(SignatureParts {
        slash_with_default: Some(slash_with_default(args(0..1), pairs(1..2))),
        names_with_default: Some(pairs(2..3)),
        ..SignatureParts::default()
    });
    assert_eq!(assembled.posonlyargs, args(0..2));
    assert_eq!(assembled.args, args(2..3));
    assert_eq!(assembled.defaults, vec![ExprId::new(1), ExprId::new(2)]);
}

#[test]
fn test_star_etc_kw_defaults_parallel() {
    // def f(*args, a, b=1, **kw)
    let assembled = assemble(SignatureParts {
        star_etc: Some(star_etc(
            Some(ArgId::new(0)),
            vec![
                name_default_pair(ArgId::new(1), None),
                name_default_pair(ArgId::new(2), Some(ExprId::new(7))),
            ],
            Some(ArgId::new(3)),
        )),
        ..SignatureParts::default()
    });
    assert_eq!(assembled.vararg, Some(ArgId::new(0)));
    assert_eq!(assembled.kwonlyargs, args(1..3));
    assert_eq!(assembled.kw_defaults, vec![ExprId::INVALID, ExprId::new(7)]);
    assert_eq!(assembled.kwarg, Some(ArgId::new(3)));
    assert!(assembled.args.is_empty());
}

/// One of the three defined presence states of a two-group row.
#[derive(Clone, Copy, Debug)]
enum Row {
    First,
    Second,
    Neither,
}

fn row() -> impl Strategy<Value = Row> {
    prop_oneof![Just(Row::First), Just(Row::Second), Just(Row::Neither)]
}

proptest! {
    #[test]
    fn test_decision_table_is_total(
        slash in row(),
        positional in row(),
        plain_len in 0u32..4,
        default_len in 1u32..4,
        with_star in any::<bool>(),
        kwonly_len in 0u32..3,
    ) {
        let mut next = 0u32;
        let mut take = |len: u32| {
            let range = next..next + len;
            next += len;
            range
        };
        let mut parts = SignatureParts::default();
        let mut expect_posonly = 0;
        let mut expect_args = 0;
        let mut expect_defaults = 0;
        match slash {
            Row::First => {
                parts.slash_without_default = Some(args(take(plain_len.max(1))));
                expect_posonly = plain_len.max(1) as usize;
            }
            Row::Second => {
                let plain = args(take(plain_len));
                let defaulted = pairs(take(default_len));
                parts.slash_with_default = Some(slash_with_default(plain, defaulted));
                expect_posonly = (plain_len + default_len) as usize;
                expect_defaults += default_len as usize;
            }
            Row::Neither => {}
        }
        match positional {
            Row::First => {
                parts.plain_names = Some(args(take(plain_len.max(1))));
                expect_args = plain_len.max(1) as usize;
            }
            Row::Second => {
                parts.names_with_default = Some(pairs(take(default_len)));
                expect_args = default_len as usize;
                expect_defaults += default_len as usize;
            }
            Row::Neither => {}
        }
        if with_star {
            parts.star_etc = Some(star_etc(None, pairs(take(kwonly_len)), None));
        }

        let assembled = assemble(parts);
        prop_assert_eq!(assembled.posonlyargs.len(), expect_posonly);
        prop_assert_eq!(assembled.args.len(), expect_args);
        prop_assert_eq!(assembled.defaults.len(), expect_defaults);
        prop_assert!(assembled.defaults.len() <= assembled.posonlyargs.len() + assembled.args.len());
        prop_assert_eq!(assembled.kwonlyargs.len(), assembled.kw_defaults.len());
        prop_assert_eq!(assembled.kwonlyargs.len(), if with_star { kwonly_len as usize } else { 0 });
    }
}
