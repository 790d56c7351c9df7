//! Assembly of grammar sub-results into tree nodes.
//!
//! Sequence helpers work on owned `Vec`s while a rule is being built; the
//! final node materializes them into arena lists. Optional repetitions that
//! matched nothing are [`MaybeSeq::Absent`], never an empty stand-in.

mod calls;
mod names;
mod pairs;
mod targets;


pub use calls::{
    augoperator, class_def_decorators, delete_starred_exprs, extract_starred_exprs,
    function_def_decorators, KeywordOrStarred,
};
pub use names::{alias_for_star, count_dots, join_dotted, map_names_to_ids};
pub use pairs::{
    cmpop_expr_pair, compare, get_cmpops, get_exprs, get_keys, get_values, key_value_pair,
    CmpopExprPair, KeyValuePair,
};
pub use targets::{as_assignment_target, expr_name, invalid_target, retag_context, TargetKind};

/// Result of an optional repetition: absent, or the items it matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaybeSeq<T> {
    Absent,
    Present(Vec<T>),
}

impl<T> From<Option<Vec<T>>> for MaybeSeq<T> {
    fn from(items: Option<Vec<T>>) -> Self {
        match items {
            None => MaybeSeq::Absent,
            Some(items) => MaybeSeq::Present(items),
        }
    }
}

impl<T> From<Vec<T>> for MaybeSeq<T> {
    fn from(items: Vec<T>) -> Self {
        MaybeSeq::Present(items)
    }
}

pub fn singleton<T>(item: T) -> Vec<T> {
    vec![item]
}

/// `item` followed by `seq`. Prepending to an absent sequence is a singleton.
pub fn prepend<T>(item: T, seq: MaybeSeq<T>) -> Vec<T> {
    match seq {
        MaybeSeq::Absent => singleton(item),
        MaybeSeq::Present(rest) => {
            let mut items = Vec::with_capacity(rest.len() + 1);
            items.push(item);
            items.extend(rest);
            items
        }
    }
}

/// Concatenate the present sequences in order; absent ones contribute nothing.
pub fn flatten<T>(seqs: impl IntoIterator<Item = MaybeSeq<T>>) -> Vec<T> {
    let mut items = Vec::new();
    for seq in seqs {
        if let MaybeSeq::Present(inner) = seq {
            items.extend(inner);
        }
    }
    items
}

pub fn seq_get_head<T: Copy>(seq: &[T], default: T) -> T {
    seq.first().copied().unwrap_or(default)
}

pub fn seq_get_last<T: Copy>(seq: &[T], default: T) -> T {
    seq.last().copied().unwrap_or(default)
}
