//! Function signature assembly.
//!
//! The parameter grammar recognizes up to five independent optional groups:
//! positional-only names without defaults, positional-only names with
//! defaults, plain positional names, positional names with defaults, and the
//! `*`/keyword-only/`**` bundle. [`assemble`] folds whichever groups are
//! present into the canonical [`Arguments`] shape, where every list exists
//! (possibly empty).

#[cfg(test)]
mod tests;

use pyrite_ir::ast::Arguments;
use pyrite_ir::{ArgId, ArgumentsId, ExprId};

use crate::Parser;

/// A parameter and its default. `value` is `None` only for keyword-only
/// parameters declared without one.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NameDefaultPair {
    pub arg: ArgId,
    pub value: Option<ExprId>,
}

pub fn name_default_pair(arg: ArgId, value: Option<ExprId>) -> NameDefaultPair {
    NameDefaultPair { arg, value }
}

/// Positional-only group that ends in defaulted names: `a, b=1, /`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SlashWithDefault {
    pub plain_names: Vec<ArgId>,
    pub names_with_defaults: Vec<NameDefaultPair>,
}

pub fn slash_with_default(
    plain_names: Vec<ArgId>,
    names_with_defaults: Vec<NameDefaultPair>,
) -> SlashWithDefault {
    SlashWithDefault {
        plain_names,
        names_with_defaults,
    }
}

/// `*args, kwonly..., **kwargs`, each part optional.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct StarEtc {
    pub vararg: Option<ArgId>,
    pub kwonlyargs: Vec<NameDefaultPair>,
    pub kwarg: Option<ArgId>,
}

pub fn star_etc(
    vararg: Option<ArgId>,
    kwonlyargs: Vec<NameDefaultPair>,
    kwarg: Option<ArgId>,
) -> StarEtc {
    StarEtc {
        vararg,
        kwonlyargs,
        kwarg,
    }
}

/// The optional groups one parameter-list alternative matched.
///
/// The grammar never fills both positional-only groups at once.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SignatureParts {
    pub slash_without_default: Option<Vec<ArgId>>,
    pub slash_with_default: Option<SlashWithDefault>,
    pub plain_names: Option<Vec<ArgId>>,
    pub names_with_default: Option<Vec<NameDefaultPair>>,
    pub star_etc: Option<StarEtc>,
}

/// Canonical parameter lists before they are moved into the arena.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AssembledArguments {
    pub posonlyargs: Vec<ArgId>,
    pub args: Vec<ArgId>,
    /// Defaults of the trailing names of `posonlyargs ++ args`.
    pub defaults: Vec<ExprId>,
    pub vararg: Option<ArgId>,
    pub kwonlyargs: Vec<ArgId>,
    /// Parallel to `kwonlyargs`; `ExprId::INVALID` where there is no default.
    pub kw_defaults: Vec<ExprId>,
    pub kwarg: Option<ArgId>,
}

fn names_of(pairs: &[NameDefaultPair]) -> impl Iterator<Item = ArgId> + '_ {
    pairs.iter().map(|pair| pair.arg)
}

fn defaults_of(pairs: &[NameDefaultPair]) -> impl Iterator<Item = ExprId> + '_ {
    pairs
        .iter()
        .map(|pair| pair.value.unwrap_or(ExprId::INVALID))
}

/// Fold the matched groups into canonical lists.
pub fn assemble(parts: SignatureParts) -> AssembledArguments {
    let SignatureParts {
        slash_without_default,
        slash_with_default,
        plain_names,
        names_with_default,
        star_etc,
    } = parts;

    let posonlyargs = match (slash_without_default, &slash_with_default) {
        (Some(names), _) => names,
        (None, Some(group)) => group
            .plain_names
            .iter()
            .copied()
            .chain(names_of(&group.names_with_defaults))
            .collect(),
        (None, None) => Vec::new(),
    };

    let args = match (plain_names, &names_with_default) {
        (Some(plain), Some(pairs)) => plain.into_iter().chain(names_of(pairs)).collect(),
        (Some(plain), None) => plain,
        (None, Some(pairs)) => names_of(pairs).collect(),
        (None, None) => Vec::new(),
    };

    let mut defaults = Vec::new();
    if let Some(group) = &slash_with_default {
        defaults.extend(defaults_of(&group.names_with_defaults));
    }
    if let Some(pairs) = &names_with_default {
        defaults.extend(defaults_of(pairs));
    }

    let StarEtc {
        vararg,
        kwonlyargs,
        kwarg,
    } = star_etc.unwrap_or_default();

    AssembledArguments {
        posonlyargs,
        args,
        defaults,
        vararg,
        kw_defaults: defaults_of(&kwonlyargs).collect(),
        kwonlyargs: names_of(&kwonlyargs).collect(),
        kwarg,
    }
}

/// Assemble `parts` and allocate the resulting parameter list.
pub fn make_arguments(p: &mut Parser<'_>, parts: SignatureParts) -> ArgumentsId {
    let assembled = assemble(parts);
    let arena = p.arena_mut();
    let arguments = Arguments {
        posonlyargs: arena.alloc_arg_list(assembled.posonlyargs),
        args: arena.alloc_arg_list(assembled.args),
        vararg: assembled.vararg.unwrap_or(ArgId::INVALID),
        kwonlyargs: arena.alloc_arg_list(assembled.kwonlyargs),
        kw_defaults: arena.alloc_expr_list(assembled.kw_defaults),
        kwarg: assembled.kwarg.unwrap_or(ArgId::INVALID),
        defaults: arena.alloc_expr_list(assembled.defaults),
    };
    arena.alloc_arguments(arguments)
}

/// Parameter list of a function declared with no parameters.
pub fn empty_arguments(p: &mut Parser<'_>) -> ArgumentsId {
    make_arguments(p, SignatureParts::default())
}
