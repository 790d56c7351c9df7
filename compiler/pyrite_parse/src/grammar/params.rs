//! Function parameter lists.
//!
//! Each alternative of `parameters` fills some of the optional groups of a
//! [`SignatureParts`]; `make_arguments` folds them into the canonical
//! parameter list.

use pyrite_diagnostic::ErrorCode;
use pyrite_ir::ast::Arg;
use pyrite_ir::{ArgId, ArgumentsId, ExprId, TokenKind};

use crate::signature::{
    make_arguments, name_default_pair, slash_with_default, star_etc, NameDefaultPair,
    SignatureParts, SlashWithDefault, StarEtc,
};
use crate::Parser;

impl Parser<'_> {
    /// `params: invalid_parameters | parameters`
    pub(super) fn params(&mut self) -> Option<ArgumentsId> {
        if self.lookahead(true, Self::invalid_parameters) {
            return self.raise_syntax_error(
                ErrorCode::E1001,
                "non-default argument follows default argument",
            );
        }
        let parts = self.parameters()?;
        Some(make_arguments(self, parts))
    }

    /// ```text
    /// parameters:
    ///     | slash_no_default param_no_default* param_with_default* [star_etc]
    ///     | slash_with_default param_with_default* [star_etc]
    ///     | param_no_default+ param_with_default* [star_etc]
    ///     | param_with_default+ [star_etc]
    ///     | star_etc
    /// ```
    fn parameters(&mut self) -> Option<SignatureParts> {
        let mark = self.mark();

        if let Some(slash) = self.slash_no_default() {
            let plain = self.repeat(Self::param_no_default);
            let defaults = self.repeat(Self::param_with_default);
            let star = self.maybe(Self::star_etc);
            return Some(SignatureParts {
                slash_without_default: Some(slash),
                plain_names: Some(plain),
                names_with_default: Some(defaults),
                star_etc: star,
                ..SignatureParts::default()
            });
        }
        self.reset(mark);

        if let Some(slash) = self.slash_with_default() {
            let defaults = self.repeat(Self::param_with_default);
            let star = self.maybe(Self::star_etc);
            return Some(SignatureParts {
                slash_with_default: Some(slash),
                names_with_default: Some(defaults),
                star_etc: star,
                ..SignatureParts::default()
            });
        }
        self.reset(mark);

        let plain = self.repeat(Self::param_no_default);
        if !plain.is_empty() {
            let defaults = self.repeat(Self::param_with_default);
            let star = self.maybe(Self::star_etc);
            return Some(SignatureParts {
                plain_names: Some(plain),
                names_with_default: Some(defaults),
                star_etc: star,
                ..SignatureParts::default()
            });
        }

        let defaults = self.repeat(Self::param_with_default);
        if !defaults.is_empty() {
            let star = self.maybe(Self::star_etc);
            return Some(SignatureParts {
                names_with_default: Some(defaults),
                star_etc: star,
                ..SignatureParts::default()
            });
        }

        let star = self.star_etc()?;
        Some(SignatureParts {
            star_etc: Some(star),
            ..SignatureParts::default()
        })
    }

    /// `param_no_default* (slash_with_default | param_with_default+) param_no_default`
    fn invalid_parameters(&mut self) -> Option<()> {
        self.repeat(Self::param_no_default);
        let mark = self.mark();
        if self.slash_with_default().is_none() {
            self.reset(mark);
            if self.repeat(Self::param_with_default).is_empty() {
                return None;
            }
        }
        self.param_no_default().map(drop)
    }

    /// `slash_no_default: param_no_default+ '/' (',' | &')')`
    fn slash_no_default(&mut self) -> Option<Vec<ArgId>> {
        let names = self.repeat(Self::param_no_default);
        if names.is_empty() {
            return None;
        }
        self.expect(TokenKind::Slash)?;
        self.param_end()?;
        Some(names)
    }

    /// `slash_with_default: param_no_default* param_with_default+ '/' (',' | &')')`
    fn slash_with_default(&mut self) -> Option<SlashWithDefault> {
        let plain = self.repeat(Self::param_no_default);
        let defaults = self.repeat(Self::param_with_default);
        if defaults.is_empty() {
            return None;
        }
        self.expect(TokenKind::Slash)?;
        self.param_end()?;
        Some(slash_with_default(plain, defaults))
    }

    /// ```text
    /// star_etc:
    ///     | '*' param_no_default param_maybe_default* [kwds]
    ///     | '*' ',' param_maybe_default+ [kwds]
    ///     | kwds
    /// ```
    ///
    /// A bare `*` followed by `)`, `,)` or `,**` is an error.
    fn star_etc(&mut self) -> Option<StarEtc> {
        if self.expect(TokenKind::Star).is_none() {
            let kwarg = self.kwds()?;
            return Some(star_etc(None, Vec::new(), Some(kwarg)));
        }
        let after_star = self.mark();

        if let Some(vararg) = self.param_no_default() {
            let kwonly = self.repeat(Self::param_maybe_default);
            let kwarg = self.maybe(Self::kwds);
            return Some(star_etc(Some(vararg), kwonly, kwarg));
        }
        self.reset(after_star);

        if self.expect(TokenKind::Comma).is_some() {
            let kwonly = self.repeat(Self::param_maybe_default);
            if !kwonly.is_empty() {
                let kwarg = self.maybe(Self::kwds);
                return Some(star_etc(None, kwonly, kwarg));
            }
        }
        self.reset(after_star);

        let bare = self.lookahead_kind(true, TokenKind::RPar)
            || self.lookahead(true, |p| {
                p.expect(TokenKind::Comma)?;
                let next = p.peek_kind()?;
                matches!(next, TokenKind::RPar | TokenKind::DoubleStar).then_some(())
            });
        if bare {
            return self.raise_syntax_error(ErrorCode::E1001, "named arguments must follow bare *");
        }
        None
    }

    /// `kwds: '**' param_no_default`
    fn kwds(&mut self) -> Option<ArgId> {
        self.expect(TokenKind::DoubleStar)?;
        self.param_no_default()
    }

    /// `param_no_default: param (',' | &')')`
    fn param_no_default(&mut self) -> Option<ArgId> {
        let arg = self.param()?;
        self.param_end()?;
        Some(arg)
    }

    /// `param_with_default: param default (',' | &')')`
    fn param_with_default(&mut self) -> Option<NameDefaultPair> {
        let arg = self.param()?;
        let value = self.default()?;
        self.param_end()?;
        Some(name_default_pair(arg, Some(value)))
    }

    /// `param_maybe_default: param [default] (',' | &')')`
    fn param_maybe_default(&mut self) -> Option<NameDefaultPair> {
        let arg = self.param()?;
        let value = self.maybe(Self::default);
        self.param_end()?;
        Some(name_default_pair(arg, value))
    }

    /// `param: NAME [':' expression]`
    fn param(&mut self) -> Option<ArgId> {
        let start = self.mark();
        let (arg, _) = self.expect_name()?;
        let annotation = if self.expect(TokenKind::Colon).is_some() {
            self.expression()?
        } else {
            ExprId::INVALID
        };
        let loc = self.location_from(start);
        Some(self.arena_mut().alloc_arg(Arg {
            arg,
            annotation,
            loc,
        }))
    }

    /// `default: '=' expression`
    fn default(&mut self) -> Option<ExprId> {
        self.expect(TokenKind::Equal)?;
        self.expression()
    }

    fn param_end(&mut self) -> Option<()> {
        if self.expect(TokenKind::Comma).is_some() {
            return Some(());
        }
        self.lookahead_kind(true, TokenKind::RPar).then_some(())
    }

    /// `rule*`, stopping with the cursor after the last match.
    pub(super) fn repeat<T>(&mut self, rule: fn(&mut Self) -> Option<T>) -> Vec<T> {
        let mut items = Vec::new();
        loop {
            let mark = self.mark();
            match rule(self) {
                Some(item) => items.push(item),
                None => {
                    self.reset(mark);
                    return items;
                }
            }
        }
    }

    /// `[rule]`, with the cursor restored when it does not match.
    pub(super) fn maybe<T>(&mut self, rule: fn(&mut Self) -> Option<T>) -> Option<T> {
        let mark = self.mark();
        let result = rule(self);
        if result.is_none() {
            self.reset(mark);
        }
        result
    }
}
