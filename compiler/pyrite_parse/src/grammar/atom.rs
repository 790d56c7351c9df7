//! Primaries and atoms: trailers, displays, strings, call arguments and
//! subscripts.

use pyrite_diagnostic::ErrorCode;
use pyrite_ir::ast::{Constant, ExprContext, ExprKind, KeywordArg};
use pyrite_ir::{ExprId, IdRange, Token, TokenKind};
use smallvec::SmallVec;

use super::keywords as kw;
use super::rules;
use crate::combinators::{
    delete_starred_exprs, extract_starred_exprs, get_keys, get_values, key_value_pair,
    KeyValuePair, KeywordOrStarred,
};
use crate::literal::concatenate_strings;
use crate::Parser;

/// Arguments of a call or class header.
#[derive(Copy, Clone, Debug, Default)]
pub(super) struct CallArguments {
    pub(super) args: IdRange<ExprId>,
    pub(super) keywords: IdRange<KeywordArg>,
}

impl Parser<'_> {
    /// ```text
    /// primary:
    ///     | primary '.' NAME
    ///     | primary '(' [arguments] ')'
    ///     | primary '[' slices ']'
    ///     | atom
    /// ```
    pub(super) fn primary(&mut self) -> Option<ExprId> {
        self.memoized(rules::PRIMARY, |p| {
            let start = p.mark();
            let mut value = p.atom()?;
            while let Some(kind) = p.peek_kind() {
                let mark = p.mark();
                let trailer = match kind {
                    TokenKind::Dot => p.attribute_trailer(value, start),
                    TokenKind::LPar => p.call_trailer(value, start),
                    TokenKind::LSqb => p.subscript_trailer(value, start),
                    _ => break,
                };
                let Some(next) = trailer else {
                    p.reset(mark);
                    break;
                };
                value = next;
            }
            Some(value)
        })
    }

    fn attribute_trailer(&mut self, value: ExprId, start: usize) -> Option<ExprId> {
        self.expect(TokenKind::Dot)?;
        let (attr, _) = self.expect_name()?;
        let loc = self.location_from(start);
        Some(self.alloc_expr(
            ExprKind::Attribute {
                value,
                attr,
                ctx: ExprContext::Load,
            },
            loc,
        ))
    }

    fn call_trailer(&mut self, func: ExprId, start: usize) -> Option<ExprId> {
        self.expect(TokenKind::LPar)?;
        let CallArguments { args, keywords } = self.arguments()?;
        self.expect(TokenKind::RPar)?;
        let loc = self.location_from(start);
        Some(self.alloc_expr(
            ExprKind::Call {
                func,
                args,
                keywords,
            },
            loc,
        ))
    }

    fn subscript_trailer(&mut self, value: ExprId, start: usize) -> Option<ExprId> {
        self.expect(TokenKind::LSqb)?;
        let slice = self.slices()?;
        self.expect(TokenKind::RSqb)?;
        let loc = self.location_from(start);
        Some(self.alloc_expr(
            ExprKind::Subscript {
                value,
                slice,
                ctx: ExprContext::Load,
            },
            loc,
        ))
    }

    /// `slices: slice !',' | ','.slice+ [',']`
    fn slices(&mut self) -> Option<ExprId> {
        self.comma_tuple(Self::slice)
    }

    /// `slice: [expression] ':' [expression] [':' [expression]] | expression`
    fn slice(&mut self) -> Option<ExprId> {
        let start = self.mark();
        let lower = self.optional(Self::expression);
        if self.expect(TokenKind::Colon).is_none() {
            return lower.is_valid().then_some(lower);
        }
        let upper = self.optional(Self::expression);
        let step = if self.expect(TokenKind::Colon).is_some() {
            self.optional(Self::expression)
        } else {
            ExprId::INVALID
        };
        let loc = self.location_from(start);
        Some(self.alloc_expr(ExprKind::Slice { lower, upper, step }, loc))
    }

    /// `[rule]`: the match, or `INVALID` with the cursor restored.
    pub(super) fn optional(&mut self, rule: fn(&mut Self) -> Option<ExprId>) -> ExprId {
        let mark = self.mark();
        rule(self).unwrap_or_else(|| {
            self.reset(mark);
            ExprId::INVALID
        })
    }

    /// ```text
    /// atom:
    ///     | NAME
    ///     | 'True' | 'False' | 'None'
    ///     | strings
    ///     | NUMBER
    ///     | (tuple | group)
    ///     | list
    ///     | (dict | set)
    ///     | '...'
    /// ```
    fn atom(&mut self) -> Option<ExprId> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::Name => self.name_token(),
            TokenKind::Keyword(kw::TRUE) => self.constant_token(token, Constant::True),
            TokenKind::Keyword(kw::FALSE) => self.constant_token(token, Constant::False),
            TokenKind::Keyword(kw::NONE) => self.constant_token(token, Constant::None),
            TokenKind::Ellipsis => self.constant_token(token, Constant::Ellipsis),
            TokenKind::String => self.strings(),
            TokenKind::Number => self.number_token(),
            TokenKind::LPar => self.tuple_or_group(),
            TokenKind::LSqb => self.list(),
            TokenKind::LBrace => self.dict_or_set(),
            _ => None,
        }
    }

    fn constant_token(&mut self, token: Token, value: Constant) -> Option<ExprId> {
        self.expect(token.kind)?;
        let loc = self.token_location(&token);
        Some(self.alloc_expr(ExprKind::Constant { value, kind: None }, loc))
    }

    /// `strings: STRING+`
    fn strings(&mut self) -> Option<ExprId> {
        self.memoized(rules::STRINGS, |p| {
            let mut tokens: SmallVec<[Token; 4]> = SmallVec::new();
            while let Some(token) = p.string_token() {
                tokens.push(token);
            }
            if tokens.is_empty() {
                return None;
            }
            concatenate_strings(p, &tokens)
        })
    }

    /// ```text
    /// tuple: '(' [star_named_expression ',' [star_named_expressions]] ')'
    /// group: '(' named_expression ')'
    /// ```
    fn tuple_or_group(&mut self) -> Option<ExprId> {
        let start = self.mark();
        self.expect(TokenKind::LPar)?;
        if self.expect(TokenKind::RPar).is_some() {
            return Some(self.tuple_node(Vec::new(), start));
        }
        let first = self.star_named_expression()?;
        if self.expect(TokenKind::RPar).is_some() {
            if matches!(self.expr_kind(first), ExprKind::Starred { .. }) {
                return self.raise_error_at_node(
                    ErrorCode::E1001,
                    "can't use starred expression here",
                    first,
                );
            }
            return Some(first);
        }
        self.expect(TokenKind::Comma)?;
        let mut elts = vec![first];
        if !self.lookahead_kind(true, TokenKind::RPar) {
            elts.extend(self.star_named_expressions()?);
        }
        self.expect(TokenKind::RPar)?;
        Some(self.tuple_node(elts, start))
    }

    /// `list: '[' [star_named_expressions] ']'`
    fn list(&mut self) -> Option<ExprId> {
        let start = self.mark();
        self.expect(TokenKind::LSqb)?;
        let elts = if self.lookahead_kind(true, TokenKind::RSqb) {
            Vec::new()
        } else {
            self.star_named_expressions()?
        };
        self.expect(TokenKind::RSqb)?;
        let elts = self.arena_mut().alloc_expr_list(elts);
        let loc = self.location_from(start);
        Some(self.alloc_expr(
            ExprKind::List {
                elts,
                ctx: ExprContext::Load,
            },
            loc,
        ))
    }

    /// ```text
    /// dict: '{' [double_starred_kvpairs] '}'
    /// set: '{' star_named_expressions '}'
    /// ```
    fn dict_or_set(&mut self) -> Option<ExprId> {
        let start = self.mark();
        self.expect(TokenKind::LBrace)?;
        let inner = self.mark();
        if let Some(pairs) = self.double_starred_kvpairs() {
            if self.expect(TokenKind::RBrace).is_some() {
                let arena = self.arena_mut();
                let keys = arena.alloc_expr_list(get_keys(&pairs));
                let values = arena.alloc_expr_list(get_values(&pairs));
                let loc = self.location_from(start);
                return Some(self.alloc_expr(ExprKind::Dict { keys, values }, loc));
            }
        }
        self.reset(inner);
        let elts = self.star_named_expressions()?;
        self.expect(TokenKind::RBrace)?;
        let elts = self.arena_mut().alloc_expr_list(elts);
        let loc = self.location_from(start);
        Some(self.alloc_expr(ExprKind::Set { elts }, loc))
    }

    /// `double_starred_kvpairs: ','.double_starred_kvpair+ [',']`, or nothing
    /// before the closing brace.
    fn double_starred_kvpairs(&mut self) -> Option<Vec<KeyValuePair>> {
        let mut pairs = Vec::new();
        while !self.lookahead_kind(true, TokenKind::RBrace) {
            pairs.push(self.double_starred_kvpair()?);
            if self.expect(TokenKind::Comma).is_none() {
                break;
            }
        }
        Some(pairs)
    }

    /// `double_starred_kvpair: '**' bitwise_or | expression ':' expression`
    fn double_starred_kvpair(&mut self) -> Option<KeyValuePair> {
        if self.expect(TokenKind::DoubleStar).is_some() {
            let value = self.bitwise_or()?;
            return Some(key_value_pair(None, value));
        }
        let key = self.expression()?;
        self.expect(TokenKind::Colon)?;
        let value = self.expression()?;
        Some(key_value_pair(Some(key), value))
    }

    /// ```text
    /// arguments: args [','] &')'
    /// args: ','.(starred_expression | named_expression !'=')+ [',' kwargs] | kwargs
    /// kwargs: ','.(NAME '=' expression | starred_expression | '**' expression)+
    /// ```
    ///
    /// Starred items after the first keyword join the positional list in
    /// order; the rest of that section becomes keywords.
    pub(super) fn arguments(&mut self) -> Option<CallArguments> {
        let mut args: Vec<ExprId> = Vec::new();
        let mut kwargs: Vec<KeywordOrStarred> = Vec::new();
        let mut seen_double_star = false;
        while !self.lookahead_kind(true, TokenKind::RPar) {
            let start = self.mark();
            if self.lookahead(true, |p| {
                p.expect(TokenKind::Name)?;
                p.expect(TokenKind::Equal)
            }) {
                let (name, _) = self.expect_name()?;
                self.expect(TokenKind::Equal)?;
                let value = self.expression()?;
                let loc = self.location_from(start);
                kwargs.push(KeywordOrStarred::Keyword(KeywordArg {
                    arg: Some(name),
                    value,
                    loc,
                }));
            } else if self.expect(TokenKind::DoubleStar).is_some() {
                let value = self.expression()?;
                let loc = self.location_from(start);
                kwargs.push(KeywordOrStarred::Keyword(KeywordArg {
                    arg: None,
                    value,
                    loc,
                }));
                seen_double_star = true;
            } else if self.lookahead_kind(true, TokenKind::Star) {
                if seen_double_star {
                    return self.raise_syntax_error(
                        ErrorCode::E1001,
                        "iterable argument unpacking follows keyword argument unpacking",
                    );
                }
                let value = self.starred(Self::expression)?;
                if kwargs.is_empty() {
                    args.push(value);
                } else {
                    kwargs.push(KeywordOrStarred::Starred(value));
                }
            } else {
                let value = self.named_expression()?;
                if self.lookahead_kind(true, TokenKind::Equal) {
                    return self.raise_error_at_node(
                        ErrorCode::E1001,
                        "expression cannot contain assignment, perhaps you meant \"==\"?",
                        value,
                    );
                }
                if !kwargs.is_empty() {
                    let message = if seen_double_star {
                        "positional argument follows keyword argument unpacking"
                    } else {
                        "positional argument follows keyword argument"
                    };
                    return self.raise_error_at_node(ErrorCode::E1001, message, value);
                }
                args.push(value);
            }
            if self.expect(TokenKind::Comma).is_none() {
                break;
            }
        }
        if !self.lookahead_kind(true, TokenKind::RPar) {
            return None;
        }
        args.extend(extract_starred_exprs(&kwargs).unwrap_or_default());
        let keywords = delete_starred_exprs(&kwargs).unwrap_or_default();
        let arena = self.arena_mut();
        Some(CallArguments {
            args: arena.alloc_expr_list(args),
            keywords: arena.alloc_keyword_list(keywords),
        })
    }
}
