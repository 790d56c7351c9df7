//! Serialized textual form of a syntax tree.
//!
//! Produces the `Node(field=value, ...)` shape familiar from Python's
//! `ast.dump`: optional fields that are absent are omitted, sequences are
//! printed as `[...]`, strings and bytes use Python `repr` quoting.

use crate::ast::{Alias, Arg, Constant, ExprKind, KeywordArg, Mod, StmtKind};
use crate::{ArgId, ArgumentsId, AstArena, ExprId, IdRange, Name, StmtId, StringInterner};
use std::fmt::Write;

/// Render a module root as text.
pub fn dump(arena: &AstArena, interner: &StringInterner, root: Mod) -> String {
    let mut dumper = Dumper::new(arena, interner);
    dumper.module(root);
    dumper.out
}

/// Render a single expression as text.
pub fn dump_expr(arena: &AstArena, interner: &StringInterner, id: ExprId) -> String {
    let mut dumper = Dumper::new(arena, interner);
    dumper.expr(id);
    dumper.out
}

/// Render a single statement as text.
pub fn dump_stmt(arena: &AstArena, interner: &StringInterner, id: StmtId) -> String {
    let mut dumper = Dumper::new(arena, interner);
    dumper.stmt(id);
    dumper.out
}

/// Field writer for one `Node(...)` call.
///
/// Tracks whether a separator is needed before the next field.
struct Fields {
    first: bool,
}

struct Dumper<'a> {
    arena: &'a AstArena,
    interner: &'a StringInterner,
    out: String,
}

impl<'a> Dumper<'a> {
    fn new(arena: &'a AstArena, interner: &'a StringInterner) -> Self {
        Dumper {
            arena,
            interner,
            out: String::new(),
        }
    }

    fn open(&mut self, name: &str) -> Fields {
        self.out.push_str(name);
        self.out.push('(');
        Fields { first: true }
    }

    fn close(&mut self) {
        self.out.push(')');
    }

    fn field(&mut self, fields: &mut Fields, name: &str) {
        if !fields.first {
            self.out.push_str(", ");
        }
        fields.first = false;
        self.out.push_str(name);
        self.out.push('=');
    }

    fn unit(&mut self, name: &str) {
        self.out.push_str(name);
        self.out.push_str("()");
    }

    fn str_field(&mut self, fields: &mut Fields, name: &str, value: Name) {
        self.field(fields, name);
        let text = self.interner.lookup(value);
        push_str_repr(&mut self.out, text);
    }

    fn int_field(&mut self, fields: &mut Fields, name: &str, value: i64) {
        self.field(fields, name);
        let _ = write!(self.out, "{value}");
    }

    fn expr_field(&mut self, fields: &mut Fields, name: &str, id: ExprId) {
        self.field(fields, name);
        self.expr(id);
    }

    /// Optional child: omitted entirely when absent.
    fn opt_expr_field(&mut self, fields: &mut Fields, name: &str, id: ExprId) {
        if id.is_valid() {
            self.expr_field(fields, name, id);
        }
    }

    fn expr_list_field(&mut self, fields: &mut Fields, name: &str, range: IdRange<ExprId>) {
        self.field(fields, name);
        self.out.push('[');
        for (i, &id) in self.arena.expr_list(range).iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            if id.is_valid() {
                self.expr(id);
            } else {
                self.out.push_str("None");
            }
        }
        self.out.push(']');
    }

    fn stmt_list_field(&mut self, fields: &mut Fields, name: &str, range: IdRange<StmtId>) {
        self.field(fields, name);
        self.out.push('[');
        for (i, &id) in self.arena.stmt_list(range).iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.stmt(id);
        }
        self.out.push(']');
    }

    fn arg_list_field(&mut self, fields: &mut Fields, name: &str, range: IdRange<ArgId>) {
        self.field(fields, name);
        self.out.push('[');
        for (i, &id) in self.arena.arg_list(range).iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.arg(*self.arena.arg(id));
        }
        self.out.push(']');
    }

    fn keyword_list_field(&mut self, fields: &mut Fields, name: &str, range: IdRange<KeywordArg>) {
        self.field(fields, name);
        self.out.push('[');
        for (i, keyword) in self.arena.keyword_list(range).iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            let mut f = self.open("keyword");
            if let Some(arg) = keyword.arg {
                self.str_field(&mut f, "arg", arg);
            }
            self.expr_field(&mut f, "value", keyword.value);
            self.close();
        }
        self.out.push(']');
    }

    fn alias_list_field(&mut self, fields: &mut Fields, name: &str, range: IdRange<Alias>) {
        self.field(fields, name);
        self.out.push('[');
        for (i, alias) in self.arena.alias_list(range).iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            let mut f = self.open("alias");
            self.str_field(&mut f, "name", alias.name);
            if let Some(asname) = alias.asname {
                self.str_field(&mut f, "asname", asname);
            }
            self.close();
        }
        self.out.push(']');
    }

    fn name_list_field(&mut self, fields: &mut Fields, name: &str, range: IdRange<Name>) {
        self.field(fields, name);
        self.out.push('[');
        for (i, &id) in self.arena.name_list(range).iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            push_str_repr(&mut self.out, self.interner.lookup(id));
        }
        self.out.push(']');
    }

    fn arg(&mut self, arg: Arg) {
        let mut f = self.open("arg");
        self.str_field(&mut f, "arg", arg.arg);
        self.opt_expr_field(&mut f, "annotation", arg.annotation);
        self.close();
    }

    fn opt_arg_field(&mut self, fields: &mut Fields, name: &str, id: ArgId) {
        if id.is_valid() {
            self.field(fields, name);
            self.arg(*self.arena.arg(id));
        }
    }

    fn arguments(&mut self, id: ArgumentsId) {
        let a = *self.arena.arguments(id);
        let mut f = self.open("arguments");
        self.arg_list_field(&mut f, "posonlyargs", a.posonlyargs);
        self.arg_list_field(&mut f, "args", a.args);
        self.opt_arg_field(&mut f, "vararg", a.vararg);
        self.arg_list_field(&mut f, "kwonlyargs", a.kwonlyargs);
        self.expr_list_field(&mut f, "kw_defaults", a.kw_defaults);
        self.opt_arg_field(&mut f, "kwarg", a.kwarg);
        self.expr_list_field(&mut f, "defaults", a.defaults);
        self.close();
    }

    fn module(&mut self, root: Mod) {
        match root {
            Mod::Module { body } => {
                let mut f = self.open("Module");
                self.stmt_list_field(&mut f, "body", body);
                self.field(&mut f, "type_ignores");
                self.out.push_str("[]");
                self.close();
            }
            Mod::Interactive { body } => {
                let mut f = self.open("Interactive");
                self.stmt_list_field(&mut f, "body", body);
                self.close();
            }
            Mod::Expression { body } => {
                let mut f = self.open("Expression");
                self.expr_field(&mut f, "body", body);
                self.close();
            }
        }
    }

    fn stmt(&mut self, id: StmtId) {
        let kind = self.arena.stmt(id).kind;
        let mut f = self.open(kind.type_name());
        match kind {
            StmtKind::FunctionDef {
                name,
                args,
                body,
                decorators,
                returns,
            } => {
                self.str_field(&mut f, "name", name);
                self.field(&mut f, "args");
                self.arguments(args);
                self.stmt_list_field(&mut f, "body", body);
                self.expr_list_field(&mut f, "decorator_list", decorators);
                self.opt_expr_field(&mut f, "returns", returns);
            }
            StmtKind::ClassDef {
                name,
                bases,
                keywords,
                body,
                decorators,
            } => {
                self.str_field(&mut f, "name", name);
                self.expr_list_field(&mut f, "bases", bases);
                self.keyword_list_field(&mut f, "keywords", keywords);
                self.stmt_list_field(&mut f, "body", body);
                self.expr_list_field(&mut f, "decorator_list", decorators);
            }
            StmtKind::Return { value } => self.opt_expr_field(&mut f, "value", value),
            StmtKind::Delete { targets } => self.expr_list_field(&mut f, "targets", targets),
            StmtKind::Assign { targets, value } => {
                self.expr_list_field(&mut f, "targets", targets);
                self.expr_field(&mut f, "value", value);
            }
            StmtKind::AugAssign { target, op, value } => {
                self.expr_field(&mut f, "target", target);
                self.field(&mut f, "op");
                self.unit(op.name());
                self.expr_field(&mut f, "value", value);
            }
            StmtKind::AnnAssign {
                target,
                annotation,
                value,
                simple,
            } => {
                self.expr_field(&mut f, "target", target);
                self.expr_field(&mut f, "annotation", annotation);
                self.opt_expr_field(&mut f, "value", value);
                self.int_field(&mut f, "simple", i64::from(simple));
            }
            StmtKind::While { test, body, orelse } | StmtKind::If { test, body, orelse } => {
                self.expr_field(&mut f, "test", test);
                self.stmt_list_field(&mut f, "body", body);
                self.stmt_list_field(&mut f, "orelse", orelse);
            }
            StmtKind::Import { names } => self.alias_list_field(&mut f, "names", names),
            StmtKind::ImportFrom {
                module,
                names,
                level,
            } => {
                if let Some(module) = module {
                    self.str_field(&mut f, "module", module);
                }
                self.alias_list_field(&mut f, "names", names);
                self.int_field(&mut f, "level", i64::from(level));
            }
            StmtKind::Global { names } | StmtKind::Nonlocal { names } => {
                self.name_list_field(&mut f, "names", names);
            }
            StmtKind::Expr { value } => self.expr_field(&mut f, "value", value),
            StmtKind::Pass | StmtKind::Break | StmtKind::Continue => {}
        }
        self.close();
    }

    fn expr(&mut self, id: ExprId) {
        let kind = *self.arena.expr_kind(id);
        let mut f = self.open(kind.type_name());
        match kind {
            ExprKind::BoolOp { op, values } => {
                self.field(&mut f, "op");
                self.unit(op.name());
                self.expr_list_field(&mut f, "values", values);
            }
            ExprKind::NamedExpr { target, value } => {
                self.expr_field(&mut f, "target", target);
                self.expr_field(&mut f, "value", value);
            }
            ExprKind::BinOp { left, op, right } => {
                self.expr_field(&mut f, "left", left);
                self.field(&mut f, "op");
                self.unit(op.name());
                self.expr_field(&mut f, "right", right);
            }
            ExprKind::UnaryOp { op, operand } => {
                self.field(&mut f, "op");
                self.unit(op.name());
                self.expr_field(&mut f, "operand", operand);
            }
            ExprKind::IfExp { test, body, orelse } => {
                self.expr_field(&mut f, "test", test);
                self.expr_field(&mut f, "body", body);
                self.expr_field(&mut f, "orelse", orelse);
            }
            ExprKind::Dict { keys, values } => {
                self.expr_list_field(&mut f, "keys", keys);
                self.expr_list_field(&mut f, "values", values);
            }
            ExprKind::Set { elts } => self.expr_list_field(&mut f, "elts", elts),
            ExprKind::Await { value } => self.expr_field(&mut f, "value", value),
            ExprKind::Compare {
                left,
                ops,
                comparators,
            } => {
                self.expr_field(&mut f, "left", left);
                self.field(&mut f, "ops");
                self.out.push('[');
                for (i, op) in self.arena.cmp_op_list(ops).iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.unit(op.name());
                }
                self.out.push(']');
                self.expr_list_field(&mut f, "comparators", comparators);
            }
            ExprKind::Call {
                func,
                args,
                keywords,
            } => {
                self.expr_field(&mut f, "func", func);
                self.expr_list_field(&mut f, "args", args);
                self.keyword_list_field(&mut f, "keywords", keywords);
            }
            ExprKind::FormattedValue {
                value,
                conversion,
                format_spec,
            } => {
                self.expr_field(&mut f, "value", value);
                self.int_field(&mut f, "conversion", i64::from(conversion.code()));
                self.opt_expr_field(&mut f, "format_spec", format_spec);
            }
            ExprKind::JoinedStr { values } => self.expr_list_field(&mut f, "values", values),
            ExprKind::Constant { value, kind } => {
                self.field(&mut f, "value");
                self.constant(value);
                if let Some(kind) = kind {
                    self.str_field(&mut f, "kind", kind);
                }
            }
            ExprKind::Attribute { value, attr, ctx } => {
                self.expr_field(&mut f, "value", value);
                self.str_field(&mut f, "attr", attr);
                self.field(&mut f, "ctx");
                self.unit(ctx.name());
            }
            ExprKind::Subscript { value, slice, ctx } => {
                self.expr_field(&mut f, "value", value);
                self.expr_field(&mut f, "slice", slice);
                self.field(&mut f, "ctx");
                self.unit(ctx.name());
            }
            ExprKind::Starred { value, ctx } => {
                self.expr_field(&mut f, "value", value);
                self.field(&mut f, "ctx");
                self.unit(ctx.name());
            }
            ExprKind::Name { id, ctx } => {
                self.str_field(&mut f, "id", id);
                self.field(&mut f, "ctx");
                self.unit(ctx.name());
            }
            ExprKind::List { elts, ctx } | ExprKind::Tuple { elts, ctx } => {
                self.expr_list_field(&mut f, "elts", elts);
                self.field(&mut f, "ctx");
                self.unit(ctx.name());
            }
            ExprKind::Slice { lower, upper, step } => {
                self.opt_expr_field(&mut f, "lower", lower);
                self.opt_expr_field(&mut f, "upper", upper);
                self.opt_expr_field(&mut f, "step", step);
            }
        }
        self.close();
    }

    fn constant(&mut self, value: Constant) {
        match value {
            Constant::None => self.out.push_str("None"),
            Constant::True => self.out.push_str("True"),
            Constant::False => self.out.push_str("False"),
            Constant::Ellipsis => self.out.push_str("Ellipsis"),
            Constant::Int(v) => {
                let _ = write!(self.out, "{v}");
            }
            Constant::BigInt(text) => self.out.push_str(self.interner.lookup(text)),
            Constant::Float(v) => push_float_repr(&mut self.out, v),
            Constant::Complex(v) => {
                let mut text = String::new();
                push_float_repr(&mut text, v);
                if let Some(stripped) = text.strip_suffix(".0") {
                    self.out.push_str(stripped);
                } else {
                    self.out.push_str(&text);
                }
                self.out.push('j');
            }
            Constant::Str(text) => push_str_repr(&mut self.out, self.interner.lookup(text)),
            Constant::Bytes(id) => push_bytes_repr(&mut self.out, self.arena.bytes(id)),
        }
    }
}

/// Python-style `repr` of a string.
pub fn push_str_repr(out: &mut String, text: &str) {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let code = u32::from(c);
                let _ = if code <= 0xff {
                    write!(out, "\\x{code:02x}")
                } else if code <= 0xffff {
                    write!(out, "\\u{code:04x}")
                } else {
                    write!(out, "\\U{code:08x}")
                };
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

/// Python-style `repr` of a bytes value.
pub fn push_bytes_repr(out: &mut String, bytes: &[u8]) {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };
    out.push('b');
    out.push(char::from(quote));
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b == quote => {
                out.push('\\');
                out.push(char::from(b));
            }
            0x20..=0x7e => out.push(char::from(b)),
            b => {
                let _ = write!(out, "\\x{b:02x}");
            }
        }
    }
    out.push(char::from(quote));
}

/// Python-style `repr` of a float: shortest round-trip digits, exponent form
/// outside `1e-4 <= |v| < 1e16`.
pub fn push_float_repr(out: &mut String, value: f64) {
    if value.is_nan() {
        out.push_str("nan");
        return;
    }
    if value.is_infinite() {
        out.push_str(if value > 0.0 { "inf" } else { "-inf" });
        return;
    }
    let sci = format!("{value:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if value != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        let _ = write!(out, "{mantissa}e{sign}{:02}", exponent.abs());
        return;
    }
    let plain = format!("{value}");
    out.push_str(&plain);
    if !plain.contains('.') {
        out.push_str(".0");
    }
}
