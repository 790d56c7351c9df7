#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use pyrite_diagnostic::ErrorCode;
use pyrite_ir::dump::dump as dump_tree;

use crate::tests::{dump, syntax_error, with_options, with_parser};
use crate::{ParseOptions, StartRule};

fn eval(source: &str) -> String {
    dump(source, StartRule::Eval)
}

fn file(source: &str) -> String {
    dump(source, StartRule::File)
}

fn file_error(source: &str) -> String {
    syntax_error(source, StartRule::File).message
}

fn module(stmts: &str) -> String {
    format!("Module(body=[{stmts}], type_ignores=[])")
}

// Expressions

#[test]
fn test_precedence() {
    assert_eq!(
        eval("1+2*3"),
        "Expression(body=BinOp(left=Constant(value=1), op=Add(), right=BinOp(left=Constant(value=2), op=Mult(), right=Constant(value=3))))"
    );
}

#[test]
fn test_binary_operators_fold_left() {
    assert_eq!(
        eval("a - b - c"),
        "Expression(body=BinOp(left=BinOp(left=Name(id='a', ctx=Load()), op=Sub(), right=Name(id='b', ctx=Load())), op=Sub(), right=Name(id='c', ctx=Load())))"
    );
}

#[test]
fn test_power_binds_unary_operand() {
    assert_eq!(
        eval("2**-1"),
        "Expression(body=BinOp(left=Constant(value=2), op=Pow(), right=UnaryOp(op=USub(), operand=Constant(value=1))))"
    );
}

#[test]
fn test_comparison_chain() {
    assert_eq!(
        eval("a < b <= c"),
        "Expression(body=Compare(left=Name(id='a', ctx=Load()), ops=[Lt(), LtE()], comparators=[Name(id='b', ctx=Load()), Name(id='c', ctx=Load())]))"
    );
    assert_eq!(
        eval("a not in b"),
        "Expression(body=Compare(left=Name(id='a', ctx=Load()), ops=[NotIn()], comparators=[Name(id='b', ctx=Load())]))"
    );
}

#[test]
fn test_boolean_operators() {
    assert_eq!(
        eval("not a and b or c"),
        "Expression(body=BoolOp(op=Or(), values=[BoolOp(op=And(), values=[UnaryOp(op=Not(), operand=Name(id='a', ctx=Load())), Name(id='b', ctx=Load())]), Name(id='c', ctx=Load())]))"
    );
}

#[test]
fn test_conditional_expression() {
    assert_eq!(
        eval("a if b else c"),
        "Expression(body=IfExp(test=Name(id='b', ctx=Load()), body=Name(id='a', ctx=Load()), orelse=Name(id='c', ctx=Load())))"
    );
}

#[test]
fn test_walrus() {
    assert_eq!(
        eval("(y := 1)"),
        "Expression(body=NamedExpr(target=Name(id='y', ctx=Store()), value=Constant(value=1)))"
    );
    assert_eq!(
        syntax_error("(a.b := 1)", StartRule::Eval).message,
        "cannot use assignment expressions with attribute"
    );
}

#[test]
fn test_call_arguments() {
    assert_eq!(
        eval("f(a, *b, k=1, **d)"),
        "Expression(body=Call(func=Name(id='f', ctx=Load()), args=[Name(id='a', ctx=Load()), Starred(value=Name(id='b', ctx=Load()), ctx=Load())], keywords=[keyword(arg='k', value=Constant(value=1)), keyword(value=Name(id='d', ctx=Load()))]))"
    );
}

#[test]
fn test_starred_after_keyword_joins_positional() {
    assert_eq!(
        eval("f(k=1, *b)"),
        "Expression(body=Call(func=Name(id='f', ctx=Load()), args=[Starred(value=Name(id='b', ctx=Load()), ctx=Load())], keywords=[keyword(arg='k', value=Constant(value=1))]))"
    );
}

#[test]
fn test_call_argument_order_errors() {
    let cases = [
        ("f(k=1, a)", "positional argument follows keyword argument"),
        (
            "f(**k, a)",
            "positional argument follows keyword argument unpacking",
        ),
        (
            "f(**k, *a)",
            "iterable argument unpacking follows keyword argument unpacking",
        ),
        (
            "f(a.b=1)",
            "expression cannot contain assignment, perhaps you meant \"==\"?",
        ),
    ];
    for (source, message) in cases {
        assert_eq!(syntax_error(source, StartRule::Eval).message, message, "{source}");
    }
}

#[test]
fn test_subscript_slices() {
    assert_eq!(
        eval("a[1:2, ::3]"),
        "Expression(body=Subscript(value=Name(id='a', ctx=Load()), slice=Tuple(elts=[Slice(lower=Constant(value=1), upper=Constant(value=2)), Slice(step=Constant(value=3))], ctx=Load()), ctx=Load()))"
    );
    assert_eq!(
        eval("a.b[0]"),
        "Expression(body=Subscript(value=Attribute(value=Name(id='a', ctx=Load()), attr='b', ctx=Load()), slice=Constant(value=0), ctx=Load()))"
    );
}

#[test]
fn test_displays() {
    assert_eq!(
        eval("{1: 2, **d}"),
        "Expression(body=Dict(keys=[Constant(value=1), None], values=[Constant(value=2), Name(id='d', ctx=Load())]))"
    );
    assert_eq!(
        eval("{1, 2}"),
        "Expression(body=Set(elts=[Constant(value=1), Constant(value=2)]))"
    );
    assert_eq!(eval("{}"), "Expression(body=Dict(keys=[], values=[]))");
    assert_eq!(eval("[]"), "Expression(body=List(elts=[], ctx=Load()))");
    assert_eq!(eval("()"), "Expression(body=Tuple(elts=[], ctx=Load()))");
    assert_eq!(
        eval("1, 2"),
        "Expression(body=Tuple(elts=[Constant(value=1), Constant(value=2)], ctx=Load()))"
    );
}

#[test]
fn test_starred_group_rejected() {
    assert_eq!(
        syntax_error("(*a)", StartRule::Eval).message,
        "can't use starred expression here"
    );
}

#[test]
fn test_string_concatenation() {
    assert_eq!(eval("'a' 'b'"), "Expression(body=Constant(value='ab'))");
    assert_eq!(eval("u'x'"), "Expression(body=Constant(value='x', kind='u'))");
    assert_eq!(eval("b'a' b'b'"), "Expression(body=Constant(value=b'ab'))");
    assert_eq!(
        syntax_error("'a' b'b'", StartRule::Eval).message,
        "cannot mix bytes and nonbytes literals"
    );
}

#[test]
fn test_fstring_conversion_and_nested_spec() {
    assert_eq!(
        eval("f\"{x!r:>{w}}\""),
        "Expression(body=JoinedStr(values=[FormattedValue(value=Name(id='x', ctx=Load()), conversion=114, format_spec=JoinedStr(values=[Constant(value='>'), FormattedValue(value=Name(id='w', ctx=Load()), conversion=-1)]))]))"
    );
}

#[test]
fn test_fstring_single_closing_brace() {
    let error = syntax_error("f\"a}b\"", StartRule::Eval);
    assert_eq!(error.message, "f-string: single '}' is not allowed");
    assert_eq!(error.code, ErrorCode::E1003);
}

// Statements

#[test]
fn test_assignment_chain() {
    assert_eq!(
        file("x = y = 1\n"),
        module("Assign(targets=[Name(id='x', ctx=Store()), Name(id='y', ctx=Store())], value=Constant(value=1))")
    );
    assert_eq!(
        file("a, *b = c\n"),
        module("Assign(targets=[Tuple(elts=[Name(id='a', ctx=Store()), Starred(value=Name(id='b', ctx=Store()), ctx=Store())], ctx=Store())], value=Name(id='c', ctx=Load()))")
    );
}

#[test]
fn test_augmented_assignment() {
    assert_eq!(
        file("x += 1\n"),
        module("AugAssign(target=Name(id='x', ctx=Store()), op=Add(), value=Constant(value=1))")
    );
    assert_eq!(
        file_error("a + 1 += 2\n"),
        "'operator' is an illegal expression for augmented assignment"
    );
}

#[test]
fn test_annotated_assignment() {
    assert_eq!(
        file("x: int\n"),
        module("AnnAssign(target=Name(id='x', ctx=Store()), annotation=Name(id='int', ctx=Load()), simple=1)")
    );
    assert_eq!(
        file("a.b: int = 1\n"),
        module("AnnAssign(target=Attribute(value=Name(id='a', ctx=Load()), attr='b', ctx=Store()), annotation=Name(id='int', ctx=Load()), value=Constant(value=1), simple=0)")
    );
    assert_eq!(
        file("[x]: int\n"),
        module("AnnAssign(target=Name(id='x', ctx=Store()), annotation=Name(id='int', ctx=Load()), simple=0)")
    );
}

#[test]
fn test_annotated_tuple_target_yields_placeholder() {
    with_parser("(a, b): int = 1\n", |p| {
        let root = p.parse_start(StartRule::File).unwrap();
        assert!(!p.is_halted());
        assert_eq!(
            dump_tree(p.arena(), &p.session().interner, root),
            module("AnnAssign(target=Name(id='', ctx=Store()), annotation=Name(id='int', ctx=Load()), value=Constant(value=1), simple=0)")
        );
        let failure = p.take_error().unwrap();
        let error = failure.as_syntax().unwrap();
        assert_eq!(
            error.message,
            "only a single target (not tuple) can be annotated"
        );
        assert_eq!(error.line, 1);
    });
    assert_eq!(
        file_error("(a, b): int = 1\n"),
        "only a single target (not tuple) can be annotated"
    );
}

#[test]
fn test_invalid_assignment_targets() {
    let cases = [
        ("1 = x\n", "cannot assign to literal"),
        ("f() = 1\n", "cannot assign to function call"),
        ("a, b + 1 = c\n", "cannot assign to operator"),
        (
            "*a = 1\n",
            "starred assignment target must be in a list or tuple",
        ),
        ("del f()\n", "cannot delete function call"),
    ];
    for (source, message) in cases {
        let error = syntax_error(source, StartRule::File);
        assert_eq!(error.message, message, "{source}");
        assert_eq!(error.code, ErrorCode::E1002);
    }
}

#[test]
fn test_del_targets() {
    assert_eq!(
        file("del a, b[0]\n"),
        module("Delete(targets=[Name(id='a', ctx=Del()), Subscript(value=Name(id='b', ctx=Load()), slice=Constant(value=0), ctx=Del())])")
    );
}

#[test]
fn test_global_and_nonlocal() {
    assert_eq!(
        file("global a, b\nnonlocal c\n"),
        module("Global(names=['a', 'b']), Nonlocal(names=['c'])")
    );
}

#[test]
fn test_statement_groups_keep_order() {
    assert_eq!(
        file("x = 1; y = 2\nif a:\n    pass\nz\n"),
        module(concat!(
            "Assign(targets=[Name(id='x', ctx=Store())], value=Constant(value=1)), ",
            "Assign(targets=[Name(id='y', ctx=Store())], value=Constant(value=2)), ",
            "If(test=Name(id='a', ctx=Load()), body=[Pass()], orelse=[]), ",
            "Expr(value=Name(id='z', ctx=Load()))"
        ))
    );
}

#[test]
fn test_simple_statements_on_one_line() {
    assert_eq!(
        file("pass; break; continue;\n"),
        module("Pass(), Break(), Continue()")
    );
    assert_eq!(file("return\n"), module("Return()"));
}

#[test]
fn test_imports() {
    assert_eq!(
        file("import a.b as c, d\n"),
        module("Import(names=[alias(name='a.b', asname='c'), alias(name='d')])")
    );
    assert_eq!(
        file("from ..m import (x as y, z,)\n"),
        module("ImportFrom(module='m', names=[alias(name='x', asname='y'), alias(name='z')], level=2)")
    );
    assert_eq!(
        file("from . import *\n"),
        module("ImportFrom(names=[alias(name='*')], level=1)")
    );
    assert_eq!(
        file("from ...pkg.sub import a\n"),
        module("ImportFrom(module='pkg.sub', names=[alias(name='a')], level=3)")
    );
}

#[test]
fn test_import_trailing_comma() {
    assert_eq!(
        file_error("from m import a,\n"),
        "trailing comma not allowed without surrounding parentheses"
    );
}

#[test]
fn test_function_definition() {
    let source = "def f(a, b=1, *args, c, d=2, **kw) -> int:\n    return a\n";
    assert_eq!(
        file(source),
        module(concat!(
            "FunctionDef(name='f', args=arguments(posonlyargs=[], args=[arg(arg='a'), arg(arg='b')], ",
            "vararg=arg(arg='args'), kwonlyargs=[arg(arg='c'), arg(arg='d')], ",
            "kw_defaults=[None, Constant(value=2)], kwarg=arg(arg='kw'), defaults=[Constant(value=1)]), ",
            "body=[Return(value=Name(id='a', ctx=Load()))], decorator_list=[], returns=Name(id='int', ctx=Load()))"
        ))
    );
}

#[test]
fn test_positional_only_parameters() {
    assert_eq!(
        file("def f(a, /, b: int): pass\n"),
        module(concat!(
            "FunctionDef(name='f', args=arguments(posonlyargs=[arg(arg='a')], ",
            "args=[arg(arg='b', annotation=Name(id='int', ctx=Load()))], kwonlyargs=[], ",
            "kw_defaults=[], defaults=[]), body=[Pass()], decorator_list=[])"
        ))
    );
}

#[test]
fn test_decorated_function() {
    assert_eq!(
        file("@dec\n@mod.wrap(1)\ndef f(): pass\n"),
        module(concat!(
            "FunctionDef(name='f', args=arguments(posonlyargs=[], args=[], kwonlyargs=[], ",
            "kw_defaults=[], defaults=[]), body=[Pass()], decorator_list=[Name(id='dec', ctx=Load()), ",
            "Call(func=Attribute(value=Name(id='mod', ctx=Load()), attr='wrap', ctx=Load()), ",
            "args=[Constant(value=1)], keywords=[])])"
        ))
    );
}

#[test]
fn test_parameter_errors() {
    let cases = [
        (
            "def f(a=1, b): pass\n",
            "non-default argument follows default argument",
        ),
        ("def f(*): pass\n", "named arguments must follow bare *"),
        ("def f(*, **k): pass\n", "named arguments must follow bare *"),
    ];
    for (source, message) in cases {
        assert_eq!(file_error(source), message, "{source}");
    }
}

#[test]
fn test_class_definition() {
    assert_eq!(
        file("class C(B, metaclass=M):\n    x = 1\n"),
        module(concat!(
            "ClassDef(name='C', bases=[Name(id='B', ctx=Load())], ",
            "keywords=[keyword(arg='metaclass', value=Name(id='M', ctx=Load()))], ",
            "body=[Assign(targets=[Name(id='x', ctx=Store())], value=Constant(value=1))], decorator_list=[])"
        ))
    );
    assert_eq!(
        file("class C: pass\n"),
        module("ClassDef(name='C', bases=[], keywords=[], body=[Pass()], decorator_list=[])")
    );
}

#[test]
fn test_if_elif_else() {
    let source = "if a:\n    pass\nelif b:\n    pass\nelse:\n    pass\n";
    assert_eq!(
        file(source),
        module(concat!(
            "If(test=Name(id='a', ctx=Load()), body=[Pass()], orelse=[",
            "If(test=Name(id='b', ctx=Load()), body=[Pass()], orelse=[Pass()])])"
        ))
    );
}

#[test]
fn test_while_else() {
    assert_eq!(
        file("while x:\n    break\nelse:\n    continue\n"),
        module("While(test=Name(id='x', ctx=Load()), body=[Break()], orelse=[Continue()])")
    );
}

#[test]
fn test_nested_blocks() {
    let source = "if a:\n    while b:\n        x = 1\n    y = 2\nz = 3\n";
    assert_eq!(
        file(source),
        module(concat!(
            "If(test=Name(id='a', ctx=Load()), body=[",
            "While(test=Name(id='b', ctx=Load()), body=[Assign(targets=[Name(id='x', ctx=Store())], value=Constant(value=1))], orelse=[]), ",
            "Assign(targets=[Name(id='y', ctx=Store())], value=Constant(value=2))], orelse=[]), ",
            "Assign(targets=[Name(id='z', ctx=Store())], value=Constant(value=3))"
        ))
    );
}

#[test]
fn test_expected_indented_block() {
    let error = syntax_error("if x:\npass\n", StartRule::File);
    assert_eq!(error.message, "expected an indented block");
    assert_eq!(error.line, 2);
}

#[test]
fn test_generic_error_uses_character_columns() {
    let error = syntax_error("x = 'é' + )\n", StartRule::File);
    assert_eq!(error.message, "invalid syntax");
    assert_eq!(error.line, 1);
    assert_eq!(error.column, 11);
}

#[test]
fn test_empty_file() {
    assert_eq!(file(""), module(""));
}

// Start rules

#[test]
fn test_interactive() {
    assert_eq!(
        dump("x = 1\n", StartRule::Interactive),
        "Interactive(body=[Assign(targets=[Name(id='x', ctx=Store())], value=Constant(value=1))])"
    );
    assert_eq!(
        dump("if x: pass\n", StartRule::Interactive),
        "Interactive(body=[If(test=Name(id='x', ctx=Load()), body=[Pass()], orelse=[])])"
    );
    assert_eq!(dump("", StartRule::Interactive), "Interactive(body=[])");
}

#[test]
fn test_nesting_limit() {
    let options = ParseOptions::default().with_max_depth(3);
    let failure = with_options("((((1))))", options, |p| p.run(StartRule::Eval)).unwrap_err();
    let error = failure.as_syntax().unwrap();
    assert_eq!(error.message, "too many nested expressions");
    assert_eq!(error.code, ErrorCode::E1005);

    let options = ParseOptions::default().with_max_depth(50);
    assert!(with_options("((((1))))", options, |p| p.run(StartRule::Eval)).is_ok());
}
