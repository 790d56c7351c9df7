//! Python reserved words.

use pyrite_ir::Keyword;

use crate::KeywordTable;

pub const FALSE: Keyword = Keyword::new(500);
pub const NONE: Keyword = Keyword::new(501);
pub const TRUE: Keyword = Keyword::new(502);
pub const AND: Keyword = Keyword::new(503);
pub const AS: Keyword = Keyword::new(504);
pub const ASSERT: Keyword = Keyword::new(505);
pub const ASYNC: Keyword = Keyword::new(506);
pub const AWAIT: Keyword = Keyword::new(507);
pub const BREAK: Keyword = Keyword::new(508);
pub const CLASS: Keyword = Keyword::new(509);
pub const CONTINUE: Keyword = Keyword::new(510);
pub const DEF: Keyword = Keyword::new(511);
pub const DEL: Keyword = Keyword::new(512);
pub const ELIF: Keyword = Keyword::new(513);
pub const ELSE: Keyword = Keyword::new(514);
pub const EXCEPT: Keyword = Keyword::new(515);
pub const FINALLY: Keyword = Keyword::new(516);
pub const FOR: Keyword = Keyword::new(517);
pub const FROM: Keyword = Keyword::new(518);
pub const GLOBAL: Keyword = Keyword::new(519);
pub const IF: Keyword = Keyword::new(520);
pub const IMPORT: Keyword = Keyword::new(521);
pub const IN: Keyword = Keyword::new(522);
pub const IS: Keyword = Keyword::new(523);
pub const LAMBDA: Keyword = Keyword::new(524);
pub const NONLOCAL: Keyword = Keyword::new(525);
pub const NOT: Keyword = Keyword::new(526);
pub const OR: Keyword = Keyword::new(527);
pub const PASS: Keyword = Keyword::new(528);
pub const RAISE: Keyword = Keyword::new(529);
pub const RETURN: Keyword = Keyword::new(530);
pub const TRY: Keyword = Keyword::new(531);
pub const WHILE: Keyword = Keyword::new(532);
pub const WITH: Keyword = Keyword::new(533);
pub const YIELD: Keyword = Keyword::new(534);

/// Every reserved word, bucketed by length. Words the grammar has no rule
/// for are still reserved, so they never parse as names.
pub(super) static PYTHON_KEYWORDS: KeywordTable = KeywordTable::new(&[
    &[],
    &[],
    &[("as", AS), ("if", IF), ("in", IN), ("is", IS), ("or", OR)],
    &[
        ("and", AND),
        ("def", DEF),
        ("del", DEL),
        ("for", FOR),
        ("not", NOT),
        ("try", TRY),
    ],
    &[
        ("None", NONE),
        ("True", TRUE),
        ("elif", ELIF),
        ("else", ELSE),
        ("from", FROM),
        ("pass", PASS),
        ("with", WITH),
    ],
    &[
        ("False", FALSE),
        ("async", ASYNC),
        ("await", AWAIT),
        ("break", BREAK),
        ("class", CLASS),
        ("raise", RAISE),
        ("while", WHILE),
        ("yield", YIELD),
    ],
    &[
        ("assert", ASSERT),
        ("except", EXCEPT),
        ("global", GLOBAL),
        ("import", IMPORT),
        ("lambda", LAMBDA),
        ("return", RETURN),
    ],
    &[("finally", FINALLY)],
    &[("continue", CONTINUE), ("nonlocal", NONLOCAL)],
]);
