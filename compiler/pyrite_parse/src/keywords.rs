//! Reserved-word classification.
//!
//! Keywords are grouped by byte length so a lookup only compares against the
//! handful of words that could possibly match.

use pyrite_ir::Keyword;

/// Length-indexed keyword table: `by_length[n]` lists the keywords of `n`
/// bytes.
#[derive(Debug)]
pub struct KeywordTable {
    by_length: &'static [&'static [(&'static str, Keyword)]],
}

impl KeywordTable {
    pub const fn new(by_length: &'static [&'static [(&'static str, Keyword)]]) -> Self {
        KeywordTable { by_length }
    }

    /// An empty table: every identifier stays an identifier.
    pub const fn empty() -> Self {
        KeywordTable { by_length: &[] }
    }

    /// Reserved kind for `text`, if it is exactly a keyword.
    pub fn lookup(&self, text: &str) -> Option<Keyword> {
        self.by_length
            .get(text.len())?
            .iter()
            .find(|(word, _)| *word == text)
            .map(|&(_, keyword)| keyword)
    }

    /// Spelling of a keyword, for diagnostics and traces.
    pub fn spelling(&self, keyword: Keyword) -> Option<&'static str> {
        self.by_length
            .iter()
            .flat_map(|bucket| bucket.iter())
            .find(|(_, k)| *k == keyword)
            .map(|&(word, _)| word)
    }
}
