// src/query/tagger.rs
//
// Tokenizer + organization tagger behind a trait, so a heavier NLP
// backend can replace the rule-based one without touching the interpreter.

use std::ops::Range;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Byte offset into the source text.
    pub start: usize,
}

impl Token {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn is_alpha(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_alphabetic)
    }

    /// Every cased character is upper-case, and there is at least one.
    pub fn is_upper(&self) -> bool {
        let mut cased = self
            .text
            .chars()
            .filter(|c| c.is_lowercase() || c.is_uppercase())
            .peekable();
        cased.peek().is_some() && cased.all(char::is_uppercase)
    }

    fn is_capitalized(&self) -> bool {
        self.is_alpha() && self.text.chars().next().is_some_and(char::is_uppercase)
    }
}

pub trait Tagger {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Byte ranges of organization names found in `text`.
    fn organizations(&self, text: &str, tokens: &[Token]) -> Vec<Range<usize>>;
}

const CORPORATE_SUFFIXES: [&str; 7] = ["Inc", "Corp", "Ltd", "LLC", "Co", "Limited", "Corporation"];

/// Alphanumeric runs are tokens; any other non-space char stands alone.
/// Organizations are capitalized runs closed by a corporate suffix.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleTagger;

impl Tagger for RuleTagger {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut word_start: Option<usize> = None;

        for (i, c) in text.char_indices() {
            if c.is_alphanumeric() {
                word_start.get_or_insert(i);
                continue;
            }
            if let Some(start) = word_start.take() {
                tokens.push(Token { text: s!(&text[start..i]), start });
            }
            if !c.is_whitespace() {
                tokens.push(Token { text: c.to_string(), start: i });
            }
        }
        if let Some(start) = word_start {
            tokens.push(Token { text: s!(&text[start..]), start });
        }
        tokens
    }

    fn organizations(&self, _text: &str, tokens: &[Token]) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut run_start: Option<usize> = None;

        for tok in tokens {
            if !tok.is_capitalized() {
                run_start = None;
                continue;
            }
            match run_start {
                Some(start) if CORPORATE_SUFFIXES.contains(&tok.text.as_str()) => {
                    spans.push(start..tok.end());
                    run_start = None;
                }
                Some(_) => {}
                None => run_start = Some(tok.start),
            }
        }
        spans
    }
}
