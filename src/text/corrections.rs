use crate::mode::Mode;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Rule categories, in application order
///
/// The order is part of the contract: each rule runs on the output of the
/// previous one, so later categories assume earlier ones already ran
/// (whitespace collapse relies on punctuation spacing being settled, and the
/// keyword table undoes ligature overshoot on words like `return`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    CharacterConfusion,
    Ligature,
    DuplicateWord,
    PunctuationSpacing,
    Whitespace,
    CodeSymbol,
    KeywordFix,
}

/// Which modes a rule applies in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    CodeOnly,
}

enum Action {
    Replace(Regex, &'static str),
    Rewrite(fn(&str) -> String),
}

/// One ordered repair: a named pattern/replacement or rewrite function
pub struct CorrectionRule {
    pub name: &'static str,
    pub category: Category,
    pub scope: Scope,
    action: Action,
}

impl CorrectionRule {
    fn apply(&self, line: &str) -> String {
        match &self.action {
            Action::Replace(re, replacement) => re.replace_all(line, *replacement).into_owned(),
            Action::Rewrite(f) => f(line),
        }
    }
}

fn rule(
    name: &'static str,
    category: Category,
    scope: Scope,
    pattern: &str,
    replacement: &'static str,
) -> CorrectionRule {
    CorrectionRule {
        name,
        category,
        scope,
        action: Action::Replace(Regex::new(pattern).unwrap(), replacement),
    }
}

fn rewrite(
    name: &'static str,
    category: Category,
    scope: Scope,
    f: fn(&str) -> String,
) -> CorrectionRule {
    CorrectionRule {
        name,
        category,
        scope,
        action: Action::Rewrite(f),
    }
}

/// The full rule chain. Reordering entries changes output.
static RULES: Lazy<Vec<CorrectionRule>> = Lazy::new(|| {
    use Category::*;
    use Scope::*;
    vec![
        // Digit/letter confusions, only where a digit touches letters so
        // real numbers survive
        rule("zero-at-word-start", CharacterConfusion, All, r"\b0([A-Za-z])", "O$1"),
        rule("zero-at-word-end", CharacterConfusion, All, r"([A-Za-z])0\b", "${1}o"),
        rule("one-at-word-start", CharacterConfusion, All, r"\b1([A-Za-z])", "I$1"),
        rule("one-inside-word", CharacterConfusion, All, r"([A-Za-z])1([A-Za-z])", "${1}l${2}"),
        rule("five-for-s", CharacterConfusion, All, r"\b5([A-Za-z])", "S$1"),
        rule("eight-for-b", CharacterConfusion, All, r"\b8([A-Za-z])", "B$1"),
        rule("six-for-g", CharacterConfusion, All, r"\b6([A-Za-z])", "G$1"),
        rule("pipe-at-word-start", CharacterConfusion, All, r"(^|\s)\|([A-Za-z])", "${1}I${2}"),
        rule("pipe-inside-word", CharacterConfusion, All, r"([A-Za-z])\|([A-Za-z])", "${1}I${2}"),
        // Merged-stroke misreads
        rule("rn-for-m", Ligature, All, r"rn", "m"),
        rule("vv-for-w", Ligature, All, r"vv", "w"),
        rewrite("duplicate-word", DuplicateWord, All, collapse_duplicate_words),
        rule("no-space-before-punct", PunctuationSpacing, All, r"\s+([.,!?;:])", "$1"),
        // Digits exempt after the mark, protecting decimals
        rule("space-after-punct", PunctuationSpacing, All, r"([.,!?;:])([A-Za-z])", "$1 $2"),
        rewrite("collapse-spaces", Whitespace, All, collapse_whitespace),
        rewrite("normalize-indent", Whitespace, CodeOnly, normalize_indent),
        rule("canonical-arrow", CodeSymbol, CodeOnly, r"[-=\u{2013}\u{2014}]+\s*>", "->"),
        rule("no-space-before-call-paren", CodeSymbol, CodeOnly, r"(\w)\s+\(", "$1("),
        rule("no-space-after-open-paren", CodeSymbol, CodeOnly, r"\(\s+", "("),
        rule("no-space-before-close-paren", CodeSymbol, CodeOnly, r"\s+\)", ")"),
        rule("no-space-before-index-bracket", CodeSymbol, CodeOnly, r"(\w)\s+\[", "$1["),
        rule("no-space-after-open-bracket", CodeSymbol, CodeOnly, r"\[\s+", "["),
        rule("no-space-before-close-bracket", CodeSymbol, CodeOnly, r"\s+\]", "]"),
        rule("tight-member-dot", CodeSymbol, CodeOnly, r"(\w)\s*\.\s*", "${1}."),
        rule("no-space-before-semicolon", CodeSymbol, CodeOnly, r"\s+;", ";"),
        rewrite("known-keywords", KeywordFix, CodeOnly, fix_keywords),
    ]
});

/// OCR-garbled spellings of common keywords, repaired by exact token match
static KEYWORDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("pubIic", "public"),
        ("pubiic", "public"),
        ("publlc", "public"),
        ("stalic", "static"),
        ("statlc", "static"),
        ("vold", "void"),
        ("voId", "void"),
        ("maln", "main"),
        ("maIn", "main"),
        // rn-for-m reads `return` as `retum`; the table turns it back
        ("retum", "return"),
        ("retrun", "return"),
        ("prlnt", "print"),
        ("prInt", "print"),
        ("functlon", "function"),
        ("lmport", "import"),
        ("whlle", "while"),
        ("whiIe", "while"),
        ("eIse", "else"),
        ("swltch", "switch"),
        ("nuIl", "null"),
        ("strlng", "string"),
        ("Iength", "length"),
        ("deflne", "define"),
    ])
});

fn collapse_duplicate_words(line: &str) -> String {
    static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z']+").unwrap());

    let mut out = String::with_capacity(line.len());
    let mut emitted_to = 0;
    let mut prev: Option<(String, usize)> = None;

    for m in WORD_RE.find_iter(line) {
        if let Some((prev_word, prev_end)) = &prev {
            let gap = &line[*prev_end..m.start()];
            let whitespace_gap = !gap.is_empty() && gap.chars().all(char::is_whitespace);
            if whitespace_gap && prev_word.eq_ignore_ascii_case(m.as_str()) {
                // Repeat of the previous word across plain whitespace
                prev = Some((m.as_str().to_string(), m.end()));
                emitted_to = m.end();
                continue;
            }
        }
        out.push_str(&line[emitted_to..m.end()]);
        emitted_to = m.end();
        prev = Some((m.as_str().to_string(), m.end()));
    }
    out.push_str(&line[emitted_to..]);
    out
}

/// Collapse interior whitespace runs to single spaces. Leading whitespace is
/// left for the indent rule, which knows whether the mode keeps it.
fn collapse_whitespace(line: &str) -> String {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];

    let mut out = String::with_capacity(line.len());
    out.push_str(indent);

    let mut in_run = false;
    for ch in body.chars() {
        if ch.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }

    out.truncate(out.trim_end().len());
    out
}

const INDENT_WIDTH: usize = 4;

/// Round leading indentation to the nearest indent level; tabs count as one
/// level. Recognizers drift by a column or two, which this absorbs.
fn normalize_indent(line: &str) -> String {
    let body = line.trim_start();
    if body.len() == line.len() {
        return line.to_string();
    }

    let indent = &line[..line.len() - body.len()];
    let columns: usize = indent
        .chars()
        .map(|c| if c == '\t' { INDENT_WIDTH } else { 1 })
        .sum();
    let levels = (columns + INDENT_WIDTH / 2) / INDENT_WIDTH;

    format!("{}{}", " ".repeat(levels * INDENT_WIDTH), body)
}

fn fix_keywords(line: &str) -> String {
    static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9]*").unwrap());

    TOKEN_RE
        .replace_all(line, |caps: &Captures| {
            let token = caps.get(0).unwrap().as_str();
            KEYWORDS.get(token).copied().unwrap_or(token).to_string()
        })
        .into_owned()
}

/// The complete ordered rule chain, exposed so the order itself is testable
pub fn rule_table() -> &'static [CorrectionRule] {
    &RULES
}

/// Applies the rule chain to normalized lines
///
/// Rules gated on `CodeOnly` run only when the request mode is `code`;
/// everything else runs for every mode, in table order.
pub struct CorrectionEngine {
    mode: Mode,
}

impl CorrectionEngine {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    fn active_rules(&self) -> impl Iterator<Item = &'static CorrectionRule> {
        let code = self.mode == Mode::Code;
        RULES
            .iter()
            .filter(move |r| r.scope == Scope::All || code)
    }

    pub fn correct_line(&self, line: &str) -> String {
        self.active_rules()
            .fold(line.to_string(), |acc, rule| rule.apply(&acc))
    }

    pub fn correct_lines(&self, lines: &[String]) -> Vec<String> {
        lines.iter().map(|line| self.correct_line(line)).collect()
    }
}
