/// Query normalizer - rewrites literal-free query text into canonical form
///
/// Runs after the literal vault, so the input contains no quotes. Steps, in
/// order:
/// 1. drop whitespace around punctuation runs (`a = b` -> `a=b`)
/// 2. wrap comparison operators in `#` delimiters (`a#=#b`)
/// 3. drop whitespace just inside parentheses
/// 4. collapse whitespace runs and trim
/// 5. join multi-word keywords into one word (`insert into` -> `INSERT_INTO`)
///
/// Single-word keywords are left as written; the lexer recognizes them as
/// whole tokens, so `local.desc` or `rock-and-roll` are never touched.
use regex::Regex;
use std::sync::OnceLock;

/// Keywords spelled as two words in queries
pub const MULTI_WORD_KEYWORDS: &[&str] = &["INSERT INTO", "DELETE FROM"];

/// Delimiter placed around comparison operators
pub const OPERATOR_DELIMITER: char = '#';

fn punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*([^A-Za-z0-9_()*\s]+)\s*").expect("valid punctuation regex"))
}

fn operator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([!=<>]+)").expect("valid operator regex"))
}

fn paren_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\()\s*|\s*(\))").expect("valid paren regex"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

fn keyword_res() -> &'static [(Regex, String)] {
    static RES: OnceLock<Vec<(Regex, String)>> = OnceLock::new();
    RES.get_or_init(|| {
        MULTI_WORD_KEYWORDS
            .iter()
            .map(|kw| {
                // Stand-alone only: bounded by whitespace, parens, commas or the ends
                let words = kw.split(' ').collect::<Vec<_>>().join(r"\s+");
                let pattern = format!(r"(?i)(^|[\s(,]){}($|[\s(,])", words);
                let re = Regex::new(&pattern).expect("valid keyword regex");
                (re, format!("${{1}}{}${{2}}", kw.replace(' ', "_")))
            })
            .collect()
    })
}

/// Canonicalize literal-free query text
pub fn normalize(input: &str) -> String {
    let text = punctuation_re().replace_all(input, "$1");
    let text = operator_re().replace_all(&text, "#$1#");
    let text = paren_re().replace_all(&text, "$1$2");
    let text = whitespace_re().replace_all(&text, " ");
    let mut text = text.trim().to_string();

    for (re, canonical) in keyword_res() {
        text = re.replace_all(&text, canonical.as_str()).into_owned();
    }

    text
}
