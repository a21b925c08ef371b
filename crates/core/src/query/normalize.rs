//! Query normalization: lowercasing, technical-term rewriting, punctuation
//! sanitizing, and synonym expansion.
//!
//! Both rule tables are ordered slices. Rules are applied one after another and
//! each operates on the output of the previous one, so a rule can act on text an
//! earlier rule produced. Reordering either table changes results.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// Literal substring rewrites for technical terms whose punctuation the
/// tokenizer would otherwise destroy.
pub const TECH_TERM_REWRITES: &[(&str, &str)] = &[
    (".net", "dotnet net"),
    ("c#", "csharp"),
    ("c++", "cpp"),
    ("node.js", "nodejs node"),
    ("react.js", "reactjs react"),
    ("frontend", "front end"),
    ("back-end", "backend"),
];

/// Whole-word synonym rules, applied in this order.
pub const SYNONYM_RULES: &[(&str, &str)] = &[
    ("graduate", "entry level"),
    ("junior", "entry level"),
    ("beginner", "entry level"),
    ("entry-level", "entry level"),
    (".net", "net dotnet"),
    ("c sharp", "c#"),
    ("react js", "react"),
    ("frontend", "front end"),
    ("backend", "back end"),
    ("devops", "development operations"),
    ("remote", "work from home"),
];

static SYNONYM_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    SYNONYM_RULES
        .iter()
        .map(|&(pattern, replacement)| {
            let re = Regex::new(&format!(r"\b{}\b", regex::escape(pattern)))
                .expect("escaped literal is a valid pattern");
            (re, replacement)
        })
        .collect()
});

/// Lowercase and apply [`TECH_TERM_REWRITES`] in order.
pub fn normalize_text(text: &str) -> String {
    let mut out = text.to_lowercase();
    for &(from, to) in TECH_TERM_REWRITES {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    out
}

/// Keep alphanumeric characters and spaces, turn hyphens into spaces, drop everything else.
pub fn clean_query(text: &str) -> String {
    text.chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == ' ' {
                Some(c)
            } else if c == '-' {
                Some(' ')
            } else {
                None
            }
        })
        .collect()
}

/// Apply [`SYNONYM_RULES`] in order, matching whole words only.
pub fn apply_synonyms(text: &str) -> String {
    let mut out = text.to_string();
    for (re, replacement) in SYNONYM_PATTERNS.iter() {
        out = re.replace_all(&out, NoExpand(replacement)).into_owned();
    }
    out
}

/// Full query pipeline: [`normalize_text`], then [`clean_query`], then [`apply_synonyms`].
pub fn normalize_query(raw: &str) -> String {
    apply_synonyms(&clean_query(&normalize_text(raw)))
}
