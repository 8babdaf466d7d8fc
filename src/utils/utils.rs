use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SINGLE_QUOTED: Regex = Regex::new(r"'((?:\\.|[^'\\])*)'").unwrap();
    static ref UNQUOTED_KEY: Regex = Regex::new(r"([,\{\[]\s*)([A-Za-z_][A-Za-z0-9_]*)\s*:").unwrap();
    static ref TRAILING_COMMA: Regex = Regex::new(r",(\s*[\}\]])").unwrap();
}

/// Turns a javascript object literal into something `serde_json` accepts:
/// single-quoted strings become double-quoted, bare keys get quoted and
/// trailing commas are dropped.
pub fn js_to_json(code: &str) -> String {
    let with_strings = SINGLE_QUOTED.replace_all(code, |caps: &regex::Captures| {
        let inner = caps[1].replace("\\'", "'").replace('"', "\\\"");
        format!("\"{}\"", inner)
    });
    let with_keys = UNQUOTED_KEY.replace_all(&with_strings, "${1}\"${2}\":");
    TRAILING_COMMA.replace_all(&with_keys, "${1}").to_string()
}
