use std::sync::OnceLock;

use regex::Regex;
use url::Url;

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_PHONE_CHARS: usize = 10;
pub const MIN_PROJECT_CHARS: usize = 10;
pub const MAX_PROJECT_CHARS: usize = 100;
pub const MAX_ANSWER_CHARS: usize = 500;
/// Hard minimum for the "why OnSwift" answer. Also the auto-reject gate.
pub const MIN_ANSWER_WORDS: usize = 20;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .expect("email pattern compiles")
    })
}

/// Length in UTF-16 code units, the unit the browser form counts in.
pub fn char_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// ECMAScript `\s`: Unicode White_Space minus U+0085, plus U+FEFF.
fn is_form_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{0085}')
}

pub fn is_valid_email(value: &str) -> bool {
    let Some((local, _)) = value.split_once('@') else {
        return false;
    };
    if local.starts_with('.') || local.contains("..") {
        return false;
    }
    email_pattern().is_match(value)
}

/// Absolute URL per WHATWG parsing.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// Whitespace-delimited tokens after trimming. Blank input counts as zero.
pub fn word_count(value: &str) -> usize {
    value
        .split(is_form_whitespace)
        .filter(|token| !token.is_empty())
        .count()
}
