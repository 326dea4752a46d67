//! Locale-style string collation for table sorting.
//!
//! Raw codepoint order puts every uppercase letter before every lowercase
//! one and every accented letter after `z`. Table sorting instead follows
//! the usual multi-level collation:
//!
//! 1. **Primary**: character class (whitespace/punctuation, numbers,
//!    letters, everything else), then the letter with case and common
//!    Latin accents folded away. A run of ASCII digits compares as one
//!    number, so `Team 9` sorts before `Team 10`.
//! 2. **Secondary**: unaccented before accented.
//! 3. **Tertiary**: lowercase before uppercase.
//!
//! A final codepoint comparison keeps the order total, so two strings
//! compare equal only when they are identical.

use std::cmp::Ordering;

/// One primary collation element. Variant order is the class order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Unit {
    Separator(char),
    /// ASCII digit run without leading zeros; shorter means smaller.
    Number { len: usize, digits: String },
    Digit(char),
    Letter(char),
    Other(char),
}

fn unit_of(c: char) -> Unit {
    if c.is_whitespace() || c.is_ascii_punctuation() {
        Unit::Separator(c)
    } else if c.is_numeric() {
        Unit::Digit(c)
    } else if c.is_alphabetic() {
        Unit::Letter(c)
    } else {
        Unit::Other(c)
    }
}

/// Fold a lowercase Latin letter with a diacritic to its base letter.
///
/// Returns the base letter and whether a diacritic was removed.
const fn strip_accent(c: char) -> (char, bool) {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' => 'i',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => return (other, false),
    };
    (base, true)
}

/// Lowercased, accent-stripped characters of `s` with their accent flag.
fn folded(s: &str) -> impl Iterator<Item = (char, bool)> + '_ {
    s.chars().flat_map(char::to_lowercase).map(strip_accent)
}

/// Primary elements of `s`, with each ASCII digit run collapsed.
fn primary_units(s: &str) -> Vec<Unit> {
    let mut chars = folded(s).map(|(c, _)| c).peekable();
    let mut units = Vec::new();
    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            let mut run = String::from(c);
            while let Some(d) = chars.next_if(char::is_ascii_digit) {
                run.push(d);
            }
            let digits = run.trim_start_matches('0').to_owned();
            units.push(Unit::Number {
                len: digits.len(),
                digits,
            });
        } else {
            units.push(unit_of(c));
        }
    }
    units
}

/// Compare two strings the way a locale-aware table sort does.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_units(a)
        .cmp(&primary_units(b))
        .then_with(|| folded(a).map(|(_, accented)| accented).cmp(folded(b).map(|(_, accented)| accented)))
        .then_with(|| a.chars().map(char::is_uppercase).cmp(b.chars().map(char::is_uppercase)))
        .then_with(|| a.cmp(b))
}
