//! text cleanup for rider-facing stop names, headsigns, and route long
//! names. small agency feeds carry inconsistent casing, misspelled
//! street types, and operational prefixes that should never reach a
//! rider; these helpers normalize them without touching identifiers.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static FLAG_STOP_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^flag stop\s*-\s*").unwrap());
static TO_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^to\s+").unwrap());
static VIA_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+via\s+.*$").unwrap());
static AVENUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\baven(u)?\b").unwrap());
static DRIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bdriv\b").unwrap());
static STREET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bstree\b").unwrap());
static AMP_NO_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S)\s*([&@])\s*(\S)").unwrap());
static POSITIONAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(at|opposite|across from|in front of)\s+").unwrap());
static ABBREV_PERIOD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w)\.(\s)").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static TRAILING_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s.&/-]+$").unwrap());

/// cleans a stop name: drops operational "Flag Stop -" prefixes, pads
/// `&` and `@` junction markers, folds positional connectors ("at",
/// "opposite", ...) to a slash, and fixes common street-type typos.
pub fn clean_stop_name(raw: &str) -> String {
    let name = FLAG_STOP_PREFIX.replace(raw.trim(), "");
    let name = AMP_NO_SPACE.replace_all(&name, "$1 $2 $3");
    let name = POSITIONAL.replace_all(&name, " / ");
    let name = ABBREV_PERIOD.replace_all(&name, "$1$2");
    let name = clean_street_types(&name);
    label_case(&finish(&name))
}

/// cleans a trip headsign: drops a leading "To" and any trailing
/// "via ..." clause, then applies the shared street-type fixes.
pub fn clean_headsign(raw: &str) -> String {
    let name = TO_PREFIX.replace(raw.trim(), "");
    let name = VIA_SUFFIX.replace(&name, "");
    let name = clean_street_types(&name);
    label_case(&finish(&name))
}

/// cleans a route long name.
pub fn clean_route_long_name(raw: &str) -> String {
    let name = clean_street_types(raw.trim());
    label_case(&finish(&name))
}

/// title-cases shouty all-caps labels; mixed-case input passes through.
fn label_case(name: &str) -> String {
    if name.chars().any(|c| c.is_lowercase()) {
        name.to_string()
    } else {
        title_case(name)
    }
}

fn clean_street_types(name: &str) -> String {
    let name = AVENUE.replace_all(name, "Avenue");
    let name = DRIVE.replace_all(&name, "Drive");
    let name = STREET.replace_all(&name, "Street");
    name.into_owned()
}

fn finish(name: &str) -> String {
    let name = WHITESPACE.replace_all(name, " ");
    TRAILING_PUNCT.replace(&name, "").into_owned()
}

fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let rest: String = chars.collect::<String>().to_lowercase();
                    let first: String = first.to_uppercase().collect();
                    Cow::Owned(format!("{first}{rest}"))
                }
                None => Cow::Borrowed(word),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
