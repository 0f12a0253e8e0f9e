// inflector-core/src/replacement.rs
//! Replacement-template expansion shared by the regex-replace filter and the inflector.
//!
//! Templates follow the PCRE replacement conventions: `\N`, `$N` and `${N}`
//! (one or two digits) insert capture group `N`, `\\` inserts a single
//! backslash and `\$` a literal dollar sign. Missing groups expand to nothing.
//!
//! License: MIT OR APACHE 2.0

use regex::{Captures, Replacer};

/// A `Replacer` that expands a PCRE-style template for each match.
#[derive(Debug, Clone, Copy)]
pub struct BackrefTemplate<'a>(pub &'a str);

impl Replacer for BackrefTemplate<'_> {
    fn replace_append(&mut self, caps: &Captures<'_>, dst: &mut String) {
        expand(caps, self.0, dst);
    }
}

/// Escapes a literal value so that `expand` reproduces it verbatim.
///
/// Every backslash is doubled first, then each dollar sign is escaped, so a
/// value such as `\1` or `$1` can never be read as a group reference.
pub fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('$', "\\$")
}

/// Appends the expansion of `template` against `caps` to `dst`.
pub fn expand(caps: &Captures<'_>, template: &str, dst: &mut String) {
    let bytes = template.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let consumed = match bytes[i] {
            b'\\' => match bytes.get(i + 1) {
                Some(&escaped @ (b'\\' | b'$')) => {
                    dst.push_str(&template[literal_start..i]);
                    dst.push(escaped as char);
                    Some(2)
                }
                Some(_) => parse_group(&bytes[i + 1..]).map(|(group, width)| {
                    dst.push_str(&template[literal_start..i]);
                    push_group(caps, group, dst);
                    1 + width
                }),
                None => None,
            },
            b'$' => parse_dollar(&bytes[i + 1..]).map(|(group, width)| {
                dst.push_str(&template[literal_start..i]);
                push_group(caps, group, dst);
                1 + width
            }),
            _ => None,
        };

        match consumed {
            Some(width) => {
                i += width;
                literal_start = i;
            }
            None => i += 1,
        }
    }

    dst.push_str(&template[literal_start..]);
}

fn push_group(caps: &Captures<'_>, group: usize, dst: &mut String) {
    if let Some(m) = caps.get(group) {
        dst.push_str(m.as_str());
    }
}

/// Parses one or two leading ASCII digits into a group index and its width.
fn parse_group(rest: &[u8]) -> Option<(usize, usize)> {
    let width = rest.iter().take(2).take_while(|b| b.is_ascii_digit()).count();
    if width == 0 {
        return None;
    }
    let group = rest[..width]
        .iter()
        .fold(0usize, |acc, b| acc * 10 + usize::from(b - b'0'));
    Some((group, width))
}

/// Parses the part after `$`: either `N`/`NN` or `{N}`/`{NN}`.
fn parse_dollar(rest: &[u8]) -> Option<(usize, usize)> {
    if rest.first() == Some(&b'{') {
        let (group, width) = parse_group(&rest[1..])?;
        if rest.get(1 + width) == Some(&b'}') {
            return Some((group, width + 2));
        }
        return None;
    }
    parse_group(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn replace(pattern: &str, haystack: &str, template: &str) -> String {
        let re = Regex::new(pattern).unwrap();
        re.replace_all(haystack, BackrefTemplate(template)).into_owned()
    }

    #[test]
    fn test_expands_all_group_syntaxes() {
        assert_eq!(replace(r"(\w+)-(\w+)", "foo-bar", r"\2_\1"), "bar_foo");
        assert_eq!(replace(r"(\w+)-(\w+)", "foo-bar", "$2_$1"), "bar_foo");
        assert_eq!(replace(r"(\w+)-(\w+)", "foo-bar", "${2}0${1}"), "bar0foo");
    }

    #[test]
    fn test_missing_group_expands_to_nothing() {
        assert_eq!(replace("a", "xax", "[$3]"), "x[]x");
    }

    #[test]
    fn test_escaped_literal_survives_expansion() {
        for value in [r"\1", r"\\", "$1", "${0}", r"a\$b", "plain", r"trailing\"] {
            let escaped = escape_literal(value);
            assert_eq!(replace("X", "<X>", &escaped), format!("<{}>", value));
        }
    }

    #[test]
    fn test_lone_dollar_and_backslash_are_literal() {
        assert_eq!(replace("X", "X", "$ and \\q"), "$ and \\q");
        assert_eq!(replace("X", "X", "${x}"), "${x}");
    }
}
