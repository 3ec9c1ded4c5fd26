//! Minimal CSS tokenizer for stylesheet selector scanning.
//!
//! The stylesheet checker only needs the prelude of each qualified rule,
//! reduced to four token categories: identifiers, commas, whitespace runs,
//! and everything else. Rule bodies, at-rules, comments, strings, and
//! bracketed groups are skipped whole. Qt's stylesheet dialect is simple
//! enough that this covers every selector the themes use.

/// One component of a qualified rule's prelude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreludeToken {
    Ident(String),
    Comma,
    /// A run of consecutive whitespace, collapsed into one token.
    Whitespace,
    /// Any other component: delimiters, hashes, strings, bracketed groups.
    Delim,
}

/// One qualified rule: its prelude tokens. The body is not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedRule {
    pub prelude: Vec<PreludeToken>,
}

/// Tokenize a stylesheet into its top-level qualified rules.
///
/// At-rules are dropped entirely, including any nested block, so rules
/// inside `@media` are not walked. Stray closing braces reset the current
/// prelude.
pub fn parse_rules(css: &str) -> Vec<QualifiedRule> {
    let mut chars = css.chars().peekable();
    let mut rules = Vec::new();
    let mut prelude: Vec<PreludeToken> = Vec::new();

    while let Some(&c) = chars.peek() {
        match c {
            '/' => {
                if !consume_comment(&mut chars) {
                    // A lone slash is just a delimiter.
                    prelude.push(PreludeToken::Delim);
                }
            }
            '"' | '\'' => {
                skip_string(&mut chars);
                prelude.push(PreludeToken::Delim);
            }
            '{' => {
                skip_block(&mut chars);
                if prelude.iter().any(|t| !matches!(t, PreludeToken::Whitespace)) {
                    rules.push(QualifiedRule {
                        prelude: std::mem::take(&mut prelude),
                    });
                } else {
                    prelude.clear();
                }
            }
            '}' => {
                chars.next();
                prelude.clear();
            }
            '@' => {
                skip_at_rule(&mut chars);
                prelude.clear();
            }
            ',' => {
                chars.next();
                prelude.push(PreludeToken::Comma);
            }
            '[' => {
                skip_group(&mut chars, '[', ']');
                prelude.push(PreludeToken::Delim);
            }
            '(' => {
                skip_group(&mut chars, '(', ')');
                prelude.push(PreludeToken::Delim);
            }
            '#' => {
                // A hash token is one unit; the identifier glued to it must
                // not surface as a bare ident.
                chars.next();
                let _ = consume_ident(&mut chars);
                prelude.push(PreludeToken::Delim);
            }
            c if c.is_whitespace() => {
                while chars.peek().is_some_and(|&c| c.is_whitespace()) {
                    chars.next();
                }
                if !matches!(prelude.last(), Some(PreludeToken::Whitespace)) {
                    prelude.push(PreludeToken::Whitespace);
                }
            }
            c if is_ident_start(c) => {
                let ident = consume_ident(&mut chars);
                prelude.push(PreludeToken::Ident(ident));
            }
            _ => {
                chars.next();
                prelude.push(PreludeToken::Delim);
            }
        }
    }

    rules
}

type CharStream<'a> = std::iter::Peekable<std::str::Chars<'a>>;

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}

fn consume_ident(chars: &mut CharStream) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if is_ident_char(c) {
            ident.push(c);
            chars.next();
        } else {
            break;
        }
    }
    ident
}

/// Consume the slash the stream sits on; if it opens a `/* */` comment,
/// consume through the closing delimiter and return true.
fn consume_comment(chars: &mut CharStream) -> bool {
    chars.next(); // the slash
    if !matches!(chars.peek(), Some(&'*')) {
        return false;
    }
    chars.next();
    let mut prev = '\0';
    for c in chars.by_ref() {
        if prev == '*' && c == '/' {
            break;
        }
        prev = c;
    }
    true
}

fn skip_string(chars: &mut CharStream) {
    let Some(quote) = chars.next() else {
        return;
    };
    let mut escaped = false;
    for c in chars.by_ref() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            break;
        }
    }
}

/// Consume a brace block, counting nesting and honoring strings.
fn skip_block(chars: &mut CharStream) {
    chars.next(); // opening brace
    let mut depth = 1usize;
    while let Some(&c) = chars.peek() {
        match c {
            '"' | '\'' => skip_string(chars),
            '{' => {
                chars.next();
                depth += 1;
            }
            '}' => {
                chars.next();
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
            _ => {
                chars.next();
            }
        }
    }
}

fn skip_group(chars: &mut CharStream, open: char, close: char) {
    chars.next(); // opening bracket
    let mut depth = 1usize;
    while let Some(&c) = chars.peek() {
        if c == '"' || c == '\'' {
            skip_string(chars);
        } else if c == open {
            chars.next();
            depth += 1;
        } else if c == close {
            chars.next();
            depth -= 1;
            if depth == 0 {
                return;
            }
        } else {
            chars.next();
        }
    }
}

/// Consume an at-rule: everything up to its terminating `;`, or its block.
fn skip_at_rule(chars: &mut CharStream) {
    chars.next(); // '@'
    while let Some(&c) = chars.peek() {
        match c {
            ';' => {
                chars.next();
                return;
            }
            '{' => {
                skip_block(chars);
                return;
            }
            '"' | '\'' => skip_string(chars),
            _ => {
                chars.next();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::PreludeToken::{Comma, Delim, Ident, Whitespace};
    use super::*;

    fn idents(rule: &QualifiedRule) -> Vec<&str> {
        rule.prelude
            .iter()
            .filter_map(|t| match t {
                PreludeToken::Ident(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn simple_rule() {
        let rules = parse_rules("lmms--gui--Knob { color: red; }");
        assert_eq!(rules.len(), 1);
        assert_eq!(idents(&rules[0]), vec!["lmms--gui--Knob"]);
    }

    #[test]
    fn comma_separated_selectors() {
        let rules = parse_rules("lmms--gui--A, lmms--gui--B{}\n");
        assert_eq!(rules.len(), 1);
        assert_eq!(
            rules[0].prelude,
            vec![
                Ident("lmms--gui--A".into()),
                Comma,
                Whitespace,
                Ident("lmms--gui--B".into()),
            ]
        );
    }

    #[test]
    fn pseudo_elements_stay_in_the_same_group() {
        let rules = parse_rules("QScrollBar::handle:hover { }");
        assert_eq!(
            rules[0].prelude,
            vec![
                Ident("QScrollBar".into()),
                Delim,
                Delim,
                Ident("handle".into()),
                Delim,
                Ident("hover".into()),
                Whitespace,
            ]
        );
    }

    #[test]
    fn hash_selectors_do_not_yield_idents() {
        let rules = parse_rules("#mixer { }");
        assert_eq!(rules[0].prelude, vec![Delim, Whitespace]);
    }

    #[test]
    fn comments_strings_and_attribute_groups_are_opaque() {
        let css = "/* lmms--gui--NotARule */\nlmms--gui--Real[flat=\"true\"] { }";
        let rules = parse_rules(css);
        assert_eq!(rules.len(), 1);
        assert_eq!(idents(&rules[0]), vec!["lmms--gui--Real"]);
    }

    #[test]
    fn at_rules_and_their_blocks_are_dropped() {
        let css = "@import \"x.css\";\n@media screen { lmms--gui--Hidden { } }\nlmms--gui--Seen { }";
        let rules = parse_rules(css);
        assert_eq!(rules.len(), 1);
        assert_eq!(idents(&rules[0]), vec!["lmms--gui--Seen"]);
    }

    #[test]
    fn nested_braces_in_bodies_are_balanced() {
        let css = "lmms--gui--A { qproperty-x: \"{\"; }\nlmms--gui--B { }";
        let rules = parse_rules(css);
        assert_eq!(rules.len(), 2);
        assert_eq!(idents(&rules[1]), vec!["lmms--gui--B"]);
    }

    #[test]
    fn empty_prelude_is_not_a_rule() {
        assert!(parse_rules("  { color: red; }").is_empty());
        assert!(parse_rules("").is_empty());
    }
}
