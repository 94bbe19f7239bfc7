//! Extended context-free grammars (spec §3/§6): one regex body per
//! variable, instead of a set of fixed-arity productions. Grounded on
//! `original_source/project/recursive_finite_state_machines.py::ECFG`,
//! restricted to the text-loading path (`from_cfg` is the original's
//! CFG-to-ECFG lift, out of scope here — see `DESIGN.md`).

use indexmap::IndexMap;

use crate::errors::{Error, Result};
use crate::regex::Ast;

const EPSILON_SPELLINGS: [&str; 4] = ["$", "epsilon", "ε", "ϵ"];

/// An extended CFG: every variable has exactly one regex body over the
/// shared alphabet of terminals and variables.
#[derive(Debug, Clone)]
pub struct Ecfg {
    pub start: String,
    pub productions: IndexMap<String, Ast>,
}

/// Parses an ECFG from its text form: one `HEAD -> <regex>` production per
/// line, per spec §6. Unlike [`crate::cfg::loader::load`], `|` inside a
/// body is regex alternation, not a line-level separator, and each head
/// may appear at most once.
pub fn load(source: &str, start: &str) -> Result<Ecfg> {
    let mut productions = IndexMap::new();
    for (lineno, raw_line) in source.lines().enumerate() {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        let (head, body_text) = split_head_body(line).ok_or_else(|| {
            Error::input_shape(format!("line {}: expected 'HEAD -> <regex>'", lineno + 1))
        })?;
        if !is_variable_token(head) {
            return Err(Error::input_shape(format!(
                "line {}: ECFG head '{head}' must start with an uppercase letter",
                lineno + 1
            )));
        }
        if productions.contains_key(head) {
            return Err(Error::RedeclarationAttempt(head.to_string()));
        }
        let body = normalize_epsilon_spellings(body_text.trim());
        let ast = Ast::build(&body)?;
        productions.insert(head.to_string(), ast);
    }
    Ok(Ecfg {
        start: start.to_string(),
        productions,
    })
}

fn normalize_epsilon_spellings(body: &str) -> String {
    body.split_whitespace()
        .map(|tok| if EPSILON_SPELLINGS.contains(&tok) { "$" } else { tok })
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn split_head_body(line: &str) -> Option<(&str, &str)> {
    let idx = line.find("->")?;
    Some((line[..idx].trim(), line[idx + 2..].trim()))
}

fn is_variable_token(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_one_regex_body_per_head() {
        let ecfg = load("S -> a S b | $", "S").unwrap();
        assert_eq!(ecfg.productions.len(), 1);
        assert!(ecfg.productions.contains_key("S"));
    }

    #[test]
    fn duplicate_head_is_a_redeclaration_error() {
        let err = load("S -> a\nS -> b", "S").unwrap_err();
        assert!(matches!(err, Error::RedeclarationAttempt(_)));
    }

    #[test]
    fn normalizes_every_epsilon_spelling_before_parsing() {
        for spelling in ["$", "epsilon", "ε", "ϵ"] {
            let text = format!("S -> {spelling}");
            assert!(load(&text, "S").is_ok(), "failed for {spelling}");
        }
    }
}
