//! Line-oriented grammar text loader (spec §6): one production per line,
//! `HEAD -> BODY`, uppercase-initial heads are variables, `|` separates
//! alternatives at the line level, `$`/`ε`/`epsilon` denotes the empty
//! body. Grounded on
//! `original_source/project/recursive_finite_state_machines.py::ECFG._read_line`'s
//! line shape, restricted to plain (non-regex) bodies for a CFG.

use crate::cfg::{Cfg, Symbol};
use crate::errors::{Error, Result};

const EPSILON_SPELLINGS: [&str; 4] = ["$", "epsilon", "ε", "ϵ"];

/// Parses a plain (non-extended) CFG from its text form.
pub fn load(source: &str, start: &str) -> Result<Cfg> {
    let mut cfg = Cfg::new(start);
    for (lineno, raw_line) in source.lines().enumerate() {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        let (head, body_text) = split_head_body(line)
            .ok_or_else(|| Error::input_shape(format!("line {}: expected 'HEAD -> BODY'", lineno + 1)))?;
        if !is_variable_token(head) {
            return Err(Error::input_shape(format!(
                "line {}: production head '{head}' must start with an uppercase letter",
                lineno + 1
            )));
        }
        for alternative in body_text.split('|') {
            let body = parse_body(alternative.trim());
            cfg.add_production(head, body);
        }
    }
    Ok(cfg)
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

fn parse_body(text: &str) -> Vec<Symbol> {
    if text.is_empty() || EPSILON_SPELLINGS.contains(&text) {
        return Vec::new();
    }
    text.split_whitespace().map(Symbol::from_token).collect()
}
