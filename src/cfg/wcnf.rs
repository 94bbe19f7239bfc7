//! Weak Chomsky Normal Form transform (spec §4.5): eliminate unit
//! productions, remove useless symbols, isolate terminals, binarize.
//! Grounded on `original_source/project/weak_chomsky_normal_form.py`, whose
//! steps delegate to `pyformlang`'s `eliminate_unit_productions`,
//! `remove_useless_symbols`, `_get_productions_with_only_single_terminals`
//! and `_decompose_productions` — reimplemented directly here since there is
//! no CFG crate in the teacher's dependency stack.

use std::collections::{HashMap, HashSet};

use crate::cfg::{Cfg, Production, Symbol, WcnfCfg};

/// Transforms `cfg` into weak Chomsky normal form. Epsilon productions are
/// preserved (the "weak" relaxation relative to true CNF).
#[must_use]
pub fn transform(cfg: &Cfg) -> WcnfCfg {
    let cfg = eliminate_unit_productions(cfg);
    let cfg = remove_useless_symbols(&cfg);
    let cfg = isolate_terminals(&cfg);
    let cfg = binarize(&cfg);
    WcnfCfg(cfg)
}

/// Replaces every unit production `A -> B` (a body of exactly one
/// variable) with `A`'s direct productions for every `B` reachable through
/// a chain of unit productions.
fn eliminate_unit_productions(cfg: &Cfg) -> Cfg {
    let mut unit_closure: HashMap<String, HashSet<String>> = HashMap::new();
    for var in cfg.variables() {
        let mut reachable = HashSet::new();
        reachable.insert(var.clone());
        unit_closure.insert(var, reachable);
    }

    loop {
        let mut changed = false;
        for production in &cfg.productions {
            if let [Symbol::Variable(target)] = production.body.as_slice() {
                let additions: Vec<String> = unit_closure
                    .get(target)
                    .cloned()
                    .unwrap_or_default()
                    .into_iter()
                    .collect();
                let entry = unit_closure.entry(production.head.clone()).or_default();
                for addition in additions {
                    if entry.insert(addition) {
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }

    let mut new_cfg = Cfg::new(cfg.start.clone());
    for (head, reachable) in &unit_closure {
        for other in reachable {
            for production in &cfg.productions {
                if &production.head == other && !is_unit_body(&production.body) {
                    new_cfg.add_production(head.clone(), production.body.clone());
                }
            }
        }
    }
    new_cfg.productions.sort();
    new_cfg.productions.dedup();
    new_cfg
}

fn is_unit_body(body: &[Symbol]) -> bool {
    matches!(body, [Symbol::Variable(_)])
}

/// Drops variables unreachable from the start symbol, and variables that
/// derive no terminal string (generating no finite word at all).
fn remove_useless_symbols(cfg: &Cfg) -> Cfg {
    let generating = generating_variables(cfg);
    let mut filtered = Cfg::new(cfg.start.clone());
    for production in &cfg.productions {
        if !generating.contains(&production.head) {
            continue;
        }
        if production
            .body
            .iter()
            .all(|sym| matches!(sym, Symbol::Terminal(_)) || is_generating(sym, &generating))
        {
            filtered.add_production(production.head.clone(), production.body.clone());
        }
    }

    let reachable = reachable_variables(&filtered);
    let mut result = Cfg::new(cfg.start.clone());
    for production in &filtered.productions {
        if reachable.contains(&production.head) {
            result.add_production(production.head.clone(), production.body.clone());
        }
    }
    result
}

fn is_generating(sym: &Symbol, generating: &HashSet<String>) -> bool {
    match sym {
        Symbol::Variable(v) => generating.contains(v),
        Symbol::Terminal(_) => true,
    }
}

fn generating_variables(cfg: &Cfg) -> HashSet<String> {
    let mut generating: HashSet<String> = HashSet::new();
    loop {
        let mut changed = false;
        for production in &cfg.productions {
            if generating.contains(&production.head) {
                continue;
            }
            let derives_terminal_string = production
                .body
                .iter()
                .all(|sym| is_generating(sym, &generating));
            if derives_terminal_string {
                generating.insert(production.head.clone());
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    generating
}

fn reachable_variables(cfg: &Cfg) -> HashSet<String> {
    let mut reachable = HashSet::new();
    reachable.insert(cfg.start.clone());
    loop {
        let mut changed = false;
        for production in &cfg.productions {
            if !reachable.contains(&production.head) {
                continue;
            }
            for sym in &production.body {
                if let Symbol::Variable(v) = sym {
                    if reachable.insert(v.clone()) {
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }
    reachable
}

/// Replaces every terminal that appears alongside another symbol in a body
/// of length >= 2 with a fresh nonterminal `T#<terminal>` whose sole
/// production is `T#<terminal> -> terminal`.
fn isolate_terminals(cfg: &Cfg) -> Cfg {
    let mut result = Cfg::new(cfg.start.clone());
    let mut fresh_terminals: HashMap<String, String> = HashMap::new();

    for production in &cfg.productions {
        if production.body.len() < 2 {
            result.add_production(production.head.clone(), production.body.clone());
            continue;
        }
        let mut new_body = Vec::with_capacity(production.body.len());
        for sym in &production.body {
            match sym {
                Symbol::Terminal(t) => {
                    let fresh = fresh_terminals
                        .entry(t.clone())
                        .or_insert_with(|| format!("T#{t}"))
                        .clone();
                    new_body.push(Symbol::Variable(fresh));
                }
                Symbol::Variable(_) => new_body.push(sym.clone()),
            }
        }
        result.add_production(production.head.clone(), new_body);
    }

    for (terminal, variable) in fresh_terminals {
        result.add_production(variable, vec![Symbol::Terminal(terminal)]);
    }
    result
}

/// Binarizes every body of length >= 3 by repeatedly splitting the
/// rightmost pair into a fresh nonterminal `B#<head>#<n>`.
fn binarize(cfg: &Cfg) -> Cfg {
    let mut result = Cfg::new(cfg.start.clone());
    let mut counter = 0usize;

    for production in &cfg.productions {
        if production.body.len() <= 2 {
            result.add_production(production.head.clone(), production.body.clone());
            continue;
        }

        let mut body = production.body.clone();
        while body.len() > 2 {
            let tail = body.split_off(body.len() - 2);
            let fresh = format!("B#{}#{counter}", production.head);
            counter += 1;
            result.add_production(fresh.clone(), tail);
            body.push(Symbol::Variable(fresh));
            if body.len() == 2 {
                result.add_production(production.head.clone(), body.clone());
            }
        }
    }
    result
}
