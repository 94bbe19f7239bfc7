//! Labeled directed graphs (spec §3), a minimal Graphviz-DOT loader (spec
//! §6), and the graph→automaton adapter, grounded on
//! `original_source/project/automata.py::get_nondeterministic_automata_from_graph`.

use indexmap::IndexSet;

use crate::automaton::fa::{FiniteAutomaton, StateId};
use crate::errors::{Error, Result};
use crate::symbol::{SymbolId, SymbolTable};

/// A vertex identifier as it appears in the original graph source: either
/// an integer or a verbatim string, per spec §6 ("vertex identifiers may be
/// integers or strings ... verbatim identifiers preserved").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VertexLabel {
    Int(i64),
    Str(String),
}

impl std::fmt::Display for VertexLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VertexLabel::Int(n) => write!(f, "{n}"),
            VertexLabel::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for VertexLabel {
    fn from(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(n) => VertexLabel::Int(n),
            Err(_) => VertexLabel::Str(s.to_string()),
        }
    }
}

/// A labeled directed graph: vertices carry a verbatim [`VertexLabel`], and
/// edges carry an interned [`SymbolId`]. Vertex identifiers are densified
/// into `0..num_vertices()` on insertion, in first-seen order, so the
/// resulting [`FiniteAutomaton`] can use them directly as [`StateId`]s.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: IndexSet<VertexLabel>,
    edges: Vec<(StateId, SymbolId, StateId)>,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn vertex_label(&self, id: StateId) -> Option<&VertexLabel> {
        self.vertices.get_index(id as usize)
    }

    #[must_use]
    pub fn vertex_id(&self, label: &VertexLabel) -> Option<StateId> {
        self.vertices.get_index_of(label).map(|idx| idx as StateId)
    }

    /// Interns a vertex label, returning its dense id, inserting it with no
    /// outgoing or incoming edges yet if unseen.
    pub fn intern_vertex(&mut self, label: VertexLabel) -> StateId {
        self.vertices.insert_full(label).0 as StateId
    }

    pub fn add_edge(&mut self, from: VertexLabel, label: SymbolId, to: VertexLabel) {
        let from_id = self.intern_vertex(from);
        let to_id = self.intern_vertex(to);
        self.edges.push((from_id, label, to_id));
    }

    #[must_use]
    pub fn edges(&self) -> &[(StateId, SymbolId, StateId)] {
        &self.edges
    }

    /// Builds the nondeterministic automaton that reads this graph's edges
    /// as transitions, per
    /// `automata.py::get_nondeterministic_automata_from_graph`: every vertex
    /// is both a start and a final state unless the caller restricts either
    /// set.
    #[must_use]
    pub fn to_finite_automaton(
        &self,
        start_states: Option<&[StateId]>,
        final_states: Option<&[StateId]>,
    ) -> FiniteAutomaton {
        let all_states: Vec<StateId> = (0..self.num_vertices() as StateId).collect();
        let start = start_states.map(<[StateId]>::to_vec).unwrap_or_else(|| all_states.clone());
        let finals = final_states.map(<[StateId]>::to_vec).unwrap_or(all_states);
        crate::automaton::fa::from_parts(
            self.num_vertices() as u32,
            start,
            finals,
            &self.edges,
        )
    }
}

/// Parses the small subset of Graphviz DOT this engine needs:
/// `digraph NAME { A -> B [label="x"]; C -> D [label="y"]; }`, one edge
/// statement per line or semicolon-separated, quoted or bare identifiers,
/// a mandatory `label` attribute per edge. Comments (`//` to end of line)
/// and blank lines are ignored.
pub fn load_dot(source: &str, symbols: &mut SymbolTable) -> Result<Graph> {
    let mut graph = Graph::new();
    let body = strip_digraph_wrapper(source)?;
    for statement in split_statements(&body) {
        let statement = strip_comment(statement).trim();
        if statement.is_empty() {
            continue;
        }
        let (from, rest) = split_once_arrow(statement)
            .ok_or_else(|| Error::input_shape(format!("expected 'A -> B [...]', found: {statement}")))?;
        let (to, attrs) = split_target_and_attrs(rest)
            .ok_or_else(|| Error::input_shape(format!("malformed edge statement: {statement}")))?;
        let label = extract_label(attrs)
            .ok_or_else(|| Error::input_shape(format!("edge missing a label attribute: {statement}")))?;

        let from_label = VertexLabel::from(unquote(from));
        let to_label = VertexLabel::from(unquote(to));
        let symbol = symbols.intern(&label);
        graph.add_edge(from_label, symbol, to_label);
    }
    Ok(graph)
}

fn strip_digraph_wrapper(source: &str) -> Result<&str> {
    let open = source
        .find('{')
        .ok_or_else(|| Error::input_shape("missing opening '{' in DOT source"))?;
    let close = source
        .rfind('}')
        .ok_or_else(|| Error::input_shape("missing closing '}' in DOT source"))?;
    if close <= open {
        return Err(Error::input_shape("malformed DOT source braces"));
    }
    Ok(&source[open + 1..close])
}

fn split_statements(body: &str) -> impl Iterator<Item = &str> {
    body.split(['\n', ';']).map(str::trim).filter(|s| !s.is_empty())
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn split_once_arrow(statement: &str) -> Option<(&str, &str)> {
    let idx = statement.find("->")?;
    Some((statement[..idx].trim(), statement[idx + 2..].trim()))
}

fn split_target_and_attrs(rest: &str) -> Option<(&str, &str)> {
    match rest.find('[') {
        Some(idx) => Some((rest[..idx].trim(), &rest[idx..])),
        None => Some((rest.trim(), "")),
    }
}

fn extract_label(attrs: &str) -> Option<String> {
    let idx = attrs.find("label")?;
    let after = &attrs[idx + "label".len()..];
    let eq = after.find('=')?;
    let value = after[eq + 1..].trim_start();
    let value = value.trim_start_matches(|c: char| c == '"');
    let end = value.find(|c: char| c == '"' || c == ',' || c == ']')?;
    Some(value[..end].to_string())
}

fn unquote(token: &str) -> &str {
    token.trim_matches('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_two_cycle_graph() {
        let mut symbols = SymbolTable::new();
        let dot = r#"
            digraph two_cycles {
                0 -> 1 [label="a"];
                1 -> 2 [label="a"];
                2 -> 0 [label="a"];
                0 -> 3 [label="b"];
                3 -> 0 [label="b"];
            }
        "#;
        let graph = load_dot(dot, &mut symbols).unwrap();
        assert_eq!(graph.num_vertices(), 4);
        assert_eq!(graph.edges().len(), 5);
        let a = symbols.intern("a");
        assert!(graph.edges().iter().any(|&(from, sym, to)| {
            sym == a && graph.vertex_label(from) == Some(&VertexLabel::Int(0))
                && graph.vertex_label(to) == Some(&VertexLabel::Int(1))
        }));
    }

    #[test]
    fn preserves_string_vertex_identifiers() {
        let mut symbols = SymbolTable::new();
        let dot = r#"digraph g { "alice" -> "bob" [label="knows"]; }"#;
        let graph = load_dot(dot, &mut symbols).unwrap();
        assert_eq!(
            graph.vertex_label(0),
            Some(&VertexLabel::Str("alice".to_string()))
        );
        assert_eq!(
            graph.vertex_label(1),
            Some(&VertexLabel::Str("bob".to_string()))
        );
    }

    #[test]
    fn missing_label_is_an_input_shape_error() {
        let mut symbols = SymbolTable::new();
        let dot = r#"digraph g { 0 -> 1; }"#;
        assert!(load_dot(dot, &mut symbols).is_err());
    }

    #[test]
    fn to_finite_automaton_defaults_every_vertex_to_start_and_final() {
        let mut symbols = SymbolTable::new();
        let dot = r#"digraph g { 0 -> 1 [label="a"]; }"#;
        let graph = load_dot(dot, &mut symbols).unwrap();
        let fa = graph.to_finite_automaton(None, None);
        assert_eq!(fa.start_states.len(), 2);
        assert_eq!(fa.final_states.len(), 2);
    }
}
