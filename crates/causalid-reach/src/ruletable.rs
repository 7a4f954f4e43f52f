//! Rule table parsing and transition precomputation.
//!
//! A rule table is a small declarative program:
//!
//! ```text
//! EDGES --> <--, <->
//! SETS X, Z
//! COLORS pass, block
//! START <-- [pass] AT X
//! OUTPUT ... [pass]
//!
//! # transition rules: previous state | next state | condition
//! -->, <-> [pass] | <--, <-> [pass] | current in Z
//! ...      [pass] | ...      [pass] | current not in Z
//! ```
//!
//! `EDGES` declares traversal strings: a comma-separated list of groups, a
//! two-string group being an asymmetric edge (the second string is how the
//! edge reads when crossed against its orientation) and a one-string group a
//! symmetric edge. `START` seeds the automaton at every member of the listed
//! sets, `OUTPUT` selects which visited states report their vertex, and each
//! rule line matches a pair of `(edge, color)` state patterns with `...` as
//! wildcard. For any concrete state pair, the first matching rule wins.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::dense::{Dense3, Dense4};
use crate::expr::Expr;
use crate::instance::Sets;
use crate::reach::State;

/// Compiled rule table: vocabularies, seed and output state templates, and
/// dense transition lookup tables.
#[derive(Debug)]
pub struct Ruletable {
    edges: FxHashMap<String, (usize, usize)>,
    colors: FxHashMap<String, usize>,
    sets: FxHashMap<String, usize>,
    starts: Vec<(usize, usize, usize)>,
    outputs: Vec<(usize, usize)>,
    rules: Vec<Rule>,
    rule_for: Dense4<usize>,
    colors_for: Dense3<Vec<usize>>,
}

/// No rule matches the state pair; such cells are never queried because
/// `colors_for` only offers colors backed by a rule.
const NO_RULE: usize = usize::MAX;

impl Ruletable {
    /// Reads and compiles a rule table from a file.
    ///
    /// # Errors
    /// Fails if the file cannot be read or the table does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Ruletable, RuletableError> {
        fs::read_to_string(path)?.parse()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Tables without a `COLORS` line run on a single implicit color.
    pub(crate) fn color_count(&self) -> usize {
        self.colors.len().max(1)
    }

    pub(crate) fn set_count(&self) -> usize {
        self.sets.len()
    }

    pub(crate) fn edge_ids(&self, edge_type: &str) -> Option<(usize, usize)> {
        self.edges.get(edge_type).copied()
    }

    pub(crate) fn set_id(&self, role: &str) -> Option<usize> {
        self.sets.get(role).copied()
    }

    /// Role names this table accepts, for diagnostics.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// Whether `other` assigns exactly the same traversal ids to the same
    /// edge strings. Graphs indexed against one table remain valid for any
    /// table with the same vocabulary.
    pub fn same_edge_vocabulary(&self, other: &Ruletable) -> bool {
        self.edges == other.edges
    }

    pub(crate) fn starts(&self) -> &[(usize, usize, usize)] {
        &self.starts
    }

    pub(crate) fn outputs(&self) -> &[(usize, usize)] {
        &self.outputs
    }

    /// Colors a transition into `next_edge` may carry, given the previous
    /// state's `(edge, color)`.
    #[inline]
    pub(crate) fn possible_colors(&self, edge: usize, color: usize, next_edge: usize) -> &[usize] {
        self.colors_for.get(edge, color, next_edge)
    }

    /// Evaluates the condition of the rule governing `prev -> next`.
    #[inline]
    pub(crate) fn passes(&self, sets: &Sets, prev: State, next: State) -> bool {
        let rule = *self.rule_for.get(prev.edge, prev.color, next.edge, next.color);
        debug_assert_ne!(rule, NO_RULE);
        self.rules[rule].condition.evaluate(sets, prev.node, next.node)
    }

    fn precompute(&mut self) {
        self.rule_for = Dense4::filled(
            self.edge_count(),
            self.color_count(),
            self.edge_count(),
            self.color_count(),
            NO_RULE,
        );
        self.colors_for = Dense3::filled(
            self.edge_count(),
            self.color_count(),
            self.edge_count(),
            Vec::new(),
        );
        for e1 in 0..self.edge_count() {
            for c1 in 0..self.color_count() {
                for e2 in 0..self.edge_count() {
                    for c2 in 0..self.color_count() {
                        let position = self
                            .rules
                            .iter()
                            .position(|rule| rule.matches(e1, c1, e2, c2));
                        if let Some(i) = position {
                            *self.rule_for.get_mut(e1, c1, e2, c2) = i;
                            self.colors_for.get_mut(e1, c1, e2).push(c2);
                        }
                    }
                }
            }
        }
    }
}

impl FromStr for Ruletable {
    type Err = RuletableError;

    fn from_str(text: &str) -> Result<Ruletable, RuletableError> {
        let mut table = Ruletable {
            edges: FxHashMap::default(),
            colors: FxHashMap::default(),
            sets: FxHashMap::default(),
            starts: Vec::new(),
            outputs: Vec::new(),
            rules: Vec::new(),
            rule_for: Dense4::filled(0, 0, 0, 0, NO_RULE),
            colors_for: Dense3::filled(0, 0, 0, Vec::new()),
        };
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            table.consume_line(line).map_err(|message| RuletableError::Parse {
                line: index + 1,
                message,
            })?;
        }
        table.precompute();
        Ok(table)
    }
}

impl Ruletable {
    fn consume_line(&mut self, line: &str) -> Result<(), String> {
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }
        if let Some(rest) = line.strip_prefix("EDGES") {
            self.edges = parse_edges(rest.trim())?;
        } else if let Some(rest) = line.strip_prefix("COLORS") {
            self.colors = parse_names(rest.trim(), "color")?;
        } else if let Some(rest) = line.strip_prefix("SETS") {
            self.sets = parse_names(rest.trim(), "set")?;
        } else if let Some(rest) = line.strip_prefix("START") {
            let mut seeds = self.parse_start(rest.trim())?;
            self.starts.append(&mut seeds);
        } else if let Some(rest) = line.strip_prefix("OUTPUT") {
            let mut outputs = self.parse_output(rest.trim())?;
            self.outputs.append(&mut outputs);
        } else {
            let rule = self.parse_rule(line)?;
            self.rules.push(rule);
        }
        Ok(())
    }

    fn parse_start(&self, s: &str) -> Result<Vec<(usize, usize, usize)>, String> {
        // pad so a leading/trailing ` AT ` still splits
        let padded = format!(" {s} ");
        let parts: Vec<&str> = padded.split(" AT ").collect();
        if parts.len() != 2 {
            return Err(format!(
                "expected exactly one 'AT' separating state pattern and seed sets, found {}",
                parts.len() - 1
            ));
        }
        let (edge_pattern, color_pattern) = self.parse_state_pattern(parts[0].trim())?;
        let mut set_ids = Vec::new();
        for name in parts[1].split(',').map(str::trim) {
            let id = self
                .sets
                .get(name)
                .ok_or_else(|| format!("undeclared set '{name}'"))?;
            set_ids.push(*id);
        }
        let mut starts = Vec::new();
        for &set in &set_ids {
            for &edge in &edge_pattern.expand(self.edge_count()) {
                for &color in &color_pattern.expand(self.color_count()) {
                    starts.push((set, edge, color));
                }
            }
        }
        Ok(starts)
    }

    fn parse_output(&self, s: &str) -> Result<Vec<(usize, usize)>, String> {
        let (edge_pattern, color_pattern) = self.parse_state_pattern(s)?;
        let mut outputs = Vec::new();
        for &edge in &edge_pattern.expand(self.edge_count()) {
            for &color in &color_pattern.expand(self.color_count()) {
                outputs.push((edge, color));
            }
        }
        Ok(outputs)
    }

    fn parse_rule(&self, line: &str) -> Result<Rule, String> {
        let parts: Vec<&str> = line.splitn(3, '|').collect();
        if parts.len() != 3 {
            return Err(
                "expected 'previous | next | condition' with two '|' separators".to_owned(),
            );
        }
        let (prev_edge, prev_color) = self.parse_state_pattern(parts[0].trim())?;
        let (next_edge, next_color) = self.parse_state_pattern(parts[1].trim())?;
        let condition = Expr::parse(parts[2].trim(), &self.sets)?;
        Ok(Rule {
            prev_edge,
            prev_color,
            next_edge,
            next_color,
            condition,
        })
    }

    /// Parses `<edges>` or `<edges> [<colors>]` into a pattern pair.
    fn parse_state_pattern(&self, s: &str) -> Result<(Pattern, Pattern), String> {
        let (edge_part, color_part) = match s.find('[') {
            None => {
                if s.contains(']') {
                    return Err("closing ']' without opening '['".to_owned());
                }
                (s, "")
            }
            Some(open) => {
                let rest = &s[open + 1..];
                let close = rest.find(']').ok_or("missing closing ']'")?;
                if !rest[close + 1..].trim().is_empty() {
                    return Err("unexpected input after closing ']'".to_owned());
                }
                (&s[..open], &rest[..close])
            }
        };
        let edge_pattern = parse_pattern(edge_part, |name| {
            self.edges.get(name).map(|&(forward, _)| forward)
        })?;
        let color_pattern = if color_part.trim().is_empty() {
            Pattern::Any
        } else {
            parse_pattern(color_part, |name| self.colors.get(name).copied())?
        };
        Ok((edge_pattern, color_pattern))
    }
}

/// Matches one coordinate of a state: a concrete list of ids or everything.
#[derive(Clone, Debug)]
enum Pattern {
    Any,
    OneOf(Vec<usize>),
}

impl Pattern {
    fn matches(&self, id: usize) -> bool {
        match self {
            Pattern::Any => true,
            Pattern::OneOf(ids) => ids.contains(&id),
        }
    }

    fn expand(&self, count: usize) -> Vec<usize> {
        match self {
            // degenerate tables may have zero declared colors but still run
            // on the single implicit color
            Pattern::Any => (0..count.max(1)).collect(),
            Pattern::OneOf(ids) => ids.clone(),
        }
    }
}

fn parse_pattern(
    s: &str,
    lookup: impl Fn(&str) -> Option<usize>,
) -> Result<Pattern, String> {
    let tokens: Vec<&str> = s.split(',').map(str::trim).collect();
    if tokens.len() == 1 && tokens[0] == "..." {
        return Ok(Pattern::Any);
    }
    let mut ids = Vec::new();
    for token in tokens {
        if token == "..." {
            return Err("wildcard '...' cannot be mixed with explicit names".to_owned());
        }
        if token.is_empty() {
            return Err("empty name in pattern".to_owned());
        }
        ids.push(lookup(token).ok_or_else(|| format!("undeclared name '{token}'"))?);
    }
    Ok(Pattern::OneOf(ids))
}

fn parse_edges(s: &str) -> Result<FxHashMap<String, (usize, usize)>, String> {
    let mut edges = FxHashMap::default();
    let mut next_id = 0;
    for group in s.split(',') {
        let tokens: Vec<&str> = group.split_whitespace().collect();
        match tokens.as_slice() {
            [symmetric] => {
                if edges.insert((*symmetric).to_owned(), (next_id, next_id)).is_some() {
                    return Err(format!("edge '{symmetric}' declared twice"));
                }
                next_id += 1;
            }
            [forward, reverse] => {
                if edges.insert((*forward).to_owned(), (next_id, next_id + 1)).is_some() {
                    return Err(format!("edge '{forward}' declared twice"));
                }
                if edges.insert((*reverse).to_owned(), (next_id + 1, next_id)).is_some() {
                    return Err(format!("edge '{reverse}' declared twice"));
                }
                next_id += 2;
            }
            [] => return Err("empty edge group".to_owned()),
            _ => {
                return Err(format!(
                    "edge group '{}' has more than two strings; expected one (symmetric) or two (asymmetric)",
                    group.trim()
                ))
            }
        }
    }
    Ok(edges)
}

fn parse_names(s: &str, kind: &str) -> Result<FxHashMap<String, usize>, String> {
    let mut names = FxHashMap::default();
    for (i, name) in s.split(',').map(str::trim).enumerate() {
        if name.is_empty() {
            return Err(format!("empty {kind} name"));
        }
        if names.insert(name.to_owned(), i).is_some() {
            return Err(format!("{kind} '{name}' declared twice"));
        }
    }
    Ok(names)
}

/// One transition rule: a state-pair pattern and its condition.
#[derive(Debug)]
pub(crate) struct Rule {
    prev_edge: Pattern,
    prev_color: Pattern,
    next_edge: Pattern,
    next_color: Pattern,
    pub(crate) condition: Expr,
}

impl Rule {
    fn matches(&self, e1: usize, c1: usize, e2: usize, c2: usize) -> bool {
        self.prev_edge.matches(e1)
            && self.prev_color.matches(c1)
            && self.next_edge.matches(e2)
            && self.next_color.matches(c2)
    }
}

/// Errors raised while loading a rule table.
#[derive(Error, Debug)]
pub enum RuletableError {
    #[error("failed to read rule table: {0}")]
    Io(#[from] std::io::Error),
    #[error("rule table line {line}: {message}")]
    Parse { line: usize, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asymmetric_and_symmetric_edges() {
        let table: Ruletable =
            "EDGES --> <--, ---\nSETS X\nSTART --> AT X\nOUTPUT -->\n--> | --> | true"
                .parse()
                .unwrap();
        assert_eq!(table.edge_ids("-->"), Some((0, 1)));
        assert_eq!(table.edge_ids("<--"), Some((1, 0)));
        assert_eq!(table.edge_ids("---"), Some((2, 2)));
        assert_eq!(table.edge_count(), 3);
        assert_eq!(table.color_count(), 1);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let table: Ruletable = "EDGES --> <--\nSETS X, Z\nSTART --> AT X\nOUTPUT -->\n\
             --> | --> | current in Z\n\
             ... | ... | current not in Z"
            .parse()
            .unwrap();
        // the (-->, -->) cell is governed by the first rule
        let sets = Sets::new([("X", &[0usize][..]), ("Z", &[1usize][..])], &table).unwrap();
        let prev = State { node: 1, edge: 0, color: 0 };
        let next = State { node: 2, edge: 0, color: 0 };
        assert!(table.passes(&sets, prev, next));
        let prev = State { node: 2, edge: 0, color: 0 };
        assert!(!table.passes(&sets, prev, next));
        // the (<--, -->) cell falls through to the wildcard rule
        let prev = State { node: 2, edge: 1, color: 0 };
        assert!(table.passes(&sets, prev, next));
    }

    #[test]
    fn test_start_cross_product() {
        let table: Ruletable = "EDGES --> <--\nSETS X, Y\nCOLORS a, b\n\
             START ... [a] AT X, Y\nOUTPUT ... [b]\n... | ... | true"
            .parse()
            .unwrap();
        // two sets x two edges x one color
        assert_eq!(table.starts().len(), 4);
        // two edges x one color
        assert_eq!(table.outputs().len(), 2);
    }

    #[test]
    fn test_parse_error_carries_line() {
        let err = "EDGES --> <--\nSETS X\nSTART --> AT Q\nOUTPUT -->".parse::<Ruletable>();
        match err {
            Err(RuletableError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let table: Ruletable =
            "# a comment\n\nEDGES --> <--\nSETS X\nSTART --> AT X\nOUTPUT -->\n--> | --> | true"
                .parse()
                .unwrap();
        assert_eq!(table.edge_count(), 2);
    }
}
