//! Deterministic, context-free (D0L) string rewriting.
//!
//! [`Grammar`] holds the raw data of an L-System (axiom, production rules and
//! the rotation angle used later by the turtle). [`RewriteEngine`] owns a grammar
//! together with the string derived from it and the number of passes applied.
//!
//! ```
//! use lsystem_flora::RewriteEngine;
//!
//! let mut engine = RewriteEngine::new();
//! engine.set_axiom("F+F");
//! engine.add_rule('F', "FF");
//!
//! assert_eq!(engine.generate(1), "FF+FF");
//! ```

use crate::error::{GrammarError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

const AXIOM_PREFIX: &str = "axiom:";
const ANGLE_PREFIX: &str = "angle:";
const RULE_ARROW: &str = "->";

/// The data of a D0L-system.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    /// Generation-0 string.
    pub axiom: String,

    /// Production rules. Symbols without an entry are constants.
    pub rules: BTreeMap<char, String>,

    /// Rotation angle in degrees, consumed by the turtle rather than the rewriter.
    pub angle: f32,
}

impl Grammar {
    pub fn new(axiom: impl Into<String>) -> Self {
        Self {
            axiom: axiom.into(),
            ..Default::default()
        }
    }

    /// Adds (or overwrites) a production rule (builder pattern).
    pub fn with_rule(mut self, symbol: char, replacement: impl Into<String>) -> Self {
        self.rules.insert(symbol, replacement.into());
        self
    }

    /// Sets the rotation angle in degrees (builder pattern).
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Applies one parallel rewrite pass to `input`.
    ///
    /// Every symbol is looked up against the rules of *this* grammar and the
    /// result is written to a fresh buffer, so replacement text is never
    /// rescanned within the same pass.
    pub fn rewrite(&self, input: &str) -> String {
        let mut next = String::with_capacity(input.len() * 2);
        for symbol in input.chars() {
            match self.rules.get(&symbol) {
                Some(replacement) => next.push_str(replacement),
                None => next.push(symbol),
            }
        }
        next
    }
}

/// Outcome of parsing a rule source.
///
/// Produced only when the source itself was readable; individual lines that
/// could not be used are counted or reported here instead of failing the load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Whether an `axiom:` line was found.
    pub axiom_set: bool,
    /// Whether an `angle:` line was parsed successfully.
    pub angle_set: bool,
    /// Number of `symbol->replacement` lines accepted.
    pub rules_loaded: usize,
    /// Non-blank lines with no recognised shape.
    pub ignored_lines: usize,
    /// Recoverable line-level problems.
    pub warnings: Vec<GrammarError>,
}

impl LoadReport {
    /// Returns `true` when no line produced a warning.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Holds a [`Grammar`] and the string derived from it.
///
/// The held string always equals the axiom rewritten exactly
/// [`generation`](Self::generation) times.
#[derive(Clone, Debug, Default)]
pub struct RewriteEngine {
    grammar: Grammar,
    current: String,
    generation: usize,
}

impl RewriteEngine {
    /// Creates an engine with an empty axiom, no rules and a zero angle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine positioned at generation 0 of `grammar`.
    pub fn from_grammar(grammar: Grammar) -> Self {
        let current = grammar.axiom.clone();
        Self {
            grammar,
            current,
            generation: 0,
        }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn axiom(&self) -> &str {
        &self.grammar.axiom
    }

    /// Replaces the axiom and rewinds to generation 0.
    pub fn set_axiom(&mut self, axiom: impl Into<String>) {
        self.grammar.axiom = axiom.into();
        self.reset_current();
    }

    pub fn angle(&self) -> f32 {
        self.grammar.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.grammar.angle = angle;
    }

    pub fn rules(&self) -> &BTreeMap<char, String> {
        &self.grammar.rules
    }

    /// Returns the replacement registered for `symbol`, if any.
    pub fn rule(&self, symbol: char) -> Option<&str> {
        self.grammar.rules.get(&symbol).map(String::as_str)
    }

    /// Inserts or overwrites the rule for `symbol`.
    ///
    /// `replacement` may be empty (erasure) or contain `symbol` itself.
    pub fn add_rule(&mut self, symbol: char, replacement: impl Into<String>) {
        self.grammar.rules.insert(symbol, replacement.into());
    }

    /// Removes every rule. All symbols become constants.
    pub fn clear_rules(&mut self) {
        self.grammar.rules.clear();
    }

    /// The string produced by the last [`generate`](Self::generate) (or the axiom).
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Number of rewrite passes applied to [`current`](Self::current).
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Rewinds to generation 0 without touching the rules.
    pub fn reset(&mut self) {
        self.reset_current();
        debug!("rewrite engine reset to axiom");
    }

    fn reset_current(&mut self) {
        self.current.clone_from(&self.grammar.axiom);
        self.generation = 0;
    }

    /// Restarts from the axiom and applies exactly `generations` rewrite passes.
    pub fn generate(&mut self, generations: usize) -> &str {
        let mut current = self.grammar.axiom.clone();
        for _ in 0..generations {
            current = self.grammar.rewrite(&current);
        }
        self.current = current;
        self.generation = generations;

        debug!(
            generation = self.generation,
            length = self.current.chars().count(),
            "generation complete"
        );
        &self.current
    }

    /// Computes the length [`generate`](Self::generate) would produce after
    /// `generations` passes, without building the string.
    ///
    /// Works on symbol multiplicities, so it stays cheap even when the real
    /// string would not fit in memory. Saturates at `u64::MAX`.
    pub fn estimate_length(&self, generations: usize) -> u64 {
        let expansions: HashMap<char, HashMap<char, u64>> = self
            .grammar
            .rules
            .iter()
            .map(|(symbol, replacement)| (*symbol, symbol_counts(replacement)))
            .collect();

        let mut counts = symbol_counts(&self.grammar.axiom);
        for _ in 0..generations {
            if counts.is_empty() {
                break;
            }
            let mut next: HashMap<char, u64> = HashMap::with_capacity(counts.len());
            for (symbol, n) in counts {
                match expansions.get(&symbol) {
                    Some(expansion) => {
                        for (produced, m) in expansion {
                            let slot = next.entry(*produced).or_default();
                            *slot = slot.saturating_add(n.saturating_mul(*m));
                        }
                    }
                    None => {
                        let slot = next.entry(symbol).or_default();
                        *slot = slot.saturating_add(n);
                    }
                }
            }
            counts = next;
        }

        counts.values().fold(0u64, |acc, n| acc.saturating_add(*n))
    }

    /// Loads a rule source from disk.
    ///
    /// The whole file is read before anything is modified, so an unreadable
    /// source leaves the grammar exactly as it was.
    pub fn load_rules_from_path(&mut self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let path = path.as_ref();
        let source =
            std::fs::read_to_string(path).map_err(|source| GrammarError::SourceUnavailable {
                origin: path.display().to_string(),
                source,
            })?;
        Ok(self.load_rules_from_str(&source))
    }

    /// Loads a rule source from any reader, e.g. an embedded asset or a socket.
    ///
    /// Like [`load_rules_from_path`](Self::load_rules_from_path), the reader is
    /// drained before the grammar is touched. Read failures and non-UTF-8 input
    /// are reported as [`GrammarError::SourceUnavailable`] labelled `origin`.
    pub fn load_rules_from_reader(
        &mut self,
        mut reader: impl Read,
        origin: &str,
    ) -> Result<LoadReport> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| GrammarError::SourceUnavailable {
                origin: origin.to_string(),
                source,
            })?;
        Ok(self.load_rules_from_str(&text))
    }

    /// Parses line-oriented rule text.
    ///
    /// Recognised lines (after stripping leading whitespace):
    ///
    /// * `axiom: <symbols>`
    /// * `angle: <degrees>`
    /// * `<symbol>-><replacement>`
    ///
    /// Existing rules are discarded first. Anything else is ignored. An
    /// unparsable angle keeps the previous value and is reported as a warning.
    /// The engine is rewound to generation 0 afterwards.
    pub fn load_rules_from_str(&mut self, source: &str) -> LoadReport {
        let mut report = LoadReport::default();
        self.grammar.rules.clear();

        for (index, raw) in source.lines().enumerate() {
            let line = raw.trim_start_matches([' ', '\t']);
            if line.is_empty() {
                continue;
            }

            if let Some(axiom) = line.strip_prefix(AXIOM_PREFIX) {
                self.grammar.axiom = axiom.trim_start_matches([' ', '\t']).to_string();
                report.axiom_set = true;
                debug!(axiom = %self.grammar.axiom, "axiom loaded");
            } else if let Some(value) = line.strip_prefix(ANGLE_PREFIX) {
                let value = value.trim();
                match value.parse::<f32>() {
                    Ok(angle) => {
                        self.grammar.angle = angle;
                        report.angle_set = true;
                        debug!(angle, "angle loaded");
                    }
                    Err(_) => {
                        warn!(
                            line = index + 1,
                            value,
                            kept = self.grammar.angle,
                            "malformed angle, keeping previous value"
                        );
                        report.warnings.push(GrammarError::MalformedAngle {
                            line: index + 1,
                            value: value.to_string(),
                        });
                    }
                }
            } else if let Some((symbol, replacement)) = split_rule(line) {
                debug!(%symbol, replacement, "rule loaded");
                self.grammar.rules.insert(symbol, replacement.to_string());
                report.rules_loaded += 1;
            } else {
                report.ignored_lines += 1;
            }
        }

        self.reset_current();
        info!(
            rules = report.rules_loaded,
            warnings = report.warnings.len(),
            "rule source loaded"
        );
        report
    }

    /// Replaces every rule from the compact editor form, where entries are
    /// separated by newlines or commas: `F->FF, X->F[+X]-X`.
    ///
    /// Entries are trimmed; entries without an arrow after the first
    /// character are skipped. Returns the number of rules installed.
    pub fn set_rules_from_list(&mut self, list: &str) -> usize {
        self.grammar.rules.clear();
        let mut installed = 0;
        for entry in list.split(['\n', ',']).map(str::trim) {
            if let Some((symbol, replacement)) = split_rule(entry) {
                self.grammar.rules.insert(symbol, replacement.trim().to_string());
                installed += 1;
            }
        }
        installed
    }
}

/// Splits `X->replacement`. The symbol is the first character of the line;
/// an arrow at position 0 has no symbol and is rejected.
fn split_rule(line: &str) -> Option<(char, &str)> {
    let arrow = line.find(RULE_ARROW)?;
    if arrow == 0 {
        return None;
    }
    let symbol = line.chars().next()?;
    Some((symbol, &line[arrow + RULE_ARROW.len()..]))
}

fn symbol_counts(text: &str) -> HashMap<char, u64> {
    let mut counts = HashMap::new();
    for symbol in text.chars() {
        *counts.entry(symbol).or_default() += 1;
    }
    counts
}
