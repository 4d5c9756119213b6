// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! L-system grammars and their expansion into turtle commands.
//!
//! A grammar is an ordered list of production rules.  The first rule is
//! the root: its replacement is the axiom, and it need not have a
//! symbol of its own.  Expansion rewrites the axiom character by
//! character, recursing into the rule for each symbol until the
//! requested level is exhausted.  Only `F`, `f`, `+`, `-`, `[` and `]`
//! survive into the result; they are the only symbols the turtle
//! understands.

use crate::error::FractalError;

/// A single production, `symbol -> replacement`.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    /// The symbol this rule rewrites.  `None` only for a root that is
    /// never referred to by name.
    pub symbol: Option<char>,
    /// What the symbol becomes.
    pub replacement: String,
}

impl Rule {
    /// A rule rewriting `symbol`.
    pub fn new(symbol: char, replacement: &str) -> Self {
        Rule {
            symbol: Some(symbol),
            replacement: replacement.to_string(),
        }
    }

    /// A nameless root rule.
    pub fn axiom(replacement: &str) -> Self {
        Rule {
            symbol: None,
            replacement: replacement.to_string(),
        }
    }

    /// Read one `symbol:replacement` segment.  Both halves are trimmed,
    /// and the symbol may be empty.
    pub fn parse(segment: &str) -> Result<Self, FractalError> {
        let colon = match segment.find(':') {
            None => return Err(FractalError::MalformedRule(segment.to_string())),
            Some(colon) => colon,
        };
        let name = segment[..colon].trim();
        let replacement = segment[colon + 1..].trim();
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(Rule::axiom(replacement)),
            (Some(symbol), None) => Ok(Rule::new(symbol, replacement)),
            _ => Err(FractalError::MalformedRule(segment.to_string())),
        }
    }
}

/// A turtle-interpreted L-system: a turning angle and a grammar whose
/// first rule is the root.
#[derive(Clone, Debug, PartialEq)]
pub struct LSystem {
    /// Degrees turned by each `+` or `-`.
    pub angle: f64,
    rules: Vec<Rule>,
}

impl LSystem {
    /// Build from already-constructed rules; the first is the root.
    pub fn new(angle: f64, rules: Vec<Rule>) -> Result<Self, FractalError> {
        if rules.is_empty() {
            return Err(FractalError::EmptyGrammar);
        }
        Ok(LSystem { angle, rules })
    }

    /// Build from the compact notation `"A:xyz;B:uvw"`, root first.
    pub fn parse(angle: f64, rules: &str) -> Result<Self, FractalError> {
        let rules = rules
            .split(';')
            .filter(|segment| !segment.trim().is_empty())
            .map(Rule::parse)
            .collect::<Result<Vec<_>, _>>()?;
        LSystem::new(angle, rules)
    }

    /// The rule whose replacement is the axiom.
    pub fn root(&self) -> &Rule {
        &self.rules[0]
    }

    /// Every rule, root first.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The first rule rewriting `symbol`, if any.  The root takes part
    /// in the search when it has a symbol.
    pub fn rule(&self, symbol: char) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.symbol == Some(symbol))
    }

    /// Expand the axiom `level` times into a string of turtle commands.
    /// Recursion depth never exceeds `level`.
    pub fn expand(&self, level: usize) -> Result<String, FractalError> {
        self.expand_within(level, usize::max_value())
    }

    /// Like `expand`, but give up with `ExpansionBudgetExhausted` once
    /// more than `budget` symbols have been visited.  Symbols that
    /// vanish at the leaves still count.
    pub fn expand_within(&self, level: usize, budget: usize) -> Result<String, FractalError> {
        let mut result = String::new();
        let mut remaining = budget;
        self.expand_into(&self.root().replacement, level, &mut result, &mut remaining)
            .map_err(|e| match e {
                FractalError::ExpansionBudgetExhausted(_) => {
                    FractalError::ExpansionBudgetExhausted(budget)
                }
                other => other,
            })?;
        Ok(result)
    }

    fn expand_into(
        &self,
        pattern: &str,
        level: usize,
        result: &mut String,
        remaining: &mut usize,
    ) -> Result<(), FractalError> {
        for symbol in pattern.chars() {
            if *remaining == 0 {
                return Err(FractalError::ExpansionBudgetExhausted(0));
            }
            *remaining -= 1;
            match symbol {
                '+' | '-' | '[' | ']' => result.push(symbol),
                _ => match self.rule(symbol) {
                    Some(rule) if level > 0 => {
                        self.expand_into(&rule.replacement, level - 1, result, remaining)?
                    }
                    _ if symbol == 'F' || symbol == 'f' => result.push(symbol),
                    // Level exhausted on a non-drawing symbol: it vanishes.
                    Some(_) => {}
                    None => return Err(FractalError::UnknownSymbol(symbol)),
                },
            }
        }
        Ok(())
    }
}
