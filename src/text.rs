//! Textual grammar format: `from_text` parses it, `to_text` renders it
//! back. Line-oriented; blank lines are ignored. Each non-blank line has
//! the shape `HEAD -> ALT1 | ALT2 | ... | ALTn`, where each `ALT` is a
//! whitespace-separated token sequence. A token whose first character is
//! an ASCII uppercase letter is a [`Variable`]; one of the reserved
//! tokens `epsilon`, `$`, `ε`, `ϵ`, `Є` denotes the empty body element
//! (dropped); any other token is a [`Terminal`]. The start symbol
//! defaults to `S`.

use crate::error::{CfgError, Result};
use crate::grammar::Cfg;
use crate::production::Production;
use crate::symbol::{GrammarSymbol, Terminal, Variable};

const RESERVED_EPSILON_TOKENS: [&str; 5] = ["epsilon", "$", "ε", "ϵ", "Є"];

fn is_reserved_epsilon(token: &str) -> bool {
    RESERVED_EPSILON_TOKENS.contains(&token)
}

fn token_to_symbol(token: &str) -> Option<GrammarSymbol> {
    if is_reserved_epsilon(token) {
        return None;
    }
    if token.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        Some(GrammarSymbol::Variable(Variable::new(token)))
    } else {
        Some(GrammarSymbol::Terminal(Terminal::new(token)))
    }
}

fn symbol_to_token(symbol: &GrammarSymbol) -> String {
    match symbol {
        GrammarSymbol::Epsilon => "epsilon".to_string(),
        other => other.to_string(),
    }
}

/// Parses the textual grammar format into a [`Cfg`]. Fails with
/// [`CfgError::MissingArrow`] if a non-blank line has no `->`, or
/// [`CfgError::EmptyHead`] if the text before `->` is blank. The start
/// symbol is left to the builder's own default (`S`).
pub fn from_text(text: &str) -> Result<Cfg> {
    let mut builder = Cfg::builder();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (head_part, alts_part) = line
            .split_once("->")
            .ok_or_else(|| CfgError::MissingArrow(line.to_string()))?;
        let head_part = head_part.trim();
        if head_part.is_empty() {
            return Err(CfgError::EmptyHead(line.to_string()));
        }
        let head = Variable::new(head_part);

        for alt in alts_part.split('|') {
            let body: Vec<GrammarSymbol> = alt.split_whitespace().filter_map(token_to_symbol).collect();
            builder = builder.production(Production::new_unfiltered(head.clone(), body));
        }
    }

    Ok(builder.build())
}

/// Renders `grammar` back into the textual format, one line per variable
/// that has productions, with alternatives in production order separated
/// by ` | ` and an empty body rendered as `epsilon`.
pub fn to_text(grammar: &Cfg) -> String {
    let mut lines = Vec::new();
    for v in grammar.variables() {
        let productions = grammar.productions_for(v);
        if productions.is_empty() {
            continue;
        }
        let alts: Vec<String> = productions
            .iter()
            .map(|p| {
                if p.body().is_empty() {
                    "epsilon".to_string()
                } else {
                    p.body().iter().map(symbol_to_token).collect::<Vec<_>>().join(" ")
                }
            })
            .collect();
        lines.push(format!("{} -> {}", v.value(), alts.join(" | ")));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cyk::contains;

    fn word(s: &str) -> Vec<Terminal> {
        s.chars().map(|c| Terminal::new(c.to_string())).collect()
    }

    #[test]
    fn parses_alternatives_and_defaults_start_to_s() {
        let g = from_text("S -> a S b | a b").unwrap();
        assert_eq!(g.start(), Some(&Variable::new("S")));
        assert!(contains(&g, &word("ab")));
        assert!(contains(&g, &word("aabb")));
    }

    #[test]
    fn reserved_epsilon_tokens_drop_to_empty_body() {
        let g = from_text("A -> a | epsilon").unwrap();
        assert!(contains(&g, &word("a")));
        let body_lens: Vec<usize> = g.productions_for(&Variable::new("A")).iter().map(|p| p.body().len()).collect();
        assert!(body_lens.contains(&0));
    }

    #[test]
    fn missing_arrow_is_rejected() {
        let err = from_text("S a b").unwrap_err();
        assert_eq!(err, CfgError::MissingArrow("S a b".to_string()));
    }

    #[test]
    fn empty_head_is_rejected() {
        let err = from_text(" -> a").unwrap_err();
        assert!(matches!(err, CfgError::EmptyHead(_)));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let g = from_text("S -> a\n\n\nS -> b\n").unwrap();
        assert!(contains(&g, &word("a")));
        assert!(contains(&g, &word("b")));
    }

    #[test]
    fn round_trips_through_to_text() {
        let g = from_text("S -> a S b | a b").unwrap();
        let text = to_text(&g);
        let g2 = from_text(&text).unwrap();
        assert!(contains(&g2, &word("aabb")));
    }
}
