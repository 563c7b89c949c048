//! Opaque expressions.
//!
//! Defaults, check conditions, index predicates and option lists are kept
//! as flat sequences of atoms rather than expression trees. That is enough
//! to print them back faithfully and to compare them token by token.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Identifier;

/// Words after which `(` opens a parenthesized operand rather than an
/// argument list.
const OPERATOR_WORDS: &[&str] = &[
    "AND", "OR", "NOT", "IN", "IS", "LIKE", "ILIKE", "BETWEEN", "CASE", "WHEN", "THEN", "ELSE",
    "AS", "EXISTS", "ANY", "ALL",
];

/// A flat sequence of expression atoms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Expr {
    pub atoms: Vec<Identifier>,
}

impl Expr {
    #[must_use]
    pub const fn new(atoms: Vec<Identifier>) -> Self {
        Self { atoms }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Comparison form: folded atom names separated by single spaces.
    #[must_use]
    pub fn diff_form(&self) -> String {
        self.atoms
            .iter()
            .map(|atom| atom.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Prints the atoms as written, spacing them like hand-written SQL.
    ///
    /// Operators in `tight` are printed without surrounding spaces
    /// (`x::INT`).
    #[must_use]
    pub fn render(&self, tight: &[&str]) -> String {
        let mut out = String::new();
        for (i, atom) in self.atoms.iter().enumerate() {
            if i > 0 {
                let prev = &self.atoms[i - 1].raw;
                let before_prev = i.checked_sub(2).map(|j| self.atoms[j].raw.as_str());
                if needs_space(before_prev, prev, &atom.raw, tight) {
                    out.push(' ');
                }
            }
            out.push_str(&atom.raw);
        }
        out
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[]))
    }
}

fn is_word(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
}

fn is_operator_word(text: &str) -> bool {
    OPERATOR_WORDS
        .iter()
        .any(|word| word.eq_ignore_ascii_case(text))
}

/// True for atoms after which a sign is unary: openers, separators and
/// operators.
fn expects_operand(text: &str) -> bool {
    if matches!(text, "(" | "[" | ",") || is_operator_word(text) {
        return true;
    }
    text.chars()
        .next()
        .is_some_and(|c| !c.is_alphanumeric() && !matches!(c, ')' | ']' | '\'' | '"' | '`' | '_'))
}

fn needs_space(before_prev: Option<&str>, prev: &str, next: &str, tight: &[&str]) -> bool {
    if matches!(prev, "(" | "[" | ".") || tight.contains(&prev) {
        return false;
    }
    if matches!(next, ")" | "]" | "," | ".") || tight.contains(&next) {
        return false;
    }
    if next == "(" && is_word(prev) && !is_operator_word(prev) {
        return false;
    }
    if matches!(prev, "-" | "+") && before_prev.is_none_or(expects_operand) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(atoms: &[&str]) -> Expr {
        Expr::new(atoms.iter().map(|a| Identifier::new(*a)).collect())
    }

    #[test]
    fn test_render_comparison() {
        assert_eq!(expr(&["age", ">=", "0"]).render(&[]), "age >= 0");
    }

    #[test]
    fn test_render_function_call() {
        assert_eq!(
            expr(&["nextval", "(", "'seq'", ")"]).render(&[]),
            "nextval('seq')"
        );
        assert_eq!(expr(&["now", "(", ")"]).render(&[]), "now()");
    }

    #[test]
    fn test_render_operator_word_before_paren() {
        assert_eq!(
            expr(&["status", "IN", "(", "'a'", ",", "'b'", ")"]).render(&[]),
            "status IN ('a', 'b')"
        );
        assert_eq!(
            expr(&["a", ">", "0", "AND", "(", "b", ")"]).render(&[]),
            "a > 0 AND (b)"
        );
    }

    #[test]
    fn test_render_unary_minus() {
        assert_eq!(expr(&["-", "1"]).render(&[]), "-1");
        assert_eq!(expr(&["x", ">", "-", "1"]).render(&[]), "x > -1");
        assert_eq!(expr(&["x", "-", "1"]).render(&[]), "x - 1");
    }

    #[test]
    fn test_render_tight_operators() {
        let cast = expr(&["'a'", "::", "regclass"]);
        assert_eq!(cast.render(&["::"]), "'a'::regclass");
        assert_eq!(cast.render(&[]), "'a' :: regclass");
    }

    #[test]
    fn test_render_qualified_name() {
        assert_eq!(expr(&["t", ".", "c"]).render(&[]), "t.c");
    }

    #[test]
    fn test_diff_form_ignores_raw_spelling() {
        let a = Expr::new(vec![
            Identifier {
                name: "age".into(),
                quote: None,
                raw: "AGE".into(),
            },
            Identifier::new(">"),
            Identifier::new("0"),
        ]);
        assert_eq!(a.diff_form(), expr(&["age", ">", "0"]).diff_form());
    }
}
