//! Names: identifiers, qualified object names and indexed columns.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A name or atom as it appeared in the source.
///
/// `name` is the comparison form (folded according to the dialect), `raw`
/// is the exact source text used for printing. For string literals and
/// operators both are the source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Identifier {
    pub name: String,
    /// Quote character for quoted identifiers and string literals.
    pub quote: Option<char>,
    pub raw: String,
}

impl Identifier {
    /// Creates an unquoted identifier printed exactly as `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            raw: name.clone(),
            name,
            quote: None,
        }
    }

    /// Creates a quoted identifier; embedded quotes are doubled in `raw`.
    #[must_use]
    pub fn quoted(name: impl Into<String>, quote: char) -> Self {
        let name = name.into();
        let mut raw = String::with_capacity(name.len() + 2);
        raw.push(quote);
        for c in name.chars() {
            if c == quote {
                raw.push(quote);
            }
            raw.push(c);
        }
        raw.push(quote);
        Self {
            name,
            quote: Some(quote),
            raw,
        }
    }

    /// Returns true if the identifier was written with quotes.
    #[must_use]
    pub const fn is_quoted(&self) -> bool {
        self.quote.is_some()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A possibly schema-qualified name such as `public.users`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectName {
    pub schema: Option<Identifier>,
    pub name: Identifier,
}

impl ObjectName {
    /// Creates an unqualified name.
    #[must_use]
    pub const fn new(name: Identifier) -> Self {
        Self { schema: None, name }
    }

    /// Creates a schema-qualified name.
    #[must_use]
    pub const fn qualified(schema: Identifier, name: Identifier) -> Self {
        Self {
            schema: Some(schema),
            name,
        }
    }

    /// Comparison form: folded names joined with `.`.
    #[must_use]
    pub fn diff_form(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema.name, self.name.name),
            None => self.name.name.clone(),
        }
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{schema}.")?;
        }
        write!(f, "{}", self.name)
    }
}

/// A column reference in a key or index, with its sort direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnIdent {
    pub name: Identifier,
    pub desc: bool,
}

impl ColumnIdent {
    #[must_use]
    pub const fn new(name: Identifier) -> Self {
        Self { name, desc: false }
    }

    #[must_use]
    pub const fn desc(name: Identifier) -> Self {
        Self { name, desc: true }
    }

    #[must_use]
    pub fn diff_form(&self) -> String {
        if self.desc {
            format!("{} DESC", self.name.name)
        } else {
            self.name.name.clone()
        }
    }
}

impl fmt::Display for ColumnIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.desc {
            f.write_str(" DESC")?;
        }
        Ok(())
    }
}

/// Prints columns as `a, b DESC`.
#[must_use]
pub fn column_list(columns: &[ColumnIdent]) -> String {
    columns
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comparison form of a column list.
#[must_use]
pub fn column_list_diff_form(columns: &[ColumnIdent]) -> String {
    columns
        .iter()
        .map(ColumnIdent::diff_form)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_identifier_doubles_quotes() {
        let ident = Identifier::quoted("a\"b", '"');
        assert_eq!(ident.raw, "\"a\"\"b\"");
        assert_eq!(ident.name, "a\"b");
        assert!(ident.is_quoted());
    }

    #[test]
    fn test_object_name_forms() {
        let name = ObjectName::qualified(
            Identifier::new("public"),
            Identifier {
                name: "users".into(),
                quote: None,
                raw: "Users".into(),
            },
        );
        assert_eq!(name.to_string(), "public.Users");
        assert_eq!(name.diff_form(), "public.users");
    }

    #[test]
    fn test_column_ident_prints_desc_only() {
        let cols = vec![
            ColumnIdent::new(Identifier::new("a")),
            ColumnIdent::desc(Identifier::new("b")),
        ];
        assert_eq!(column_list(&cols), "a, b DESC");
    }
}
