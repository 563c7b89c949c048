//! DDL Parser implementation.

use super::error::ParseError;
use crate::ast::{
    CheckConstraint, Column, ColumnIdent, Constraint, CreateIndex, CreateTable, DataType, Ddl,
    Expr, ForeignKey, Identifier, IndexConstraint, Interleave, ObjectName, PrimaryKey,
    ReferentialAction, Stmt, TableOption, TypeKind,
};
use crate::dialect::{ConstraintStyle, Dialect, TypeSpec};
use crate::lexer::{unquote, Keyword, Lexer, Token, TokenKind};
use crate::naming;
use crate::trace::{TraceEvent, TraceSink, NOOP};

/// A stop condition for atom collection, checked at nesting depth 0.
/// The flag is true while no atom has been collected yet.
type StopAt<'a> = fn(&Parser<'a>, bool) -> bool;

/// DDL Parser.
///
/// Recursive descent over a two-token window (`current` and `peek`).
/// Accepts `CREATE TABLE` and `CREATE INDEX` statements; everything the
/// dialect does not describe is rejected with a [`ParseError`].
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    dialect: &'a dyn Dialect,
    trace: &'a dyn TraceSink,
    current: Token,
    peek: Token,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str, dialect: &'a dyn Dialect) -> Self {
        let mut lexer = Lexer::new(input, dialect);
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            dialect,
            trace: &NOOP,
            current,
            peek,
        }
    }

    /// Reports every grammar rule entered to `trace`.
    #[must_use]
    pub fn with_trace(mut self, trace: &'a dyn TraceSink) -> Self {
        self.trace = trace;
        self
    }

    /// Parses the whole input into a document.
    ///
    /// Stray `;` and `)` between statements are skipped.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` at the first token that does not fit the
    /// dialect's grammar.
    pub fn parse(&mut self) -> Result<Ddl, ParseError> {
        let mut ddl = Ddl::default();
        loop {
            match self.current.kind {
                TokenKind::Eof => return Ok(ddl),
                TokenKind::Semicolon | TokenKind::RightParen => self.advance(),
                _ => ddl.stmts.push(self.parse_statement()?),
            }
        }
    }

    /// Parses a single statement, including its terminating `;` if present.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a supported statement.
    pub fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        self.enter("statement");
        if !self.check_keyword(Keyword::Create) {
            return Err(self.unexpected("CREATE"));
        }
        self.advance();

        let stmt = match self.current.kind {
            TokenKind::Keyword(Keyword::Table) => Stmt::CreateTable(self.parse_create_table()?),
            TokenKind::Keyword(Keyword::Unique | Keyword::Index | Keyword::NullFiltered) => {
                Stmt::CreateIndex(self.parse_create_index()?)
            }
            _ => return Err(self.unexpected("TABLE or INDEX")),
        };

        match self.current.kind {
            TokenKind::Semicolon => self.advance(),
            TokenKind::Eof => {}
            _ => return Err(self.unexpected("; or end of input")),
        }
        Ok(stmt)
    }

    // ===================================================================
    // CREATE TABLE
    // ===================================================================

    fn parse_create_table(&mut self) -> Result<CreateTable, ParseError> {
        self.enter("create table");
        self.expect_keyword(Keyword::Table)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let mut table = CreateTable::new(self.parse_object_name()?);
        table.if_not_exists = if_not_exists;

        self.expect(&TokenKind::LeftParen)?;
        if !self.check(&TokenKind::RightParen) {
            loop {
                if self.at_table_constraint() {
                    let constraint = self.parse_table_constraint(&table.name)?;
                    table.add_constraint(constraint);
                } else {
                    self.parse_column(&mut table)?;
                }
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
                // Trailing comma before the closing parenthesis.
                if self.check(&TokenKind::RightParen) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightParen)?;

        let grammar = self.dialect.grammar();
        if grammar.trailing_primary_key {
            self.parse_table_tail(&mut table)?;
        }
        if grammar.table_options {
            self.parse_table_options(&mut table)?;
        }
        if grammar.inline_primary_key {
            mark_primary_key_not_null(&mut table);
        }
        Ok(table)
    }

    fn at_table_constraint(&self) -> bool {
        self.current
            .as_keyword()
            .is_some_and(|kw| self.dialect.table_constraint_keywords().contains(&kw))
    }

    fn parse_column(&mut self, table: &mut CreateTable) -> Result<(), ParseError> {
        self.enter("column");
        let name = self.expect_identifier()?;
        let data_type = self.parse_data_type()?;
        let mut column = Column::new(name, data_type);
        let inline_primary_key = self.dialect.grammar().inline_primary_key;

        loop {
            match self.current.kind {
                TokenKind::Comma | TokenKind::RightParen | TokenKind::Eof => break,
                TokenKind::Keyword(Keyword::Not) => {
                    self.advance();
                    self.expect_keyword(Keyword::Null)?;
                    column.not_null = true;
                }
                TokenKind::Keyword(Keyword::Null) => {
                    self.advance();
                    column.not_null = false;
                }
                TokenKind::Keyword(Keyword::Default) => {
                    self.advance();
                    column.default = Some(self.parse_default()?);
                }
                TokenKind::Keyword(Keyword::Collate) => {
                    self.advance();
                    column.collate = Some(self.expect_name()?);
                }
                TokenKind::Keyword(Keyword::Character) => {
                    self.advance();
                    self.expect_keyword(Keyword::Set)?;
                    column.charset = Some(self.expect_name()?);
                }
                TokenKind::Keyword(Keyword::Charset) => {
                    self.advance();
                    column.charset = Some(self.expect_name()?);
                }
                TokenKind::Keyword(Keyword::AutoIncrement) => {
                    self.advance();
                    column.auto_increment = true;
                }
                TokenKind::Keyword(Keyword::On) => {
                    self.advance();
                    self.expect_keyword(Keyword::Update)?;
                    column.on_update = Some(self.parse_expr()?);
                }
                TokenKind::Keyword(Keyword::Comment) => {
                    self.advance();
                    column.comment = Some(self.expect_string()?);
                }
                TokenKind::Keyword(Keyword::Options) => {
                    self.advance();
                    column.options = Some(self.parse_parenthesized()?);
                }
                TokenKind::Keyword(Keyword::Constraint) => {
                    self.advance();
                    let explicit = self.expect_identifier()?;
                    let constraint =
                        self.parse_column_constraint(&table.name, &column.name, Some(explicit))?;
                    table.add_constraint(constraint);
                }
                TokenKind::Keyword(Keyword::References | Keyword::Unique | Keyword::Check) => {
                    let constraint = self.parse_column_constraint(&table.name, &column.name, None)?;
                    table.add_constraint(constraint);
                }
                TokenKind::Keyword(Keyword::Primary) if inline_primary_key => {
                    let constraint = self.parse_column_constraint(&table.name, &column.name, None)?;
                    table.add_constraint(constraint);
                }
                _ => return Err(self.unexpected("column option")),
            }
        }

        table.columns.push(column);
        Ok(())
    }

    /// Parses a constraint written on a column and names it after the
    /// column when no name was given.
    fn parse_column_constraint(
        &mut self,
        table: &ObjectName,
        column: &Identifier,
        explicit: Option<Identifier>,
    ) -> Result<Constraint, ParseError> {
        self.enter("column constraint");
        let table_name = table.name.name.as_str();
        let column_name = column.name.as_str();
        let columns = vec![ColumnIdent::new(column.clone())];

        match self.current.kind {
            TokenKind::Keyword(Keyword::Primary) if self.dialect.grammar().inline_primary_key => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                if !self.eat_keyword(Keyword::Asc) {
                    self.eat_keyword(Keyword::Desc);
                }
                let name = self.primary_key_name(explicit, table_name);
                Ok(Constraint::PrimaryKey(PrimaryKey { name, columns }))
            }
            TokenKind::Keyword(Keyword::References) => {
                let name = explicit.unwrap_or_else(|| {
                    self.generated(&naming::foreign_key(table_name, &[column_name]))
                });
                Ok(Constraint::ForeignKey(self.parse_references(name, columns)?))
            }
            TokenKind::Keyword(Keyword::Unique) => {
                self.advance();
                self.eat_keyword(Keyword::Key);
                let name = explicit
                    .unwrap_or_else(|| self.generated(&naming::unique(table_name, &[column_name])));
                Ok(Constraint::Index(IndexConstraint {
                    name,
                    unique: true,
                    columns,
                    using: None,
                }))
            }
            TokenKind::Keyword(Keyword::Check) => {
                self.advance();
                let (expr, _) = self.parse_check_body()?;
                let name = explicit.unwrap_or_else(|| {
                    self.generated(&naming::check(table_name, Some(column_name)))
                });
                Ok(Constraint::Check(CheckConstraint { name, expr }))
            }
            _ => Err(self.unexpected("PRIMARY KEY, REFERENCES, UNIQUE or CHECK")),
        }
    }

    fn parse_table_constraint(&mut self, table: &ObjectName) -> Result<Constraint, ParseError> {
        self.enter("table constraint");
        let table_name = table.name.name.as_str();
        let grammar = self.dialect.grammar();
        let explicit = if self.eat_keyword(Keyword::Constraint) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        match self.current.kind {
            TokenKind::Keyword(Keyword::Primary) if grammar.inline_primary_key => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                let columns = self.parse_column_list()?;
                // The method of a primary key index is not tracked.
                self.parse_index_using()?;
                let name = self.primary_key_name(explicit, table_name);
                Ok(Constraint::PrimaryKey(PrimaryKey { name, columns }))
            }
            TokenKind::Keyword(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                let index_name = if grammar.index_constraints && !self.check(&TokenKind::LeftParen)
                {
                    Some(self.expect_identifier()?)
                } else {
                    None
                };
                let columns = self.parse_column_list()?;
                let name = explicit.or(index_name).unwrap_or_else(|| {
                    self.generated(&naming::foreign_key(table_name, &column_names(&columns)))
                });
                Ok(Constraint::ForeignKey(self.parse_references(name, columns)?))
            }
            TokenKind::Keyword(Keyword::Unique) => {
                self.advance();
                if grammar.index_constraints
                    && (self.check_keyword(Keyword::Key) || self.check_keyword(Keyword::Index))
                {
                    self.advance();
                }
                self.parse_index_constraint(explicit, table_name, true)
            }
            TokenKind::Keyword(Keyword::Key | Keyword::Index) if grammar.index_constraints => {
                self.advance();
                self.parse_index_constraint(explicit, table_name, false)
            }
            TokenKind::Keyword(Keyword::Check) => {
                self.advance();
                let (expr, column) = self.parse_check_body()?;
                let name = explicit.unwrap_or_else(|| {
                    self.generated(&naming::check(table_name, column.as_deref()))
                });
                Ok(Constraint::Check(CheckConstraint { name, expr }))
            }
            _ => Err(self.unexpected("PRIMARY KEY, FOREIGN KEY, UNIQUE or CHECK")),
        }
    }

    /// Parses `[name] [USING m] (cols) [USING m]` after `UNIQUE`, `KEY` or
    /// `INDEX`.
    fn parse_index_constraint(
        &mut self,
        explicit: Option<Identifier>,
        table_name: &str,
        unique: bool,
    ) -> Result<Constraint, ParseError> {
        let index_name = if self.dialect.grammar().index_constraints
            && !self.check(&TokenKind::LeftParen)
            && !self.check_keyword(Keyword::Using)
        {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        let using_before = self.parse_index_using()?;
        let columns = self.parse_column_list()?;
        let using = match using_before {
            Some(using) => Some(using),
            None => self.parse_index_using()?,
        };

        let name = explicit.or(index_name).unwrap_or_else(|| {
            let names = column_names(&columns);
            if unique {
                self.generated(&naming::unique(table_name, &names))
            } else {
                self.generated(&naming::index(table_name, &names))
            }
        });
        Ok(Constraint::Index(IndexConstraint {
            name,
            unique,
            columns,
            using,
        }))
    }

    /// Parses `REFERENCES table [(cols)] [ON DELETE a] [ON UPDATE a]`.
    fn parse_references(
        &mut self,
        name: Identifier,
        columns: Vec<ColumnIdent>,
    ) -> Result<ForeignKey, ParseError> {
        self.expect_keyword(Keyword::References)?;
        let ref_table = self.parse_object_name()?;
        let ref_columns = if self.check(&TokenKind::LeftParen) {
            self.parse_column_list()?
        } else {
            Vec::new()
        };

        let mut on_delete = None;
        let mut on_update = None;
        while self.check_keyword(Keyword::On)
            && matches!(
                self.peek.as_keyword(),
                Some(Keyword::Delete | Keyword::Update)
            )
        {
            self.advance();
            let is_delete = self.check_keyword(Keyword::Delete);
            self.advance();
            let action = self.parse_referential_action()?;
            if is_delete {
                on_delete = Some(action);
            } else {
                on_update = Some(action);
            }
        }

        Ok(ForeignKey {
            name,
            columns,
            ref_table,
            ref_columns,
            on_delete,
            on_update,
        })
    }

    fn parse_referential_action(&mut self) -> Result<ReferentialAction, ParseError> {
        let action = match self.current.kind {
            TokenKind::Keyword(Keyword::Cascade) => ReferentialAction::Cascade,
            TokenKind::Keyword(Keyword::Restrict) => ReferentialAction::Restrict,
            TokenKind::Keyword(Keyword::Set) => {
                self.advance();
                match self.current.kind {
                    TokenKind::Keyword(Keyword::Null) => ReferentialAction::SetNull,
                    TokenKind::Keyword(Keyword::Default) => ReferentialAction::SetDefault,
                    _ => return Err(self.unexpected("NULL or DEFAULT")),
                }
            }
            TokenKind::Keyword(Keyword::No) => {
                self.advance();
                if !self.check_keyword(Keyword::Action) {
                    return Err(self.unexpected("ACTION"));
                }
                ReferentialAction::NoAction
            }
            _ => return Err(self.unexpected("CASCADE, RESTRICT, SET NULL, SET DEFAULT or NO ACTION")),
        };
        self.advance();
        Ok(action)
    }

    /// Spanner clauses after the table body: `PRIMARY KEY (...)`,
    /// `, INTERLEAVE IN PARENT p [ON DELETE ...]`, `, ROW DELETION POLICY (...)`.
    fn parse_table_tail(&mut self, table: &mut CreateTable) -> Result<(), ParseError> {
        self.enter("table tail");
        if self.eat_keyword(Keyword::Primary) {
            self.expect_keyword(Keyword::Key)?;
            let columns = self.parse_column_list()?;
            let name = self.generated(&naming::primary_key(&table.name.name.name));
            table.add_constraint(Constraint::PrimaryKey(PrimaryKey { name, columns }));
        }

        while self.dialect.grammar().interleave && self.check(&TokenKind::Comma) {
            self.advance();
            if self.eat_keyword(Keyword::Interleave) {
                self.expect_keyword(Keyword::In)?;
                self.expect_keyword(Keyword::Parent)?;
                let parent = self.parse_object_name()?;
                let on_delete = if self.eat_keyword(Keyword::On) {
                    self.expect_keyword(Keyword::Delete)?;
                    Some(self.parse_referential_action()?)
                } else {
                    None
                };
                table.interleave = Some(Interleave { parent, on_delete });
            } else if self.current.is_word("ROW") {
                self.advance();
                self.expect_word("DELETION")?;
                self.expect_word("POLICY")?;
                table.row_deletion_policy = Some(self.parse_parenthesized()?);
            } else {
                return Err(self.unexpected("INTERLEAVE IN PARENT or ROW DELETION POLICY"));
            }
        }
        Ok(())
    }

    /// MySQL `NAME [=] value` options after the table body.
    fn parse_table_options(&mut self, table: &mut CreateTable) -> Result<(), ParseError> {
        self.enter("table options");
        loop {
            match self.current.kind {
                TokenKind::Semicolon | TokenKind::Eof => return Ok(()),
                TokenKind::Comma => {
                    self.advance();
                    continue;
                }
                _ => {}
            }

            let mut name = String::new();
            if self.eat_keyword(Keyword::Default) {
                name.push_str("DEFAULT ");
            }
            if !matches!(
                self.current.kind,
                TokenKind::Identifier | TokenKind::Keyword(_)
            ) {
                return Err(self.unexpected("table option"));
            }
            let word = self.current.literal.to_ascii_uppercase();
            self.advance();
            name.push_str(&word);
            if word == "CHARACTER" {
                self.expect_keyword(Keyword::Set)?;
                name.push_str(" SET");
            }

            if self.check(&TokenKind::Eq) {
                self.advance();
            }
            if matches!(
                self.current.kind,
                TokenKind::Semicolon | TokenKind::Eof | TokenKind::Comma
            ) {
                return Err(self.unexpected("option value"));
            }
            let value = self.atom()?;
            self.advance();
            table.options.push(TableOption { name, value });
        }
    }

    // ===================================================================
    // CREATE INDEX
    // ===================================================================

    fn parse_create_index(&mut self) -> Result<CreateIndex, ParseError> {
        self.enter("create index");
        let unique = self.eat_keyword(Keyword::Unique);
        let null_filtered = self.eat_keyword(Keyword::NullFiltered);
        self.expect_keyword(Keyword::Index)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_object_name()?;
        let using_before_table = self.parse_index_using()?;
        self.expect_keyword(Keyword::On)?;
        let table = self.parse_object_name()?;
        let using_before_columns = self.parse_index_using()?;
        let columns = self.parse_column_list()?;

        let mut index = CreateIndex::new(name, table, columns);
        index.unique = unique;
        index.null_filtered = null_filtered;
        index.if_not_exists = if_not_exists;
        index.using = match using_before_table.or(using_before_columns) {
            Some(using) => Some(using),
            None => self.parse_index_using()?,
        };

        if self.eat_keyword(Keyword::Storing) {
            index.storing = self.parse_name_list()?;
        }
        if self.dialect.grammar().interleave
            && self.check(&TokenKind::Comma)
            && self.peek.as_keyword() == Some(Keyword::Interleave)
        {
            self.advance();
            self.advance();
            self.expect_keyword(Keyword::In)?;
            index.interleave_in = Some(self.parse_object_name()?);
        }
        if self.eat_keyword(Keyword::Where) {
            let (atoms, _) = self.collect_atoms(Self::at_statement_end)?;
            if atoms.is_empty() {
                return Err(self.unexpected("predicate"));
            }
            index.where_clause = Some(Expr::new(atoms));
        }
        Ok(index)
    }

    // ===================================================================
    // Shared pieces
    // ===================================================================

    fn parse_if_not_exists(&mut self) -> Result<bool, ParseError> {
        if self.eat_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_index_using(&mut self) -> Result<Option<Identifier>, ParseError> {
        if self.eat_keyword(Keyword::Using) {
            Ok(Some(self.expect_identifier()?))
        } else {
            Ok(None)
        }
    }

    /// Parses `name` or `schema.name`.
    fn parse_object_name(&mut self) -> Result<ObjectName, ParseError> {
        let first = self.expect_identifier()?;
        if self.check(&TokenKind::Dot) {
            self.advance();
            let second = self.expect_identifier()?;
            Ok(ObjectName::qualified(first, second))
        } else {
            Ok(ObjectName::new(first))
        }
    }

    /// Parses `(a, b DESC, ...)`. The list may be empty.
    fn parse_column_list(&mut self) -> Result<Vec<ColumnIdent>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut columns = Vec::new();
        while !self.check(&TokenKind::RightParen) {
            let name = self.expect_identifier()?;
            let desc = if self.eat_keyword(Keyword::Desc) {
                true
            } else {
                self.eat_keyword(Keyword::Asc);
                false
            };
            columns.push(ColumnIdent { name, desc });
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(columns)
    }

    /// Parses `(a, b, ...)` as plain names.
    fn parse_name_list(&mut self) -> Result<Vec<Identifier>, ParseError> {
        Ok(self
            .parse_column_list()?
            .into_iter()
            .map(|column| column.name)
            .collect())
    }

    fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        self.enter("data type");
        let types = self.dialect.data_types();

        // Greedily consume words while some type spelling continues with them.
        // Arguments may sit between the words: `TIMESTAMP(3) WITH TIME ZONE`.
        let first_literal = self.current.literal.clone();
        let mut words: Vec<String> = Vec::new();
        let mut args = None;
        let mut args_after = None;
        loop {
            let n = words.len();
            let longer =
                |spec: &TypeSpec| spec.words.len() > n && has_prefix(spec.words, &words);
            if n > 0
                && args.is_none()
                && self.check(&TokenKind::LeftParen)
                && types.iter().any(longer)
            {
                args = Some(self.parse_parenthesized()?);
                args_after = Some(n);
                continue;
            }
            if !matches!(
                self.current.kind,
                TokenKind::Identifier | TokenKind::Keyword(_)
            ) {
                break;
            }
            let next = self.current.literal.to_ascii_uppercase();
            if !types.iter().any(|spec| longer(spec) && spec.words[n] == next) {
                break;
            }
            words.push(next);
            self.advance();
        }

        let mut data_type = if words.is_empty() {
            match self.current.kind {
                TokenKind::Identifier | TokenKind::QuotedIdentifier(_) => {}
                TokenKind::Keyword(kw) if !kw.is_reserved() => {}
                _ => return Err(self.unexpected("data type")),
            }
            let name = self.current.literal.clone();
            self.advance();
            DataType::new(name, TypeKind::Unrecognized)
        } else if let Some(spec) = types
            .iter()
            .find(|spec| spec.words.len() == words.len() && has_prefix(spec.words, &words))
        {
            DataType::new(words.join(" "), spec.kind)
        } else if words.len() == 1 {
            DataType::new(first_literal, TypeKind::Unrecognized)
        } else {
            return Err(self.unexpected("data type"));
        };

        if args.is_some() {
            data_type.args = args;
            data_type.args_after = args_after.filter(|&n| n < words.len());
        } else if self.check(&TokenKind::LeftParen) {
            data_type.args = Some(self.parse_parenthesized()?);
        }
        if data_type.kind == TypeKind::Array && self.check(&TokenKind::Lt) {
            self.advance();
            data_type.element = Some(Box::new(self.parse_data_type()?));
            self.expect(&TokenKind::Gt)?;
        }
        if self.dialect.grammar().unsigned_integers && self.current.is_word("UNSIGNED") {
            self.advance();
            data_type.unsigned = true;
        }
        if self.dialect.grammar().array_suffix {
            while self.check(&TokenKind::LeftBracket) {
                self.advance();
                self.expect(&TokenKind::RightBracket)?;
                data_type.array_dims += 1;
            }
        }
        Ok(data_type)
    }

    fn parse_default(&mut self) -> Result<Expr, ParseError> {
        if self.dialect.grammar().parenthesized_default {
            self.parse_parenthesized()
        } else {
            self.parse_expr()
        }
    }

    /// Parses an unparenthesized column-level expression, stopping before
    /// the next column attribute.
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.enter("expression");
        let (atoms, _) = self.collect_atoms(Self::at_column_expr_end)?;
        if atoms.is_empty() {
            return Err(self.unexpected("expression"));
        }
        Ok(Expr::new(atoms))
    }

    /// Parses `( ... )` and returns what is inside.
    fn parse_parenthesized(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let (atoms, _) = self.collect_atoms(Self::at_close)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::new(atoms))
    }

    /// Parses the parenthesized condition of a CHECK and reports the first
    /// column it mentions.
    fn parse_check_body(&mut self) -> Result<(Expr, Option<String>), ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let (atoms, column) = self.collect_atoms(Self::at_close)?;
        if atoms.is_empty() {
            return Err(self.unexpected("condition"));
        }
        self.expect(&TokenKind::RightParen)?;
        Ok((Expr::new(atoms), column))
    }

    /// Collects atoms, balancing parentheses, until `stop` holds at depth 0.
    ///
    /// Also returns the first name that is not a function call.
    fn collect_atoms(
        &mut self,
        stop: StopAt<'a>,
    ) -> Result<(Vec<Identifier>, Option<String>), ParseError> {
        let mut atoms = Vec::new();
        let mut first_column = None;
        let mut depth = 0usize;
        loop {
            match self.current.kind {
                TokenKind::Eof if depth > 0 => return Err(self.unexpected(")")),
                TokenKind::RightParen if depth > 0 => depth -= 1,
                _ if depth == 0 && stop(self, atoms.is_empty()) => break,
                TokenKind::LeftParen => depth += 1,
                TokenKind::Identifier | TokenKind::QuotedIdentifier(_)
                    if first_column.is_none() && self.peek.kind != TokenKind::LeftParen =>
                {
                    first_column = Some(self.identifier_from(&self.current).name);
                }
                _ => {}
            }
            atoms.push(self.atom()?);
            self.advance();
        }
        Ok((atoms, first_column))
    }

    fn at_column_expr_end(&self, first: bool) -> bool {
        match self.current.kind {
            TokenKind::Comma | TokenKind::RightParen | TokenKind::Semicolon | TokenKind::Eof => {
                true
            }
            TokenKind::Keyword(Keyword::Not) => self.peek.as_keyword() == Some(Keyword::Null),
            TokenKind::Keyword(Keyword::Null) => !first,
            TokenKind::Keyword(kw) => matches!(
                kw,
                Keyword::Primary
                    | Keyword::References
                    | Keyword::Unique
                    | Keyword::Check
                    | Keyword::Constraint
                    | Keyword::Collate
                    | Keyword::Default
                    | Keyword::On
                    | Keyword::AutoIncrement
                    | Keyword::Comment
                    | Keyword::Options
                    | Keyword::Character
                    | Keyword::Charset
            ),
            _ => false,
        }
    }

    fn at_close(&self, _first: bool) -> bool {
        matches!(self.current.kind, TokenKind::RightParen | TokenKind::Eof)
    }

    fn at_statement_end(&self, _first: bool) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Semicolon | TokenKind::Eof | TokenKind::RightParen
        )
    }

    // ===================================================================
    // Tokens and names
    // ===================================================================

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current = core::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current.kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Consumes the current token if it is the given keyword.
    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        let found = self.check_keyword(keyword);
        if found {
            self.advance();
        }
        found
    }

    /// Expects the current token to be the given kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(symbol(kind)))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Expects a bare word with the given spelling, keyword or not.
    fn expect_word(&mut self, word: &str) -> Result<(), ParseError> {
        if self.current.is_word(word) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(word))
        }
    }

    /// Expects and returns an identifier. Non-reserved keywords are
    /// accepted as names.
    fn expect_identifier(&mut self) -> Result<Identifier, ParseError> {
        match self.current.kind {
            TokenKind::Identifier | TokenKind::QuotedIdentifier(_) => {}
            TokenKind::Keyword(kw) if !kw.is_reserved() => {}
            _ => return Err(self.unexpected("identifier")),
        }
        let ident = self.identifier_from(&self.current);
        self.advance();
        Ok(ident)
    }

    /// Expects an identifier or a string literal (collation and charset
    /// names).
    fn expect_name(&mut self) -> Result<Identifier, ParseError> {
        if matches!(self.current.kind, TokenKind::String(_)) {
            return self.expect_string();
        }
        self.expect_identifier()
    }

    fn expect_string(&mut self) -> Result<Identifier, ParseError> {
        if !matches!(self.current.kind, TokenKind::String(_)) {
            return Err(self.unexpected("string"));
        }
        let value = self.atom()?;
        self.advance();
        Ok(value)
    }

    /// Builds an identifier from a name token, folding it per dialect.
    fn identifier_from(&self, token: &Token) -> Identifier {
        match token.kind {
            TokenKind::QuotedIdentifier(quote) => Identifier {
                name: self
                    .dialect
                    .fold_identifier(&unquote(&token.literal, quote), true),
                quote: Some(quote),
                raw: token.literal.clone(),
            },
            _ => Identifier {
                name: self.dialect.fold_identifier(&token.literal, false),
                quote: None,
                raw: token.literal.clone(),
            },
        }
    }

    /// Turns the current token into an expression atom.
    fn atom(&self) -> Result<Identifier, ParseError> {
        let token = &self.current;
        Ok(match token.kind {
            TokenKind::Keyword(_) => Identifier {
                name: token.literal.to_ascii_uppercase(),
                quote: None,
                raw: token.literal.clone(),
            },
            TokenKind::Identifier | TokenKind::QuotedIdentifier(_) => self.identifier_from(token),
            TokenKind::String(quote) => Identifier {
                name: token.literal.clone(),
                quote: Some(quote),
                raw: token.literal.clone(),
            },
            TokenKind::Illegal | TokenKind::Eof => return Err(self.unexpected("expression")),
            _ => Identifier::new(token.literal.clone()),
        })
    }

    /// A printable identifier for a generated name.
    fn generated(&self, name: &str) -> Identifier {
        self.dialect.identifier(name)
    }

    /// Keyed dialects never print a primary key name, so an explicit one
    /// is replaced by the generated name.
    fn primary_key_name(&self, explicit: Option<Identifier>, table_name: &str) -> Identifier {
        match explicit {
            Some(name) if self.dialect.format_rules().constraint_style != ConstraintStyle::Keyed => {
                name
            }
            _ => self.generated(&naming::primary_key(table_name)),
        }
    }

    fn enter(&self, rule: &'static str) {
        self.trace.event(&TraceEvent::Rule {
            rule,
            token: &self.current,
        });
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::unexpected(
            expected,
            self.current.clone(),
            self.peek.clone(),
            self.lexer.location(self.current.span.start),
        )
    }
}

/// Columns that belong to the primary key are implicitly NOT NULL.
fn mark_primary_key_not_null(table: &mut CreateTable) {
    let key_columns: Vec<String> = match table.primary_key() {
        Some(Constraint::PrimaryKey(pk)) => pk.columns.iter().map(|c| c.name.name.clone()).collect(),
        _ => return,
    };
    for column in &mut table.columns {
        if key_columns.contains(&column.name.name) {
            column.not_null = true;
        }
    }
}

fn column_names(columns: &[ColumnIdent]) -> Vec<&str> {
    columns.iter().map(|c| c.name.name.as_str()).collect()
}

fn has_prefix(spec: &[&str], words: &[String]) -> bool {
    spec.len() >= words.len() && spec.iter().zip(words).all(|(a, b)| *a == b)
}

fn symbol(kind: &TokenKind) -> &'static str {
    match kind {
        TokenKind::LeftParen => "(",
        TokenKind::RightParen => ")",
        TokenKind::Comma => ",",
        TokenKind::Semicolon => ";",
        TokenKind::Dot => ".",
        TokenKind::Lt => "<",
        TokenKind::Gt => ">",
        TokenKind::RightBracket => "]",
        TokenKind::Eq => "=",
        _ => "token",
    }
}
