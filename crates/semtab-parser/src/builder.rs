//! Parameter table construction from classified statements.

use log::{debug, trace};

use semtab_core::{
    algebra::{AlgebraBlock, Definition},
    relation::{Operator, Relation},
    table::ParameterTable,
};

use crate::{
    classify::{
        BoundKind, DEFINITION_NAME_FORBIDDEN, RELATION_NAME_FORBIDDEN, StatementKind, check_name,
        classify, split_relation, split_terms,
    },
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError, Result},
    split::split_once,
    statement::Statement,
};

/// The result of parsing a model, before completion.
#[derive(Debug, Clone, Default)]
pub struct ParsedModel {
    /// Rows in the order the relations were written.
    pub table: ParameterTable,
    /// Declared new parameters and `:=` definitions.
    pub algebra: AlgebraBlock,
    /// `{...}` statements, verbatim.
    pub user_defined_blocks: Vec<String>,
    /// Non-fatal diagnostics in emission order.
    pub warnings: Vec<Diagnostic>,
    /// Name from the `=== name ===` header, if any.
    pub model_name: Option<String>,
}

/// Builds a [`ParsedModel`] in passes: relations, bounds, declarations,
/// definitions. Each pass sees the effects of the earlier ones.
struct TableBuilder<'a> {
    statements: Vec<(&'a Statement, StatementKind)>,
    model: ParsedModel,
    collector: DiagnosticCollector,
}

impl<'a> TableBuilder<'a> {
    fn new(statements: &'a [Statement]) -> Self {
        let mut collector = DiagnosticCollector::new();
        let statements = statements
            .iter()
            .filter_map(|statement| {
                collector
                    .capture(kind_of(statement))
                    .map(|kind| (statement, kind))
            })
            .collect();
        Self {
            statements,
            model: ParsedModel::default(),
            collector,
        }
    }

    fn of_kind(&self, wanted: fn(StatementKind) -> bool) -> Vec<(&'a Statement, StatementKind)> {
        self.statements
            .iter()
            .copied()
            .filter(|(_, kind)| wanted(*kind))
            .collect()
    }

    fn relations_pass(&mut self) {
        let statements =
            self.of_kind(|kind| matches!(kind, StatementKind::Relation(_) | StatementKind::Opaque));
        for (statement, kind) in statements {
            match kind {
                StatementKind::Relation(op) => {
                    let result = self.add_relation(statement, op);
                    self.collector.capture(result);
                }
                _ => {
                    trace!(block = statement.as_str(); "Keeping user defined block");
                    self.model
                        .user_defined_blocks
                        .push(statement.as_str().to_string());
                }
            }
        }
    }

    fn add_relation(&mut self, statement: &Statement, op: Operator) -> Result<()> {
        let (lhs, rhs) = split_relation(statement, op.as_str(), RELATION_NAME_FORBIDDEN)?;
        let terms = split_terms(statement, rhs, &mut self.collector)?;
        for term in terms {
            let relation = Relation::new(lhs, op, term.variable)
                .with_modifier(term.to_modifier())
                .with_span(statement.span());
            self.model.table.push(relation);
        }
        Ok(())
    }

    fn bounds_pass(&mut self) {
        let statements = self.of_kind(|kind| matches!(kind, StatementKind::Bound(_)));
        for (statement, kind) in statements {
            if let StatementKind::Bound(bound) = kind {
                let result = self.apply_bound(statement, bound);
                self.collector.capture(result);
            }
        }
    }

    fn apply_bound(&mut self, statement: &Statement, bound: BoundKind) -> Result<()> {
        let symbol = bound.symbol();
        let Some((target, value)) = split_once(statement.as_str(), symbol) else {
            return Ok(());
        };

        if value.is_empty() {
            return Err(Diagnostic::error(format!("bound on `{target}` has no value"))
                .with_code(ErrorCode::E203)
                .with_label(statement.span(), format!("expected a value after `{symbol}`")));
        }

        if !self.model.table.has_label(target) {
            return Err(Diagnostic::error(format!("no relation carries the label `{target}`"))
                .with_code(ErrorCode::E300)
                .with_label(statement.span_of_str(target), "bound on unknown parameter")
                .with_secondary_label(statement.span(), "in this statement")
                .with_help(format!(
                    "attach the label to a relation, e.g. `f =~ {target}*x1`"
                )));
        }

        let mut count = 0usize;
        for relation in self.model.table.labelled_mut(target) {
            match bound {
                BoundKind::Lower => relation.set_lower_bound(value),
                BoundKind::Upper => relation.set_upper_bound(value),
            }
            count += 1;
        }
        trace!(label = target, value = value, rows = count; "Applied {symbol} bound");
        Ok(())
    }

    fn declarations_pass(&mut self) {
        let statements = self.of_kind(|kind| kind == StatementKind::Declaration);
        for (statement, _) in statements {
            let name = statement.as_str().strip_prefix('!').unwrap_or_default();
            if self
                .collector
                .capture(check_name(statement, name, RELATION_NAME_FORBIDDEN))
                .is_some()
            {
                self.model.algebra.declare(name);
            }
        }
    }

    fn definitions_pass(&mut self) {
        let statements = self.of_kind(|kind| kind == StatementKind::Definition);
        for (statement, _) in statements {
            let result = self.add_definition(statement);
            self.collector.capture(result);
        }
    }

    fn add_definition(&mut self, statement: &Statement) -> Result<()> {
        let (name, expression) = split_relation(statement, ":=", DEFINITION_NAME_FORBIDDEN)?;
        if expression.is_empty() {
            return Err(Diagnostic::error(format!("definition of `{name}` is empty"))
                .with_code(ErrorCode::E203)
                .with_label(statement.span(), "expected an expression after `:=`"));
        }

        for relation in self.model.table.labelled_mut(name) {
            relation.set_fixed_by_definition();
        }
        self.model.algebra.define(Definition::new(name, expression));
        Ok(())
    }

    fn build(mut self) -> std::result::Result<ParsedModel, ParseError> {
        self.relations_pass();
        self.bounds_pass();
        self.declarations_pass();
        self.definitions_pass();

        let Self {
            mut model,
            collector,
            ..
        } = self;
        model.warnings = collector.finish()?;
        Ok(model)
    }
}

fn kind_of(statement: &Statement) -> Result<StatementKind> {
    classify(statement.as_str()).ok_or_else(|| {
        Diagnostic::error(format!(
            "statement `{}` contains no operator",
            statement.as_str()
        ))
        .with_code(ErrorCode::E202)
        .with_label(statement.span(), "expected `=~`, `~~`, `~`, `:=`, `>`, `<` or `!`")
        .with_help("did you forget the operator?")
    })
}

/// Build the parameter table and algebra block from cleaned, validated
/// statements.
///
/// Every malformed statement is reported; the table is only returned if
/// there are no errors.
pub fn build(statements: &[Statement]) -> std::result::Result<ParsedModel, ParseError> {
    let model = TableBuilder::new(statements).build()?;
    debug!(
        rows = model.table.len(),
        blocks = model.user_defined_blocks.len(),
        definitions = model.algebra.definitions().len(),
        warnings = model.warnings.len();
        "Parameter table built"
    );
    Ok(model)
}
