//! Parameter table rows.
//!
//! A [`Relation`] is one row of the parameter table: an edge between two
//! variables, the operator that connects them, and the optional
//! [`Modifier`] that labels or fixes the parameter.

use std::{fmt, str::FromStr};

use crate::{INTERCEPT, span::Span};

/// The operator connecting the two sides of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=~`: a latent variable is measured by an indicator.
    Loading,
    /// `~~`: a (co)variance between two variables.
    Covariance,
    /// `~`: the left side is regressed on the right side.
    Regression,
    /// `:=`: a derived parameter defined by an algebraic expression.
    Define,
}

impl Operator {
    /// All operators in classification priority order.
    ///
    /// `~` is a substring of both `=~` and `~~`, so the longer operators
    /// must be tried first.
    pub const PRIORITY: [Operator; 4] = [
        Operator::Loading,
        Operator::Covariance,
        Operator::Regression,
        Operator::Define,
    ];

    /// Returns the operator as written in model syntax.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Loading => "=~",
            Operator::Covariance => "~~",
            Operator::Regression => "~",
            Operator::Define => ":=",
        }
    }

    /// Returns `true` if rows with this operator denote a model edge.
    pub fn is_edge(&self) -> bool {
        !matches!(self, Operator::Define)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::PRIORITY
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown operator `{s}`"))
    }
}

/// A label or fixed value attached to a relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// A parameter name. Rows sharing a label share one parameter.
    Label(String),
    /// A numeric literal, kept verbatim (e.g. `1.0`, `.2`, `-3`).
    Fixed(String),
}

impl Modifier {
    /// Create a label modifier.
    pub fn label(name: impl Into<String>) -> Self {
        Self::Label(name.into())
    }

    /// Create a fixed-value modifier.
    pub fn fixed(value: impl Into<String>) -> Self {
        Self::Fixed(value.into())
    }

    /// Returns the modifier text as written in model syntax.
    pub fn as_str(&self) -> &str {
        match self {
            Modifier::Label(text) | Modifier::Fixed(text) => text,
        }
    }

    /// Returns the label name if this is a label.
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Modifier::Label(name) => Some(name),
            Modifier::Fixed(_) => None,
        }
    }

    /// Returns `true` if this modifier fixes the parameter to a value.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Modifier::Fixed(_))
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the parameter table.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    lhs: String,
    op: Operator,
    rhs: String,
    modifier: Option<Modifier>,
    lower_bound: Option<String>,
    upper_bound: Option<String>,
    free: bool,
    span: Option<Span>,
}

impl Relation {
    /// Create a new free relation without modifier or bounds.
    pub fn new(lhs: impl Into<String>, op: Operator, rhs: impl Into<String>) -> Self {
        Self {
            lhs: lhs.into(),
            op,
            rhs: rhs.into(),
            modifier: None,
            lower_bound: None,
            upper_bound: None,
            free: true,
            span: None,
        }
    }

    /// Attach a modifier.
    pub fn with_modifier(mut self, modifier: Option<Modifier>) -> Self {
        self.modifier = modifier;
        self
    }

    /// Attach the source span of the statement that produced this row.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Get the left-hand side variable.
    pub fn lhs(&self) -> &str {
        &self.lhs
    }

    /// Get the operator.
    pub fn op(&self) -> Operator {
        self.op
    }

    /// Get the right-hand side variable.
    pub fn rhs(&self) -> &str {
        &self.rhs
    }

    /// Get the modifier, if any.
    pub fn modifier(&self) -> Option<&Modifier> {
        self.modifier.as_ref()
    }

    /// Get the lower bound, if any.
    pub fn lower_bound(&self) -> Option<&str> {
        self.lower_bound.as_deref()
    }

    /// Get the upper bound, if any.
    pub fn upper_bound(&self) -> Option<&str> {
        self.upper_bound.as_deref()
    }

    /// Returns `false` if the parameter is computed by a definition.
    pub fn is_free(&self) -> bool {
        self.free
    }

    /// Get the source span, or `None` for rows added by model completion.
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Returns `true` if the row's modifier is the label `name`.
    pub fn has_label(&self, name: &str) -> bool {
        self.modifier
            .as_ref()
            .and_then(Modifier::as_label)
            .is_some_and(|label| label == name)
    }

    /// Returns `true` for `name ~~ name`.
    pub fn is_variance_of(&self, name: &str) -> bool {
        self.op == Operator::Covariance && self.lhs == name && self.rhs == name
    }

    /// Returns `true` for `name ~ 1`.
    pub fn is_intercept_of(&self, name: &str) -> bool {
        self.op == Operator::Regression && self.lhs == name && self.rhs == INTERCEPT
    }

    /// Returns `true` for a `~~` row between `a` and `b` in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        self.op == Operator::Covariance
            && ((self.lhs == a && self.rhs == b) || (self.lhs == b && self.rhs == a))
    }

    /// Replace the modifier.
    pub fn set_modifier(&mut self, modifier: Option<Modifier>) {
        self.modifier = modifier;
    }

    /// Set the lower bound.
    pub fn set_lower_bound(&mut self, value: impl Into<String>) {
        self.lower_bound = Some(value.into());
    }

    /// Set the upper bound.
    pub fn set_upper_bound(&mut self, value: impl Into<String>) {
        self.upper_bound = Some(value.into());
    }

    /// Mark the parameter as computed rather than estimated.
    pub fn set_fixed_by_definition(&mut self) {
        self.free = false;
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.lhs, self.op)?;
        if let Some(modifier) = &self.modifier {
            write!(f, "{modifier}*")?;
        }
        write!(f, "{}", self.rhs)
    }
}
