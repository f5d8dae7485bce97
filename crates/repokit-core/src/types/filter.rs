//! Filter types for dynamic query building.

use serde::{Deserialize, Serialize};

use super::value::Value;

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality. Compared against `Null` it becomes `IS NULL`.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// SQL `LIKE` pattern match.
    Like,
    /// Case-insensitive pattern match.
    ILike,
    /// SQL `IN` list membership.
    In,
    /// SQL `IS NULL` check.
    IsNull,
    /// SQL `IS NOT NULL` check.
    IsNotNull,
}

/// A single filter condition on a named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// The column name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    #[serde(default = "null_value")]
    pub value: Value,
}

impl Condition {
    /// Create a new condition.
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }
}

/// A conjunction of conditions: a row matches when every condition holds.
///
/// An empty `Criteria` matches every row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria {
    conditions: Vec<Condition>,
}

impl Criteria {
    /// Create an empty criteria set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an arbitrary condition.
    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// `field = value`.
    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and(Condition::new(field, FilterOp::Eq, value))
    }

    /// `field <> value`.
    pub fn ne(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and(Condition::new(field, FilterOp::Ne, value))
    }

    /// `field > value`.
    pub fn gt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and(Condition::new(field, FilterOp::Gt, value))
    }

    /// `field >= value`.
    pub fn gte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and(Condition::new(field, FilterOp::Gte, value))
    }

    /// `field < value`.
    pub fn lt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and(Condition::new(field, FilterOp::Lt, value))
    }

    /// `field <= value`.
    pub fn lte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and(Condition::new(field, FilterOp::Lte, value))
    }

    /// `field LIKE pattern`.
    pub fn like(self, field: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.and(Condition::new(field, FilterOp::Like, pattern.into()))
    }

    /// Case-insensitive `LIKE`.
    pub fn ilike(self, field: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.and(Condition::new(field, FilterOp::ILike, pattern.into()))
    }

    /// `field IN (values...)`.
    pub fn is_in<V: Into<Value>>(
        self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let list = Value::List(values.into_iter().map(Into::into).collect());
        self.and(Condition::new(field, FilterOp::In, list))
    }

    /// `field IS NULL`.
    pub fn is_null(self, field: impl Into<String>) -> Self {
        self.and(Condition::new(field, FilterOp::IsNull, Value::Null))
    }

    /// `field IS NOT NULL`.
    pub fn is_not_null(self, field: impl Into<String>) -> Self {
        self.and(Condition::new(field, FilterOp::IsNotNull, Value::Null))
    }

    /// Whether no condition has been added.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// The conditions, in insertion order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

impl From<Condition> for Criteria {
    fn from(condition: Condition) -> Self {
        Self::new().and(condition)
    }
}

fn null_value() -> Value {
    Value::Null
}
