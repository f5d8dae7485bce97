//! SQL generation for entity stores.
//!
//! Identifiers come only from [`Entity::COLUMNS`] and are always quoted;
//! every value goes through a bind parameter.

use std::slice;

use sqlx::{QueryBuilder, Sqlite};

use repokit_core::error::StoreError;
use repokit_core::result::StoreResult;
use repokit_core::traits::Entity;
use repokit_core::types::{Condition, Criteria, FilterOp, FindOptions, Partial, Value};

/// Quote an identifier.
fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Resolve a caller-supplied column name to a quoted identifier.
pub(crate) fn column<T: Entity>(name: &str) -> StoreResult<String> {
    if T::has_column(name) {
        Ok(quote(name))
    } else {
        Err(StoreError::UnknownColumn {
            entity: T::NAME,
            column: name.to_string(),
        })
    }
}

/// Fail on the first column of `record` the entity does not declare.
pub(crate) fn check_columns<T: Entity>(record: &Partial<T>) -> StoreResult<()> {
    for (name, _) in record.iter() {
        column::<T>(name)?;
    }
    Ok(())
}

/// The select list: every column, or the projection plus the primary key.
fn select_list<T: Entity>(select: Option<&[String]>) -> StoreResult<String> {
    match select {
        None => Ok(T::COLUMNS.iter().map(|c| quote(c)).collect::<Vec<_>>().join(", ")),
        Some(columns) => {
            let mut names = vec![T::PRIMARY_KEY];
            for name in columns {
                column::<T>(name)?;
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
            Ok(names.into_iter().map(quote).collect::<Vec<_>>().join(", "))
        }
    }
}

fn all_columns<T: Entity>() -> String {
    T::COLUMNS.iter().map(|c| quote(c)).collect::<Vec<_>>().join(", ")
}

/// Bind a scalar value.
fn push_value(qb: &mut QueryBuilder<'_, Sqlite>, value: &Value) -> StoreResult<()> {
    match value {
        Value::Null => {
            qb.push("NULL");
        }
        Value::Boolean(b) => {
            qb.push_bind(*b);
        }
        Value::Integer(i) => {
            qb.push_bind(*i);
        }
        Value::Float(f) => {
            qb.push_bind(*f);
        }
        Value::String(s) => {
            qb.push_bind(s.clone());
        }
        Value::List(_) => {
            return Err(StoreError::InvalidValue(
                "a list is only valid as the operand of `in`".to_string(),
            ));
        }
    }
    Ok(())
}

/// `LIMIT`/`OFFSET` operand; SQLite integers are signed.
fn row_count(value: u64, clause: &str) -> StoreResult<i64> {
    i64::try_from(value)
        .map_err(|_| StoreError::InvalidValue(format!("{clause} {value} is out of range")))
}

fn comparison(op: FilterOp) -> &'static str {
    match op {
        FilterOp::Eq => " = ",
        FilterOp::Ne => " <> ",
        FilterOp::Gt => " > ",
        FilterOp::Gte => " >= ",
        FilterOp::Lt => " < ",
        FilterOp::Lte => " <= ",
        FilterOp::Like | FilterOp::ILike => " LIKE ",
        FilterOp::In => " IN ",
        FilterOp::IsNull => " IS ",
        FilterOp::IsNotNull => " IS NOT ",
    }
}

fn push_condition<T: Entity>(
    qb: &mut QueryBuilder<'_, Sqlite>,
    condition: &Condition,
) -> StoreResult<()> {
    let column = column::<T>(&condition.field)?;
    match (condition.op, &condition.value) {
        (FilterOp::IsNull, _) | (FilterOp::Eq, Value::Null) => {
            qb.push(column).push(" IS NULL");
        }
        (FilterOp::IsNotNull, _) | (FilterOp::Ne, Value::Null) => {
            qb.push(column).push(" IS NOT NULL");
        }
        (FilterOp::In, Value::List(items)) if items.is_empty() => {
            qb.push("1 = 0");
        }
        (FilterOp::In, Value::List(items)) => {
            qb.push(column).push(" IN (");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                push_value(qb, item)?;
            }
            qb.push(")");
        }
        (FilterOp::In, other) => {
            return Err(StoreError::InvalidValue(format!(
                "`in` on `{}` expects a list, got {other:?}",
                condition.field
            )));
        }
        (FilterOp::ILike, value) => {
            qb.push("LOWER(").push(column).push(") LIKE LOWER(");
            push_value(qb, value)?;
            qb.push(")");
        }
        (op, value) => {
            qb.push(column).push(comparison(op));
            push_value(qb, value)?;
        }
    }
    Ok(())
}

/// Append the WHERE clause: the soft-delete guard and the criteria alternatives.
pub(crate) fn push_filters<T: Entity>(
    qb: &mut QueryBuilder<'_, Sqlite>,
    criteria: &[Criteria],
    with_deleted: bool,
) -> StoreResult<()> {
    let mut has_where = false;
    if !with_deleted {
        qb.push(" WHERE ")
            .push(quote(T::DELETED_AT))
            .push(" IS NULL");
        has_where = true;
    }

    // An empty group matches everything, which makes the whole disjunction true.
    if criteria.is_empty() || criteria.iter().any(Criteria::is_empty) {
        return Ok(());
    }

    qb.push(if has_where { " AND (" } else { " WHERE (" });
    for (i, group) in criteria.iter().enumerate() {
        if i > 0 {
            qb.push(" OR ");
        }
        qb.push("(");
        for (j, condition) in group.conditions().iter().enumerate() {
            if j > 0 {
                qb.push(" AND ");
            }
            push_condition::<T>(qb, condition)?;
        }
        qb.push(")");
    }
    qb.push(")");
    Ok(())
}

/// `SELECT ... FROM table WHERE ... ORDER BY ... LIMIT ... OFFSET ...`
pub(crate) fn select<T: Entity>(options: &FindOptions) -> StoreResult<QueryBuilder<'static, Sqlite>> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {} FROM {}",
        select_list::<T>(options.select.as_deref())?,
        quote(T::TABLE)
    ));
    push_filters::<T>(&mut qb, &options.criteria, options.with_deleted)?;

    qb.push(" ORDER BY ");
    if options.order.is_empty() {
        qb.push(quote(T::PRIMARY_KEY)).push(" ASC");
    } else {
        for (i, sort) in options.order.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(column::<T>(&sort.field)?)
                .push(" ")
                .push(sort.direction.as_sql());
        }
    }

    match (options.take, options.skip) {
        (Some(take), skip) => {
            qb.push(" LIMIT ").push_bind(row_count(take, "take")?);
            if let Some(skip) = skip.filter(|s| *s > 0) {
                qb.push(" OFFSET ").push_bind(row_count(skip, "skip")?);
            }
        }
        (None, Some(skip)) if skip > 0 => {
            qb.push(" LIMIT -1 OFFSET ").push_bind(row_count(skip, "skip")?);
        }
        (None, _) => {}
    }
    Ok(qb)
}

/// `SELECT COUNT(*)` over the same filters as [`select`], ignoring paging and projection.
pub(crate) fn count<T: Entity>(options: &FindOptions) -> StoreResult<QueryBuilder<'static, Sqlite>> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", quote(T::TABLE)));
    push_filters::<T>(&mut qb, &options.criteria, options.with_deleted)?;
    Ok(qb)
}

/// Single-row lookup by primary key, soft-deleted rows included.
pub(crate) fn select_by_id<T: Entity>(id: &Value) -> StoreResult<QueryBuilder<'static, Sqlite>> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {} FROM {} WHERE {} = ",
        all_columns::<T>(),
        quote(T::TABLE),
        quote(T::PRIMARY_KEY)
    ));
    push_value(&mut qb, id)?;
    Ok(qb)
}

/// `INSERT ... RETURNING` for a materialized record.
pub(crate) fn insert<T: Entity>(record: &Partial<T>) -> StoreResult<QueryBuilder<'static, Sqlite>> {
    let mut qb = QueryBuilder::new(format!("INSERT INTO {}", quote(T::TABLE)));
    if record.is_empty() {
        qb.push(" DEFAULT VALUES");
    } else {
        let names = record
            .iter()
            .map(|(name, _)| column::<T>(name))
            .collect::<StoreResult<Vec<_>>>()?;
        qb.push(" (").push(names.join(", ")).push(") VALUES (");
        for (i, (_, value)) in record.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            push_value(&mut qb, value)?;
        }
        qb.push(")");
    }
    qb.push(" RETURNING ").push(all_columns::<T>());
    Ok(qb)
}

fn push_assignments<T: Entity>(
    qb: &mut QueryBuilder<'_, Sqlite>,
    patch: &Partial<T>,
    skip_primary_key: bool,
) -> StoreResult<()> {
    let mut first = true;
    for (name, value) in patch.iter() {
        if skip_primary_key && name == T::PRIMARY_KEY {
            continue;
        }
        if !first {
            qb.push(", ");
        }
        first = false;
        qb.push(column::<T>(name)?).push(" = ");
        push_value(qb, value)?;
    }
    Ok(())
}

/// `UPDATE ... WHERE pk = ? RETURNING` for a record carrying its identity.
pub(crate) fn update_by_id<T: Entity>(
    record: &Partial<T>,
    id: &Value,
) -> StoreResult<QueryBuilder<'static, Sqlite>> {
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", quote(T::TABLE)));
    push_assignments(&mut qb, record, true)?;
    qb.push(" WHERE ").push(quote(T::PRIMARY_KEY)).push(" = ");
    push_value(&mut qb, id)?;
    qb.push(" RETURNING ").push(all_columns::<T>());
    Ok(qb)
}

/// Bulk `UPDATE ... SET patch WHERE criteria`.
pub(crate) fn update<T: Entity>(
    criteria: &Criteria,
    patch: &Partial<T>,
) -> StoreResult<QueryBuilder<'static, Sqlite>> {
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", quote(T::TABLE)));
    push_assignments(&mut qb, patch, false)?;
    push_filters::<T>(&mut qb, slice::from_ref(criteria), true)?;
    Ok(qb)
}

/// `UPDATE ... SET deleted_at = now WHERE deleted_at IS NULL AND criteria`.
pub(crate) fn soft_delete<T: Entity>(criteria: &Criteria) -> StoreResult<QueryBuilder<'static, Sqlite>> {
    let mut qb = QueryBuilder::new(format!(
        "UPDATE {} SET {} = ",
        quote(T::TABLE),
        quote(T::DELETED_AT)
    ));
    qb.push_bind(chrono::Utc::now());
    push_filters::<T>(&mut qb, slice::from_ref(criteria), false)?;
    Ok(qb)
}

/// `DELETE FROM ... WHERE criteria`, soft-deleted rows included.
pub(crate) fn delete<T: Entity>(criteria: &Criteria) -> StoreResult<QueryBuilder<'static, Sqlite>> {
    let mut qb = QueryBuilder::new(format!("DELETE FROM {}", quote(T::TABLE)));
    push_filters::<T>(&mut qb, slice::from_ref(criteria), true)?;
    Ok(qb)
}
