//! Per-filter-type SQL handlers.
//!
//! Each handler turns one populated filter on one column into a conjunction
//! of conditions. Shared semantics:
//!
//! - `in` with an empty list matches nothing (`1 = 0`).
//! - `notIn` with an empty list adds no condition.
//! - `notEquals`, `notIn` and `doesNotContain` also match NULL, so each
//!   positive operator and its negation partition the rows.
//! - `specified=true` is `IS NOT NULL`, `specified=false` is `IS NULL`.

mod boolean;
mod range;
mod string;

pub use boolean::BooleanHandler;
pub use range::RangeHandler;
pub use string::StringHandler;

use crate::filter::Filter;

use super::{SqlFragment, SqlParam};

/// Collects the conditions for one column, numbering placeholders after
/// `offset` already-bound parameters.
pub(crate) struct ConditionBuilder<'a> {
    column: &'a str,
    offset: usize,
    conditions: Vec<String>,
    params: Vec<SqlParam>,
}

impl<'a> ConditionBuilder<'a> {
    pub(crate) fn new(column: &'a str, offset: usize) -> Self {
        Self {
            column,
            offset,
            conditions: Vec::new(),
            params: Vec::new(),
        }
    }

    pub(crate) fn column(&self) -> &'a str {
        self.column
    }

    /// Binds a parameter and returns its placeholder.
    pub(crate) fn bind(&mut self, param: impl Into<SqlParam>) -> String {
        self.params.push(param.into());
        format!("?{}", self.offset + self.params.len())
    }

    pub(crate) fn push(&mut self, condition: String) {
        self.conditions.push(condition);
    }

    /// `column <op> ?n`
    pub(crate) fn compare(&mut self, op: &str, value: impl Into<SqlParam>) {
        let placeholder = self.bind(value);
        let condition = format!("{} {} {}", self.column, op, placeholder);
        self.push(condition);
    }

    /// Applies the operators every filter type shares.
    pub(crate) fn equality<T>(&mut self, filter: &Filter<T>)
    where
        T: Clone + Into<SqlParam>,
    {
        if let Some(value) = &filter.equals {
            self.compare("=", value.clone());
        }

        if let Some(value) = &filter.not_equals {
            let placeholder = self.bind(value.clone());
            let condition = format!(
                "({col} IS NULL OR {col} <> {placeholder})",
                col = self.column
            );
            self.push(condition);
        }

        if let Some(values) = &filter.in_list {
            if values.is_empty() {
                self.push("1 = 0".to_string());
            } else {
                let list = self.bind_list(values);
                let condition = format!("{} IN ({})", self.column, list);
                self.push(condition);
            }
        }

        if let Some(values) = &filter.not_in {
            if !values.is_empty() {
                let list = self.bind_list(values);
                let condition = format!(
                    "({col} IS NULL OR {col} NOT IN ({list}))",
                    col = self.column
                );
                self.push(condition);
            }
        }

        match filter.specified {
            Some(true) => self.push(format!("{} IS NOT NULL", self.column)),
            Some(false) => self.push(format!("{} IS NULL", self.column)),
            None => {}
        }
    }

    fn bind_list<T>(&mut self, values: &[T]) -> String
    where
        T: Clone + Into<SqlParam>,
    {
        values
            .iter()
            .map(|v| self.bind(v.clone()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub(crate) fn finish(self) -> SqlFragment {
        SqlFragment::with_params(self.conditions.join(" AND "), self.params)
    }
}
