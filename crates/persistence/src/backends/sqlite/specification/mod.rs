//! Criteria to SQL translation.
//!
//! A [`SpecificationBuilder`] turns the populated filters of a criteria
//! object into one parameterized predicate over the entity table, aliased
//! [`ROOT_ALIAS`]. Every present filter must hold; absent filters add
//! nothing. Relation filters add a `LEFT JOIN` to the related table and
//! filter on its identity, so rows with no related row still take part in
//! negative and `specified=false` checks.
//!
//! Placeholders are numbered (`?1`, `?2`, ...) in the order the parameters
//! appear in [`SqlFragment::params`].

mod handlers;

pub use handlers::{BooleanHandler, RangeHandler, StringHandler};

use rusqlite::ToSql;
use rusqlite::types::{ToSqlOutput, Value, ValueRef};

use crate::filter::{BooleanFilter, FieldFilter, LongFilter, RangeFilter, StringFilter};

/// Alias of the entity table in generated SQL.
pub const ROOT_ALIAS: &str = "e";

/// A fragment of SQL with bound parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFragment {
    /// The SQL clause.
    pub sql: String,
    /// Bound parameter values.
    pub params: Vec<SqlParam>,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// Text parameter.
    String(String),
    /// Integer parameter, also used for booleans.
    Integer(i64),
    /// Real parameter.
    Float(f64),
    /// Null parameter.
    Null,
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::String(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::String(value.to_string())
    }
}

impl From<i32> for SqlParam {
    fn from(value: i32) -> Self {
        SqlParam::Integer(i64::from(value))
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Integer(value)
    }
}

impl From<f32> for SqlParam {
    fn from(value: f32) -> Self {
        SqlParam::Float(f64::from(value))
    }
}

impl From<f64> for SqlParam {
    fn from(value: f64) -> Self {
        SqlParam::Float(value)
    }
}

impl From<bool> for SqlParam {
    fn from(value: bool) -> Self {
        SqlParam::Integer(i64::from(value))
    }
}

impl<T: Into<SqlParam>> From<Option<T>> for SqlParam {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlParam::Null, Into::into)
    }
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlParam::String(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            SqlParam::Integer(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            SqlParam::Float(f) => ToSqlOutput::Owned(Value::Real(*f)),
            SqlParam::Null => ToSqlOutput::Owned(Value::Null),
        })
    }
}

impl SqlFragment {
    /// Creates a fragment without parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Creates a fragment with parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Combines with another fragment using AND.
    ///
    /// `other` must number its placeholders after this fragment's.
    pub fn and(mut self, other: SqlFragment) -> Self {
        if !self.sql.is_empty() && !other.sql.is_empty() {
            self.sql = format!("({}) AND ({})", self.sql, other.sql);
        } else if !other.sql.is_empty() {
            self.sql = other.sql;
        }
        self.params.extend(other.params);
        self
    }

    /// Returns true if this fragment imposes no condition.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// A to-one or to-many relation reachable from an entity table.
#[derive(Debug, PartialEq, Eq)]
pub struct RelationJoin {
    /// Alias of the joined table.
    pub alias: &'static str,
    /// The joined table.
    pub table: &'static str,
    /// Join condition in terms of `alias` and [`ROOT_ALIAS`].
    pub on: &'static str,
}

impl RelationJoin {
    fn to_sql(&self) -> String {
        format!("LEFT JOIN {} {} ON {}", self.table, self.alias, self.on)
    }
}

/// A composed query over one entity table.
#[derive(Debug, Clone, PartialEq)]
pub struct Specification {
    table: &'static str,
    /// Collapse duplicate rows introduced by relation joins.
    pub distinct: bool,
    /// Relation joins, each at most once.
    pub joins: Vec<&'static RelationJoin>,
    /// Conjunction of every filter. Empty when nothing is filtered.
    pub predicate: SqlFragment,
}

impl Specification {
    /// Builds the `SELECT` statement.
    ///
    /// `columns` are selected from the root table. Rows come back ordered by
    /// `order_by` and limited to `page` (`(limit, offset)`) when given.
    pub fn select_sql(&self, columns: &[&str], order_by: &str, page: Option<(u32, u64)>) -> String {
        let columns = columns
            .iter()
            .map(|c| format!("{}.{}", ROOT_ALIAS, c))
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!(
            "SELECT {}{} {}",
            if self.distinct { "DISTINCT " } else { "" },
            columns,
            self.from_where()
        );
        if !order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }
        if let Some((limit, offset)) = page {
            sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
        }
        sql
    }

    /// Builds the `COUNT` statement matching [`Self::select_sql`] row for row.
    pub fn count_sql(&self) -> String {
        let count = if self.distinct {
            format!("COUNT(DISTINCT {}.id)", ROOT_ALIAS)
        } else {
            format!("COUNT({}.id)", ROOT_ALIAS)
        };
        format!("SELECT {} {}", count, self.from_where())
    }

    fn from_where(&self) -> String {
        let mut sql = format!("FROM {} {}", self.table, ROOT_ALIAS);
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.to_sql());
        }
        if !self.predicate.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.predicate.sql);
        }
        sql
    }
}

/// Composes filters into a [`Specification`].
///
/// Call [`distinct`](Self::distinct) first; the flag is fixed from then on.
///
/// ```
/// use roomkeeper_persistence::backends::sqlite::specification::SpecificationBuilder;
/// use roomkeeper_persistence::filter::{IntegerFilter, StringFilter};
///
/// let floor = IntegerFilter::new().with_less_than(2);
/// let roomno = StringFilter::new().with_contains("10");
/// let spec = SpecificationBuilder::new("room")
///     .range("floor", Some(&floor))
///     .string("roomno", Some(&roomno))
///     .build();
/// assert_eq!(spec.predicate.sql, "(e.floor < ?1) AND (instr(e.roomno, ?2) > 0)");
/// ```
#[derive(Debug)]
pub struct SpecificationBuilder {
    table: &'static str,
    distinct: Option<bool>,
    joins: Vec<&'static RelationJoin>,
    predicate: SqlFragment,
}

impl SpecificationBuilder {
    /// Starts a specification over `table`.
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            distinct: None,
            joins: Vec::new(),
            predicate: SqlFragment::default(),
        }
    }

    /// Sets the `distinct` modifier. Only the first call has an effect.
    pub fn distinct(mut self, distinct: Option<bool>) -> Self {
        if self.distinct.is_none() {
            self.distinct = distinct;
        }
        self
    }

    /// Adds a range filter on a root column.
    pub fn range<T>(self, column: &str, filter: Option<&RangeFilter<T>>) -> Self
    where
        T: Clone + Into<SqlParam>,
        RangeFilter<T>: FieldFilter,
    {
        match filter {
            Some(f) if !f.is_empty() => {
                let column = qualified(ROOT_ALIAS, column);
                let offset = self.predicate.params.len();
                self.push(RangeHandler::build_sql(&column, f, offset))
            }
            _ => self,
        }
    }

    /// Adds a string filter on a root column.
    pub fn string(self, column: &str, filter: Option<&StringFilter>) -> Self {
        match filter {
            Some(f) if !f.is_empty() => {
                let column = qualified(ROOT_ALIAS, column);
                let offset = self.predicate.params.len();
                self.push(StringHandler::build_sql(&column, f, offset))
            }
            _ => self,
        }
    }

    /// Adds a boolean filter on a root column.
    pub fn boolean(self, column: &str, filter: Option<&BooleanFilter>) -> Self {
        match filter {
            Some(f) if !f.is_empty() => {
                let column = qualified(ROOT_ALIAS, column);
                let offset = self.predicate.params.len();
                self.push(BooleanHandler::build_sql(&column, f, offset))
            }
            _ => self,
        }
    }

    /// Adds an identity filter on a related table, joining it if needed.
    pub fn relation(mut self, join: &'static RelationJoin, filter: Option<&LongFilter>) -> Self {
        match filter {
            Some(f) if !f.is_empty() => {
                let column = qualified(join.alias, "id");
                let offset = self.predicate.params.len();
                let fragment = RangeHandler::build_sql(&column, f, offset);
                // No join without a condition; a to-many join multiplies rows.
                if fragment.is_empty() {
                    return self;
                }
                if !self.joins.iter().any(|j| j.alias == join.alias) {
                    self.joins.push(join);
                }
                self.push(fragment)
            }
            _ => self,
        }
    }

    /// Finishes the specification.
    pub fn build(self) -> Specification {
        Specification {
            table: self.table,
            distinct: self.distinct.unwrap_or(false),
            joins: self.joins,
            predicate: self.predicate,
        }
    }

    fn push(mut self, fragment: SqlFragment) -> Self {
        let predicate = std::mem::take(&mut self.predicate);
        self.predicate = predicate.and(fragment);
        self
    }
}

fn qualified(alias: &str, column: &str) -> String {
    format!("{}.{}", alias, column)
}
