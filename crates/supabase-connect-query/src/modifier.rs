use crate::sql::{CountOption, OrderClause, OrderDirection, SqlParts, validate_column_name};

/// Trait providing modifier methods (order, limit, single, count).
pub trait Modifiable: Sized {
    /// Get a mutable reference to the query parts.
    fn parts_mut(&mut self) -> &mut SqlParts;

    /// Order by a column. Invalid column names are logged and skipped.
    fn order(mut self, column: &str, direction: OrderDirection) -> Self {
        if let Err(e) = validate_column_name(column) {
            tracing::error!("Invalid column name in order: {e}");
            return self;
        }
        self.parts_mut().orders.push(OrderClause {
            column: column.to_string(),
            direction,
        });
        self
    }

    /// Limit the number of rows returned.
    fn limit(mut self, count: i64) -> Self {
        self.parts_mut().limit = Some(count);
        self
    }

    /// Expect exactly one row. Returns error if 0 or >1 rows.
    fn single(mut self) -> Self {
        self.parts_mut().single = true;
        self
    }

    /// Expect zero or one row. Returns error if >1 rows.
    fn maybe_single(mut self) -> Self {
        self.parts_mut().maybe_single = true;
        self.parts_mut().limit = Some(2); // Fetch 2 to detect >1
        self
    }

    /// Request an exact row count.
    fn count(mut self) -> Self {
        self.parts_mut().count = CountOption::Exact;
        self
    }
}
