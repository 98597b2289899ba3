//! Translation of bucket filters into the execution `where` clause.

pub mod where_clause;

pub use where_clause::{attribute_filter_clause, build_where, date_filter_clause, WhereClause};
