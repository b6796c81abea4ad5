//! DataSourceLoader port
//!
//! The three-operation expansion protocol every backing store implements:
//! load the root, expand a center node into its attributes, and expand an
//! attribute into the center entities sharing it.
//!
//! Implementations validate everything they fetched before touching the tree,
//! so a failed call leaves the parent exactly as it was.

use crate::domain::entities::{EntityTree, TreeError};
use crate::domain::ports::RowSourceError;
use crate::domain::value_objects::{ColumnRef, DataSourceType, LoaderSpec, TreeNodeId};

pub type LoadResult<T> = Result<T, LoadError>;

/// Configuration incomplete or inconsistent with the data returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("no filter template configured\n  → Fix: Set `database.base_query` (e.g. \"SELECT * FROM people\")")]
    MissingFilterTemplate,

    #[error("no center column configured\n  → Fix: Set `database.base_column_name` or `csv.center_node_column_number`")]
    MissingCenterColumn,

    #[error("no information columns configured\n  → Fix: Set `database.children_columns` or `csv.information_node_column_numbers`")]
    MissingInformationColumns,

    #[error("no column-to-name mapping configured\n  → Fix: Set `csv.column_to_name_mapping` (e.g. {{ \"0\" = \"Name\" }})")]
    MissingColumnMapping,

    #[error("column {column} has no header name in `column_to_name_mapping`")]
    UnmappedColumn { column: String },

    #[error("header '{header}' does not match any configured column")]
    UnknownHeader { header: String },

    #[error("no row where {column} = '{value}'")]
    NoMatchingRow { column: String, value: String },

    #[error("row where {column} = '{value}' has null values for: {}\n  → Expected {expected} non-null attribute values, found {found}", .missing.join(", "))]
    NullValues {
        column: String,
        value: String,
        expected: usize,
        found: usize,
        missing: Vec<String>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("backing store error: {0}")]
    BackingStore(#[from] RowSourceError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

pub trait DataSourceLoader {
    fn source_type(&self) -> DataSourceType;

    fn spec(&self) -> &LoaderSpec;

    /// Build the center node for `seed` with one information child per
    /// configured attribute column, in configured order. The node is created
    /// detached; the caller installs it as the tree root.
    fn load_root(&mut self, tree: &mut EntityTree, seed: &str) -> LoadResult<TreeNodeId>;

    /// Refetch the row matching `value` on `header` and append every
    /// configured attribute as a child of `parent`.
    fn expand_information(
        &mut self,
        tree: &mut EntityTree,
        parent: TreeNodeId,
        value: &str,
        header: &str,
    ) -> LoadResult<TreeNodeId>;

    /// Append up to `max_children` center nodes for the rows sharing
    /// `value` on `header`. No matching rows leaves `parent` childless.
    fn expand_center(
        &mut self,
        tree: &mut EntityTree,
        parent: TreeNodeId,
        max_children: usize,
        value: &str,
        header: &str,
    ) -> LoadResult<TreeNodeId>;
}

/// Project the configured attribute columns out of one row, rejecting nulls.
///
/// `lookup` reads a column from the row the way the calling loader addresses
/// columns (by header or by position).
pub(crate) fn collect_information_values<'r, F>(
    spec: &LoaderSpec,
    filter_column: &str,
    filter_value: &str,
    lookup: F,
) -> Result<Vec<(String, String)>, SetupError>
where
    F: Fn(&ColumnRef) -> Option<&'r str>,
{
    let columns = spec.information_columns();
    let mut values = Vec::with_capacity(columns.len());
    let mut missing = Vec::new();

    for column in columns {
        let header = spec
            .header_for(column)
            .ok_or_else(|| SetupError::UnmappedColumn {
                column: column.to_string(),
            })?;
        match lookup(column) {
            Some(value) => values.push((value.to_string(), header)),
            None => missing.push(header),
        }
    }

    if values.len() < columns.len() {
        return Err(SetupError::NullValues {
            column: filter_column.to_string(),
            value: filter_value.to_string(),
            expected: columns.len(),
            found: values.len(),
            missing,
        });
    }

    Ok(values)
}

/// Keep the non-null center values of a center expansion, up to the cap.
///
/// Null values do not count toward the cap. Returns the kept values and how
/// many non-null values the cap cut off.
pub(crate) fn cap_center_values<'r, I>(
    column: &str,
    values: I,
    max_children: usize,
) -> (Vec<&'r str>, usize)
where
    I: IntoIterator<Item = Option<&'r str>>,
{
    let mut kept = Vec::new();
    let mut truncated = 0;
    let mut nulls = 0;
    for value in values {
        match value {
            None => nulls += 1,
            Some(v) if kept.len() < max_children => kept.push(v),
            Some(_) => truncated += 1,
        }
    }

    if nulls > 0 {
        tracing::debug!(column, nulls, "skipped rows with null center value");
    }
    if truncated > 0 {
        tracing::debug!(cap = max_children, truncated, "fan-out truncated");
    }
    (kept, truncated)
}
