//! Delimited-file loader
//!
//! Raw files carry no schema, so columns are addressed by position and
//! every child is labelled through the column→name mapping. Headers coming
//! back from a click are mapped to a column the same way.

use crate::domain::entities::EntityTree;
use crate::domain::ports::{
    cap_center_values, collect_information_values, DataSourceLoader, LoadResult, Row, RowFilter,
    RowSource, SetupError,
};
use crate::domain::value_objects::{ColumnRef, DataSourceType, LoaderSpec, NodeRole, TreeNodeId};

pub struct DelimitedLoader<S> {
    source: S,
    spec: LoaderSpec,
}

impl<S: RowSource> DelimitedLoader<S> {
    pub fn new(source: S, spec: LoaderSpec) -> Result<Self, SetupError> {
        spec.validate_for(DataSourceType::Csv)?;
        Ok(Self { source, spec })
    }

    fn center(&self) -> Result<(ColumnRef, String), SetupError> {
        let column = self
            .spec
            .center_column()
            .cloned()
            .ok_or(SetupError::MissingCenterColumn)?;
        let header = self
            .spec
            .header_for(&column)
            .ok_or_else(|| SetupError::UnmappedColumn {
                column: column.to_string(),
            })?;
        Ok((column, header))
    }

    fn column_for(&self, header: &str) -> Result<ColumnRef, SetupError> {
        self.spec
            .column_for_header(header)
            .ok_or_else(|| SetupError::UnknownHeader {
                header: header.to_string(),
            })
    }

    fn scan(&mut self, column: &ColumnRef, value: &str) -> LoadResult<Vec<Row>> {
        let rows = self.source.query(&RowFilter::new(column, value))?;
        tracing::debug!(
            source = %self.source.describe(),
            column = %column,
            value,
            rows = rows.len(),
            "scanned rows"
        );
        Ok(rows)
    }

    fn information_for(
        &mut self,
        column: &ColumnRef,
        header: &str,
        value: &str,
    ) -> LoadResult<Vec<(String, String)>> {
        let rows = self.scan(column, value)?;
        let row = rows.first().ok_or_else(|| SetupError::NoMatchingRow {
            column: header.to_string(),
            value: value.to_string(),
        })?;
        let values = collect_information_values(&self.spec, header, value, |c| row.get(c))
            .inspect_err(|err| tracing::warn!(%err, "rejected row"))?;
        Ok(values)
    }
}

impl<S: RowSource> DataSourceLoader for DelimitedLoader<S> {
    fn source_type(&self) -> DataSourceType {
        DataSourceType::Csv
    }

    fn spec(&self) -> &LoaderSpec {
        &self.spec
    }

    fn load_root(&mut self, tree: &mut EntityTree, seed: &str) -> LoadResult<TreeNodeId> {
        let (column, header) = self.center()?;
        let values = self.information_for(&column, &header, seed)?;
        let root = tree.create_node(seed, header, NodeRole::Center);
        tree.extend_children(root, values)?;
        Ok(root)
    }

    fn expand_information(
        &mut self,
        tree: &mut EntityTree,
        parent: TreeNodeId,
        value: &str,
        header: &str,
    ) -> LoadResult<TreeNodeId> {
        tree.ensure_role(parent, NodeRole::Center)?;
        let column = self.column_for(header)?;
        let values = self.information_for(&column, header, value)?;
        tree.extend_children(parent, values)?;
        Ok(parent)
    }

    fn expand_center(
        &mut self,
        tree: &mut EntityTree,
        parent: TreeNodeId,
        max_children: usize,
        value: &str,
        header: &str,
    ) -> LoadResult<TreeNodeId> {
        tree.ensure_role(parent, NodeRole::Information)?;
        let (center, center_header) = self.center()?;
        let column = self.column_for(header)?;
        let rows = self.scan(&column, value)?;

        let (names, _) = cap_center_values(
            &center_header,
            rows.iter().map(|row| row.get(&center)),
            max_children,
        );
        let centers: Vec<(String, String)> = names
            .into_iter()
            .map(|name| (name.to_string(), center_header.clone()))
            .collect();

        tree.extend_children(parent, centers)?;
        Ok(parent)
    }
}
