//! Relational loader
//!
//! Addresses every column by header name and compiles filters against the
//! configured base query. Numbered columns are translated through the
//! column→name mapping before they reach the row source.

use crate::domain::entities::EntityTree;
use crate::domain::ports::{
    cap_center_values, collect_information_values, DataSourceLoader, LoadResult, Row, RowFilter,
    RowSource, SetupError,
};
use crate::domain::value_objects::{ColumnRef, DataSourceType, LoaderSpec, NodeRole, TreeNodeId};

pub struct RelationalLoader<S> {
    source: S,
    spec: LoaderSpec,
}

impl<S: RowSource> RelationalLoader<S> {
    pub fn new(source: S, spec: LoaderSpec) -> Result<Self, SetupError> {
        spec.validate_for(DataSourceType::Database)?;
        Ok(Self { source, spec })
    }

    fn template(&self) -> Result<&str, SetupError> {
        self.spec
            .filter_template()
            .ok_or(SetupError::MissingFilterTemplate)
    }

    fn center_header(&self) -> Result<String, SetupError> {
        let center = self
            .spec
            .center_column()
            .ok_or(SetupError::MissingCenterColumn)?;
        self.spec
            .header_for(center)
            .ok_or_else(|| SetupError::UnmappedColumn {
                column: center.to_string(),
            })
    }

    fn fetch(&mut self, header: &str, value: &str) -> LoadResult<Vec<Row>> {
        let template = self.template()?.to_string();
        let column = ColumnRef::name(header);
        let rows = self
            .source
            .query(&RowFilter::new(&column, value).with_base(&template))?;
        tracing::debug!(
            source = %self.source.describe(),
            column = header,
            value,
            rows = rows.len(),
            "fetched rows"
        );
        Ok(rows)
    }

    /// Fetch the single row for `value` on `header` and project the attributes.
    fn information_for(&mut self, header: &str, value: &str) -> LoadResult<Vec<(String, String)>> {
        let rows = self.fetch(header, value)?;
        let row = rows.first().ok_or_else(|| SetupError::NoMatchingRow {
            column: header.to_string(),
            value: value.to_string(),
        })?;
        let spec = &self.spec;
        let values = collect_information_values(spec, header, value, |column| {
            spec.header_for(column)
                .and_then(|h| row.get_by_header(&h))
        })
        .inspect_err(|err| tracing::warn!(%err, "rejected row"))?;
        Ok(values)
    }
}

impl<S: RowSource> DataSourceLoader for RelationalLoader<S> {
    fn source_type(&self) -> DataSourceType {
        DataSourceType::Database
    }

    fn spec(&self) -> &LoaderSpec {
        &self.spec
    }

    fn load_root(&mut self, tree: &mut EntityTree, seed: &str) -> LoadResult<TreeNodeId> {
        let header = self.center_header()?;
        let values = self.information_for(&header, seed)?;
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
        let values = self.information_for(header, value)?;
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
        let center = self.center_header()?;
        let rows = self.fetch(header, value)?;

        let (names, _) = cap_center_values(
            &center,
            rows.iter().map(|row| row.get_by_header(&center)),
            max_children,
        );
        let centers: Vec<(String, String)> = names
            .into_iter()
            .map(|name| (name.to_string(), center.clone()))
            .collect();

        tree.extend_children(parent, centers)?;
        Ok(parent)
    }
}
