//! Table layout for each resource
//!
//! Rows are rendered from the records' JSON form. Foreign keys are shown
//! by name, resolved through lookups fetched alongside the listing.

use entity_admin_api_client::lookup::{BranchDirectory, Lookup};
use entity_admin_api_client::{AdminClient, ApiResult, Resource, ResourceKind, ResourceVisitor};
use entity_admin_cli::table::Table;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// What a column shows
#[derive(Debug, Clone, Copy)]
pub enum Cell {
    /// A field of the record, as is
    Field(&'static str),
    /// A foreign key, shown as the referenced record's label
    Ref(&'static str, ResourceKind),
    /// The entity owning the branch in this field
    BranchOwner(&'static str),
}

/// Columns listed for `kind`
pub fn columns(kind: ResourceKind) -> Vec<(&'static str, Cell)> {
    use Cell::{BranchOwner, Field, Ref};
    use ResourceKind as K;

    match kind {
        K::Locations => vec![
            ("id", Field("id")),
            ("name", Field("name")),
            ("parent", Ref("parent_id", K::Locations)),
            ("province", Field("is_province")),
            ("capital", Field("is_capital_city")),
            ("municipality", Field("is_municipality")),
            ("active", Field("is_active")),
        ],
        K::EntityStatus | K::EntityTypes => vec![
            ("id", Field("id")),
            ("name", Field("name")),
            ("description", Field("description")),
            ("active", Field("is_active")),
        ],
        K::ActivityTypes => vec![
            ("id", Field("id")),
            ("code", Field("code")),
            ("description", Field("description")),
            ("section", Field("section_code")),
            ("active", Field("is_active")),
        ],
        K::Users => vec![
            ("id", Field("id")),
            ("firstname", Field("firstname")),
            ("lastname", Field("lastname")),
            ("email", Field("email")),
            ("entity", Ref("entityid", K::Entities)),
            ("expires", Field("expirydate")),
            ("active", Field("is_active")),
        ],
        K::Entities => vec![
            ("id", Field("id")),
            ("official name", Field("officialname")),
            ("preferred", Field("preferredname")),
            ("nuit", Field("nuit")),
            ("type", Ref("entitytypeid", K::EntityTypes)),
            ("activity", Ref("activitytypeid", K::ActivityTypes)),
            ("status", Ref("entitystatusid", K::EntityStatus)),
        ],
        K::EntityBranches => vec![
            ("id", Field("id")),
            ("entity", Ref("entityid", K::Entities)),
            ("address", Field("address")),
            ("location", Ref("locationid", K::Locations)),
            ("main", Field("is_main")),
            ("holidays", Field("openonholidays")),
            ("status", Ref("entitystatusid", K::EntityStatus)),
        ],
        K::BranchHours => vec![
            ("id", Field("id")),
            ("branch", Ref("branchid", K::EntityBranches)),
            ("entity", BranchOwner("branchid")),
            ("weekday", Field("weekday")),
            ("open", Field("opentime")),
            ("close", Field("closetime")),
        ],
    }
}

/// Plain text for a JSON value
pub fn plain(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(true)) => "yes".to_string(),
        Some(Value::Bool(false)) => "no".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Labels needed to render foreign key columns
#[derive(Default)]
pub struct Resolver {
    lookups: HashMap<ResourceKind, Lookup>,
    branches: Option<BranchDirectory>,
}

struct FetchLookup<'a>(&'a AdminClient);

impl<'a> ResourceVisitor for FetchLookup<'a> {
    type Output = LocalBoxFuture<'a, ApiResult<Lookup>>;

    fn visit<R: Resource>(self) -> Self::Output {
        let client = self.0;
        Box::pin(async move {
            let records = client.service::<R>().get_all().await?;
            Ok(Lookup::from_records(&records))
        })
    }
}

impl Resolver {
    /// Fetch the collections referenced by the columns.
    ///
    /// A collection that fails to load leaves its references unresolved.
    pub async fn fetch(client: &AdminClient, columns: &[(&str, Cell)]) -> Self {
        let mut resolver = Self::default();

        for (_, cell) in columns {
            match *cell {
                Cell::Ref(_, kind) if !resolver.lookups.contains_key(&kind) => {
                    let lookup = kind.visit(FetchLookup(client)).await.unwrap_or_else(|e| {
                        debug!(error = %e, resource = kind.path(), "Lookup unavailable");
                        Lookup::empty(kind)
                    });
                    resolver.lookups.insert(kind, lookup);
                }
                Cell::BranchOwner(_) if resolver.branches.is_none() => {
                    resolver.branches = Some(Self::directory(client).await);
                }
                _ => {}
            }
        }
        resolver
    }

    async fn directory(client: &AdminClient) -> BranchDirectory {
        let branches = client.entity_branches().get_all().await;
        let entities = client.entities().get_all().await;
        match (branches, entities) {
            (Ok(branches), Ok(entities)) => BranchDirectory::new(&branches, &entities),
            (Err(e), _) | (_, Err(e)) => {
                debug!(error = %e, "Branch directory unavailable");
                BranchDirectory::default()
            }
        }
    }

    fn cell(&self, row: &Value, cell: Cell) -> String {
        match cell {
            Cell::Field(field) => plain(row.get(field)),
            Cell::Ref(field, kind) => match row.get(field).and_then(Value::as_i64) {
                Some(id) => self
                    .lookups
                    .get(&kind)
                    .map_or_else(|| id.to_string(), |lookup| lookup.label(id)),
                None => "-".to_string(),
            },
            Cell::BranchOwner(field) => match row.get(field).and_then(Value::as_i64) {
                Some(id) => self
                    .branches
                    .as_ref()
                    .map_or_else(|| "Unknown entity".to_string(), |d| d.entity_label(id)),
                None => "-".to_string(),
            },
        }
    }

    /// Lay out `rows` under `columns`
    pub fn table(&self, columns: &[(&'static str, Cell)], rows: &[Value]) -> Table {
        let mut table = Table::new(columns.iter().map(|(header, _)| *header));
        for row in rows {
            table.push_row(columns.iter().map(|(_, cell)| self.cell(row, *cell)).collect());
        }
        table
    }
}

/// Two-column field/value table for one record
pub fn record_table(record: &Value) -> Table {
    let mut table = Table::new(["field", "value"]);
    if let Value::Object(fields) = record {
        for (name, value) in fields {
            table.push_row(vec![name.clone(), plain(Some(value))]);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity_admin_api_client::fixtures::demo_backend;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_plain() {
        assert_eq!(plain(None), "-");
        assert_eq!(plain(Some(&Value::Null)), "-");
        assert_eq!(plain(Some(&json!(true))), "yes");
        assert_eq!(plain(Some(&json!(42))), "42");
        assert_eq!(plain(Some(&json!("Beira"))), "Beira");
    }

    #[test]
    fn test_every_kind_has_id_column() {
        for &kind in ResourceKind::ALL {
            assert_eq!(columns(kind)[0].0, "id");
        }
    }

    #[tokio::test]
    async fn test_branch_hours_resolve_names() {
        let client = AdminClient::with_transport(Arc::new(demo_backend().unwrap()));
        let columns = columns(ResourceKind::BranchHours);
        let resolver = Resolver::fetch(&client, &columns).await;

        let rows = vec![
            json!({"id": 1, "branchid": 1, "weekday": "Sábado", "opentime": "08:00"}),
            json!({"id": 2, "branchid": 40, "weekday": "Domingo", "opentime": "09:00"}),
        ];
        let lines = resolver.table(&columns, &rows).render(None);
        assert!(lines[2].contains("Branch 1 - Av. 24 de Julho, 410"));
        assert!(lines[2].contains("CAV"));
        assert!(lines[3].contains("Unknown branch"));
        assert!(lines[3].contains("Unknown entity"));
    }

    #[tokio::test]
    async fn test_unreachable_lookup_renders_unknown() {
        let backend = Arc::new(demo_backend().unwrap());
        let client = AdminClient::with_transport(backend.clone());
        let columns = columns(ResourceKind::Locations);
        backend.set_offline(true);

        let resolver = Resolver::fetch(&client, &columns).await;
        let lines = resolver
            .table(&columns, &[json!({"id": 2, "parent_id": 1, "name": "Maputo Cidade"})])
            .render(None);
        assert!(lines[2].contains("Unknown location"));
    }
}
