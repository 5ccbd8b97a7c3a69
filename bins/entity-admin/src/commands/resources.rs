//! Resources command - list the REST bindings

use super::print_json;
use crate::context::Context;
use entity_admin_api_client::ResourceKind;
use entity_admin_cli::output::Status;
use entity_admin_cli::table::Table;
use serde::Serialize;

#[derive(Serialize)]
struct ResourceInfo {
    path: &'static str,
    singular: &'static str,
    plural: &'static str,
}

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    let resources: Vec<ResourceInfo> = ResourceKind::ALL
        .iter()
        .map(|kind| ResourceInfo {
            path: kind.path(),
            singular: kind.singular(),
            plural: kind.plural(),
        })
        .collect();

    if ctx.json() {
        return print_json(&resources);
    }

    Status::header("Resources");
    let mut table = Table::new(["path", "record", "collection"]);
    for r in &resources {
        table.push_row(vec![format!("/{}", r.path), r.singular.to_string(), r.plural.to_string()]);
    }
    table.print();
    Ok(())
}
