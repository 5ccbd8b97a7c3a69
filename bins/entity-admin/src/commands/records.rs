//! Record commands - list, get, create, update, delete
//!
//! Each command is generic over the record type and dispatched on the
//! resource kind given on the command line.

use super::print_json;
use crate::context::Context;
use crate::failure::{invalid_input, notify};
use crate::render::{self, LocalBoxFuture, Resolver};
use anyhow::Result;
use entity_admin_api_client::{RecordId, Resource, ResourceKind, ResourceVisitor};
use entity_admin_cli::output::{format_count, format_duration, Status};
use entity_admin_cli::{progress, prompt};
use serde_json::Value;
use std::time::Instant;

/// Binds a record command to the record type of the chosen kind
macro_rules! visitor {
    ($name:ident { $($field:ident : $ty:ty),* } => $run:ident) => {
        struct $name<'a> {
            ctx: &'a Context,
            $($field: $ty,)*
        }

        impl<'a> ResourceVisitor for $name<'a> {
            type Output = LocalBoxFuture<'a, Result<()>>;

            fn visit<R: Resource>(self) -> Self::Output {
                Box::pin($run::<R>(self.ctx, $(self.$field),*))
            }
        }
    };
}

visitor!(List {} => list_records);
visitor!(Get { id: RecordId } => get_record);
visitor!(Create { body: &'a str } => create_record);
visitor!(Update { id: RecordId, body: &'a str } => update_record);
visitor!(Delete { id: RecordId } => delete_record);

pub async fn list(ctx: &Context, kind: ResourceKind) -> Result<()> {
    kind.visit(List { ctx }).await
}

pub async fn get(ctx: &Context, kind: ResourceKind, id: RecordId) -> Result<()> {
    kind.visit(Get { ctx, id }).await
}

pub async fn create(ctx: &Context, kind: ResourceKind, body: &str) -> Result<()> {
    kind.visit(Create { ctx, body }).await
}

pub async fn update(ctx: &Context, kind: ResourceKind, id: RecordId, body: &str) -> Result<()> {
    kind.visit(Update { ctx, id, body }).await
}

pub async fn delete(ctx: &Context, kind: ResourceKind, id: RecordId, yes: bool) -> Result<()> {
    if ctx.confirm_delete && !yes {
        let question = format!("Delete {} {id}?", kind.singular());
        if !prompt::confirm(&question)? {
            Status::info("Cancelled");
            return Ok(());
        }
    }
    kind.visit(Delete { ctx, id }).await
}

fn show_record<R: Resource>(ctx: &Context, record: &R) -> Result<()> {
    if ctx.json() {
        return print_json(record);
    }
    Status::header(&format!("{} {}", R::KIND.singular(), record.id()));
    render::record_table(&serde_json::to_value(record)?).print();
    Ok(())
}

async fn list_records<R: Resource>(ctx: &Context) -> Result<()> {
    let kind = R::KIND;
    let started = Instant::now();
    let spinner = (!ctx.json()).then(|| progress::spinner(&format!("Loading {}...", kind.plural())));

    let fetched = ctx.client.service::<R>().get_all().await;
    let records = match fetched {
        Ok(records) => records,
        Err(e) => {
            if let Some(pb) = &spinner {
                progress::finish(pb);
            }
            return Err(notify(format!("Failed to load {}", kind.plural()), e));
        }
    };

    if ctx.json() {
        return print_json(&records);
    }

    let rows: Vec<Value> = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()?;
    let columns = render::columns(kind);
    let resolver = Resolver::fetch(&ctx.client, &columns).await;
    if let Some(pb) = &spinner {
        progress::finish(pb);
    }

    Status::header(&format!("{} ({})", capitalize(kind.plural()), kind.path()));
    if rows.is_empty() {
        Status::info(&format!("No {} yet", kind.plural()));
    } else {
        resolver.table(&columns, &rows).print();
    }
    println!();
    Status::info(&format!(
        "{} in {}",
        format_count(rows.len(), kind.singular(), kind.plural()),
        format_duration(started.elapsed())
    ));
    Ok(())
}

async fn get_record<R: Resource>(ctx: &Context, id: RecordId) -> Result<()> {
    let record = ctx
        .client
        .service::<R>()
        .get_by_id(id)
        .await
        .map_err(|e| notify(format!("Failed to load {}", R::KIND.singular()), e))?;
    show_record(ctx, &record)
}

async fn create_record<R: Resource>(ctx: &Context, body: &str) -> Result<()> {
    let thing = R::KIND.singular();
    let new: R::New = serde_json::from_str(body).map_err(|e| invalid_input(thing, &e))?;

    let created = ctx
        .client
        .service::<R>()
        .create_validated(&new)
        .await
        .map_err(|e| notify(format!("Failed to save {thing}"), e))?;

    if !ctx.json() {
        Status::success(&format!("Created {thing} {}: {}", created.id(), created.label()));
    }
    show_record(ctx, &created)
}

async fn update_record<R: Resource>(ctx: &Context, id: RecordId, body: &str) -> Result<()> {
    let thing = R::KIND.singular();
    let fields: Value = serde_json::from_str(body).map_err(|e| invalid_input(thing, &e))?;
    if fields.as_object().is_some_and(serde_json::Map::is_empty) {
        Status::warning("No fields to update");
        return Ok(());
    }
    let patch: R::Patch = serde_json::from_value(fields).map_err(|e| invalid_input(thing, &e))?;

    let updated = ctx
        .client
        .service::<R>()
        .update_validated(id, &patch)
        .await
        .map_err(|e| notify(format!("Failed to save {thing}"), e))?;

    if !ctx.json() {
        Status::success(&format!("Updated {thing} {}: {}", updated.id(), updated.label()));
    }
    show_record(ctx, &updated)
}

async fn delete_record<R: Resource>(ctx: &Context, id: RecordId) -> Result<()> {
    let thing = R::KIND.singular();
    ctx.client
        .service::<R>()
        .delete(id)
        .await
        .map_err(|e| notify(format!("Failed to delete {thing}"), e))?;

    if ctx.json() {
        return print_json(&serde_json::json!({ "deleted": id, "resource": R::KIND.path() }));
    }
    Status::success(&format!("Deleted {thing} {id}"));
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("entity statuses"), "Entity statuses");
        assert_eq!(capitalize(""), "");
    }
}
