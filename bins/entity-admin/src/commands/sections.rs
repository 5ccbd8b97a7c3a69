//! Section commands - navigation state of the console

use super::print_json;
use crate::context::Context;
use anyhow::Result;
use entity_admin_cli::output::Status;
use entity_admin_cli::table::Table;
use entity_admin_core::sections::{Section, SECTIONS};
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Serialize)]
struct SectionEntry {
    #[serde(flatten)]
    section: Section,
    active: bool,
}

/// List all sections, marking the active one
pub fn list(ctx: &Context) -> Result<()> {
    let state = ctx.state();
    let active = state.active_section().id;

    if ctx.json() {
        let entries: Vec<_> = SECTIONS
            .iter()
            .map(|s| SectionEntry {
                section: *s,
                active: s.id == active,
            })
            .collect();
        return print_json(&entries);
    }

    Status::header("Sections");
    let mut table = Table::new(["", "id", "label", "resource", "action"]);
    for s in &SECTIONS {
        let marker = if s.id == active { "*" } else { "" };
        table.push_row(vec![
            marker.to_string(),
            s.id.to_string(),
            s.label.to_string(),
            s.resource.to_string(),
            s.action.to_string(),
        ]);
    }
    table.print();
    Ok(())
}

fn show(ctx: &Context, section: &Section) -> Result<()> {
    if ctx.json() {
        return print_json(section);
    }
    println!("{} {}", section.label.bold(), format!("({})", section.id).dimmed());
    println!("  {}", section.subtitle());
    Ok(())
}

/// Show the active section, or switch to `id` and persist it
pub fn show_or_set(ctx: &Context, id: Option<&str>, reset: bool) -> Result<()> {
    let mut state = ctx.state();

    if reset {
        state.reset()?;
        if !ctx.json() {
            Status::success("Section reset");
        }
    } else if let Some(id) = id {
        let section = state.set_active_section(id)?;
        if !ctx.json() {
            Status::success(&format!("Switched to {}", section.label));
        }
    }

    show(ctx, state.active_section())
}
