//! Foreign key display
//!
//! Listings show names instead of raw ids. A [`Lookup`] maps the ids of one
//! fetched collection to their labels; ids it has not seen render as
//! `Unknown <thing>`.

use crate::models::{Entity, EntityBranch, RecordId};
use crate::resources::{Resource, ResourceKind};
use std::collections::HashMap;

/// Id to label map for one collection
#[derive(Debug, Clone, Default)]
pub struct Lookup {
    thing: &'static str,
    labels: HashMap<RecordId, String>,
}

impl Lookup {
    /// Index `records` by id
    pub fn from_records<R: Resource>(records: &[R]) -> Self {
        Self {
            thing: R::KIND.singular(),
            labels: records.iter().map(|r| (r.id(), r.label())).collect(),
        }
    }

    /// Lookup that knows no records of `kind`; every id renders as unknown
    #[must_use]
    pub fn empty(kind: ResourceKind) -> Self {
        Self {
            thing: kind.singular(),
            labels: HashMap::new(),
        }
    }

    /// Label for `id`, or `Unknown <thing>`
    #[must_use]
    pub fn label(&self, id: RecordId) -> String {
        self.labels
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("Unknown {}", self.thing))
    }

    /// Label for an optional foreign key; `-` when unset
    #[must_use]
    pub fn optional_label(&self, id: Option<RecordId>) -> String {
        id.map_or_else(|| "-".to_string(), |id| self.label(id))
    }

    /// Number of indexed records
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when nothing was indexed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Branch and owning entity names, as shown next to branch hours
#[derive(Debug, Clone, Default)]
pub struct BranchDirectory {
    branches: Lookup,
    owners: HashMap<RecordId, RecordId>,
    entities: Lookup,
}

impl BranchDirectory {
    /// Index `branches` and the `entities` that own them
    pub fn new(branches: &[EntityBranch], entities: &[Entity]) -> Self {
        Self {
            branches: Lookup::from_records(branches),
            owners: branches.iter().map(|b| (b.id, b.entityid)).collect(),
            entities: Lookup::from_records(entities),
        }
    }

    /// Label of branch `id`
    #[must_use]
    pub fn branch_label(&self, id: RecordId) -> String {
        self.branches.label(id)
    }

    /// Name of the entity owning branch `id`
    #[must_use]
    pub fn entity_label(&self, id: RecordId) -> String {
        match self.owners.get(&id) {
            Some(&entity) => self.entities.label(entity),
            None => format!("Unknown {}", Entity::KIND.singular()),
        }
    }
}
