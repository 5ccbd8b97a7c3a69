//! Console sections
//!
//! Each resource has a *create* section and a *manage* section. The
//! catalog order is the navigation order.

use serde::Serialize;
use std::fmt;

/// What a section does with its resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionAction {
    /// Form for a new record
    Create,
    /// List with edit and delete
    Manage,
}

impl fmt::Display for SectionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Manage => write!(f, "manage"),
        }
    }
}

/// One screen of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Stable identifier, persisted as the active section
    pub id: &'static str,
    /// Navigation label
    pub label: &'static str,
    /// Resource path the section operates on
    pub resource: &'static str,
    pub action: SectionAction,
}

impl Section {
    const fn new(
        id: &'static str,
        label: &'static str,
        resource: &'static str,
        action: SectionAction,
    ) -> Self {
        Self {
            id,
            label,
            resource,
            action,
        }
    }

    /// Subtitle shown under the section heading
    #[must_use]
    pub fn subtitle(&self) -> &'static str {
        match self.action {
            SectionAction::Create => "Create new records",
            SectionAction::Manage => "View and manage records",
        }
    }
}

/// Section shown when nothing valid has been persisted
pub const DEFAULT_SECTION: &str = "locations-create";

/// All sections in navigation order
pub static SECTIONS: [Section; 16] = {
    use SectionAction::{Create, Manage};
    [
        Section::new("locations-create", "Create Location", "locations", Create),
        Section::new("locations-manage", "Manage Locations", "locations", Manage),
        Section::new("entity-status-create", "Create Entity Status", "entity-status", Create),
        Section::new("entity-status-manage", "Manage Entity Statuses", "entity-status", Manage),
        Section::new("activity-types-create", "Create Activity Type", "activity-types", Create),
        Section::new("activity-types-manage", "Manage Activity Types", "activity-types", Manage),
        Section::new("entity-types-create", "Create Entity Type", "entity-types", Create),
        Section::new("entity-types-manage", "Manage Entity Types", "entity-types", Manage),
        Section::new("users-create", "Create User", "users", Create),
        Section::new("users-manage", "Manage Users", "users", Manage),
        Section::new("entities-create", "Create Entity", "entities", Create),
        Section::new("entities-manage", "Manage Entities", "entities", Manage),
        Section::new("branches-create", "Create Branch", "entity-branches", Create),
        Section::new("branches-manage", "Manage Branches", "entity-branches", Manage),
        Section::new("branch-hours-create", "Create Opening Hours", "branch-hours", Create),
        Section::new("branch-hours-manage", "Manage Opening Hours", "branch-hours", Manage),
    ]
};

/// Look up a section by id
#[must_use]
pub fn find(id: &str) -> Option<&'static Section> {
    SECTIONS.iter().find(|s| s.id == id)
}

/// The fallback section
#[must_use]
pub fn default_section() -> &'static Section {
    &SECTIONS[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_section_ids_unique() {
        let ids: HashSet<_> = SECTIONS.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), SECTIONS.len());
    }

    #[test]
    fn test_each_resource_has_create_and_manage() {
        let resources: HashSet<_> = SECTIONS.iter().map(|s| s.resource).collect();
        assert_eq!(resources.len(), 8);
        for resource in resources {
            let actions: Vec<_> = SECTIONS
                .iter()
                .filter(|s| s.resource == resource)
                .map(|s| s.action)
                .collect();
            assert_eq!(actions, vec![SectionAction::Create, SectionAction::Manage]);
        }
    }

    #[test]
    fn test_default_section() {
        assert_eq!(default_section().id, DEFAULT_SECTION);
        assert_eq!(find(DEFAULT_SECTION), Some(default_section()));
    }

    #[test]
    fn test_find_unknown() {
        assert!(find("dashboard").is_none());
    }

    #[test]
    fn test_subtitle() {
        assert_eq!(find("users-manage").unwrap().subtitle(), "View and manage records");
        assert_eq!(find("users-create").unwrap().subtitle(), "Create new records");
    }
}
