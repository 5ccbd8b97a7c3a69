//! Locations: provinces, cities and municipalities

use super::{record, RecordId, Validate};
use entity_admin_core::validation::{ValidationResult, Validator};

record! {
    /// A place in the administrative hierarchy
    pub struct Location / NewLocation / LocationPatch {
        /// Enclosing location, if any
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub parent_id: Option<RecordId>,
        pub name: String,
        pub is_province: bool,
        pub is_capital_city: bool,
        pub is_municipality: bool,
        pub is_active: bool,
    }
}

impl NewLocation {
    /// Active location with no parent and no classification flags set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            parent_id: None,
            name: name.into(),
            is_province: false,
            is_capital_city: false,
            is_municipality: false,
            is_active: true,
        }
    }

    /// Nest under `parent`
    #[must_use]
    pub fn within(mut self, parent: RecordId) -> Self {
        self.parent_id = Some(parent);
        self
    }
}

impl Location {
    pub(crate) fn display_name(&self) -> String {
        self.name.clone()
    }
}

impl Validate for NewLocation {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("name", &self.name)
            .custom("parent_id", || match self.parent_id {
                Some(id) if id <= 0 => Some("Must be a positive identifier".to_string()),
                _ => None,
            })
            .validate()
    }
}
