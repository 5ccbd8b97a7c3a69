//! Entity classifications

use super::{record, Validate};
use entity_admin_core::validation::{ValidationResult, Validator};

record! {
    /// Kind of organization an entity is
    pub struct EntityType / NewEntityType / EntityTypePatch {
        pub name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        pub is_active: bool,
    }
}

impl NewEntityType {
    /// Active type without a description
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_active: true,
        }
    }
}

impl EntityType {
    pub(crate) fn display_name(&self) -> String {
        self.name.clone()
    }
}

impl Validate for NewEntityType {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("name", &self.name)
            .max_length("name", &self.name, 100)
            .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        assert!(NewEntityType::new("Cooperative").validate().is_valid());
        assert!(!NewEntityType::new("").validate().is_valid());
        assert!(!NewEntityType::new("x".repeat(101)).validate().is_valid());
    }
}
