//! Entity lifecycle statuses

use super::{record, Validate};
use entity_admin_core::validation::{ValidationResult, Validator};

record! {
    /// Status an entity or branch can be in
    pub struct EntityStatus / NewEntityStatus / EntityStatusPatch {
        pub name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        pub is_active: bool,
    }
}

impl NewEntityStatus {
    /// Active status without a description
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_active: true,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl EntityStatus {
    pub(crate) fn display_name(&self) -> String {
        self.name.clone()
    }
}

impl Validate for NewEntityStatus {
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
        assert!(NewEntityStatus::new("Active").validate().is_valid());
        let result = NewEntityStatus::new("").validate();
        assert_eq!(result.failed_fields(), vec!["name"]);
    }

    #[test]
    fn test_description_optional_on_wire() {
        let status: EntityStatus =
            serde_json::from_str(r#"{"id": 1, "name": "Suspended", "is_active": false}"#).unwrap();
        assert_eq!(status.description, None);

        let body = serde_json::to_string(&NewEntityStatus::new("Closed").with_description("No longer operating")).unwrap();
        assert!(body.contains("No longer operating"));
    }
}
