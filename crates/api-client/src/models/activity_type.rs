//! Economic activity classification codes

use super::{record, Validate};
use entity_admin_core::validation::{ValidationResult, Validator};

record! {
    /// Activity code with its position in the classification tree
    pub struct ActivityType / NewActivityType / ActivityTypePatch {
        pub code: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub class_code: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub group_code: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub division_code: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub section_code: Option<String>,
        pub description: String,
        pub is_active: bool,
    }
}

impl NewActivityType {
    /// Active leaf code with no parent codes
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            class_code: None,
            group_code: None,
            division_code: None,
            section_code: None,
            description: description.into(),
            is_active: true,
        }
    }
}

impl ActivityType {
    pub(crate) fn display_name(&self) -> String {
        format!("{} - {}", self.code, self.description)
    }
}

impl Validate for NewActivityType {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("code", &self.code)
            .required("description", &self.description)
            .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_requires_code_and_description() {
        assert!(NewActivityType::new("0111", "Growing of cereals").validate().is_valid());

        let result = NewActivityType::new("", "").validate();
        assert_eq!(result.failed_fields(), vec!["code", "description"]);
    }

    #[test]
    fn test_display_name() {
        let activity = NewActivityType::new("4711", "Retail sale in non-specialised stores").with_id(1);
        assert_eq!(activity.display_name(), "4711 - Retail sale in non-specialised stores");
    }
}
