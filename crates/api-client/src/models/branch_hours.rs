//! Weekly opening hours of a branch

use super::{record, RecordId, Validate};
use entity_admin_core::validation::{ValidationResult, Validator};

/// Weekday names as stored by the backend, Monday first
pub const WEEKDAYS: [&str; 7] = [
    "Segunda-feira",
    "Terça-feira",
    "Quarta-feira",
    "Quinta-feira",
    "Sexta-feira",
    "Sábado",
    "Domingo",
];

record! {
    /// Opening and closing time of a branch on one weekday
    pub struct EntityBranchHours / NewEntityBranchHours / EntityBranchHoursPatch {
        pub branchid: RecordId,
        pub weekday: String,
        pub opentime: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub closetime: Option<String>,
    }
}

impl NewEntityBranchHours {
    pub fn new(branch: RecordId, weekday: impl Into<String>, opentime: impl Into<String>) -> Self {
        Self {
            branchid: branch,
            weekday: weekday.into(),
            opentime: opentime.into(),
            closetime: None,
        }
    }

    #[must_use]
    pub fn until(mut self, closetime: impl Into<String>) -> Self {
        self.closetime = Some(closetime.into());
        self
    }
}

impl EntityBranchHours {
    pub(crate) fn display_name(&self) -> String {
        format!(
            "{} {}-{}",
            self.weekday,
            self.opentime,
            self.closetime.as_deref().unwrap_or("?")
        )
    }
}

impl Validate for NewEntityBranchHours {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .positive("branchid", self.branchid)
            .one_of("weekday", &self.weekday, &WEEKDAYS)
            .required("opentime", &self.opentime)
            .time("opentime", &self.opentime)
            .optional_time("closetime", self.closetime.as_deref())
            .warn_if(
                "closetime",
                self.closetime.is_none(),
                "No closing time; the branch shows as open until further notice",
            )
            .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_hours() {
        let hours = NewEntityBranchHours::new(3, "Segunda-feira", "08:00").until("17:30");
        let result = hours.validate();
        assert!(result.is_valid());
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_missing_close_time_warns() {
        let result = NewEntityBranchHours::new(3, "Domingo", "10:00").validate();
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn test_invalid_hours() {
        let hours = NewEntityBranchHours::new(0, "Monday", "").until("7pm");
        assert_eq!(
            hours.validate().failed_fields(),
            vec!["branchid", "weekday", "opentime", "closetime"]
        );
    }

    #[test]
    fn test_display_name() {
        let hours = NewEntityBranchHours::new(3, "Sábado", "09:00").with_id(1);
        assert_eq!(hours.display_name(), "Sábado 09:00-?");
    }
}
