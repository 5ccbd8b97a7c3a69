//! Branches of an entity

use super::{now_timestamp, record, RecordId, Validate};
use entity_admin_core::validation::{ValidationResult, Validator};

record! {
    /// A physical site belonging to an entity
    pub struct EntityBranch / NewEntityBranch / EntityBranchPatch {
        pub entityid: RecordId,
        /// Head office flag
        pub is_main: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub address: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub postcode: Option<String>,
        pub locationid: RecordId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub phone: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub contactname: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub contactphone: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub contactemail: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub gpslat: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub gpslong: Option<String>,
        pub openonholidays: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub holidaysopentime: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub holidaysclosetime: Option<String>,
        pub entitystatusid: RecordId,
        pub is_deleted: bool,
        pub createdon: String,
        pub createdby: RecordId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub lastupdatedon: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub lastupdatedby: Option<RecordId>,
    }
}

impl NewEntityBranch {
    /// Secondary branch of `entity` at `location`, created now
    pub fn new(entity: RecordId, location: RecordId) -> Self {
        Self {
            entityid: entity,
            is_main: false,
            address: None,
            postcode: None,
            locationid: location,
            phone: None,
            contactname: None,
            contactphone: None,
            contactemail: None,
            gpslat: None,
            gpslong: None,
            openonholidays: false,
            holidaysopentime: None,
            holidaysclosetime: None,
            entitystatusid: 1,
            is_deleted: false,
            createdon: now_timestamp(),
            createdby: 0,
            lastupdatedon: None,
            lastupdatedby: None,
        }
    }

    #[must_use]
    pub fn at(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

impl EntityBranch {
    pub(crate) fn display_name(&self) -> String {
        format!(
            "Branch {} - {}",
            self.id,
            self.address.as_deref().unwrap_or("No address")
        )
    }
}

fn coordinate(field: &str, value: Option<&str>, limit: f64) -> Option<String> {
    let value = value?;
    match value.trim().parse::<f64>() {
        Ok(v) if v.abs() <= limit => None,
        Ok(_) => Some(format!("{field} must be within ±{limit}")),
        Err(_) => Some(format!("{field} must be a decimal number")),
    }
}

impl Validate for NewEntityBranch {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .positive("entityid", self.entityid)
            .positive("locationid", self.locationid)
            .positive("entitystatusid", self.entitystatusid)
            .optional_email("contactemail", self.contactemail.as_deref())
            .optional_time("holidaysopentime", self.holidaysopentime.as_deref())
            .optional_time("holidaysclosetime", self.holidaysclosetime.as_deref())
            .custom("gpslat", || coordinate("gpslat", self.gpslat.as_deref(), 90.0))
            .custom("gpslong", || coordinate("gpslong", self.gpslong.as_deref(), 180.0))
            .validate()
    }
}
