//! Registered organizations

use super::{now_timestamp, record, RecordId, Validate};
use entity_admin_core::validation::{ValidationResult, Validator};
use serde_json::Value;

record! {
    /// An organization registered in the dataset
    pub struct Entity / NewEntity / EntityPatch {
        pub officialname: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub preferredname: Option<String>,
        /// Tax identification number
        pub nuit: String,
        /// Social security number
        pub ssnumber: String,
        pub registrationnumber: String,
        pub registrationdate: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub activitystartdate: Option<String>,
        pub entitytypeid: RecordId,
        pub activitytypeid: RecordId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub website: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub phone: Option<String>,
        /// Binary payload, passed through untouched
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub logofile: Option<Value>,
        /// Binary payload, passed through untouched
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub picture: Option<Value>,
        pub entitystatusid: RecordId,
        pub isdeleted: bool,
        pub createdon: String,
        pub createdby: RecordId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub lastupdatedon: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub lastupdatedby: Option<RecordId>,
    }
}

impl NewEntity {
    /// Entity with the mandatory registration details, created now
    pub fn new(
        officialname: impl Into<String>,
        nuit: impl Into<String>,
        ssnumber: impl Into<String>,
        registrationnumber: impl Into<String>,
        registrationdate: impl Into<String>,
    ) -> Self {
        Self {
            officialname: officialname.into(),
            preferredname: None,
            nuit: nuit.into(),
            ssnumber: ssnumber.into(),
            registrationnumber: registrationnumber.into(),
            registrationdate: registrationdate.into(),
            activitystartdate: None,
            entitytypeid: 1,
            activitytypeid: 1,
            website: None,
            email: None,
            phone: None,
            logofile: None,
            picture: None,
            entitystatusid: 1,
            isdeleted: false,
            createdon: now_timestamp(),
            createdby: 0,
            lastupdatedon: None,
            lastupdatedby: None,
        }
    }

    /// Set the classification foreign keys
    #[must_use]
    pub fn classified(mut self, entitytype: RecordId, activitytype: RecordId, status: RecordId) -> Self {
        self.entitytypeid = entitytype;
        self.activitytypeid = activitytype;
        self.entitystatusid = status;
        self
    }
}

impl Entity {
    pub(crate) fn display_name(&self) -> String {
        self.preferredname
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.officialname)
            .to_string()
    }
}

impl Validate for NewEntity {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("officialname", &self.officialname)
            .required("nuit", &self.nuit)
            .required("ssnumber", &self.ssnumber)
            .required("registrationnumber", &self.registrationnumber)
            .required("registrationdate", &self.registrationdate)
            .date("registrationdate", &self.registrationdate)
            .optional_date("activitystartdate", self.activitystartdate.as_deref())
            .optional_email("email", self.email.as_deref())
            .positive("entitytypeid", self.entitytypeid)
            .positive("activitytypeid", self.activitytypeid)
            .positive("entitystatusid", self.entitystatusid)
            .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> NewEntity {
        NewEntity::new("Cooperativa Agrícola do Vale", "400123456", "SS-1029", "RC-2231", "2019-05-14")
    }

    #[test]
    fn test_valid_entity() {
        assert!(valid().validate().is_valid());
    }

    #[test]
    fn test_required_registration_fields() {
        let entity = NewEntity::new("", "", "", "", "");
        assert_eq!(
            entity.validate().failed_fields(),
            vec!["officialname", "nuit", "ssnumber", "registrationnumber", "registrationdate"]
        );
    }

    #[test]
    fn test_optional_email_checked_when_present() {
        let mut entity = valid();
        entity.email = Some("info@".to_string());
        assert_eq!(entity.validate().failed_fields(), vec!["email"]);
    }

    #[test]
    fn test_binary_fields_pass_through() {
        let mut entity = valid();
        entity.logofile = Some(json!({"type": "Buffer", "data": [137, 80, 78, 71]}));
        let body = serde_json::to_value(&entity).unwrap();
        assert_eq!(body["logofile"]["data"][1], 80);
        assert!(body.get("picture").is_none());
    }

    #[test]
    fn test_display_name_prefers_preferred_name() {
        let mut entity = valid().with_id(1);
        assert_eq!(entity.display_name(), "Cooperativa Agrícola do Vale");
        entity.preferredname = Some("CAV".to_string());
        assert_eq!(entity.display_name(), "CAV");
        entity.preferredname = Some("  ".to_string());
        assert_eq!(entity.display_name(), "Cooperativa Agrícola do Vale");
    }
}
