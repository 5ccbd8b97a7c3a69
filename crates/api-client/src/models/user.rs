//! Console users

use super::{now_timestamp, record, RecordId, Validate};
use entity_admin_core::validation::{ValidationResult, Validator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender as stored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "M"),
            Self::Female => write!(f, "F"),
            Self::Other => write!(f, "O"),
        }
    }
}

record! {
    /// A person allowed to sign in, optionally tied to an entity
    pub struct User / NewUser / UserPatch {
        pub email: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub nickname: Option<String>,
        pub firstname: String,
        pub lastname: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub phone: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub dateofbirth: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub gender: Option<Gender>,
        pub password: String,
        pub expirydate: String,
        pub usertypeid: RecordId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub entityid: Option<RecordId>,
        pub mfaactive: bool,
        pub is_active: bool,
        pub isdeleted: bool,
        pub createdon: String,
        pub createdby: RecordId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub lastupdatedon: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub lastupdatedby: Option<RecordId>,
    }
}

impl NewUser {
    /// Active user of type 1, created now, MFA off
    pub fn new(
        email: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        password: impl Into<String>,
        expirydate: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            nickname: None,
            firstname: firstname.into(),
            lastname: lastname.into(),
            phone: None,
            dateofbirth: None,
            gender: None,
            password: password.into(),
            expirydate: expirydate.into(),
            usertypeid: 1,
            entityid: None,
            mfaactive: false,
            is_active: true,
            isdeleted: false,
            createdon: now_timestamp(),
            createdby: 0,
            lastupdatedon: None,
            lastupdatedby: None,
        }
    }

    /// Attach to an entity
    #[must_use]
    pub fn for_entity(mut self, entity: RecordId) -> Self {
        self.entityid = Some(entity);
        self
    }
}

impl User {
    pub(crate) fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

impl Validate for NewUser {
    fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("firstname", &self.firstname)
            .required("lastname", &self.lastname)
            .required("email", &self.email)
            .email("email", &self.email)
            .required("password", &self.password)
            .required("expirydate", &self.expirydate)
            .date("expirydate", &self.expirydate)
            .optional_date("dateofbirth", self.dateofbirth.as_deref())
            .positive("usertypeid", self.usertypeid)
            .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> NewUser {
        NewUser::new("ana@example.org", "Ana", "Macuácua", "s3cret", "2030-01-31")
    }

    #[test]
    fn test_defaults() {
        let user = valid();
        assert!(user.is_active);
        assert!(!user.isdeleted);
        assert!(!user.mfaactive);
        assert_eq!(user.usertypeid, 1);
        assert!(chrono::DateTime::parse_from_rfc3339(&user.createdon).is_ok());
    }

    #[test]
    fn test_valid_user() {
        assert!(valid().validate().is_valid());
    }

    #[test]
    fn test_invalid_email_and_dates() {
        let mut user = valid();
        user.email = "ana-at-example".to_string();
        user.expirydate = "31/01/2030".to_string();
        user.dateofbirth = Some("1990-13-01".to_string());

        let result = user.validate();
        assert_eq!(result.failed_fields(), vec!["email", "expirydate", "dateofbirth"]);
    }

    #[test]
    fn test_missing_required_fields() {
        let user = NewUser::new("", "", "", "", "");
        let result = user.validate();
        assert_eq!(
            result.failed_fields(),
            vec!["firstname", "lastname", "email", "password", "expirydate"]
        );
    }

    #[test]
    fn test_gender_wire_format() {
        let mut user = valid();
        user.gender = Some(Gender::Female);
        let body = serde_json::to_value(&user).unwrap();
        assert_eq!(body["gender"], "F");

        let decoded: NewUser = serde_json::from_value(body).unwrap();
        assert_eq!(decoded.gender, Some(Gender::Female));
        assert!(serde_json::from_value::<Gender>(json!("X")).is_err());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(valid().with_id(4).display_name(), "Ana Macuácua");
    }
}
