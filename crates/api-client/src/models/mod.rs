//! Record types served by the backend
//!
//! Every record type comes in three shapes generated from one field list:
//!
//! | Shape | Used for |
//! |-------|----------|
//! | `Location` | Records returned by the backend (with `id`) |
//! | `NewLocation` | `POST` bodies (everything except `id`) |
//! | `LocationPatch` | `PUT` bodies (every field optional, unset fields omitted) |
//!
//! Foreign keys are plain [`RecordId`] fields; nothing checks them client-side.

use entity_admin_core::validation::ValidationResult;

mod activity_type;
mod branch_hours;
mod entity;
mod entity_branch;
mod entity_status;
mod entity_type;
mod location;
mod user;

pub use activity_type::{ActivityType, ActivityTypePatch, NewActivityType};
pub use branch_hours::{EntityBranchHours, EntityBranchHoursPatch, NewEntityBranchHours, WEEKDAYS};
pub use entity::{Entity, EntityPatch, NewEntity};
pub use entity_branch::{EntityBranch, EntityBranchPatch, NewEntityBranch};
pub use entity_status::{EntityStatus, EntityStatusPatch, NewEntityStatus};
pub use entity_type::{EntityType, EntityTypePatch, NewEntityType};
pub use location::{Location, LocationPatch, NewLocation};
pub use user::{Gender, NewUser, User, UserPatch};

/// Server-assigned record identifier
pub type RecordId = i64;

/// Client-side checks run before a record is sent
pub trait Validate {
    /// Check the record and report every failing field
    fn validate(&self) -> ValidationResult;
}

/// Current time in the `createdon` wire format
pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Declares a record together with its create and patch bodies.
macro_rules! record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident / $new:ident / $patch:ident {
            $(
                $(#[$fmeta:meta])*
                pub $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            /// Server-assigned identifier
            pub id: $crate::models::RecordId,
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        #[doc = concat!("Create body for [`", stringify!($name), "`]: every field except `id`.")]
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $new {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        #[doc = concat!("Partial update body for [`", stringify!($name), "`]; unset fields are not sent.")]
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $patch {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $name {
            /// Split into identifier and create body
            #[must_use]
            pub fn into_parts(self) -> ($crate::models::RecordId, $new) {
                (self.id, $new { $( $field: self.$field, )* })
            }
        }

        impl $new {
            /// Attach a server-assigned identifier
            #[must_use]
            pub fn with_id(self, id: $crate::models::RecordId) -> $name {
                $name { id, $( $field: self.$field, )* }
            }
        }

        impl $patch {
            /// Overwrite the fields set in this patch, leaving the rest unchanged
            pub fn apply_to(&self, record: &mut $name) {
                $(
                    if let Some(value) = &self.$field {
                        record.$field = value.clone();
                    }
                )*
            }

            /// True when no field is set
            #[must_use]
            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )*
            }
        }
    };
}

pub(crate) use record;
