//! Resource bindings
//!
//! One table ties each REST path to its record types. From it come the
//! [`ResourceKind`] enum, the [`Resource`] impls, and the typed accessors
//! on [`AdminClient`].

use crate::client::AdminClient;
use crate::error::ApiError;
use crate::models::{
    ActivityType, ActivityTypePatch, Entity, EntityBranch, EntityBranchHours,
    EntityBranchHoursPatch, EntityBranchPatch, EntityPatch, EntityStatus, EntityStatusPatch,
    EntityType, EntityTypePatch, Location, LocationPatch, NewActivityType, NewEntity,
    NewEntityBranch, NewEntityBranchHours, NewEntityStatus, NewEntityType, NewLocation, NewUser,
    RecordId, User, UserPatch, Validate,
};
use crate::service::ApiService;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A record type served at a fixed REST path
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// `POST` body
    type New: Serialize + DeserializeOwned + Validate + Send + Sync;
    /// `PUT` body
    type Patch: Serialize + DeserializeOwned + Default + Send + Sync;

    /// Binding this record is served under
    const KIND: ResourceKind;

    /// Server-assigned identifier
    fn id(&self) -> RecordId;

    /// Human-readable name used by lookups and listings
    fn label(&self) -> String;

    /// Overwrite the fields set in `patch`
    fn apply(&mut self, patch: &Self::Patch);

    /// Drop the identifier, keeping the create body
    fn into_new(self) -> Self::New;
}

/// Operation generic over the record type, run by [`ResourceKind::visit`]
pub trait ResourceVisitor {
    /// Value produced by the visit
    type Output;

    /// Run the operation for record type `R`
    fn visit<R: Resource>(self) -> Self::Output;
}

macro_rules! bindings {
    ($(
        $variant:ident => $path:literal {
            record: $record:ty,
            new: $new:ty,
            patch: $patch:ty,
            names: ($singular:literal, $plural:literal),
            accessor: $accessor:ident,
        }
    )*) => {
        /// Every REST resource the backend exposes
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ResourceKind {
            $(
                #[doc = concat!("`/", $path, "`")]
                $variant,
            )*
        }

        impl ResourceKind {
            /// All bindings, in backend declaration order
            pub const ALL: &'static [ResourceKind] = &[$(ResourceKind::$variant),*];

            /// Collection path relative to the API root
            #[must_use]
            pub const fn path(self) -> &'static str {
                match self {
                    $(Self::$variant => $path,)*
                }
            }

            /// Name of one record, for messages
            #[must_use]
            pub const fn singular(self) -> &'static str {
                match self {
                    $(Self::$variant => $singular,)*
                }
            }

            /// Name of the collection, for messages
            #[must_use]
            pub const fn plural(self) -> &'static str {
                match self {
                    $(Self::$variant => $plural,)*
                }
            }

            /// Run `visitor` with the record type bound to this kind
            pub fn visit<V: ResourceVisitor>(self, visitor: V) -> V::Output {
                match self {
                    $(Self::$variant => visitor.visit::<$record>(),)*
                }
            }
        }

        $(
            impl Resource for $record {
                type New = $new;
                type Patch = $patch;

                const KIND: ResourceKind = ResourceKind::$variant;

                fn id(&self) -> RecordId {
                    self.id
                }

                fn label(&self) -> String {
                    self.display_name()
                }

                fn apply(&mut self, patch: &Self::Patch) {
                    patch.apply_to(self);
                }

                fn into_new(self) -> Self::New {
                    self.into_parts().1
                }
            }
        )*

        impl AdminClient {
            $(
                #[doc = concat!("Service for `/", $path, "`")]
                #[must_use]
                pub fn $accessor(&self) -> ApiService<$record> {
                    self.service()
                }
            )*
        }
    };
}

bindings! {
    Entities => "entities" {
        record: Entity,
        new: NewEntity,
        patch: EntityPatch,
        names: ("entity", "entities"),
        accessor: entities,
    }
    Users => "users" {
        record: User,
        new: NewUser,
        patch: UserPatch,
        names: ("user", "users"),
        accessor: users,
    }
    EntityTypes => "entity-types" {
        record: EntityType,
        new: NewEntityType,
        patch: EntityTypePatch,
        names: ("entity type", "entity types"),
        accessor: entity_types,
    }
    EntityBranches => "entity-branches" {
        record: EntityBranch,
        new: NewEntityBranch,
        patch: EntityBranchPatch,
        names: ("branch", "branches"),
        accessor: entity_branches,
    }
    Locations => "locations" {
        record: Location,
        new: NewLocation,
        patch: LocationPatch,
        names: ("location", "locations"),
        accessor: locations,
    }
    ActivityTypes => "activity-types" {
        record: ActivityType,
        new: NewActivityType,
        patch: ActivityTypePatch,
        names: ("activity type", "activity types"),
        accessor: activity_types,
    }
    EntityStatus => "entity-status" {
        record: EntityStatus,
        new: NewEntityStatus,
        patch: EntityStatusPatch,
        names: ("entity status", "entity statuses"),
        accessor: entity_statuses,
    }
    BranchHours => "branch-hours" {
        record: EntityBranchHours,
        new: NewEntityBranchHours,
        patch: EntityBranchHoursPatch,
        names: ("branch hours", "branch hours"),
        accessor: branch_hours,
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ResourceKind {
    type Err = ApiError;

    /// Accepts the path (`entity-branches`) or a dashed name (`branches`, `entity-type`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_matches('/').to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| {
                kind.path() == wanted
                    || kind.singular().replace(' ', "-") == wanted
                    || kind.plural().replace(' ', "-") == wanted
            })
            .ok_or_else(|| ApiError::UnknownResource(s.to_string()))
    }
}
