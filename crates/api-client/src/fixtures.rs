//! Demo dataset for the in-memory backend

use crate::error::ApiResult;
use crate::resources::ResourceKind;
use crate::transport::MemoryTransport;
use serde_json::{json, Value};

const CREATED_ON: &str = "2024-01-15T09:00:00.000Z";

/// A small consistent dataset covering every collection
#[must_use]
pub fn demo_rows(kind: ResourceKind) -> Vec<Value> {
    match kind {
        ResourceKind::Locations => vec![
            json!({"id": 1, "name": "Maputo", "is_province": true, "is_capital_city": false, "is_municipality": false, "is_active": true}),
            json!({"id": 2, "parent_id": 1, "name": "Maputo Cidade", "is_province": false, "is_capital_city": true, "is_municipality": true, "is_active": true}),
            json!({"id": 3, "name": "Sofala", "is_province": true, "is_capital_city": false, "is_municipality": false, "is_active": true}),
            json!({"id": 4, "parent_id": 3, "name": "Beira", "is_province": false, "is_capital_city": false, "is_municipality": true, "is_active": true}),
        ],
        ResourceKind::EntityStatus => vec![
            json!({"id": 1, "name": "Active", "is_active": true}),
            json!({"id": 2, "name": "Suspended", "description": "Registration under review", "is_active": true}),
        ],
        ResourceKind::ActivityTypes => vec![
            json!({"id": 1, "code": "0111", "section_code": "A", "description": "Growing of cereals", "is_active": true}),
            json!({"id": 2, "code": "8899", "section_code": "Q", "description": "Other social work activities", "is_active": true}),
        ],
        ResourceKind::EntityTypes => vec![
            json!({"id": 1, "name": "Cooperative", "is_active": true}),
            json!({"id": 2, "name": "Association", "description": "Non-profit association", "is_active": true}),
        ],
        ResourceKind::Entities => vec![json!({
            "id": 1,
            "officialname": "Cooperativa Agrícola do Vale",
            "preferredname": "CAV",
            "nuit": "400123456",
            "ssnumber": "SS-1029",
            "registrationnumber": "RC-2231",
            "registrationdate": "2019-05-14",
            "entitytypeid": 1,
            "activitytypeid": 1,
            "email": "geral@cav.co.mz",
            "entitystatusid": 1,
            "isdeleted": false,
            "createdon": CREATED_ON,
            "createdby": 1
        })],
        ResourceKind::EntityBranches => vec![
            json!({"id": 1, "entityid": 1, "is_main": true, "address": "Av. 24 de Julho, 410", "locationid": 2, "openonholidays": false, "entitystatusid": 1, "is_deleted": false, "createdon": CREATED_ON, "createdby": 1}),
            json!({"id": 2, "entityid": 1, "is_main": false, "locationid": 4, "openonholidays": true, "holidaysopentime": "09:00", "holidaysclosetime": "13:00", "entitystatusid": 1, "is_deleted": false, "createdon": CREATED_ON, "createdby": 1}),
        ],
        ResourceKind::BranchHours => vec![
            json!({"id": 1, "branchid": 1, "weekday": "Segunda-feira", "opentime": "08:00", "closetime": "17:00"}),
            json!({"id": 2, "branchid": 1, "weekday": "Sábado", "opentime": "08:00", "closetime": "12:30"}),
            json!({"id": 3, "branchid": 2, "weekday": "Domingo", "opentime": "10:00"}),
        ],
        ResourceKind::Users => vec![json!({
            "id": 1,
            "email": "admin@cav.co.mz",
            "firstname": "Ana",
            "lastname": "Mussa",
            "gender": "F",
            "password": "changeme",
            "expirydate": "2030-12-31",
            "usertypeid": 1,
            "entityid": 1,
            "mfaactive": false,
            "is_active": true,
            "isdeleted": false,
            "createdon": CREATED_ON,
            "createdby": 0
        })],
    }
}

/// In-memory backend preloaded with [`demo_rows`] for every collection
pub fn demo_backend() -> ApiResult<MemoryTransport> {
    let backend = MemoryTransport::new();
    for &kind in ResourceKind::ALL {
        backend.seed(kind.path(), demo_rows(kind))?;
    }
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::AdminClient;
    use crate::lookup::BranchDirectory;
    use crate::models::Validate;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_demo_rows_decode_and_validate() {
        let client = AdminClient::with_transport(Arc::new(demo_backend().unwrap()));

        for user in client.users().get_all().await.unwrap() {
            assert!(user.into_parts().1.validate().is_valid());
        }
        for entity in client.entities().get_all().await.unwrap() {
            assert!(entity.into_parts().1.validate().is_valid());
        }
        for hours in client.branch_hours().get_all().await.unwrap() {
            assert!(hours.into_parts().1.validate().is_valid());
        }
        assert_eq!(client.locations().get_all().await.unwrap().len(), 4);
        assert_eq!(client.activity_types().get_all().await.unwrap().len(), 2);
        assert_eq!(client.entity_statuses().get_all().await.unwrap().len(), 2);
        assert_eq!(client.entity_types().get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_demo_foreign_keys_resolve() {
        let client = AdminClient::with_transport(Arc::new(demo_backend().unwrap()));
        let branches = client.entity_branches().get_all().await.unwrap();
        let entities = client.entities().get_all().await.unwrap();
        let directory = BranchDirectory::new(&branches, &entities);

        for hours in client.branch_hours().get_all().await.unwrap() {
            assert_eq!(directory.entity_label(hours.branchid), "CAV");
        }
    }
}
