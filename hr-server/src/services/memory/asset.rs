//! In-memory asset adapter

use async_trait::async_trait;
use chrono::Utc;
use shared::models::{
    AssetAssignmentDto, AssetDto, AssetQuery, AssetStatus, CreateAssetAssignmentDto,
    CreateAssetDto, ReturnAssetDto, UpdateAssetDto,
};

use super::MemoryTable;
use crate::services::error::required_trimmed;
use crate::services::{AssetService, ServiceError, ServiceResult};

#[derive(Debug, Default)]
pub struct MemoryAssetService {
    assets: MemoryTable<AssetDto>,
    assignments: MemoryTable<AssetAssignmentDto>,
}

impl MemoryAssetService {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(asset: &AssetDto, query: &AssetQuery) -> bool {
        if let Some(category) = &query.category
            && !asset.category.eq_ignore_ascii_case(category)
        {
            return false;
        }
        if let Some(status) = query.status
            && asset.status != status
        {
            return false;
        }
        if let Some(search) = &query.search {
            let needle = search.to_lowercase();
            let hit = asset.name.to_lowercase().contains(&needle)
                || asset.asset_tag.to_lowercase().contains(&needle)
                || asset
                    .serial_number
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }

    fn newest_first(mut rows: Vec<AssetAssignmentDto>) -> Vec<AssetAssignmentDto> {
        rows.sort_by(|a, b| b.assigned_at.cmp(&a.assigned_at).then(b.id.cmp(&a.id)));
        rows
    }
}

#[async_trait]
impl AssetService for MemoryAssetService {
    async fn list_assets(&self, query: AssetQuery) -> ServiceResult<Vec<AssetDto>> {
        Ok(self.assets.filter(|a| Self::matches(a, &query)))
    }

    async fn get_asset(&self, id: i64) -> ServiceResult<Option<AssetDto>> {
        Ok(self.assets.get(id))
    }

    async fn create_asset(&self, dto: CreateAssetDto) -> ServiceResult<AssetDto> {
        let tag = required_trimmed(&dto.asset_tag, "assetTag", "Invalid asset data")?;
        let name = required_trimmed(&dto.name, "name", "Invalid asset data")?;
        let category = required_trimmed(&dto.category, "category", "Invalid asset data")?;
        if self
            .assets
            .find(|a| a.asset_tag.eq_ignore_ascii_case(&tag))
            .is_some()
        {
            return Err(ServiceError::conflict(format!(
                "An asset with tag '{tag}' already exists"
            )));
        }
        if dto.purchase_cost.is_some_and(|c| c.is_sign_negative()) {
            return Err(ServiceError::validation_with(
                "Invalid asset data",
                vec!["purchaseCost: must not be negative".into()],
            ));
        }

        let now = Utc::now();
        Ok(self.assets.insert_with(|id| AssetDto {
            id,
            asset_tag: tag,
            name,
            category,
            serial_number: dto.serial_number,
            status: AssetStatus::Available,
            purchase_date: dto.purchase_date,
            purchase_cost: dto.purchase_cost,
            location: dto.location,
            notes: dto.notes,
            current_employee_id: None,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn update_asset(&self, id: i64, dto: UpdateAssetDto) -> ServiceResult<Option<AssetDto>> {
        let name = dto
            .name
            .as_deref()
            .map(|n| required_trimmed(n, "name", "Invalid asset data"))
            .transpose()?;
        let category = dto
            .category
            .as_deref()
            .map(|c| required_trimmed(c, "category", "Invalid asset data"))
            .transpose()?;
        self.assets.update(id, |asset| {
            if let Some(status) = dto.status
                && status != asset.status
            {
                // Assigned is owned by assign/return
                if status == AssetStatus::Assigned || asset.status == AssetStatus::Assigned {
                    return Err(ServiceError::invalid_operation(
                        "Assignment status is managed through assignments",
                    ));
                }
                asset.status = status;
            }
            if let Some(name) = name {
                asset.name = name;
            }
            if let Some(category) = category {
                asset.category = category;
            }
            if dto.serial_number.is_some() {
                asset.serial_number = dto.serial_number;
            }
            if dto.purchase_date.is_some() {
                asset.purchase_date = dto.purchase_date;
            }
            if dto.purchase_cost.is_some() {
                asset.purchase_cost = dto.purchase_cost;
            }
            if dto.location.is_some() {
                asset.location = dto.location;
            }
            if dto.notes.is_some() {
                asset.notes = dto.notes;
            }
            asset.updated_at = Utc::now();
            Ok(asset.clone())
        })
    }

    async fn delete_asset(&self, id: i64) -> ServiceResult<bool> {
        let removed = self.assets.remove_if(id, |asset| {
            if asset.status == AssetStatus::Assigned {
                return Err(ServiceError::invalid_operation(
                    "Cannot delete an asset that is currently assigned",
                ));
            }
            Ok(())
        })?;
        Ok(removed.is_some())
    }

    async fn assign_asset(
        &self,
        dto: CreateAssetAssignmentDto,
        assigned_by: &str,
    ) -> ServiceResult<AssetAssignmentDto> {
        let employee_id = dto.employee_id;
        // Status check and claim happen under the asset's lock
        let asset = self
            .assets
            .update(dto.asset_id, |asset| {
                match asset.status {
                    AssetStatus::Retired => {
                        return Err(ServiceError::invalid_operation(
                            "Retired assets cannot be assigned",
                        ));
                    }
                    AssetStatus::UnderMaintenance => {
                        return Err(ServiceError::invalid_operation(
                            "Assets under maintenance cannot be assigned",
                        ));
                    }
                    AssetStatus::Assigned => {
                        return Err(ServiceError::conflict(format!(
                            "Asset '{}' is already assigned",
                            asset.asset_tag
                        )));
                    }
                    AssetStatus::Available => {}
                }
                asset.status = AssetStatus::Assigned;
                asset.current_employee_id = Some(employee_id);
                asset.updated_at = Utc::now();
                Ok(asset.clone())
            })?
            .ok_or_else(|| {
                ServiceError::not_found(format!("Asset with ID {} not found", dto.asset_id))
            })?;

        Ok(self.assignments.insert_with(|id| AssetAssignmentDto {
            id,
            asset_id: asset.id,
            asset_tag: asset.asset_tag,
            asset_name: asset.name,
            employee_id,
            assigned_by: assigned_by.to_string(),
            assigned_at: Utc::now(),
            expected_return_date: dto.expected_return_date,
            returned_at: None,
            condition_on_assignment: dto.condition,
            condition_on_return: None,
            notes: dto.notes,
            is_active: true,
        }))
    }

    async fn return_asset(
        &self,
        assignment_id: i64,
        dto: ReturnAssetDto,
    ) -> ServiceResult<Option<AssetAssignmentDto>> {
        let returned = self.assignments.update(assignment_id, |assignment| {
            if !assignment.is_active {
                return Err(ServiceError::invalid_operation(
                    "Asset assignment has already been returned",
                ));
            }
            assignment.is_active = false;
            assignment.returned_at = Some(Utc::now());
            assignment.condition_on_return = dto.condition;
            if dto.notes.is_some() {
                assignment.notes = dto.notes;
            }
            Ok(assignment.clone())
        })?;

        if let Some(assignment) = &returned {
            self.assets.update(assignment.asset_id, |asset| {
                if asset.status == AssetStatus::Assigned {
                    asset.status = AssetStatus::Available;
                }
                asset.current_employee_id = None;
                asset.updated_at = Utc::now();
                Ok(())
            })?;
        }

        Ok(returned)
    }

    async fn employee_assignments(&self, employee_id: i64) -> ServiceResult<Vec<AssetAssignmentDto>> {
        Ok(Self::newest_first(
            self.assignments.filter(|a| a.employee_id == employee_id),
        ))
    }

    async fn asset_history(&self, asset_id: i64) -> ServiceResult<Vec<AssetAssignmentDto>> {
        if self.assets.get(asset_id).is_none() {
            return Err(ServiceError::not_found(format!(
                "Asset with ID {asset_id} not found"
            )));
        }
        Ok(Self::newest_first(
            self.assignments.filter(|a| a.asset_id == asset_id),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop(tag: &str) -> CreateAssetDto {
        CreateAssetDto {
            asset_tag: tag.to_string(),
            name: "ThinkPad X1".to_string(),
            category: "Laptop".to_string(),
            serial_number: Some("SN-001".to_string()),
            purchase_date: None,
            purchase_cost: None,
            location: None,
            notes: None,
        }
    }

    fn assignment(asset_id: i64, employee_id: i64) -> CreateAssetAssignmentDto {
        CreateAssetAssignmentDto {
            asset_id,
            employee_id,
            expected_return_date: None,
            condition: Some("Good".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_tag_conflicts() {
        let service = MemoryAssetService::new();
        service.create_asset(laptop("LT-1")).await.unwrap();
        let err = service.create_asset(laptop("lt-1")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_blank_tag_rejected() {
        let service = MemoryAssetService::new();
        let err = service.create_asset(laptop("   ")).await.unwrap_err();
        match err {
            ServiceError::Validation { errors, .. } => {
                assert_eq!(errors, vec!["assetTag: must not be blank".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(service.list_assets(AssetQuery::default()).await.unwrap().is_empty());

        let asset = service.create_asset(laptop("  LT-9 ")).await.unwrap();
        assert_eq!(asset.asset_tag, "LT-9");
    }

    #[tokio::test]
    async fn test_second_assignment_conflicts() {
        let service = MemoryAssetService::new();
        let asset = service.create_asset(laptop("LT-1")).await.unwrap();

        let first = service.assign_asset(assignment(asset.id, 7), "admin").await.unwrap();
        assert!(first.is_active);
        assert_eq!(first.asset_tag, "LT-1");

        let err = service
            .assign_asset(assignment(asset.id, 8), "admin")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let stored = service.get_asset(asset.id).await.unwrap().unwrap();
        assert_eq!(stored.current_employee_id, Some(7));
        assert_eq!(stored.status, AssetStatus::Assigned);
    }

    #[tokio::test]
    async fn test_retired_asset_cannot_be_assigned() {
        let service = MemoryAssetService::new();
        let asset = service.create_asset(laptop("LT-1")).await.unwrap();
        service
            .update_asset(
                asset.id,
                UpdateAssetDto {
                    status: Some(AssetStatus::Retired),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let err = service
            .assign_asset(assignment(asset.id, 7), "admin")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOperation(_)));
    }

    #[tokio::test]
    async fn test_return_frees_asset_and_closes_assignment() {
        let service = MemoryAssetService::new();
        let asset = service.create_asset(laptop("LT-1")).await.unwrap();
        let assigned = service.assign_asset(assignment(asset.id, 7), "admin").await.unwrap();

        let returned = service
            .return_asset(
                assigned.id,
                ReturnAssetDto {
                    condition: Some("Scratched".into()),
                    notes: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(!returned.is_active);
        assert!(returned.returned_at.is_some());
        assert_eq!(returned.condition_on_return.as_deref(), Some("Scratched"));

        let stored = service.get_asset(asset.id).await.unwrap().unwrap();
        assert_eq!(stored.status, AssetStatus::Available);
        assert_eq!(stored.current_employee_id, None);

        // Returning twice is rejected
        let err = service
            .return_asset(assigned.id, ReturnAssetDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOperation(_)));

        // Asset can be handed out again
        service.assign_asset(assignment(asset.id, 9), "admin").await.unwrap();
        let history = service.asset_history(asset.id).await.unwrap();
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_assigned_asset_cannot_be_deleted() {
        let service = MemoryAssetService::new();
        let asset = service.create_asset(laptop("LT-1")).await.unwrap();
        service.assign_asset(assignment(asset.id, 7), "admin").await.unwrap();

        let err = service.delete_asset(asset.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOperation(_)));
        assert!(!service.delete_asset(999).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filters() {
        let service = MemoryAssetService::new();
        service.create_asset(laptop("LT-1")).await.unwrap();
        let mut phone = laptop("PH-1");
        phone.name = "Pixel 9".into();
        phone.category = "Phone".into();
        phone.serial_number = None;
        service.create_asset(phone).await.unwrap();

        let phones = service
            .list_assets(AssetQuery {
                category: Some("phone".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(phones.len(), 1);

        let search = service
            .list_assets(AssetQuery {
                search: Some("sn-0".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(search.len(), 1);
        assert_eq!(search[0].asset_tag, "LT-1");
    }

    #[tokio::test]
    async fn test_unknown_asset_history_is_not_found() {
        let service = MemoryAssetService::new();
        let err = service.asset_history(3).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
