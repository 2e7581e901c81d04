//! In-memory roles and user-role assignments

use std::collections::BTreeSet;

use async_trait::async_trait;
use dashmap::DashMap;
use shared::models::{AssignRoleDto, CreateRoleDto, RoleDto, UpdateRoleDto, UserRolesDto};

use super::MemoryTable;
use crate::auth::permissions::default_permissions;
use crate::services::error::required_trimmed;
use crate::services::{RoleService, ServiceError, ServiceResult};

/// Roles present on every fresh install
pub const SYSTEM_ROLES: [(&str, &str); 3] = [
    ("Admin", "Full access to every module"),
    ("Manager", "Day-to-day approvals and team management"),
    ("Employee", "Self-service access"),
];

#[derive(Debug)]
pub struct MemoryRoleService {
    roles: MemoryTable<RoleDto>,
    /// user id -> role ids
    assignments: DashMap<String, BTreeSet<i64>>,
}

impl Default for MemoryRoleService {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_permissions(permissions: Vec<String>) -> Vec<String> {
    permissions
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl MemoryRoleService {
    pub fn new() -> Self {
        let roles = MemoryTable::new();
        for (name, description) in SYSTEM_ROLES {
            roles.insert_with(|id| RoleDto {
                id,
                name: name.to_string(),
                description: Some(description.to_string()),
                permissions: default_permissions(name),
                is_system: true,
                user_count: 0,
            });
        }
        Self {
            roles,
            assignments: DashMap::new(),
        }
    }

    fn user_count(&self, role_id: i64) -> usize {
        self.assignments
            .iter()
            .filter(|entry| entry.value().contains(&role_id))
            .count()
    }

    fn with_count(&self, mut role: RoleDto) -> RoleDto {
        role.user_count = self.user_count(role.id);
        role
    }

    fn check_name_unique(&self, name: &str, except: Option<i64>) -> ServiceResult<()> {
        let taken = self
            .roles
            .find(|r| Some(r.id) != except && r.name.eq_ignore_ascii_case(name))
            .is_some();
        if taken {
            return Err(ServiceError::conflict(format!(
                "A role named '{name}' already exists"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RoleService for MemoryRoleService {
    async fn list_roles(&self) -> ServiceResult<Vec<RoleDto>> {
        Ok(self
            .roles
            .values()
            .into_iter()
            .map(|r| self.with_count(r))
            .collect())
    }

    async fn get_role(&self, id: i64) -> ServiceResult<Option<RoleDto>> {
        Ok(self.roles.get(id).map(|r| self.with_count(r)))
    }

    async fn find_role_by_name(&self, name: &str) -> ServiceResult<Option<RoleDto>> {
        Ok(self
            .roles
            .find(|r| r.name.eq_ignore_ascii_case(name.trim()))
            .map(|r| self.with_count(r)))
    }

    async fn create_role(&self, dto: CreateRoleDto) -> ServiceResult<RoleDto> {
        let name = required_trimmed(&dto.name, "name", "Invalid role data")?;
        self.check_name_unique(&name, None)?;
        Ok(self.roles.insert_with(|id| RoleDto {
            id,
            name,
            description: dto.description,
            permissions: normalize_permissions(dto.permissions),
            is_system: false,
            user_count: 0,
        }))
    }

    async fn update_role(&self, id: i64, dto: UpdateRoleDto) -> ServiceResult<Option<RoleDto>> {
        let name = dto
            .name
            .as_deref()
            .map(|n| required_trimmed(n, "name", "Invalid role data"))
            .transpose()?;
        if let Some(name) = &name {
            self.check_name_unique(name, Some(id))?;
        }
        let updated = self.roles.update(id, |role| {
            if role.is_system {
                return Err(ServiceError::invalid_operation(format!(
                    "System role '{}' cannot be modified",
                    role.name
                )));
            }
            if let Some(name) = name {
                role.name = name;
            }
            if let Some(description) = dto.description {
                role.description = Some(description);
            }
            if let Some(permissions) = dto.permissions {
                role.permissions = normalize_permissions(permissions);
            }
            Ok(role.clone())
        })?;
        Ok(updated.map(|r| self.with_count(r)))
    }

    async fn delete_role(&self, id: i64) -> ServiceResult<bool> {
        let in_use = self.user_count(id);
        let removed = self.roles.remove_if(id, |role| {
            if role.is_system {
                return Err(ServiceError::invalid_operation(format!(
                    "System role '{}' cannot be deleted",
                    role.name
                )));
            }
            if in_use > 0 {
                return Err(ServiceError::conflict(format!(
                    "Role '{}' is assigned to {in_use} user(s)",
                    role.name
                )));
            }
            Ok(())
        })?;
        Ok(removed.is_some())
    }

    async fn assign_role(&self, dto: AssignRoleDto) -> ServiceResult<UserRolesDto> {
        if self.roles.get(dto.role_id).is_none() {
            return Err(ServiceError::not_found(format!(
                "Role with ID {} not found",
                dto.role_id
            )));
        }
        let user_id = dto.user_id.trim().to_string();
        self.assignments
            .entry(user_id.clone())
            .or_default()
            .insert(dto.role_id);
        tracing::debug!(user_id = %user_id, role_id = dto.role_id, "Role assigned");
        self.user_roles(&user_id).await
    }

    async fn user_roles(&self, user_id: &str) -> ServiceResult<UserRolesDto> {
        let role_ids: Vec<i64> = self
            .assignments
            .get(user_id)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default();

        // Roles deleted after assignment are skipped
        let roles: Vec<RoleDto> = role_ids
            .into_iter()
            .filter_map(|id| self.roles.get(id))
            .map(|r| self.with_count(r))
            .collect();
        let permissions = roles
            .iter()
            .flat_map(|r| r.permissions.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Ok(UserRolesDto {
            user_id: user_id.to_string(),
            roles,
            permissions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto(name: &str, permissions: &[&str]) -> CreateRoleDto {
        CreateRoleDto {
            name: name.into(),
            description: None,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_seeded_system_roles() {
        let svc = MemoryRoleService::new();
        let roles = svc.list_roles().await.unwrap();
        let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Admin", "Manager", "Employee"]);
        assert!(roles.iter().all(|r| r.is_system));

        let admin = svc.find_role_by_name("admin").await.unwrap().unwrap();
        assert_eq!(admin.permissions, vec!["all"]);
    }

    #[tokio::test]
    async fn test_create_duplicate_name_conflicts() {
        let svc = MemoryRoleService::new();
        let err = svc.create_role(create_dto("manager", &[])).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let svc = MemoryRoleService::new();
        let err = svc.create_role(create_dto(" \t ", &[])).await.unwrap_err();
        assert!(
            matches!(&err, ServiceError::Validation { errors, .. } if errors == &["name: must not be blank"])
        );

        let role = svc.create_role(create_dto("Auditor", &[])).await.unwrap();
        let err = svc
            .update_role(
                role.id,
                UpdateRoleDto {
                    name: Some("   ".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
        let stored = svc.get_role(role.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Auditor");
    }

    #[tokio::test]
    async fn test_system_roles_are_immutable() {
        let svc = MemoryRoleService::new();
        let err = svc
            .update_role(
                1,
                UpdateRoleDto {
                    description: Some("hijacked".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOperation(_)));

        let err = svc.delete_role(1).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOperation(_)));
    }

    #[tokio::test]
    async fn test_role_in_use_cannot_be_deleted() {
        let svc = MemoryRoleService::new();
        let auditor = svc
            .create_role(create_dto("Auditor", &["reports:view", "reports:view", "expenses:read_all"]))
            .await
            .unwrap();
        assert_eq!(auditor.permissions, vec!["expenses:read_all", "reports:view"]);

        svc.assign_role(AssignRoleDto {
            user_id: "user-7".into(),
            role_id: auditor.id,
        })
        .await
        .unwrap();
        assert_eq!(svc.get_role(auditor.id).await.unwrap().unwrap().user_count, 1);

        let err = svc.delete_role(auditor.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_user_permissions_are_union_of_roles() {
        let svc = MemoryRoleService::new();
        let custom = svc
            .create_role(create_dto("Mailer", &["email:manage"]))
            .await
            .unwrap();
        for role_id in [3, custom.id, 3] {
            svc.assign_role(AssignRoleDto {
                user_id: "user-2".into(),
                role_id,
            })
            .await
            .unwrap();
        }
        let user = svc.user_roles("user-2").await.unwrap();
        assert_eq!(user.roles.len(), 2);
        assert_eq!(user.permissions, vec!["email:manage", "shifts:read"]);

        let nobody = svc.user_roles("user-99").await.unwrap();
        assert!(nobody.roles.is_empty());
        assert!(nobody.permissions.is_empty());
    }

    #[tokio::test]
    async fn test_assign_unknown_role() {
        let svc = MemoryRoleService::new();
        let err = svc
            .assign_role(AssignRoleDto {
                user_id: "user-1".into(),
                role_id: 99,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
