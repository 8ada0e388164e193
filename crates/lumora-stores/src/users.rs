// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin user management store.
//!
//! Narrow mutations (status, role) are patched locally; deletions are
//! applied locally with cursor recomputation, stepping back a page and
//! refetching only when the current page would end up empty. Role changes
//! keep the original value and roll back if the request fails.

use lumora_client::ApiClient;
use lumora_core::types::{UserId, UserProfile, UserRole, UserStatus};
use lumora_core::{LumoraError, Page, PageResponse};
use tracing::debug;

/// Filters applied to the admin user list.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub search: Option<String>,
    pub status: Option<UserStatus>,
    pub role: Option<UserRole>,
    pub sort_by: Option<String>,
}

/// Payload for creating a user from the admin dashboard.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Bulk mutation applied to a set of users.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchUserOperation {
    SetStatus(UserStatus),
    SetRole(UserRole),
    Delete,
}

impl BatchUserOperation {
    fn wire_name(&self) -> &'static str {
        match self {
            BatchUserOperation::SetStatus(_) => "status",
            BatchUserOperation::SetRole(_) => "role",
            BatchUserOperation::Delete => "delete",
        }
    }

    fn wire_value(&self) -> Option<String> {
        match self {
            BatchUserOperation::SetStatus(status) => Some(status.to_string()),
            BatchUserOperation::SetRole(role) => Some(role.to_string()),
            BatchUserOperation::Delete => None,
        }
    }
}

/// Paginated admin user list.
pub struct UserAdminStore {
    client: ApiClient,
    users: Vec<UserProfile>,
    page: Page,
    query: UserQuery,
    /// Id of the signed-in admin; their own role cannot be changed here.
    self_id: Option<UserId>,
    loading: bool,
    error: Option<String>,
}

impl UserAdminStore {
    pub fn new(client: ApiClient, self_id: Option<UserId>) -> Self {
        Self {
            client,
            users: Vec::new(),
            page: Page::default(),
            query: UserQuery::default(),
            self_id,
            loading: false,
            error: None,
        }
    }

    pub fn users(&self) -> &[UserProfile] {
        &self.users
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_query(&mut self, query: UserQuery) {
        self.query = query;
    }

    /// Fetches one page with the current filters. Stale-but-present on
    /// failure.
    pub async fn fetch(&mut self, page: u32, page_size: u32) -> Result<(), LumoraError> {
        self.loading = true;
        self.error = None;

        let mut query = vec![
            ("page", page.to_string()),
            ("size", page_size.to_string()),
        ];
        if let Some(search) = &self.query.search {
            query.push(("search", search.clone()));
        }
        if let Some(status) = self.query.status {
            query.push(("status", status.to_string()));
        }
        if let Some(role) = self.query.role {
            query.push(("role", role.to_string()));
        }
        if let Some(sort_by) = &self.query.sort_by {
            query.push(("sortBy", sort_by.clone()));
        }

        let result = self
            .client
            .get_json::<PageResponse<UserProfile>>("/api/admin/users", &query)
            .await;
        self.loading = false;

        match result {
            Ok(response) => {
                self.page = response.page();
                self.users = response.list;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Creates a user, then refetches the first page.
    pub async fn create(&mut self, user: &NewUser) -> Result<(), LumoraError> {
        self.loading = true;
        let result = self.client.post_unit("/api/admin/users", user).await;
        self.loading = false;
        result.map_err(|e| self.fail(e))?;
        self.fetch(1, self.page.page_size).await
    }

    /// Deletes users and removes them locally. When the page empties and
    /// is not the first, steps back one page and refetches.
    pub async fn delete_users(&mut self, user_ids: &[UserId]) -> Result<(), LumoraError> {
        if user_ids.is_empty() {
            return Ok(());
        }
        let body = serde_json::json!({
            "operationType": "delete",
            "targetIds": user_ids,
        });
        self.client
            .post_unit("/api/admin/users/batch-operations", &body)
            .await
            .map_err(|e| self.fail(e))?;

        let before = self.users.len();
        self.users.retain(|u| !user_ids.contains(&u.user_id));
        let removed = (before - self.users.len()) as u64;
        self.page.remove(removed);
        debug!(removed, total = self.page.total, "users removed locally");

        if self.users.is_empty() && self.page.page > 1 {
            self.page.page -= 1;
            let (page, page_size) = (self.page.page, self.page.page_size);
            self.fetch(page, page_size).await?;
        }
        Ok(())
    }

    /// Narrow mutation: PATCH, then patch the local copy.
    pub async fn update_status(
        &mut self,
        user_id: UserId,
        status: UserStatus,
    ) -> Result<(), LumoraError> {
        self.client
            .patch_query(
                &format!("/api/admin/users/{}/status", user_id.0),
                &[("status", status.to_string())],
            )
            .await
            .map_err(|e| self.fail(e))?;

        if let Some(user) = self.users.iter_mut().find(|u| u.user_id == user_id) {
            user.status = status;
        }
        Ok(())
    }

    /// Role change with local rollback. Refuses to touch the signed-in
    /// admin's own role.
    pub async fn update_role(
        &mut self,
        user_id: UserId,
        new_role: UserRole,
    ) -> Result<(), LumoraError> {
        if self.self_id == Some(user_id) {
            let err = LumoraError::Validation {
                message: "cannot change the role of the signed-in user".into(),
                field_errors: vec![],
            };
            return Err(self.fail(err));
        }
        let Some(position) = self.users.iter().position(|u| u.user_id == user_id) else {
            let err = LumoraError::Validation {
                message: "user not found".into(),
                field_errors: vec![],
            };
            return Err(self.fail(err));
        };

        let original = self.users[position].role;
        self.users[position].role = new_role;

        let result = self
            .client
            .patch_query(
                &format!("/api/admin/users/{}/role", user_id.0),
                &[("role", new_role.to_string())],
            )
            .await;

        if let Err(e) = result {
            self.users[position].role = original;
            return Err(self.fail(e));
        }
        Ok(())
    }

    /// Applies one bulk operation server-side, then mirrors it locally.
    pub async fn batch_operation(
        &mut self,
        user_ids: &[UserId],
        operation: BatchUserOperation,
    ) -> Result<(), LumoraError> {
        if user_ids.is_empty() {
            return Ok(());
        }
        let body = serde_json::json!({
            "operationType": operation.wire_name(),
            "targetIds": user_ids,
            "newValue": operation.wire_value(),
        });
        self.client
            .post_unit("/api/admin/users/batch-operations", &body)
            .await
            .map_err(|e| self.fail(e))?;

        match operation {
            BatchUserOperation::SetStatus(status) => {
                for user in self.users.iter_mut().filter(|u| user_ids.contains(&u.user_id)) {
                    user.status = status;
                }
            }
            BatchUserOperation::SetRole(role) => {
                for user in self.users.iter_mut().filter(|u| user_ids.contains(&u.user_id)) {
                    user.role = role;
                }
            }
            BatchUserOperation::Delete => {
                let before = self.users.len();
                self.users.retain(|u| !user_ids.contains(&u.user_id));
                self.page.remove((before - self.users.len()) as u64);
            }
        }
        Ok(())
    }

    /// Exports the filtered user list as raw bytes (spreadsheet).
    pub async fn export(&mut self) -> Result<Vec<u8>, LumoraError> {
        let mut query = Vec::new();
        if let Some(search) = &self.query.search {
            query.push(("search", search.clone()));
        }
        if let Some(status) = self.query.status {
            query.push(("status", status.to_string()));
        }
        if let Some(role) = self.query.role {
            query.push(("role", role.to_string()));
        }
        self.client
            .get_bytes("/api/admin/users/export", &query)
            .await
            .map_err(|e| self.fail(e))
    }

    fn fail(&mut self, err: LumoraError) -> LumoraError {
        self.error = Some(err.user_message());
        err
    }
}
