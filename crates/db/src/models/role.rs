//! Role entity model.

use forkline_core::permissions::PermissionSet;
use forkline_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A role row from the `roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    /// OR of the granted permission bits, stored as `BIGINT`.
    pub permissions: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Role {
    /// The granted permissions as a typed mask.
    pub fn permission_set(&self) -> PermissionSet {
        PermissionSet::from_bits(self.permissions)
    }

    /// True iff this role holds *every* bit in `required`.
    pub fn can(&self, required: PermissionSet) -> bool {
        self.permission_set().contains(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn role_with(mask: PermissionSet) -> Role {
        Role {
            id: 1,
            name: "test".to_string(),
            permissions: mask.bits(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn can_requires_full_mask_coverage() {
        let role = role_with(PermissionSet::ORDER | PermissionSet::PAY);
        assert!(role.can(PermissionSet::ORDER));
        assert!(role.can(PermissionSet::ORDER | PermissionSet::PAY));
        assert!(!role.can(PermissionSet::ORDER | PermissionSet::BID));
    }

    #[test]
    fn empty_role_allows_nothing_named() {
        let role = role_with(PermissionSet::EMPTY);
        for (_, bit) in PermissionSet::REGISTRY {
            assert!(!role.can(*bit));
        }
    }
}
