//! Well-known role names and their canonical permission grants.
//!
//! [`default_grants`] is the single source of truth that
//! `RoleRepo::populate` reconciles the `roles` table against.

use crate::permissions::PermissionSet;

pub const ROLE_VISITOR: &str = "visitor";
pub const ROLE_CUSTOMER: &str = "customer";
pub const ROLE_DELIVERY_PERSON: &str = "delivery_person";
pub const ROLE_COOK: &str = "cook";
pub const ROLE_SALESPERSON: &str = "salesperson";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_ADMIN: &str = "admin";

/// The fixed role name → permission mask table. Admin holds every bit.
pub fn default_grants() -> [(&'static str, PermissionSet); 7] {
    [
        (ROLE_VISITOR, PermissionSet::ORDER | PermissionSet::PAY),
        (
            ROLE_CUSTOMER,
            PermissionSet::ORDER | PermissionSet::PAY | PermissionSet::COMMENT,
        ),
        (
            ROLE_DELIVERY_PERSON,
            PermissionSet::BID | PermissionSet::ROUTES | PermissionSet::CUSTOMER_COMMENT,
        ),
        (
            ROLE_COOK,
            PermissionSet::FOOD_QUALITY | PermissionSet::MENU | PermissionSet::PRICES,
        ),
        (ROLE_SALESPERSON, PermissionSet::SUPPLIER),
        (
            ROLE_MANAGER,
            PermissionSet::COMMISSIONS
                | PermissionSet::PAYROLL
                | PermissionSet::MANAGEMENT
                | PermissionSet::COMPLAINTS,
        ),
        (ROLE_ADMIN, PermissionSet::all()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_a_nonempty_grant() {
        for (name, grant) in default_grants() {
            assert!(!grant.is_empty(), "{name} must grant at least one bit");
        }
    }

    #[test]
    fn admin_covers_the_union_of_all_grants() {
        let (_, admin) = default_grants()[6];
        assert_eq!(admin, PermissionSet::all());
        for (name, grant) in default_grants() {
            assert!(admin.contains(grant), "admin must cover {name}");
        }
    }

    #[test]
    fn customer_cannot_bid_on_deliveries() {
        let grants = default_grants();
        let (_, customer) = grants[1];
        assert!(customer.contains(PermissionSet::ORDER | PermissionSet::PAY));
        assert!(!customer.contains(PermissionSet::BID));
    }

    #[test]
    fn role_names_are_unique() {
        let grants = default_grants();
        for (i, (a, _)) in grants.iter().enumerate() {
            for (b, _) in &grants[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
