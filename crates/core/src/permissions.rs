//! Fine-grained permission bits and the permission mask type.
//!
//! Every capability on the platform is exactly one bit in a 64-bit mask,
//! stored as `BIGINT` in the `roles` table. Roles aggregate bits; the
//! authorization check is a pure mask-cover test ([`PermissionSet::contains`]).
//! A bit is assigned once and never reused. [`PermissionSet::REGISTRY`]
//! lists every named bit and drives the uniqueness test below.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// A set of permission bits backed by an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(i64);

impl PermissionSet {
    /// No permissions.
    pub const EMPTY: Self = Self(0);

    // Visitor: place a one-off order and pay for it.
    pub const ORDER: Self = Self(1 << 0);
    pub const PAY: Self = Self(1 << 1);

    // Customer: everything a visitor can do, plus commenting on food.
    pub const COMMENT: Self = Self(1 << 2);

    // Delivery person: bid on deliveries, choose routes, rate customers.
    pub const BID: Self = Self(1 << 3);
    pub const ROUTES: Self = Self(1 << 4);
    pub const CUSTOMER_COMMENT: Self = Self(1 << 5);

    // Cook: food quality, menu composition, dish pricing.
    pub const FOOD_QUALITY: Self = Self(1 << 6);
    pub const MENU: Self = Self(1 << 7);
    pub const PRICES: Self = Self(1 << 8);

    // Salesperson: negotiate with suppliers.
    pub const SUPPLIER: Self = Self(1 << 9);

    // Manager: sales commissions, cook payroll, staff management, complaints.
    pub const COMMISSIONS: Self = Self(1 << 10);
    pub const PAYROLL: Self = Self(1 << 11);
    pub const MANAGEMENT: Self = Self(1 << 12);
    pub const COMPLAINTS: Self = Self(1 << 13);

    /// Every named permission bit with its wire name, in declaration order.
    pub const REGISTRY: &'static [(&'static str, Self)] = &[
        ("order", Self::ORDER),
        ("pay", Self::PAY),
        ("comment", Self::COMMENT),
        ("bid", Self::BID),
        ("routes", Self::ROUTES),
        ("customer_comment", Self::CUSTOMER_COMMENT),
        ("food_quality", Self::FOOD_QUALITY),
        ("menu", Self::MENU),
        ("prices", Self::PRICES),
        ("supplier", Self::SUPPLIER),
        ("commissions", Self::COMMISSIONS),
        ("payroll", Self::PAYROLL),
        ("management", Self::MANAGEMENT),
        ("complaints", Self::COMPLAINTS),
    ];

    /// Wrap a raw bit pattern (e.g. a `BIGINT` column value).
    pub const fn from_bits(bits: i64) -> Self {
        Self(bits)
    }

    /// The raw bit pattern, as stored in the database.
    pub const fn bits(self) -> i64 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True iff this set holds *every* bit in `required`.
    pub const fn contains(self, required: Self) -> bool {
        (self.0 & required.0) == required.0
    }

    /// The union of every named permission bit.
    pub fn all() -> Self {
        let mut mask = Self::EMPTY;
        for (_, bit) in Self::REGISTRY {
            mask |= *bit;
        }
        mask
    }

    /// Wire names of the bits present in this set, in declaration order.
    pub fn names(self) -> Vec<&'static str> {
        Self::REGISTRY
            .iter()
            .filter(|(_, bit)| self.contains(*bit))
            .map(|(name, _)| *name)
            .collect()
    }
}

impl BitOr for PermissionSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PermissionSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(none)");
        }
        let mut first = true;
        for (name, bit) in Self::REGISTRY {
            if self.contains(*bit) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
