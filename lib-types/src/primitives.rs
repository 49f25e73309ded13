//! Canonical Primitive Types for Meridian Consensus
//!
//! These types are the foundational building blocks for all consensus-critical
//! data structures. They are designed to be:
//! - Fixed-size (no dynamic allocation)
//! - Deterministically serializable
//! - Efficient to copy and compare
//!
//! All monetary arithmetic is integer-only; conversions state their rounding
//! direction explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// Monetary amount in the smallest unit of an asset
pub type Amount = u64;

/// Basis points for percentage calculations (10000 = 100%)
pub type Bps = u32;

// ============================================================================
// IDENTIFIER TYPES
// ============================================================================

/// Numeric account identifier, assigned at registration.
///
/// Account names are metadata; consensus state references accounts by uid only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountUid(pub u64);

impl AccountUid {
    pub const fn new(uid: u64) -> Self {
        Self(uid)
    }
}

impl fmt::Display for AccountUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account-{}", self.0)
    }
}

/// Numeric asset identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u32);

/// The chain's native settlement asset.
///
/// Fees may be declared in any asset but are ultimately expressed in the core
/// asset after conversion through the asset's exchange pool.
pub const CORE_ASSET: AssetId = AssetId(0);

impl AssetId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the core (settlement) asset
    pub fn is_core(&self) -> bool {
        *self == CORE_ASSET
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_core() {
            write!(f, "CORE")
        } else {
            write!(f, "asset-{}", self.0)
        }
    }
}

/// Absolute identifier of a ledger object created by an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object-{}", self.0)
    }
}

/// Reference to a ledger object, possibly relative to the current transaction.
///
/// A relative reference indexes the result of an earlier operation in the
/// same transaction and resolves to an absolute [`ObjectId`] only once that
/// operation has produced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectRef {
    /// Already-resolved object identifier
    Absolute(ObjectId),
    /// Index into the results of earlier operations in this transaction
    Relative(u32),
}

// ============================================================================
// OPERATION TAG
// ============================================================================

/// Discriminant identifying an operation variant.
///
/// The dispatch registry is keyed by this tag. Discriminant values are
/// consensus protocol; never reuse or renumber them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OperationTag {
    /// Balance transfer between two accounts
    Transfer = 0,
    /// Mutation of an existing account's metadata
    AccountUpdate = 1,
    /// Core-asset deposit into an asset's fee exchange pool
    FeePoolDeposit = 2,
}

impl fmt::Display for OperationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationTag::Transfer => "transfer",
            OperationTag::AccountUpdate => "account_update",
            OperationTag::FeePoolDeposit => "fee_pool_deposit",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// ASSET AMOUNT
// ============================================================================

/// An amount denominated in a specific asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAmount {
    /// Amount in the asset's smallest unit
    pub amount: Amount,
    /// Asset the amount is denominated in
    pub asset: AssetId,
}

impl AssetAmount {
    pub const fn new(amount: Amount, asset: AssetId) -> Self {
        Self { amount, asset }
    }

    /// Amount denominated in the core asset
    pub const fn core(amount: Amount) -> Self {
        Self {
            amount,
            asset: CORE_ASSET,
        }
    }

    /// Check if the amount is denominated in the core asset
    pub fn is_core(&self) -> bool {
        self.asset.is_core()
    }
}

impl Default for AssetAmount {
    fn default() -> Self {
        Self::core(0)
    }
}

impl fmt::Display for AssetAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.asset)
    }
}

// ============================================================================
// EXCHANGE RATE
// ============================================================================

/// Error constructing an exchange rate
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateError {
    #[error("exchange rate sides must be non-zero")]
    ZeroSide,
}

/// Exchange rate between an asset and the core asset.
///
/// `asset_amount` units of the asset are worth `core_amount` units of core.
/// Conversion floors toward zero: a payer converting through the rate can
/// lose a fractional unit, never gain one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Units of the quoted asset
    pub asset_amount: Amount,
    /// Equivalent units of the core asset
    pub core_amount: Amount,
}

impl ExchangeRate {
    /// Create a rate. Both sides must be non-zero.
    pub fn new(asset_amount: Amount, core_amount: Amount) -> Result<Self, RateError> {
        if asset_amount == 0 || core_amount == 0 {
            return Err(RateError::ZeroSide);
        }
        Ok(Self {
            asset_amount,
            core_amount,
        })
    }

    /// The 1:1 rate used by the core asset itself
    pub const fn identity() -> Self {
        Self {
            asset_amount: 1,
            core_amount: 1,
        }
    }

    /// Convert an asset amount into core-asset terms, flooring toward zero.
    ///
    /// Returns `None` on arithmetic overflow or a malformed (zero-sided) rate.
    pub fn to_core(&self, amount: Amount) -> Option<Amount> {
        if self.asset_amount == 0 {
            return None;
        }
        let value = (amount as u128).checked_mul(self.core_amount as u128)? / self.asset_amount as u128;
        u64::try_from(value).ok()
    }

    /// Convert a core-asset amount into asset terms, flooring toward zero.
    pub fn from_core(&self, core_amount: Amount) -> Option<Amount> {
        if self.core_amount == 0 {
            return None;
        }
        let value =
            (core_amount as u128).checked_mul(self.asset_amount as u128)? / self.core_amount as u128;
        u64::try_from(value).ok()
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::identity()
    }
}

// ============================================================================
// TESTS
// ============================================================================
