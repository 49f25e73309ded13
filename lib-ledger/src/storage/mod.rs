//! Ledger Storage Layer
//!
//! This module defines the storage contract for the Meridian ledger. All
//! persistence operations MUST go through the `LedgerStore` trait.
//!
//! # Data Model Invariants
//!
//! 1. **State writes only occur inside begin_transaction → commit_transaction**
//!    - the evaluation driver opens a store transaction around each
//!    operation sequence and every mutation lands inside it.
//!
//! 2. **Rollback must restore exact pre-transaction state** - if
//!    `rollback_transaction` is called, the state MUST be identical to before
//!    `begin_transaction` was called.
//!
//! 3. **No state mutation outside evaluation** - validation and query code
//!    may only READ state.
//!
//! # Design Principles
//!
//! - Evaluation code MUST NOT know which backend is used
//! - Types are canonical - no ad-hoc types cross the storage boundary
//! - Methods take `&self`; implementations own their interior mutability

pub mod memory;

use thiserror::Error;

use lib_types::{AccountUid, Amount, AssetId};

use crate::objects::{
    AccountObject, AccountStatisticsObject, AssetDynamicData, AssetObject, FbaAccumulatorObject,
};

// Re-export the reference store implementation
pub use memory::MemoryStore;

/// Error from the storage backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("no storage transaction is active")]
    NoActiveTransaction,

    #[error("a storage transaction is already active")]
    NestedTransaction,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage contract for ledger objects and balances.
///
/// The evaluation framework borrows a `&dyn LedgerStore` for the duration of
/// one transaction's processing and never retains it past the call.
pub trait LedgerStore: Send + Sync {
    // =========================================================================
    // Object Access
    // =========================================================================

    fn account(&self, uid: AccountUid) -> StorageResult<Option<AccountObject>>;
    fn put_account(&self, account: &AccountObject) -> StorageResult<()>;

    fn account_statistics(&self, uid: AccountUid)
        -> StorageResult<Option<AccountStatisticsObject>>;
    fn put_account_statistics(&self, stats: &AccountStatisticsObject) -> StorageResult<()>;

    fn asset(&self, id: AssetId) -> StorageResult<Option<AssetObject>>;
    fn put_asset(&self, asset: &AssetObject) -> StorageResult<()>;

    fn asset_dynamic_data(&self, id: AssetId) -> StorageResult<Option<AssetDynamicData>>;
    fn put_asset_dynamic_data(&self, data: &AssetDynamicData) -> StorageResult<()>;

    fn fba_accumulator(&self, id: u64) -> StorageResult<Option<FbaAccumulatorObject>>;
    fn put_fba_accumulator(&self, accumulator: &FbaAccumulatorObject) -> StorageResult<()>;

    // =========================================================================
    // Balances
    // =========================================================================

    /// Balance of `owner` in `asset`; zero if no balance record exists
    fn balance(&self, owner: AccountUid, asset: AssetId) -> StorageResult<Amount>;

    /// Overwrite the balance record. Evaluation code never calls this
    /// directly; it goes through the mutation primitives, which check
    /// sufficiency and overflow.
    fn set_balance(&self, owner: AccountUid, asset: AssetId, amount: Amount) -> StorageResult<()>;

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Open an atomic mutation scope. Exactly one may be active at a time.
    fn begin_transaction(&self) -> StorageResult<()>;

    /// Make every mutation since `begin_transaction` durable.
    fn commit_transaction(&self) -> StorageResult<()>;

    /// Discard every mutation since `begin_transaction`.
    fn rollback_transaction(&self) -> StorageResult<()>;
}
