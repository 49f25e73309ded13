//! In-Memory Reference Store
//!
//! `RwLock`-guarded maps with clone-snapshot transaction support. This is the
//! reference `LedgerStore` implementation used by tests and by embedders that
//! have not brought their own backend; it is not a persistence layer.

use std::collections::HashMap;
use std::sync::RwLock;

use lib_types::{AccountUid, Amount, AssetId};

use crate::objects::{
    AccountObject, AccountStatisticsObject, AssetDynamicData, AssetObject, FbaAccumulatorObject,
};

use super::{LedgerStore, StorageError, StorageResult};

/// All ledger state, cloneable as one snapshot
#[derive(Debug, Clone, Default)]
struct LedgerData {
    accounts: HashMap<AccountUid, AccountObject>,
    statistics: HashMap<AccountUid, AccountStatisticsObject>,
    assets: HashMap<AssetId, AssetObject>,
    dynamic_data: HashMap<AssetId, AssetDynamicData>,
    balances: HashMap<(AccountUid, AssetId), Amount>,
    fba_accumulators: HashMap<u64, FbaAccumulatorObject>,
}

#[derive(Debug, Default)]
struct State {
    live: LedgerData,
    /// Copy of `live` taken at begin_transaction; present iff a transaction
    /// is active
    snapshot: Option<LedgerData>,
}

/// In-memory ledger store
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&LedgerData) -> T) -> StorageResult<T> {
        let state = self
            .state
            .read()
            .map_err(|_| StorageError::Backend("lock poisoned".to_string()))?;
        Ok(f(&state.live))
    }

    fn write<T>(&self, f: impl FnOnce(&mut State) -> StorageResult<T>) -> StorageResult<T> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::Backend("lock poisoned".to_string()))?;
        f(&mut state)
    }
}

impl LedgerStore for MemoryStore {
    fn account(&self, uid: AccountUid) -> StorageResult<Option<AccountObject>> {
        self.read(|data| data.accounts.get(&uid).cloned())
    }

    fn put_account(&self, account: &AccountObject) -> StorageResult<()> {
        self.write(|state| {
            state.live.accounts.insert(account.uid, account.clone());
            Ok(())
        })
    }

    fn account_statistics(
        &self,
        uid: AccountUid,
    ) -> StorageResult<Option<AccountStatisticsObject>> {
        self.read(|data| data.statistics.get(&uid).cloned())
    }

    fn put_account_statistics(&self, stats: &AccountStatisticsObject) -> StorageResult<()> {
        self.write(|state| {
            state.live.statistics.insert(stats.owner, stats.clone());
            Ok(())
        })
    }

    fn asset(&self, id: AssetId) -> StorageResult<Option<AssetObject>> {
        self.read(|data| data.assets.get(&id).cloned())
    }

    fn put_asset(&self, asset: &AssetObject) -> StorageResult<()> {
        self.write(|state| {
            state.live.assets.insert(asset.id, asset.clone());
            Ok(())
        })
    }

    fn asset_dynamic_data(&self, id: AssetId) -> StorageResult<Option<AssetDynamicData>> {
        self.read(|data| data.dynamic_data.get(&id).cloned())
    }

    fn put_asset_dynamic_data(&self, data: &AssetDynamicData) -> StorageResult<()> {
        self.write(|state| {
            state.live.dynamic_data.insert(data.asset, data.clone());
            Ok(())
        })
    }

    fn fba_accumulator(&self, id: u64) -> StorageResult<Option<FbaAccumulatorObject>> {
        self.read(|data| data.fba_accumulators.get(&id).cloned())
    }

    fn put_fba_accumulator(&self, accumulator: &FbaAccumulatorObject) -> StorageResult<()> {
        self.write(|state| {
            state
                .live
                .fba_accumulators
                .insert(accumulator.id, accumulator.clone());
            Ok(())
        })
    }

    fn balance(&self, owner: AccountUid, asset: AssetId) -> StorageResult<Amount> {
        self.read(|data| data.balances.get(&(owner, asset)).copied().unwrap_or(0))
    }

    fn set_balance(&self, owner: AccountUid, asset: AssetId, amount: Amount) -> StorageResult<()> {
        self.write(|state| {
            if amount == 0 {
                state.live.balances.remove(&(owner, asset));
            } else {
                state.live.balances.insert((owner, asset), amount);
            }
            Ok(())
        })
    }

    fn begin_transaction(&self) -> StorageResult<()> {
        self.write(|state| {
            if state.snapshot.is_some() {
                return Err(StorageError::NestedTransaction);
            }
            state.snapshot = Some(state.live.clone());
            Ok(())
        })
    }

    fn commit_transaction(&self) -> StorageResult<()> {
        self.write(|state| {
            if state.snapshot.take().is_none() {
                return Err(StorageError::NoActiveTransaction);
            }
            Ok(())
        })
    }

    fn rollback_transaction(&self) -> StorageResult<()> {
        self.write(|state| {
            let snapshot = state
                .snapshot
                .take()
                .ok_or(StorageError::NoActiveTransaction)?;
            state.live = snapshot;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_types::CORE_ASSET;

    #[test]
    fn test_balance_defaults_to_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.balance(AccountUid(1), CORE_ASSET).unwrap(), 0);
    }

    #[test]
    fn test_put_and_get_account() {
        let store = MemoryStore::new();
        let account = AccountObject::new(AccountUid(1), "alice", [1u8; 32]);
        store.put_account(&account).unwrap();
        assert_eq!(store.account(AccountUid(1)).unwrap(), Some(account));
        assert_eq!(store.account(AccountUid(2)).unwrap(), None);
    }

    #[test]
    fn test_rollback_restores_exact_state() {
        let store = MemoryStore::new();
        store.set_balance(AccountUid(1), CORE_ASSET, 100).unwrap();

        store.begin_transaction().unwrap();
        store.set_balance(AccountUid(1), CORE_ASSET, 40).unwrap();
        store
            .put_account(&AccountObject::new(AccountUid(2), "bob", [0u8; 32]))
            .unwrap();
        store.rollback_transaction().unwrap();

        assert_eq!(store.balance(AccountUid(1), CORE_ASSET).unwrap(), 100);
        assert_eq!(store.account(AccountUid(2)).unwrap(), None);
    }

    #[test]
    fn test_commit_keeps_mutations() {
        let store = MemoryStore::new();
        store.begin_transaction().unwrap();
        store.set_balance(AccountUid(1), CORE_ASSET, 100).unwrap();
        store.commit_transaction().unwrap();
        assert_eq!(store.balance(AccountUid(1), CORE_ASSET).unwrap(), 100);
    }

    #[test]
    fn test_nested_transaction_is_rejected() {
        let store = MemoryStore::new();
        store.begin_transaction().unwrap();
        assert_eq!(
            store.begin_transaction(),
            Err(StorageError::NestedTransaction)
        );
    }

    #[test]
    fn test_commit_without_begin_is_rejected() {
        let store = MemoryStore::new();
        assert_eq!(
            store.commit_transaction(),
            Err(StorageError::NoActiveTransaction)
        );
        assert_eq!(
            store.rollback_transaction(),
            Err(StorageError::NoActiveTransaction)
        );
    }
}
