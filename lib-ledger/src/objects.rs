//! Ledger Object Model
//!
//! The object kinds the evaluation framework reads and mutates: accounts,
//! their fee statistics, assets, per-asset dynamic data (supply and fee
//! exchange pool) and the flexible fee-pool accumulators.
//!
//! All objects are plain serde values; the storage layer owns persistence and
//! the evaluation layer owns every mutation path.

use serde::{Deserialize, Serialize};
use std::fmt;

use lib_types::{AccountUid, Amount, AssetId, ExchangeRate};

/// A registered account.
///
/// Consensus references accounts by uid; the name is display metadata and the
/// memo key is an opaque 32-byte public key used off-chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountObject {
    pub uid: AccountUid,
    pub name: String,
    pub memo_key: [u8; 32],
}

impl AccountObject {
    pub fn new(uid: AccountUid, name: impl Into<String>, memo_key: [u8; 32]) -> Self {
        Self {
            uid,
            name: name.into(),
            memo_key,
        }
    }

    /// Hex encoding of the memo key for display and logging
    pub fn memo_key_hex(&self) -> String {
        hex::encode(self.memo_key)
    }
}

impl fmt::Display for AccountObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.uid, self.name)
    }
}

/// Per-account fee statistics.
///
/// Holds the two fee credits an account may draw on (prepaid and
/// accumulated-stake) and the pending buckets that paid fees are routed into
/// until the next maintenance distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatisticsObject {
    pub owner: AccountUid,
    /// Pre-funded credit usable only for fees, in core-asset units
    pub prepaid_fees: Amount,
    /// Accumulated-stake fee credit, in core-asset units
    pub csaf: Amount,
    /// Paid fees awaiting distribution, immediately spendable share
    pub pending_fees: Amount,
    /// Paid fees awaiting distribution, vested share
    pub pending_vested_fees: Amount,
    /// Lifetime total of core-asset fees this account has paid
    pub total_core_fees_paid: Amount,
}

impl AccountStatisticsObject {
    pub fn new(owner: AccountUid) -> Self {
        Self {
            owner,
            prepaid_fees: 0,
            csaf: 0,
            pending_fees: 0,
            pending_vested_fees: 0,
            total_core_fees_paid: 0,
        }
    }

    pub fn with_prepaid_fees(mut self, prepaid_fees: Amount) -> Self {
        self.prepaid_fees = prepaid_fees;
        self
    }

    pub fn with_csaf(mut self, csaf: Amount) -> Self {
        self.csaf = csaf;
        self
    }
}

/// A registered asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetObject {
    pub id: AssetId,
    pub symbol: String,
    /// Decimal places of the smallest unit
    pub precision: u8,
    /// Rate used to convert fees declared in this asset into core
    pub core_exchange_rate: ExchangeRate,
}

impl AssetObject {
    pub fn new(
        id: AssetId,
        symbol: impl Into<String>,
        precision: u8,
        core_exchange_rate: ExchangeRate,
    ) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            precision,
            core_exchange_rate,
        }
    }

    /// The core asset itself; always at the identity rate
    pub fn core_asset(symbol: impl Into<String>, precision: u8) -> Self {
        Self::new(
            lib_types::CORE_ASSET,
            symbol,
            precision,
            ExchangeRate::identity(),
        )
    }
}

/// Mutable per-asset data: circulating supply and the fee exchange pool.
///
/// `fee_pool` is the core-asset reserve that backs fee conversion;
/// `accumulated_fees` collects the paid-in units of the asset itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDynamicData {
    pub asset: AssetId,
    pub current_supply: Amount,
    pub fee_pool: Amount,
    pub accumulated_fees: Amount,
}

impl AssetDynamicData {
    pub fn new(asset: AssetId) -> Self {
        Self {
            asset,
            current_supply: 0,
            fee_pool: 0,
            accumulated_fees: 0,
        }
    }

    pub fn with_fee_pool(mut self, fee_pool: Amount) -> Self {
        self.fee_pool = fee_pool;
        self
    }

    pub fn with_current_supply(mut self, current_supply: Amount) -> Self {
        self.current_supply = current_supply;
        self
    }
}

/// Flexible fee-pool accumulator.
///
/// Operations whose fee is burned or pooled rather than routed to an account
/// statistics record credit one of these instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FbaAccumulatorObject {
    pub id: u64,
    pub accumulated_fba_fees: Amount,
}

impl FbaAccumulatorObject {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            accumulated_fba_fees: 0,
        }
    }
}
