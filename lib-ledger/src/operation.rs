//! Operation Model
//!
//! The closed set of state-change instructions a transaction may carry. Each
//! variant is an immutable payload struct carrying its own fee declaration
//! and naming the account responsible for paying it.
//!
//! Context-free validation (`validate`) covers everything checkable without
//! ledger state. It runs upstream of dispatch; evaluators assume it has
//! already passed and do not repeat these checks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lib_types::{AccountUid, Amount, AssetAmount, AssetId, OperationTag};

/// Context-free operation validation failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OperationValidationError {
    #[error("fee credit portions exceed the declared total")]
    CreditExceedsTotal,

    #[error("fee credit portions require a core-denominated fee")]
    CreditOnNonCoreFee,

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("transfer sender and recipient must differ")]
    SelfTransfer,

    #[error("account update must change at least one field")]
    EmptyUpdate,

    #[error("account name must be non-empty")]
    EmptyName,
}

// =============================================================================
// FEE DECLARATION
// =============================================================================

/// Declared fee for one operation.
///
/// The transaction author declares how the fee is sourced: `from_prepaid` and
/// `from_csaf` name the portions covered by the payer's prepaid and
/// accumulated-stake credits; the remainder comes from the payer's balance.
/// Credits are core-denominated, so a fee declared in a non-core asset is
/// paid entirely from balance in that asset and converted through the asset's
/// exchange pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    /// Total fee supplied, in the declared asset
    pub total: AssetAmount,
    /// Portion covered by the payer's prepaid fee credit
    pub from_prepaid: Amount,
    /// Portion covered by the payer's accumulated-stake credit
    pub from_csaf: Amount,
}

impl Fee {
    /// Fee paid entirely from balance
    pub const fn from_balance(total: AssetAmount) -> Self {
        Self {
            total,
            from_prepaid: 0,
            from_csaf: 0,
        }
    }

    /// Core-denominated fee paid entirely from balance
    pub const fn core(amount: Amount) -> Self {
        Self::from_balance(AssetAmount::core(amount))
    }

    pub fn with_prepaid(mut self, from_prepaid: Amount) -> Self {
        self.from_prepaid = from_prepaid;
        self
    }

    pub fn with_csaf(mut self, from_csaf: Amount) -> Self {
        self.from_csaf = from_csaf;
        self
    }

    /// Context-free validity of the declared split
    pub fn validate(&self) -> Result<(), OperationValidationError> {
        let credits = self
            .from_prepaid
            .checked_add(self.from_csaf)
            .ok_or(OperationValidationError::CreditExceedsTotal)?;
        if credits > 0 && !self.total.is_core() {
            return Err(OperationValidationError::CreditOnNonCoreFee);
        }
        if credits > self.total.amount {
            return Err(OperationValidationError::CreditExceedsTotal);
        }
        Ok(())
    }

    /// Serialized width used for fee-schedule byte pricing
    pub(crate) fn encoded_size(&self) -> u32 {
        28 // total (12) + from_prepaid (8) + from_csaf (8)
    }
}

// =============================================================================
// OPERATION PAYLOADS
// =============================================================================

/// Balance transfer between two accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOperation {
    pub fee: Fee,
    pub from: AccountUid,
    pub to: AccountUid,
    pub amount: AssetAmount,
    pub memo: Option<String>,
}

impl TransferOperation {
    pub fn validate(&self) -> Result<(), OperationValidationError> {
        self.fee.validate()?;
        if self.amount.amount == 0 {
            return Err(OperationValidationError::ZeroAmount);
        }
        if self.from == self.to {
            return Err(OperationValidationError::SelfTransfer);
        }
        Ok(())
    }
}

/// Mutation of an existing account's metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdateOperation {
    pub fee: Fee,
    pub account: AccountUid,
    pub new_name: Option<String>,
    pub new_memo_key: Option<[u8; 32]>,
}

impl AccountUpdateOperation {
    pub fn validate(&self) -> Result<(), OperationValidationError> {
        self.fee.validate()?;
        if self.new_name.is_none() && self.new_memo_key.is_none() {
            return Err(OperationValidationError::EmptyUpdate);
        }
        if let Some(name) = &self.new_name {
            if name.trim().is_empty() {
                return Err(OperationValidationError::EmptyName);
            }
        }
        Ok(())
    }
}

/// Core-asset deposit into an asset's fee exchange pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePoolDepositOperation {
    pub fee: Fee,
    pub from: AccountUid,
    pub asset: AssetId,
    /// Core-asset amount moved into the pool
    pub amount: Amount,
}

impl FeePoolDepositOperation {
    pub fn validate(&self) -> Result<(), OperationValidationError> {
        self.fee.validate()?;
        if self.amount == 0 {
            return Err(OperationValidationError::ZeroAmount);
        }
        Ok(())
    }
}

// =============================================================================
// OPERATION SUM TYPE
// =============================================================================

/// One state-change instruction within a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Transfer(TransferOperation),
    AccountUpdate(AccountUpdateOperation),
    FeePoolDeposit(FeePoolDepositOperation),
}

impl Operation {
    /// Discriminant identifying the concrete variant
    pub fn tag(&self) -> OperationTag {
        match self {
            Operation::Transfer(_) => OperationTag::Transfer,
            Operation::AccountUpdate(_) => OperationTag::AccountUpdate,
            Operation::FeePoolDeposit(_) => OperationTag::FeePoolDeposit,
        }
    }

    /// The declared fee
    pub fn fee(&self) -> &Fee {
        match self {
            Operation::Transfer(op) => &op.fee,
            Operation::AccountUpdate(op) => &op.fee,
            Operation::FeePoolDeposit(op) => &op.fee,
        }
    }

    /// The account responsible for the fee
    pub fn fee_payer(&self) -> AccountUid {
        match self {
            Operation::Transfer(op) => op.from,
            Operation::AccountUpdate(op) => op.account,
            Operation::FeePoolDeposit(op) => op.from,
        }
    }

    /// Context-free validation; runs upstream of dispatch
    pub fn validate(&self) -> Result<(), OperationValidationError> {
        match self {
            Operation::Transfer(op) => op.validate(),
            Operation::AccountUpdate(op) => op.validate(),
            Operation::FeePoolDeposit(op) => op.validate(),
        }
    }

    /// Serialized payload width used for fee-schedule byte pricing.
    ///
    /// Fixed field widths plus variable-length metadata; not a wire format.
    pub fn payload_size(&self) -> u32 {
        match self {
            Operation::Transfer(op) => {
                // fee + from (8) + to (8) + amount (12) + memo
                let memo = op.memo.as_ref().map(|m| m.len() as u32).unwrap_or(0);
                op.fee.encoded_size() + 28 + memo
            }
            Operation::AccountUpdate(op) => {
                // fee + account (8) + optional name + optional key (32)
                let name = op.new_name.as_ref().map(|n| n.len() as u32).unwrap_or(0);
                let key = if op.new_memo_key.is_some() { 32 } else { 0 };
                op.fee.encoded_size() + 8 + name + key
            }
            Operation::FeePoolDeposit(op) => {
                // fee + from (8) + asset (4) + amount (8)
                op.fee.encoded_size() + 20
            }
        }
    }
}

// =============================================================================
// VARIANT BINDING
// =============================================================================

/// Binds a payload struct to its place in the [`Operation`] sum type.
///
/// The typed evaluator binding is generic over this trait; the associated
/// `TAG` ties a handler to its registry key at compile time.
pub trait OperationVariant: Sized {
    /// Registry discriminant of this variant
    const TAG: OperationTag;

    /// Extract this variant's payload from a generic operation
    fn from_operation(op: &Operation) -> Option<&Self>;

    /// The declared fee
    fn fee(&self) -> &Fee;

    /// The account responsible for the fee
    fn fee_payer(&self) -> AccountUid;
}

impl OperationVariant for TransferOperation {
    const TAG: OperationTag = OperationTag::Transfer;

    fn from_operation(op: &Operation) -> Option<&Self> {
        match op {
            Operation::Transfer(inner) => Some(inner),
            _ => None,
        }
    }

    fn fee(&self) -> &Fee {
        &self.fee
    }

    fn fee_payer(&self) -> AccountUid {
        self.from
    }
}

impl OperationVariant for AccountUpdateOperation {
    const TAG: OperationTag = OperationTag::AccountUpdate;

    fn from_operation(op: &Operation) -> Option<&Self> {
        match op {
            Operation::AccountUpdate(inner) => Some(inner),
            _ => None,
        }
    }

    fn fee(&self) -> &Fee {
        &self.fee
    }

    fn fee_payer(&self) -> AccountUid {
        self.account
    }
}

impl OperationVariant for FeePoolDepositOperation {
    const TAG: OperationTag = OperationTag::FeePoolDeposit;

    fn from_operation(op: &Operation) -> Option<&Self> {
        match op {
            Operation::FeePoolDeposit(inner) => Some(inner),
            _ => None,
        }
    }

    fn fee(&self) -> &Fee {
        &self.fee
    }

    fn fee_payer(&self) -> AccountUid {
        self.from
    }
}
