//! Transaction Evaluation Context
//!
//! Per-transaction state threaded through evaluation: the borrowed store and
//! chain parameters, the fee-schedule override flag, and the accumulated
//! operation results that relative object references resolve against.
//!
//! The context borrows the store for one transaction's processing only; it
//! never outlives the call that created it.

use lib_types::{ObjectId, ObjectRef};

use crate::protocol::ChainParams;
use crate::storage::LedgerStore;

use super::errors::{EvalResult, EvaluationError};
use super::mutator::LedgerMutator;
use super::view::LedgerView;
use super::OperationOutcome;

/// Evaluation state for one transaction
pub struct TransactionContext<'a> {
    store: &'a dyn LedgerStore,
    params: &'a ChainParams,
    /// Skip the fee-schedule sufficiency check (context-level override used
    /// for exempted transaction types). Fee preparation and payment still run.
    pub skip_fee_schedule_check: bool,
    operation_results: Vec<OperationOutcome>,
}

impl<'a> TransactionContext<'a> {
    pub fn new(store: &'a dyn LedgerStore, params: &'a ChainParams) -> Self {
        Self {
            store,
            params,
            skip_fee_schedule_check: false,
            operation_results: Vec::new(),
        }
    }

    pub fn with_skip_fee_schedule_check(mut self, skip: bool) -> Self {
        self.skip_fee_schedule_check = skip;
        self
    }

    /// The borrowed ledger store
    pub fn store(&self) -> &'a dyn LedgerStore {
        self.store
    }

    /// Chain parameters active for this transaction
    pub fn params(&self) -> &'a ChainParams {
        self.params
    }

    /// Read-only view over the store
    pub fn view(&self) -> LedgerView<'a> {
        LedgerView::new(self.store)
    }

    /// Mutation primitives over the store
    pub fn mutator(&self) -> LedgerMutator<'a> {
        LedgerMutator::new(self.store)
    }

    // =========================================================================
    // Operation Results
    // =========================================================================

    /// Record the outcome of a completed operation
    pub fn record_result(&mut self, outcome: OperationOutcome) {
        self.operation_results.push(outcome);
    }

    /// Outcomes of the operations processed so far, in order
    pub fn results(&self) -> &[OperationOutcome] {
        &self.operation_results
    }

    /// Resolve an object reference against the results of earlier operations
    /// in this transaction.
    ///
    /// A relative reference is valid only if the indexed operation has
    /// already run and produced an object.
    pub fn resolve_ref(&self, reference: ObjectRef) -> EvalResult<ObjectId> {
        match reference {
            ObjectRef::Absolute(id) => Ok(id),
            ObjectRef::Relative(index) => {
                match self.operation_results.get(index as usize) {
                    Some(OperationOutcome::Object(id)) => Ok(*id),
                    _ => Err(EvaluationError::InvalidRelativeReference {
                        index,
                        available: self.operation_results.len(),
                    }),
                }
            }
        }
    }
}
