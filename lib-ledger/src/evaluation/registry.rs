//! Dispatch Registry
//!
//! Routes each operation to the evaluator registered for its tag without the
//! registry depending on concrete handler types. Entries are stateless
//! type-erasure adapters; every dispatch constructs a fresh typed evaluator,
//! so no evaluation state outlives a single operation.
//!
//! The registry is built once at startup, immutable afterwards, and passed by
//! reference into the transaction-processing driver - never global state.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::marker::PhantomData;

use tracing::{debug, trace};

use lib_types::OperationTag;

use crate::operation::Operation;

use super::context::TransactionContext;
use super::errors::{EvalResult, EvaluationError};
use super::evaluator::{Evaluator, OperationHandler};
use super::OperationOutcome;

/// Uniform call signature the registry holds every evaluator behind
pub trait OpEvaluator: Send + Sync {
    /// The tag this entry is bound to
    fn tag(&self) -> OperationTag;

    /// Construct a fresh typed evaluator and run its lifecycle
    fn evaluate(
        &self,
        ctx: &TransactionContext<'_>,
        op: &Operation,
        apply: bool,
    ) -> EvalResult<OperationOutcome>;
}

/// Stateless registry entry for one handler type
pub struct OpEvaluatorEntry<H: OperationHandler> {
    _handler: PhantomData<fn() -> H>,
}

impl<H: OperationHandler> OpEvaluatorEntry<H> {
    pub fn new() -> Self {
        Self {
            _handler: PhantomData,
        }
    }
}

impl<H: OperationHandler> Default for OpEvaluatorEntry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: OperationHandler> OpEvaluator for OpEvaluatorEntry<H> {
    fn tag(&self) -> OperationTag {
        Evaluator::<H>::operation_tag()
    }

    fn evaluate(
        &self,
        ctx: &TransactionContext<'_>,
        op: &Operation,
        apply: bool,
    ) -> EvalResult<OperationOutcome> {
        let mut evaluator = Evaluator::<H>::new();
        evaluator.start_evaluate(ctx, op, apply)
    }
}

/// Builder for the registry; registration happens once at startup
#[derive(Default)]
pub struct RegistryBuilder {
    entries: HashMap<OperationTag, Box<dyn OpEvaluator>>,
}

impl std::fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("entries", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl RegistryBuilder {
    /// Register a handler against its operation's tag.
    ///
    /// The tag comes from the handler's associated operation type, so a
    /// key/handler mismatch is unrepresentable. Registering two handlers for
    /// one tag is a construction-time error.
    pub fn register<H>(mut self) -> Result<Self, EvaluationError>
    where
        H: OperationHandler + 'static,
    {
        let tag = Evaluator::<H>::operation_tag();
        match self.entries.entry(tag) {
            Entry::Occupied(_) => Err(EvaluationError::DuplicateEvaluator(tag)),
            Entry::Vacant(vacant) => {
                vacant.insert(Box::new(OpEvaluatorEntry::<H>::new()));
                Ok(self)
            }
        }
    }

    pub fn build(self) -> EvaluatorRegistry {
        debug!(evaluators = self.entries.len(), "evaluator registry built");
        EvaluatorRegistry {
            entries: self.entries,
        }
    }
}

/// Immutable mapping from operation tag to evaluator
pub struct EvaluatorRegistry {
    entries: HashMap<OperationTag, Box<dyn OpEvaluator>>,
}

impl EvaluatorRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Route one operation to its registered evaluator.
    ///
    /// A missing entry fails before any evaluator is constructed.
    pub fn dispatch(
        &self,
        ctx: &TransactionContext<'_>,
        op: &Operation,
        apply: bool,
    ) -> EvalResult<OperationOutcome> {
        let tag = op.tag();
        let entry = self
            .entries
            .get(&tag)
            .ok_or(EvaluationError::UnregisteredOperation(tag))?;
        trace!(operation = %tag, apply, "dispatching operation");
        entry.evaluate(ctx, op, apply)
    }

    /// Check whether a tag has a registered evaluator
    pub fn contains(&self, tag: OperationTag) -> bool {
        self.entries.contains_key(&tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
