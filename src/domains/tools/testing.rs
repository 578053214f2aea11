//! Test doubles for tool operations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::descriptor::{ParameterKind, ParameterSchema, ToolDescriptor};
use super::error::ToolError;
use super::handlers::{ArgumentBag, OperationResult, ToolOperation, ValidatedArguments};

/// Returns a fixed result and records how it was called.
#[derive(Clone)]
pub struct StaticOperation {
    result: OperationResult,
    calls: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<ArgumentBag>>>,
}

impl StaticOperation {
    pub fn new(result: OperationResult) -> Self {
        Self {
            result,
            calls: Arc::new(AtomicUsize::new(0)),
            last: Arc::new(Mutex::new(None)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_arguments(&self) -> Option<ArgumentBag> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ToolOperation for StaticOperation {
    async fn invoke(&self, arguments: &ValidatedArguments) -> Result<OperationResult, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(arguments.as_map().clone());
        Ok(self.result.clone())
    }
}

/// Always returns `Err`.
pub struct FailingOperation;

#[async_trait::async_trait]
impl ToolOperation for FailingOperation {
    async fn invoke(&self, _arguments: &ValidatedArguments) -> Result<OperationResult, ToolError> {
        Err(ToolError::internal("operation exploded"))
    }
}

/// Panics when invoked.
pub struct PanickingOperation;

#[async_trait::async_trait]
impl ToolOperation for PanickingOperation {
    async fn invoke(&self, _arguments: &ValidatedArguments) -> Result<OperationResult, ToolError> {
        panic!("operation panicked")
    }
}

/// Never completes, like a hung upstream call.
pub struct PendingOperation;

#[async_trait::async_trait]
impl ToolOperation for PendingOperation {
    async fn invoke(&self, _arguments: &ValidatedArguments) -> Result<OperationResult, ToolError> {
        std::future::pending().await
    }
}

/// Descriptor requiring `store_Hash` around the given operation.
pub fn descriptor(name: &str, operation: impl ToolOperation + 'static) -> ToolDescriptor {
    ToolDescriptor::new(
        name,
        format!("Test tool {name}"),
        ParameterSchema::new()
            .required("store_Hash", ParameterKind::String, "Store hash")
            .optional("page", ParameterKind::Integer, "Page number"),
        Arc::new(operation),
    )
}
