use std::any::Any;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::report::ManualInstruction;

/// Boxed value stored in the per-run context map
pub type ContextValue = Box<dyn Any + Send + Sync>;

/// Mutable, string-keyed store scoped to one transformation run.
///
/// Utility steps deposit intermediate results here; later steps read them
/// through their conditions or parameters. One context is created per run
/// (one per upgrade step for upgrade paths) and discarded at run end.
pub struct TransformContext {
    /// Root of the working copy this run operates on
    working_copy: PathBuf,

    /// Shared data between steps
    values: HashMap<String, ContextValue>,

    /// Manual follow-up records raised by steps during this run
    manual_instructions: Vec<ManualInstruction>,
}

impl TransformContext {
    /// Create a fresh context bound to a working-copy root
    pub fn new(working_copy: PathBuf) -> Self {
        Self {
            working_copy,
            values: HashMap::new(),
            manual_instructions: Vec::new(),
        }
    }

    /// Root of the working copy this run operates on
    pub fn working_copy(&self) -> &Path {
        &self.working_copy
    }

    /// Set a typed value
    pub fn set_value<T: 'static + Send + Sync>(&mut self, key: &str, value: T) {
        self.values.insert(key.to_string(), Box::new(value));
    }

    /// Insert an already-boxed value. Used by the engine to store a
    /// utility's returned value under its declared context key.
    pub fn insert_boxed(&mut self, key: &str, value: ContextValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Get a typed value. Returns `None` on a missing key or type mismatch.
    pub fn get_value<T: 'static + Send + Sync>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    /// Get a mutable reference to a typed value
    pub fn get_value_mut<T: 'static + Send + Sync>(&mut self, key: &str) -> Option<&mut T> {
        self.values.get_mut(key).and_then(|v| v.downcast_mut::<T>())
    }

    /// Check whether a key is present, regardless of its type
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Record a manual follow-up action raised by a step
    pub fn raise_manual_instruction(&mut self, instruction: ManualInstruction) {
        self.manual_instructions.push(instruction);
    }

    /// Manual instructions raised so far in this run
    pub fn manual_instructions(&self) -> &[ManualInstruction] {
        &self.manual_instructions
    }
}
