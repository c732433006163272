//! Variable frames and the frame store.
//!
//! The frame store exclusively owns all frame contents; the execution
//! engine mutates them only through these operations. A slot holds either
//! `None` (defined but uninitialized) or exactly one concrete value, and
//! the type of a slot may change across writes.

use std::collections::BTreeMap;
use std::fmt;

use ipp_common::{FrameKind, Value, VarRef};

use crate::error::RuntimeError;

/// One variable scope: an ordered name → slot mapping.
#[derive(Debug, Clone, Default)]
pub(crate) struct Frame {
    slots: BTreeMap<String, Option<Value>>,
}

impl Frame {
    fn define(&mut self, name: &str) -> Result<(), RuntimeError> {
        if self.slots.contains_key(name) {
            return Err(RuntimeError::VariableRedefinition {
                name: name.to_string(),
            });
        }
        self.slots.insert(name.to_string(), None);
        Ok(())
    }

    fn slot(&self, name: &str) -> Result<&Option<Value>, RuntimeError> {
        self.slots
            .get(name)
            .ok_or_else(|| RuntimeError::VariableNotDefined {
                name: name.to_string(),
            })
    }

    fn write(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        let slot = self
            .slots
            .get_mut(name)
            .ok_or_else(|| RuntimeError::VariableNotDefined {
                name: name.to_string(),
            })?;
        *slot = Some(value);
        Ok(())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.slots.is_empty() {
            return write!(f, "  (empty)");
        }
        for (i, (name, slot)) in self.slots.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match slot {
                Some(v) => write!(f, "  {name} = {}@{v}", v.type_name())?,
                None => write!(f, "  {name} = <uninitialized>")?,
            }
        }
        Ok(())
    }
}

/// The global frame, the optional temporary frame, and the local-frame stack.
#[derive(Debug, Clone, Default)]
pub struct FrameStore {
    global: Frame,
    temporary: Option<Frame>,
    locals: Vec<Frame>,
}

impl FrameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an uninitialized slot for `var` in its designated frame.
    pub fn define(&mut self, var: &VarRef) -> Result<(), RuntimeError> {
        self.frame_mut(var.frame)?.define(&var.name)
    }

    /// The slot for `var`: `None` means defined but uninitialized.
    pub fn slot(&self, var: &VarRef) -> Result<&Option<Value>, RuntimeError> {
        self.frame(var.frame)?.slot(&var.name)
    }

    /// The concrete value of `var`; uninitialized slots are a distinct,
    /// recoverable-at-caller condition (TYPE inspects slots directly).
    pub fn value(&self, var: &VarRef) -> Result<&Value, RuntimeError> {
        self.slot(var)?
            .as_ref()
            .ok_or_else(|| RuntimeError::ValueMissing {
                name: var.name.clone(),
            })
    }

    /// Overwrite the slot for `var`. The slot's type may change.
    pub fn write(&mut self, var: &VarRef, value: Value) -> Result<(), RuntimeError> {
        self.frame_mut(var.frame)?.write(&var.name, value)
    }

    /// Install a fresh temporary frame, discarding any existing one.
    /// Discarding is defined behavior of the language, not an error.
    pub fn create_temporary(&mut self) {
        self.temporary = Some(Frame::default());
    }

    /// Move the temporary frame onto the local-frame stack.
    pub fn push_temporary(&mut self) -> Result<(), RuntimeError> {
        let frame = self
            .temporary
            .take()
            .ok_or(RuntimeError::FrameNotAccessible { frame: "TF" })?;
        self.locals.push(frame);
        Ok(())
    }

    /// Pop the top local frame into the temporary-frame slot, replacing
    /// any existing temporary frame.
    pub fn pop_to_temporary(&mut self) -> Result<(), RuntimeError> {
        let frame = self
            .locals
            .pop()
            .ok_or(RuntimeError::FrameNotAccessible { frame: "LF" })?;
        self.temporary = Some(frame);
        Ok(())
    }

    fn frame(&self, kind: FrameKind) -> Result<&Frame, RuntimeError> {
        match kind {
            FrameKind::Global => Ok(&self.global),
            FrameKind::Local => self
                .locals
                .last()
                .ok_or(RuntimeError::FrameNotAccessible { frame: "LF" }),
            FrameKind::Temporary => self
                .temporary
                .as_ref()
                .ok_or(RuntimeError::FrameNotAccessible { frame: "TF" }),
        }
    }

    fn frame_mut(&mut self, kind: FrameKind) -> Result<&mut Frame, RuntimeError> {
        match kind {
            FrameKind::Global => Ok(&mut self.global),
            FrameKind::Local => self
                .locals
                .last_mut()
                .ok_or(RuntimeError::FrameNotAccessible { frame: "LF" }),
            FrameKind::Temporary => self
                .temporary
                .as_mut()
                .ok_or(RuntimeError::FrameNotAccessible { frame: "TF" }),
        }
    }
}

/// BREAK dump form.
impl fmt::Display for FrameStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "global frame:")?;
        writeln!(f, "{}", self.global)?;
        match &self.temporary {
            Some(frame) => {
                writeln!(f, "temporary frame:")?;
                writeln!(f, "{frame}")?;
            }
            None => writeln!(f, "temporary frame: (absent)")?,
        }
        write!(f, "local frames: {}", self.locals.len())?;
        for (depth, frame) in self.locals.iter().rev().enumerate() {
            write!(f, "\nlocal frame -{depth}:\n{frame}")?;
        }
        Ok(())
    }
}
