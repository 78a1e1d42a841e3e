//! Memory Access Types.
//!
//! This module defines the classification of accesses used throughout the simulator.
//! These types are used for the following:
//! 1. **Engine Dispatch:** Whether an access modifies the line it touches (`Operation`).
//! 2. **Trace Routing:** Whether a trace record targets the instruction or data side (`TraceOp`).

use std::fmt;

use super::error::AccessError;

/// Kind of access presented to a cache engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Data read. Never dirties a line.
    Load,

    /// Data write. Dirties the line under write-back and is propagated
    /// immediately under write-through.
    Store,
}

impl Operation {
    /// Trace code of a data store.
    pub const STORE_CODE: i64 = 0;
    /// Trace code of a data load.
    pub const LOAD_CODE: i64 = 1;

    /// Returns `true` if this access modifies the line.
    #[inline]
    pub const fn is_store(self) -> bool {
        matches!(self, Self::Store)
    }
}

impl TryFrom<i64> for Operation {
    type Error = AccessError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            Self::STORE_CODE => Ok(Self::Store),
            Self::LOAD_CODE => Ok(Self::Load),
            other => Err(AccessError::InvalidOperation(other)),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => f.write_str("load"),
            Self::Store => f.write_str("store"),
        }
    }
}

/// Kind of access recorded in a trace.
///
/// Trace records carry a numeric code: `0` data store, `1` data load,
/// `2` instruction fetch. Any other integer code, negative ones included, is
/// kept verbatim so the engine can reject that record alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraceOp {
    /// Data write (code `0`).
    DataStore,
    /// Data read (code `1`).
    DataLoad,
    /// Instruction fetch (code `2`), a load on the instruction side.
    InstructionFetch,
    /// Unrecognized code.
    Unknown(i64),
}

impl TraceOp {
    /// Trace code of an instruction fetch.
    pub const FETCH_CODE: i64 = 2;

    /// Returns `true` for accesses routed to the instruction cache.
    #[inline]
    pub const fn is_fetch(self) -> bool {
        matches!(self, Self::InstructionFetch)
    }

    /// Converts this record into an engine operation.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::InvalidOperation`] for unknown codes.
    pub fn operation(self) -> Result<Operation, AccessError> {
        match self {
            Self::DataStore => Ok(Operation::Store),
            Self::DataLoad | Self::InstructionFetch => Ok(Operation::Load),
            Self::Unknown(code) => Err(AccessError::InvalidOperation(code)),
        }
    }
}

impl From<i64> for TraceOp {
    fn from(code: i64) -> Self {
        match code {
            Operation::STORE_CODE => Self::DataStore,
            Operation::LOAD_CODE => Self::DataLoad,
            Self::FETCH_CODE => Self::InstructionFetch,
            other => Self::Unknown(other),
        }
    }
}
