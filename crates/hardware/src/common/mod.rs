//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Address Types:** A strong type for trace addresses and their decoded fields.
//! 2. **Access Types:** Definitions for categorizing accesses (load, store, fetch).
//! 3. **Error Handling:** Configuration, decode, access and driver errors.

/// Address type definitions.
pub mod addr;

/// Access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{Address, DecodedAddress};
pub use data::{Operation, TraceOp};
pub use error::{AccessError, ConfigError, DecodeError, SimError};
