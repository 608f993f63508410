//! Typed errors for class file decoding.
//!
//! Decode failures are per-resource: the pipeline logs them and skips the
//! offending class, so these never abort a run on their own. Application
//! level code wraps them in `anyhow::Error` via `?`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassReadError {
    #[error("class file truncated at offset {offset}")]
    Truncated { offset: usize },

    #[error("bad magic number {0:#010x}")]
    BadMagic(u32),

    #[error("unsupported constant pool tag {tag} at index {index}")]
    UnknownConstantTag { tag: u8, index: u16 },

    #[error("constant pool index {0} out of range")]
    BadConstantIndex(u16),

    #[error("constant pool index {index} is not a {expected}")]
    WrongConstantType { index: u16, expected: &'static str },

    #[error("unknown opcode {opcode:#04x} at pc {pc}")]
    UnknownOpcode { opcode: u8, pc: usize },

    #[error("malformed descriptor {0:?}")]
    BadDescriptor(String),
}
