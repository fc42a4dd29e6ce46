#![no_std] // Shared by every toolchain stage, including embedded hosts

#[macro_use]
extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod cursor;
pub mod format;
pub mod kind;
pub mod token;

// Re-export core types for convenience
pub use cursor::{Checkpoint, ExpectError, TokenCursor};
pub use format::{FieldFormatter, Formattable};
pub use kind::{lookup, SymbolEntry, TokenKind, SYMBOL_REGISTRY};
pub use token::{Token, TokenStream};
