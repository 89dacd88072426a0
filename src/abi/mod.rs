//! ABI recovery helpers.
//!
//! Contracts without published ABIs can still be introspected: the function
//! selectors are scanned out of the runtime bytecode, resolved to text
//! signatures through a signature directory, and parsed into ABI functions.

pub mod bytecode;
pub mod directory;
pub mod signature;

pub use bytecode::selectors_from_bytecode;
pub use directory::{FourByteDirectory, SignatureDirectory, FOUR_BYTE_URL};
pub use signature::parse_function;
