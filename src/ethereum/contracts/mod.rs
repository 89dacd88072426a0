//! Smart contract bindings.

pub mod erc20;
pub mod erc721;

pub use erc20::IERC20;
pub use erc721::IERC721;
