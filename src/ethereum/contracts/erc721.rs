//! ERC-721 collection contract bindings.

use alloy::{json_abi::JsonAbi, sol};

sol! {
    #[sol(rpc, abi)]
    interface IERC721 {
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function totalSupply() external view returns (uint256);
        function ownerOf(uint256 tokenId) external view returns (address);
        function tokenURI(uint256 tokenId) external view returns (string memory);
    }
}

/// JSON ABI of the default NFT interface.
pub fn default_abi() -> JsonAbi {
    IERC721::abi::contract()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolCall;

    #[test]
    fn test_default_abi_functions() {
        let abi = default_abi();
        assert_eq!(abi.functions().count(), 5);
        assert!(abi.function("tokenURI").is_some());
    }

    #[test]
    fn test_owner_of_selector() {
        assert_eq!(IERC721::ownerOfCall::SELECTOR, [0x63, 0x52, 0x21, 0x1e]);
    }
}
