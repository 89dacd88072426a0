//! ERC-20 token contract bindings.

use alloy::{json_abi::JsonAbi, sol};

sol! {
    #[sol(rpc, abi)]
    interface IERC20 {
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function totalSupply() external view returns (uint256);
        function decimals() external view returns (uint8);
        function balanceOf(address who) external view returns (uint256);
        function allowance(address owner, address spender)
            external
            view
            returns (uint256 remaining);
        function approve(address spender, uint256 amount) external returns (bool);
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

/// JSON ABI of the default token interface.
pub fn default_abi() -> JsonAbi {
    IERC20::abi::contract()
}
