//! Solidity interface for the console's fixed ERC721 surface.
//!
//! Only the five functions the console dispatches are declared; the
//! controller never introspects a contract beyond this set.

use alloy_sol_types::sol;

sol! {
    /// Minimal mintable ERC721 interface.
    ///
    /// Reference: <https://eips.ethereum.org/EIPS/eip-721>
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IMintableErc721 {
        function mint(address to, uint256 tokenId) external;
        function transferFrom(address from, address to, uint256 tokenId) external;
        function approve(address to, uint256 tokenId) external;
        function ownerOf(uint256 tokenId) external view returns (address);
        function getApproved(uint256 tokenId) external view returns (address);
    }
}
