//! Asset references

use crate::chains::Chain;
use serde::{Deserialize, Serialize};

/// Reference to an asset on a specific chain
///
/// Immutable value type; equality is structural. The native asset of a chain
/// carries no contract address, tokens carry their contract or denom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef {
	pub chain: Chain,
	pub ticker: String,
	/// Contract address (EVM), mint (Solana) or denom (Cosmos); `None` for
	/// the chain's native asset
	pub contract: Option<String>,
	/// Decimals of the asset's smallest unit
	pub decimals: u8,
}

impl AssetRef {
	/// Reference the native asset of a chain
	pub fn native(chain: Chain) -> Self {
		Self {
			chain,
			ticker: chain.native_ticker().to_string(),
			contract: None,
			decimals: chain.native_decimals(),
		}
	}

	/// Reference a token by contract/denom address
	pub fn token(
		chain: Chain,
		ticker: impl Into<String>,
		contract: impl Into<String>,
		decimals: u8,
	) -> Self {
		Self {
			chain,
			ticker: ticker.into(),
			contract: Some(contract.into()),
			decimals,
		}
	}

	/// Whether this is the chain's native (fee-paying) asset
	pub fn is_native(&self) -> bool {
		self.contract.is_none()
	}

	/// THORChain-style asset notation, e.g. `BTC.BTC` or `ETH.USDC-0x...`
	pub fn swap_notation(&self) -> String {
		let chain_code = match self.chain {
			Chain::Bitcoin => "BTC",
			Chain::BitcoinCash => "BCH",
			Chain::Litecoin => "LTC",
			Chain::Dogecoin => "DOGE",
			Chain::Dash => "DASH",
			Chain::Ethereum => "ETH",
			Chain::Avalanche => "AVAX",
			Chain::BscChain => "BSC",
			Chain::Arbitrum => "ARB",
			Chain::Base => "BASE",
			Chain::GaiaChain => "GAIA",
			Chain::Kujira => "KUJI",
			Chain::Thorchain => "THOR",
			Chain::MayaChain => "MAYA",
			other => return format!("{}.{}", other.native_ticker(), self.ticker),
		};
		match &self.contract {
			Some(contract) => format!("{}.{}-{}", chain_code, self.ticker, contract),
			None => format!("{}.{}", chain_code, self.ticker),
		}
	}
}

impl std::fmt::Display for AssetRef {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.chain, self.ticker)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_structural_equality() {
		let a = AssetRef::native(Chain::Bitcoin);
		let b = AssetRef::native(Chain::Bitcoin);
		assert_eq!(a, b);

		let c = AssetRef::token(Chain::Ethereum, "USDC", "0xa0b8", 6);
		assert_ne!(a, c);
		assert_eq!(c, AssetRef::token(Chain::Ethereum, "USDC", "0xa0b8", 6));
	}

	#[test]
	fn test_swap_notation() {
		assert_eq!(AssetRef::native(Chain::Bitcoin).swap_notation(), "BTC.BTC");
		assert_eq!(
			AssetRef::token(Chain::Ethereum, "USDC", "0xa0b8", 6).swap_notation(),
			"ETH.USDC-0xa0b8"
		);
		assert_eq!(AssetRef::native(Chain::Thorchain).swap_notation(), "THOR.RUNE");
	}
}
