//! Swap provider identities

use crate::chains::Chain;
use serde::{Deserialize, Serialize};

/// A liquidity/aggregation backend capable of quoting swaps
///
/// Cross-chain providers (THORChain, Maya, LiFi) are chain-agnostic; the DEX
/// routers are parameterized by the chain they route on, since the same
/// backend runs one deployment per EVM network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "provider", content = "chain", rename_all = "lowercase")]
pub enum SwapProvider {
	Thorchain,
	Mayachain,
	OneInch(Chain),
	KyberSwap(Chain),
	Lifi,
}

impl SwapProvider {
	/// Stable identifier used for registry lookup and gate filtering
	pub fn id(&self) -> &'static str {
		match self {
			SwapProvider::Thorchain => "thorchain",
			SwapProvider::Mayachain => "mayachain",
			SwapProvider::OneInch(_) => "oneinch",
			SwapProvider::KyberSwap(_) => "kyberswap",
			SwapProvider::Lifi => "lifi",
		}
	}

	/// The chain a chain-scoped provider routes on
	pub fn scoped_chain(&self) -> Option<Chain> {
		match self {
			SwapProvider::OneInch(chain) | SwapProvider::KyberSwap(chain) => Some(*chain),
			_ => None,
		}
	}
}

impl std::fmt::Display for SwapProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.scoped_chain() {
			Some(chain) => write!(f, "{}@{}", self.id(), chain),
			None => write!(f, "{}", self.id()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_provider_ids_are_chain_independent() {
		assert_eq!(SwapProvider::OneInch(Chain::Ethereum).id(), "oneinch");
		assert_eq!(SwapProvider::OneInch(Chain::Base).id(), "oneinch");
		assert_eq!(SwapProvider::Thorchain.id(), "thorchain");
	}

	#[test]
	fn test_scoped_chain() {
		assert_eq!(
			SwapProvider::KyberSwap(Chain::Polygon).scoped_chain(),
			Some(Chain::Polygon)
		);
		assert_eq!(SwapProvider::Lifi.scoped_chain(), None);
	}
}
