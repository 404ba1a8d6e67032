//! Chain registry and fee/status family classification
//!
//! Every chain the wallet can transact on is a variant of [`Chain`]; the set
//! is closed, so adding a chain is a compile-time change and classification
//! can never fail at runtime. Per-chain protocol constants (UTXO sizing,
//! gas-limit padding, fallback fees, polling cadence) live here next to the
//! classifier so the fee estimator and status tracker share one source.

use serde::{Deserialize, Serialize};

/// Fee/status protocol family a chain belongs to
///
/// `Utxo`, `Evm` and `Cosmos` cover whole groups of chains; the remaining
/// variants are single-chain families that share the "one RPC/REST call,
/// boolean or enum result" shape but differ in every field name, so each
/// gets its own status adapter. THORChain and Maya are Cosmos-SDK chains
/// but report transaction status through Midgard actions, which is a
/// different polling contract entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
	Utxo,
	Evm,
	Cosmos,
	Thorchain,
	Solana,
	Sui,
	Ton,
	Tron,
	Ripple,
	Polkadot,
	Cardano,
}

/// Supported chains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
	// UTXO
	Bitcoin,
	BitcoinCash,
	Litecoin,
	Dogecoin,
	Dash,
	Zcash,
	// EVM
	Ethereum,
	Avalanche,
	BscChain,
	Arbitrum,
	Base,
	Optimism,
	Polygon,
	Blast,
	CronosChain,
	Zksync,
	// Cosmos SDK
	Thorchain,
	MayaChain,
	GaiaChain,
	Kujira,
	Dydx,
	Osmosis,
	Terra,
	Noble,
	// Account-model chains with dedicated status contracts
	Solana,
	Sui,
	Ton,
	Tron,
	Ripple,
	Polkadot,
	Cardano,
}

/// Transaction size weights for UTXO fee estimation, in quarter-vbytes
///
/// Quarter-vbytes keep the arithmetic in integers: segwit inputs weigh
/// 101.25 vbytes, which is exactly 405 quarters. The fee is computed on the
/// ceiling of the total size in whole vbytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtxoSizing {
	pub input_quarter_vbytes: u64,
	pub output_quarter_vbytes: u64,
	pub base_quarter_vbytes: u64,
}

/// Segregated-witness sizing: 101.25 / 31 / 10 vbytes
pub const SEGWIT_SIZING: UtxoSizing = UtxoSizing {
	input_quarter_vbytes: 405,
	output_quarter_vbytes: 124,
	base_quarter_vbytes: 40,
};

/// Legacy sizing: 148 / 34 / 10 vbytes
pub const LEGACY_SIZING: UtxoSizing = UtxoSizing {
	input_quarter_vbytes: 592,
	output_quarter_vbytes: 136,
	base_quarter_vbytes: 40,
};

/// Caller-facing polling defaults for a chain
///
/// The tracker itself is stateless per poll; these are the cadence and
/// cutoff the polling loop upstream is expected to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
	pub interval_secs: u64,
	pub max_wait_secs: u64,
}

impl Chain {
	/// Every supported chain, for table-driven tests and registry building
	pub const ALL: [Chain; 31] = [
		Chain::Bitcoin,
		Chain::BitcoinCash,
		Chain::Litecoin,
		Chain::Dogecoin,
		Chain::Dash,
		Chain::Zcash,
		Chain::Ethereum,
		Chain::Avalanche,
		Chain::BscChain,
		Chain::Arbitrum,
		Chain::Base,
		Chain::Optimism,
		Chain::Polygon,
		Chain::Blast,
		Chain::CronosChain,
		Chain::Zksync,
		Chain::Thorchain,
		Chain::MayaChain,
		Chain::GaiaChain,
		Chain::Kujira,
		Chain::Dydx,
		Chain::Osmosis,
		Chain::Terra,
		Chain::Noble,
		Chain::Solana,
		Chain::Sui,
		Chain::Ton,
		Chain::Tron,
		Chain::Ripple,
		Chain::Polkadot,
		Chain::Cardano,
	];

	/// Total classification into the fee/status family
	pub fn family(&self) -> ChainFamily {
		match self {
			Chain::Bitcoin
			| Chain::BitcoinCash
			| Chain::Litecoin
			| Chain::Dogecoin
			| Chain::Dash
			| Chain::Zcash => ChainFamily::Utxo,
			Chain::Ethereum
			| Chain::Avalanche
			| Chain::BscChain
			| Chain::Arbitrum
			| Chain::Base
			| Chain::Optimism
			| Chain::Polygon
			| Chain::Blast
			| Chain::CronosChain
			| Chain::Zksync => ChainFamily::Evm,
			Chain::Thorchain | Chain::MayaChain => ChainFamily::Thorchain,
			Chain::GaiaChain
			| Chain::Kujira
			| Chain::Dydx
			| Chain::Osmosis
			| Chain::Terra
			| Chain::Noble => ChainFamily::Cosmos,
			Chain::Solana => ChainFamily::Solana,
			Chain::Sui => ChainFamily::Sui,
			Chain::Ton => ChainFamily::Ton,
			Chain::Tron => ChainFamily::Tron,
			Chain::Ripple => ChainFamily::Ripple,
			Chain::Polkadot => ChainFamily::Polkadot,
			Chain::Cardano => ChainFamily::Cardano,
		}
	}

	/// Decimals of the chain's native asset
	pub fn native_decimals(&self) -> u8 {
		match self.family() {
			ChainFamily::Utxo => 8,
			ChainFamily::Evm => 18,
			ChainFamily::Cosmos => match self {
				Chain::Dydx => 18,
				_ => 6,
			},
			ChainFamily::Thorchain => match self {
				Chain::MayaChain => 10,
				_ => 8,
			},
			ChainFamily::Solana | ChainFamily::Sui | ChainFamily::Ton => 9,
			ChainFamily::Tron | ChainFamily::Ripple | ChainFamily::Cardano => 6,
			ChainFamily::Polkadot => 10,
		}
	}

	/// Ticker of the chain's native (fee-paying) asset
	pub fn native_ticker(&self) -> &'static str {
		match self {
			Chain::Bitcoin => "BTC",
			Chain::BitcoinCash => "BCH",
			Chain::Litecoin => "LTC",
			Chain::Dogecoin => "DOGE",
			Chain::Dash => "DASH",
			Chain::Zcash => "ZEC",
			Chain::Ethereum => "ETH",
			Chain::Avalanche => "AVAX",
			Chain::BscChain => "BNB",
			Chain::Arbitrum => "ETH",
			Chain::Base => "ETH",
			Chain::Optimism => "ETH",
			Chain::Polygon => "POL",
			Chain::Blast => "ETH",
			Chain::CronosChain => "CRO",
			Chain::Zksync => "ETH",
			Chain::Thorchain => "RUNE",
			Chain::MayaChain => "CACAO",
			Chain::GaiaChain => "ATOM",
			Chain::Kujira => "KUJI",
			Chain::Dydx => "DYDX",
			Chain::Osmosis => "OSMO",
			Chain::Terra => "LUNA",
			Chain::Noble => "USDC",
			Chain::Solana => "SOL",
			Chain::Sui => "SUI",
			Chain::Ton => "TON",
			Chain::Tron => "TRX",
			Chain::Ripple => "XRP",
			Chain::Polkadot => "DOT",
			Chain::Cardano => "ADA",
		}
	}

	/// Human-readable unit the chain denominates fees in, for display/logs
	pub fn fee_unit_label(&self) -> &'static str {
		match self.family() {
			ChainFamily::Utxo => "sats/vbyte",
			ChainFamily::Evm => "wei",
			ChainFamily::Cosmos | ChainFamily::Thorchain => "base units",
			ChainFamily::Solana => "lamports",
			ChainFamily::Sui => "MIST",
			ChainFamily::Ton => "nanoton",
			ChainFamily::Tron => "sun",
			ChainFamily::Ripple => "drops",
			ChainFamily::Polkadot => "planck",
			ChainFamily::Cardano => "lovelace",
		}
	}

	/// UTXO transaction sizing constants; `None` for non-UTXO chains
	pub fn utxo_sizing(&self) -> Option<&'static UtxoSizing> {
		match self {
			Chain::Bitcoin | Chain::Litecoin => Some(&SEGWIT_SIZING),
			Chain::BitcoinCash | Chain::Dogecoin | Chain::Dash | Chain::Zcash => {
				Some(&LEGACY_SIZING)
			},
			_ => None,
		}
	}

	/// Reference value of a typical UTXO on this chain, in the smallest unit
	///
	/// Used only by the inputs-needed search as a rough capacity guess, so
	/// these are deliberately conservative (small) figures.
	pub fn average_utxo_value(&self) -> Option<u64> {
		match self {
			Chain::Bitcoin => Some(2_000_000),
			Chain::BitcoinCash => Some(50_000_000),
			Chain::Litecoin => Some(100_000_000),
			Chain::Dogecoin => Some(50_000_000_000),
			Chain::Dash => Some(50_000_000),
			Chain::Zcash => Some(50_000_000),
			_ => None,
		}
	}

	/// Gas-limit safety multiplier for EVM chains, in tenths
	///
	/// 20 (x2.0) for Ethereum, rollups settling to it, and the BNB chain;
	/// 16 (x1.6) for the remaining EVM networks. `None` for non-EVM chains.
	pub fn gas_limit_multiplier_tenths(&self) -> Option<u64> {
		match self {
			Chain::Ethereum
			| Chain::Arbitrum
			| Chain::Base
			| Chain::Optimism
			| Chain::Blast
			| Chain::Zksync
			| Chain::BscChain => Some(20),
			Chain::Avalanche | Chain::Polygon | Chain::CronosChain => Some(16),
			_ => None,
		}
	}

	/// EIP-155 chain id for EVM chains
	pub fn evm_chain_id(&self) -> Option<u64> {
		match self {
			Chain::Ethereum => Some(1),
			Chain::Avalanche => Some(43114),
			Chain::BscChain => Some(56),
			Chain::Arbitrum => Some(42161),
			Chain::Base => Some(8453),
			Chain::Optimism => Some(10),
			Chain::Polygon => Some(137),
			Chain::Blast => Some(81457),
			Chain::CronosChain => Some(25),
			Chain::Zksync => Some(324),
			_ => None,
		}
	}

	/// Conservative flat network fee in the chain's smallest unit
	///
	/// The estimator prefers a live quote and degrades to this constant when
	/// the upstream query fails; under-estimation is worse than a stale but
	/// safe figure.
	pub fn fallback_flat_fee(&self) -> Option<u128> {
		match self {
			Chain::Thorchain => Some(2_000_000),
			Chain::MayaChain => Some(2_000_000_000),
			Chain::GaiaChain => Some(7_500),
			Chain::Kujira => Some(7_500),
			Chain::Dydx => Some(2_500_000_000_000_000),
			Chain::Osmosis => Some(7_500),
			Chain::Terra => Some(7_500),
			Chain::Noble => Some(20_000),
			Chain::Solana => Some(1_000_000),
			Chain::Sui => Some(3_000_000),
			Chain::Ton => Some(10_000_000),
			Chain::Tron => Some(1_100_000),
			Chain::Ripple => Some(180_000),
			Chain::Polkadot => Some(250_000_000),
			Chain::Cardano => Some(180_000),
			_ => None,
		}
	}

	/// Default status-polling cadence and cutoff for this chain
	pub fn poll_config(&self) -> PollConfig {
		match self.family() {
			ChainFamily::Utxo => match self {
				Chain::Bitcoin => PollConfig {
					interval_secs: 30,
					max_wait_secs: 7_200,
				},
				_ => PollConfig {
					interval_secs: 15,
					max_wait_secs: 1_800,
				},
			},
			ChainFamily::Evm => PollConfig {
				interval_secs: 5,
				max_wait_secs: 600,
			},
			ChainFamily::Cosmos => PollConfig {
				interval_secs: 6,
				max_wait_secs: 600,
			},
			// Midgard indexes outbound legs too, which can lag by minutes
			ChainFamily::Thorchain => PollConfig {
				interval_secs: 10,
				max_wait_secs: 3_600,
			},
			ChainFamily::Solana => PollConfig {
				interval_secs: 5,
				max_wait_secs: 300,
			},
			ChainFamily::Sui | ChainFamily::Ton | ChainFamily::Tron => PollConfig {
				interval_secs: 5,
				max_wait_secs: 600,
			},
			ChainFamily::Ripple | ChainFamily::Polkadot => PollConfig {
				interval_secs: 6,
				max_wait_secs: 600,
			},
			ChainFamily::Cardano => PollConfig {
				interval_secs: 20,
				max_wait_secs: 3_600,
			},
		}
	}
}

impl std::fmt::Display for Chain {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Chain::Bitcoin => "Bitcoin",
			Chain::BitcoinCash => "Bitcoin Cash",
			Chain::Litecoin => "Litecoin",
			Chain::Dogecoin => "Dogecoin",
			Chain::Dash => "Dash",
			Chain::Zcash => "Zcash",
			Chain::Ethereum => "Ethereum",
			Chain::Avalanche => "Avalanche",
			Chain::BscChain => "BSC",
			Chain::Arbitrum => "Arbitrum",
			Chain::Base => "Base",
			Chain::Optimism => "Optimism",
			Chain::Polygon => "Polygon",
			Chain::Blast => "Blast",
			Chain::CronosChain => "Cronos",
			Chain::Zksync => "zkSync",
			Chain::Thorchain => "THORChain",
			Chain::MayaChain => "MayaChain",
			Chain::GaiaChain => "Cosmos Hub",
			Chain::Kujira => "Kujira",
			Chain::Dydx => "dYdX",
			Chain::Osmosis => "Osmosis",
			Chain::Terra => "Terra",
			Chain::Noble => "Noble",
			Chain::Solana => "Solana",
			Chain::Sui => "Sui",
			Chain::Ton => "TON",
			Chain::Tron => "Tron",
			Chain::Ripple => "XRP Ledger",
			Chain::Polkadot => "Polkadot",
			Chain::Cardano => "Cardano",
		};
		write!(f, "{}", name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_classification_is_total_and_stable() {
		for chain in Chain::ALL {
			// Calling twice must return the same family
			assert_eq!(chain.family(), chain.family());
		}
	}

	#[test]
	fn test_every_utxo_chain_has_sizing_and_average_value() {
		for chain in Chain::ALL {
			let is_utxo = chain.family() == ChainFamily::Utxo;
			assert_eq!(chain.utxo_sizing().is_some(), is_utxo);
			assert_eq!(chain.average_utxo_value().is_some(), is_utxo);
		}
	}

	#[test]
	fn test_segwit_inputs_weigh_less_than_legacy() {
		assert!(SEGWIT_SIZING.input_quarter_vbytes < LEGACY_SIZING.input_quarter_vbytes);
	}

	#[test]
	fn test_every_evm_chain_has_id_and_multiplier() {
		for chain in Chain::ALL {
			let is_evm = chain.family() == ChainFamily::Evm;
			assert_eq!(chain.evm_chain_id().is_some(), is_evm);
			assert_eq!(chain.gas_limit_multiplier_tenths().is_some(), is_evm);
		}
	}

	#[test]
	fn test_non_utxo_non_evm_chains_have_flat_fallback() {
		for chain in Chain::ALL {
			let family = chain.family();
			if family != ChainFamily::Utxo && family != ChainFamily::Evm {
				assert!(
					chain.fallback_flat_fee().is_some(),
					"{} is missing a fallback flat fee",
					chain
				);
			}
		}
	}

	#[test]
	fn test_high_congestion_multiplier_set() {
		assert_eq!(Chain::Ethereum.gas_limit_multiplier_tenths(), Some(20));
		assert_eq!(Chain::Base.gas_limit_multiplier_tenths(), Some(20));
		assert_eq!(Chain::BscChain.gas_limit_multiplier_tenths(), Some(20));
		assert_eq!(Chain::Avalanche.gas_limit_multiplier_tenths(), Some(16));
	}
}
