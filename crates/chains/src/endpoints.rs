//! Default explorer/node endpoints per chain
//!
//! All overridable through configuration; these are the public instances the
//! wallet ships with.

use chainflow_types::Chain;
use serde::{Deserialize, Serialize};

/// Endpoint table consulted by the chain clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
	pub blockchair_base: String,
	pub solana_rpc: String,
	pub sui_rpc: String,
	pub toncenter_base: String,
	pub trongrid_base: String,
	pub ripple_rpc: String,
	pub subscan_base: String,
	pub koios_base: String,
	pub midgard_thorchain: String,
	pub midgard_maya: String,
	pub thornode_base: String,
	pub mayanode_base: String,
}

impl Default for Endpoints {
	fn default() -> Self {
		Self {
			blockchair_base: "https://api.blockchair.com".to_string(),
			solana_rpc: "https://api.mainnet-beta.solana.com".to_string(),
			sui_rpc: "https://fullnode.mainnet.sui.io".to_string(),
			toncenter_base: "https://toncenter.com/api/v3".to_string(),
			trongrid_base: "https://api.trongrid.io".to_string(),
			ripple_rpc: "https://s1.ripple.com:51234".to_string(),
			subscan_base: "https://polkadot.api.subscan.io".to_string(),
			koios_base: "https://api.koios.rest/api/v1".to_string(),
			midgard_thorchain: "https://midgard.ninerealms.com".to_string(),
			midgard_maya: "https://midgard.mayachain.info".to_string(),
			thornode_base: "https://thornode.ninerealms.com".to_string(),
			mayanode_base: "https://mayanode.mayachain.info".to_string(),
		}
	}
}

impl Endpoints {
	/// Blockchair path slug for a UTXO chain
	pub fn blockchair_slug(chain: Chain) -> Option<&'static str> {
		match chain {
			Chain::Bitcoin => Some("bitcoin"),
			Chain::BitcoinCash => Some("bitcoin-cash"),
			Chain::Litecoin => Some("litecoin"),
			Chain::Dogecoin => Some("dogecoin"),
			Chain::Dash => Some("dash"),
			Chain::Zcash => Some("zcash"),
			_ => None,
		}
	}

	/// Default JSON-RPC endpoint for an EVM chain
	pub fn evm_rpc(chain: Chain) -> Option<&'static str> {
		match chain {
			Chain::Ethereum => Some("https://eth.llamarpc.com"),
			Chain::Avalanche => Some("https://api.avax.network/ext/bc/C/rpc"),
			Chain::BscChain => Some("https://bsc-dataseed.bnbchain.org"),
			Chain::Arbitrum => Some("https://arb1.arbitrum.io/rpc"),
			Chain::Base => Some("https://mainnet.base.org"),
			Chain::Optimism => Some("https://mainnet.optimism.io"),
			Chain::Polygon => Some("https://polygon-rpc.com"),
			Chain::Blast => Some("https://rpc.blast.io"),
			Chain::CronosChain => Some("https://evm.cronos.org"),
			Chain::Zksync => Some("https://mainnet.era.zksync.io"),
			_ => None,
		}
	}

	/// Default LCD (REST) endpoint for a Cosmos-SDK chain
	pub fn cosmos_lcd(chain: Chain) -> Option<&'static str> {
		match chain {
			Chain::GaiaChain => Some("https://cosmos-rest.publicnode.com"),
			Chain::Kujira => Some("https://kujira-rest.publicnode.com"),
			Chain::Dydx => Some("https://dydx-rest.publicnode.com"),
			Chain::Osmosis => Some("https://osmosis-rest.publicnode.com"),
			Chain::Terra => Some("https://terra-lcd.publicnode.com"),
			Chain::Noble => Some("https://noble-api.polkachu.com"),
			_ => None,
		}
	}

	/// Protocol error for a chain routed to the wrong family client
	pub(crate) fn family_mismatch(chain: Chain, family: &str) -> chainflow_types::ChainError {
		chainflow_types::ChainError::Protocol {
			detail: format!("{} is not a {} chain", chain, family),
		}
	}
}
