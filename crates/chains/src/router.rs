//! Family dispatch over the chain clients

use crate::{
	cardano::KoiosClient, cosmos::CosmosLcdClient, evm::EvmRpcClient, polkadot::SubscanClient,
	ripple::RippleRpcClient, solana::SolanaRpcClient, sui::SuiRpcClient, thorchain::MidgardClient,
	ton::TonCenterClient, tron::TronGridClient, utxo::BlockchairClient,
};
use crate::{ByteFeeSource, Endpoints, FlatFeeSource, GasPriceSource, StatusProvider};
use async_trait::async_trait;
use chainflow_types::{Chain, ChainError, ChainFamily, ChainResult, StatusObservation};

/// One client per family, dispatched through the classifier
///
/// The router is the only place that knows which client serves which chain;
/// everything downstream holds a `dyn` handle per concern.
#[derive(Debug)]
pub struct ChainRouter {
	utxo: BlockchairClient,
	evm: EvmRpcClient,
	cosmos: CosmosLcdClient,
	midgard: MidgardClient,
	solana: SolanaRpcClient,
	sui: SuiRpcClient,
	ton: TonCenterClient,
	tron: TronGridClient,
	ripple: RippleRpcClient,
	polkadot: SubscanClient,
	cardano: KoiosClient,
	cosmos_flat: CosmosFlatFee,
}

impl ChainRouter {
	pub fn new(client: reqwest::Client, endpoints: &Endpoints) -> Self {
		Self {
			utxo: BlockchairClient::new(client.clone(), endpoints),
			evm: EvmRpcClient::new(client.clone()),
			cosmos: CosmosLcdClient::new(client.clone()),
			midgard: MidgardClient::new(client.clone(), endpoints),
			solana: SolanaRpcClient::new(client.clone(), endpoints),
			sui: SuiRpcClient::new(client.clone(), endpoints),
			ton: TonCenterClient::new(client.clone(), endpoints),
			tron: TronGridClient::new(client.clone(), endpoints),
			ripple: RippleRpcClient::new(client.clone(), endpoints),
			polkadot: SubscanClient::new(client.clone(), endpoints),
			cardano: KoiosClient::new(client, endpoints),
			cosmos_flat: CosmosFlatFee,
		}
	}

	fn status_provider(&self, chain: Chain) -> &dyn StatusProvider {
		match chain.family() {
			ChainFamily::Utxo => &self.utxo,
			ChainFamily::Evm => &self.evm,
			ChainFamily::Cosmos => &self.cosmos,
			ChainFamily::Thorchain => &self.midgard,
			ChainFamily::Solana => &self.solana,
			ChainFamily::Sui => &self.sui,
			ChainFamily::Ton => &self.ton,
			ChainFamily::Tron => &self.tron,
			ChainFamily::Ripple => &self.ripple,
			ChainFamily::Polkadot => &self.polkadot,
			ChainFamily::Cardano => &self.cardano,
		}
	}

	fn flat_fee_source(&self, chain: Chain) -> ChainResult<&dyn FlatFeeSource> {
		match chain.family() {
			ChainFamily::Solana => Ok(&self.solana),
			ChainFamily::Sui => Ok(&self.sui),
			ChainFamily::Ton => Ok(&self.ton),
			ChainFamily::Tron => Ok(&self.tron),
			ChainFamily::Ripple => Ok(&self.ripple),
			ChainFamily::Polkadot => Ok(&self.polkadot),
			ChainFamily::Cardano => Ok(&self.cardano),
			// Cosmos-SDK fees are fixed protocol constants; serve them
			// through the same path without a dedicated client
			ChainFamily::Cosmos | ChainFamily::Thorchain => Ok(&self.cosmos_flat),
			family => Err(ChainError::Protocol {
				detail: format!("{:?} chains do not use flat fees", family),
			}),
		}
	}
}

// Cosmos/THORChain flat fees come straight from the chain constants
#[derive(Debug)]
struct CosmosFlatFee;

#[async_trait]
impl FlatFeeSource for CosmosFlatFee {
	async fn flat_fee(&self, chain: Chain) -> ChainResult<u128> {
		chain.fallback_flat_fee().ok_or(ChainError::Protocol {
			detail: format!("{} has no flat fee", chain),
		})
	}
}

#[async_trait]
impl StatusProvider for ChainRouter {
	async fn check_status(
		&self,
		chain: Chain,
		tx_identifier: &str,
	) -> ChainResult<StatusObservation> {
		self.status_provider(chain)
			.check_status(chain, tx_identifier)
			.await
	}
}

#[async_trait]
impl ByteFeeSource for ChainRouter {
	async fn byte_fee_rate(&self, chain: Chain) -> ChainResult<u64> {
		self.utxo.byte_fee_rate(chain).await
	}
}

#[async_trait]
impl GasPriceSource for ChainRouter {
	async fn gas_price(&self, chain: Chain) -> ChainResult<u128> {
		self.evm.gas_price(chain).await
	}
}

#[async_trait]
impl FlatFeeSource for ChainRouter {
	async fn flat_fee(&self, chain: Chain) -> ChainResult<u128> {
		self.flat_fee_source(chain)?.flat_fee(chain).await
	}
}
