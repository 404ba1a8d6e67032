//! Provider eligibility resolution
//!
//! A static decision table keyed by chain decides which providers may quote
//! a pair, in priority order. Three filters refine it: a per-chain ticker
//! allow-list for the cross-chain providers, a regional feature gate that
//! removes swapping wholesale, and an optional server-supplied disabled
//! list fetched once per process. The remote fetch fails open: eligibility
//! degrades to the static table, it never blocks all swaps.

use chainflow_types::{AssetRef, Chain, SwapProvider};
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Regional feature gates, decided by the embedding application's locale
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureGates {
	/// Swapping is unavailable in restricted locales regardless of assets
	pub swap_restricted: bool,
}

/// Server-supplied gate snapshot, read-only after the first fetch
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteGates {
	#[serde(default)]
	pub disabled_providers: Vec<String>,
}

/// Resolves the ordered provider list for a source asset
#[derive(Debug)]
pub struct EligibilityResolver {
	gates: FeatureGates,
	remote_url: Option<String>,
	client: reqwest::Client,
	remote: OnceCell<RemoteGates>,
}

/// Tickers the THORChain aggregator will quote on Ethereum; other tokens
/// fall through to the generic DEX aggregators
const THORCHAIN_ETH_ALLOWLIST: &[&str] = &["ETH", "USDC", "USDT", "WBTC", "DAI", "GUSD", "LUSD"];
const THORCHAIN_AVAX_ALLOWLIST: &[&str] = &["AVAX", "USDC", "USDT"];
const THORCHAIN_BSC_ALLOWLIST: &[&str] = &["BNB", "USDC", "USDT"];
const MAYACHAIN_ETH_ALLOWLIST: &[&str] = &["ETH", "USDC", "USDT", "WSTETH"];
const MAYACHAIN_ARB_ALLOWLIST: &[&str] = &["ETH", "USDT", "WBTC"];

/// Static decision table: providers able to quote from `chain`, best first
fn provider_table(chain: Chain) -> Vec<SwapProvider> {
	use SwapProvider::*;

	match chain {
		Chain::Bitcoin => vec![Thorchain, Mayachain],
		Chain::BitcoinCash | Chain::Litecoin | Chain::Dogecoin => vec![Thorchain],
		Chain::Dash => vec![Mayachain],
		Chain::Ethereum => vec![
			Thorchain,
			Mayachain,
			OneInch(chain),
			KyberSwap(chain),
			Lifi,
		],
		Chain::Avalanche | Chain::BscChain => {
			vec![Thorchain, OneInch(chain), KyberSwap(chain), Lifi]
		},
		Chain::Arbitrum => vec![Mayachain, OneInch(chain), KyberSwap(chain), Lifi],
		Chain::Base | Chain::Optimism | Chain::Polygon | Chain::Zksync => {
			vec![OneInch(chain), KyberSwap(chain), Lifi]
		},
		Chain::Blast | Chain::CronosChain => vec![Lifi],
		Chain::Thorchain | Chain::GaiaChain => vec![Thorchain],
		Chain::MayaChain | Chain::Kujira => vec![Mayachain],
		// No provider routes these today; "no route available" is the
		// correct outcome, not an error
		_ => vec![],
	}
}

/// Per-provider asset refinement on top of the chain table
fn provider_supports_asset(provider: SwapProvider, asset: &AssetRef) -> bool {
	let allowlist = match (provider, asset.chain) {
		(SwapProvider::Thorchain, Chain::Ethereum) => Some(THORCHAIN_ETH_ALLOWLIST),
		(SwapProvider::Thorchain, Chain::Avalanche) => Some(THORCHAIN_AVAX_ALLOWLIST),
		(SwapProvider::Thorchain, Chain::BscChain) => Some(THORCHAIN_BSC_ALLOWLIST),
		(SwapProvider::Mayachain, Chain::Ethereum) => Some(MAYACHAIN_ETH_ALLOWLIST),
		(SwapProvider::Mayachain, Chain::Arbitrum) => Some(MAYACHAIN_ARB_ALLOWLIST),
		_ => None,
	};

	match allowlist {
		Some(tickers) => tickers
			.iter()
			.any(|ticker| asset.ticker.eq_ignore_ascii_case(ticker)),
		None => true,
	}
}

impl EligibilityResolver {
	pub fn new(gates: FeatureGates, remote_url: Option<String>, client: reqwest::Client) -> Self {
		Self {
			gates,
			remote_url,
			client,
			remote: OnceCell::new(),
		}
	}

	/// Remote gate snapshot, fetched at most once per process lifetime
	async fn remote_snapshot(&self) -> &RemoteGates {
		self.remote
			.get_or_init(|| async {
				let Some(url) = &self.remote_url else {
					return RemoteGates::default();
				};

				match self.fetch_remote(url).await {
					Ok(gates) => gates,
					Err(err) => {
						// Fail open: the static table still applies
						warn!("Remote gate fetch failed: {}; proceeding without", err);
						RemoteGates::default()
					},
				}
			})
			.await
	}

	async fn fetch_remote(&self, url: &str) -> Result<RemoteGates, reqwest::Error> {
		self.client
			.get(url)
			.send()
			.await?
			.error_for_status()?
			.json()
			.await
	}

	/// Ordered providers able to quote swaps out of `source_asset`
	pub async fn resolve(&self, source_asset: &AssetRef) -> Vec<SwapProvider> {
		let remote = self.remote_snapshot().await;
		self.resolve_with(source_asset, remote)
	}

	/// Pure resolution against an explicit gate snapshot
	pub fn resolve_with(
		&self,
		source_asset: &AssetRef,
		remote: &RemoteGates,
	) -> Vec<SwapProvider> {
		if self.gates.swap_restricted {
			debug!("Swap providers suppressed by regional gate");
			return Vec::new();
		}

		provider_table(source_asset.chain)
			.into_iter()
			.filter(|provider| provider_supports_asset(*provider, source_asset))
			.filter(|provider| {
				!remote
					.disabled_providers
					.iter()
					.any(|disabled| disabled.eq_ignore_ascii_case(provider.id()))
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn create_resolver(gates: FeatureGates) -> EligibilityResolver {
		EligibilityResolver::new(gates, None, reqwest::Client::new())
	}

	#[test]
	fn test_bitcoin_provider_order() {
		let resolver = create_resolver(FeatureGates::default());
		let providers =
			resolver.resolve_with(&AssetRef::native(Chain::Bitcoin), &RemoteGates::default());

		assert_eq!(
			providers,
			vec![SwapProvider::Thorchain, SwapProvider::Mayachain]
		);
	}

	#[test]
	fn test_restricted_locale_suppresses_all_providers() {
		let resolver = create_resolver(FeatureGates {
			swap_restricted: true,
		});
		let providers =
			resolver.resolve_with(&AssetRef::native(Chain::Ethereum), &RemoteGates::default());

		assert!(providers.is_empty());
	}

	#[test]
	fn test_unlisted_ethereum_token_skips_cross_chain_providers() {
		let resolver = create_resolver(FeatureGates::default());
		let obscure = AssetRef::token(Chain::Ethereum, "PEPE", "0x6982508145454ce325ddbe47a25d4ec3d2311933", 18);

		let providers = resolver.resolve_with(&obscure, &RemoteGates::default());

		assert!(!providers.contains(&SwapProvider::Thorchain));
		assert!(!providers.contains(&SwapProvider::Mayachain));
		// DEX aggregators still quote it
		assert!(providers.contains(&SwapProvider::OneInch(Chain::Ethereum)));
		assert!(providers.contains(&SwapProvider::Lifi));
	}

	#[test]
	fn test_allowlisted_token_keeps_cross_chain_providers() {
		let resolver = create_resolver(FeatureGates::default());
		let usdc = AssetRef::token(
			Chain::Ethereum,
			"USDC",
			"0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
			6,
		);

		let providers = resolver.resolve_with(&usdc, &RemoteGates::default());
		assert_eq!(providers.first(), Some(&SwapProvider::Thorchain));
	}

	#[test]
	fn test_remote_disabled_provider_is_filtered() {
		let resolver = create_resolver(FeatureGates::default());
		let remote = RemoteGates {
			disabled_providers: vec!["thorchain".to_string()],
		};

		let providers = resolver.resolve_with(&AssetRef::native(Chain::Bitcoin), &remote);
		assert_eq!(providers, vec![SwapProvider::Mayachain]);
	}

	#[test]
	fn test_unrouted_chain_resolves_empty() {
		let resolver = create_resolver(FeatureGates::default());

		for chain in [Chain::Zcash, Chain::Solana, Chain::Cardano, Chain::Osmosis] {
			let providers =
				resolver.resolve_with(&AssetRef::native(chain), &RemoteGates::default());
			assert!(providers.is_empty(), "{} should have no providers", chain);
		}
	}
}
