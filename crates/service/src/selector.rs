//! Route selection over aggregated quotes

use chainflow_types::{Quote, SwapProvider};
use tracing::debug;

/// Pick the winning quote by net output after fees
///
/// Ties break toward the provider listed earlier in the eligibility
/// resolver's declared order, which makes selection deterministic even
/// though aggregation returns results in completion order. An empty
/// candidate list is "no route", not an error.
pub fn select_route(quotes: &[Quote], priority_order: &[SwapProvider]) -> Option<Quote> {
	let priority_index = |provider: SwapProvider| {
		priority_order
			.iter()
			.position(|p| *p == provider)
			.unwrap_or(usize::MAX)
	};

	let winner = quotes.iter().max_by(|a, b| {
		a.net_output()
			.cmp(&b.net_output())
			// Lower priority index wins the tie
			.then_with(|| priority_index(b.provider).cmp(&priority_index(a.provider)))
	})?;

	debug!(
		"Selected route via {} with net output {}",
		winner.provider,
		winner.net_output()
	);

	Some(winner.clone())
}
