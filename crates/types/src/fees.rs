//! Fee estimate model

use crate::chains::ChainFamily;
use serde::{Deserialize, Serialize};

/// Unit a fee estimate was computed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeUnit {
	/// Total of size-in-vbytes x sats-per-vbyte
	PerByte,
	/// Total of gas-units x gas-price
	Gas,
	/// Flat network fee
	Flat,
}

/// A computed network fee for a candidate transaction
///
/// `amount` is in the source chain's smallest fee unit. Estimates are
/// short-lived values owned by the request that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEstimate {
	pub amount: u128,
	pub unit: FeeUnit,
	pub chain_family: ChainFamily,
}

impl FeeEstimate {
	pub fn new(amount: u128, unit: FeeUnit, chain_family: ChainFamily) -> Self {
		Self {
			amount,
			unit,
			chain_family,
		}
	}
}
