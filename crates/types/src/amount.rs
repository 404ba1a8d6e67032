//! Amount model for handling large integers as strings on wire shapes

use serde;

/// Integer amount in an asset's smallest unit, represented as a string
///
/// Provider and explorer APIs exchange amounts as decimal strings to avoid
/// precision loss in JSON; engine arithmetic parses into `u128`, which is
/// wide enough for every fee and output value the supported chains produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount(pub String);

impl Amount {
	/// Create a new amount from a string
	pub fn new(value: String) -> Self {
		Self(value)
	}

	/// Get the raw string value
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Parse into engine-native integer form
	pub fn as_u128(&self) -> Result<u128, std::num::ParseIntError> {
		self.0.parse()
	}

	/// Check if the value is zero
	pub fn is_zero(&self) -> bool {
		!self.0.is_empty() && self.0.chars().all(|c| c == '0')
	}

	/// Validate that the string is a plain non-empty decimal integer
	pub fn validate(&self) -> Result<(), String> {
		if self.0.is_empty() {
			return Err("amount cannot be empty".to_string());
		}

		if !self.0.chars().all(|c| c.is_ascii_digit()) {
			return Err("amount must contain only digits".to_string());
		}

		Ok(())
	}
}

impl std::fmt::Display for Amount {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<u128> for Amount {
	fn from(value: u128) -> Self {
		Self(value.to_string())
	}
}

impl From<u64> for Amount {
	fn from(value: u64) -> Self {
		Self(value.to_string())
	}
}

impl From<&str> for Amount {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

// Serialize/deserialize as a bare JSON string, validating on the way in
impl serde::Serialize for Amount {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}

impl<'de> serde::Deserialize<'de> for Amount {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let value = String::deserialize(deserializer)?;
		let amount = Self(value);
		amount.validate().map_err(serde::de::Error::custom)?;
		Ok(amount)
	}
}
