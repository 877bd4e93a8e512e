/*!
This crate provides the `Finite` type, which is used to indicate that a floating point number is not infinite and not `NaN`. Because `Finite` values implement `Eq`, `Ord`, and `Hash`, hyperparameter values like a learning rate of `0.01` can be used as map keys and compared exactly.

# Example

```
use sweep_finite::Finite;

let n = Finite::<f64>::new(0.01).unwrap();
assert!(Finite::new(n.get() / 0.0).is_err());
```

*/

#![allow(clippy::tabs_in_doc_comments)]

use num_traits::Float;
use std::{
	cmp::{Ord, Ordering},
	hash::{Hash, Hasher},
};
use thiserror::Error;

/**
The `Finite` type is used to indicate that a floating point number is not infinite and not NaN. Negative zero is stored as positive zero so that equal values always hash equally.
*/
#[derive(Clone, Copy, Debug)]
pub struct Finite<T>(T)
where
	T: Float;

/// An error type indicating that the number is not finite.
#[derive(Debug, Error)]
#[error("not finite")]
pub struct NotFiniteError;

impl<T> Finite<T>
where
	T: Float,
{
	pub fn new(value: T) -> Result<Self, NotFiniteError> {
		if !value.is_finite() {
			return Err(NotFiniteError);
		}
		if value.is_zero() {
			Ok(Self(T::zero()))
		} else {
			Ok(Self(value))
		}
	}

	pub fn get(self) -> T {
		self.0
	}
}

impl<T> std::ops::Deref for Finite<T>
where
	T: Float,
{
	type Target = T;
	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl<T> std::fmt::Display for Finite<T>
where
	T: Float + std::fmt::Display,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl<T> PartialEq for Finite<T>
where
	T: Float,
{
	fn eq(&self, other: &Self) -> bool {
		self.0.eq(&other.0)
	}
}

impl<T> Eq for Finite<T> where T: Float {}

impl<T> PartialOrd for Finite<T>
where
	T: Float,
{
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl<T> Ord for Finite<T>
where
	T: Float,
{
	fn cmp(&self, other: &Self) -> Ordering {
		// Neither value can be NaN, so the partial comparison is total.
		self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
	}
}

impl Hash for Finite<f32> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.to_bits().hash(state);
	}
}

impl Hash for Finite<f64> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.to_bits().hash(state);
	}
}

impl<T> serde::Serialize for Finite<T>
where
	T: Float + serde::Serialize,
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		self.0.serialize(serializer)
	}
}

impl<'de, T> serde::Deserialize<'de> for Finite<T>
where
	T: Float + serde::Deserialize<'de>,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let value = T::deserialize(deserializer)?;
		Finite::new(value).map_err(serde::de::Error::custom)
	}
}

/// Use this trait to conveniently convert a floating point number to its `Finite` counterpart.
pub trait ToFinite<T>
where
	T: Float,
{
	/// If the value is finite, return Ok(Finite(self)), otherwise return an error.
	fn to_finite(self) -> Result<Finite<T>, NotFiniteError>;
}

impl<T> ToFinite<T> for T
where
	T: Float,
{
	fn to_finite(self) -> Result<Finite<T>, NotFiniteError> {
		Finite::new(self)
	}
}

#[test]
fn test_rejects_non_finite() {
	assert!(Finite::new(f64::NAN).is_err());
	assert!(Finite::new(f64::INFINITY).is_err());
	assert!(Finite::new(f64::NEG_INFINITY).is_err());
	assert_eq!(Finite::new(0.5f64).unwrap().get(), 0.5);
}

#[test]
fn test_negative_zero_hashes_like_zero() {
	use std::collections::hash_map::DefaultHasher;
	let hash = |value: Finite<f64>| {
		let mut hasher = DefaultHasher::new();
		value.hash(&mut hasher);
		hasher.finish()
	};
	let zero = Finite::new(0.0f64).unwrap();
	let negative_zero = Finite::new(-0.0f64).unwrap();
	assert_eq!(zero, negative_zero);
	assert_eq!(hash(zero), hash(negative_zero));
}

#[test]
fn test_deserialize() {
	let value: Finite<f64> = serde_json::from_str("0.001").unwrap();
	assert_eq!(value.get(), 0.001);
	let value: Finite<f64> = serde_json::from_str("10").unwrap();
	assert_eq!(value.get(), 10.0);
	let mut values: Vec<Finite<f64>> = serde_json::from_str("[3, 1, 2]").unwrap();
	values.sort();
	assert_eq!(
		values.iter().map(|value| value.get()).collect::<Vec<_>>(),
		vec![1.0, 2.0, 3.0]
	);
}
