/*!
This module defines the hyperparameter grid: for each hyperparameter, the ordered candidate values a grid search evaluated.
*/

use crate::cv_results::{CvResults, CvResultsColumn, PARAM_COLUMN_PREFIX};
use itertools::Itertools;
use std::collections::BTreeMap;
use sweep_finite::{Finite, NotFiniteError, ToFinite};

/// A `ParamValue` is a single candidate value of a hyperparameter, such as `0.1` for `C` or `"rbf"` for `kernel`. Numbers compare by value, so `1` and `1.0` are the same candidate.
#[derive(
	Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(untagged)]
pub enum ParamValue {
	Bool(bool),
	Number(Finite<f64>),
	Text(String),
}

/// These values are considered missing when they appear in a parameter cell.
const INVALID_VALUES: &[&str] = &[
	"", "null", "NULL", "None", "n/a", "N/A", "nan", "-nan", "NaN", "-NaN", "?",
];

impl ParamValue {
	pub fn number(value: f64) -> Result<Self, NotFiniteError> {
		Ok(ParamValue::Number(value.to_finite()?))
	}

	/// Parse a value the way it appears in an exported results table. Returns `None` for missing values.
	pub fn parse(value: &str) -> Option<Self> {
		let value = value.trim();
		if INVALID_VALUES.contains(&value) {
			return None;
		}
		match value {
			"True" | "true" => return Some(ParamValue::Bool(true)),
			"False" | "false" => return Some(ParamValue::Bool(false)),
			_ => {}
		}
		match lexical::parse::<f64, &str>(value).map(Finite::new) {
			Ok(Ok(number)) => Some(ParamValue::Number(number)),
			_ => Some(ParamValue::Text(value.to_owned())),
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			ParamValue::Number(value) => Some(value.get()),
			_ => None,
		}
	}
}

impl std::fmt::Display for ParamValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ParamValue::Bool(value) => write!(f, "{}", value),
			ParamValue::Number(value) => write!(f, "{}", value),
			ParamValue::Text(value) => write!(f, "{}", value),
		}
	}
}

impl From<bool> for ParamValue {
	fn from(value: bool) -> Self {
		ParamValue::Bool(value)
	}
}

impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		ParamValue::Text(value.to_owned())
	}
}

impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		ParamValue::Text(value)
	}
}

impl From<Finite<f64>> for ParamValue {
	fn from(value: Finite<f64>) -> Self {
		ParamValue::Number(value)
	}
}

/**
A `ParamGrid` maps each hyperparameter name to its candidate values. The order of the candidate values is preserved, and it determines the order of the reshaped tables and of the curves drawn from them.

```
use sweep_core::{ParamGrid, ParamValue};

let grid: ParamGrid = serde_json::from_str(r#"{"C": [0.1, 1], "kernel": ["rbf"]}"#).unwrap();
assert_eq!(grid.len(), 2);
assert_eq!(grid.get("kernel"), Some(&[ParamValue::from("rbf")][..]));
```
*/
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ParamGrid {
	params: BTreeMap<String, Vec<ParamValue>>,
}

impl ParamGrid {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a parameter to the grid, replacing any existing candidates with the same name.
	pub fn with_param(mut self, name: impl Into<String>, values: Vec<ParamValue>) -> Self {
		self.params.insert(name.into(), values);
		self
	}

	pub fn get(&self, name: &str) -> Option<&[ParamValue]> {
		self.params.get(name).map(|values| values.as_slice())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.params.contains_key(name)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.params.keys().map(|name| name.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &[ParamValue])> {
		self.params
			.iter()
			.map(|(name, values)| (name.as_str(), values.as_slice()))
	}

	pub fn len(&self) -> usize {
		self.params.len()
	}

	pub fn is_empty(&self) -> bool {
		self.params.is_empty()
	}

	/// Recover the grid from the `param_*` columns of a results table. The candidates of each parameter are its distinct values in order of first appearance.
	pub fn from_cv_results(cv_results: &CvResults) -> Self {
		let params = cv_results
			.columns
			.iter()
			.filter_map(|column| match column {
				CvResultsColumn::Param(column) => {
					let name = column.name.strip_prefix(PARAM_COLUMN_PREFIX)?;
					let values = column.data.iter().flatten().cloned().unique().collect();
					Some((name.to_owned(), values))
				}
				_ => None,
			})
			.collect();
		Self { params }
	}
}

impl<S> std::iter::FromIterator<(S, Vec<ParamValue>)> for ParamGrid
where
	S: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (S, Vec<ParamValue>)>>(iter: I) -> Self {
		Self {
			params: iter
				.into_iter()
				.map(|(name, values)| (name.into(), values))
				.collect(),
		}
	}
}

#[test]
fn test_parse() {
	assert_eq!(ParamValue::parse("0.001"), Some(ParamValue::number(0.001).unwrap()));
	assert_eq!(ParamValue::parse("1"), ParamValue::parse("1.0"));
	assert_eq!(ParamValue::parse("True"), Some(ParamValue::Bool(true)));
	assert_eq!(ParamValue::parse(" rbf "), Some(ParamValue::from("rbf")));
	assert_eq!(ParamValue::parse(""), None);
	assert_eq!(ParamValue::parse("nan"), None);
	assert_eq!(ParamValue::parse("inf"), Some(ParamValue::from("inf")));
}

#[test]
fn test_display() {
	let values = vec![
		ParamValue::number(0.1).unwrap(),
		ParamValue::number(1.0).unwrap(),
		ParamValue::from("rbf"),
		ParamValue::Bool(false),
	];
	let displayed: Vec<String> = values.iter().map(|value| value.to_string()).collect();
	assert_eq!(displayed, vec!["0.1", "1", "rbf", "false"]);
}

#[test]
fn test_deserialize_grid() {
	let grid: ParamGrid = serde_yaml::from_str(
		"
gamma: [0.001, 0.01, 0.1]
C: [0.1, 1]
",
	)
	.unwrap();
	assert_eq!(grid.names().collect::<Vec<_>>(), vec!["C", "gamma"]);
	assert_eq!(
		grid.get("gamma").unwrap(),
		&[
			ParamValue::number(0.001).unwrap(),
			ParamValue::number(0.01).unwrap(),
			ParamValue::number(0.1).unwrap(),
		][..]
	);
	let grid: ParamGrid = serde_yaml::from_str("{fit_intercept: [true, false], kernel: [rbf, linear]}").unwrap();
	assert_eq!(grid.get("fit_intercept").unwrap()[1], ParamValue::Bool(false));
	assert_eq!(grid.get("kernel").unwrap()[1], ParamValue::from("linear"));
}
