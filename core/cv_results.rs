/*!
This module defines `CvResults`, the flat table of results a grid search produces. It has one row per evaluated combination of hyperparameters and one column per recorded quantity: the tested value of each parameter (`param_C`), the mean score for each metric (`mean_test_accuracy`), the score on each fold (`split0_test_accuracy`), and so on.
*/

use crate::{error::Error, grid::ParamValue};

pub const PARAM_COLUMN_PREFIX: &str = "param_";

/// The name of the column holding the tested value of `param`.
pub fn param_column_name(param: &str) -> String {
	format!("{}{}", PARAM_COLUMN_PREFIX, param)
}

/// The name of the column holding the mean test score of `metric` across folds.
pub fn mean_test_column_name(metric: &str) -> String {
	format!("mean_test_{}", metric)
}

pub fn rank_test_column_name(metric: &str) -> String {
	format!("rank_test_{}", metric)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CvResults {
	pub columns: Vec<CvResultsColumn>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CvResultsColumn {
	Param(ParamColumn),
	Number(NumberColumn),
	Text(TextColumn),
}

/// A column of tested parameter values. A value is `None` where the parameter did not apply to the row.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamColumn {
	pub name: String,
	pub data: Vec<Option<ParamValue>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NumberColumn {
	pub name: String,
	pub data: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextColumn {
	pub name: String,
	pub data: Vec<String>,
}

impl CvResultsColumn {
	pub fn name(&self) -> &str {
		match self {
			CvResultsColumn::Param(column) => &column.name,
			CvResultsColumn::Number(column) => &column.name,
			CvResultsColumn::Text(column) => &column.name,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			CvResultsColumn::Param(column) => column.data.len(),
			CvResultsColumn::Number(column) => column.data.len(),
			CvResultsColumn::Text(column) => column.data.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn kind(&self) -> &'static str {
		match self {
			CvResultsColumn::Param(_) => "param",
			CvResultsColumn::Number(_) => "number",
			CvResultsColumn::Text(_) => "text",
		}
	}
}

impl CvResults {
	/// Create a results table, checking that the column names are unique and that every column has the same number of rows.
	pub fn new(columns: Vec<CvResultsColumn>) -> Result<Self, Error> {
		for (index, column) in columns.iter().enumerate() {
			if columns[..index]
				.iter()
				.any(|other| other.name() == column.name())
			{
				return Err(Error::DuplicateColumn(column.name().to_owned()));
			}
		}
		if let Some(first) = columns.first() {
			let expected = first.len();
			if let Some(column) = columns.iter().find(|column| column.len() != expected) {
				return Err(Error::RaggedColumns {
					name: column.name().to_owned(),
					len: column.len(),
					expected,
				});
			}
		}
		Ok(Self { columns })
	}

	pub fn nrows(&self) -> usize {
		self.columns.first().map(|column| column.len()).unwrap_or(0)
	}

	pub fn ncols(&self) -> usize {
		self.columns.len()
	}

	pub fn column(&self, name: &str) -> Option<&CvResultsColumn> {
		self.columns.iter().find(|column| column.name() == name)
	}

	/// The names of the parameters that have a `param_*` column.
	pub fn param_names(&self) -> impl Iterator<Item = &str> {
		self.columns.iter().filter_map(|column| match column {
			CvResultsColumn::Param(column) => column.name.strip_prefix(PARAM_COLUMN_PREFIX),
			_ => None,
		})
	}

	/// Retrieve the tested values of `param`.
	pub fn param_column(&self, param: &str) -> Result<&[Option<ParamValue>], Error> {
		let name = param_column_name(param);
		match self.column(&name) {
			Some(CvResultsColumn::Param(column)) => Ok(&column.data),
			Some(column) => Err(Error::ColumnKind {
				name,
				expected: "param",
				actual: column.kind(),
			}),
			None => Err(Error::MissingColumn(name)),
		}
	}

	pub fn number_column(&self, name: &str) -> Result<&[f64], Error> {
		match self.column(name) {
			Some(CvResultsColumn::Number(column)) => Ok(&column.data),
			Some(column) => Err(Error::ColumnKind {
				name: name.to_owned(),
				expected: "number",
				actual: column.kind(),
			}),
			None => Err(Error::MissingColumn(name.to_owned())),
		}
	}

	/// Retrieve the mean test score of `metric` for each row.
	pub fn metric_column(&self, metric: &str) -> Result<&[f64], Error> {
		self.number_column(&mean_test_column_name(metric))
	}

	/// Count the per-fold score columns `split<k>_test_<metric>`, which is the number of folds the search used.
	pub fn n_splits(&self, metric: &str) -> usize {
		let suffix = format!("_test_{}", metric);
		self.columns
			.iter()
			.filter(|column| {
				column
					.name()
					.strip_prefix("split")
					.and_then(|rest| rest.strip_suffix(suffix.as_str()))
					.map(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
					.unwrap_or(false)
			})
			.count()
	}
}

#[cfg(test)]
pub(crate) fn number(value: f64) -> ParamValue {
	ParamValue::number(value).unwrap()
}

#[cfg(test)]
pub(crate) fn param_column(name: &str, data: &[f64]) -> CvResultsColumn {
	CvResultsColumn::Param(ParamColumn {
		name: param_column_name(name),
		data: data.iter().map(|value| Some(number(*value))).collect(),
	})
}

#[cfg(test)]
pub(crate) fn number_column(name: &str, data: &[f64]) -> CvResultsColumn {
	CvResultsColumn::Number(NumberColumn {
		name: name.to_owned(),
		data: data.to_owned(),
	})
}

#[test]
fn test_new_rejects_ragged_columns() {
	let result = CvResults::new(vec![
		param_column("C", &[0.1, 1.0]),
		number_column("mean_test_accuracy", &[0.9]),
	]);
	assert_eq!(
		result,
		Err(Error::RaggedColumns {
			name: "mean_test_accuracy".to_owned(),
			len: 1,
			expected: 2,
		})
	);
}

#[test]
fn test_new_rejects_duplicate_columns() {
	let result = CvResults::new(vec![
		param_column("C", &[0.1]),
		param_column("C", &[1.0]),
	]);
	assert_eq!(result, Err(Error::DuplicateColumn("param_C".to_owned())));
}

#[test]
fn test_column_lookup() {
	let cv_results = CvResults::new(vec![
		param_column("C", &[0.1, 1.0]),
		number_column("mean_test_accuracy", &[0.8, 0.9]),
		number_column("split0_test_accuracy", &[0.8, 0.9]),
		number_column("split1_test_accuracy", &[0.8, 0.9]),
		number_column("split0_test_recall", &[0.8, 0.9]),
		number_column("splitx_test_accuracy", &[0.8, 0.9]),
	])
	.unwrap();
	assert_eq!(cv_results.nrows(), 2);
	assert_eq!(cv_results.param_names().collect::<Vec<_>>(), vec!["C"]);
	assert_eq!(cv_results.metric_column("accuracy").unwrap(), &[0.8, 0.9]);
	assert_eq!(
		cv_results.metric_column("recall"),
		Err(Error::MissingColumn("mean_test_recall".to_owned()))
	);
	assert_eq!(
		cv_results.param_column("accuracy"),
		Err(Error::MissingColumn("param_accuracy".to_owned()))
	);
	assert!(matches!(
		cv_results.number_column("param_C"),
		Err(Error::ColumnKind { .. })
	));
	assert_eq!(cv_results.n_splits("accuracy"), 2);
	assert_eq!(cv_results.n_splits("recall"), 1);
}
