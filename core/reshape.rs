/*!
This module reshapes the flat results table of a two dimensional grid search into one small table per value of the line parameter. Each table has a row for every value of the x parameter and a column for every tracked metric, which is the shape needed to draw one curve per line value per metric.
*/

use crate::{
	axes::AxisRoles,
	cv_results::CvResults,
	error::Error,
	grid::{ParamGrid, ParamValue},
};
use fnv::FnvHashMap;
use ndarray::prelude::*;

/// These are the metrics tracked when none are specified.
pub const DEFAULT_METRICS: &[&str] = &["accuracy", "recall"];

#[derive(Clone, Debug, PartialEq)]
pub struct ReshapeOptions {
	/// The metrics to read. Each metric is read from the column `mean_test_<metric>`.
	pub metrics: Vec<String>,
	/// The number of cross validation folds the search used. It does not affect reshaping and is carried through to the output.
	pub n_folds: Option<usize>,
}

impl Default for ReshapeOptions {
	fn default() -> Self {
		Self {
			metrics: DEFAULT_METRICS
				.iter()
				.map(|metric| (*metric).to_owned())
				.collect(),
			n_folds: None,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReshapedGrid {
	pub axes: AxisRoles,
	pub metrics: Vec<String>,
	pub n_folds: Option<usize>,
	/// One table per value of the line parameter, in grid order.
	pub tables: Vec<MetricTable>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MetricTable {
	pub line_value: ParamValue,
	/// The values of the x parameter, in grid order.
	pub x_values: Vec<ParamValue>,
	/// The shape of `values` is x_values x metrics.
	pub values: Array2<f64>,
}

impl ReshapedGrid {
	pub fn table(&self, line_value: &ParamValue) -> Option<&MetricTable> {
		self.tables
			.iter()
			.find(|table| table.line_value == *line_value)
	}

	pub fn metric_index(&self, metric: &str) -> Option<usize> {
		self.metrics.iter().position(|m| m == metric)
	}

	/// Retrieve the value of `metric` for a single combination of parameter values.
	pub fn get(&self, line_value: &ParamValue, x_value: &ParamValue, metric: &str) -> Option<f64> {
		let metric_index = self.metric_index(metric)?;
		self.table(line_value)?.get(x_value, metric_index)
	}

	/// The total number of populated cells, which is line values x x values x metrics.
	pub fn n_cells(&self) -> usize {
		self.tables.iter().map(|table| table.values.len()).sum()
	}
}

impl MetricTable {
	pub fn get(&self, x_value: &ParamValue, metric_index: usize) -> Option<f64> {
		let row = self.x_values.iter().position(|value| value == x_value)?;
		self.values.get((row, metric_index)).cloned()
	}

	/// The values of a single metric, one for each x value.
	pub fn column(&self, metric_index: usize) -> ArrayView1<f64> {
		self.values.column(metric_index)
	}
}

/**
Reshape `cv_results` into one table per value of the line parameter.

Every combination of a line value and an x value listed in `grid` must match exactly one row of `cv_results`, where a row matches if its `param_<line>` and `param_<x>` values are equal to the combination. If no row matches, this returns `Error::MissingRow`, and if more than one row matches, it returns `Error::DuplicateRows`. The grid must list exactly the values that were searched.
*/
pub fn reshape(
	cv_results: &CvResults,
	grid: &ParamGrid,
	axes: &AxisRoles,
	options: &ReshapeOptions,
) -> Result<ReshapedGrid, Error> {
	axes.validate(grid)?;
	if options.metrics.is_empty() {
		return Err(Error::NoMetrics);
	}
	let line_values = axes.line_values(grid)?;
	let x_values = axes.x_values(grid)?;
	let line_column = cv_results.param_column(&axes.line)?;
	let x_column = cv_results.param_column(&axes.x)?;
	let metric_columns = options
		.metrics
		.iter()
		.map(|metric| cv_results.metric_column(metric))
		.collect::<Result<Vec<_>, _>>()?;

	// Index the rows by the combination of values they were evaluated with.
	let mut rows: FnvHashMap<(&ParamValue, &ParamValue), Vec<usize>> = FnvHashMap::default();
	for (row, (line_value, x_value)) in line_column.iter().zip(x_column.iter()).enumerate() {
		if let (Some(line_value), Some(x_value)) = (line_value, x_value) {
			rows.entry((line_value, x_value)).or_default().push(row);
		}
	}

	let tables = line_values
		.iter()
		.map(|line_value| {
			let mut values = Array2::zeros((x_values.len(), metric_columns.len()));
			for (x_index, x_value) in x_values.iter().enumerate() {
				let matching_rows = rows
					.get(&(line_value, x_value))
					.map(|rows| rows.as_slice())
					.unwrap_or(&[]);
				let row = match matching_rows {
					[row] => *row,
					[] => {
						return Err(Error::MissingRow {
							line_param: axes.line.clone(),
							line_value: line_value.clone(),
							x_param: axes.x.clone(),
							x_value: x_value.clone(),
						})
					}
					_ => {
						return Err(Error::DuplicateRows {
							line_param: axes.line.clone(),
							line_value: line_value.clone(),
							x_param: axes.x.clone(),
							x_value: x_value.clone(),
							count: matching_rows.len(),
						})
					}
				};
				for (metric_index, column) in metric_columns.iter().enumerate() {
					values[(x_index, metric_index)] = column[row];
				}
			}
			Ok(MetricTable {
				line_value: line_value.clone(),
				x_values: x_values.to_owned(),
				values,
			})
		})
		.collect::<Result<Vec<_>, Error>>()?;

	log::debug!(
		"reshaped {} rows into {} tables of {} x {} values",
		cv_results.nrows(),
		tables.len(),
		x_values.len(),
		options.metrics.len(),
	);

	Ok(ReshapedGrid {
		axes: axes.clone(),
		metrics: options.metrics.clone(),
		n_folds: options.n_folds,
		tables,
	})
}

#[cfg(test)]
use crate::cv_results::{number, number_column, param_column};

#[cfg(test)]
fn svc_grid() -> ParamGrid {
	ParamGrid::new()
		.with_param("C", vec![number(0.1), number(1.0)])
		.with_param("gamma", vec![number(0.001), number(0.01), number(0.1)])
}

#[cfg(test)]
fn svc_results() -> CvResults {
	CvResults::new(vec![
		param_column("C", &[0.1, 0.1, 0.1, 1.0, 1.0, 1.0]),
		param_column("gamma", &[0.001, 0.01, 0.1, 0.001, 0.01, 0.1]),
		number_column("mean_test_accuracy", &[0.61, 0.72, 0.83, 0.64, 0.75, 0.86]),
		number_column("mean_test_recall", &[0.11, 0.22, 0.33, 0.14, 0.25, 0.36]),
	])
	.unwrap()
}

#[test]
fn test_reshape() {
	let grid = svc_grid();
	let axes = AxisRoles::infer(&grid).unwrap();
	let reshaped = reshape(&svc_results(), &grid, &axes, &ReshapeOptions::default()).unwrap();
	assert_eq!(reshaped.tables.len(), 2);
	assert_eq!(reshaped.n_cells(), 2 * 3 * 2);
	let line_values: Vec<String> = reshaped
		.tables
		.iter()
		.map(|table| table.line_value.to_string())
		.collect();
	assert_eq!(line_values, vec!["0.1", "1"]);
	for table in reshaped.tables.iter() {
		assert_eq!(
			table.x_values,
			vec![number(0.001), number(0.01), number(0.1)]
		);
	}
	assert_eq!(
		reshaped.table(&number(0.1)).unwrap().values,
		arr2(&[[0.61, 0.11], [0.72, 0.22], [0.83, 0.33]])
	);
	assert_eq!(
		reshaped.get(&number(1.0), &number(0.01), "recall"),
		Some(0.25)
	);
	assert_eq!(
		reshaped.table(&number(1.0)).unwrap().column(0).to_vec(),
		vec![0.64, 0.75, 0.86]
	);
}

#[test]
fn test_reshape_ignores_row_order() {
	let grid = svc_grid();
	let shuffled = CvResults::new(vec![
		param_column("gamma", &[0.1, 0.001, 0.01, 0.01, 0.1, 0.001]),
		param_column("C", &[1.0, 0.1, 1.0, 0.1, 0.1, 1.0]),
		number_column("mean_test_accuracy", &[0.86, 0.61, 0.75, 0.72, 0.83, 0.64]),
		number_column("mean_test_recall", &[0.36, 0.11, 0.25, 0.22, 0.33, 0.14]),
	])
	.unwrap();
	let axes = AxisRoles::new("C", "gamma");
	let options = ReshapeOptions::default();
	assert_eq!(
		reshape(&shuffled, &grid, &axes, &options),
		reshape(&svc_results(), &grid, &axes, &options)
	);
}

#[test]
fn test_reshape_is_idempotent() {
	let grid = svc_grid();
	let axes = AxisRoles::new("C", "gamma");
	let options = ReshapeOptions {
		n_folds: Some(5),
		..Default::default()
	};
	let first = reshape(&svc_results(), &grid, &axes, &options).unwrap();
	let second = reshape(&svc_results(), &grid, &axes, &options).unwrap();
	assert_eq!(first, second);
	assert_eq!(first.n_folds, Some(5));
}

#[test]
fn test_reshape_with_explicit_axes() {
	let grid = svc_grid();
	let axes = AxisRoles::new("gamma", "C");
	let options = ReshapeOptions {
		metrics: vec!["accuracy".to_owned()],
		n_folds: None,
	};
	let reshaped = reshape(&svc_results(), &grid, &axes, &options).unwrap();
	assert_eq!(reshaped.tables.len(), 3);
	assert_eq!(
		reshaped.table(&number(0.1)).unwrap().values,
		arr2(&[[0.83], [0.86]])
	);
}

#[test]
fn test_reshape_missing_row() {
	let grid = ParamGrid::new()
		.with_param("C", vec![number(0.1), number(1.0)])
		.with_param("gamma", vec![number(0.001), number(0.01), number(10.0)]);
	let axes = AxisRoles::infer(&grid).unwrap();
	let result = reshape(&svc_results(), &grid, &axes, &ReshapeOptions::default());
	assert_eq!(
		result,
		Err(Error::MissingRow {
			line_param: "C".to_owned(),
			line_value: number(0.1),
			x_param: "gamma".to_owned(),
			x_value: number(10.0),
		})
	);
	insta::assert_snapshot!(result.unwrap_err().to_string(), @"no result row has C = 0.1 and gamma = 10");
}

#[test]
fn test_reshape_duplicate_rows() {
	let grid = ParamGrid::new()
		.with_param("C", vec![number(0.1), number(1.0)])
		.with_param("gamma", vec![number(0.01)]);
	let cv_results = CvResults::new(vec![
		param_column("C", &[0.1, 0.1, 1.0]),
		param_column("gamma", &[0.01, 0.01, 0.01]),
		number_column("mean_test_accuracy", &[0.5, 0.6, 0.7]),
		number_column("mean_test_recall", &[0.5, 0.6, 0.7]),
	])
	.unwrap();
	let result = reshape(
		&cv_results,
		&grid,
		&AxisRoles::new("C", "gamma"),
		&ReshapeOptions::default(),
	);
	assert!(matches!(result, Err(Error::DuplicateRows { count: 2, .. })));
}

#[test]
fn test_reshape_missing_metric_column() {
	let grid = svc_grid();
	let options = ReshapeOptions {
		metrics: vec!["accuracy".to_owned(), "precision".to_owned()],
		n_folds: None,
	};
	let result = reshape(&svc_results(), &grid, &AxisRoles::new("C", "gamma"), &options);
	assert_eq!(
		result,
		Err(Error::MissingColumn("mean_test_precision".to_owned()))
	);
	let options = ReshapeOptions {
		metrics: vec![],
		n_folds: None,
	};
	let result = reshape(&svc_results(), &grid, &AxisRoles::new("C", "gamma"), &options);
	assert_eq!(result, Err(Error::NoMetrics));
}
