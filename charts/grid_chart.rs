/*!
This module turns a [`ReshapedGrid`](../sweep_core/struct.ReshapedGrid.html) into a line chart comparing the tracked metrics across the grid: one curve for every value of the line parameter and every metric, drawn against the values of the x parameter.
*/

use crate::{
	line_chart::{AxisScale, LineChartOptions, LineChartPoint, LineChartSeries, PointStyle},
	style::{ChartStyle, StyleError},
};
use sweep_core::{AxisRoles, ParamGrid, ParamValue, ReshapedGrid};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct GridChartOptions {
	/// Draw the x axis on a logarithmic scale.
	pub log_x: bool,
	pub title: Option<String>,
}

impl Default for GridChartOptions {
	fn default() -> Self {
		Self {
			log_x: true,
			title: None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
	#[error(transparent)]
	Grid(#[from] sweep_core::Error),
	#[error(transparent)]
	Style(#[from] StyleError),
	#[error(
		"the results were reshaped with line parameter {} and x parameter {}, but the chart uses line parameter {} and x parameter {}",
		.reshaped.line, .reshaped.x, .chart.line, .chart.x
	)]
	AxesMismatch {
		reshaped: AxisRoles,
		chart: AxisRoles,
	},
	#[error("the reshaped results have no table for {param} = {value}")]
	MissingTable { param: String, value: ParamValue },
	#[error("the reshaped table for {param} = {value} does not have the x values of the grid")]
	XValuesMismatch { param: String, value: ParamValue },
	#[error("a logarithmic x axis needs numeric values, but {param} has value {value}")]
	LogScaleRequiresNumbers { param: String, value: ParamValue },
	#[error("a logarithmic x axis needs positive values, but {param} has value {value}")]
	LogScaleRequiresPositive { param: String, value: ParamValue },
}

/**
Build the chart for `reshaped`. The curve for each line value and metric is titled `"<line value> <metric label>"`, colored by metric, and styled by line value, with a circle at every point.

`axes` must be the roles `reshaped` was built with. If every x value is a number, the points are placed at those numbers, and otherwise they are placed at their index and labeled with their value. A logarithmic x axis requires positive numbers.
*/
pub fn grid_line_chart(
	reshaped: &ReshapedGrid,
	grid: &ParamGrid,
	axes: &AxisRoles,
	style: &ChartStyle,
	options: &GridChartOptions,
) -> Result<LineChartOptions, ChartError> {
	axes.validate(grid)?;
	if *axes != reshaped.axes {
		return Err(ChartError::AxesMismatch {
			reshaped: reshaped.axes.clone(),
			chart: axes.clone(),
		});
	}
	let line_values = axes.line_values(grid)?;
	let x_values = axes.x_values(grid)?;
	let assignment = style.assign(&reshaped.metrics, line_values)?;

	// Place the x values.
	let numeric_x: Option<Vec<f64>> = x_values.iter().map(|value| value.as_f64()).collect();
	if options.log_x {
		for value in x_values.iter() {
			match value.as_f64() {
				None => {
					return Err(ChartError::LogScaleRequiresNumbers {
						param: axes.x.clone(),
						value: value.clone(),
					})
				}
				Some(x) if x <= 0.0 => {
					return Err(ChartError::LogScaleRequiresPositive {
						param: axes.x.clone(),
						value: value.clone(),
					})
				}
				Some(_) => {}
			}
		}
	}
	let (positions, x_axis_labels) = match numeric_x {
		Some(positions) => (positions, None),
		None => (
			(0..x_values.len()).map(|index| index as f64).collect(),
			Some(x_values.iter().map(|value| value.to_string()).collect()),
		),
	};

	let mut series = Vec::with_capacity(line_values.len() * assignment.metrics.len());
	for line_value in line_values.iter() {
		let table = reshaped
			.table(line_value)
			.ok_or_else(|| ChartError::MissingTable {
				param: axes.line.clone(),
				value: line_value.clone(),
			})?;
		if table.x_values.as_slice() != x_values {
			return Err(ChartError::XValuesMismatch {
				param: axes.line.clone(),
				value: line_value.clone(),
			});
		}
		let line_style = assignment.line_style(line_value);
		for metric in assignment.metrics.iter() {
			let metric_index = reshaped.metric_index(&metric.name);
			let data = x_values
				.iter()
				.zip(positions.iter())
				.map(|(x_value, x)| LineChartPoint {
					x: *x,
					y: metric_index
						.and_then(|metric_index| table.get(x_value, metric_index))
						.filter(|y| y.is_finite()),
				})
				.collect();
			series.push(LineChartSeries {
				color: metric.color.clone(),
				data,
				line_style,
				point_style: Some(PointStyle::Circle),
				title: Some(format!("{} {}", line_value, metric.label)),
			});
		}
	}
	log::debug!(
		"built chart with {} series of {} points",
		series.len(),
		positions.len()
	);

	let title = options.title.clone().or_else(|| {
		reshaped
			.n_folds
			.map(|n_folds| format!("Mean test scores over {} folds", n_folds))
	});
	Ok(LineChartOptions {
		hide_legend: Some(false),
		series,
		title,
		x_axis_labels,
		x_axis_scale: Some(if options.log_x {
			AxisScale::Log
		} else {
			AxisScale::Linear
		}),
		x_axis_title: Some(axes.x.clone()),
		x_max: None,
		x_min: None,
		y_axis_title: Some("score".to_owned()),
		y_max: None,
		y_min: None,
	})
}

#[cfg(test)]
use crate::{line_chart::LineStyle, style::BLUE, style::RED};
#[cfg(test)]
use sweep_core::{reshape, CvResults, CvResultsColumn, NumberColumn, ParamColumn, ReshapeOptions};

#[cfg(test)]
fn param(name: &str, values: Vec<ParamValue>) -> CvResultsColumn {
	CvResultsColumn::Param(ParamColumn {
		name: format!("param_{}", name),
		data: values.into_iter().map(Some).collect(),
	})
}

#[cfg(test)]
fn metric(name: &str, values: &[f64]) -> CvResultsColumn {
	CvResultsColumn::Number(NumberColumn {
		name: format!("mean_test_{}", name),
		data: values.to_owned(),
	})
}

#[cfg(test)]
fn n(value: f64) -> ParamValue {
	ParamValue::number(value).unwrap()
}

#[cfg(test)]
fn svc_results() -> CvResults {
	CvResults::new(vec![
		param("C", vec![n(0.1), n(0.1), n(0.1), n(1.0), n(1.0), n(1.0)]),
		param(
			"gamma",
			vec![n(0.001), n(0.01), n(0.1), n(0.001), n(0.01), n(0.1)],
		),
		metric("accuracy", &[0.61, 0.72, 0.83, 0.64, 0.75, 0.86]),
		metric("recall", &[0.11, 0.22, 0.33, 0.14, 0.25, std::f64::NAN]),
	])
	.unwrap()
}

#[test]
fn test_grid_line_chart() {
	let cv_results = svc_results();
	let grid = ParamGrid::from_cv_results(&cv_results);
	let axes = AxisRoles::infer(&grid).unwrap();
	let reshaped = reshape(&cv_results, &grid, &axes, &ReshapeOptions::default()).unwrap();
	let chart = grid_line_chart(
		&reshaped,
		&grid,
		&axes,
		&ChartStyle::default(),
		&GridChartOptions::default(),
	)
	.unwrap();
	let titles: Vec<&str> = chart
		.series
		.iter()
		.map(|series| series.title.as_deref().unwrap())
		.collect();
	assert_eq!(
		titles,
		vec!["0.1 accuracy", "0.1 recall", "1 accuracy", "1 recall"]
	);
	let colors: Vec<&str> = chart.series.iter().map(|s| s.color.as_str()).collect();
	assert_eq!(colors, vec![RED, BLUE, RED, BLUE]);
	let line_styles: Vec<Option<LineStyle>> = chart.series.iter().map(|s| s.line_style).collect();
	assert_eq!(
		line_styles,
		vec![
			Some(LineStyle::Dashed),
			Some(LineStyle::Dashed),
			Some(LineStyle::Solid),
			Some(LineStyle::Solid),
		]
	);
	assert_eq!(
		chart.series[0].data,
		vec![
			LineChartPoint { x: 0.001, y: Some(0.61) },
			LineChartPoint { x: 0.01, y: Some(0.72) },
			LineChartPoint { x: 0.1, y: Some(0.83) },
		]
	);
	// A NaN score leaves a gap.
	assert_eq!(chart.series[3].data[2].y, None);
	assert_eq!(chart.x_axis_scale, Some(AxisScale::Log));
	assert_eq!(chart.x_axis_title.as_deref(), Some("gamma"));
	assert_eq!(chart.x_axis_labels, None);
}

#[test]
fn test_grid_line_chart_text_x_values() {
	let cv_results = CvResults::new(vec![
		param("C", vec![n(0.1), n(0.1), n(1.0), n(1.0)]),
		param(
			"kernel",
			vec![
				ParamValue::from("linear"),
				ParamValue::from("rbf"),
				ParamValue::from("linear"),
				ParamValue::from("rbf"),
			],
		),
		metric("accuracy", &[0.5, 0.6, 0.7, 0.8]),
	])
	.unwrap();
	let grid = ParamGrid::from_cv_results(&cv_results);
	let axes = AxisRoles::new("C", "kernel");
	let options = ReshapeOptions {
		metrics: vec!["accuracy".to_owned()],
		n_folds: Some(3),
	};
	let reshaped = reshape(&cv_results, &grid, &axes, &options).unwrap();
	let result = grid_line_chart(
		&reshaped,
		&grid,
		&axes,
		&ChartStyle::default(),
		&GridChartOptions::default(),
	);
	assert_eq!(
		result,
		Err(ChartError::LogScaleRequiresNumbers {
			param: "kernel".to_owned(),
			value: ParamValue::from("linear"),
		})
	);
	let chart = grid_line_chart(
		&reshaped,
		&grid,
		&axes,
		&ChartStyle::default(),
		&GridChartOptions {
			log_x: false,
			title: None,
		},
	)
	.unwrap();
	assert_eq!(
		chart.x_axis_labels,
		Some(vec!["linear".to_owned(), "rbf".to_owned()])
	);
	assert_eq!(
		chart.series[1].data,
		vec![
			LineChartPoint { x: 0.0, y: Some(0.7) },
			LineChartPoint { x: 1.0, y: Some(0.8) },
		]
	);
	assert_eq!(chart.title.as_deref(), Some("Mean test scores over 3 folds"));
}

#[test]
fn test_grid_line_chart_rejects_bad_configuration() {
	let cv_results = CvResults::new(vec![
		param("C", vec![n(0.1), n(1.0), n(10.0)]),
		param("gamma", vec![n(0.0), n(0.0), n(0.0)]),
		metric("accuracy", &[0.5, 0.6, 0.7]),
		metric("recall", &[0.5, 0.6, 0.7]),
	])
	.unwrap();
	let grid = ParamGrid::from_cv_results(&cv_results);
	let axes = AxisRoles::new("C", "gamma");
	let reshaped = reshape(&cv_results, &grid, &axes, &ReshapeOptions::default()).unwrap();
	// Three values of C, but only two line styles.
	assert_eq!(
		grid_line_chart(
			&reshaped,
			&grid,
			&axes,
			&ChartStyle::default(),
			&GridChartOptions::default(),
		),
		Err(ChartError::Style(StyleError::LineStylesExhausted {
			needed: 3,
			available: 2,
		}))
	);
	let style = ChartStyle {
		line_styles: vec![LineStyle::Dashed, LineStyle::Solid, LineStyle::Hidden],
		..Default::default()
	};
	assert_eq!(
		grid_line_chart(&reshaped, &grid, &axes, &style, &GridChartOptions::default()),
		Err(ChartError::LogScaleRequiresPositive {
			param: "gamma".to_owned(),
			value: n(0.0),
		})
	);
	// The chart must use the axes the results were reshaped with.
	let error = grid_line_chart(
		&reshaped,
		&grid,
		&AxisRoles::new("gamma", "C"),
		&style,
		&GridChartOptions::default(),
	)
	.unwrap_err();
	insta::assert_snapshot!(error.to_string(), @"the results were reshaped with line parameter C and x parameter gamma, but the chart uses line parameter gamma and x parameter C");
}

#[test]
fn test_grid_line_chart_rejects_other_x_values() {
	let cv_results = svc_results();
	let grid = ParamGrid::from_cv_results(&cv_results);
	let axes = AxisRoles::new("C", "gamma");
	let reshaped = reshape(&cv_results, &grid, &axes, &ReshapeOptions::default()).unwrap();
	// The chart grid lists a gamma the results were not reshaped with.
	let chart_grid = ParamGrid::new()
		.with_param("C", vec![n(0.1), n(1.0)])
		.with_param("gamma", vec![n(0.001), n(0.01), n(0.1), n(1.0)]);
	assert_eq!(
		grid_line_chart(
			&reshaped,
			&chart_grid,
			&axes,
			&ChartStyle::default(),
			&GridChartOptions::default(),
		),
		Err(ChartError::XValuesMismatch {
			param: "C".to_owned(),
			value: n(0.1),
		})
	);
}
