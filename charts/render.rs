/*!
This module draws a [`LineChartOptions`](../line_chart/struct.LineChartOptions.html) to svg with plotters.
*/

use crate::line_chart::{AxisScale, LineChartOptions, LineChartPoint, LineStyle, PointStyle};
use anyhow::{format_err, Result};
use plotters::{
	coord::{ranged1d::ValueFormatter, types::RangedCoordf64, Shift},
	prelude::*,
};
use std::ops::Range;

const LINE_WIDTH: u32 = 2;
const POINT_SIZE: u32 = 4;

/// Render `chart` to an svg document of the given width and height in pixels.
pub fn render_svg(chart: &LineChartOptions, size: (u32, u32)) -> Result<String> {
	let bounds = chart
		.bounds()
		.ok_or_else(|| format_err!("the chart has no points to draw"))?;
	let scale = chart.x_axis_scale.unwrap_or_default();
	if scale == AxisScale::Log && bounds.x_min <= 0.0 {
		return Err(format_err!(
			"a logarithmic x axis cannot show the value {}",
			bounds.x_min
		));
	}
	let y_range = pad_linear(bounds.y_min, bounds.y_max);
	let mut svg = String::new();
	{
		let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
		root.fill(&WHITE)?;
		match scale {
			AxisScale::Linear => {
				let x_range = pad_linear(bounds.x_min, bounds.x_max);
				draw(&root, chart, RangedCoordf64::from(x_range), y_range)?;
			}
			AxisScale::Log => {
				let x_range = pad_log(bounds.x_min, bounds.x_max);
				let x_range: LogCoord<f64> = x_range.log_scale().into();
				draw(&root, chart, x_range, y_range)?;
			}
		}
		root.present()?;
	}
	log::debug!("rendered {} series to svg", chart.series.len());
	Ok(svg)
}

fn draw<X>(
	root: &DrawingArea<SVGBackend, Shift>,
	chart: &LineChartOptions,
	x_range: X,
	y_range: Range<f64>,
) -> Result<()>
where
	X: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
	let mut builder = ChartBuilder::on(root);
	builder
		.margin(20)
		.x_label_area_size(50)
		.y_label_area_size(60);
	if let Some(title) = chart.title.as_ref() {
		builder.caption(title, ("sans-serif", 24));
	}
	let mut ctx = builder.build_cartesian_2d(x_range, y_range)?;

	let x_axis_labels = chart.x_axis_labels.as_deref();
	let format_x_label = |x: &f64| match x_axis_labels {
		Some(labels) => category_label(labels, *x),
		None => <X as ValueFormatter<f64>>::format(x),
	};
	let mut mesh = ctx.configure_mesh();
	mesh.x_desc(chart.x_axis_title.clone().unwrap_or_default())
		.y_desc(chart.y_axis_title.clone().unwrap_or_default())
		.x_label_formatter(&format_x_label);
	if let Some(labels) = x_axis_labels {
		mesh.x_labels(labels.len());
	}
	mesh.draw()?;

	for series in chart.series.iter() {
		let color = parse_color(&series.color)?;
		let line_style = series.line_style.unwrap_or(LineStyle::Solid);
		let point_style = series.point_style.unwrap_or(PointStyle::Hidden);
		for run in runs(&series.data) {
			match line_style {
				LineStyle::Hidden => {}
				LineStyle::Solid => {
					ctx.draw_series(LineSeries::new(run.clone(), color.stroke_width(LINE_WIDTH)))?;
				}
				LineStyle::Dashed => {
					ctx.draw_series(DashedLineSeries::new(
						run.clone(),
						10,
						5,
						color.stroke_width(LINE_WIDTH),
					))?;
				}
			}
			if point_style == PointStyle::Circle {
				ctx.draw_series(
					run.iter()
						.map(|point| Circle::new(*point, POINT_SIZE, color.filled())),
				)?;
			}
		}
		if let Some(title) = series.title.as_ref() {
			// Draw the legend entry on its own so it is present even if every point is missing.
			let (stroke, gap) = match line_style {
				LineStyle::Hidden => (TRANSPARENT.stroke_width(LINE_WIDTH), 0),
				LineStyle::Solid => (color.stroke_width(LINE_WIDTH), 0),
				LineStyle::Dashed => (color.stroke_width(LINE_WIDTH), 4),
			};
			let marker = match point_style {
				PointStyle::Circle => color.filled(),
				PointStyle::Hidden => TRANSPARENT.filled(),
			};
			ctx.draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
				.label(title)
				.legend(move |(x, y)| {
					EmptyElement::at((x, y))
						+ PathElement::new(vec![(0, 0), (10 - gap, 0)], stroke)
						+ PathElement::new(vec![(10 + gap, 0), (20, 0)], stroke)
						+ Circle::new((10, 0), POINT_SIZE - 1, marker)
				});
		}
	}

	if chart.hide_legend != Some(true) {
		ctx.configure_series_labels()
			.position(SeriesLabelPosition::LowerRight)
			.background_style(WHITE.mix(0.8))
			.border_style(&BLACK)
			.draw()?;
	}
	Ok(())
}

/// Split a series into runs of consecutive points with values. A missing value ends a run.
fn runs(data: &[LineChartPoint]) -> Vec<Vec<(f64, f64)>> {
	let mut runs = Vec::new();
	let mut run = Vec::new();
	for point in data.iter() {
		match point.y.filter(|y| y.is_finite()) {
			Some(y) => run.push((point.x, y)),
			None => {
				if !run.is_empty() {
					runs.push(std::mem::take(&mut run));
				}
			}
		}
	}
	if !run.is_empty() {
		runs.push(run);
	}
	runs
}

fn category_label(labels: &[String], x: f64) -> String {
	let index = x.round();
	if (x - index).abs() > 1e-6 || index < 0.0 {
		return String::new();
	}
	labels.get(index as usize).cloned().unwrap_or_default()
}

fn pad_linear(min: f64, max: f64) -> Range<f64> {
	let padding = if max > min { (max - min) * 0.05 } else { 0.5 };
	min - padding..max + padding
}

fn pad_log(min: f64, max: f64) -> Range<f64> {
	let factor = if max > min {
		(max / min).powf(0.05)
	} else {
		2.0
	};
	min / factor..max * factor
}

/// Parse a color of the form `#rrggbb`.
pub fn parse_color(color: &str) -> Result<RGBColor> {
	let hex = color
		.strip_prefix('#')
		.filter(|hex| hex.len() == 6 && hex.is_ascii())
		.ok_or_else(|| format_err!("invalid color \"{}\"", color))?;
	let channel = |index: usize| {
		u8::from_str_radix(&hex[index..index + 2], 16)
			.map_err(|_| format_err!("invalid color \"{}\"", color))
	};
	Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
use crate::line_chart::LineChartSeries;

#[cfg(test)]
fn test_chart(x_axis_scale: AxisScale) -> LineChartOptions {
	let series = |title: &str, color: &str, line_style: LineStyle, ys: [Option<f64>; 3]| LineChartSeries {
		color: color.to_owned(),
		data: [0.01, 0.1, 1.0]
			.iter()
			.zip(ys.iter())
			.map(|(x, y)| LineChartPoint { x: *x, y: *y })
			.collect(),
		line_style: Some(line_style),
		point_style: Some(PointStyle::Circle),
		title: Some(title.to_owned()),
	};
	LineChartOptions {
		hide_legend: None,
		series: vec![
			series(
				"0.1 accuracy",
				"#FF3B30",
				LineStyle::Dashed,
				[Some(0.6), Some(0.7), Some(0.8)],
			),
			series(
				"1 accuracy",
				"#0A84FF",
				LineStyle::Solid,
				[Some(0.65), None, Some(0.9)],
			),
		],
		title: Some("Mean test scores over 5 folds".to_owned()),
		x_axis_labels: None,
		x_axis_scale: Some(x_axis_scale),
		x_axis_title: Some("gamma".to_owned()),
		x_max: None,
		x_min: None,
		y_axis_title: Some("score".to_owned()),
		y_max: None,
		y_min: None,
	}
}

#[test]
fn test_render_svg() {
	for scale in [AxisScale::Linear, AxisScale::Log].iter() {
		let svg = render_svg(&test_chart(*scale), (800, 400)).unwrap();
		assert!(svg.contains("<svg"));
		assert!(svg.contains("0.1 accuracy"));
		assert!(svg.contains("1 accuracy"));
		assert!(svg.contains("Mean test scores over 5 folds"));
	}
}

#[test]
fn test_render_svg_errors() {
	let mut chart = test_chart(AxisScale::Log);
	chart.series[0].color = "red".to_owned();
	assert!(render_svg(&chart, (800, 400)).is_err());
	let mut chart = test_chart(AxisScale::Log);
	chart.series.clear();
	assert!(render_svg(&chart, (800, 400)).is_err());
	let mut chart = test_chart(AxisScale::Log);
	chart.x_min = Some(0.0);
	assert!(render_svg(&chart, (800, 400)).is_err());
}

#[test]
fn test_runs() {
	let data = vec![
		LineChartPoint { x: 1.0, y: Some(0.1) },
		LineChartPoint { x: 2.0, y: None },
		LineChartPoint { x: 3.0, y: Some(0.3) },
		LineChartPoint { x: 4.0, y: Some(std::f64::NAN) },
		LineChartPoint { x: 5.0, y: Some(0.5) },
		LineChartPoint { x: 6.0, y: Some(0.6) },
	];
	assert_eq!(
		runs(&data),
		vec![vec![(1.0, 0.1)], vec![(3.0, 0.3)], vec![(5.0, 0.5), (6.0, 0.6)]]
	);
}

#[test]
fn test_parse_color() {
	assert_eq!(parse_color("#FF3B30").unwrap(), RGBColor(0xFF, 0x3B, 0x30));
	assert!(parse_color("#FF3B3").is_err());
	assert!(parse_color("#GG0000").is_err());
}

#[test]
fn test_category_label() {
	let labels = vec!["linear".to_owned(), "rbf".to_owned()];
	assert_eq!(category_label(&labels, 1.0), "rbf");
	assert_eq!(category_label(&labels, 0.5), "");
	assert_eq!(category_label(&labels, 2.0), "");
}
