/*!
This crate draws the results of a two dimensional grid search as a chart comparing each tracked metric across the values of both parameters. [`grid_line_chart`](fn.grid_line_chart.html) builds a renderer independent [`LineChartOptions`](struct.LineChartOptions.html) from a reshaped grid, and [`render_svg`](fn.render_svg.html) draws it.
*/

#![allow(clippy::tabs_in_doc_comments)]

mod grid_chart;
mod line_chart;
mod render;
mod style;

pub use self::grid_chart::{grid_line_chart, ChartError, GridChartOptions};
pub use self::line_chart::{
	AxisScale, Bounds, LineChartOptions, LineChartPoint, LineChartSeries, LineStyle, PointStyle,
};
pub use self::render::{parse_color, render_svg};
pub use self::style::{
	AssignedMetric, ChartStyle, MetricStyle, StyleAssignment, StyleError, BLUE, GREEN, ORANGE,
	PURPLE, RED,
};
