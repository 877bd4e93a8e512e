/*!
This module defines the line chart model. A `LineChartOptions` value describes everything needed to draw a chart, independent of how it is drawn, so it can be rendered to svg or serialized and handed to another renderer.
*/

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineChartOptions {
	pub hide_legend: Option<bool>,
	pub series: Vec<LineChartSeries>,
	pub title: Option<String>,
	/// If present, the tick at x = i is labeled with the i-th label instead of its number.
	pub x_axis_labels: Option<Vec<String>>,
	pub x_axis_scale: Option<AxisScale>,
	pub x_axis_title: Option<String>,
	pub x_max: Option<f64>,
	pub x_min: Option<f64>,
	pub y_axis_title: Option<String>,
	pub y_max: Option<f64>,
	pub y_min: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineChartSeries {
	pub color: String,
	pub data: Vec<LineChartPoint>,
	pub line_style: Option<LineStyle>,
	pub point_style: Option<PointStyle>,
	pub title: Option<String>,
}

/// A point with a missing `y` leaves a gap in its series.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineChartPoint {
	pub x: f64,
	pub y: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineStyle {
	#[serde(rename = "hidden")]
	Hidden,
	#[serde(rename = "solid")]
	Solid,
	#[serde(rename = "dashed")]
	Dashed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PointStyle {
	#[serde(rename = "hidden")]
	Hidden,
	#[serde(rename = "circle")]
	Circle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AxisScale {
	#[serde(rename = "linear")]
	Linear,
	#[serde(rename = "log")]
	Log,
}

impl Default for AxisScale {
	fn default() -> Self {
		AxisScale::Linear
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub x_min: f64,
	pub x_max: f64,
	pub y_min: f64,
	pub y_max: f64,
}

impl LineChartOptions {
	/// Compute the bounds of the chart. Explicit bounds in the options take precedence over the extent of the data. Returns `None` if neither is available.
	pub fn bounds(&self) -> Option<Bounds> {
		let points = || {
			self.series
				.iter()
				.flat_map(|series| series.data.iter())
				.filter(|point| point.x.is_finite())
		};
		let x_min = self.x_min.or_else(|| min(points().map(|point| point.x)))?;
		let x_max = self.x_max.or_else(|| max(points().map(|point| point.x)))?;
		let y_min = self
			.y_min
			.or_else(|| min(points().filter_map(|point| point.y)))?;
		let y_max = self
			.y_max
			.or_else(|| max(points().filter_map(|point| point.y)))?;
		Some(Bounds {
			x_min,
			x_max,
			y_min,
			y_max,
		})
	}
}

fn min(values: impl Iterator<Item = f64>) -> Option<f64> {
	values
		.filter(|value| value.is_finite())
		.fold(None, |min, value| match min {
			Some(min) if min <= value => Some(min),
			_ => Some(value),
		})
}

fn max(values: impl Iterator<Item = f64>) -> Option<f64> {
	values
		.filter(|value| value.is_finite())
		.fold(None, |max, value| match max {
			Some(max) if max >= value => Some(max),
			_ => Some(value),
		})
}

#[test]
fn test_bounds() {
	let chart = LineChartOptions {
		hide_legend: None,
		series: vec![
			LineChartSeries {
				color: "#000000".to_owned(),
				data: vec![
					LineChartPoint { x: 0.01, y: Some(0.5) },
					LineChartPoint { x: 0.1, y: None },
					LineChartPoint { x: 1.0, y: Some(std::f64::NAN) },
				],
				line_style: None,
				point_style: None,
				title: None,
			},
			LineChartSeries {
				color: "#000000".to_owned(),
				data: vec![LineChartPoint { x: 0.001, y: Some(0.75) }],
				line_style: None,
				point_style: None,
				title: None,
			},
		],
		title: None,
		x_axis_labels: None,
		x_axis_scale: None,
		x_axis_title: None,
		x_max: None,
		x_min: None,
		y_axis_title: None,
		y_max: Some(1.0),
		y_min: None,
	};
	assert_eq!(
		chart.bounds(),
		Some(Bounds {
			x_min: 0.001,
			x_max: 1.0,
			y_min: 0.5,
			y_max: 1.0,
		})
	);
}

#[test]
fn test_serialize_line_style() {
	let styles: Vec<LineStyle> = serde_json::from_str(r#"["dashed", "solid", "hidden"]"#).unwrap();
	assert_eq!(
		styles,
		vec![LineStyle::Dashed, LineStyle::Solid, LineStyle::Hidden]
	);
	assert_eq!(serde_json::to_string(&AxisScale::Log).unwrap(), r#""log""#);
}
