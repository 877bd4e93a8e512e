use crate::line_chart::LineStyle;
use sweep_core::ParamValue;
use thiserror::Error;

pub const RED: &str = "#FF3B30";
pub const BLUE: &str = "#0A84FF";
pub const GREEN: &str = "#30D158";
pub const ORANGE: &str = "#FF9F0A";
pub const PURPLE: &str = "#BF5AF2";

/**
`ChartStyle` declares how the curves of a grid chart are told apart. Each metric gets a color and each value of the line parameter gets a line style. Metrics listed in `metrics` use their declared label and color, and the remaining metrics take colors from `colors` in order. Styles are never reused: if there are more metrics than colors or more line values than line styles, [`assign`](#method.assign) fails.
*/
#[derive(Clone, Debug, PartialEq)]
pub struct ChartStyle {
	pub metrics: Vec<MetricStyle>,
	pub colors: Vec<String>,
	pub line_styles: Vec<LineStyle>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MetricStyle {
	pub name: String,
	pub label: Option<String>,
	pub color: Option<String>,
}

impl Default for ChartStyle {
	fn default() -> Self {
		Self {
			metrics: Vec::new(),
			colors: vec![RED.to_owned(), BLUE.to_owned()],
			line_styles: vec![LineStyle::Dashed, LineStyle::Solid],
		}
	}
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
	#[error("{needed} line values need distinct line styles, but only {available} are available")]
	LineStylesExhausted { needed: usize, available: usize },
	#[error("{needed} metrics need distinct colors, but only {available} are available")]
	ColorsExhausted { needed: usize, available: usize },
}

/// The result of [`ChartStyle::assign`](struct.ChartStyle.html#method.assign): a style for every metric and every line value, sized to exactly the metrics and values being drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleAssignment {
	pub metrics: Vec<AssignedMetric>,
	pub line_styles: Vec<(ParamValue, LineStyle)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssignedMetric {
	pub name: String,
	pub label: String,
	pub color: String,
}

impl ChartStyle {
	pub fn assign(
		&self,
		metrics: &[String],
		line_values: &[ParamValue],
	) -> Result<StyleAssignment, StyleError> {
		if line_values.len() > self.line_styles.len() {
			return Err(StyleError::LineStylesExhausted {
				needed: line_values.len(),
				available: self.line_styles.len(),
			});
		}
		let needed_colors = metrics
			.iter()
			.filter(|metric| {
				self.metric_style(metric)
					.and_then(|style| style.color.as_ref())
					.is_none()
			})
			.count();
		if needed_colors > self.colors.len() {
			return Err(StyleError::ColorsExhausted {
				needed: needed_colors,
				available: self.colors.len(),
			});
		}
		let mut palette = self.colors.iter();
		let metrics = metrics
			.iter()
			.map(|metric| {
				let style = self.metric_style(metric);
				let label = style
					.and_then(|style| style.label.clone())
					.unwrap_or_else(|| metric.clone());
				let color = match style.and_then(|style| style.color.clone()) {
					Some(color) => color,
					// The palette was checked to have a color for every metric without one.
					None => palette.next().cloned().unwrap_or_default(),
				};
				AssignedMetric {
					name: metric.clone(),
					label,
					color,
				}
			})
			.collect();
		let line_styles = line_values
			.iter()
			.cloned()
			.zip(self.line_styles.iter().cloned())
			.collect();
		Ok(StyleAssignment {
			metrics,
			line_styles,
		})
	}

	fn metric_style(&self, metric: &str) -> Option<&MetricStyle> {
		self.metrics.iter().find(|style| style.name == metric)
	}
}

impl StyleAssignment {
	pub fn line_style(&self, line_value: &ParamValue) -> Option<LineStyle> {
		self.line_styles
			.iter()
			.find(|(value, _)| value == line_value)
			.map(|(_, line_style)| *line_style)
	}
}

#[cfg(test)]
fn metrics(names: &[&str]) -> Vec<String> {
	names.iter().map(|name| (*name).to_owned()).collect()
}

#[test]
fn test_default_style() {
	let line_values = vec![
		ParamValue::number(0.1).unwrap(),
		ParamValue::number(1.0).unwrap(),
	];
	let assignment = ChartStyle::default()
		.assign(&metrics(&["accuracy", "recall"]), &line_values)
		.unwrap();
	assert_eq!(
		assignment.metrics,
		vec![
			AssignedMetric {
				name: "accuracy".to_owned(),
				label: "accuracy".to_owned(),
				color: RED.to_owned(),
			},
			AssignedMetric {
				name: "recall".to_owned(),
				label: "recall".to_owned(),
				color: BLUE.to_owned(),
			},
		]
	);
	assert_eq!(
		assignment.line_style(&line_values[0]),
		Some(LineStyle::Dashed)
	);
	assert_eq!(assignment.line_style(&line_values[1]), Some(LineStyle::Solid));
}

#[test]
fn test_explicit_metric_styles() {
	let style = ChartStyle {
		metrics: vec![MetricStyle {
			name: "f1".to_owned(),
			label: Some("F1 Score".to_owned()),
			color: Some(GREEN.to_owned()),
		}],
		colors: vec![PURPLE.to_owned()],
		..Default::default()
	};
	let assignment = style
		.assign(&metrics(&["accuracy", "f1"]), &[ParamValue::from("rbf")])
		.unwrap();
	assert_eq!(assignment.metrics[0].color, PURPLE);
	assert_eq!(assignment.metrics[1].label, "F1 Score");
	assert_eq!(assignment.metrics[1].color, GREEN);
	assert_eq!(assignment.line_styles.len(), 1);
}

#[test]
fn test_exhausted_styles() {
	let line_values = vec![
		ParamValue::number(0.1).unwrap(),
		ParamValue::number(1.0).unwrap(),
		ParamValue::number(10.0).unwrap(),
	];
	assert_eq!(
		ChartStyle::default().assign(&metrics(&["accuracy"]), &line_values),
		Err(StyleError::LineStylesExhausted {
			needed: 3,
			available: 2,
		})
	);
	assert_eq!(
		ChartStyle::default().assign(
			&metrics(&["accuracy", "recall", "precision"]),
			&line_values[..1]
		),
		Err(StyleError::ColorsExhausted {
			needed: 3,
			available: 2,
		})
	);
}
