use anyhow::{Context, Result};
use std::path::Path;
use sweep_charts::{LineStyle, MetricStyle};
use sweep_core::{AxisRoles, ParamGrid};

/// The config file. Every field is optional, and a missing field falls back to a value derived from the results.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	pub grid: Option<ParamGrid>,
	pub axes: Option<AxisRoles>,
	pub metrics: Option<Vec<MetricStyle>>,
	pub n_folds: Option<usize>,
	pub refit: Option<String>,
	pub chart: Option<ChartConfig>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
	pub log_x: Option<bool>,
	pub title: Option<String>,
	pub width: Option<u32>,
	pub height: Option<u32>,
	pub line_styles: Option<Vec<LineStyle>>,
}

impl Config {
	pub fn metric_names(&self) -> Option<Vec<String>> {
		self.metrics
			.as_ref()
			.map(|metrics| metrics.iter().map(|metric| metric.name.clone()).collect())
	}
}

pub fn load_config(config_path: Option<&Path>) -> Result<Option<Config>> {
	if let Some(config_path) = config_path {
		let config = std::fs::read_to_string(config_path)
			.with_context(|| format!("failed to read config file {}", config_path.display()))?;
		let config = serde_yaml::from_str(&config)
			.with_context(|| format!("failed to parse config file {}", config_path.display()))?;
		Ok(Some(config))
	} else {
		Ok(None)
	}
}

#[test]
fn test_parse_config() {
	let config: Config = serde_yaml::from_str(
		r##"
grid: {C: [0.1, 1], gamma: [0.001, 0.01, 0.1]}
axes: {line: C, x: gamma}
metrics:
  - {name: accuracy, label: Accuracy, color: "#FF3B30"}
  - {name: recall}
n_folds: 5
refit: accuracy
chart:
  log_x: false
  width: 1400
  height: 700
  line_styles: [dashed, solid]
"##,
	)
	.unwrap();
	let grid = config.grid.as_ref().unwrap();
	assert_eq!(grid.names().collect::<Vec<_>>(), vec!["C", "gamma"]);
	assert_eq!(grid.get("gamma").unwrap().len(), 3);
	assert_eq!(config.axes, Some(AxisRoles::new("C", "gamma")));
	assert_eq!(
		config.metric_names(),
		Some(vec!["accuracy".to_owned(), "recall".to_owned()])
	);
	assert_eq!(config.metrics.as_ref().unwrap()[1].color, None);
	assert_eq!(config.n_folds, Some(5));
	let chart = config.chart.unwrap();
	assert_eq!(chart.log_x, Some(false));
	assert_eq!(chart.title, None);
	assert_eq!(
		chart.line_styles,
		Some(vec![LineStyle::Dashed, LineStyle::Solid])
	);
}

#[test]
fn test_parse_empty_config() {
	let config: Config = serde_yaml::from_str("{}").unwrap();
	assert!(config.grid.is_none());
	assert!(config.metric_names().is_none());
	assert!(serde_yaml::from_str::<Config>("metric: accuracy").is_err());
}
