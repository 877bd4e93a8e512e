use crate::{config::Config, load_search, write_output, PlotArgs, PlotFormat};
use anyhow::Result;
use sweep_charts::{grid_line_chart, render_svg, ChartStyle, GridChartOptions};

const DEFAULT_WIDTH: u32 = 1400;
const DEFAULT_HEIGHT: u32 = 700;

pub fn cli_plot(args: PlotArgs) -> Result<()> {
	let loaded = load_search(&args.input)?;
	let style = chart_style(&loaded.config);
	let options = chart_options(&loaded.config, args.linear);
	let chart = grid_line_chart(
		&loaded.reshaped,
		&loaded.grid,
		&loaded.axes,
		&style,
		&options,
	)?;
	let contents = match args.format {
		PlotFormat::Svg => render_svg(&chart, chart_size(&loaded.config))?,
		PlotFormat::Json => serde_json::to_string_pretty(&chart)?,
	};
	write_output(args.output.as_deref(), &contents)
}

fn chart_style(config: &Config) -> ChartStyle {
	let mut style = ChartStyle::default();
	if let Some(metrics) = config.metrics.clone() {
		style.metrics = metrics;
	}
	if let Some(line_styles) = config
		.chart
		.as_ref()
		.and_then(|chart| chart.line_styles.clone())
	{
		style.line_styles = line_styles;
	}
	style
}

/// `--linear` overrides `log_x` in the config.
fn chart_options(config: &Config, linear: bool) -> GridChartOptions {
	let chart = config.chart.as_ref();
	GridChartOptions {
		log_x: !linear && chart.and_then(|chart| chart.log_x).unwrap_or(true),
		title: chart.and_then(|chart| chart.title.clone()),
	}
}

fn chart_size(config: &Config) -> (u32, u32) {
	let chart = config.chart.as_ref();
	(
		chart.and_then(|chart| chart.width).unwrap_or(DEFAULT_WIDTH),
		chart.and_then(|chart| chart.height).unwrap_or(DEFAULT_HEIGHT),
	)
}

#[test]
fn test_chart_settings() {
	use sweep_charts::LineStyle;
	let config: Config = serde_yaml::from_str(
		r##"
metrics: [{name: f1, color: "#30D158"}]
chart: {title: SVC, height: 500, line_styles: [solid, dashed, hidden]}
"##,
	)
	.unwrap();
	let style = chart_style(&config);
	assert_eq!(style.metrics[0].name, "f1");
	assert_eq!(
		style.line_styles,
		vec![LineStyle::Solid, LineStyle::Dashed, LineStyle::Hidden]
	);
	assert_eq!(style.colors, ChartStyle::default().colors);
	assert_eq!(
		chart_options(&config, false),
		GridChartOptions {
			log_x: true,
			title: Some("SVC".to_owned()),
		}
	);
	assert!(!chart_options(&config, true).log_x);
	assert_eq!(chart_size(&config), (1400, 500));
	assert_eq!(chart_size(&Config::default()), (1400, 700));
}
