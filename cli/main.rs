//! This module contains the main entrypoint to the sweep cli.

use self::config::{load_config, Config};
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use sweep_core::{
	reshape, unpack_grid_search, AxisRoles, CvResults, GridSearch, GridSearchOutput, ParamGrid,
	ReshapeOptions, ReshapedGrid, DEFAULT_METRICS,
};

mod config;
mod plot;
mod reshape;

#[derive(Parser)]
#[command(
	name = "sweep",
	about = "Reshape and plot the results of a hyperparameter grid search.",
	disable_help_subcommand = true
)]
enum Options {
	#[command(name = "reshape")]
	Reshape(Box<ReshapeArgs>),
	#[command(name = "plot")]
	Plot(Box<PlotArgs>),
}

#[derive(clap::Args, Debug)]
#[command(about = "reshape grid search results")]
#[command(long_about = "print the results of a grid search as one table per value of the line parameter")]
pub struct ReshapeArgs {
	#[command(flatten)]
	input: InputArgs,
	#[arg(long, value_enum, default_value_t = ReshapeFormat::Table, help = "the output format")]
	format: ReshapeFormat,
}

#[derive(clap::Args, Debug)]
#[command(about = "plot grid search results")]
#[command(long_about = "draw the tracked metrics of a grid search against the x parameter, one curve per value of the line parameter")]
pub struct PlotArgs {
	#[command(flatten)]
	input: InputArgs,
	#[arg(long, help = "draw the x axis on a linear scale instead of a logarithmic one")]
	linear: bool,
	#[arg(short, long, help = "the path to write the chart to, stdout if omitted")]
	output: Option<PathBuf>,
	#[arg(long, value_enum, default_value_t = PlotFormat::Svg, help = "the output format")]
	format: PlotFormat,
}

#[derive(clap::Args, Debug)]
struct InputArgs {
	#[arg(short, long, help = "the path to the .csv file of grid search results")]
	results: PathBuf,
	#[arg(short, long, help = "the path to a config file")]
	config: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum ReshapeFormat {
	Table,
	Json,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum PlotFormat {
	Svg,
	Json,
}

fn main() {
	let options = Options::parse();
	let env = env_logger::Env::default().default_filter_or("sweep=info");
	env_logger::Builder::from_env(env)
		.format_level(false)
		.format_module_path(false)
		.format_target(false)
		.format_timestamp(None)
		.init();
	let result = match options {
		Options::Reshape(args) => self::reshape::cli_reshape(*args),
		Options::Plot(args) => self::plot::cli_plot(*args),
	};
	if let Err(error) = result {
		eprintln!("{}: {:#}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

/// Everything both commands need: the config, the grid search read back from its results, and the reshaped results.
struct LoadedSearch {
	config: Config,
	grid: ParamGrid,
	axes: AxisRoles,
	search: GridSearchOutput<()>,
	reshaped: ReshapedGrid,
}

fn load_search(input: &InputArgs) -> Result<LoadedSearch> {
	let config = load_config(input.config.as_deref())?.unwrap_or_default();
	let cv_results = CvResults::from_path(&input.results)?;
	log::debug!(
		"read {} rows and {} columns from {}",
		cv_results.nrows(),
		cv_results.ncols(),
		input.results.display()
	);

	// Use the configured grid, or recover it from the results.
	let grid = match config.grid.clone() {
		Some(grid) => grid,
		None => ParamGrid::from_cv_results(&cv_results),
	};
	let axes = match config.axes.clone() {
		Some(axes) => axes,
		None => AxisRoles::infer(&grid)
			.context("failed to choose the line and x parameters, set them with `axes` in the config")?,
	};
	axes.validate(&grid)?;

	let metrics = config.metric_names().unwrap_or_else(|| {
		DEFAULT_METRICS
			.iter()
			.map(|metric| (*metric).to_owned())
			.collect()
	});
	let refit = match config.refit.clone() {
		Some(refit) => refit,
		None => metrics
			.first()
			.cloned()
			.ok_or(sweep_core::Error::NoMetrics)?,
	};
	let n_folds = config
		.n_folds
		.unwrap_or_else(|| cv_results.n_splits(&refit));
	let search = GridSearchOutput::from_cv_results(cv_results, &refit, ())?;

	let reshaped = if config.metrics.is_none() {
		unpack_grid_search(&search, &grid, &axes, n_folds)?.reshaped
	} else {
		let options = ReshapeOptions {
			metrics,
			n_folds: Some(n_folds),
		};
		reshape(search.cv_results(), &grid, &axes, &options)?
	};
	log::info!(
		"best {} is {} with {}",
		refit,
		search.best_score(),
		format_params(&search)
	);
	Ok(LoadedSearch {
		config,
		grid,
		axes,
		search,
		reshaped,
	})
}

fn format_params(search: &impl GridSearch) -> String {
	search
		.best_params()
		.iter()
		.map(|(name, value)| format!("{} = {}", name, value))
		.collect::<Vec<_>>()
		.join(", ")
}

/// Write `contents` to `path`, or to stdout if there is no path.
fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
	match path {
		Some(path) => {
			std::fs::write(path, contents)
				.with_context(|| format!("failed to write {}", path.display()))?;
			log::info!("wrote {}", path.display());
		}
		None => println!("{}", contents),
	}
	Ok(())
}

#[cfg(test)]
fn write_input(dir: &Path, csv: &str, config: Option<&str>) -> InputArgs {
	let results = dir.join("cv_results.csv");
	std::fs::write(&results, csv).unwrap();
	let config = config.map(|config| {
		let path = dir.join("config.yaml");
		std::fs::write(&path, config).unwrap();
		path
	});
	InputArgs { results, config }
}

#[cfg(test)]
const SVC_RESULTS: &str = ",param_C,param_gamma,split0_test_accuracy,split1_test_accuracy,mean_test_accuracy,rank_test_accuracy,mean_test_recall
0,0.1,0.001,0.6,0.62,0.61,6,0.11
1,0.1,0.01,0.7,0.74,0.72,4,0.22
2,0.1,0.1,0.8,0.86,0.83,2,0.33
3,1,0.001,0.6,0.68,0.64,5,0.14
4,1,0.01,0.7,0.8,0.75,3,0.25
5,1,0.1,0.9,0.82,0.86,1,0.36
";

#[test]
fn test_load_search_defaults() {
	use sweep_core::ParamValue;
	let dir = tempfile::tempdir().unwrap();
	let input = write_input(dir.path(), SVC_RESULTS, None);
	let loaded = load_search(&input).unwrap();
	assert_eq!(loaded.grid.names().collect::<Vec<_>>(), vec!["C", "gamma"]);
	assert_eq!(loaded.axes, AxisRoles::new("C", "gamma"));
	assert_eq!(loaded.reshaped.metrics, vec!["accuracy", "recall"]);
	// Two split columns for the refit metric.
	assert_eq!(loaded.reshaped.n_folds, Some(2));
	assert_eq!(loaded.search.best_index, 5);
	assert_eq!(
		loaded.search.best_params.get("gamma"),
		Some(&ParamValue::number(0.1).unwrap())
	);
	assert_eq!(loaded.reshaped.n_cells(), 12);
}

#[test]
fn test_load_search_configured() {
	let dir = tempfile::tempdir().unwrap();
	let config = "
axes: {line: C, x: gamma}
metrics: [{name: recall, label: Recall}]
n_folds: 5
";
	let input = write_input(dir.path(), SVC_RESULTS, Some(config));
	let loaded = load_search(&input).unwrap();
	assert_eq!(loaded.reshaped.metrics, vec!["recall"]);
	assert_eq!(loaded.reshaped.n_folds, Some(5));
	// The refit metric defaults to the first configured metric.
	assert_eq!(loaded.search.best_score, 0.36);
	assert_eq!(loaded.reshaped.n_cells(), 6);
}

#[test]
fn test_load_search_ambiguous_axes() {
	let dir = tempfile::tempdir().unwrap();
	let csv = "param_C,param_gamma,mean_test_accuracy,mean_test_recall
0.1,0.01,0.8,0.6
0.1,0.1,0.85,0.65
1,0.01,0.9,0.7
1,0.1,0.95,0.75
";
	let input = write_input(dir.path(), csv, None);
	let error = load_search(&input).err().unwrap();
	insta::assert_snapshot!(format!("{:#}", error), @"failed to choose the line and x parameters, set them with `axes` in the config: cannot choose the line parameter: expected exactly one parameter with two candidate values, but found [C, gamma]");
	let input = write_input(dir.path(), csv, Some("axes: {line: gamma, x: C}"));
	assert_eq!(load_search(&input).unwrap().axes, AxisRoles::new("gamma", "C"));
}
