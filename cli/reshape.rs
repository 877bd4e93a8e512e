use crate::{load_search, ReshapeArgs, ReshapeFormat};
use anyhow::Result;
use std::collections::BTreeMap;
use sweep_core::{GridSearch, ParamValue, ReshapedGrid};
use sweep_util::table::Table;

#[derive(serde::Serialize)]
struct ReshapeOutput<'a> {
	line: &'a str,
	x: &'a str,
	n_folds: Option<usize>,
	best_params: &'a BTreeMap<String, ParamValue>,
	best_score: f64,
	tables: Vec<TableOutput<'a>>,
}

#[derive(serde::Serialize)]
struct TableOutput<'a> {
	line_value: &'a ParamValue,
	rows: Vec<RowOutput<'a>>,
}

#[derive(serde::Serialize)]
struct RowOutput<'a> {
	x_value: &'a ParamValue,
	metrics: BTreeMap<&'a str, Option<f64>>,
}

pub fn cli_reshape(args: ReshapeArgs) -> Result<()> {
	let loaded = load_search(&args.input)?;
	match args.format {
		ReshapeFormat::Table => print!("{}", format_tables(&loaded.reshaped)?),
		ReshapeFormat::Json => {
			let output = ReshapeOutput {
				line: &loaded.axes.line,
				x: &loaded.axes.x,
				n_folds: loaded.reshaped.n_folds,
				best_params: loaded.search.best_params(),
				best_score: loaded.search.best_score(),
				tables: table_outputs(&loaded.reshaped),
			};
			println!("{}", serde_json::to_string_pretty(&output)?);
		}
	}
	Ok(())
}

/// Format each reshaped table under a heading naming its line value.
fn format_tables(reshaped: &ReshapedGrid) -> Result<String> {
	let mut output = String::new();
	for (index, table) in reshaped.tables.iter().enumerate() {
		if index > 0 {
			output.push('\n');
		}
		output.push_str(&format!("{} = {}\n", reshaped.axes.line, table.line_value));
		let header = std::iter::once(reshaped.axes.x.clone())
			.chain(reshaped.metrics.iter().cloned())
			.collect::<Vec<_>>();
		let rows = table
			.x_values
			.iter()
			.zip(table.values.genrows())
			.map(|(x_value, values)| {
				std::iter::once(x_value.to_string())
					.chain(values.iter().map(|value| value.to_string()))
					.collect::<Vec<_>>()
			})
			.collect();
		output.push_str(&Table::from_rows(header, rows)?.to_string());
	}
	Ok(output)
}

fn table_outputs(reshaped: &ReshapedGrid) -> Vec<TableOutput> {
	reshaped
		.tables
		.iter()
		.map(|table| TableOutput {
			line_value: &table.line_value,
			rows: table
				.x_values
				.iter()
				.zip(table.values.genrows())
				.map(|(x_value, values)| RowOutput {
					x_value,
					metrics: reshaped
						.metrics
						.iter()
						.map(String::as_str)
						.zip(values.iter().map(|value| Some(*value).filter(|value| value.is_finite())))
						.collect(),
				})
				.collect(),
		})
		.collect()
}

#[cfg(test)]
fn test_reshaped() -> ReshapedGrid {
	use sweep_core::{reshape, AxisRoles, CvResults, ParamGrid, ReshapeOptions};
	let csv = "param_C,param_gamma,mean_test_accuracy,mean_test_recall
0.1,0.01,0.8,0.6
0.1,0.1,0.85,0.65
1,0.01,0.9,0.7
1,0.1,0.95,
";
	let cv_results = CvResults::from_csv(&mut csv::Reader::from_reader(csv.as_bytes())).unwrap();
	let grid = ParamGrid::from_cv_results(&cv_results);
	let axes = AxisRoles::new("C", "gamma");
	reshape(&cv_results, &grid, &axes, &ReshapeOptions::default()).unwrap()
}

#[test]
fn test_format_tables() {
	let reshaped = test_reshaped();
	insta::assert_snapshot!(format_tables(&reshaped).unwrap(), @r###"
 C = 0.1
 | gamma | accuracy | recall |
 |-------|----------|--------|
 | 0.01  | 0.8      | 0.6    |
 | 0.1   | 0.85     | 0.65   |

 C = 1
 | gamma | accuracy | recall |
 |-------|----------|--------|
 | 0.01  | 0.9      | 0.7    |
 | 0.1   | 0.95     | NaN    |
 "###);
}

#[test]
fn test_table_outputs() {
	let reshaped = test_reshaped();
	let tables = table_outputs(&reshaped);
	assert_eq!(tables.len(), 2);
	let row = &tables[1].rows[1];
	assert_eq!(row.x_value.to_string(), "0.1");
	assert_eq!(row.metrics.get("accuracy"), Some(&Some(0.95)));
	assert_eq!(row.metrics.get("recall"), Some(&None));
	let json = serde_json::to_value(&tables[0]).unwrap();
	assert_eq!(json["line_value"], serde_json::json!(0.1));
	assert_eq!(json["rows"][0]["metrics"]["recall"], serde_json::json!(0.6));
}
