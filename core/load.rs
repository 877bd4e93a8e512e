use crate::{
	cv_results::{
		CvResults, CvResultsColumn, NumberColumn, ParamColumn, TextColumn, PARAM_COLUMN_PREFIX,
	},
	grid::ParamValue,
};
use anyhow::{Context, Result};
use std::path::Path;

/// These values are the values that are considered invalid in number columns.
const INVALID_NUMBER_VALUES: &[&str] = &[
	"", "null", "NULL", "n/a", "N/A", "nan", "-nan", "NaN", "-NaN", "?",
];

impl CvResults {
	/// Load a results table from a csv file, such as one written by `pd.DataFrame(search.cv_results_).to_csv(path)`.
	pub fn from_path(path: &Path) -> Result<Self> {
		let mut reader = csv::Reader::from_path(path)
			.with_context(|| format!("failed to open results file {}", path.display()))?;
		Self::from_csv(&mut reader)
			.with_context(|| format!("failed to read results file {}", path.display()))
	}

	/// Columns named `param_*` become param columns. Every other column becomes a number column if all of its valid values parse as finite numbers, and a text column otherwise.
	pub fn from_csv<R>(reader: &mut csv::Reader<R>) -> Result<Self>
	where
		R: std::io::Read,
	{
		let column_names: Vec<String> = reader
			.headers()?
			.into_iter()
			.map(|column_name| column_name.to_owned())
			.collect();
		// Results tables are small, so read all the records before inferring the column types.
		let records = reader
			.records()
			.collect::<Result<Vec<csv::StringRecord>, csv::Error>>()?;
		let columns = column_names
			.into_iter()
			.enumerate()
			.map(|(index, name)| {
				let values = records
					.iter()
					.map(|record| record.get(index).unwrap_or(""));
				if name.starts_with(PARAM_COLUMN_PREFIX) {
					CvResultsColumn::Param(ParamColumn {
						name,
						data: values.map(ParamValue::parse).collect(),
					})
				} else if is_score_column(&name) || infer_number(values.clone()) {
					CvResultsColumn::Number(NumberColumn {
						name,
						data: values.map(parse_number).collect(),
					})
				} else {
					CvResultsColumn::Text(TextColumn {
						name,
						data: values.map(|value| value.to_owned()).collect(),
					})
				}
			})
			.collect();
		let cv_results = CvResults::new(columns)?;
		log::debug!(
			"loaded results table with {} rows and {} columns",
			cv_results.nrows(),
			cv_results.ncols()
		);
		Ok(cv_results)
	}
}

/// These prefixes name the columns that hold scores, which are read as numbers even if every fit failed.
const SCORE_COLUMN_PREFIXES: &[&str] = &["mean_test_", "std_test_", "rank_test_", "split"];

fn is_score_column(name: &str) -> bool {
	SCORE_COLUMN_PREFIXES
		.iter()
		.any(|prefix| name.starts_with(prefix))
}

/// A column is a number column if all of its valid values are finite numbers. A column with no valid values is a number column of NaN.
fn infer_number<'a>(values: impl Iterator<Item = &'a str>) -> bool {
	for value in values {
		let value = value.trim();
		if INVALID_NUMBER_VALUES.contains(&value) {
			continue;
		}
		let is_finite = lexical::parse::<f64, &str>(value)
			.map(|value| value.is_finite())
			.unwrap_or(false);
		if !is_finite {
			return false;
		}
	}
	true
}

fn parse_number(value: &str) -> f64 {
	match lexical::parse::<f64, &str>(value.trim()) {
		Ok(value) if value.is_finite() => value,
		_ => std::f64::NAN,
	}
}

#[test]
fn test_from_csv() {
	let csv = r#",mean_fit_time,param_C,param_kernel,params,mean_test_accuracy,rank_test_accuracy
0,0.01,0.1,rbf,"{'C': 0.1, 'kernel': 'rbf'}",0.8,2
1,0.02,1,linear,"{'C': 1, 'kernel': 'linear'}",,1
"#;
	let cv_results = CvResults::from_csv(&mut csv::Reader::from_reader(csv.as_bytes())).unwrap();
	assert_eq!(cv_results.nrows(), 2);
	assert!(matches!(&cv_results.columns[0], CvResultsColumn::Number(column) if column.name.is_empty()));
	assert_eq!(
		cv_results.param_column("C").unwrap(),
		&[
			Some(ParamValue::number(0.1).unwrap()),
			Some(ParamValue::number(1.0).unwrap()),
		][..]
	);
	assert_eq!(
		cv_results.param_column("kernel").unwrap(),
		&[
			Some(ParamValue::from("rbf")),
			Some(ParamValue::from("linear")),
		][..]
	);
	assert!(matches!(
		cv_results.column("params"),
		Some(CvResultsColumn::Text(_))
	));
	let accuracy = cv_results.metric_column("accuracy").unwrap();
	assert_eq!(accuracy[0], 0.8);
	assert!(accuracy[1].is_nan());
	assert_eq!(
		cv_results.number_column("rank_test_accuracy").unwrap(),
		&[2.0, 1.0]
	);
}

#[test]
fn test_from_csv_missing_params() {
	let csv = "param_degree,param_kernel,mean_test_accuracy
3,poly,0.7
,rbf,0.9
";
	let cv_results = CvResults::from_csv(&mut csv::Reader::from_reader(csv.as_bytes())).unwrap();
	assert_eq!(
		cv_results.param_column("degree").unwrap(),
		&[Some(ParamValue::number(3.0).unwrap()), None][..]
	);
}

#[test]
fn test_from_csv_failed_metric() {
	let csv = "param_C,mean_test_accuracy,mean_test_recall,split0_test_recall,notes
0.1,0.8,nan,,
1,0.9,nan,error,
";
	let cv_results = CvResults::from_csv(&mut csv::Reader::from_reader(csv.as_bytes())).unwrap();
	let recall = cv_results.metric_column("recall").unwrap();
	assert!(recall.iter().all(|value| value.is_nan()));
	let split = cv_results.number_column("split0_test_recall").unwrap();
	assert!(split.iter().all(|value| value.is_nan()));
	assert!(matches!(
		cv_results.column("notes"),
		Some(CvResultsColumn::Number(_))
	));
	assert_eq!(cv_results.metric_column("accuracy").unwrap(), &[0.8, 0.9]);
}
