use crate::grid::ParamValue;
use thiserror::Error;

/// The errors that can occur when choosing the axes of a grid or reshaping its results. Configuration errors mean the grid or the axes were declared inconsistently. Lookup errors mean the grid and the results table do not describe the same search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
	#[error("the grid must have exactly two parameters, but it has {n_params}")]
	GridShape { n_params: usize },
	#[error("parameter \"{0}\" has no candidate values")]
	EmptyCandidates(String),
	#[error(
		"cannot choose the line parameter: expected exactly one parameter with two candidate values, but found [{}]",
		.candidates.join(", ")
	)]
	AmbiguousAxes { candidates: Vec<String> },
	#[error("parameter \"{param}\" lists the candidate value {value} more than once")]
	DuplicateCandidate { param: String, value: ParamValue },
	#[error("parameter \"{0}\" is not in the grid")]
	UnknownParameter(String),
	#[error("the line and x axes must be different parameters, but both are \"{0}\"")]
	SameAxis(String),
	#[error("no metrics were requested")]
	NoMetrics,
	#[error("column \"{0}\" is missing from the results")]
	MissingColumn(String),
	#[error("column \"{0}\" appears more than once in the results")]
	DuplicateColumn(String),
	#[error("column \"{name}\" is a {actual} column, expected a {expected} column")]
	ColumnKind {
		name: String,
		expected: &'static str,
		actual: &'static str,
	},
	#[error("column \"{name}\" has {len} rows, expected {expected}")]
	RaggedColumns {
		name: String,
		len: usize,
		expected: usize,
	},
	#[error("no result row has {line_param} = {line_value} and {x_param} = {x_value}")]
	MissingRow {
		line_param: String,
		line_value: ParamValue,
		x_param: String,
		x_value: ParamValue,
	},
	#[error(
		"{count} result rows have {line_param} = {line_value} and {x_param} = {x_value}, expected exactly one"
	)]
	DuplicateRows {
		line_param: String,
		line_value: ParamValue,
		x_param: String,
		x_value: ParamValue,
		count: usize,
	},
	#[error("no row has a valid score for metric \"{0}\"")]
	NoBestRow(String),
}
