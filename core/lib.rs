/*!
This crate reshapes the results of a two dimensional hyperparameter grid search for plotting. Given the candidate values of two hyperparameters and the flat results table the search produced, [`reshape`](fn.reshape.html) builds one table per value of the line parameter, indexed by the values of the x parameter, with one column per tracked metric.

```
use sweep_core::{reshape, AxisRoles, CvResults, ParamGrid, ReshapeOptions};

let csv = "param_C,param_gamma,mean_test_accuracy,mean_test_recall
0.1,0.01,0.8,0.6
0.1,0.1,0.85,0.65
1,0.01,0.9,0.7
1,0.1,0.95,0.75
";
let cv_results = CvResults::from_csv(&mut csv::Reader::from_reader(csv.as_bytes())).unwrap();
let grid = ParamGrid::from_cv_results(&cv_results);
let axes = AxisRoles::new("C", "gamma");
let reshaped = reshape(&cv_results, &grid, &axes, &ReshapeOptions::default()).unwrap();
assert_eq!(reshaped.tables.len(), 2);
```
*/

#![allow(clippy::tabs_in_doc_comments)]

mod axes;
mod cv_results;
mod error;
mod grid;
mod load;
mod reshape;
mod search;

pub use self::axes::AxisRoles;
pub use self::cv_results::{
	mean_test_column_name, param_column_name, rank_test_column_name, CvResults, CvResultsColumn,
	NumberColumn, ParamColumn, TextColumn,
};
pub use self::error::Error;
pub use self::grid::{ParamGrid, ParamValue};
pub use self::reshape::{reshape, MetricTable, ReshapeOptions, ReshapedGrid, DEFAULT_METRICS};
pub use self::search::{unpack_grid_search, GridSearch, GridSearchOutput, UnpackedGridSearch};
