use crate::{
	axes::AxisRoles,
	cv_results::{mean_test_column_name, rank_test_column_name, CvResults, CvResultsColumn},
	error::Error,
	grid::{ParamGrid, ParamValue},
	reshape::{reshape, ReshapeOptions, ReshapedGrid},
};
use std::collections::BTreeMap;

/**
The `GridSearch` trait is the interface to the output of a grid search: the results table, and the best parameters, estimator, and score the search chose.

The estimator is whatever the search fit with the best parameters, and is only passed through.
*/
pub trait GridSearch {
	type Estimator;
	fn cv_results(&self) -> &CvResults;
	fn best_params(&self) -> &BTreeMap<String, ParamValue>;
	fn best_estimator(&self) -> &Self::Estimator;
	fn best_score(&self) -> f64;
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridSearchOutput<E> {
	pub cv_results: CvResults,
	pub best_index: usize,
	pub best_params: BTreeMap<String, ParamValue>,
	pub best_estimator: E,
	pub best_score: f64,
}

impl<E> GridSearch for GridSearchOutput<E> {
	type Estimator = E;

	fn cv_results(&self) -> &CvResults {
		&self.cv_results
	}

	fn best_params(&self) -> &BTreeMap<String, ParamValue> {
		&self.best_params
	}

	fn best_estimator(&self) -> &E {
		&self.best_estimator
	}

	fn best_score(&self) -> f64 {
		self.best_score
	}
}

impl<E> GridSearchOutput<E> {
	/**
	Recover the best row of `cv_results` for the metric `refit`. The best row is the first row ranked 1 in `rank_test_<refit>` if that column is present, and the row with the highest `mean_test_<refit>` otherwise.
	*/
	pub fn from_cv_results(
		cv_results: CvResults,
		refit: &str,
		best_estimator: E,
	) -> Result<Self, Error> {
		let scores = cv_results.metric_column(refit)?;
		let ranked_first = match cv_results.column(&rank_test_column_name(refit)) {
			Some(CvResultsColumn::Number(ranks)) => ranks.data.iter().position(|rank| *rank == 1.0),
			_ => None,
		};
		let best_index = ranked_first
			.or_else(|| {
				scores
					.iter()
					.enumerate()
					.filter(|(_, score)| score.is_finite())
					.fold(None, |best: Option<(usize, f64)>, (index, &score)| match best {
						Some((_, best_score)) if best_score >= score => best,
						_ => Some((index, score)),
					})
					.map(|(index, _)| index)
			})
			.ok_or_else(|| Error::NoBestRow(refit.to_owned()))?;
		let best_score = scores[best_index];
		let best_params = cv_results
			.param_names()
			.filter_map(|param| {
				let value = cv_results.param_column(param).ok()?[best_index].clone()?;
				Some((param.to_owned(), value))
			})
			.collect();
		log::debug!(
			"best row for {} is {} with score {}",
			mean_test_column_name(refit),
			best_index,
			best_score
		);
		Ok(Self {
			cv_results,
			best_index,
			best_params,
			best_estimator,
			best_score,
		})
	}
}

/// The reshaped results of a grid search, together with the search's own choice of best parameters, estimator, and score.
#[derive(Debug)]
pub struct UnpackedGridSearch<'a, E> {
	pub reshaped: ReshapedGrid,
	pub best_params: &'a BTreeMap<String, ParamValue>,
	pub best_estimator: &'a E,
	pub best_score: f64,
}

/// Reshape the results of `search` with the default metrics. `n_folds` is carried through to the reshaped grid unchanged.
pub fn unpack_grid_search<'a, S>(
	search: &'a S,
	grid: &ParamGrid,
	axes: &AxisRoles,
	n_folds: usize,
) -> Result<UnpackedGridSearch<'a, S::Estimator>, Error>
where
	S: GridSearch,
{
	let options = ReshapeOptions {
		n_folds: Some(n_folds),
		..Default::default()
	};
	let reshaped = reshape(search.cv_results(), grid, axes, &options)?;
	Ok(UnpackedGridSearch {
		reshaped,
		best_params: search.best_params(),
		best_estimator: search.best_estimator(),
		best_score: search.best_score(),
	})
}

#[cfg(test)]
use crate::cv_results::{number, number_column, param_column};

#[test]
fn test_from_cv_results_uses_rank() {
	let cv_results = CvResults::new(vec![
		param_column("C", &[0.1, 1.0, 10.0]),
		param_column("gamma", &[0.01, 0.01, 0.01]),
		number_column("mean_test_accuracy", &[0.7, 0.9, 0.9]),
		number_column("rank_test_accuracy", &[3.0, 2.0, 1.0]),
	])
	.unwrap();
	let search = GridSearchOutput::from_cv_results(cv_results, "accuracy", ()).unwrap();
	assert_eq!(search.best_index, 2);
	assert_eq!(search.best_score, 0.9);
	assert_eq!(search.best_params.get("C"), Some(&number(10.0)));
	assert_eq!(search.best_params.get("gamma"), Some(&number(0.01)));
}

#[test]
fn test_from_cv_results_falls_back_to_max_score() {
	let cv_results = CvResults::new(vec![
		param_column("C", &[0.1, 1.0, 10.0]),
		number_column("mean_test_recall", &[0.4, std::f64::NAN, 0.6]),
	])
	.unwrap();
	let search = GridSearchOutput::from_cv_results(cv_results, "recall", "svc").unwrap();
	assert_eq!(search.best_index, 2);
	assert_eq!(*search.best_estimator(), "svc");
	let cv_results = CvResults::new(vec![
		param_column("C", &[0.1]),
		number_column("mean_test_recall", &[std::f64::NAN]),
	])
	.unwrap();
	assert_eq!(
		GridSearchOutput::from_cv_results(cv_results, "recall", ()),
		Err(Error::NoBestRow("recall".to_owned()))
	);
}

#[test]
fn test_unpack_grid_search() {
	let cv_results = CvResults::new(vec![
		param_column("C", &[0.1, 0.1, 1.0, 1.0]),
		param_column("gamma", &[0.01, 0.1, 0.01, 0.1]),
		number_column("mean_test_accuracy", &[0.6, 0.7, 0.8, 0.9]),
		number_column("mean_test_recall", &[0.5, 0.4, 0.3, 0.2]),
	])
	.unwrap();
	let grid = ParamGrid::from_cv_results(&cv_results);
	let search = GridSearchOutput::from_cv_results(cv_results, "accuracy", "estimator").unwrap();
	let axes = AxisRoles::new("C", "gamma");
	let unpacked = unpack_grid_search(&search, &grid, &axes, 5).unwrap();
	assert_eq!(unpacked.reshaped.n_folds, Some(5));
	assert_eq!(unpacked.reshaped.n_cells(), 8);
	assert_eq!(unpacked.best_score, 0.9);
	assert_eq!(*unpacked.best_estimator, "estimator");
	assert_eq!(unpacked.best_params, search.best_params());
}
