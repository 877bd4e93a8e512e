/*!
This module decides which parameter of a two dimensional grid is drawn as separate lines and which is drawn along the x axis.
*/

use crate::{
	error::Error,
	grid::{ParamGrid, ParamValue},
};

/// `AxisRoles` names the two parameters of a grid by the role they play in the reshaped results. The `line` parameter indexes the reshaped tables and is distinguished by line style when plotted. The `x` parameter indexes the rows of each table and is shared along the x axis.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AxisRoles {
	pub line: String,
	pub x: String,
}

impl AxisRoles {
	pub fn new(line: impl Into<String>, x: impl Into<String>) -> Self {
		Self {
			line: line.into(),
			x: x.into(),
		}
	}

	/**
	Choose the roles from the shape of the grid: the line parameter is the one parameter with exactly two candidate values, and the x parameter is the other one. This only depends on the number of candidates of each parameter, not on the order the parameters were declared in. If neither or both parameters have two candidates, this returns `Error::AmbiguousAxes` rather than guessing. Declare the roles with `AxisRoles::new` to avoid the ambiguity.
	*/
	pub fn infer(grid: &ParamGrid) -> Result<Self, Error> {
		check_grid_shape(grid)?;
		let candidates: Vec<&str> = grid
			.iter()
			.filter(|(_, values)| values.len() == 2)
			.map(|(name, _)| name)
			.collect();
		let line = match candidates.as_slice() {
			[line] => *line,
			_ => {
				return Err(Error::AmbiguousAxes {
					candidates: candidates.iter().map(|name| (*name).to_owned()).collect(),
				})
			}
		};
		let x = grid
			.names()
			.find(|name| *name != line)
			.ok_or(Error::GridShape { n_params: 1 })?;
		let roles = Self::new(line, x);
		log::debug!("inferred line parameter {} and x parameter {}", roles.line, roles.x);
		Ok(roles)
	}

	/// Check that these roles name the two distinct parameters of `grid`.
	pub fn validate(&self, grid: &ParamGrid) -> Result<(), Error> {
		check_grid_shape(grid)?;
		if self.line == self.x {
			return Err(Error::SameAxis(self.line.clone()));
		}
		for name in &[&self.line, &self.x] {
			if !grid.contains(name) {
				return Err(Error::UnknownParameter((*name).clone()));
			}
		}
		Ok(())
	}

	pub fn line_values<'a>(&self, grid: &'a ParamGrid) -> Result<&'a [ParamValue], Error> {
		grid.get(&self.line)
			.ok_or_else(|| Error::UnknownParameter(self.line.clone()))
	}

	pub fn x_values<'a>(&self, grid: &'a ParamGrid) -> Result<&'a [ParamValue], Error> {
		grid.get(&self.x)
			.ok_or_else(|| Error::UnknownParameter(self.x.clone()))
	}
}

fn check_grid_shape(grid: &ParamGrid) -> Result<(), Error> {
	if grid.len() != 2 {
		return Err(Error::GridShape {
			n_params: grid.len(),
		});
	}
	for (name, values) in grid.iter() {
		if values.is_empty() {
			return Err(Error::EmptyCandidates(name.to_owned()));
		}
		let duplicate = values
			.iter()
			.enumerate()
			.find(|(index, value)| values[..*index].contains(value));
		if let Some((_, value)) = duplicate {
			return Err(Error::DuplicateCandidate {
				param: name.to_owned(),
				value: value.clone(),
			});
		}
	}
	Ok(())
}

#[cfg(test)]
fn numbers(values: &[f64]) -> Vec<ParamValue> {
	values
		.iter()
		.map(|value| ParamValue::number(*value).unwrap())
		.collect()
}

#[test]
fn test_infer() {
	let grid = ParamGrid::new()
		.with_param("C", numbers(&[0.1, 1.0]))
		.with_param("gamma", numbers(&[0.001, 0.01, 0.1]));
	assert_eq!(AxisRoles::infer(&grid), Ok(AxisRoles::new("C", "gamma")));
}

#[test]
fn test_infer_ignores_declaration_order() {
	let forward: ParamGrid = vec![
		("gamma", numbers(&[0.001, 0.01, 0.1])),
		("C", numbers(&[0.1, 1.0])),
	]
	.into_iter()
	.collect();
	let backward: ParamGrid = vec![
		("C", numbers(&[0.1, 1.0])),
		("gamma", numbers(&[0.001, 0.01, 0.1])),
	]
	.into_iter()
	.collect();
	assert_eq!(AxisRoles::infer(&forward), AxisRoles::infer(&backward));
	assert_eq!(AxisRoles::infer(&forward).unwrap().line, "C");
	// The line parameter may have more candidate values than the x parameter.
	let grid = ParamGrid::new()
		.with_param("a", numbers(&[1.0, 2.0, 3.0]))
		.with_param("b", numbers(&[1.0, 2.0]));
	assert_eq!(AxisRoles::infer(&grid), Ok(AxisRoles::new("b", "a")));
}

#[test]
fn test_infer_rejects_ambiguous_grids() {
	let grid = ParamGrid::new()
		.with_param("C", numbers(&[0.1, 1.0]))
		.with_param("gamma", numbers(&[0.01, 0.1]));
	assert_eq!(
		AxisRoles::infer(&grid),
		Err(Error::AmbiguousAxes {
			candidates: vec!["C".to_owned(), "gamma".to_owned()],
		})
	);
	let grid = ParamGrid::new()
		.with_param("C", numbers(&[0.1, 1.0, 10.0]))
		.with_param("gamma", numbers(&[0.01]));
	assert_eq!(
		AxisRoles::infer(&grid),
		Err(Error::AmbiguousAxes { candidates: vec![] })
	);
}

#[test]
fn test_infer_rejects_bad_shapes() {
	let grid = ParamGrid::new().with_param("C", numbers(&[0.1, 1.0]));
	assert_eq!(AxisRoles::infer(&grid), Err(Error::GridShape { n_params: 1 }));
	let grid = ParamGrid::new()
		.with_param("C", numbers(&[0.1, 1.0]))
		.with_param("gamma", vec![]);
	assert_eq!(
		AxisRoles::infer(&grid),
		Err(Error::EmptyCandidates("gamma".to_owned()))
	);
}

#[test]
fn test_validate() {
	let grid = ParamGrid::new()
		.with_param("C", numbers(&[0.1, 1.0]))
		.with_param("gamma", numbers(&[0.01, 0.1]));
	assert_eq!(AxisRoles::new("gamma", "C").validate(&grid), Ok(()));
	assert_eq!(
		AxisRoles::new("C", "C").validate(&grid),
		Err(Error::SameAxis("C".to_owned()))
	);
	assert_eq!(
		AxisRoles::new("C", "kernel").validate(&grid),
		Err(Error::UnknownParameter("kernel".to_owned()))
	);
}

#[test]
fn test_rejects_duplicate_candidates() {
	let grid = ParamGrid::new()
		.with_param("C", numbers(&[1.0, 1.0]))
		.with_param("gamma", numbers(&[0.001, 0.01, 0.1]));
	let error = Error::DuplicateCandidate {
		param: "C".to_owned(),
		value: ParamValue::number(1.0).unwrap(),
	};
	assert_eq!(AxisRoles::infer(&grid), Err(error.clone()));
	assert_eq!(AxisRoles::new("C", "gamma").validate(&grid), Err(error));
	// "1" and "1.0" in a config file are the same candidate.
	let grid: ParamGrid = serde_yaml::from_str("{C: [1, 1.0], gamma: [0.1, 1]}").unwrap();
	assert!(matches!(
		AxisRoles::new("gamma", "C").validate(&grid),
		Err(Error::DuplicateCandidate { .. })
	));
}
