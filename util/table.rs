use ndarray::prelude::*;

/// A plain text table with a header row, drawn with `|` between columns and a `|---|` line under the header.
pub struct Table {
	padding: usize,
	header: Vec<String>,
	values: Array2<String>,
}

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{n_values} values do not fill rows of {n_columns} columns")]
pub struct TableShapeError {
	pub n_columns: usize,
	pub n_values: usize,
}

impl Table {
	pub fn new(header: Vec<String>, values: Array2<String>) -> Self {
		Self {
			padding: 1,
			header,
			values,
		}
	}

	/// Build a table from its rows. Every row must have one value per column of the header.
	pub fn from_rows(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableShapeError> {
		let n_columns = header.len();
		let n_rows = rows.len();
		let values: Vec<String> = rows.into_iter().flatten().collect();
		let n_values = values.len();
		let values = Array2::from_shape_vec((n_rows, n_columns), values)
			.map_err(|_| TableShapeError {
				n_columns,
				n_values,
			})?;
		Ok(Self::new(header, values))
	}
}

impl std::fmt::Display for Table {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		// update column widths with header
		let mut column_widths: Vec<usize> = self
			.header
			.iter()
			.map(|header| header.chars().count())
			.collect();
		// update column widths with values
		column_widths
			.iter_mut()
			.zip(self.values.axis_iter(Axis(1)))
			.for_each(|(column_width, column)| {
				column.iter().for_each(|value| {
					*column_width = usize::max(*column_width, value.chars().count());
				})
			});
		// write header
		let line = Line {
			column_widths: &column_widths,
			padding: self.padding,
		};
		let header: Vec<&String> = self.header.iter().collect();
		let row = Row {
			column_widths: &column_widths,
			padding: self.padding,
			values: &header,
		};
		writeln!(f, "{}", row)?;
		writeln!(f, "{}", line)?;
		// write values
		for values in self.values.genrows() {
			let values: Vec<&String> = values.iter().collect();
			let row = Row {
				column_widths: &column_widths,
				padding: self.padding,
				values: &values,
			};
			writeln!(f, "{}", row)?;
		}
		Ok(())
	}
}

struct Line<'a> {
	column_widths: &'a [usize],
	padding: usize,
}

impl<'a> std::fmt::Display for Line<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "|")?;
		for column_width in self.column_widths.iter() {
			for _ in 0..column_width + 2 * self.padding {
				write!(f, "-")?;
			}
			write!(f, "|")?;
		}
		Ok(())
	}
}

struct Row<'a> {
	column_widths: &'a [usize],
	padding: usize,
	values: &'a [&'a String],
}

impl<'a> std::fmt::Display for Row<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "|")?;
		for (column_width, value) in self.column_widths.iter().zip(self.values) {
			for _ in 0..self.padding {
				write!(f, " ")?;
			}
			write!(f, "{}", value)?;
			for _ in 0..column_width + self.padding - value.chars().count() {
				write!(f, " ")?;
			}
			write!(f, "|")?;
		}
		Ok(())
	}
}

#[cfg(test)]
fn strings(values: &[&str]) -> Vec<String> {
	values.iter().map(|value| (*value).to_owned()).collect()
}

#[test]
fn test_table() {
	let table = Table::from_rows(
		strings(&["gamma", "accuracy", "recall"]),
		vec![
			strings(&["0.001", "0.61", "0.11"]),
			strings(&["0.01", "0.72", "0.22"]),
		],
	)
	.unwrap();
	insta::assert_snapshot!(table.to_string(), @r###"
 | gamma | accuracy | recall |
 |-------|----------|--------|
 | 0.001 | 0.61     | 0.11   |
 | 0.01  | 0.72     | 0.22   |
 "###);
}

#[test]
fn test_table_shape() {
	let result = Table::from_rows(
		strings(&["gamma", "accuracy"]),
		vec![strings(&["0.001", "0.61"]), strings(&["0.01"])],
	);
	assert_eq!(
		result.err(),
		Some(TableShapeError {
			n_columns: 2,
			n_values: 3,
		})
	);
}
