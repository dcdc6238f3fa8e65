//! `GroupMatrix<E>`: a rectangular, group-uniform matrix stored internally
//! in column-major order — a deliberately "surprising" layout inherited
//! unchanged from the source for interop (see Design Notes / DESIGN.md).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::element::GroupElement;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMatrix<E> {
    /// Column-major storage: `data[row + rows * col]`.
    data: Vec<E>,
    rows: usize,
    cols: usize,
}

impl<E: GroupElement> GroupMatrix<E> {
    pub(super) fn from_column_major(data: Vec<E>, rows: usize, cols: usize) -> Result<Self> {
        Self::validate_uniform_group(&data)?;
        Ok(Self { data, rows, cols })
    }

    /// Build from a sequence of rows, each a `Vec<E>` of length `cols`.
    pub fn from_rows(rows: Vec<Vec<E>>) -> Result<Self> {
        let num_rows = rows.len();
        if num_rows == 0 {
            return Err(Error::invalid_argument("matrix must have at least one row"));
        }
        let num_cols = rows[0].len();
        if rows.iter().any(|r| r.len() != num_cols) {
            return Err(Error::size_mismatch("every row must have the same length"));
        }

        let mut data = Vec::with_capacity(num_rows * num_cols);
        // column-major: data[row + num_rows*col]
        data.resize_with(num_rows * num_cols, || rows[0][0].clone());
        for (i, row) in rows.iter().enumerate() {
            for (j, element) in row.iter().enumerate() {
                data[i + num_rows * j] = element.clone();
            }
        }

        Self::from_column_major(data, num_rows, num_cols)
    }

    /// Build from a sequence of columns, each a `Vec<E>` of length `rows`.
    pub fn from_columns(columns: Vec<Vec<E>>) -> Result<Self> {
        let num_cols = columns.len();
        if num_cols == 0 {
            return Err(Error::invalid_argument(
                "matrix must have at least one column",
            ));
        }
        let num_rows = columns[0].len();
        if columns.iter().any(|c| c.len() != num_rows) {
            return Err(Error::size_mismatch(
                "every column must have the same length",
            ));
        }

        let data: Vec<E> = columns.into_iter().flatten().collect();
        Self::from_column_major(data, num_rows, num_cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn group(&self) -> Result<&E::Group> {
        self.data
            .first()
            .map(|e| e.group())
            .ok_or_else(|| Error::invalid_argument("cannot read the group of an empty matrix"))
    }

    /// Element at `(row, col)`, using the column-major index
    /// `row + rows * col`.
    pub fn get(&self, row: usize, col: usize) -> Option<&E> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row + self.rows * col)
    }

    pub fn row(&self, row: usize) -> Option<Vec<E>> {
        if row >= self.rows {
            return None;
        }
        Some((0..self.cols).map(|col| self.get(row, col).unwrap().clone()).collect())
    }

    pub fn column(&self, col: usize) -> Option<Vec<E>> {
        if col >= self.cols {
            return None;
        }
        let start = self.rows * col;
        Some(self.data[start..start + self.rows].to_vec())
    }

    /// Transpose; an involution (`m.transpose().transpose() == m`).
    pub fn transpose(&self) -> GroupMatrix<E> {
        let mut data = Vec::with_capacity(self.data.len());
        data.resize_with(self.data.len(), || self.data[0].clone());
        // transposed(row', col') = original(col', row'); transposed is
        // (cols x rows), column-major: t_data[row' + cols*col'] = data[col' + rows*row']
        for row_t in 0..self.cols {
            for col_t in 0..self.rows {
                data[row_t + self.cols * col_t] = self.data[row_t + self.rows * col_t].clone();
            }
        }
        GroupMatrix {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Iterate elements in row-major order, regardless of the column-major
    /// backing storage.
    pub fn stream_row_major(&self) -> impl Iterator<Item = &E> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| (row, col)))
            .map(move |(row, col)| self.get(row, col).unwrap())
    }

    /// Append a length-`rows` column to the right.
    pub fn append_column(&mut self, column: Vec<E>) -> Result<()> {
        if column.len() != self.rows {
            return Err(Error::size_mismatch(format!(
                "column length {} must equal matrix row count {}",
                column.len(),
                self.rows
            )));
        }
        if let Ok(group) = self.group() {
            if column.iter().any(|e| e.group() != group) {
                return Err(Error::group_mismatch(
                    "appended column does not share this matrix's group",
                ));
            }
        }
        self.data.extend(column);
        self.cols += 1;
        Ok(())
    }

    /// Prepend a length-`rows` column to the left.
    pub fn prepend_column(&mut self, column: Vec<E>) -> Result<()> {
        if column.len() != self.rows {
            return Err(Error::size_mismatch(format!(
                "column length {} must equal matrix row count {}",
                column.len(),
                self.rows
            )));
        }
        if let Ok(group) = self.group() {
            if column.iter().any(|e| e.group() != group) {
                return Err(Error::group_mismatch(
                    "prepended column does not share this matrix's group",
                ));
            }
        }
        let mut new_data = column;
        new_data.extend(self.data.drain(..));
        self.data = new_data;
        self.cols += 1;
        Ok(())
    }

    fn validate_uniform_group(data: &[E]) -> Result<()> {
        if let Some(first) = data.first() {
            let group = first.group();
            if data.iter().any(|e| e.group() != group) {
                return Err(Error::group_mismatch(
                    "all elements of a GroupMatrix must share one group",
                ));
            }
        }
        Ok(())
    }
}
