//! Columnar storage for per-point splat attributes.

use std::fmt;

use crate::status::{Result, SplatError};

/// Component order of the four `rot_*` columns of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuaternionConvention {
    /// `rot_0..3 = (w, x, y, z)`, as emitted by the reconstruction model.
    Wxyz,
    /// `rot_0..3 = (x, y, z, w)`, the standardized interchange order.
    Xyzw,
}

impl QuaternionConvention {
    pub const SOURCE: Self = QuaternionConvention::Wxyz;
    pub const STANDARD: Self = QuaternionConvention::Xyzw;

    pub const fn name(self) -> &'static str {
        match self {
            QuaternionConvention::Wxyz => "WXYZ",
            QuaternionConvention::Xyzw => "XYZW",
        }
    }
}

impl fmt::Display for QuaternionConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Default for QuaternionConvention {
    fn default() -> Self {
        QuaternionConvention::SOURCE
    }
}

/// A single named column of `f32` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<f32>,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Ordered set of named `f32` columns of identical length.
///
/// Row `i` of every column describes the same point. Insertion rejects a
/// column whose length differs from the columns already present, so the
/// equal-length invariant holds for every store that can be observed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeStore {
    columns: Vec<Column>,
    num_points: usize,
    convention: QuaternionConvention,
}

impl AttributeStore {
    pub fn new(convention: QuaternionConvention) -> Self {
        Self {
            columns: Vec::new(),
            num_points: 0,
            convention,
        }
    }

    /// Builds a store from `(name, values)` pairs, keeping their order.
    pub fn from_columns<I, S>(convention: QuaternionConvention, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut store = Self::new(convention);
        for (name, values) in columns {
            store.add_column(name, values)?;
        }
        Ok(store)
    }

    /// Appends a column. The first column fixes the point count.
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<f32>) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(SplatError::DuplicateColumn(name));
        }
        if self.columns.is_empty() {
            self.num_points = values.len();
        } else if values.len() != self.num_points {
            return Err(SplatError::ColumnLength {
                name,
                expected: self.num_points,
                found: values.len(),
            });
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    pub fn convention(&self) -> QuaternionConvention {
        self.convention
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&[f32]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Looks up a column, reporting it as missing when absent.
    pub fn require(&self, name: &str) -> Result<&[f32]> {
        self.column(name)
            .ok_or_else(|| SplatError::MissingAttributes(vec![name.to_string()]))
    }

    /// Looks up several columns at once, reporting every absent name.
    pub fn require_all<const N: usize>(&self, names: [&str; N]) -> Result<[&[f32]; N]> {
        let missing: Vec<String> = names
            .iter()
            .filter(|name| !self.contains(name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SplatError::MissingAttributes(missing));
        }
        Ok(names.map(|name| self.column(name).unwrap_or_default()))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Values of row `index` in column order, or `None` past the end.
    pub fn row(&self, index: usize) -> Option<Vec<f32>> {
        if index >= self.num_points {
            return None;
        }
        Some(self.columns.iter().map(|c| c.values[index]).collect())
    }
}
