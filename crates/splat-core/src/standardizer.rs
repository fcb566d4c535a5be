//! Conversion of a source-convention store into the canonical layout.
//!
//! Standardization drops rows holding a non-finite value in any required
//! attribute, reorders the columns to [`CANONICAL_ORDER`], discards every
//! other column and moves the quaternion from WXYZ to XYZW order. Scale and
//! opacity stay in log/logit space.

use log::{debug, warn};
use rayon::prelude::*;

use crate::attribute_store::{AttributeStore, QuaternionConvention};
use crate::quaternion;
use crate::schema::{self, CANONICAL_ORDER, REQUIRED_ATTRIBUTES, ROTATION};
use crate::status::{Result, SplatError};

/// Row counts of one standardization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StandardizeReport {
    pub kept: usize,
    pub dropped: usize,
}

impl StandardizeReport {
    pub fn total(&self) -> usize {
        self.kept + self.dropped
    }
}

/// `mask[i]` is true iff every `columns[_][i]` is finite.
pub fn finite_row_mask(columns: &[&[f32]], num_points: usize) -> Vec<bool> {
    (0..num_points)
        .into_par_iter()
        .map(|i| columns.iter().all(|c| c[i].is_finite()))
        .collect()
}

/// Keeps `values[i]` where `mask[i]` holds, preserving order.
fn retain_masked(values: &[f32], mask: &[bool]) -> Vec<f32> {
    values
        .iter()
        .zip(mask)
        .filter_map(|(&v, &keep)| keep.then_some(v))
        .collect()
}

/// Produces the standardized copy of `store`.
///
/// `store` must be in [`QuaternionConvention::Wxyz`] and carry every
/// attribute of [`REQUIRED_ATTRIBUTES`]; the input is left untouched.
pub fn standardize(store: &AttributeStore) -> Result<(AttributeStore, StandardizeReport)> {
    if let Err(err) = schema::check_vertex_schema(store) {
        let missing = match err {
            SplatError::MissingAttributes(names) => names,
            other => return Err(other),
        };
        return Err(SplatError::Schema(missing));
    }
    if store.convention() != QuaternionConvention::SOURCE {
        return Err(SplatError::ConventionMismatch {
            expected: QuaternionConvention::SOURCE,
            found: store.convention(),
        });
    }

    let num_points = store.num_points();
    let required: Vec<&[f32]> = REQUIRED_ATTRIBUTES
        .iter()
        .map(|name| store.require(name))
        .collect::<Result<_>>()?;
    let mask = finite_row_mask(&required, num_points);
    let kept = mask.iter().filter(|&&keep| keep).count();
    let report = StandardizeReport {
        kept,
        dropped: num_points - kept,
    };

    // Source rot_0..3 is (w, x, y, z); output rot_0..3 is (x, y, z, w).
    let source_rotation = [
        store.require(ROTATION[0])?,
        store.require(ROTATION[1])?,
        store.require(ROTATION[2])?,
        store.require(ROTATION[3])?,
    ];
    let rotation = quaternion::wxyz_to_xyzw(source_rotation);

    let mut out = AttributeStore::new(QuaternionConvention::STANDARD);
    for name in CANONICAL_ORDER {
        let source = match ROTATION.iter().position(|r| *r == name) {
            Some(slot) => rotation[slot],
            None => store.require(name)?,
        };
        out.add_column(name, retain_masked(source, &mask))?;
    }

    let skipped: Vec<&str> = store
        .column_names()
        .filter(|name| !CANONICAL_ORDER.contains(name))
        .collect();
    if !skipped.is_empty() {
        debug!("Dropping {} non-canonical columns: {}", skipped.len(), skipped.join(", "));
    }
    if report.dropped > 0 {
        warn!(
            "Dropped {} of {} points with non-finite attributes",
            report.dropped,
            report.total()
        );
    }

    Ok((out, report))
}
