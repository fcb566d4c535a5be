//! Attribute schemas and the required-attribute check.

use crate::attribute_store::AttributeStore;
use crate::status::{Result, SplatError};

/// Attributes every Gaussian splat vertex must carry.
pub const REQUIRED_ATTRIBUTES: [&str; 14] = [
    "x", "y", "z", "f_dc_0", "f_dc_1", "f_dc_2", "opacity", "scale_0", "scale_1", "scale_2",
    "rot_0", "rot_1", "rot_2", "rot_3",
];

/// Property order of a standardized point file.
pub const CANONICAL_ORDER: [&str; 14] = [
    "x", "y", "z", "scale_0", "scale_1", "scale_2", "rot_0", "rot_1", "rot_2", "rot_3",
    "f_dc_0", "f_dc_1", "f_dc_2", "opacity",
];

pub const POSITION: [&str; 3] = ["x", "y", "z"];
pub const SCALE: [&str; 3] = ["scale_0", "scale_1", "scale_2"];
pub const ROTATION: [&str; 4] = ["rot_0", "rot_1", "rot_2", "rot_3"];
pub const COLOR_DC: [&str; 3] = ["f_dc_0", "f_dc_1", "f_dc_2"];
pub const OPACITY: &str = "opacity";

/// Names from `required` that `store` lacks, in the order given and without
/// repeats.
pub fn missing_attributes<S: AsRef<str>>(store: &AttributeStore, required: &[S]) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for name in required.iter().map(|s| s.as_ref()) {
        if !store.contains(name) && !missing.iter().any(|m| m == name) {
            missing.push(name.to_string());
        }
    }
    missing
}

/// Checks that `store` has every attribute in `required`.
///
/// All absent names are reported together, not just the first.
///
/// # Examples
/// ```
/// use splat_core::attribute_store::{AttributeStore, QuaternionConvention};
/// use splat_core::schema::check;
///
/// let store = AttributeStore::from_columns(QuaternionConvention::Wxyz, [("x", vec![0.0])]).unwrap();
/// assert!(check(&store, &["x"]).is_ok());
/// assert_eq!(check(&store, &["x", "y", "z"]).unwrap_err().missing_names(), ["y", "z"]);
/// ```
pub fn check<S: AsRef<str>>(store: &AttributeStore, required: &[S]) -> Result<()> {
    let missing = missing_attributes(store, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SplatError::MissingAttributes(missing))
    }
}

/// [`check`] against [`REQUIRED_ATTRIBUTES`].
pub fn check_vertex_schema(store: &AttributeStore) -> Result<()> {
    check(store, &REQUIRED_ATTRIBUTES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute_store::QuaternionConvention;

    fn store_without(skip: &[&str]) -> AttributeStore {
        let columns = REQUIRED_ATTRIBUTES
            .iter()
            .filter(|name| !skip.contains(name))
            .map(|name| (*name, vec![0.0f32; 2]));
        AttributeStore::from_columns(QuaternionConvention::Wxyz, columns).unwrap()
    }

    #[test]
    fn complete_store_passes() {
        assert!(check_vertex_schema(&store_without(&[])).is_ok());
    }

    #[test]
    fn reports_all_missing_names() {
        let store = store_without(&["rot_2", "opacity"]);
        match check_vertex_schema(&store) {
            Err(SplatError::MissingAttributes(names)) => assert_eq!(names, ["opacity", "rot_2"]),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn repeated_required_names_are_reported_once() {
        let store = store_without(&["x"]);
        assert_eq!(missing_attributes(&store, &["x", "x", "y"]), ["x"]);
    }

    #[test]
    fn canonical_order_is_a_permutation_of_required() {
        let mut a = REQUIRED_ATTRIBUTES.to_vec();
        let mut b = CANONICAL_ORDER.to_vec();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }
}
