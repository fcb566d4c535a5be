//! Quaternion component orders and byte quantization.
//!
//! Converting between [`QuaternionConvention`]s is a fixed permutation of the
//! four components. Values are never altered, so a non-unit or zero
//! quaternion survives the conversion unchanged.
//!
//! [`QuaternionConvention`]: crate::attribute_store::QuaternionConvention

/// `(w, x, y, z)` to `(x, y, z, w)`.
///
/// Generic so that whole columns can be permuted as well as single values.
pub fn wxyz_to_xyzw<T: Copy>(q: [T; 4]) -> [T; 4] {
    [q[1], q[2], q[3], q[0]]
}

/// `(x, y, z, w)` to `(w, x, y, z)`. Inverse of [`wxyz_to_xyzw`].
pub fn xyzw_to_wxyz<T: Copy>(q: [T; 4]) -> [T; 4] {
    [q[3], q[0], q[1], q[2]]
}

/// Euclidean norm, accumulated in `f64` so that no finite `f32` input
/// overflows to infinity or underflows to zero.
pub fn norm(q: [f32; 4]) -> f64 {
    q.iter().map(|&c| (c as f64).powi(2)).sum::<f64>().sqrt()
}

/// Scales `q` to unit length. A zero-length quaternion is returned as is.
pub fn normalize_or_keep(q: [f32; 4]) -> [f32; 4] {
    let n = norm(q);
    if n > 0.0 {
        q.map(|c| (c as f64 / n) as f32)
    } else {
        q
    }
}

/// Maps a unit quaternion component from `[-1, 1]` to a byte centred on 128.
///
/// `round(clamp(c * 128 + 128, 0, 255))`, so `1.0` saturates at 255.
pub fn component_to_u8(c: f32) -> u8 {
    if c.is_nan() {
        return 128;
    }
    (c * 128.0 + 128.0).clamp(0.0, 255.0).round() as u8
}

/// Normalizes `q` and quantizes each component, keeping component order.
pub fn quantize(q: [f32; 4]) -> [u8; 4] {
    normalize_or_keep(q).map(component_to_u8)
}

/// Approximate inverse of [`component_to_u8`].
pub fn component_from_u8(b: u8) -> f32 {
    (b as f32 - 128.0) / 128.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_moves_w_last() {
        assert_eq!(wxyz_to_xyzw([1.0, 2.0, 3.0, 4.0]), [2.0, 3.0, 4.0, 1.0]);
        assert_eq!(xyzw_to_wxyz([2.0, 3.0, 4.0, 1.0]), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn identity_quaternion_quantizes_with_saturation() {
        assert_eq!(quantize([0.0, 0.0, 0.0, 1.0]), [128, 128, 128, 255]);
        assert_eq!(quantize([0.0, 0.0, 0.0, -1.0]), [128, 128, 128, 0]);
    }

    #[test]
    fn non_unit_quaternion_is_normalized_first() {
        assert_eq!(quantize([0.0, 0.0, 0.0, 2.0]), [128, 128, 128, 255]);
        assert_eq!(quantize([3.0, 0.0, 4.0, 0.0]), [205, 128, 230, 128]);
    }

    #[test]
    fn extreme_magnitudes_normalize_like_unit_scale() {
        assert_eq!(quantize([3.0e19, 0.0, 4.0e19, 0.0]), [205, 128, 230, 128]);
        assert_eq!(quantize([0.0, 0.0, 0.0, 1.0e-30]), [128, 128, 128, 255]);
        assert_eq!(quantize([f32::MAX, 0.0, 0.0, 0.0]), [255, 128, 128, 128]);
        assert!(norm([0.0, 0.0, 0.0, 1.0e-30]) > 0.0);
    }

    #[test]
    fn zero_quaternion_is_left_unnormalized() {
        assert_eq!(normalize_or_keep([0.0; 4]), [0.0; 4]);
        assert_eq!(quantize([0.0; 4]), [128; 4]);
    }
}
