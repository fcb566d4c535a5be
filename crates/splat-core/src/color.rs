//! Display color derived from zeroth-order SH coefficients and opacity.

use rayon::prelude::*;

use crate::attribute_store::AttributeStore;
use crate::schema::{COLOR_DC, OPACITY};
use crate::status::Result;

/// Normalization constant of the l=0 real spherical harmonic.
pub const SH_C0: f64 = 0.28209479177387814;

/// Logistic function that stays finite for any input magnitude.
///
/// # Examples
/// ```
/// use splat_core::color::sigmoid;
/// assert_eq!(sigmoid(0.0), 0.5);
/// assert_eq!(sigmoid(-1.0e6), 0.0);
/// assert_eq!(sigmoid(1.0e6), 1.0);
/// ```
pub fn sigmoid(v: f64) -> f64 {
    if v >= 0.0 {
        1.0 / (1.0 + (-v).exp())
    } else {
        let e = v.exp();
        e / (1.0 + e)
    }
}

/// Maps one DC color coefficient to a channel in `[0, 1]`.
pub fn dc_to_channel(f_dc: f32) -> f32 {
    (f_dc as f64 * SH_C0 + 0.5).clamp(0.0, 1.0) as f32
}

/// Maps a logit opacity to alpha in `[0, 1]`.
pub fn opacity_to_alpha(opacity: f32) -> f32 {
    sigmoid(opacity as f64).clamp(0.0, 1.0) as f32
}

/// Derives `[R, G, B, A]`, each in `[0, 1]`, for one point.
pub fn derive_rgba(f_dc: [f32; 3], opacity: f32) -> [f32; 4] {
    [
        dc_to_channel(f_dc[0]),
        dc_to_channel(f_dc[1]),
        dc_to_channel(f_dc[2]),
        opacity_to_alpha(opacity),
    ]
}

/// Quantizes a `[0, 1]` channel to a byte, rounding to nearest.
///
/// NaN maps to 0.
pub fn channel_to_u8(channel: f32) -> u8 {
    if channel.is_nan() {
        return 0;
    }
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub fn rgba_to_u8(rgba: [f32; 4]) -> [u8; 4] {
    rgba.map(channel_to_u8)
}

/// Per-point preview colors for every row of `store`.
///
/// Needs `f_dc_0..2` and `opacity`; works on source and standardized stores
/// alike since neither column is affected by standardization.
pub fn preview_colors(store: &AttributeStore) -> Result<Vec<[f32; 4]>> {
    let [r, g, b, a] = store.require_all([COLOR_DC[0], COLOR_DC[1], COLOR_DC[2], OPACITY])?;
    Ok((0..store.num_points())
        .into_par_iter()
        .map(|i| derive_rgba([r[i], g[i], b[i]], a[i]))
        .collect())
}
