//! Derivative-vector combination with implicit zero extension.
//!
//! Derivative vectors of two AD scalars need not have the same length: a slot
//! past the end of a vector is an exact zero. The helpers here iterate the
//! union of slots so that arithmetic never reads past either operand and never
//! drops a trailing slot.

/// Combines two derivative vectors slot by slot.
///
/// Returns a vector of length `max(a.len(), b.len())` where entry `k` is
/// `op(a[k], b[k])`, with absent entries read as `0.0`.
///
/// # Examples
///
/// ```
/// use ad_core::math::derivatives::combine_derivatives;
///
/// let sum = combine_derivatives(&[1.0, 2.0], &[10.0], |x, y| x + y);
/// assert_eq!(sum, vec![11.0, 2.0]);
/// ```
pub fn combine_derivatives<F>(a: &[f64], b: &[f64], op: F) -> Vec<f64>
where
    F: Fn(f64, f64) -> f64,
{
    let len = a.len().max(b.len());
    (0..len)
        .map(|k| {
            let x = a.get(k).copied().unwrap_or(0.0);
            let y = b.get(k).copied().unwrap_or(0.0);
            op(x, y)
        })
        .collect()
}

/// In-place `target += factor * other`, zero-extending `target` if needed.
///
/// `target` grows only when `other` is longer; it is never truncated. The
/// loop itself does not allocate once `target` has enough capacity.
///
/// # Examples
///
/// ```
/// use ad_core::math::derivatives::axpy_derivatives;
///
/// let mut target = vec![1.0];
/// axpy_derivatives(&mut target, &[1.0, 1.0, 1.0], -2.0);
/// assert_eq!(target, vec![-1.0, -2.0, -2.0]);
/// ```
#[inline]
pub fn axpy_derivatives(target: &mut Vec<f64>, other: &[f64], factor: f64) {
    if target.len() < other.len() {
        target.resize(other.len(), 0.0);
    }
    for (t, &o) in target.iter_mut().zip(other) {
        *t += o * factor;
    }
}

/// In-place scaling of every derivative entry.
#[inline]
pub fn scale_derivatives(target: &mut [f64], factor: f64) {
    for d in target.iter_mut() {
        *d *= factor;
    }
}
