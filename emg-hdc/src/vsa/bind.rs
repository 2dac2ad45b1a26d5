//! Bind operation (association via element-wise product).
//!
//! On bipolar {-1, +1} keys binding is its own inverse:
//! `bind(bind(a, b), b) == a`.

use crate::error::{check_len, Result};

/// Bind two vectors element-wise: `c[i] = a[i] * b[i]`.
///
/// # Errors
///
/// Returns [`HdcError::DimensionMismatch`](crate::HdcError::DimensionMismatch)
/// if the vectors differ in length.
///
/// # Examples
///
/// ```
/// use emg_hdc::vsa::entrywise_product;
///
/// let c = entrywise_product(&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0]).unwrap();
/// assert_eq!(c, vec![5.0, 12.0, 21.0, 32.0]);
///
/// // Self-inverse on a bipolar key
/// let key = [1.0, -1.0, -1.0, 1.0];
/// let restored = entrywise_product(&entrywise_product(&c, &key).unwrap(), &key).unwrap();
/// assert_eq!(restored, c);
/// ```
pub fn entrywise_product(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check_len(a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).collect())
}

/// Bind `key` into `target` in place.
///
/// # Errors
///
/// Returns [`HdcError::DimensionMismatch`](crate::HdcError::DimensionMismatch)
/// if the vectors differ in length.
pub fn bind_assign(target: &mut [f64], key: &[f64]) -> Result<()> {
    check_len(target.len(), key.len())?;
    for (t, k) in target.iter_mut().zip(key) {
        *t *= k;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HdcError;

    #[test]
    fn test_entrywise_product_literal() {
        let c = entrywise_product(&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0]).unwrap();
        assert_eq!(c, vec![5.0, 12.0, 21.0, 32.0]);
    }

    #[test]
    fn test_bind_self_inverse() {
        let a = [0.5, -3.0, 2.0, 7.0, -1.5, 4.0];
        let b = [1.0, -1.0, -1.0, 1.0, 1.0, -1.0];

        let bound = entrywise_product(&a, &b).unwrap();
        let recovered = entrywise_product(&bound, &b).unwrap();

        for i in 0..a.len() {
            assert_eq!(recovered[i], a[i], "mismatch at dimension {i}");
        }
    }

    #[test]
    fn test_bind_assign_matches_product() {
        let a = [2.0, -1.0, 0.0, 3.0];
        let b = [-1.0, -1.0, 1.0, 1.0];

        let mut target = a;
        bind_assign(&mut target, &b).unwrap();

        assert_eq!(target.to_vec(), entrywise_product(&a, &b).unwrap());
    }

    #[test]
    fn test_bind_mismatch() {
        assert!(matches!(
            entrywise_product(&[1.0, 2.0], &[1.0]),
            Err(HdcError::DimensionMismatch { .. })
        ));
        let mut t = [1.0; 3];
        assert!(bind_assign(&mut t, &[1.0; 4]).is_err());
        assert_eq!(t, [1.0; 3], "target untouched on error");
    }
}
