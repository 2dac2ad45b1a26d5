//! Random permutations and bipolar seed hypervectors.
//!
//! All randomness is drawn from a caller-owned [`Rng`], so a model build is
//! reproducible from its seed and concurrent builds never share state.

use rand::Rng;

use crate::arena::try_filled;
use crate::error::{HdcError, Result};
use crate::hypervector::Hypervector;

/// Random permutation of `0..n` (Fisher-Yates).
///
/// For every `i` in `0..n-1` a `j` is drawn uniformly from `[i, n)` and the two
/// positions are swapped, so every element can reach every slot.
///
/// # Errors
///
/// Returns [`HdcError::AllocationFailure`] if the permutation cannot be
/// allocated.
///
/// # Examples
///
/// ```
/// use emg_hdc::random::rand_perm;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let mut perm = rand_perm(10, &mut rng).unwrap();
/// perm.sort_unstable();
/// assert_eq!(perm, (0..10).collect::<Vec<_>>());
/// ```
pub fn rand_perm<R: Rng>(n: usize, rng: &mut R) -> Result<Vec<usize>> {
    let mut perm = try_filled("permutation", n, 0)?;
    for (i, slot) in perm.iter_mut().enumerate() {
        *slot = i;
    }
    for i in 0..n.saturating_sub(1) {
        let j = rng.gen_range(i..n);
        perm.swap(i, j);
    }
    Ok(perm)
}

/// Generate a random bipolar hypervector with zero component sum.
///
/// Positions are shuffled with [`rand_perm`]; the first `len / 2` shuffled
/// positions get +1 and the rest get -1.
///
/// # Errors
///
/// Returns [`HdcError::InvalidArgument`] if `len` is zero or odd and
/// [`HdcError::AllocationFailure`] if the vector cannot be allocated.
///
/// # Examples
///
/// ```
/// use emg_hdc::random::gen_random_hv;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let hv = gen_random_hv(1000, &mut rng).unwrap();
/// assert!(hv.is_bipolar());
/// assert_eq!(hv.sum(), 0.0);
///
/// assert!(gen_random_hv(999, &mut rng).is_err());
/// ```
pub fn gen_random_hv<R: Rng>(len: usize, rng: &mut R) -> Result<Hypervector> {
    if len == 0 || len % 2 != 0 {
        return Err(HdcError::InvalidArgument(format!(
            "hypervector length must be even and non-zero, got {len}"
        )));
    }

    let perm = rand_perm(len, rng)?;
    let mut data = try_filled("random hypervector", len, -1.0)?;
    for &pos in &perm[..len / 2] {
        data[pos] = 1.0;
    }

    Ok(Hypervector::from_vec(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rand_perm_is_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for n in [0, 1, 2, 3, 17, 256] {
            let perm = rand_perm(n, &mut rng).unwrap();
            let mut seen = vec![false; n];
            for &p in &perm {
                assert!(!seen[p], "index {p} repeated for n={n}");
                seen[p] = true;
            }
            assert!(seen.iter().all(|&s| s), "missing index for n={n}");
        }
    }

    #[test]
    fn test_rand_perm_reaches_last_pair() {
        // With two elements the only draw is at i = 0; both orders must occur.
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut swapped = 0;
        for _ in 0..200 {
            if rand_perm(2, &mut rng).unwrap() == vec![1, 0] {
                swapped += 1;
            }
        }
        assert!(swapped > 50 && swapped < 150, "swapped {swapped}/200");
    }

    #[test]
    fn test_rand_perm_last_element_moves() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let n = 8;
        let moved = (0..500)
            .filter(|_| rand_perm(n, &mut rng).unwrap()[n - 1] != n - 1)
            .count();
        // Stays put with probability 1/n.
        assert!(moved > 350, "last slot changed only {moved}/500 times");
    }

    #[test]
    fn test_rand_perm_deterministic() {
        let a = rand_perm(100, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        let b = rand_perm(100, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        let c = rand_perm(100, &mut ChaCha8Rng::seed_from_u64(43)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_gen_random_hv_balanced() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for len in [2, 4, 10, 1000] {
            let hv = gen_random_hv(len, &mut rng).unwrap();
            assert_eq!(hv.len(), len);
            assert!(hv.is_bipolar());
            assert_eq!(hv.sum(), 0.0);
        }
    }

    #[test]
    fn test_gen_random_hv_rejects_odd_and_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(matches!(
            gen_random_hv(7, &mut rng),
            Err(HdcError::InvalidArgument(_))
        ));
        assert!(gen_random_hv(0, &mut rng).is_err());
    }

    #[test]
    fn test_unallocatable_lengths_are_errors() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(matches!(
            rand_perm(usize::MAX, &mut rng),
            Err(HdcError::AllocationFailure {
                what: "permutation",
                ..
            })
        ));
        assert!(matches!(
            gen_random_hv(usize::MAX - 1, &mut rng),
            Err(HdcError::AllocationFailure { .. })
        ));
    }

    #[test]
    fn test_random_hvs_nearly_orthogonal() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let a = gen_random_hv(10_000, &mut rng).unwrap();
        let b = gen_random_hv(10_000, &mut rng).unwrap();
        let sim = a.cosine(&b).unwrap();
        assert!(sim.abs() < 0.05, "similarity {sim} too far from 0");
    }
}
