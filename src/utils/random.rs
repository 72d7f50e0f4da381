//! Random number helpers.

use rand::{Rng, RngCore};

/// Random integer in `[min, max)`.
///
/// Returns `min` when the range is empty (`max <= min`).
pub fn random_int(min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    rand::thread_rng().gen_range(min..max)
}

/// `N` random bytes.
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_int_in_range() {
        for _ in 0..1000 {
            let n = random_int(-3, 4);
            assert!((-3..4).contains(&n), "{} out of range", n);
        }
    }

    #[test]
    fn test_random_int_excludes_max() {
        for _ in 0..100 {
            assert_eq!(random_int(5, 6), 5);
        }
    }

    #[test]
    fn test_random_int_empty_range() {
        assert_eq!(random_int(7, 7), 7);
        assert_eq!(random_int(10, 2), 10);
    }

    #[test]
    fn test_random_bytes_len() {
        let bytes: [u8; 16] = random_bytes();
        assert_eq!(bytes.len(), 16);
        assert!(random_bytes::<0>().is_empty());
    }
}
