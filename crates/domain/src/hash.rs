//! Deterministic palette index hashing
//!
//! The hash is an additive code-point checksum reduced modulo the palette
//! size. It is order-insensitive and collides freely across keys; the only
//! contract is that the same key maps to the same index for the process
//! lifetime. Color assignment per domain string is observable behavior, so
//! the algorithm must not be swapped for a better-distributed hash.

/// Map a key to an index in `[0, n)` for a non-empty palette of size `n`
pub fn palette_index(key: &str, n: usize) -> usize {
    debug_assert!(n > 0, "palette must be non-empty");
    let sum = key
        .chars()
        .fold(0u64, |acc, ch| acc.wrapping_add(ch as u64));
    (sum % n as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_in_range() {
        for n in 1..=16 {
            for key in ["", "a", "example.com", "x.com", "쀀.example"] {
                assert!(palette_index(key, n) < n, "key {key:?}, n {n}");
            }
        }
    }

    #[test]
    fn repeated_calls_agree() {
        let first = palette_index("news.ycombinator.com", 8);
        for _ in 0..100 {
            assert_eq!(palette_index("news.ycombinator.com", 8), first);
        }
    }

    #[test]
    fn known_sums() {
        // "ab" = 97 + 98 = 195
        assert_eq!(palette_index("ab", 8), 195 % 8);
        // empty key sums to zero
        assert_eq!(palette_index("", 8), 0);
    }

    #[test]
    fn anagrams_collide() {
        // Order-insensitive by construction; collisions are accepted.
        assert_eq!(palette_index("ab.com", 8), palette_index("ba.com", 8));
    }
}
