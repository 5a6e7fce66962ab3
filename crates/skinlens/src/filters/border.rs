//! Border extrapolation shared by the neighborhood filters.

/// Reflect-101 index mapping (`dcb|abcd|cba`): the edge pixel is not repeated.
#[inline]
pub(crate) fn reflect101(i: i64, n: usize) -> usize {
    let n = n as i64;
    if n <= 1 {
        return 0;
    }
    let period = 2 * (n - 1);
    let mut i = i.rem_euclid(period);
    if i >= n {
        i = period - i;
    }
    i as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect101_mirrors_without_repeating_edge() {
        let n = 5;
        assert_eq!(reflect101(-1, n), 1);
        assert_eq!(reflect101(-2, n), 2);
        assert_eq!(reflect101(0, n), 0);
        assert_eq!(reflect101(4, n), 4);
        assert_eq!(reflect101(5, n), 3);
        assert_eq!(reflect101(6, n), 2);
    }

    #[test]
    fn reflect101_handles_far_and_degenerate_indices() {
        assert_eq!(reflect101(-9, 3), 1);
        assert_eq!(reflect101(17, 1), 0);
        assert_eq!(reflect101(-3, 2), 1);
    }
}
