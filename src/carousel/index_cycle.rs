use crate::error::{CarouselError, Result};

/// Position inside a fixed-length sequence. Every move wraps around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCycle {
    len: usize,
    current: usize,
}

impl IndexCycle {
    pub fn new(len: usize, initial: usize) -> Result<Self> {
        if len == 0 {
            return Err(CarouselError::EmptySequence);
        }
        if initial >= len {
            return Err(CarouselError::IndexOutOfRange { index: initial, len });
        }
        Ok(Self { len, current: initial })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == self.len - 1
    }

    /// Moves to `requested` reduced modulo the length and returns the
    /// index actually applied. Total over all integers.
    pub fn go_to(&mut self, requested: i64) -> usize {
        self.current = wrap(requested, self.len);
        self.current
    }

    pub fn next(&mut self) -> usize {
        self.go_to(self.current as i64 + 1)
    }

    pub fn prev(&mut self) -> usize {
        self.go_to(self.current as i64 - 1)
    }

    /// Index one step behind `index`, wrapping to the end.
    pub fn before(&self, index: usize) -> usize {
        wrap(index as i64 - 1, self.len)
    }
}

fn wrap(requested: i64, len: usize) -> usize {
    requested.rem_euclid(len as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_empty_and_out_of_range_starts() {
        assert_eq!(IndexCycle::new(0, 0), Err(CarouselError::EmptySequence));
        assert_eq!(
            IndexCycle::new(13, 13),
            Err(CarouselError::IndexOutOfRange { index: 13, len: 13 })
        );
    }

    #[test]
    fn wraps_at_both_ends() {
        let mut cycle = IndexCycle::new(4, 0).unwrap();
        assert_eq!(cycle.prev(), 3);
        assert!(cycle.is_last());
        assert_eq!(cycle.next(), 0);
        assert!(cycle.is_first());
        assert_eq!(cycle.go_to(-1), 3);
        assert_eq!(cycle.go_to(4), 0);
        assert_eq!(cycle.before(0), 3);
    }

    proptest! {
        #[test]
        fn go_to_matches_euclidean_modulo(k in any::<i32>(), len in 1usize..64) {
            let mut cycle = IndexCycle::new(len, 0).unwrap();
            let l = len as i64;
            let k = k as i64;
            prop_assert_eq!(cycle.go_to(k) as i64, ((k % l) + l) % l);
            prop_assert_eq!(cycle.current() as i64, ((k % l) + l) % l);
        }

        #[test]
        fn next_then_prev_returns_home(len in 1usize..64, start in 0usize..64) {
            let start = start % len;
            let mut cycle = IndexCycle::new(len, start).unwrap();
            cycle.next();
            prop_assert_eq!(cycle.prev(), start);
        }
    }
}
