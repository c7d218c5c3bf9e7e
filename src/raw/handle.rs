use core::num::NonZero;

#[cfg(test)]
type RawIndex = u16;
#[cfg(not(test))]
type RawIndex = u32;

/// A generational index into an [`Arena`](super::arena::Arena).
///
/// The index is stored off by one so that `Option<Handle>` costs nothing extra. The generation
/// distinguishes successive occupants of the same slot, which lets a stale handle be detected
/// instead of silently aliasing whatever element was allocated there later.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Handle {
    index: NonZero<RawIndex>,
    generation: u32,
}

impl Handle {
    pub(crate) const MAX: usize = (RawIndex::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn new(index: usize, generation: u32) -> Self {
        assert!(index <= Self::MAX, "`Handle::new()` - `index` > `Handle::MAX`!");
        // `index + 1` cannot be zero and cannot overflow.
        #[allow(clippy::cast_possible_truncation)]
        let index = NonZero::new((index + 1) as RawIndex).unwrap();
        Self { index, generation }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.index.get() - 1) as usize
    }

    #[inline]
    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // The niche in `index` must make `Option<Handle>` free.
    assert_eq_size!(Handle, Option<Handle>);

    #[test]
    #[should_panic(expected = "`Handle::new()` - `index` > `Handle::MAX`!")]
    fn invalid_handle() {
        let _ = Handle::new(Handle::MAX + 1, 0);
    }

    #[test]
    fn generation_is_part_of_identity() {
        assert_ne!(Handle::new(3, 0), Handle::new(3, 1));
        assert_eq!(Handle::new(3, 7), Handle::new(3, 7));
    }

    proptest! {
        #[test]
        fn handle_round_trip(index in 0..=Handle::MAX, generation in any::<u32>()) {
            let handle = Handle::new(index, generation);
            prop_assert_eq!(handle.index(), index);
            prop_assert_eq!(handle.generation(), generation);
        }
    }
}
