//! Name-keyed tables for member lookup and the type registry.
//!
//! `hashbrown` with a `foldhash` hasher under a constant seed, so lookups
//! and registry iteration behave the same in every process.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

const NAME_SEED: FixedState = FixedState::with_seed(0x5C3A_91D7_0E6B_F248);

/// Hasher of the member lookup tables in [`TypeInfo`](crate::TypeInfo)
/// and of the [`TypeRegistry`](crate::TypeRegistry).
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct NameHashState;

impl BuildHasher for NameHashState {
    type Hasher = FoldHasher<'static>;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        NAME_SEED.build_hasher()
    }
}

/// Member name → member index, or type name → type.
pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, NameHashState>;
