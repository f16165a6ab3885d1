//! The seam through which every world array is acquired and released.

use std::fmt;

use glyphmap_core::Level;

use crate::error::AllocationError;

/// Identifies one array of a world by level and address.
///
/// Ordinals are flat paths, so a site names the same array no matter
/// which call is allocating it:
///
/// | level  | ordinal |
/// |--------|---------|
/// | world  | 0 |
/// | realm  | `world` |
/// | region | `world * realm_len + realm` |
/// | local  | `(world * realm_len + realm) * region_len + region` |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AllocSite {
    /// Level of the array's elements.
    pub level: Level,
    /// Flat address of the array within its level.
    pub ordinal: usize,
}

impl AllocSite {
    /// Create a site.
    pub const fn new(level: Level, ordinal: usize) -> Self {
        Self { level, ordinal }
    }
}

impl fmt::Display for AllocSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.level, self.ordinal)
    }
}

/// Provider of fixed-length arrays.
///
/// The allocator never allocates directly: every array goes through
/// `acquire` and, on teardown or rollback, back through `release`. This
/// is where tests inject failures and count live arrays.
pub trait ArraySource {
    /// Obtain an array of exactly `len` copies of `fill`.
    fn acquire<T: Clone>(
        &mut self,
        site: AllocSite,
        len: usize,
        fill: T,
    ) -> Result<Box<[T]>, AllocationError>;

    /// Return an array previously obtained from [`acquire`](Self::acquire).
    fn release<T>(&mut self, level: Level, array: Box<[T]>) {
        let _ = level;
        drop(array);
    }
}

/// Build a boxed array of `len` copies of `fill`, reporting allocator
/// exhaustion as an error instead of aborting.
pub fn try_alloc_array<T: Clone>(
    site: AllocSite,
    len: usize,
    fill: T,
) -> Result<Box<[T]>, AllocationError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| AllocationError {
            site,
            requested: len,
        })?;
    data.resize(len, fill);
    Ok(data.into_boxed_slice())
}

/// The global allocator, with fallible reservation.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemSource;

impl ArraySource for SystemSource {
    fn acquire<T: Clone>(
        &mut self,
        site: AllocSite,
        len: usize,
        fill: T,
    ) -> Result<Box<[T]>, AllocationError> {
        try_alloc_array(site, len, fill)
    }
}
