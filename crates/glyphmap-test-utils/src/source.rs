//! A counting, fault-injecting [`ArraySource`].

use glyphmap_arena::{try_alloc_array, AllocSite, AllocationError, ArraySource};
use glyphmap_core::Level;

/// Wraps the system allocator, recording every acquisition and release.
///
/// Configure a failure with [`fail_at`](CountingSource::fail_at) (a
/// specific site) or [`fail_on_nth`](CountingSource::fail_on_nth) (the
/// n-th acquisition, counting from zero). A failed acquisition is not
/// counted as acquired.
#[derive(Debug, Default)]
pub struct CountingSource {
    fail_site: Option<AllocSite>,
    fail_nth: Option<usize>,
    attempts: usize,
    acquired: Vec<AllocSite>,
    released: [usize; 4],
    live: [usize; 4],
}

impl CountingSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the acquisition of `site`.
    pub fn fail_at(site: AllocSite) -> Self {
        Self {
            fail_site: Some(site),
            ..Self::default()
        }
    }

    /// Fail the n-th acquisition attempt (zero-based).
    pub fn fail_on_nth(n: usize) -> Self {
        Self {
            fail_nth: Some(n),
            ..Self::default()
        }
    }

    /// Stop injecting failures.
    pub fn disarm(&mut self) {
        self.fail_site = None;
        self.fail_nth = None;
    }

    /// Acquisition attempts so far, including failed ones.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Sites successfully acquired, in order.
    pub fn acquired(&self) -> &[AllocSite] {
        &self.acquired
    }

    /// Total arrays released.
    pub fn released(&self) -> usize {
        self.released.iter().sum()
    }

    /// Arrays acquired and not yet released.
    pub fn live(&self) -> usize {
        self.live.iter().sum()
    }

    /// Live arrays at `level`.
    pub fn live_at(&self, level: Level) -> usize {
        self.live[level.depth()]
    }

    /// Arrays released at `level`.
    pub fn released_at(&self, level: Level) -> usize {
        self.released[level.depth()]
    }
}

impl ArraySource for CountingSource {
    fn acquire<T: Clone>(
        &mut self,
        site: AllocSite,
        len: usize,
        fill: T,
    ) -> Result<Box<[T]>, AllocationError> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_site == Some(site) || self.fail_nth == Some(attempt) {
            return Err(AllocationError {
                site,
                requested: len,
            });
        }
        let array = try_alloc_array(site, len, fill)?;
        self.acquired.push(site);
        self.live[site.level.depth()] += 1;
        Ok(array)
    }

    fn release<T>(&mut self, level: Level, array: Box<[T]>) {
        let depth = level.depth();
        assert!(
            self.live[depth] > 0,
            "released a {level} array that was never acquired"
        );
        self.live[depth] -= 1;
        self.released[depth] += 1;
        drop(array);
    }
}
