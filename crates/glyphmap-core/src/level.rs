//! Addressing levels of the nested grid.

use std::fmt;

/// One of the four depths of a world.
///
/// Ordered from the top of the nesting (`World`) to the leaf (`Local`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    /// The top-level world grid.
    #[default]
    World,
    /// The realm array owned by one world cell.
    Realm,
    /// The region array owned by one realm cell.
    Region,
    /// The local tile volume owned by one region cell.
    Local,
}

impl Level {
    /// All levels, top first.
    pub const ALL: [Level; 4] = [Level::World, Level::Realm, Level::Region, Level::Local];

    /// Nesting depth: 0 for `World`, 3 for `Local`.
    pub const fn depth(self) -> usize {
        match self {
            Self::World => 0,
            Self::Realm => 1,
            Self::Region => 2,
            Self::Local => 3,
        }
    }

    /// The level one step deeper, or `None` at `Local`.
    pub const fn child(self) -> Option<Level> {
        match self {
            Self::World => Some(Self::Realm),
            Self::Realm => Some(Self::Region),
            Self::Region => Some(Self::Local),
            Self::Local => None,
        }
    }

    /// The level one step up, or `None` at `World`.
    pub const fn parent(self) -> Option<Level> {
        match self {
            Self::World => None,
            Self::Realm => Some(Self::World),
            Self::Region => Some(Self::Realm),
            Self::Local => Some(Self::Region),
        }
    }

    /// Lower-case name used in log output and file names.
    pub const fn name(self) -> &'static str {
        match self {
            Self::World => "world",
            Self::Realm => "realm",
            Self::Region => "region",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_and_parent_are_inverse() {
        for level in Level::ALL {
            if let Some(child) = level.child() {
                assert_eq!(child.parent(), Some(level));
            }
        }
        assert_eq!(Level::World.parent(), None);
        assert_eq!(Level::Local.child(), None);
    }

    #[test]
    fn depth_matches_order() {
        for (i, level) in Level::ALL.iter().enumerate() {
            assert_eq!(level.depth(), i);
        }
        assert!(Level::World < Level::Local);
    }
}
