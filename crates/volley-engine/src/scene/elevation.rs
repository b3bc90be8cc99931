use core::cmp::Ordering;

/// Depth index of a layer.
///
/// Lower values are painted first; higher values appear on top.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Elevation(pub i32);

impl Elevation {
    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}

impl From<i32> for Elevation {
    #[inline]
    fn from(v: i32) -> Self {
        Self(v)
    }
}

impl Ord for Elevation {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for Elevation {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
