//! Patch-grid coordinates.

use std::fmt;

/// Coordinates of a patch in the patch grid (not world cells).
///
/// `PatchCoord(0, 0)` covers world cells `[0, n) × [0, n)` for patch size
/// `n`; negative patch coordinates cover negative world cells, following
/// `Position::patch_coords`'s `div_euclid` floor.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct PatchCoord {
    pub px: i64,
    pub py: i64,
}

impl PatchCoord {
    #[inline]
    pub const fn new(px: i64, py: i64) -> Self {
        Self { px, py }
    }

    /// The 8 patches orthogonally and diagonally adjacent to this one.
    pub fn ring(self) -> [PatchCoord; 8] {
        [
            PatchCoord::new(self.px - 1, self.py - 1),
            PatchCoord::new(self.px, self.py - 1),
            PatchCoord::new(self.px + 1, self.py - 1),
            PatchCoord::new(self.px - 1, self.py),
            PatchCoord::new(self.px + 1, self.py),
            PatchCoord::new(self.px - 1, self.py + 1),
            PatchCoord::new(self.px, self.py + 1),
            PatchCoord::new(self.px + 1, self.py + 1),
        ]
    }

    /// The 3×3 block of patches centered on this one, this patch included.
    pub fn block3x3(self) -> [PatchCoord; 9] {
        let mut out = [PatchCoord::new(0, 0); 9];
        out[0] = self;
        out[1..].copy_from_slice(&self.ring());
        out
    }

    /// World-space origin (lower-left corner) of this patch.
    #[inline]
    pub fn world_origin(self, patch_size: i64) -> (i64, i64) {
        (self.px * patch_size, self.py * patch_size)
    }
}

impl fmt::Display for PatchCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "patch({}, {})", self.px, self.py)
    }
}
