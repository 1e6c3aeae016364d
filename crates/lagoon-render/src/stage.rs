//! Stage configuration.

use bitflags::bitflags;

bitflags! {
    /// Which scene stages the renderer draws.
    ///
    /// One configurable renderer replaces per-demo forks: a sky-only view,
    /// terrain without water, or the full three-pass water composition are
    /// all the same renderer with a different mask. Without `WATER` the
    /// offscreen reflection/refraction passes are never registered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StageMask: u32 {
        const SKYBOX  = 1 << 0;
        const TERRAIN = 1 << 1;
        const WATER   = 1 << 2;
    }
}

impl Default for StageMask {
    fn default() -> Self {
        Self::all()
    }
}
