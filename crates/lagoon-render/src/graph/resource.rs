//! Graph resource and pass identifiers.

/// Pass identifier
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct PassId(pub usize);

/// Handle to a render target or buffer the graph orders passes around.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct ResourceHandle(pub u64);

impl ResourceHandle {
    /// Deterministic handle derived from a resource name.
    pub fn named(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// The reflection offscreen color target.
    pub fn reflection() -> Self {
        Self::named("water.reflection")
    }

    /// The refraction offscreen color target.
    pub fn refraction() -> Self {
        Self::named("water.refraction")
    }

    /// The visible frame target.
    pub fn frame() -> Self {
        Self::named("frame.color")
    }
}
