//! The frame's render passes.

mod composite;
mod reflection;
mod refraction;
mod scene;

pub use composite::CompositePass;
pub use reflection::ReflectionPass;
pub use refraction::RefractionPass;
