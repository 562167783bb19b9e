//! Small linear-algebra types used by the geometry and rendering code.

pub mod vec3;
