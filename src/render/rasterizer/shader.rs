//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer handles coverage, depth interpolation and the depth test.
//! The shader handles attribute interpolation and lighting.
//!
//! Shaders receive perspective-correct barycentric coordinates, so
//! interpolated attributes vary linearly across the triangle in world space
//! rather than in screen space.

use crate::colors::Rgb;
use crate::light::PointLight;
use crate::math::vec3::Vec3;

/// Trait for per-pixel shading computations.
///
/// The `lambda` parameter contains three weights [λ₀, λ₁, λ₂] that sum to 1.0
/// for any point inside the triangle and can interpolate any per-vertex
/// attribute: `attr_at_pixel = λ₀*attr₀ + λ₁*attr₁ + λ₂*attr₂`.
pub trait PixelShader {
    fn shade(&self, lambda: [f64; 3]) -> u32;
}

/// Constant color for every pixel.
///
/// Serves both unlit rendering and flat shading, where the single face
/// intensity is folded into the color before rasterizing.
pub struct FlatShader {
    color: u32,
}

impl FlatShader {
    pub fn new(color: u32) -> Self {
        Self { color }
    }

    /// Lights a whole face once, at its centroid.
    pub fn lit(base: Rgb, light: &PointLight, face_normal: Vec3, corners: [Vec3; 3]) -> Self {
        let centroid = (corners[0] + corners[1] + corners[2]) / 3.0;
        Self::new(base.scale(light.intensity(face_normal, centroid)).pack())
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _lambda: [f64; 3]) -> u32 {
        self.color
    }
}

/// Gouraud shader - lights each vertex once and interpolates the intensity.
pub struct GouraudShader {
    intensities: [f64; 3],
    base: Rgb,
}

impl GouraudShader {
    pub fn new(
        base: Rgb,
        light: &PointLight,
        vertex_normals: [Vec3; 3],
        corners: [Vec3; 3],
    ) -> Self {
        Self {
            intensities: [0, 1, 2].map(|i| light.intensity(vertex_normals[i], corners[i])),
            base,
        }
    }
}

impl PixelShader for GouraudShader {
    #[inline]
    fn shade(&self, lambda: [f64; 3]) -> u32 {
        let intensity = lambda[0] * self.intensities[0]
            + lambda[1] * self.intensities[1]
            + lambda[2] * self.intensities[2];
        self.base.scale(intensity).pack()
    }
}

/// Phong shader - interpolates vertex normals and world positions, then
/// lights every pixel on its own.
pub struct PhongShader<'a> {
    normals: [Vec3; 3],
    corners: [Vec3; 3],
    light: &'a PointLight,
    base: Rgb,
}

impl<'a> PhongShader<'a> {
    pub fn new(
        base: Rgb,
        light: &'a PointLight,
        vertex_normals: [Vec3; 3],
        corners: [Vec3; 3],
    ) -> Self {
        Self {
            normals: vertex_normals,
            corners,
            light,
            base,
        }
    }
}

impl PixelShader for PhongShader<'_> {
    #[inline]
    fn shade(&self, lambda: [f64; 3]) -> u32 {
        let normal = Vec3::weighted(self.normals, lambda).normalize();
        let point = Vec3::weighted(self.corners, lambda);
        self.base.scale(self.light.intensity(normal, point)).pack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORNERS: [Vec3; 3] = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];

    #[test]
    fn flat_shader_fully_lit_from_above() {
        let light = PointLight::new(Vec3::new(1.0 / 3.0, 1.0 / 3.0, 10.0));
        let shader = FlatShader::lit(Rgb::WHITE, &light, Vec3::FORWARD, CORNERS);
        assert_eq!(shader.shade([0.2, 0.3, 0.5]), Rgb::WHITE.pack());
    }

    #[test]
    fn gouraud_interpolates_intensity() {
        let light = PointLight::new(Vec3::new(0.0, 0.0, 10.0));
        let normals = [Vec3::FORWARD, -Vec3::FORWARD, -Vec3::FORWARD];
        let shader = GouraudShader::new(Rgb::new(200, 200, 200), &light, normals, CORNERS);

        assert_eq!(shader.shade([1.0, 0.0, 0.0]), Rgb::new(200, 200, 200).pack());
        assert_eq!(shader.shade([0.0, 1.0, 0.0]), Rgb::BLACK.pack());
        assert_eq!(shader.shade([0.5, 0.25, 0.25]), Rgb::new(100, 100, 100).pack());
    }

    #[test]
    fn phong_renormalizes_interpolated_normal() {
        let light = PointLight::new(Vec3::new(0.5, 0.0, 1000.0));
        let tilt = Vec3::new(1.0, 0.0, 1.0).normalize();
        let normals = [tilt, Vec3::new(-tilt.x, 0.0, tilt.z), Vec3::FORWARD];
        let shader = PhongShader::new(Rgb::WHITE, &light, normals, CORNERS);

        // Halfway along the first edge the normals average to +Z.
        let color = shader.shade([0.5, 0.5, 0.0]);
        assert_eq!(color, Rgb::WHITE.pack());
    }
}
