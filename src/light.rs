//! Lighting for the renderer.

use crate::math::vec3::Vec3;

/// A single point light with diffuse-only (Lambert) reflectance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    /// Lowest intensity any lit surface receives. `0.0` disables it.
    pub ambient_floor: f64,
}

impl PointLight {
    pub fn new(position: Vec3) -> Self {
        PointLight {
            position,
            ambient_floor: 0.0,
        }
    }

    pub fn with_ambient_floor(position: Vec3, ambient_floor: f64) -> Self {
        PointLight {
            position,
            ambient_floor: ambient_floor.clamp(0.0, 1.0),
        }
    }

    /// Lambert intensity in `[0.0, 1.0]` for a surface point with the given
    /// unit normal: `max(0, normal · normalize(light - point))`, raised to the
    /// ambient floor.
    #[inline]
    pub fn intensity(&self, normal: Vec3, point: Vec3) -> f64 {
        let to_light = (self.position - point).normalize();
        normal.dot(to_light).max(0.0).max(self.ambient_floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_direct_illumination() {
        let light = PointLight::new(Vec3::new(0.0, 0.0, 10.0));
        let normal = Vec3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(light.intensity(normal, Vec3::ZERO), 1.0);
    }

    #[test]
    fn test_no_illumination_from_behind() {
        let light = PointLight::new(Vec3::new(0.0, 0.0, -10.0));
        let normal = Vec3::new(0.0, 0.0, 1.0);
        assert!(light.intensity(normal, Vec3::ZERO) == 0.0);
    }

    #[test]
    fn test_angled_illumination() {
        // Light at 45 degrees above the surface.
        let light = PointLight::new(Vec3::new(0.0, 5.0, 5.0));
        let normal = Vec3::new(0.0, 0.0, 1.0);
        let intensity = light.intensity(normal, Vec3::ZERO);
        assert_relative_eq!(intensity, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn test_ambient_floor() {
        let light = PointLight::with_ambient_floor(Vec3::new(0.0, 0.0, -10.0), 0.2);
        let normal = Vec3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(light.intensity(normal, Vec3::ZERO), 0.2);
    }

    #[test]
    fn test_light_at_surface_point() {
        let light = PointLight::new(Vec3::ZERO);
        assert_eq!(light.intensity(Vec3::FORWARD, Vec3::ZERO), 0.0);
    }
}
