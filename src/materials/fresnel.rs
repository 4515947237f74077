// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};

/// Mirror `w` about `n`.
pub fn reflect(w: &Vector3f, n: &Vector3f) -> Vector3f {
    2.0 * w.dot(n) * n - w
}

/// Refract `w` through a surface with normal `n` on the side of `w`.
/// `eta` is eta_i / eta_t. `None` on total internal reflection.
pub fn refract(w: &Vector3f, n: &Vector3f, eta: Float) -> Option<Vector3f> {
    let cos_i = w.dot(n).max(-1.0).min(1.0);
    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let sin2_t = eta * eta * sin2_i;
    if sin2_t >= 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    Some(-eta * w + (eta * cos_i - cos_t) * n)
}

/// Unpolarized Fresnel reflectance. `cos_i` is measured against the normal
/// on the `eta_i` side; negative values swap the media.
pub fn fresnel_dielectric(cos_i: Float, eta_i: Float, eta_t: Float) -> Float {
    let mut cos_i = cos_i.max(-1.0).min(1.0);
    let entering = cos_i > 0.0;
    let (eta_i, eta_t) = if entering { (eta_i, eta_t) } else { (eta_t, eta_i) };
    cos_i = cos_i.abs();

    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let eta = eta_i / eta_t;
    let sin2_t = eta * eta * sin2_i;
    if sin2_t >= 1.0 {
        return 1.0;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    let r_parl = (eta_t * cos_i - eta_i * cos_t) / (eta_t * cos_i + eta_i * cos_t);
    let r_perp = (eta_i * cos_i - eta_t * cos_t) / (eta_i * cos_i + eta_t * cos_t);
    0.5 * (r_parl * r_parl + r_perp * r_perp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fresnel_normal_incidence() {
        // ((1 - 1.5) / (1 + 1.5))^2
        assert_relative_eq!(fresnel_dielectric(1.0, 1.0, 1.5), 0.04, epsilon = 1e-5);
        assert_relative_eq!(fresnel_dielectric(-1.0, 1.0, 1.5), 0.04, epsilon = 1e-5);
    }

    #[test]
    fn test_fresnel_total_internal_reflection() {
        // Leaving glass at a grazing angle.
        assert_eq!(fresnel_dielectric(-0.1, 1.0, 1.5), 1.0);
    }

    #[test]
    fn test_refract_obeys_snell() {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        let w = Vector3f::new(0.6, 0.0, 0.8);
        let t = refract(&w, &n, 1.0 / 1.5).expect("no tir");
        assert_relative_eq!(t.norm(), 1.0, epsilon = 1e-5);
        assert!(t.z < 0.0);
        // sin_t = sin_i / 1.5, opposite tangential direction
        assert_relative_eq!(t.x, -0.6 / 1.5, epsilon = 1e-5);

        let r = reflect(&w, &n);
        assert_relative_eq!(r.x, -0.6, epsilon = 1e-6);
        assert_relative_eq!(r.z, 0.8, epsilon = 1e-6);

        assert!(refract(&Vector3f::new(0.99, 0.0, 0.141), &n, 1.5).is_none());
    }
}
