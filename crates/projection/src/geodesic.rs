//! Great-circle densification.
//!
//! Mesh edges are geodesics on the sphere. To draw them in a map projection
//! each edge is sampled along its great circle so that no step is longer than
//! [`GEODESIC_STEP_DEG`].

use nalgebra::Vector3;

/// Maximum angular step between consecutive samples, in degrees.
pub const GEODESIC_STEP_DEG: f64 = 0.5;

fn unit_vector(lon_deg: f64, lat_deg: f64) -> Vector3<f64> {
    let (sin_lon, cos_lon) = lon_deg.to_radians().sin_cos();
    let (sin_lat, cos_lat) = lat_deg.to_radians().sin_cos();
    Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

fn slerp(a: &Vector3<f64>, b: &Vector3<f64>, omega: f64, t: f64) -> Vector3<f64> {
    let sin_omega = omega.sin();
    if sin_omega.abs() < 1e-9 {
        let v = a + (b - a) * t;
        return v / v.norm().max(1e-12);
    }
    a * (((1.0 - t) * omega).sin() / sin_omega) + b * ((t * omega).sin() / sin_omega)
}

/// Sample the great circle from `a` to `b` (lon, lat in degrees).
///
/// Endpoints are returned exactly as given. A sample falling on a pole reuses
/// the previous longitude so the path stays continuous on a flat map.
pub fn great_circle(a: (f64, f64), b: (f64, f64), max_step_deg: f64) -> Vec<(f64, f64)> {
    let va = unit_vector(a.0, a.1);
    let vb = unit_vector(b.0, b.1);
    let omega = va.dot(&vb).clamp(-1.0, 1.0).acos();

    let step = max_step_deg.max(1e-6).to_radians();
    let steps = ((omega / step - 1e-9).ceil() as usize).max(1);

    let mut points = Vec::with_capacity(steps + 1);
    points.push(a);
    let mut prev_lon = a.0;
    for k in 1..steps {
        let v = slerp(&va, &vb, omega, k as f64 / steps as f64);
        let horizontal = v.x.hypot(v.y);
        let lon = if horizontal < 1e-12 {
            prev_lon
        } else {
            v.y.atan2(v.x).to_degrees()
        };
        let lat = v.z.atan2(horizontal).to_degrees();
        points.push((lon, lat));
        prev_lon = lon;
    }
    points.push(b);
    points
}
