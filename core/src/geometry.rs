use std::f64::consts::TAU;

pub use glam::DVec3 as Point3;

/// Just a typedef for the floating point type used for coordinates, etc.
pub type Float = f64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Angle {
  Degrees(Float),
  Radians(Float),
}

impl From<Float> for Angle {
  fn from(f: Float) -> Self {
    Angle::Degrees(f)
  }
}

impl Angle {
  pub fn as_degrees(&self) -> Float {
    match self {
      Angle::Degrees(d) => *d,
      Angle::Radians(r) => r.to_degrees(),
    }
  }

  pub fn as_radians(&self) -> Float {
    match self {
      Angle::Degrees(d) => d.to_radians(),
      Angle::Radians(r) => *r,
    }
  }
}

impl std::ops::Sub for Angle {
  type Output = Angle;

  fn sub(self, rhs: Angle) -> Angle {
    Angle::Radians(self.as_radians() - rhs.as_radians())
  }
}

/// Place a point on a horizontal circle of the given `radius` at height `y`.
///
/// Angle zero points along +z, and positive angles turn toward +x.
///
/// ```
/// use spiral_core::geometry::{on_circle, Angle};
/// let p = on_circle(2.0, Angle::Degrees(90.0), 1.0);
/// assert!((p.x - 2.0).abs() < 1e-12);
/// assert!(p.z.abs() < 1e-12);
/// assert_eq!(p.y, 1.0);
/// ```
pub fn on_circle(radius: Float, angle: Angle, y: Float) -> Point3 {
  let a = angle.as_radians();
  Point3::new(a.sin() * radius, y, a.cos() * radius)
}

/// Convert polar coordinates (radius, angle) around `center` in the XZ plane
/// to a point at height `y`, with angle zero along +x.
pub fn polar_to_cartesian(center: Point3, radius: Float, angle: Angle, y: Float) -> Point3 {
  let a = angle.as_radians();
  Point3::new(center.x + radius * a.cos(), y, center.z + radius * a.sin())
}

/// Returns `(radius, angle)` of `p` relative to `center` in the XZ plane.
pub fn cartesian_to_polar(center: Point3, p: Point3) -> (Float, Angle) {
  let dx = p.x - center.x;
  let dz = p.z - center.z;
  ((dx * dx + dz * dz).sqrt(), Angle::Radians(dz.atan2(dx)))
}

/// Linear interpolation written as `a·(1−t) + b·t`, so `t = 0` and `t = 1`
/// reproduce the endpoints exactly. Equal endpoints stay put for every `t`.
pub fn lerp(a: Float, b: Float, t: Float) -> Float {
  if a == b {
    return a;
  }
  a * (1.0 - t) + b * t
}

pub fn lerp_point(a: Point3, b: Point3, t: Float) -> Point3 {
  Point3::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t), lerp(a.z, b.z, t))
}

pub fn centroid(points: &[Point3]) -> Option<Point3> {
  if points.is_empty() {
    return None;
  }
  let sum = points.iter().fold(Point3::ZERO, |acc, p| acc + *p);
  Some(sum / points.len() as Float)
}

/// Samples a closed horizontal circle into `segments + 1` points; the last
/// point repeats the first.
pub fn ring_points(radius: Float, y: Float, segments: usize) -> Vec<Point3> {
  (0..=segments)
    .map(|i| {
      let a = (i % segments.max(1)) as Float / segments.max(1) as Float * TAU;
      on_circle(radius, Angle::Radians(a), y)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lerp_endpoints_are_exact() {
    let a = Point3::new(0.1, -3.7, 5.9);
    let b = Point3::new(-2.3, 0.3, 1.0 / 3.0);
    assert_eq!(lerp_point(a, b, 0.0), a);
    assert_eq!(lerp_point(a, b, 1.0), b);
  }

  #[test]
  fn lerp_between_equal_points_is_a_no_op() {
    let a = Point3::new(0.1, 0.7, -5.3);
    for i in 0..=10 {
      assert_eq!(lerp_point(a, a, i as Float / 10.0), a);
    }
  }

  #[test]
  fn polar_round_trip_recovers_radius() {
    let center = Point3::new(1.0, 0.0, -1.0);
    let p = polar_to_cartesian(center, 3.0, Angle::Degrees(45.0), 0.0);
    let (r, a) = cartesian_to_polar(center, p);
    assert!((r - 3.0).abs() < 1e-12);
    assert!((a.as_degrees() - 45.0).abs() < 1e-9);
  }

  #[test]
  fn ring_is_closed() {
    let pts = ring_points(6.0, 2.0, 64);
    assert_eq!(pts.len(), 65);
    assert_eq!(pts[0], pts[64]);
    assert!(pts.iter().all(|p| p.y == 2.0));
  }

  #[test]
  fn centroid_of_nothing_is_none() {
    assert!(centroid(&[]).is_none());
    let c = centroid(&[Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, 6.0)]).unwrap();
    assert_eq!(c, Point3::new(1.0, 2.0, 3.0));
  }
}
