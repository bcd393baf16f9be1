use crate::geometry::{centroid, Point3};

/// Shape drawn through a small set of pitches.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
  /// Two pitches: a single line.
  Line { from: Point3, to: Point3 },

  /// Three or more: a closed loop plus a triangle fan from the centroid.
  Polygon {
    /// Loop vertices with the first repeated at the end.
    points: Vec<Point3>,
    centroid: Point3,
    /// One triangle per loop edge: `[centroid, a, b]`.
    fan: Vec<[Point3; 3]>,
  },
}

impl Outline {
  /// Builds the outline through `points` in the given order. Fewer than two points
  /// have no outline.
  pub fn through(points: &[Point3]) -> Option<Outline> {
    match points {
      [] | [_] => None,
      [from, to] => Some(Outline::Line {
        from: *from,
        to: *to,
      }),
      _ => {
        let center = centroid(points)?;
        let fan = points
          .iter()
          .zip(points.iter().cycle().skip(1))
          .map(|(a, b)| [center, *a, *b])
          .collect();
        let mut closed = points.to_vec();
        closed.push(points[0]);
        Some(Outline::Polygon {
          points: closed,
          centroid: center,
          fan,
        })
      }
    }
  }

  /// Number of distinct vertices the outline passes through.
  pub fn vertex_count(&self) -> usize {
    match self {
      Outline::Line { .. } => 2,
      Outline::Polygon { points, .. } => points.len() - 1,
    }
  }
}
