use nalgebra::{Matrix2, Point2};

/// A site on the square lattice.
pub type LatticePoint = Point2<i32>;

/// A non-identity element of the dihedral group of order 8, acting on lattice vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Rotate90,
    Rotate180,
    Rotate270,
    ReflectX,
    ReflectY,
    ReflectDiagonal,
    ReflectAntiDiagonal,
}

impl Symmetry {
    pub const ALL: [Symmetry; 7] = [
        Symmetry::Rotate90,
        Symmetry::Rotate180,
        Symmetry::Rotate270,
        Symmetry::ReflectX,
        Symmetry::ReflectY,
        Symmetry::ReflectDiagonal,
        Symmetry::ReflectAntiDiagonal,
    ];

    pub fn matrix(&self) -> Matrix2<i32> {
        match self {
            Symmetry::Rotate90 => Matrix2::new(0, -1, 1, 0),
            Symmetry::Rotate180 => Matrix2::new(-1, 0, 0, -1),
            Symmetry::Rotate270 => Matrix2::new(0, 1, -1, 0),
            Symmetry::ReflectX => Matrix2::new(1, 0, 0, -1),
            Symmetry::ReflectY => Matrix2::new(-1, 0, 0, 1),
            Symmetry::ReflectDiagonal => Matrix2::new(0, 1, 1, 0),
            Symmetry::ReflectAntiDiagonal => Matrix2::new(0, -1, -1, 0),
        }
    }

    /// Applies the transformation to `point` with `origin` as the fixed point.
    #[inline]
    pub fn apply_about(&self, point: &LatticePoint, origin: &LatticePoint) -> LatticePoint {
        origin + self.matrix() * (point - origin)
    }
}

#[inline]
pub fn manhattan_distance(a: &LatticePoint, b: &LatticePoint) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[inline]
pub fn chebyshev_distance(a: &LatticePoint, b: &LatticePoint) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// The straight chain of `length` points running up the y-axis from the origin.
pub fn straight_line(length: usize) -> Vec<LatticePoint> {
    (0..length as i32).map(|y| LatticePoint::new(0, y)).collect()
}

/// Translates `coords` so that the first point sits at the origin.
pub fn normalize_translation(coords: &[LatticePoint]) -> Vec<(i32, i32)> {
    let Some(first) = coords.first() else {
        return Vec::new();
    };
    coords
        .iter()
        .map(|p| (p.x - first.x, p.y - first.y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_symmetry_is_an_orthogonal_integer_matrix() {
        for symmetry in Symmetry::ALL {
            let m = symmetry.matrix();
            assert_eq!(m.transpose() * m, Matrix2::identity(), "{:?}", symmetry);
            assert_eq!((m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)]).abs(), 1);
        }
    }

    #[test]
    fn identity_is_not_among_the_symmetries() {
        assert!(
            Symmetry::ALL
                .iter()
                .all(|s| s.matrix() != Matrix2::identity())
        );
    }

    #[test]
    fn symmetries_are_pairwise_distinct() {
        let matrices: HashSet<_> = Symmetry::ALL.iter().map(|s| s.matrix()).collect();
        assert_eq!(matrices.len(), 7);
    }

    #[test]
    fn apply_about_keeps_origin_fixed_and_preserves_distance() {
        let origin = LatticePoint::new(3, -2);
        let point = LatticePoint::new(5, 1);
        for symmetry in Symmetry::ALL {
            assert_eq!(symmetry.apply_about(&origin, &origin), origin);
            let moved = symmetry.apply_about(&point, &origin);
            assert_eq!(manhattan_distance(&moved, &origin), 5);
        }
    }

    #[test]
    fn rotate90_turns_x_axis_into_y_axis() {
        let moved = Symmetry::Rotate90.apply_about(&LatticePoint::new(1, 0), &LatticePoint::origin());
        assert_eq!(moved, LatticePoint::new(0, 1));
    }

    #[test]
    fn straight_line_runs_along_y_axis() {
        let line = straight_line(4);
        assert_eq!(
            line,
            vec![
                LatticePoint::new(0, 0),
                LatticePoint::new(0, 1),
                LatticePoint::new(0, 2),
                LatticePoint::new(0, 3)
            ]
        );
    }

    #[test]
    fn normalize_translation_moves_first_point_to_origin() {
        let coords = vec![LatticePoint::new(4, 4), LatticePoint::new(5, 4)];
        assert_eq!(normalize_translation(&coords), vec![(0, 0), (1, 0)]);
        assert!(normalize_translation(&[]).is_empty());
    }

    #[test]
    fn distances_match_definitions() {
        let a = LatticePoint::new(0, 0);
        let b = LatticePoint::new(1, 1);
        assert_eq!(manhattan_distance(&a, &b), 2);
        assert_eq!(chebyshev_distance(&a, &b), 1);
    }
}
