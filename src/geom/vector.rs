use crate::geom::EPS;
use crate::geom::ray::Axis;
use std::ops::Mul;

/// Direction in site space: `dx` east, `dy` plan south, `dz` up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Vector {
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self { dx, dy, dz }
    }

    pub fn length(&self) -> f64 {
        (self.plan_length().powi(2) + self.dz.powi(2)).sqrt()
    }

    /// Length of the horizontal part.
    pub fn plan_length(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.dx,
            Axis::Y => self.dy,
            Axis::Z => self.dz,
        }
    }

    pub fn is_close(&self, other: &Self) -> bool {
        [
            self.dx - other.dx,
            self.dy - other.dy,
            self.dz - other.dz,
        ]
        .iter()
        .all(|d| d.abs() < EPS)
    }
}

impl Mul<f64> for Vector {
    type Output = Self;
    fn mul(self, t: f64) -> Self {
        Self::new(self.dx * t, self.dy * t, self.dz * t)
    }
}
