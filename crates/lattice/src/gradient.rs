//! Linear two-color gradient swept across the lattice.
//!
//! Every vertex is projected onto a unit direction; the spread of those
//! projections normalises each triangle's mean projection into an
//! interpolation parameter `t` in `[0, 1]`.
use std::f64::consts::TAU;

use rand::Rng;
use tracing::debug;

use crate::color::Color;
use crate::error::LatticeError;
use crate::grid::{Lattice, Point, Vertex};
use crate::triangulate::Triangle;

/// Direction of a gradient sweep and the projection range it spans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientAxis {
    angle: f64,
    direction: Point,
    min: f64,
    max: f64,
}

impl GradientAxis {
    /// Axis at `angle` radians, ranged over the projections of `vertices`.
    pub fn new(angle: f64, vertices: &[Vertex]) -> Self {
        let direction = Point::new(angle.cos(), angle.sin());
        let (min, max) = vertices
            .iter()
            .map(|vertex| vertex.position.dot(direction))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p), hi.max(p))
            });
        Self {
            angle,
            direction,
            min,
            max,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn direction(&self) -> Point {
        self.direction
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn project(&self, point: Point) -> f64 {
        point.dot(self.direction)
    }

    /// Normalised position of a projection along the axis. A collapsed range
    /// maps everything to the midpoint.
    pub fn parameter(&self, projection: f64) -> f64 {
        let span = self.max - self.min;
        if !span.is_finite() || span <= f64::EPSILON * self.max.abs().max(1.0) {
            return 0.5;
        }
        ((projection - self.min) / span).clamp(0.0, 1.0)
    }

    /// Mean projection of the triangle's three corners.
    pub fn triangle_projection(&self, lattice: &Lattice, triangle: &Triangle) -> f64 {
        let sum: f64 = lattice
            .corners(triangle)
            .iter()
            .map(|corner| self.project(*corner))
            .sum();
        sum / 3.0
    }

    pub fn triangle_parameter(&self, lattice: &Lattice, triangle: &Triangle) -> f64 {
        self.parameter(self.triangle_projection(lattice, triangle))
    }
}

impl Lattice {
    /// Colors every triangle along a gradient from `from` to `to` in a random
    /// direction drawn from `[0, 2π)`.
    pub fn gradient_colors_random_direction<R: Rng + ?Sized>(
        &mut self,
        from: Color,
        to: Color,
        rng: &mut R,
    ) -> Result<GradientAxis, LatticeError> {
        let angle = rng.gen_range(0.0..TAU);
        self.gradient_colors(angle, from, to)
    }

    /// Colors every triangle along a gradient pointing at `angle` radians
    /// (0 sweeps left to right, π/2 top to bottom).
    pub fn gradient_colors(
        &mut self,
        angle: f64,
        from: Color,
        to: Color,
    ) -> Result<GradientAxis, LatticeError> {
        if self.triangles.is_empty() {
            return Err(LatticeError::NotTriangulated);
        }

        let axis = GradientAxis::new(angle, &self.vertices);
        let projections: Vec<f64> = self
            .vertices
            .iter()
            .map(|vertex| axis.project(vertex.position))
            .collect();

        for triangle in &mut self.triangles {
            let mean = triangle
                .vertices
                .iter()
                .map(|id| projections[id.index()])
                .sum::<f64>()
                / 3.0;
            triangle.color = from.lerp(to, axis.parameter(mean));
        }

        debug!(
            angle,
            %from,
            %to,
            min = axis.min,
            max = axis.max,
            "applied gradient colors"
        );
        Ok(axis)
    }
}
