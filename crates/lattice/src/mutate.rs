//! Random displacement of interior vertices.
//!
//! Each interior vertex draws `dx, dy` uniformly from `[-intensity, intensity]`.
//! Boundary vertices stay put so the canvas edge never opens up. Because
//! triangles hold vertex ids, a single write moves the corner of every triangle
//! touching that vertex.
//!
//! A candidate position is only accepted when every incident triangle keeps at
//! least `MIN_AREA_RATIO` of its regular-grid area. Rejected offsets are halved
//! up to `MAX_SHRINK_STEPS` times before the vertex is left where it is, so no
//! triangle can fold over its neighbour and displacement never exceeds the
//! requested intensity on either axis.
use rand::Rng;
use tracing::debug;

use crate::error::LatticeError;
use crate::grid::{signed_area, Lattice, Point};

/// Smallest fraction of its regular-grid area a triangle may shrink to.
pub const MIN_AREA_RATIO: f64 = 0.05;

/// How many times a rejected offset is halved before the vertex is pinned.
pub const MAX_SHRINK_STEPS: u32 = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationReport {
    /// Interior vertices moved by their full random offset.
    pub moved: usize,
    /// Interior vertices moved by a halved offset.
    pub shrunk: usize,
    /// Interior vertices left in place because no offset kept the mesh valid.
    pub pinned: usize,
}

impl Lattice {
    pub fn mutate<R: Rng + ?Sized>(
        &mut self,
        intensity: f64,
        rng: &mut R,
    ) -> Result<MutationReport, LatticeError> {
        if !intensity.is_finite() || intensity < 0.0 {
            return Err(LatticeError::InvalidIntensity(intensity));
        }
        if self.triangles.is_empty() {
            return Err(LatticeError::NotTriangulated);
        }

        let mut report = MutationReport::default();
        if intensity == 0.0 {
            debug!("mutation intensity is zero; lattice stays regular");
            return Ok(report);
        }

        let incident = self.incident_triangles();
        let min_area = MIN_AREA_RATIO * self.cell_size.width * self.cell_size.height / 2.0;

        for index in 0..self.vertices.len() {
            if self.vertices[index].boundary {
                continue;
            }

            let dx = rng.gen_range(-intensity..=intensity);
            let dy = rng.gen_range(-intensity..=intensity);
            let origin = self.vertices[index].position;

            let mut scale = 1.0;
            let mut accepted = None;
            for _ in 0..=MAX_SHRINK_STEPS {
                let candidate = Point::new(origin.x + dx * scale, origin.y + dy * scale);
                if self.keeps_area(index, candidate, &incident[index], min_area) {
                    accepted = Some(candidate);
                    break;
                }
                scale *= 0.5;
            }

            match accepted {
                Some(position) => {
                    self.vertices[index].position = position;
                    if scale < 1.0 {
                        report.shrunk += 1;
                    } else {
                        report.moved += 1;
                    }
                }
                None => report.pinned += 1,
            }
        }

        debug!(
            intensity,
            moved = report.moved,
            shrunk = report.shrunk,
            pinned = report.pinned,
            "mutated lattice"
        );
        Ok(report)
    }

    fn keeps_area(
        &self,
        index: usize,
        candidate: Point,
        triangles: &[usize],
        min_area: f64,
    ) -> bool {
        triangles.iter().all(|&t| {
            let [a, b, c] = self.triangles[t].vertices.map(|id| {
                if id.index() == index {
                    candidate
                } else {
                    self.vertices[id.index()].position
                }
            });
            signed_area(a, b, c) >= min_area
        })
    }
}
