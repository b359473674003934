use crate::mesh::SurfaceMesh;
use crate::renderer::Renderer;
use rayon::prelude::*;
use seascape_common::{Color, FrameState};
use seascape_kernel::{WaveParameters, evaluate};

/// Per-vertex evaluation of a whole surface for one frame.
#[derive(Debug, Clone)]
pub struct Heightfield {
    pub columns: usize,
    pub rows: usize,
    /// Row-major, same order as [`SurfaceMesh::points`].
    pub heights: Vec<f32>,
    pub colors: Vec<Color>,
}

/// Summary statistics of a [`Heightfield`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightfieldStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

impl Heightfield {
    pub fn height_at(&self, column: usize, row: usize) -> Option<f32> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.heights.get(row * self.columns + column).copied()
    }

    pub fn stats(&self) -> HeightfieldStats {
        if self.heights.is_empty() {
            return HeightfieldStats {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
            };
        }
        let (min, max, sum) = self.heights.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY, 0.0f64),
            |(min, max, sum), &h| (min.min(h), max.max(h), sum + f64::from(h)),
        );
        HeightfieldStats {
            min,
            max,
            mean: (sum / self.heights.len() as f64) as f32,
        }
    }
}

/// CPU renderer: evaluates the wave field at every mesh vertex, one row per
/// rayon task. Produces the same displacement the GPU vertex stage computes.
#[derive(Debug)]
pub struct HeightfieldRenderer {
    mesh: SurfaceMesh,
}

impl HeightfieldRenderer {
    pub fn new(mesh: SurfaceMesh) -> Self {
        Self { mesh }
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }
}

impl Renderer for HeightfieldRenderer {
    type Output = Heightfield;

    fn render(&mut self, frame: &FrameState, params: &WaveParameters) -> Heightfield {
        let columns = self.mesh.columns();
        let rows = self.mesh.rows();
        let points = self.mesh.points();
        let t = frame.elapsed;

        let mut heights = vec![0.0f32; points.len()];
        let mut colors = vec![Color::BLACK; points.len()];
        heights
            .par_chunks_mut(columns)
            .zip(colors.par_chunks_mut(columns))
            .enumerate()
            .for_each(|(row, (h_row, c_row))| {
                let src = &points[row * columns..(row + 1) * columns];
                for ((p, h), c) in src.iter().zip(h_row).zip(c_row) {
                    let sample = evaluate(*p, t, params);
                    *h = sample.displacement;
                    *c = sample.color;
                }
            });

        Heightfield {
            columns,
            rows,
            heights,
            colors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seascape_common::SurfacePoint;

    #[test]
    fn matches_direct_evaluation() {
        let mesh = SurfaceMesh::plane(2.0, 2.0, 16, 8);
        let mut renderer = HeightfieldRenderer::new(mesh.clone());
        let params = WaveParameters::default();
        let field = renderer.render(&FrameState::at(2.5), &params);

        assert_eq!(field.columns, 17);
        assert_eq!(field.rows, 9);
        for (i, p) in mesh.points().iter().enumerate() {
            let s = evaluate(*p, 2.5, &params);
            assert_eq!(field.heights[i], s.displacement);
            assert_eq!(field.colors[i], s.color);
        }
    }

    #[test]
    fn centre_vertex_is_origin() {
        let mut renderer = HeightfieldRenderer::new(SurfaceMesh::plane(2.0, 2.0, 4, 4));
        let params = WaveParameters::default();
        let field = renderer.render(&FrameState::at(0.0), &params);
        assert_eq!(renderer.mesh().points()[12], SurfacePoint::ORIGIN);
        assert_eq!(field.height_at(2, 2), Some(0.0));
        assert_eq!(field.height_at(5, 0), None);
    }

    #[test]
    fn stats_bound_every_height() {
        let mut renderer = HeightfieldRenderer::new(SurfaceMesh::plane(2.0, 2.0, 32, 32));
        let field = renderer.render(&FrameState::at(1.0), &WaveParameters::default());
        let stats = field.stats();
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);
        assert!(field.heights.iter().all(|&h| h >= stats.min && h <= stats.max));
        // Primary amplitude 0.2 plus at most ~0.33 of ripple trough.
        assert!(stats.max <= 0.2 + 1e-6);
        assert!(stats.min >= -0.6);
    }
}
