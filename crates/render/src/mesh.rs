use seascape_common::SurfacePoint;

/// Flat grid mesh lying in the XZ plane, centred on the origin.
///
/// Vertices are laid out row by row along +Z, each row running along +X.
/// Every cell is split into two triangles.
#[derive(Debug, Clone)]
pub struct SurfaceMesh {
    width: f32,
    depth: f32,
    segments_x: u32,
    segments_z: u32,
    points: Vec<SurfacePoint>,
    indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Size of the water plane in the demo scene.
    pub const WATER_SIZE: f32 = 2.0;
    /// Subdivisions per side of the water plane in the demo scene.
    pub const WATER_SEGMENTS: u32 = 512;

    /// The demo's 2x2 plane with 512x512 subdivisions.
    pub fn water_plane() -> Self {
        Self::plane(
            Self::WATER_SIZE,
            Self::WATER_SIZE,
            Self::WATER_SEGMENTS,
            Self::WATER_SEGMENTS,
        )
    }

    /// Build a plane. Segment counts below 1 are raised to 1.
    pub fn plane(width: f32, depth: f32, segments_x: u32, segments_z: u32) -> Self {
        let segments_x = segments_x.max(1);
        let segments_z = segments_z.max(1);
        let columns = segments_x + 1;
        let rows = segments_z + 1;
        let step_x = width / segments_x as f32;
        let step_z = depth / segments_z as f32;

        let mut points = Vec::with_capacity((columns * rows) as usize);
        for iz in 0..rows {
            let z = iz as f32 * step_z - depth * 0.5;
            for ix in 0..columns {
                let x = ix as f32 * step_x - width * 0.5;
                points.push(SurfacePoint::new(x, z));
            }
        }

        let mut indices = Vec::with_capacity((segments_x * segments_z * 6) as usize);
        for iz in 0..segments_z {
            for ix in 0..segments_x {
                let a = ix + columns * iz;
                let b = ix + columns * (iz + 1);
                let c = ix + 1 + columns * (iz + 1);
                let d = ix + 1 + columns * iz;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            width,
            depth,
            segments_x,
            segments_z,
            points,
            indices,
        }
    }

    pub fn points(&self) -> &[SurfacePoint] {
        &self.points
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertices per row (segments along X plus one).
    pub fn columns(&self) -> usize {
        self.segments_x as usize + 1
    }

    /// Number of rows (segments along Z plus one).
    pub fn rows(&self) -> usize {
        self.segments_z as usize + 1
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.depth)
    }

    pub fn segments(&self) -> (u32, u32) {
        (self.segments_x, self.segments_z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_plane_topology() {
        let mesh = SurfaceMesh::water_plane();
        assert_eq!(mesh.vertex_count(), 513 * 513);
        assert_eq!(mesh.triangle_count(), 512 * 512 * 2);
        assert_eq!(mesh.columns(), 513);
        assert_eq!(mesh.rows(), 513);
    }

    #[test]
    fn plane_is_centred_and_spans_its_size() {
        let mesh = SurfaceMesh::plane(2.0, 4.0, 4, 2);
        let first = mesh.points()[0];
        let last = *mesh.points().last().unwrap();
        assert_eq!(first, SurfacePoint::new(-1.0, -2.0));
        assert_eq!(last, SurfacePoint::new(1.0, 2.0));
        // Rows run along +X.
        assert_eq!(mesh.points()[1], SurfacePoint::new(-0.5, -2.0));
    }

    #[test]
    fn indices_stay_in_bounds() {
        let mesh = SurfaceMesh::plane(1.0, 1.0, 7, 3);
        let n = mesh.vertex_count() as u32;
        assert!(mesh.indices().iter().all(|&i| i < n));
        assert_eq!(mesh.indices().len(), 7 * 3 * 6);
        // First cell: (a, b, d), (b, c, d)
        assert_eq!(&mesh.indices()[..6], &[0, 8, 1, 8, 9, 1]);
    }

    #[test]
    fn zero_segments_are_raised_to_one() {
        let mesh = SurfaceMesh::plane(2.0, 2.0, 0, 0);
        assert_eq!(mesh.segments(), (1, 1));
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }
}
