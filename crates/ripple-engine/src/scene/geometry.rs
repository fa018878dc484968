use rand::Rng;

use crate::shading::PlaneVertex;

/// Subdivided plane in the local XY plane, centered on the origin, z = 0.
///
/// Vertices run row by row from the top edge (+y) down, each row left (−x)
/// to right (+x), giving `(segments_x + 1) * (segments_y + 1)` vertices.
#[derive(Debug, Clone)]
pub struct PlaneGeometry {
    width: f32,
    height: f32,
    segments_x: u32,
    segments_y: u32,

    positions: Vec<[f32; 3]>,
    indices: Vec<u32>,

    /// `aRandom`: one sample in [0, 1) per vertex once populated.
    a_random: Vec<f32>,
}

impl PlaneGeometry {
    /// Builds the grid. Segment counts below 1 are raised to 1.
    pub fn new(width: f32, height: f32, segments_x: u32, segments_y: u32) -> Self {
        let segments_x = segments_x.max(1);
        let segments_y = segments_y.max(1);
        let columns = segments_x + 1;
        let rows = segments_y + 1;

        let seg_w = width / segments_x as f32;
        let seg_h = height / segments_y as f32;

        let mut positions = Vec::with_capacity((columns * rows) as usize);
        for iy in 0..rows {
            let y = iy as f32 * seg_h - height / 2.0;
            for ix in 0..columns {
                let x = ix as f32 * seg_w - width / 2.0;
                positions.push([x, -y, 0.0]);
            }
        }

        let mut indices = Vec::with_capacity((segments_x * segments_y * 6) as usize);
        for iy in 0..segments_y {
            for ix in 0..segments_x {
                let a = ix + columns * iy;
                let b = ix + columns * (iy + 1);
                let c = (ix + 1) + columns * (iy + 1);
                let d = (ix + 1) + columns * iy;

                // Counter-clockwise seen from +Z.
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            width,
            height,
            segments_x,
            segments_y,
            positions,
            indices,
            a_random: Vec::new(),
        }
    }

    /// Populates `aRandom` with one uniform [0, 1) sample per vertex.
    ///
    /// The attribute is written once; later calls keep the existing values.
    pub fn with_random_attribute<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        if self.a_random.is_empty() {
            self.a_random = (0..self.positions.len()).map(|_| rng.r#gen::<f32>()).collect();
        } else {
            log::warn!("aRandom already populated; keeping existing values");
        }
        self
    }

    #[inline]
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn segments(&self) -> (u32, u32) {
        (self.segments_x, self.segments_y)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Triangle-list indices.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// `aRandom` values; empty until [`with_random_attribute`](Self::with_random_attribute).
    #[inline]
    pub fn a_random(&self) -> &[f32] {
        &self.a_random
    }

    /// Line-list indices covering every triangle edge exactly once.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let columns = self.segments_x + 1;
        let rows = self.segments_y + 1;
        let mut lines = Vec::new();

        for iy in 0..rows {
            for ix in 0..columns {
                let here = ix + columns * iy;
                if ix + 1 < columns {
                    lines.extend_from_slice(&[here, here + 1]);
                }
                if iy + 1 < rows {
                    lines.extend_from_slice(&[here, here + columns]);
                }
                // Shared diagonal of the cell to the lower-left: b -> d.
                if ix + 1 < columns && iy + 1 < rows {
                    lines.extend_from_slice(&[here + columns, here + 1]);
                }
            }
        }

        lines
    }

    /// Interleaved vertex data for upload.
    ///
    /// Missing `aRandom` values (attribute not populated) upload as 0.
    pub fn vertices(&self) -> Vec<PlaneVertex> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, &position)| PlaneVertex {
                position,
                a_random: self.a_random.get(i).copied().unwrap_or(0.0),
            })
            .collect()
    }
}
