use crate::math::Point3;

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl TriangleMesh {
    /// Appends a vertex and returns its index.
    #[allow(clippy::cast_possible_truncation)]
    pub fn push_vertex(&mut self, p: Point3) -> u32 {
        self.vertices.push(p);
        (self.vertices.len() - 1) as u32
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Area of triangle `i`.
    #[must_use]
    pub fn triangle_area(&self, i: usize) -> f64 {
        let [a, b, c] = self.indices[i];
        let v0 = self.vertices[a as usize];
        let v1 = self.vertices[b as usize];
        let v2 = self.vertices[c as usize];
        (v1 - v0).cross(&(v2 - v0)).norm() * 0.5
    }

    /// Sum of all triangle areas.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        (0..self.indices.len()).map(|i| self.triangle_area(i)).sum()
    }

    /// Bounding box of all vertices, or `None` for an empty mesh.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Aabb> {
        let first = *self.vertices.first()?;
        let mut bb = Aabb {
            min: first,
            max: first,
        };
        for v in &self.vertices[1..] {
            bb.min = bb.min.inf(v);
            bb.max = bb.max.sup(v);
        }
        Some(bb)
    }
}
