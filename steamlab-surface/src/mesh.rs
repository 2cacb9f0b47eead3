use glam::Vec3;

/// A triangulated property surface in normalized plot space.
///
/// Positions and normals are index-aligned; triangles are counter-clockwise
/// index triples into them. A mesh is immutable once published: regeneration
/// replaces the whole object, so consumers holding a reference never observe
/// in-place edits.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl SurfaceMesh {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Checks the structural invariants: every triangle index is in range
    /// and the normals run parallel to the positions.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let vertex_count = self.positions.len() as u32;
        self.normals.len() == self.positions.len()
            && self
                .triangles
                .iter()
                .all(|tri| tri.iter().all(|&index| index < vertex_count))
    }
}
