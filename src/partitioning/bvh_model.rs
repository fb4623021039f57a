use crate::bounding_volume::BoundingVolume;
use crate::math::{Isometry, Point, Real, DIM};
use crate::shape::Triangle;
use alloc::vec::Vec;

/// Error raised when building a [`BvhModel`] or replacing its vertices.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum BvhModelError {
    /// A BVH model must contain at least one triangle.
    #[error("A BVH model must contain at least one triangle.")]
    EmptyIndices,
    /// A triangle references a vertex that does not exist.
    #[error("the triangle {triangle} references the vertex {vertex}, but there are only {num_vertices} vertices.")]
    VertexIndexOutOfBounds {
        /// The faulty triangle.
        triangle: u32,
        /// The out-of-bounds vertex index.
        vertex: u32,
        /// The number of vertices of the model.
        num_vertices: u32,
    },
    /// The replacement vertex buffer does not have the same length as the original one.
    #[error("expected {expected} replacement vertices, found {found}.")]
    VertexCountMismatch {
        /// The number of vertices of the model.
        expected: usize,
        /// The number of replacement vertices given.
        found: usize,
    },
}

/// How the bounding volumes of a [`BvhModel`] are updated after its vertices moved.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum RefitStrategy {
    /// The hierarchy is rebuilt from scratch.
    #[default]
    Rebuild,
    /// The topology is kept, and every node volume is refitted to the vertices of all the
    /// triangles below it.
    TopDown,
    /// The topology is kept, leaf volumes are refitted to their triangle, and internal node
    /// volumes are obtained by merging the volumes of their children.
    BottomUp,
}

/// A node of a [`BvhModel`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BvNode<BV> {
    /// The bounding volume of this node.
    pub bv: BV,
    /// Index of the left child. The right child is at `first_child + 1`. Negative for leaves.
    pub first_child: i32,
    /// Index, in the primitive-index array, of the first triangle below this node.
    pub first_primitive: u32,
    /// Number of triangles below this node.
    pub num_primitives: u32,
}

impl<BV> BvNode<BV> {
    /// Is this node a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.first_child < 0
    }

    /// The two children of this internal node.
    #[inline]
    pub fn children(&self) -> (usize, usize) {
        let left = self.first_child as usize;
        (left, left + 1)
    }
}

/// A bounding-volume hierarchy over a triangle mesh.
///
/// Each leaf bounds exactly one triangle. The root is the node `0`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BvhModel<BV> {
    vertices: Vec<Point<Real>>,
    triangles: Vec<[u32; 3]>,
    nodes: Vec<BvNode<BV>>,
    primitive_indices: Vec<u32>,
}

impl<BV: BoundingVolume> BvhModel<BV> {
    /// Builds the hierarchy of the mesh with the given vertices and triangles.
    pub fn new(
        vertices: Vec<Point<Real>>,
        triangles: Vec<[u32; 3]>,
    ) -> Result<Self, BvhModelError> {
        if triangles.is_empty() {
            return Err(BvhModelError::EmptyIndices);
        }

        let num_vertices = vertices.len() as u32;

        for (i, tri) in triangles.iter().enumerate() {
            if let Some(vertex) = tri.iter().find(|idx| **idx >= num_vertices) {
                return Err(BvhModelError::VertexIndexOutOfBounds {
                    triangle: i as u32,
                    vertex: *vertex,
                    num_vertices,
                });
            }
        }

        let mut result = Self {
            vertices,
            triangles,
            nodes: Vec::new(),
            primitive_indices: Vec::new(),
        };
        result.rebuild();
        Ok(result)
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The index buffer of this mesh.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// The nodes of the hierarchy. The root is the first one.
    #[inline]
    pub fn nodes(&self) -> &[BvNode<BV>] {
        &self.nodes
    }

    /// The `i`-th node of the hierarchy.
    #[inline]
    pub fn node(&self, i: usize) -> &BvNode<BV> {
        &self.nodes[i]
    }

    /// The bounding volume of the `i`-th node.
    #[inline]
    pub fn bv(&self, i: usize) -> &BV {
        &self.nodes[i].bv
    }

    /// The index of the triangle bounded by the given leaf node.
    #[inline]
    pub fn leaf_triangle_id(&self, node: usize) -> u32 {
        self.primitive_indices[self.nodes[node].first_primitive as usize]
    }

    /// The `i`-th triangle of this mesh.
    #[inline]
    pub fn triangle(&self, i: u32) -> Triangle {
        let idx = self.triangles[i as usize];
        Triangle::new(
            self.vertices[idx[0] as usize],
            self.vertices[idx[1] as usize],
            self.vertices[idx[2] as usize],
        )
    }

    /// Starts replacing the vertices of this mesh.
    ///
    /// The hierarchy is updated when the returned scope is ended or dropped.
    pub fn begin_replace(&mut self) -> ReplaceScope<'_, BV> {
        ReplaceScope {
            model: self,
            strategy: RefitStrategy::default(),
        }
    }

    /// Updates the bounding volumes after the vertices moved.
    pub fn refit(&mut self, strategy: RefitStrategy) {
        log::trace!(
            "refitting a mesh with {} triangles ({:?})",
            self.triangles.len(),
            strategy
        );

        match strategy {
            RefitStrategy::Rebuild => self.rebuild(),
            RefitStrategy::TopDown => self.refit_top_down(),
            RefitStrategy::BottomUp => self.refit_bottom_up(),
        }
    }

    fn fit_primitives(&self, range: core::ops::Range<usize>, buf: &mut Vec<Point<Real>>) -> BV {
        buf.clear();
        for prim in &self.primitive_indices[range] {
            let idx = self.triangles[*prim as usize];
            buf.extend(idx.iter().map(|i| self.vertices[*i as usize]));
        }
        BV::from_points(buf)
    }

    fn triangle_center(&self, prim: u32) -> Point<Real> {
        self.triangle(prim).center()
    }

    /// Top-down build splitting each node at the mean of its triangle centers along the axis
    /// of largest spread.
    fn rebuild(&mut self) {
        let num_triangles = self.triangles.len();
        self.primitive_indices = (0..num_triangles as u32).collect();
        self.nodes.clear();
        self.nodes.reserve(2 * num_triangles - 1);

        let mut buf = Vec::new();
        let root_bv = self.fit_primitives(0..num_triangles, &mut buf);
        self.nodes.push(BvNode {
            bv: root_bv,
            first_child: -1,
            first_primitive: 0,
            num_primitives: num_triangles as u32,
        });

        let mut stack = vec![0usize];

        while let Some(id) = stack.pop() {
            let start = self.nodes[id].first_primitive as usize;
            let end = start + self.nodes[id].num_primitives as usize;

            if end - start == 1 {
                continue;
            }

            let mid = self.split(start, end);
            let first_child = self.nodes.len();

            for range in [start..mid, mid..end] {
                let bv = self.fit_primitives(range.clone(), &mut buf);
                self.nodes.push(BvNode {
                    bv,
                    first_child: -1,
                    first_primitive: range.start as u32,
                    num_primitives: range.len() as u32,
                });
            }

            self.nodes[id].first_child = first_child as i32;
            stack.push(first_child + 1);
            stack.push(first_child);
        }
    }

    /// Partitions the primitives in `start..end` and returns the split position.
    fn split(&mut self, start: usize, end: usize) -> usize {
        let mut mins = Point::from([Real::MAX; DIM]);
        let mut maxs = Point::from([-Real::MAX; DIM]);
        let mut mean = Point::origin();

        for prim in &self.primitive_indices[start..end] {
            let center = self.triangle_center(*prim);
            mins = mins.inf(&center);
            maxs = maxs.sup(&center);
            mean += center.coords;
        }

        mean /= (end - start) as Real;
        let axis = (maxs - mins).imax();
        let split_value = mean[axis];

        let mut mid = start;
        for i in start..end {
            let prim = self.primitive_indices[i];
            if self.triangle_center(prim)[axis] < split_value {
                self.primitive_indices.swap(i, mid);
                mid += 1;
            }
        }

        if mid == start || mid == end {
            // All centers coincide along the split axis.
            mid = (start + end) / 2;
        }

        mid
    }

    fn refit_top_down(&mut self) {
        let mut buf = Vec::new();

        for i in 0..self.nodes.len() {
            let start = self.nodes[i].first_primitive as usize;
            let end = start + self.nodes[i].num_primitives as usize;
            self.nodes[i].bv = self.fit_primitives(start..end, &mut buf);
        }
    }

    fn refit_bottom_up(&mut self) {
        let mut buf = Vec::new();

        // Children are always stored after their parent.
        for i in (0..self.nodes.len()).rev() {
            let node = &self.nodes[i];

            let bv = if node.is_leaf() {
                let start = node.first_primitive as usize;
                self.fit_primitives(start..start + 1, &mut buf)
            } else {
                let (left, right) = node.children();
                self.nodes[left].bv.merged(&self.nodes[right].bv)
            };

            self.nodes[i].bv = bv;
        }
    }
}

/// A scoped replacement of the vertices of a [`BvhModel`].
///
/// The hierarchy is refitted with the chosen strategy when the scope ends. Dropping the scope
/// without calling [`ReplaceScope::end`] applies [`RefitStrategy::Rebuild`].
pub struct ReplaceScope<'a, BV: BoundingVolume> {
    model: &'a mut BvhModel<BV>,
    strategy: RefitStrategy,
}

impl<BV: BoundingVolume> ReplaceScope<'_, BV> {
    /// Replaces all the vertices of the mesh.
    ///
    /// The triangles are unchanged, so the number of vertices must remain the same.
    pub fn replace_vertices(&mut self, vertices: &[Point<Real>]) -> Result<(), BvhModelError> {
        if vertices.len() != self.model.vertices.len() {
            return Err(BvhModelError::VertexCountMismatch {
                expected: self.model.vertices.len(),
                found: vertices.len(),
            });
        }

        self.model.vertices.copy_from_slice(vertices);
        Ok(())
    }

    /// Mutable access to the vertices being replaced.
    pub fn vertices_mut(&mut self) -> &mut [Point<Real>] {
        &mut self.model.vertices
    }

    /// Ends the replacement and refits the hierarchy with the given strategy.
    pub fn end(mut self, strategy: RefitStrategy) {
        self.strategy = strategy;
    }
}

impl<BV: BoundingVolume> Drop for ReplaceScope<'_, BV> {
    fn drop(&mut self) {
        self.model.refit(self.strategy);
    }
}

/// A private copy of a mesh, moved around by conservative advancement.
///
/// The axis-aligned conservative advancement needs the mesh to live in the frame of the other
/// shape, so it moves the vertices of this copy and refits its hierarchy at each iteration. The
/// pristine vertices are kept aside so errors do not accumulate across placements.
#[derive(Clone, Debug)]
pub struct MeshWorkingCopy<BV> {
    local_vertices: Vec<Point<Real>>,
    model: BvhModel<BV>,
}

impl<BV: BoundingVolume> MeshWorkingCopy<BV> {
    /// Creates a working copy of `mesh`, whose current vertices are the pristine ones.
    pub fn new(mesh: &BvhModel<BV>) -> Self {
        Self {
            local_vertices: mesh.vertices.clone(),
            model: mesh.clone(),
        }
    }

    /// The vertices of the mesh in its own local frame.
    #[inline]
    pub fn local_vertices(&self) -> &[Point<Real>] {
        &self.local_vertices
    }

    /// The `i`-th triangle of the mesh, in its own local frame.
    pub fn local_triangle(&self, i: u32) -> Triangle {
        let idx = self.model.triangles[i as usize];
        Triangle::new(
            self.local_vertices[idx[0] as usize],
            self.local_vertices[idx[1] as usize],
            self.local_vertices[idx[2] as usize],
        )
    }

    /// The mesh as last placed by [`MeshWorkingCopy::place`].
    #[inline]
    pub fn model(&self) -> &BvhModel<BV> {
        &self.model
    }

    /// Moves the working mesh to `pos` and refits its hierarchy.
    pub fn place(&mut self, pos: &Isometry<Real>, refit: RefitStrategy) {
        let mut scope = self.model.begin_replace();

        for (dst, src) in scope.vertices_mut().iter_mut().zip(self.local_vertices.iter()) {
            *dst = pos * src;
        }

        scope.end(refit);
    }
}

impl<BV: BoundingVolume> From<BvhModel<BV>> for MeshWorkingCopy<BV> {
    fn from(model: BvhModel<BV>) -> Self {
        Self {
            local_vertices: model.vertices.clone(),
            model,
        }
    }
}
