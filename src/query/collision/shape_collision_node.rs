use crate::math::{Point, Real, Vector};
use crate::partitioning::{collision_recurse, CollisionTraversalNode};
use crate::query::collision::{CollisionRequest, CollisionResult, Contact, CostSource};
use crate::query::contact::ContactPoint;
use crate::query::{NarrowPhaseSolver, Unsupported};
use crate::shape::{CollisionGeometry, FeatureId};
use alloc::vec::Vec;

/// Traversal node testing two single shapes for collision.
///
/// There is no hierarchy to prune, so the whole test happens in
/// [`CollisionTraversalNode::leaf_testing`]: contacts are reported only between two occupied
/// geometries, and cost sources between any two geometries that are not free.
pub struct ShapeCollisionNode<'a, D: ?Sized> {
    g1: CollisionGeometry<'a>,
    g2: CollisionGeometry<'a>,
    solver: &'a D,
    request: &'a CollisionRequest,
    result: &'a mut CollisionResult,
    cost_density: Real,
}

impl<'a, D: NarrowPhaseSolver + ?Sized> ShapeCollisionNode<'a, D> {
    /// Creates a node testing `g1` against `g2`.
    ///
    /// Fails if `solver` has no intersection algorithm for this pair of shapes.
    pub fn new(
        g1: CollisionGeometry<'a>,
        g2: CollisionGeometry<'a>,
        solver: &'a D,
        request: &'a CollisionRequest,
        result: &'a mut CollisionResult,
    ) -> Result<Self, Unsupported> {
        if !solver.supports_intersection(g1.shape, g2.shape) {
            return Err(Unsupported);
        }

        Ok(Self {
            g1,
            g2,
            solver,
            request,
            result,
            cost_density: g1.occupancy.cost_density * g2.occupancy.cost_density,
        })
    }

    /// The product of the cost densities of both geometries.
    #[inline]
    pub fn cost_density(&self) -> Real {
        self.cost_density
    }

    fn intersect(&self, contacts: Option<&mut Vec<ContactPoint>>) -> bool {
        match self.solver.intersect(
            self.g1.shape,
            &self.g1.position,
            self.g2.shape,
            &self.g2.position,
            contacts,
        ) {
            Ok(hit) => hit,
            Err(_) => {
                log::warn!(
                    "no intersection algorithm between {:?} and {:?}",
                    self.g1.shape.shape_type(),
                    self.g2.shape.shape_type()
                );
                false
            }
        }
    }

    fn contact(&self, pos: Point<Real>, normal: Vector<Real>, penetration_depth: Real) -> Contact {
        Contact {
            geometry1: self.g1.id,
            geometry2: self.g2.id,
            feature1: FeatureId::Unknown,
            feature2: FeatureId::Unknown,
            pos,
            normal,
            penetration_depth,
        }
    }

    /// Adds the deepest of `points` to the result, without exceeding its capacity.
    fn add_contacts(&mut self, mut points: Vec<ContactPoint>) {
        let free_space = self
            .request
            .num_max_contacts
            .saturating_sub(self.result.num_contacts());

        if points.len() > free_space {
            if free_space == 0 {
                return;
            }

            let _ = points.select_nth_unstable_by(free_space - 1, |a, b| {
                b.penetration_depth.total_cmp(&a.penetration_depth)
            });
            points.truncate(free_space);
            points.sort_unstable_by(|a, b| b.penetration_depth.total_cmp(&a.penetration_depth));
        }

        for pt in points {
            let contact = self.contact(pt.pos, pt.normal, pt.penetration_depth);
            self.result.add_contact(contact);
        }
    }

    fn add_cost_source(&mut self) {
        let aabb1 = self.g1.compute_aabb();
        let aabb2 = self.g2.compute_aabb();

        if let Some(overlap) = aabb1.intersection(&aabb2) {
            self.result.add_cost_source(
                CostSource::new(&overlap, self.cost_density),
                self.request.num_max_cost_sources,
            );
        }
    }
}

impl<D: NarrowPhaseSolver + ?Sized> CollisionTraversalNode for ShapeCollisionNode<'_, D> {
    #[inline]
    fn bv_testing(&mut self, _: usize, _: usize) -> bool {
        false
    }

    fn leaf_testing(&mut self, _: usize, _: usize) {
        let occ1 = self.g1.occupancy;
        let occ2 = self.g2.occupancy;

        if occ1.is_occupied() && occ2.is_occupied() {
            let is_collision = if self.request.enable_contact {
                let mut points = Vec::new();
                let hit = self.intersect(Some(&mut points));

                if hit {
                    self.add_contacts(points);
                }

                hit
            } else {
                let hit = self.intersect(None);

                if hit && self.request.num_max_contacts > self.result.num_contacts() {
                    let pos = na::center(
                        &Point::from(self.g1.position.translation.vector),
                        &Point::from(self.g2.position.translation.vector),
                    );
                    let flag = self.contact(pos, Vector::zeros(), 0.0);
                    self.result.add_contact(flag);
                }

                hit
            };

            if is_collision && self.request.enable_cost {
                self.add_cost_source();
            }
        } else if !occ1.is_free() && !occ2.is_free() && self.request.enable_cost {
            if self.intersect(None) {
                self.add_cost_source();
            }
        }
    }

    fn can_stop(&self) -> bool {
        self.request.is_satisfied(&*self.result)
    }
}

/// Tests two geometries for collision, accumulating contacts and cost sources into `result`.
///
/// Returns the number of contacts held by `result` after the query.
pub fn collide<D: NarrowPhaseSolver + ?Sized>(
    solver: &D,
    g1: &CollisionGeometry,
    g2: &CollisionGeometry,
    request: &CollisionRequest,
    result: &mut CollisionResult,
) -> Result<usize, Unsupported> {
    let mut node = ShapeCollisionNode::new(*g1, *g2, solver, request, result)?;
    collision_recurse(&mut node, 0, 0);
    Ok(result.num_contacts())
}
