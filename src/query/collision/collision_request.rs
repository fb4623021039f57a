use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::shape::{FeatureId, GeometryId};
use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::cmp::Ordering;
use ordered_float::OrderedFloat;

/// The parameters of a discrete collision query.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CollisionRequest {
    /// The maximum number of contacts stored in the result.
    pub num_max_contacts: usize,
    /// Whether the contact geometry (position, normal, depth) is computed.
    pub enable_contact: bool,
    /// The maximum number of cost sources stored in the result.
    pub num_max_cost_sources: usize,
    /// Whether cost sources are computed.
    ///
    /// The cost of a collision is the volume of the overlap of both world-space AABBs,
    /// weighted by the product of both cost densities.
    pub enable_cost: bool,
}

impl Default for CollisionRequest {
    fn default() -> Self {
        Self {
            num_max_contacts: 1,
            enable_contact: false,
            num_max_cost_sources: 1,
            enable_cost: false,
        }
    }
}

impl CollisionRequest {
    /// Whether `result` already holds everything this request asks for, so the query can stop.
    pub fn is_satisfied(&self, result: &CollisionResult) -> bool {
        result.is_collision()
            && self.num_max_contacts <= result.num_contacts()
            && !self.enable_cost
    }
}

/// A contact between two geometries.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Contact {
    /// The first geometry involved in the contact.
    pub geometry1: GeometryId,
    /// The second geometry involved in the contact.
    pub geometry2: GeometryId,
    /// The feature of the first geometry involved in the contact.
    pub feature1: FeatureId,
    /// The feature of the second geometry involved in the contact.
    pub feature2: FeatureId,
    /// The contact position, in world-space.
    pub pos: Point<Real>,
    /// The contact normal, pointing from the first geometry toward the second one.
    pub normal: Vector<Real>,
    /// The penetration depth.
    pub penetration_depth: Real,
}

/// A region where two geometries overlap, weighted by their combined cost density.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CostSource {
    /// The minimum corner of the overlap region.
    pub aabb_min: Point<Real>,
    /// The maximum corner of the overlap region.
    pub aabb_max: Point<Real>,
    /// The cost per unit volume.
    pub cost_density: Real,
    /// The volume of the region multiplied by its cost density.
    pub total_cost: Real,
}

impl CostSource {
    /// A cost source covering `aabb`.
    pub fn new(aabb: &Aabb, cost_density: Real) -> Self {
        Self {
            aabb_min: aabb.mins,
            aabb_max: aabb.maxs,
            cost_density,
            total_cost: aabb.volume() * cost_density,
        }
    }

    /// The region covered by this cost source.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.aabb_min, self.aabb_max)
    }

    fn corners(&self) -> impl Iterator<Item = OrderedFloat<Real>> + '_ {
        self.aabb_min
            .iter()
            .chain(self.aabb_max.iter())
            .map(|x| OrderedFloat(*x))
    }
}

/// Cost sources are sorted by decreasing total cost, then by their corners.
impl Ord for CostSource {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(other.total_cost)
            .cmp(&OrderedFloat(self.total_cost))
            .then_with(|| self.corners().cmp(other.corners()))
            .then_with(|| OrderedFloat(self.cost_density).cmp(&OrderedFloat(other.cost_density)))
    }
}

impl PartialOrd for CostSource {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CostSource {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CostSource {}

/// The output of a discrete collision query.
///
/// Queries only append to a result, so the same result may accumulate the output of several
/// queries.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CollisionResult {
    contacts: Vec<Contact>,
    cost_sources: BTreeSet<CostSource>,
}

impl CollisionResult {
    /// An empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Was any collision found?
    #[inline]
    pub fn is_collision(&self) -> bool {
        !self.contacts.is_empty()
    }

    /// The number of contacts found.
    #[inline]
    pub fn num_contacts(&self) -> usize {
        self.contacts.len()
    }

    /// The contacts found.
    #[inline]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Appends a contact, regardless of any capacity.
    #[inline]
    pub fn add_contact(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    /// The number of cost sources found.
    #[inline]
    pub fn num_cost_sources(&self) -> usize {
        self.cost_sources.len()
    }

    /// The cost sources found, by decreasing total cost.
    pub fn cost_sources(&self) -> impl ExactSizeIterator<Item = &CostSource> {
        self.cost_sources.iter()
    }

    /// Adds a cost source, then evicts the cheapest ones until at most `capacity` remain.
    pub fn add_cost_source(&mut self, source: CostSource, capacity: usize) {
        let _ = self.cost_sources.insert(source);

        while self.cost_sources.len() > capacity {
            let _ = self.cost_sources.pop_last();
        }
    }

    /// Removes all the contacts and cost sources.
    pub fn clear(&mut self) {
        self.contacts.clear();
        self.cost_sources.clear();
    }
}
