use super::{GeometryError, MilePointMap};
use crate::model::{Corridor, CorridorId, Route};
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

/// the corridors of a roadway network, built once and shared by reference
/// with everything that compares routes positionally.
#[derive(Debug, Clone, Default)]
pub struct CorridorNetwork {
    corridors: HashMap<CorridorId, Corridor>,
}

impl CorridorNetwork {
    pub fn new(corridors: Vec<Corridor>) -> Result<CorridorNetwork, GeometryError> {
        let mut names: HashSet<&str> = HashSet::new();
        for corridor in corridors.iter() {
            if corridor.nodes.is_empty() {
                return Err(GeometryError::EmptyCorridor(corridor.id.clone()));
            }
            for node in corridor.nodes.iter() {
                if !names.insert(node.name.as_str()) {
                    return Err(GeometryError::DuplicateNode(node.name.clone()));
                }
            }
        }
        let corridors = corridors
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        Ok(CorridorNetwork { corridors })
    }

    pub fn corridor(&self, id: &CorridorId) -> Result<&Corridor, GeometryError> {
        self.corridors
            .get(id)
            .ok_or_else(|| GeometryError::CorridorNotFound(id.clone()))
    }

    pub fn corridor_ids(&self) -> Vec<&CorridorId> {
        self.corridors.keys().sorted().collect_vec()
    }

    /// builds the shared mile point map used to compare two routes. corridors
    /// of the route spanning more corridors come first, in traversal order,
    /// followed by any corridor only the other route uses.
    pub fn mile_point_map(&self, host: &Route, guest: &Route) -> Result<MilePointMap, GeometryError> {
        let host_corridors = host.corridors();
        let guest_corridors = guest.corridors();
        let (primary, secondary) = if host_corridors.len() >= guest_corridors.len() {
            (host_corridors, guest_corridors)
        } else {
            (guest_corridors, host_corridors)
        };
        let ids = primary
            .into_iter()
            .chain(secondary)
            .unique()
            .collect_vec();
        let corridors = ids
            .into_iter()
            .map(|id| self.corridor(id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MilePointMap::for_corridors(&corridors))
    }
}
