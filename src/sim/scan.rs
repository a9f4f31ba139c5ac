//! Hindernis-Abfrage über einen KD-Tree aller Fahrzeug-Posen.

use glam::Vec3;
use kiddo::{KdTree, SquaredEuclidean};
use traffic_way_engine::{ObstacleHit, ObstacleQuery};

use super::AgentId;

/// Momentaufnahme eines Fahrzeugs für die Hindernis-Abfrage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehiclePose {
    /// Fahrzeug-ID
    pub agent: AgentId,
    /// Weltposition
    pub position: Vec3,
    /// Vorgeschlagene Fahrtrichtung des Cursors
    pub direction: Vec3,
}

/// Treffer einer Umkreissuche.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanMatch {
    /// Gefundenes Fahrzeug
    pub agent: AgentId,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f32,
}

/// Read-only Spatial-Index über einer Momentaufnahme aller Fahrzeuge.
#[derive(Debug, Clone)]
pub struct VehicleScan {
    tree: KdTree<f64, 3>,
    poses: Vec<VehiclePose>,
    lateral_radius: f32,
    max_range: f32,
}

impl VehicleScan {
    /// Baut den Index aus den übergebenen Posen.
    ///
    /// `lateral_radius` ist die halbe Breite des Strahls, `max_range`
    /// begrenzt jede Abfrage zusätzlich zur angefragten Reichweite.
    pub fn from_poses(poses: Vec<VehiclePose>, lateral_radius: f32, max_range: f32) -> Self {
        let entries: Vec<[f64; 3]> = poses
            .iter()
            .map(|pose| {
                [
                    pose.position.x as f64,
                    pose.position.y as f64,
                    pose.position.z as f64,
                ]
            })
            .collect();

        let tree: KdTree<f64, 3> = (&entries).into();

        Self {
            tree,
            poses,
            lateral_radius,
            max_range,
        }
    }

    /// Gibt die Anzahl indexierter Fahrzeuge zurück.
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Gibt `true` zurück, wenn keine Fahrzeuge im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Findet alle Fahrzeuge innerhalb eines Radius, nach Distanz sortiert.
    pub fn within_radius(&self, query: Vec3, radius: f32) -> Vec<ScanMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut results = self
            .tree
            .within::<SquaredEuclidean>(
                &[query.x as f64, query.y as f64, query.z as f64],
                (radius * radius) as f64,
            )
            .into_iter()
            .filter_map(|entry| {
                let pose = self.poses.get(entry.item as usize)?;
                Some(ScanMatch {
                    agent: pose.agent,
                    distance: (entry.distance as f32).sqrt(),
                })
            })
            .collect::<Vec<_>>();

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results
    }

    /// Alle Fahrzeugpaare, die näher als `radius` beieinander stehen.
    ///
    /// Jedes Paar erscheint genau einmal, kleinere ID zuerst.
    pub fn touching_pairs(&self, radius: f32) -> Vec<(AgentId, AgentId)> {
        let mut pairs = Vec::new();
        for pose in &self.poses {
            for hit in self.within_radius(pose.position, radius) {
                if pose.agent < hit.agent && hit.distance < radius {
                    pairs.push((pose.agent, hit.agent));
                }
            }
        }
        pairs.sort_unstable();
        pairs
    }

    /// Abfrage aus Sicht eines Fahrzeugs, das sich selbst nicht trifft.
    pub fn seen_by(&self, agent: AgentId) -> AgentScan<'_> {
        AgentScan { scan: self, agent }
    }

    fn cast(
        &self,
        exclude: Option<AgentId>,
        origin: Vec3,
        forward: Vec3,
        max_distance: f32,
    ) -> Option<ObstacleHit> {
        let ray = forward.normalize_or_zero();
        let range = max_distance.min(self.max_range);
        if ray == Vec3::ZERO || range <= 0.0 || self.is_empty() {
            return None;
        }

        let reach = range + self.lateral_radius;
        self.tree
            .within::<SquaredEuclidean>(
                &[origin.x as f64, origin.y as f64, origin.z as f64],
                (reach * reach) as f64,
            )
            .into_iter()
            .filter_map(|entry| self.poses.get(entry.item as usize))
            .filter(|pose| Some(pose.agent) != exclude)
            .filter_map(|pose| {
                let offset = pose.position - origin;
                let along = offset.dot(ray);
                if along <= 0.0 || along > range {
                    return None;
                }
                let lateral = (offset - ray * along).length();
                (lateral <= self.lateral_radius).then_some(ObstacleHit {
                    distance: along,
                    direction: pose.direction,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

impl ObstacleQuery for VehicleScan {
    fn cast_ahead(&self, origin: Vec3, forward: Vec3, max_distance: f32) -> Option<ObstacleHit> {
        self.cast(None, origin, forward, max_distance)
    }
}

/// Sicht eines einzelnen Fahrzeugs auf den Index.
#[derive(Debug, Clone, Copy)]
pub struct AgentScan<'a> {
    scan: &'a VehicleScan,
    agent: AgentId,
}

impl ObstacleQuery for AgentScan<'_> {
    fn cast_ahead(&self, origin: Vec3, forward: Vec3, max_distance: f32) -> Option<ObstacleHit> {
        self.scan.cast(Some(self.agent), origin, forward, max_distance)
    }
}
