//! Pfad-Cursor: Fortschritt eines Way-Agents entlang des Wegnetzes.
//!
//! Ablauf pro Tick: der Fahrer ruft [`PathCursor::advance`] mit der
//! gefahrenen Strecke auf, anschließend [`PathCursor::refresh`], das das
//! Kantenende erkennt und die nächste Kante auflöst.

use std::fmt;

use glam::Vec3;

use super::{LightType, ObstacleHit, ObstacleQuery, WayGraph, WayPointId, WaySelector};
use crate::shared::constants::{
    MAX_RAYCAST_DISTANCE_IN_FRONT, SAME_DIRECTION_DOT, THRESHOLD_DISTANCE_TO_END,
};

/// Zustand des Cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Kein Start-Way-Point gesetzt
    Unattached,
    /// Start gesetzt, aber (noch) keine Kante aufgelöst
    AtNode,
    /// Fährt auf einer Kante
    OnEdge,
    /// End-Punkt erreicht, der Agent soll entfernt werden
    Arrived,
}

/// Ergebnis eines [`PathCursor::refresh`]-Aufrufs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshEvent {
    /// Weiter auf der bisherigen Kante
    Idle,
    /// Neue Kante aufgelöst
    EdgeResolved {
        from: WayPointId,
        to: WayPointId,
        outbound: usize,
    },
    /// Way-Point ohne Outbounds erreicht, der Agent hält an
    DeadEnd { at: WayPointId },
    /// End-Punkt erreicht
    Arrived { at: WayPointId },
}

impl RefreshEvent {
    /// `true` wenn sich der Kanten-Zustand geändert hat.
    pub fn is_transition(self) -> bool {
        !matches!(self, RefreshEvent::Idle)
    }
}

/// Traversierungs-Zustand eines einzelnen Fahrzeugs.
///
/// Hält nur IDs in das Wegnetz; der Graph wird bei jedem Aufruf mitgegeben.
pub struct PathCursor {
    state: CursorState,
    position: Vec3,
    forward: Vec3,
    vehicle_length: f32,
    arrival_threshold: f32,
    start: Option<WayPointId>,
    end: Option<WayPointId>,
    outbound: usize,
    /// Segment-Index in der Polyline, `None` auf geraden Kanten
    segment: Option<usize>,
    direction: Vec3,
    distance: f32,
    /// Sackgasse bereits gemeldet
    stalled: bool,
    selector: Option<Box<dyn WaySelector>>,
}

impl fmt::Debug for PathCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathCursor")
            .field("state", &self.state)
            .field("position", &self.position)
            .field("forward", &self.forward)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("outbound", &self.outbound)
            .field("segment", &self.segment)
            .field("direction", &self.direction)
            .field("distance", &self.distance)
            .field("stalled", &self.stalled)
            .field("has_selector", &self.selector.is_some())
            .finish_non_exhaustive()
    }
}

impl PathCursor {
    /// Erstellt einen ungebundenen Cursor an der gegebenen Pose.
    pub fn new(position: Vec3, forward: Vec3, vehicle_length: f32) -> Self {
        Self {
            state: CursorState::Unattached,
            position,
            forward: forward.normalize_or_zero(),
            vehicle_length,
            arrival_threshold: THRESHOLD_DISTANCE_TO_END,
            start: None,
            end: None,
            outbound: 0,
            segment: None,
            direction: Vec3::ZERO,
            distance: 0.0,
            stalled: false,
            selector: None,
        }
    }

    /// Setzt die Way-Select-Strategie (Builder).
    pub fn with_way_selector(mut self, selector: impl WaySelector + 'static) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Setzt den Ankunfts-Schwellwert (Builder).
    pub fn with_arrival_threshold(mut self, threshold: f32) -> Self {
        self.arrival_threshold = threshold;
        self
    }

    /// Ersetzt die Way-Select-Strategie; `None` = immer Outbound 0.
    pub fn set_way_selector(&mut self, selector: Option<Box<dyn WaySelector>>) {
        self.selector = selector;
    }

    /// Bindet den Cursor an einen Start-Way-Point und löst die erste Kante auf.
    pub fn attach(&mut self, graph: &WayGraph, start: WayPointId) -> RefreshEvent {
        self.start = Some(start);
        self.end = None;
        self.segment = None;
        self.outbound = 0;
        self.stalled = false;
        self.state = CursorState::AtNode;
        self.refresh(graph)
    }

    /// Löst den Cursor vom Wegnetz.
    pub fn detach(&mut self) {
        self.start = None;
        self.end = None;
        self.segment = None;
        self.state = CursorState::Unattached;
        self.hold();
    }

    /// Prüft das Erreichen des Kantenendes und aktualisiert Richtung und Distanz.
    pub fn refresh(&mut self, graph: &WayGraph) -> RefreshEvent {
        let Some(start) = self.start else {
            self.hold();
            return RefreshEvent::Idle;
        };
        if self.state == CursorState::Arrived {
            self.hold();
            return RefreshEvent::Idle;
        }

        let mut event = RefreshEvent::Idle;
        if self.end.is_none() {
            if self.stalled {
                self.hold();
                return event;
            }
            event = self.resolve_edge(graph, start);
        }
        let Some(end) = self.end else {
            return event;
        };
        let Some(end_position) = graph.way_point(end).map(|p| p.position) else {
            self.end = None;
            self.state = CursorState::AtNode;
            self.hold();
            return RefreshEvent::DeadEnd { at: start };
        };

        if self.position.distance(end_position) < self.arrival_threshold {
            self.start = Some(end);
            event = self.resolve_edge(graph, end);
            if self.end.is_none() {
                return event;
            }
        }

        self.update_steering(graph);
        event
    }

    /// Bewegt den Cursor um genau `distance` entlang der aktuellen Kante.
    ///
    /// Auf geraden Kanten entlang der zuletzt berechneten Richtung (höchstens bis
    /// zum End-Way-Point), auf Kurven entlang der Polyline (am letzten
    /// Stützpunkt begrenzt). Danach muss
    /// [`PathCursor::refresh`] aufgerufen werden.
    pub fn advance(&mut self, graph: &WayGraph, distance: f32) {
        if self.state != CursorState::OnEdge || distance <= 0.0 {
            return;
        }

        let curve = match (self.start, self.segment) {
            (Some(start), Some(_)) => graph.curve_path(start, self.outbound),
            _ => None,
        };

        match curve {
            Some(path) => self.advance_on_curve(path.points(), distance),
            None => {
                // Nie über den End-Way-Point hinaus, sonst kehrt die Richtung um
                let step = distance.min(self.distance);
                self.position += self.direction * step;
                self.distance -= step;
                if self.direction != Vec3::ZERO {
                    self.forward = self.direction;
                }
            }
        }
    }

    /// Läuft die Polyline ab und richtet das Fahrzeug vom Heck zum Ziel aus.
    fn advance_on_curve(&mut self, points: &[Vec3], distance: f32) {
        let last = points.len().saturating_sub(1);
        let mut segment = self.segment.unwrap_or(0).min(last.saturating_sub(1));
        let mut left = distance;
        let mut target = self.position;

        loop {
            let next = points[segment + 1];
            let to_next = target.distance(next);
            if left > to_next && segment + 1 < last {
                left -= to_next;
                target = next;
                segment += 1;
            } else {
                target = if to_next > f32::EPSILON {
                    target.lerp(next, (left / to_next).min(1.0))
                } else {
                    next
                };
                break;
            }
        }

        // Heckmitte liegt eine volle Fahrzeuglänge hinter der Position (nicht
        // die halbe); Richtung Heck → Ziel statt echter Kurventangente
        let rear = self.position - self.forward * self.vehicle_length;
        let heading = (target - rear).normalize_or_zero();
        if heading != Vec3::ZERO {
            self.forward = heading;
        }

        self.position = target;
        self.segment = Some(segment);
    }

    /// Löst die Kante ab `from` auf.
    fn resolve_edge(&mut self, graph: &WayGraph, from: WayPointId) -> RefreshEvent {
        self.segment = None;
        self.outbound = 0;

        let terminal = graph.way_point(from).is_some_and(|p| p.is_terminal());
        if terminal {
            self.end = None;
            self.state = CursorState::Arrived;
            self.hold();
            return RefreshEvent::Arrived { at: from };
        }

        let chosen = graph.choose_outbound(from, self.selector_mut());
        let Some((outbound, to)) =
            chosen.and_then(|i| graph.next_way_point(from, i).map(|to| (i, to)))
        else {
            self.end = None;
            self.state = CursorState::AtNode;
            self.stalled = true;
            self.hold();
            return RefreshEvent::DeadEnd { at: from };
        };

        self.end = Some(to);
        self.outbound = outbound;
        if graph.curve_path(from, outbound).is_some() {
            self.segment = Some(0);
        }
        self.state = CursorState::OnEdge;
        RefreshEvent::EdgeResolved { from, to, outbound }
    }

    /// Berechnet die vorgeschlagene Richtung und die Restdistanz zum Kantenende.
    fn update_steering(&mut self, graph: &WayGraph) {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            self.hold();
            return;
        };

        let curve = self
            .segment
            .and_then(|seg| graph.curve_path(start, self.outbound).map(|p| (seg, p)));

        match curve {
            Some((seg, path)) => {
                let next = path.point(seg + 1).unwrap_or(self.position);
                let to_next = next - self.position;
                self.direction = to_next.normalize_or_zero();
                self.distance = to_next.length() + path.remaining_from(seg + 1);
            }
            None => {
                let end_position = graph
                    .way_point(end)
                    .map_or(self.position, |p| p.position);
                let to_end = end_position - self.position;
                self.direction = to_end.normalize_or_zero();
                self.distance = to_end.length();
            }
        }
    }

    fn hold(&mut self) {
        self.direction = Vec3::ZERO;
        self.distance = 0.0;
    }

    fn selector_mut(&mut self) -> Option<&mut dyn WaySelector> {
        match self.selector.as_mut() {
            Some(selector) => Some(&mut **selector),
            None => None,
        }
    }

    /// Zustand des Cursors.
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// `true` sobald ein End-Punkt erreicht wurde.
    pub fn is_arrived(&self) -> bool {
        self.state == CursorState::Arrived
    }

    /// Normalisierte vorgeschlagene Fahrtrichtung (Null wenn angehalten).
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Restdistanz bis zum Ende der aktuellen Kante (0 wenn angehalten).
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Aktuelle Weltposition.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Aktuelle Fahrzeug-Ausrichtung.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Fahrzeuglänge für die Ausrichtung in Kurven.
    pub fn vehicle_length(&self) -> f32 {
        self.vehicle_length
    }

    /// Start-Way-Point der aktuellen Kante.
    pub fn start(&self) -> Option<WayPointId> {
        self.start
    }

    /// End-Way-Point der aktuellen Kante.
    pub fn end(&self) -> Option<WayPointId> {
        self.end
    }

    /// Outbound-Index der aktuellen Kante.
    pub fn outbound_index(&self) -> usize {
        self.outbound
    }

    /// Segment-Index in der Kurven-Polyline, `None` auf geraden Kanten.
    pub fn curve_segment(&self) -> Option<usize> {
        self.segment
    }

    /// Signal der Ampel am End-Way-Point, Grün wenn dort keine Haltelinie ist.
    pub fn current_light_state(&self, graph: &WayGraph) -> LightType {
        self.end
            .map_or(LightType::SteadyGreen, |end| graph.light_state_at(end))
    }

    /// Nächstes Fahrzeug vor uns innerhalb der Raycast-Reichweite.
    pub fn vehicle_in_front(&self, query: &dyn ObstacleQuery) -> Option<ObstacleHit> {
        query.cast_ahead(self.position, self.forward, MAX_RAYCAST_DISTANCE_IN_FRONT)
    }

    /// Abstand zu einem Fahrzeug gleicher Fahrtrichtung, das näher als `within` ist.
    pub fn obstacle_ahead(&self, query: &dyn ObstacleQuery, within: f32) -> Option<f32> {
        self.vehicle_in_front(query)
            .filter(|hit| {
                hit.direction.dot(self.direction) > SAME_DIRECTION_DOT && hit.distance < within
            })
            .map(|hit| hit.distance)
    }
}
