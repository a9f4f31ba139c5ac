//! Ampeln an Haltelinien.

use serde::{Deserialize, Serialize};

/// ID einer Ampel im Wegnetz.
pub type LightId = u64;

/// Aktuell leuchtendes Signal einer Ampel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightType {
    /// Durchfahrt frei
    #[default]
    SteadyGreen,
    /// Vor der Haltelinie anhalten
    SteadyRed,
}

impl LightType {
    /// Gibt das jeweils andere Signal zurück.
    pub fn toggled(self) -> Self {
        match self {
            LightType::SteadyGreen => LightType::SteadyRed,
            LightType::SteadyRed => LightType::SteadyGreen,
        }
    }
}

/// Autorendaten einer Ampel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficLightDef {
    /// Ampel-ID, auf die `NodeKind::StopLine` verweist
    pub id: LightId,
    /// Signal beim Laden des Levels
    #[serde(default)]
    pub initial: LightType,
}

/// Laufzeit-Zustand einer Ampel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficLight {
    /// Ampel-ID
    pub id: LightId,
    state: LightType,
}

impl TrafficLight {
    /// Erstellt eine Ampel mit dem gegebenen Anfangssignal.
    pub fn new(id: LightId, state: LightType) -> Self {
        Self { id, state }
    }

    /// Aktuelles Signal.
    pub fn state(&self) -> LightType {
        self.state
    }

    /// Schaltet zwischen Grün und Rot um und gibt das neue Signal zurück.
    pub fn switch(&mut self) -> LightType {
        self.state = self.state.toggled();
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_toggles_between_green_and_red() {
        let mut light = TrafficLight::new(7, LightType::SteadyGreen);

        assert_eq!(light.switch(), LightType::SteadyRed);
        assert_eq!(light.state(), LightType::SteadyRed);
        assert_eq!(light.switch(), LightType::SteadyGreen);
    }
}
