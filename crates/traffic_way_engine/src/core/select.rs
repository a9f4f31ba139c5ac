//! Routenwahl an Verzweigungen (Way-Select).

/// Strategie, die an einem Way-Point mit mehreren Outbounds den Index wählt.
///
/// Erhält das Label des Way-Points und die Anzahl der Outbounds und muss einen
/// Index in `[0, outbound_count)` liefern. Ungültige Indizes werden vom Graph
/// geklemmt und protokolliert.
pub trait WaySelector: Send {
    /// Wählt einen Outbound-Index.
    fn select(&mut self, label: &str, outbound_count: usize) -> usize;
}

impl<F> WaySelector for F
where
    F: FnMut(&str, usize) -> usize + Send,
{
    fn select(&mut self, label: &str, outbound_count: usize) -> usize {
        self(label, outbound_count)
    }
}

/// Nimmt immer die Standardroute (Outbound 0).
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstOutbound;

impl WaySelector for FirstOutbound {
    fn select(&mut self, _label: &str, _outbound_count: usize) -> usize {
        0
    }
}

/// Nimmt immer den letzten Outbound.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastOutbound;

impl WaySelector for LastOutbound {
    fn select(&mut self, _label: &str, outbound_count: usize) -> usize {
        outbound_count.saturating_sub(1)
    }
}
