//! Layer-übergreifende Typen: Laufzeit-Optionen.

pub mod options;

pub use options::SimOptions;
