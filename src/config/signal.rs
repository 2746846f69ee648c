use std::collections::BTreeSet;

use gnss::prelude::Constellation;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Signals the generator knows how to synthesize
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
)]
pub enum Signal {
    // GPS
    L1CA,
    L1C,
    L2C,
    L2P,
    L5,
    // BeiDou
    B1C,
    B1I,
    B2I,
    B3I,
    B2a,
    B2b,
    // Galileo
    E1,
    E5a,
    E5b,
    E5,
    E6,
    // Glonass
    G1,
    G2,
}

impl Signal {
    /// Constellation transmitting this signal
    pub fn constellation(&self) -> Constellation {
        match self {
            Self::L1CA | Self::L1C | Self::L2C | Self::L2P | Self::L5 => Constellation::GPS,
            Self::B1C | Self::B1I | Self::B2I | Self::B3I | Self::B2a | Self::B2b => {
                Constellation::BeiDou
            },
            Self::E1 | Self::E5a | Self::E5b | Self::E5 | Self::E6 => Constellation::Galileo,
            Self::G1 | Self::G2 => Constellation::Glonass,
        }
    }
    /// Signals transmitted by given constellation
    pub fn catalogue(constellation: Constellation) -> impl Iterator<Item = Signal> {
        Self::iter().filter(move |s| s.constellation() == constellation)
    }
}

/// Selected signals, across all constellations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalSelection {
    pub(crate) selected: BTreeSet<Signal>,
}

impl SignalSelection {
    /// Selects a signal
    pub fn select(&mut self, signal: Signal) {
        self.selected.insert(signal);
    }
    /// Deselects a signal, returns true if it was selected
    pub fn deselect(&mut self, signal: Signal) -> bool {
        self.selected.remove(&signal)
    }
    /// Enables or disables a signal
    pub fn set(&mut self, signal: Signal, enabled: bool) {
        if enabled {
            self.select(signal);
        } else {
            self.deselect(signal);
        }
    }
    /// Deselects all signals of a constellation
    pub fn deselect_constellation(&mut self, constellation: Constellation) {
        self.selected.retain(|s| s.constellation() != constellation);
    }
    pub fn clear(&mut self) {
        self.selected.clear();
    }
    pub fn is_selected(&self, signal: Signal) -> bool {
        self.selected.contains(&signal)
    }
    /// Selected signals, sorted by constellation then frequency band
    pub fn selected(&self) -> impl Iterator<Item = Signal> + '_ {
        self.selected.iter().copied()
    }
    /// Selected signals of one constellation
    pub fn selected_for(&self, constellation: Constellation) -> impl Iterator<Item = Signal> + '_ {
        self.selected()
            .filter(move |s| s.constellation() == constellation)
    }
    /// Constellations with at least one selected signal
    pub fn constellations(&self) -> BTreeSet<Constellation> {
        self.selected.iter().map(|s| s.constellation()).collect()
    }
    pub fn len(&self) -> usize {
        self.selected.len()
    }
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
