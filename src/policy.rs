//! Adaptive table-resolution policy.
//!
//! Lower target frequencies get denser tables for spectral smoothness;
//! higher frequencies get coarser tables so the resulting tick rate
//! (`frequency × table_size`) stays inside the interrupt budget.
//!
//! Bands are deployment configuration: different boards calibrate different
//! boundaries. Construction validates the two properties every configuration
//! must keep: sizes monotonically non-increasing with frequency, and no
//! band able to exceed the tick-rate ceiling.

use heapless::Vec;

use crate::wavetable::MAX_TABLE_SIZE;

/// Maximum number of configurable bands.
pub const MAX_BANDS: usize = 8;

/// One policy band, applying to frequencies up to and including `max_hz`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Upper bound of the band, Hz (inclusive).
    pub max_hz: f32,
    /// Table resolution used inside the band.
    pub table_size: usize,
}

/// Canonical band set for the reference board.
pub const DEFAULT_BANDS: &[Band] = &[
    Band { max_hz: 150.0, table_size: 200 },
    Band { max_hz: 300.0, table_size: 100 },
    Band { max_hz: 600.0, table_size: 50 },
    Band { max_hz: 1200.0, table_size: 30 },
];

/// Resolution used beyond the last band.
pub const DEFAULT_FALLBACK_SIZE: usize = 20;

/// Rejected band configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    /// More bands than [`MAX_BANDS`].
    TooManyBands,
    /// A band (or the fallback) has size 0.
    ZeroSize,
    /// A band (or the fallback) exceeds [`MAX_TABLE_SIZE`].
    Oversize,
    /// Band upper bounds are not finite and strictly increasing.
    BadBound,
    /// Table sizes grow with frequency somewhere in the configuration.
    NotMonotonic,
    /// `max_hz × table_size` exceeds the tick-rate ceiling for some band.
    RateExceeded,
}

impl PolicyError {
    /// Get error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TooManyBands => "P01",
            Self::ZeroSize => "P02",
            Self::Oversize => "P03",
            Self::BadBound => "P04",
            Self::NotMonotonic => "P05",
            Self::RateExceeded => "P06",
        }
    }

    /// Get error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::TooManyBands => "too many bands",
            Self::ZeroSize => "zero table size",
            Self::Oversize => "table size above capacity",
            Self::BadBound => "band bounds not increasing",
            Self::NotMonotonic => "sizes not non-increasing",
            Self::RateExceeded => "tick rate ceiling exceeded",
        }
    }
}

impl core::fmt::Display for PolicyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// Frequency → table resolution map.
#[derive(Debug)]
pub struct TableSizePolicy {
    bands: Vec<Band, MAX_BANDS>,
    fallback_size: usize,
}

impl TableSizePolicy {
    /// Build a policy from a band table.
    ///
    /// `bands` must be ordered by strictly increasing `max_hz` with
    /// non-increasing `table_size`; the fallback applies past the last band
    /// and must not be denser than it. Every finite band must satisfy
    /// `max_hz × table_size ≤ max_tick_rate_hz`.
    pub fn new(
        bands: &[Band],
        fallback_size: usize,
        max_tick_rate_hz: u32,
    ) -> Result<Self, PolicyError> {
        if fallback_size == 0 {
            return Err(PolicyError::ZeroSize);
        }
        if fallback_size > MAX_TABLE_SIZE {
            return Err(PolicyError::Oversize);
        }

        let mut prev: Option<&Band> = None;
        for band in bands {
            if band.table_size == 0 {
                return Err(PolicyError::ZeroSize);
            }
            if band.table_size > MAX_TABLE_SIZE {
                return Err(PolicyError::Oversize);
            }
            if !band.max_hz.is_finite() || band.max_hz <= 0.0 {
                return Err(PolicyError::BadBound);
            }
            if let Some(p) = prev {
                if band.max_hz <= p.max_hz {
                    return Err(PolicyError::BadBound);
                }
                if band.table_size > p.table_size {
                    return Err(PolicyError::NotMonotonic);
                }
            }
            if band.max_hz * band.table_size as f32 > max_tick_rate_hz as f32 {
                return Err(PolicyError::RateExceeded);
            }
            prev = Some(band);
        }
        if let Some(last) = bands.last() {
            if fallback_size > last.table_size {
                return Err(PolicyError::NotMonotonic);
            }
        }

        let mut stored = Vec::new();
        stored
            .extend_from_slice(bands)
            .map_err(|_| PolicyError::TooManyBands)?;

        Ok(Self {
            bands: stored,
            fallback_size,
        })
    }

    /// Resolution for a target frequency: the first band whose upper bound
    /// is at or above it, or the fallback past all bands.
    pub fn size_for(&self, frequency_hz: f32) -> usize {
        for band in &self.bands {
            if frequency_hz <= band.max_hz {
                return band.table_size;
            }
        }
        self.fallback_size
    }

    /// Configured bands, in order.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Resolution used beyond the last band.
    pub fn fallback_size(&self) -> usize {
        self.fallback_size
    }
}

impl Default for TableSizePolicy {
    fn default() -> Self {
        // The canonical table is known-good; degrade to a bandless policy
        // instead of panicking if it is ever edited into an invalid state.
        match Self::new(DEFAULT_BANDS, DEFAULT_FALLBACK_SIZE, 50_000) {
            Ok(policy) => policy,
            Err(_) => Self {
                bands: Vec::new(),
                fallback_size: DEFAULT_FALLBACK_SIZE,
            },
        }
    }
}
