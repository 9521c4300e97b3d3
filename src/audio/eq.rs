//! Ten-band graphic equalizer: gain state plus the biquad filter chain.

use biquad::{Biquad, Coefficients, DirectForm2Transposed, ToHertz, Type};

pub const BAND_COUNT: usize = 10;

/// Center frequencies of the peaking bands, in Hz.
pub const BAND_FREQS: [f32; BAND_COUNT] = [
    32.0, 64.0, 125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0, 16000.0,
];

pub const MAX_GAIN_DB: f32 = 12.0;
const BAND_Q: f32 = 1.0;

/// Per-band gains in dB, always within `-MAX_GAIN_DB..=MAX_GAIN_DB`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equalizer {
    gains: [f32; BAND_COUNT],
}

impl Default for Equalizer {
    fn default() -> Self {
        Self {
            gains: [0.0; BAND_COUNT],
        }
    }
}

impl Equalizer {
    pub fn gains(&self) -> [f32; BAND_COUNT] {
        self.gains
    }

    pub fn gain(&self, band: usize) -> Option<f32> {
        self.gains.get(band).copied()
    }

    /// Set a band's gain, clamped to the allowed range. Returns the applied
    /// value, or `None` for an unknown band.
    pub fn set_gain(&mut self, band: usize, gain_db: f32) -> Option<f32> {
        let slot = self.gains.get_mut(band)?;
        let gain = if gain_db.is_finite() {
            gain_db.clamp(-MAX_GAIN_DB, MAX_GAIN_DB)
        } else {
            0.0
        };
        *slot = gain;
        Some(gain)
    }

    pub fn reset(&mut self) {
        self.gains = [0.0; BAND_COUNT];
    }

    #[cfg(test)]
    pub fn is_flat(&self) -> bool {
        self.gains.iter().all(|g| *g == 0.0)
    }
}

/// Short label for a band's frequency: `32`, `500`, `1k`, `16k`.
pub fn band_label(band: usize) -> String {
    match BAND_FREQS.get(band) {
        Some(f) if *f >= 1000.0 => format!("{}k", (*f / 1000.0) as u32),
        Some(f) => format!("{}", *f as u32),
        None => "?".to_string(),
    }
}

fn make_filter(freq: f32, gain_db: f32, sample_rate: u32) -> DirectForm2Transposed<f32> {
    let sample_rate = sample_rate.max(2) as f32;
    let max_freq = sample_rate / 2.0 - 1.0;
    let clamped_freq = freq.min(max_freq).max(1.0);
    let coeffs = Coefficients::<f32>::from_params(
        Type::PeakingEQ(gain_db),
        sample_rate.hz(),
        clamped_freq.hz(),
        BAND_Q,
    )
    .unwrap_or(Coefficients {
        a1: 0.0,
        a2: 0.0,
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
    });
    DirectForm2Transposed::<f32>::new(coeffs)
}

/// The ten filters in series, one set per channel.
pub(crate) struct FilterChain {
    /// filters[channel][band]
    filters: Vec<[DirectForm2Transposed<f32>; BAND_COUNT]>,
    gains: [f32; BAND_COUNT],
    channels: u16,
    sample_rate: u32,
}

impl FilterChain {
    pub(crate) fn new(channels: u16, sample_rate: u32, eq: &Equalizer) -> Self {
        let mut chain = Self {
            filters: Vec::new(),
            gains: eq.gains(),
            channels: 0,
            sample_rate,
        };
        chain.retune(channels, sample_rate);
        chain
    }

    pub(crate) fn format(&self) -> (u16, u32) {
        (self.channels, self.sample_rate)
    }

    /// Recompute coefficients for a new stream format. Returns whether
    /// anything changed.
    pub(crate) fn retune(&mut self, channels: u16, sample_rate: u32) -> bool {
        let channels = channels.max(1);
        if (channels, sample_rate) == (self.channels, self.sample_rate) {
            return false;
        }
        self.channels = channels;
        self.sample_rate = sample_rate;
        let gains = self.gains;
        self.filters = (0..channels as usize)
            .map(|_| std::array::from_fn(|i| make_filter(BAND_FREQS[i], gains[i], sample_rate)))
            .collect();
        true
    }

    pub(crate) fn set_gain(&mut self, band: usize, gain_db: f32) {
        if band >= BAND_COUNT || self.gains[band] == gain_db {
            return;
        }
        self.gains[band] = gain_db;
        for ch_filters in &mut self.filters {
            ch_filters[band] = make_filter(BAND_FREQS[band], gain_db, self.sample_rate);
        }
    }

    pub(crate) fn process(&mut self, sample: f32, channel: usize) -> f32 {
        let Some(ch_filters) = self.filters.get_mut(channel) else {
            return sample;
        };
        let mut out = sample;
        for filter in ch_filters.iter_mut() {
            out = filter.run(out);
        }
        out
    }
}
