//! Frequency analysis node at the end of the filter chain.
//!
//! The audio thread feeds a mono mixdown into a short ring buffer; the UI
//! thread turns the latest window into 128 byte-scaled magnitude bins.

use std::collections::VecDeque;
use std::f32::consts::PI;
use std::sync::{Arc, Mutex};

use rustfft::{Fft, FftPlanner, num_complex::Complex};

pub const FFT_SIZE: usize = 256;
pub const BIN_COUNT: usize = FFT_SIZE / 2;

const SMOOTHING: f32 = 0.8;
const MIN_DB: f32 = -100.0;
const MAX_DB: f32 = -30.0;

pub type SampleBuf = Arc<Mutex<VecDeque<f32>>>;

#[derive(Clone)]
pub struct Analyser {
    samples: SampleBuf,
    smoothed: Arc<Mutex<Vec<f32>>>,
    fft: Arc<dyn Fft<f32>>,
    window: Arc<[f32]>,
}

impl Default for Analyser {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyser {
    pub fn new() -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(FFT_SIZE);

        // Blackman window
        let n = FFT_SIZE as f32;
        let window: Arc<[f32]> = (0..FFT_SIZE)
            .map(|i| {
                let x = i as f32 / n;
                0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
            })
            .collect();

        Self {
            samples: Arc::new(Mutex::new(VecDeque::with_capacity(FFT_SIZE))),
            smoothed: Arc::new(Mutex::new(vec![0.0; BIN_COUNT])),
            fft,
            window,
        }
    }

    /// Record one mono sample. Called from the audio thread; never blocks.
    pub(crate) fn push(&self, sample: f32) {
        if let Ok(mut buf) = self.samples.try_lock() {
            if buf.len() >= FFT_SIZE {
                buf.pop_front();
            }
            buf.push_back(sample);
        }
    }

    /// Forget buffered samples and smoothing history.
    pub fn clear(&self) {
        if let Ok(mut buf) = self.samples.lock() {
            buf.clear();
        }
        if let Ok(mut s) = self.smoothed.lock() {
            s.iter_mut().for_each(|v| *v = 0.0);
        }
    }

    /// Current spectrum, one byte per bin (0 = at or below -100 dB, 255 = at
    /// or above -30 dB), time-smoothed across calls.
    pub fn byte_frequency_data(&self) -> Vec<u8> {
        let mut input: Vec<Complex<f32>> = vec![Complex::new(0.0, 0.0); FFT_SIZE];
        if let Ok(buf) = self.samples.lock() {
            let offset = FFT_SIZE - buf.len().min(FFT_SIZE);
            let skip = buf.len().saturating_sub(FFT_SIZE);
            for (i, s) in buf.iter().skip(skip).enumerate() {
                let idx = offset + i;
                input[idx] = Complex::new(s * self.window[idx], 0.0);
            }
        }

        self.fft.process(&mut input);

        let Ok(mut smoothed) = self.smoothed.lock() else {
            return vec![0; BIN_COUNT];
        };

        input[..BIN_COUNT]
            .iter()
            .zip(smoothed.iter_mut())
            .map(|(c, prev)| {
                let magnitude = c.norm() / FFT_SIZE as f32;
                *prev = SMOOTHING * *prev + (1.0 - SMOOTHING) * magnitude;
                to_byte(*prev)
            })
            .collect()
    }
}

fn to_byte(magnitude: f32) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = (db - MIN_DB) / (MAX_DB - MIN_DB) * 255.0;
    scaled.clamp(0.0, 255.0) as u8
}
