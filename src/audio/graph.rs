//! The processing graph: source -> 10 EQ bands -> analyser -> output.
//!
//! The chain is built lazily on first activation and then lives for the rest
//! of the session. Switching tracks only re-points the input: the previous
//! `GraphSource` is disconnected and stops yielding samples.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rodio::Source;
use tracing::debug;

use super::analyser::Analyser;
use super::eq::{Equalizer, FilterChain};

const DEFAULT_CHANNELS: u16 = 2;
const DEFAULT_SAMPLE_RATE: u32 = 44_100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphState {
    /// Nothing built yet.
    Idle,
    Running,
    /// Built but halted: connected sources are held in place and yield
    /// silence until the next `activate`.
    Suspended,
}

struct GraphInner {
    state: Mutex<GraphState>,
    chain: Mutex<Option<FilterChain>>,
    equalizer: Mutex<Equalizer>,
    analyser: Analyser,
    generation: AtomicU64,
    builds: AtomicUsize,
}

/// Shared handle to the processing graph. Cloning shares the same graph.
#[derive(Clone)]
pub struct AudioGraph {
    inner: Arc<GraphInner>,
}

impl Default for AudioGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioGraph {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(GraphInner {
                state: Mutex::new(GraphState::Idle),
                chain: Mutex::new(None),
                equalizer: Mutex::new(Equalizer::default()),
                analyser: Analyser::new(),
                generation: AtomicU64::new(0),
                builds: AtomicUsize::new(0),
            }),
        }
    }

    pub fn state(&self) -> GraphState {
        self.inner
            .state
            .lock()
            .map(|s| *s)
            .unwrap_or(GraphState::Idle)
    }

    /// Build the chain if needed, or resume a suspended graph.
    pub fn activate(&self) {
        let Ok(mut state) = self.inner.state.lock() else {
            return;
        };
        match *state {
            GraphState::Running => {}
            GraphState::Suspended => {
                debug!("resuming audio graph");
                *state = GraphState::Running;
            }
            GraphState::Idle => {
                let eq = self.equalizer();
                if let Ok(mut chain) = self.inner.chain.lock() {
                    *chain = Some(FilterChain::new(DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE, &eq));
                }
                self.inner.builds.fetch_add(1, Ordering::Relaxed);
                debug!("audio graph built");
                *state = GraphState::Running;
            }
        }
    }

    pub fn suspend(&self) {
        if let Ok(mut state) = self.inner.state.lock() {
            if *state == GraphState::Running {
                debug!("suspending audio graph");
                *state = GraphState::Suspended;
            }
        }
    }

    /// Route `source` through the chain, disconnecting whatever was connected.
    pub fn connect<S>(&self, source: S) -> GraphSource<S>
    where
        S: Source<Item = f32>,
    {
        self.activate();

        let (channels, sample_rate) = (source.channels(), source.sample_rate());
        if let Ok(mut chain) = self.inner.chain.lock() {
            if let Some(chain) = chain.as_mut() {
                if chain.retune(channels, sample_rate) {
                    debug!(channels, sample_rate, "retuned equalizer for new source format");
                }
            }
        }
        self.inner.analyser.clear();

        let generation = self.inner.generation.fetch_add(1, Ordering::AcqRel) + 1;
        GraphSource {
            inner: source,
            graph: self.clone(),
            generation,
            channel: 0,
            mix: 0.0,
        }
    }

    /// Detach the connected source, if any.
    pub fn disconnect(&self) {
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        self.inner.analyser.clear();
    }

    /// Set one band's gain (clamped). Returns the applied value.
    pub fn set_gain(&self, band: usize, gain_db: f32) -> Option<f32> {
        let applied = self.inner.equalizer.lock().ok()?.set_gain(band, gain_db)?;
        if let Ok(mut chain) = self.inner.chain.lock() {
            if let Some(chain) = chain.as_mut() {
                chain.set_gain(band, applied);
            }
        }
        Some(applied)
    }

    pub fn reset_gains(&self) {
        if let Ok(mut eq) = self.inner.equalizer.lock() {
            eq.reset();
        }
        if let Ok(mut chain) = self.inner.chain.lock() {
            if let Some(chain) = chain.as_mut() {
                for band in 0..super::eq::BAND_COUNT {
                    chain.set_gain(band, 0.0);
                }
            }
        }
    }

    pub fn equalizer(&self) -> Equalizer {
        self.inner
            .equalizer
            .lock()
            .map(|eq| *eq)
            .unwrap_or_default()
    }

    pub fn analyser(&self) -> &Analyser {
        &self.inner.analyser
    }

    /// How many times the filter chain has been constructed.
    #[cfg(test)]
    pub fn build_count(&self) -> usize {
        self.inner.builds.load(Ordering::Relaxed)
    }

    fn is_suspended(&self) -> bool {
        self.state() == GraphState::Suspended
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner.generation.load(Ordering::Acquire) == generation
    }

    fn process(&self, sample: f32, channel: usize, channels: u16, sample_rate: u32) -> f32 {
        let Ok(mut chain) = self.inner.chain.lock() else {
            return sample;
        };
        match chain.as_mut() {
            Some(chain) => {
                if channel == 0 && chain.format() != (channels.max(1), sample_rate) {
                    chain.retune(channels, sample_rate);
                }
                chain.process(sample, channel)
            }
            None => sample,
        }
    }
}

/// A source wired into the graph. Yields nothing once another source has
/// been connected in its place.
pub struct GraphSource<S> {
    inner: S,
    graph: AudioGraph,
    generation: u64,
    channel: usize,
    mix: f32,
}

impl<S> Iterator for GraphSource<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if !self.graph.is_current(self.generation) {
            return None;
        }
        // A suspended graph holds its input in place and outputs silence.
        if self.graph.is_suspended() {
            return Some(0.0);
        }

        let sample = self.inner.next()?;
        let channels = self.inner.channels().max(1);
        let out = self
            .graph
            .process(sample, self.channel, channels, self.inner.sample_rate());

        self.mix += out;
        self.channel += 1;
        if self.channel >= channels as usize {
            self.graph.analyser().push(self.mix / channels as f32);
            self.mix = 0.0;
            self.channel = 0;
        }

        Some(out)
    }
}

impl<S> Source for GraphSource<S>
where
    S: Source<Item = f32>,
{
    fn current_span_len(&self) -> Option<usize> {
        self.inner.current_span_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), rodio::source::SeekError> {
        let result = self.inner.try_seek(pos);
        if result.is_ok() {
            self.channel = 0;
            self.mix = 0.0;
            self.graph.analyser().clear();
        }
        result
    }
}
