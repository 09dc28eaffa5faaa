use helio_core::SampleFilter;
use serde::{Deserialize, Serialize};

use crate::align::DEFAULT_ALIGNMENT_EPSILON;

/// What happens to a light's cookie on a frame where its probe ray misses
/// the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissPolicy {
    /// Leave the last published cookie in place.
    #[default]
    KeepPrevious,
    /// Publish a black cookie.
    Clear,
}

/// Configuration builder for caustic cookie synthesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CausticsConfig {
    /// How baked textures are read
    pub filter: SampleFilter,
    /// Spread the texel loop over the rayon pool
    pub parallel: bool,
    pub miss_policy: MissPolicy,
    /// Degenerate-alignment threshold, see [`crate::align`]
    pub alignment_epsilon: f32,
}

impl Default for CausticsConfig {
    fn default() -> Self {
        Self {
            filter: SampleFilter::Bilinear,
            parallel: true,
            miss_policy: MissPolicy::KeepPrevious,
            alignment_epsilon: DEFAULT_ALIGNMENT_EPSILON,
        }
    }
}

impl CausticsConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sampling filter
    pub fn with_filter(mut self, filter: SampleFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Enable or disable parallel texel blending
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the miss policy
    pub fn with_miss_policy(mut self, policy: MissPolicy) -> Self {
        self.miss_policy = policy;
        self
    }

    /// Set the degenerate-alignment threshold
    pub fn with_alignment_epsilon(mut self, epsilon: f32) -> Self {
        self.alignment_epsilon = epsilon.max(f32::EPSILON);
        self
    }
}
