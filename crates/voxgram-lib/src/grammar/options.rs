//! Build and match limits for a `Grammar`.

use crate::build::BuildLimits;
use crate::engine::MatchLimits;

/// Limits applied when building and matching a grammar.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GrammarOptions {
    build: BuildLimits,
    matching: MatchLimits,
}

impl GrammarOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum nested activations of one rule on a path. At least 1.
    pub fn with_max_rule_depth(mut self, depth: usize) -> Self {
        self.build.max_rule_depth = depth.max(1);
        self
    }

    pub fn with_max_nodes(mut self, nodes: usize) -> Self {
        self.build.max_nodes = nodes;
        self
    }

    /// Maximum `Next` steps per facade call.
    pub fn with_exec_fuel(mut self, fuel: u32) -> Self {
        self.matching.exec_fuel = fuel;
        self
    }

    /// Scored wildcard spans must score strictly above this.
    pub fn with_score_floor(mut self, floor: f64) -> Self {
        self.matching.score_floor = floor;
        self
    }

    pub fn max_rule_depth(&self) -> usize {
        self.build.max_rule_depth
    }

    pub fn max_nodes(&self) -> usize {
        self.build.max_nodes
    }

    pub fn exec_fuel(&self) -> u32 {
        self.matching.exec_fuel
    }

    pub fn score_floor(&self) -> f64 {
        self.matching.score_floor
    }

    pub fn build_limits(&self) -> BuildLimits {
        self.build
    }

    pub fn match_limits(&self) -> MatchLimits {
        self.matching
    }
}
