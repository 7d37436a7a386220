// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::error::{Error, Result};

/// Default maximum number of certificates in one candidate path.
pub const DEFAULT_MAX_PATH_DEPTH: usize = 32;

/// Path building options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathBuilderOptions {
    /// Maximum number of certificates in a candidate path, target included
    pub max_path_depth: usize,

    /// Keep attempting anchor paths after the first success
    pub explore_all_paths: bool,
}

impl Default for PathBuilderOptions {
    fn default() -> Self {
        Self {
            max_path_depth: DEFAULT_MAX_PATH_DEPTH,
            explore_all_paths: false,
        }
    }
}

impl PathBuilderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum path depth
    pub fn with_max_path_depth(mut self, depth: usize) -> Self {
        self.max_path_depth = depth;
        self
    }

    /// Attempt every reachable anchor path instead of stopping at the first
    /// one that verifies
    pub fn explore_all_paths(mut self) -> Self {
        self.explore_all_paths = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_path_depth == 0 {
            return Err(Error::config("max_path_depth must be at least 1"));
        }
        Ok(())
    }
}
