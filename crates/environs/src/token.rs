// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Unique tokens for immutable fields chosen at environment creation.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngCore;
use ulid::Ulid;

#[cfg(test)]
#[path = "./token_test.rs"]
mod token_test;

/// Error produced by a [`TokenSource`].
pub type TokenError = Box<dyn std::error::Error + Send + Sync>;

/// A source of fresh, unique tokens.
pub trait TokenSource: Send + Sync {
    fn new_token(&self) -> Result<String, TokenError>;
}

/// Lowercase ULIDs built from the system clock and OS randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct UlidTokens;

impl TokenSource for UlidTokens {
    fn new_token(&self) -> Result<String, TokenError> {
        let millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        let mut random = [0u8; 16];
        rand::rngs::OsRng.try_fill_bytes(&mut random)?;
        let ulid = Ulid::from_parts(millis, u128::from_be_bytes(random));
        Ok(ulid.to_string().to_lowercase())
    }
}

/// Context for first-time environment creation.
#[derive(Clone)]
pub struct BootstrapContext {
    tokens: Arc<dyn TokenSource>,
}

impl BootstrapContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `tokens` instead of the default ULID source.
    pub fn with_token_source(mut self, tokens: Arc<dyn TokenSource>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn new_token(&self) -> Result<String, TokenError> {
        self.tokens.new_token()
    }
}

impl Default for BootstrapContext {
    fn default() -> Self {
        Self {
            tokens: Arc::new(UlidTokens),
        }
    }
}

impl std::fmt::Debug for BootstrapContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapContext").finish_non_exhaustive()
    }
}
