//! Scripted pricing provider.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::RawPayload;
use crate::error::ProviderError;
use crate::port::PricingProvider;

/// Replays queued responses in order, repeating the last one.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<RawPayload, ProviderError>>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    /// Always answer with `payload`.
    pub fn returning(payload: RawPayload) -> Self {
        Self::scripted(vec![Ok(payload)])
    }

    /// Always fail with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::scripted(vec![Err(error)])
    }

    /// Answer with each response in turn.
    pub fn scripted(responses: Vec<Result<RawPayload, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Sleep before every answer.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `fetch` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_response(&self) -> Result<RawPayload, ProviderError> {
        let mut responses = self.responses.lock();
        if responses.len() > 1 {
            responses.pop_front().unwrap_or(Ok(RawPayload::default()))
        } else {
            responses.front().cloned().unwrap_or(Ok(RawPayload::default()))
        }
    }
}

#[async_trait]
impl PricingProvider for ScriptedProvider {
    async fn fetch(&self, _region: &str) -> Result<RawPayload, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.next_response()
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
