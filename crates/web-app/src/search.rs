//! Debounced search input for list pages.

use gloo_timers::future::TimeoutFuture;

pub const DEFAULT_DELAY_MS: u32 = 300;

/// Tracks the current query of a list-page search box.
///
/// Every keystroke advances the generation counter. After waiting out the
/// debounce interval, a caller fires the query only if its generation is
/// still the latest one, so rapid typing results in a single request.
#[derive(Debug)]
pub struct SearchInput {
    query: String,
    generation: u64,
    delay: u32,
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY_MS)
    }
}

impl SearchInput {
    #[must_use]
    pub fn new(delay: u32) -> Self {
        Self {
            query: String::new(),
            generation: 0,
            delay,
        }
    }

    /// Record a keystroke, invalidating all earlier generations.
    pub fn input(&mut self, query: &str) -> u64 {
        self.query = query.to_string();
        self.generation += 1;
        self.generation
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Wait out the debounce interval. Returns the query if no newer
    /// keystroke arrived in the meantime.
    pub async fn settle(&self, generation: u64) -> Option<&str> {
        TimeoutFuture::new(self.delay).await;
        self.is_current(generation).then(|| self.query.as_str())
    }
}
