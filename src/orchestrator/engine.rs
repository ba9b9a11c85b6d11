use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::sync::watch;

use super::delay::{Delay, TokioDelay};
use super::error::FetchError;
use super::settings::{FetchSettings, ImageStrategy};
use super::state::{FetchPhase, TopicViewState};
use crate::cache::{CacheEntry, CacheKey, SharedCache};
use crate::content::{ContentBundle, ResolvedImage, VisualPrompt};
use crate::curriculum::TopicSelection;
use crate::genai::{ContentGenerator, GenerationError};

/// Fetches study content for the selected topic and publishes its progress.
///
/// Every call to [`select`](Self::select) bumps a generation counter. A fetch
/// only publishes state or writes the cache while the generation it started
/// with is still current, so selecting another topic silently retires any
/// fetch that is still running.
pub struct TopicContentOrchestrator {
    client: Arc<dyn ContentGenerator>,
    cache: SharedCache,
    settings: FetchSettings,
    delay: Arc<dyn Delay>,
    state_tx: watch::Sender<TopicViewState>,
    generation_tx: watch::Sender<u64>,
    current: Mutex<Option<TopicSelection>>,
}

impl TopicContentOrchestrator {
    pub fn new(
        client: Arc<dyn ContentGenerator>,
        cache: SharedCache,
        settings: FetchSettings,
    ) -> Self {
        let (state_tx, _) = watch::channel(TopicViewState::default());
        let (generation_tx, _) = watch::channel(0);
        Self {
            client,
            cache,
            settings,
            delay: Arc::new(TokioDelay),
            state_tx,
            generation_tx,
            current: Mutex::new(None),
        }
    }

    /// Replace the timer used for backoff and stagger sleeps
    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    pub fn cache(&self) -> SharedCache {
        Arc::clone(&self.cache)
    }

    pub fn subscribe(&self) -> watch::Receiver<TopicViewState> {
        self.state_tx.subscribe()
    }

    /// Snapshot of the latest published state
    pub fn state(&self) -> TopicViewState {
        self.state_tx.borrow().clone()
    }

    /// The most recently selected topic, if any
    pub fn current_selection(&self) -> Option<TopicSelection> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Make `selection` the active topic and load its content.
    ///
    /// Served from the cache without any remote call when possible. Returns
    /// `FetchError::Stale` when another selection replaced this one before it
    /// finished; nothing of a stale fetch is published or cached.
    pub async fn select(&self, selection: TopicSelection) -> Result<Arc<CacheEntry>, FetchError> {
        let token = self.begin(&selection);
        let key = CacheKey::from(&selection);

        let cached = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key);
        if let Some(entry) = cached {
            log::debug!("Cache hit for {} {}", selection.unit_id, selection.topic_id);
            let ready = TopicViewState::ready(token, selection, &entry);
            self.publish(token, |state| *state = ready)?;
            return Ok(entry);
        }

        log::info!(
            "Fetching content for '{}' ({})",
            selection.topic_name,
            selection.unit_name
        );
        let fetching = TopicViewState::fetching(token, selection.clone());
        self.publish(token, |state| *state = fetching)?;

        match self.fetch(token, &selection, key).await {
            Ok(entry) => Ok(entry),
            Err(FetchError::Stale) => {
                log::debug!("Discarding superseded fetch for {}", selection.topic_id);
                Err(FetchError::Stale)
            }
            Err(e) => {
                log::error!("Fetching '{}' failed: {}", selection.topic_name, e);
                let message = e.to_string();
                self.publish(token, |state| {
                    state.phase = FetchPhase::Failed;
                    state.loading = false;
                    state.image_loading = false;
                    state.error = Some(message);
                })?;
                Err(e)
            }
        }
    }

    /// Run the current selection again, e.g. after a failure.
    ///
    /// Returns `None` when nothing has been selected yet.
    pub async fn retry(&self) -> Option<Result<Arc<CacheEntry>, FetchError>> {
        let selection = self.current_selection()?;
        log::info!("Retrying '{}'", selection.topic_name);
        Some(self.select(selection).await)
    }

    /// Record `selection` and bump the generation under the same lock, so the
    /// current selection always belongs to the live generation.
    fn begin(&self, selection: &TopicSelection) -> u64 {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current = Some(selection.clone());

        let mut token = 0;
        self.generation_tx.send_modify(|generation| {
            *generation += 1;
            token = *generation;
        });
        token
    }

    fn ensure_current(&self, token: u64) -> Result<(), FetchError> {
        if *self.generation_tx.borrow() == token {
            Ok(())
        } else {
            Err(FetchError::Stale)
        }
    }

    /// Apply `update` to the published state if `token` is still current.
    ///
    /// The generation is checked while the state is locked, so a retired
    /// fetch can never overwrite the state of a newer selection.
    fn publish(
        &self,
        token: u64,
        update: impl FnOnce(&mut TopicViewState),
    ) -> Result<(), FetchError> {
        let mut published = false;
        self.state_tx.send_if_modified(|state| {
            if *self.generation_tx.borrow() != token {
                return false;
            }
            update(state);
            state.generation = token;
            published = true;
            true
        });

        if published {
            Ok(())
        } else {
            Err(FetchError::Stale)
        }
    }

    /// Sleep for `duration`, waking early if the selection changes
    async fn pause(&self, token: u64, duration: Duration) -> Result<(), FetchError> {
        let mut generation = self.generation_tx.subscribe();
        tokio::select! {
            _ = self.delay.sleep(duration) => {}
            _ = async { let _ = generation.wait_for(|g| *g != token).await; } => {}
        }
        self.ensure_current(token)
    }

    async fn fetch(
        &self,
        token: u64,
        selection: &TopicSelection,
        key: CacheKey,
    ) -> Result<Arc<CacheEntry>, FetchError> {
        let bundle = self.fetch_text(token, selection).await?;

        let images = if bundle.visuals.is_empty() {
            Vec::new()
        } else {
            let content = bundle.clone();
            self.publish(token, |state| {
                state.content = Some(content);
                state.loading = false;
                state.image_loading = true;
                state.phase = FetchPhase::ImagesFetching;
            })?;
            self.resolve_images(token, &bundle.visuals).await?
        };

        log::info!(
            "Loaded '{}' with {}/{} diagrams",
            selection.topic_name,
            images.len(),
            bundle.visuals.len()
        );

        let entry = {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            self.ensure_current(token)?;
            cache.put(key, CacheEntry::new(bundle, images))
        };

        let ready = TopicViewState::ready(token, selection.clone(), &entry);
        self.publish(token, |state| *state = ready)?;
        Ok(entry)
    }

    /// Text request with bounded exponential backoff on rate limits
    async fn fetch_text(
        &self,
        token: u64,
        selection: &TopicSelection,
    ) -> Result<ContentBundle, FetchError> {
        let mut retries = 0;
        loop {
            let result = self
                .client
                .generate_topic_content(&selection.unit_name, &selection.topic_name)
                .await;
            self.ensure_current(token)?;

            match result {
                Ok(Some(bundle)) if !bundle.is_empty() => return Ok(bundle),
                Ok(_) => {
                    log::warn!("No content generated for '{}'", selection.topic_name);
                    return Err(FetchError::EmptyContent);
                }
                Err(e) if e.is_rate_limited() && retries < self.settings.max_retries => {
                    let wait = self.settings.backoff_for(retries);
                    retries += 1;
                    log::warn!(
                        "Rate limited on '{}', retry {}/{} in {:?}",
                        selection.topic_name,
                        retries,
                        self.settings.max_retries,
                        wait
                    );
                    self.pause(token, wait).await?;
                }
                Err(e) => {
                    return Err(match FetchError::classify(&e) {
                        FetchError::RateLimited { .. } => FetchError::RateLimited {
                            attempts: retries + 1,
                        },
                        other => other,
                    });
                }
            }
        }
    }

    /// Generate one image per visual prompt, publishing each as it arrives
    async fn resolve_images(
        &self,
        token: u64,
        visuals: &[VisualPrompt],
    ) -> Result<Vec<ResolvedImage>, FetchError> {
        let mut images = Vec::with_capacity(visuals.len());

        match self.settings.image_strategy {
            ImageStrategy::Parallel => {
                let mut pending: FuturesUnordered<_> = visuals
                    .iter()
                    .map(|visual| async move {
                        (visual, self.client.generate_image(&visual.prompt).await)
                    })
                    .collect();

                while let Some((visual, result)) = pending.next().await {
                    self.ensure_current(token)?;
                    if let Some(image) = accept_image(visual, result) {
                        images.push(image);
                        self.publish_images(token, &images)?;
                    }
                }
            }
            ImageStrategy::Staggered { delay } => {
                for (i, visual) in visuals.iter().enumerate() {
                    if i > 0 {
                        self.pause(token, delay).await?;
                    }
                    let result = self.client.generate_image(&visual.prompt).await;
                    self.ensure_current(token)?;
                    if let Some(image) = accept_image(visual, result) {
                        images.push(image);
                        self.publish_images(token, &images)?;
                    }
                }
            }
        }

        Ok(images)
    }

    fn publish_images(&self, token: u64, images: &[ResolvedImage]) -> Result<(), FetchError> {
        let images = images.to_vec();
        self.publish(token, |state| state.images = images)
    }
}

fn accept_image(
    visual: &VisualPrompt,
    result: Result<Option<String>, GenerationError>,
) -> Option<ResolvedImage> {
    match result {
        Ok(Some(url)) if !url.is_empty() => Some(ResolvedImage::new(url, visual.caption.clone())),
        Ok(_) => {
            log::warn!("No image returned for '{}'", visual.caption);
            None
        }
        Err(e) => {
            log::warn!("Failed to generate image '{}': {}", visual.caption, e);
            None
        }
    }
}
