//! The animator: owns the registry, keyframes, time cursor and consumers.

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::animatable::Animatable;
use crate::cache::SnapshotCache;
use crate::config::AnimatorConfig;
use crate::descriptor::ParameterDescriptor;
use crate::ids::{AnimatorId, ConsumerId};
use crate::keyframe::KeyframeStore;
use crate::registry::ParameterRegistry;
use crate::sampling::sample;
use crate::script::{load_script, parse_script, read_script};
use crate::snapshot::ParamValues;
use crate::value::Value;
use crate::AnimatorError;

/// Lifecycle of an [`Animator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimatorState {
    /// Registry open, no keyframes.
    Constructed,
    /// Keyframes parsed; `start`/`end` fixed and the registry closed.
    ScriptLoaded,
    /// At least one `set_time` has been dispatched.
    Playing,
}

/// Keyframe animator driving a list of [`Animatable`] consumers.
///
/// Registry and keyframes are immutable once loaded and shared between an
/// animator and its clones; each clone owns its time cursor, snapshot cache and
/// a deep copy of the consumers, so clones can be handed to worker threads.
pub struct Animator {
    id: AnimatorId,
    config: AnimatorConfig,
    registry: Arc<ParameterRegistry>,
    store: Option<Arc<KeyframeStore>>,
    script_path: Option<PathBuf>,
    state: AnimatorState,
    time: f64,
    consumers: Vec<Box<dyn Animatable>>,
    cache: SnapshotCache,
    snapshot: Option<Arc<ParamValues>>,
}

impl Animator {
    pub fn new(config: AnimatorConfig) -> Self {
        let id = AnimatorId::next();
        debug!("Animator {} created", id);
        Self {
            id,
            cache: SnapshotCache::new(config.snapshot_cache_size),
            config,
            registry: Arc::new(ParameterRegistry::new()),
            store: None,
            script_path: None,
            state: AnimatorState::Constructed,
            time: 0.0,
            consumers: Vec::new(),
            snapshot: None,
        }
    }

    /// Create an animator that reads `path` on [`Animator::load_keyframes`].
    pub fn from_path(path: impl Into<PathBuf>, config: AnimatorConfig) -> Self {
        let mut animator = Self::new(config);
        animator.script_path = Some(path.into());
        animator
    }

    #[inline]
    pub fn id(&self) -> AnimatorId {
        self.id
    }

    #[inline]
    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    #[inline]
    pub fn registry(&self) -> &ParameterRegistry {
        &self.registry
    }

    pub fn script_path(&self) -> Option<&Path> {
        self.script_path.as_deref()
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.store.is_some()
    }

    pub fn keyframes(&self) -> Option<&KeyframeStore> {
        self.store.as_deref()
    }

    fn loaded_store(&self) -> Result<&KeyframeStore, AnimatorError> {
        self.store.as_deref().ok_or(AnimatorError::NotLoaded)
    }

    // ---------- registration ----------

    /// Register parameter descriptors; duplicates keep the first descriptor.
    ///
    /// Fails with `RegistryClosed` once keyframes are loaded. Returns how many
    /// descriptors were added.
    pub fn register_params<I>(&mut self, descriptors: I) -> Result<usize, AnimatorError>
    where
        I: IntoIterator<Item = ParameterDescriptor>,
    {
        let descriptors: Vec<ParameterDescriptor> = descriptors.into_iter().collect();
        if self.store.is_some() {
            return match descriptors.first() {
                Some(first) => Err(AnimatorError::RegistryClosed {
                    name: first.name().to_string(),
                }),
                None => Ok(0),
            };
        }
        Ok(Arc::make_mut(&mut self.registry).register(descriptors))
    }

    pub fn register_param(&mut self, descriptor: ParameterDescriptor) -> Result<bool, AnimatorError> {
        self.register_params([descriptor]).map(|added| added == 1)
    }

    /// Register a consumer's parameters and append it to the dispatch list.
    pub fn attach<A>(&mut self, consumer: A) -> Result<ConsumerId, AnimatorError>
    where
        A: Animatable + 'static,
    {
        self.attach_boxed(Box::new(consumer))
    }

    pub fn attach_boxed(
        &mut self,
        consumer: Box<dyn Animatable>,
    ) -> Result<ConsumerId, AnimatorError> {
        self.register_params(consumer.params())?;
        self.consumers.push(consumer);
        Ok(ConsumerId(self.consumers.len() - 1))
    }

    /// Typed read access to an attached consumer.
    pub fn consumer<T: Animatable + 'static>(&self, id: ConsumerId) -> Option<&T> {
        self.consumers
            .get(id.0)
            .and_then(|c| c.as_any().downcast_ref::<T>())
    }

    #[inline]
    pub fn consumer_count(&self) -> usize {
        self.consumers.len()
    }

    // ---------- loading ----------

    /// Load the script given to [`Animator::from_path`].
    pub fn load_keyframes(&mut self) -> Result<(), AnimatorError> {
        let path = self
            .script_path
            .clone()
            .ok_or_else(|| AnimatorError::invalid_configuration("no keyframe script path set"))?;
        let store = load_script(&path, &self.registry, &self.config)?;
        self.install(store);
        Ok(())
    }

    pub fn load_keyframes_from_path(&mut self, path: impl Into<PathBuf>) -> Result<(), AnimatorError> {
        self.script_path = Some(path.into());
        self.load_keyframes()
    }

    pub fn load_keyframes_from_str(&mut self, text: &str) -> Result<(), AnimatorError> {
        let store = parse_script(text, &self.registry, &self.config)?;
        self.install(store);
        Ok(())
    }

    /// Load from a buffered reader; `source` labels read errors.
    pub fn load_keyframes_from_reader<R: BufRead>(
        &mut self,
        reader: R,
        source: &str,
    ) -> Result<(), AnimatorError> {
        let store = read_script(reader, source, &self.registry, &self.config)?;
        self.install(store);
        Ok(())
    }

    fn install(&mut self, store: KeyframeStore) {
        self.time = store.start();
        self.store = Some(Arc::new(store));
        self.cache.clear();
        self.snapshot = None;
        self.state = AnimatorState::ScriptLoaded;
    }

    // ---------- time ----------

    /// Time of the first keyframe
    pub fn start(&self) -> Result<f64, AnimatorError> {
        Ok(self.loaded_store()?.start())
    }

    /// Time of the last keyframe
    pub fn end(&self) -> Result<f64, AnimatorError> {
        Ok(self.loaded_store()?.end())
    }

    /// Time of the last `set_time`, or `start()` right after loading.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Interpolate at `t` and apply the snapshot to every consumer in attach order.
    ///
    /// The first consumer error stops dispatch and is returned; consumers after it
    /// keep their previous state.
    pub fn set_time(&mut self, t: f64) -> Result<(), AnimatorError> {
        let snapshot = Arc::new(sample(self.loaded_store()?, &self.registry, t)?);
        self.time = t;
        self.state = AnimatorState::Playing;
        self.cache.insert(Arc::clone(&snapshot));
        self.snapshot = Some(Arc::clone(&snapshot));

        for consumer in self.consumers.iter_mut() {
            consumer.apply_params(&snapshot)?;
        }
        Ok(())
    }

    /// Snapshot produced by the last `set_time`.
    pub fn snapshot(&self) -> Option<&ParamValues> {
        self.snapshot.as_deref()
    }

    /// Interpolate at `time` without touching the cursor, cache or consumers.
    pub fn interpolate(&self, time: f64) -> Result<ParamValues, AnimatorError> {
        sample(self.loaded_store()?, &self.registry, time)
    }

    /// All parameter values at `time`, served from the snapshot cache when
    /// `time` was recently passed to `set_time`.
    pub fn get_params(&self, time: f64) -> Result<Arc<ParamValues>, AnimatorError> {
        let store = self.loaded_store()?;
        if let Some(hit) = self.cache.peek(time) {
            return Ok(hit);
        }
        Ok(Arc::new(sample(store, &self.registry, time)?))
    }

    /// A single parameter value at `time`.
    pub fn get_param(&self, name: &str, time: f64) -> Result<Value, AnimatorError> {
        self.get_params(time)?
            .get(name)
            .cloned()
            .ok_or_else(|| AnimatorError::ParameterNotAvailable {
                name: name.to_string(),
                time,
            })
    }
}

impl Clone for Animator {
    fn clone(&self) -> Self {
        let id = AnimatorId::next();
        debug!("Animator {} cloned from {}", id, self.id);
        Self {
            id,
            config: self.config.clone(),
            registry: Arc::clone(&self.registry),
            store: self.store.clone(),
            script_path: self.script_path.clone(),
            state: self.state,
            time: self.time,
            consumers: self.consumers.iter().map(|c| c.clone_box()).collect(),
            cache: SnapshotCache::new(self.config.snapshot_cache_size),
            snapshot: self.snapshot.clone(),
        }
    }
}

impl std::fmt::Debug for Animator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animator")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("time", &self.time)
            .field("parameters", &self.registry.len())
            .field("keyframes", &self.store.as_ref().map(|s| s.len()))
            .field("consumers", &self.consumers.len())
            .finish()
    }
}
