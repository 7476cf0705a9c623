//! Pipeline cache management
//!
//! Pipelines are created on first use and kept for the lifetime of the
//! graphics context. Nothing is evicted, so a warmed cache never rebuilds.

use std::sync::{Mutex, MutexGuard, PoisonError};

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use super::backend::PipelineBackend;
use super::descriptor::{FixedFunctionState, PipelineDescriptor};
use super::pipeline_key::PipelineKey;
use super::shader_cache::ShaderCache;
use crate::error::PipelineError;
use crate::poly_param::{ListType, PolyParam};
use crate::render_state::{FogClamp, RenderFlags};

/// Resolves polygon state to pipelines and caches the result
pub struct PipelineManager<B: PipelineBackend> {
    backend: B,
    flags: RenderFlags,
    pipelines: HashMap<PipelineKey, B::Pipeline>,
    shaders: ShaderCache<B::ShaderModule>,
}

impl<B: PipelineBackend> PipelineManager<B> {
    pub fn new(backend: B, flags: RenderFlags) -> Self {
        Self {
            backend,
            flags,
            pipelines: HashMap::new(),
            shaders: ShaderCache::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn render_flags(&self) -> &RenderFlags {
        &self.flags
    }

    /// Replace the ambient render flags
    ///
    /// Flags are part of the cache key, so existing entries stay valid.
    pub fn set_render_flags(&mut self, flags: RenderFlags) {
        self.flags = flags;
    }

    /// Update the per-frame fog clamp range
    pub fn set_fog_clamp(&mut self, fog_clamp: FogClamp) {
        self.flags.fog_clamp = fog_clamp;
    }

    pub fn shader_cache(&self) -> &ShaderCache<B::ShaderModule> {
        &self.shaders
    }

    /// Cache key a draw would use under the current flags
    pub fn key(&self, list_type: ListType, sort_triangles: bool, pp: &PolyParam) -> PipelineKey {
        PipelineKey::new(list_type, sort_triangles, pp, &self.flags)
    }

    /// Resolve fixed-function state without touching the backend
    pub fn describe(
        &self,
        list_type: ListType,
        sort_triangles: bool,
        pp: &PolyParam,
    ) -> Result<FixedFunctionState, PipelineError> {
        FixedFunctionState::resolve(list_type, sort_triangles, pp, &self.flags)
    }

    /// Get or create the pipeline for a polygon
    ///
    /// Returns the cached pipeline when one exists for the polygon's key.
    /// Otherwise resolves the state, fetches shader modules and builds the
    /// pipeline exactly once. Nothing is inserted when resolution or the
    /// build fails.
    pub fn get_or_create(
        &mut self,
        list_type: ListType,
        sort_triangles: bool,
        pp: &PolyParam,
    ) -> Result<&B::Pipeline, PipelineError> {
        let key = PipelineKey::new(list_type, sort_triangles, pp, &self.flags);

        match self.pipelines.entry(key) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                tracing::debug!("Creating pipeline: {:?}", key);

                let pipeline = build_pipeline(
                    &self.backend,
                    &mut self.shaders,
                    list_type,
                    sort_triangles,
                    pp,
                    &self.flags,
                )
                .inspect_err(|e| {
                    if e.is_fatal() {
                        tracing::error!("Aborting pipeline build for {:?}: {}", list_type, e);
                    } else {
                        tracing::warn!("Pipeline build failed for {:?}: {}", list_type, e);
                    }
                })?;

                Ok(&*entry.insert(pipeline))
            }
        }
    }

    /// Build every missing pipeline ahead of time
    ///
    /// Returns the number of pipelines that were built.
    pub fn prewarm<'a, I>(&mut self, polys: I) -> Result<usize, PipelineError>
    where
        I: IntoIterator<Item = (ListType, bool, &'a PolyParam)>,
    {
        let before = self.pipelines.len();
        for (list_type, sort_triangles, pp) in polys {
            self.get_or_create(list_type, sort_triangles, pp)?;
        }
        let built = self.pipelines.len() - before;
        tracing::info!(
            "Prewarmed {} pipelines ({} cached)",
            built,
            self.pipelines.len()
        );
        Ok(built)
    }

    /// Check if a pipeline exists for a polygon under the current flags
    pub fn contains(&self, list_type: ListType, sort_triangles: bool, pp: &PolyParam) -> bool {
        self.pipelines
            .contains_key(&self.key(list_type, sort_triangles, pp))
    }

    /// Get a pipeline by key
    pub fn get_by_key(&self, key: &PipelineKey) -> Option<&B::Pipeline> {
        self.pipelines.get(key)
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }
}

fn build_pipeline<B: PipelineBackend>(
    backend: &B,
    shaders: &mut ShaderCache<B::ShaderModule>,
    list_type: ListType,
    sort_triangles: bool,
    pp: &PolyParam,
    flags: &RenderFlags,
) -> Result<B::Pipeline, PipelineError> {
    let state = FixedFunctionState::resolve(list_type, sort_triangles, pp, flags)?;

    let vertex_module =
        shaders.vertex_shader(state.vertex_shader, |p| backend.create_vertex_shader(p))?;
    let fragment_module =
        shaders.fragment_shader(state.fragment_shader, |p| backend.create_fragment_shader(p))?;

    backend.create_pipeline(&PipelineDescriptor {
        state,
        vertex_module,
        fragment_module,
    })
}

/// Pipeline manager shared between threads
///
/// Lookup and insertion happen under one lock, so concurrent requests for
/// the same key build it once. Pipelines are returned as cloned handles.
pub struct SharedPipelineManager<B: PipelineBackend> {
    inner: Mutex<PipelineManager<B>>,
}

impl<B> SharedPipelineManager<B>
where
    B: PipelineBackend,
    B::Pipeline: Clone,
{
    pub fn new(manager: PipelineManager<B>) -> Self {
        Self {
            inner: Mutex::new(manager),
        }
    }

    pub fn get_or_create(
        &self,
        list_type: ListType,
        sort_triangles: bool,
        pp: &PolyParam,
    ) -> Result<B::Pipeline, PipelineError> {
        self.lock()
            .get_or_create(list_type, sort_triangles, pp)
            .cloned()
    }

    pub fn set_render_flags(&self, flags: RenderFlags) {
        self.lock().set_render_flags(flags);
    }

    pub fn set_fog_clamp(&self, fog_clamp: FogClamp) {
        self.lock().set_fog_clamp(fog_clamp);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn into_inner(self) -> PipelineManager<B> {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // A panic inside a backend call leaves the map untouched, so a poisoned
    // lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, PipelineManager<B>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
