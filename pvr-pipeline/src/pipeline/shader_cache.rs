//! Shader module cache
//!
//! Memoizes compiled modules by variant key. Modules are never evicted.

use hashbrown::HashMap;

use super::shader_params::{FragmentShaderParams, VertexShaderParams};
use crate::error::PipelineError;

/// Cache of compiled shader modules
pub struct ShaderCache<M> {
    vertex: HashMap<VertexShaderParams, M>,
    fragment: HashMap<FragmentShaderParams, M>,
}

impl<M: Clone> ShaderCache<M> {
    pub fn new() -> Self {
        Self {
            vertex: HashMap::new(),
            fragment: HashMap::new(),
        }
    }

    /// Get the vertex module for `params`, compiling it on first use
    ///
    /// A failed compile is not cached.
    pub fn vertex_shader<F>(
        &mut self,
        params: VertexShaderParams,
        compile: F,
    ) -> Result<M, PipelineError>
    where
        F: FnOnce(&VertexShaderParams) -> Result<M, PipelineError>,
    {
        if let Some(module) = self.vertex.get(&params) {
            return Ok(module.clone());
        }
        tracing::trace!("Compiling vertex shader: {:?}", params);
        let module = compile(&params)?;
        self.vertex.insert(params, module.clone());
        Ok(module)
    }

    /// Get the fragment module for `params`, compiling it on first use
    pub fn fragment_shader<F>(
        &mut self,
        params: FragmentShaderParams,
        compile: F,
    ) -> Result<M, PipelineError>
    where
        F: FnOnce(&FragmentShaderParams) -> Result<M, PipelineError>,
    {
        if let Some(module) = self.fragment.get(&params) {
            return Ok(module.clone());
        }
        tracing::trace!("Compiling fragment shader: {:?}", params);
        let module = compile(&params)?;
        self.fragment.insert(params, module.clone());
        Ok(module)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex.len()
    }

    pub fn fragment_count(&self) -> usize {
        self.fragment.len()
    }
}

impl<M: Clone> Default for ShaderCache<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly_param::{ListType, Pcw, PolyParam};
    use crate::render_state::FogClamp;

    #[test]
    fn test_identical_keys_share_module() {
        let mut cache: ShaderCache<u32> = ShaderCache::new();
        let mut compiles = 0;
        let pp = PolyParam {
            pcw: Pcw(1 << 3),
            ..Default::default()
        };

        let first = FragmentShaderParams::derive(ListType::Opaque, &pp, FogClamp::default());
        let copy = pp;
        let again = FragmentShaderParams::derive(ListType::Opaque, &copy, FogClamp::default());

        let a = cache
            .fragment_shader(first, |_| {
                compiles += 1;
                Ok(7)
            })
            .unwrap();
        let b = cache
            .fragment_shader(again, |_| {
                compiles += 1;
                Ok(8)
            })
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(compiles, 1);
        assert_eq!(cache.fragment_count(), 1);
    }

    #[test]
    fn test_vertex_variants_are_distinct() {
        let mut cache: ShaderCache<&'static str> = ShaderCache::new();
        let flat = cache
            .vertex_shader(VertexShaderParams { gouraud: false }, |_| Ok("flat"))
            .unwrap();
        let smooth = cache
            .vertex_shader(VertexShaderParams { gouraud: true }, |_| Ok("gouraud"))
            .unwrap();
        assert_eq!(flat, "flat");
        assert_eq!(smooth, "gouraud");
        assert_eq!(cache.vertex_count(), 2);
    }

    #[test]
    fn test_failed_compile_is_not_cached() {
        let mut cache: ShaderCache<u32> = ShaderCache::new();
        let params = VertexShaderParams { gouraud: true };

        let err = cache
            .vertex_shader(params, |_| {
                Err(PipelineError::ShaderCreation("out of memory".into()))
            })
            .unwrap_err();
        assert!(!err.is_fatal());
        assert_eq!(cache.vertex_count(), 0);

        assert_eq!(cache.vertex_shader(params, |_| Ok(3)), Ok(3));
        assert_eq!(cache.vertex_count(), 1);
    }
}
