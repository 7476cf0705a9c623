//! wgpu pipeline creation
//!
//! Builds shader modules and render pipelines on a `wgpu::Device`. Driver
//! errors are captured with error scopes and returned instead of reaching
//! the device's uncaptured error handler.

use std::borrow::Cow;

use super::backend::PipelineBackend;
use super::descriptor::PipelineDescriptor;
use super::shader_params::{FragmentShaderParams, VertexShaderParams};
use crate::error::PipelineError;
use crate::render_state::RenderTargetLayout;

/// Entry point used by every generated shader
const SHADER_ENTRY_POINT: &str = "main";

/// Source of WGSL for each shader variant
pub trait ShaderSource {
    fn vertex_source(&self, params: &VertexShaderParams) -> Cow<'static, str>;
    fn fragment_source(&self, params: &FragmentShaderParams) -> Cow<'static, str>;
}

/// Pipeline backend for a single graphics context
///
/// The render target layout and pipeline layout are fixed for the lifetime
/// of the backend; a new context means a new backend and a new cache.
pub struct WgpuBackend<S> {
    device: wgpu::Device,
    pipeline_layout: wgpu::PipelineLayout,
    target: RenderTargetLayout,
    shaders: S,
}

impl<S: ShaderSource> WgpuBackend<S> {
    pub fn new(
        device: wgpu::Device,
        pipeline_layout: wgpu::PipelineLayout,
        target: RenderTargetLayout,
        shaders: S,
    ) -> Self {
        Self {
            device,
            pipeline_layout,
            target,
            shaders,
        }
    }

    pub fn target(&self) -> &RenderTargetLayout {
        &self.target
    }

    fn create_shader_module(
        &self,
        label: &str,
        source: Cow<'static, str>,
    ) -> Result<wgpu::ShaderModule, PipelineError> {
        capture_errors(&self.device, || {
            self.device
                .create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some(label),
                    source: wgpu::ShaderSource::Wgsl(source),
                })
        })
        .map_err(PipelineError::ShaderCreation)
    }
}

/// Run `f` inside validation and out-of-memory error scopes
fn capture_errors<T>(device: &wgpu::Device, f: impl FnOnce() -> T) -> Result<T, String> {
    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = f();
    let validation = pollster::block_on(device.pop_error_scope());
    let out_of_memory = pollster::block_on(device.pop_error_scope());
    match validation.or(out_of_memory) {
        Some(error) => Err(error.to_string()),
        None => Ok(value),
    }
}

impl<S: ShaderSource> PipelineBackend for WgpuBackend<S> {
    type ShaderModule = wgpu::ShaderModule;
    type Pipeline = wgpu::RenderPipeline;

    fn create_vertex_shader(
        &self,
        params: &VertexShaderParams,
    ) -> Result<wgpu::ShaderModule, PipelineError> {
        let label = format!("PVR VS gouraud={}", params.gouraud);
        self.create_shader_module(&label, self.shaders.vertex_source(params))
    }

    fn create_fragment_shader(
        &self,
        params: &FragmentShaderParams,
    ) -> Result<wgpu::ShaderModule, PipelineError> {
        let label = format!("PVR FS {:?}", params);
        self.create_shader_module(&label, self.shaders.fragment_source(params))
    }

    fn create_pipeline(
        &self,
        desc: &PipelineDescriptor<wgpu::ShaderModule>,
    ) -> Result<wgpu::RenderPipeline, PipelineError> {
        let state = &desc.state;
        let vertex_buffers = [state.vertex_layout.clone()];
        let targets = [Some(state.color_blend.to_wgpu(self.target.color_format))];

        capture_errors(&self.device, || {
            self.device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some("PVR Pipeline"),
                    layout: Some(&self.pipeline_layout),
                    vertex: wgpu::VertexState {
                        module: &desc.vertex_module,
                        entry_point: Some(SHADER_ENTRY_POINT),
                        buffers: &vertex_buffers,
                        compilation_options: Default::default(),
                    },
                    fragment: Some(wgpu::FragmentState {
                        module: &desc.fragment_module,
                        entry_point: Some(SHADER_ENTRY_POINT),
                        targets: &targets,
                        compilation_options: Default::default(),
                    }),
                    primitive: state.rasterization.to_wgpu(state.topology),
                    depth_stencil: Some(
                        state
                            .depth_stencil
                            .to_wgpu(self.target.depth_stencil_format),
                    ),
                    multisample: wgpu::MultisampleState {
                        count: self.target.sample_count,
                        mask: !0,
                        alpha_to_coverage_enabled: false,
                    },
                    multiview: None,
                    cache: None,
                })
        })
        .map_err(PipelineError::PipelineCreation)
    }
}
