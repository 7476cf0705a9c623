//! Pipeline descriptor assembly

use super::blend::resolve_color_blend;
use super::depth_stencil::resolve_depth_stencil;
use super::shader_params::{FragmentShaderParams, VertexShaderParams};
use crate::error::PipelineError;
use crate::poly_param::{ListType, PolyParam};
use crate::render_state::{
    ColorBlendAttachment, DepthStencilState, DynamicState, RasterizationState, RenderFlags,
};
use crate::vertex::Vertex;

/// Viewport and scissor are set per frame, never baked
pub const DYNAMIC_STATES: [DynamicState; 2] = [DynamicState::Viewport, DynamicState::Scissor];

/// Everything a pipeline needs except the compiled shader modules
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixedFunctionState {
    pub vertex_layout: wgpu::VertexBufferLayout<'static>,
    pub topology: wgpu::PrimitiveTopology,
    pub rasterization: RasterizationState,
    pub depth_stencil: DepthStencilState,
    pub color_blend: ColorBlendAttachment,
    pub dynamic_states: &'static [DynamicState],
    pub vertex_shader: VertexShaderParams,
    pub fragment_shader: FragmentShaderParams,
}

impl FixedFunctionState {
    /// Resolve all fixed-function blocks and shader variant keys for a polygon
    pub fn resolve(
        list_type: ListType,
        sort_triangles: bool,
        pp: &PolyParam,
        flags: &RenderFlags,
    ) -> Result<Self, PipelineError> {
        let depth_stencil = resolve_depth_stencil(
            list_type,
            sort_triangles,
            flags.per_strip_sorting,
            pp.isp,
            pp.pcw,
        )?;
        let color_blend = resolve_color_blend(list_type, pp.tsp)?;

        Ok(Self {
            vertex_layout: Vertex::buffer_layout(),
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            rasterization: RasterizationState::for_cull_mode(pp.isp.cull_mode()),
            depth_stencil,
            color_blend,
            dynamic_states: &DYNAMIC_STATES,
            vertex_shader: VertexShaderParams::derive(pp),
            fragment_shader: FragmentShaderParams::derive(list_type, pp, flags.fog_clamp),
        })
    }
}

/// Fully resolved pipeline description handed to the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PipelineDescriptor<M> {
    pub state: FixedFunctionState,
    pub vertex_module: M,
    pub fragment_module: M,
}
