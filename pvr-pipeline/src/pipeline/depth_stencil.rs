//! Depth and stencil policy

use crate::error::PipelineError;
use crate::poly_param::{IspTsp, ListType, Pcw};
use crate::render_state::{DepthStencilState, StencilFaceState};

/// Depth compare functions indexed by the ISP depth mode field
const DEPTH_OPS: [wgpu::CompareFunction; 8] = [
    wgpu::CompareFunction::Never,
    wgpu::CompareFunction::Less,
    wgpu::CompareFunction::Equal,
    wgpu::CompareFunction::LessEqual,
    wgpu::CompareFunction::Greater,
    wgpu::CompareFunction::NotEqual,
    wgpu::CompareFunction::GreaterEqual,
    wgpu::CompareFunction::Always,
];

/// Look up the compare function for a depth mode
///
/// # Errors
///
/// Returns `PipelineError::InvalidDepthMode` if `mode` is not 0-7.
pub fn depth_compare_for_mode(mode: u32) -> Result<wgpu::CompareFunction, PipelineError> {
    DEPTH_OPS
        .get(mode as usize)
        .copied()
        .ok_or(PipelineError::InvalidDepthMode(mode))
}

/// Resolve depth test, depth write and stencil configuration
pub fn resolve_depth_stencil(
    list_type: ListType,
    sort_triangles: bool,
    per_strip_sorting: bool,
    isp: IspTsp,
    pcw: Pcw,
) -> Result<DepthStencilState, PipelineError> {
    let sorted_translucent = list_type == ListType::Translucent && sort_triangles;
    let depth_compare = if list_type == ListType::PunchThrough || sorted_translucent {
        wgpu::CompareFunction::GreaterEqual
    } else {
        depth_compare_for_mode(isp.depth_mode())?
    };

    // List-level sorting turns writes off for every list, punch-through included
    let depth_write_enable = if sort_triangles && !per_strip_sorting {
        false
    } else if list_type == ListType::PunchThrough {
        // Z write disable is ignored for punch-through
        // (Worms World Party, Bust-a-Move 4, Re-Volt)
        true
    } else {
        !isp.z_write_disable()
    };

    let stencil_test_enable = matches!(list_type, ListType::Opaque | ListType::PunchThrough);
    let front = if pcw.shadow() {
        StencilFaceState::SHADOW
    } else {
        StencilFaceState::NOP
    };

    Ok(DepthStencilState {
        depth_test_enable: true,
        depth_write_enable,
        depth_compare,
        stencil_test_enable,
        front,
        back: StencilFaceState::NOP,
    })
}
