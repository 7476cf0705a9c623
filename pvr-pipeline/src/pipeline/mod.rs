//! Pipeline state compilation
//!
//! Translates polygon parameters into render pipelines: blend, depth/stencil
//! and shader variant resolution, descriptor assembly, and caching of the
//! built pipelines and shader modules.

mod backend;
mod blend;
mod cache;
mod depth_stencil;
mod descriptor;
mod pipeline_creation;
mod pipeline_key;
mod shader_cache;
mod shader_params;

pub use backend::PipelineBackend;
pub use blend::{BlendSlot, resolve_blend_factor, resolve_color_blend};
pub use cache::{PipelineManager, SharedPipelineManager};
pub use depth_stencil::{depth_compare_for_mode, resolve_depth_stencil};
pub use descriptor::{DYNAMIC_STATES, FixedFunctionState, PipelineDescriptor};
pub use pipeline_creation::{ShaderSource, WgpuBackend};
pub use pipeline_key::PipelineKey;
pub use shader_cache::ShaderCache;
pub use shader_params::{FIXED_FOG_MODE, FragmentShaderParams, VertexShaderParams};
