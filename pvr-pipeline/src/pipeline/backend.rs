//! Graphics backend seam
//!
//! Shader compilation and pipeline construction are delegated to the
//! graphics driver through this trait.

use super::descriptor::PipelineDescriptor;
use super::shader_params::{FragmentShaderParams, VertexShaderParams};
use crate::error::PipelineError;

/// Driver-side construction of shader modules and pipelines
///
/// Every call may block for a long time (shader linking); none of them
/// can be cancelled.
pub trait PipelineBackend {
    /// Compiled shader module handle
    type ShaderModule: Clone;
    /// Built pipeline object
    type Pipeline;

    fn create_vertex_shader(
        &self,
        params: &VertexShaderParams,
    ) -> Result<Self::ShaderModule, PipelineError>;

    fn create_fragment_shader(
        &self,
        params: &FragmentShaderParams,
    ) -> Result<Self::ShaderModule, PipelineError>;

    fn create_pipeline(
        &self,
        desc: &PipelineDescriptor<Self::ShaderModule>,
    ) -> Result<Self::Pipeline, PipelineError>;
}
