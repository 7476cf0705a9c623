//! Render state blocks
//!
//! Resolved fixed-function state in a form that can be hashed, compared and
//! logged, plus the conversions into wgpu pipeline state.

use crate::poly_param::CullMode;

/// Ambient fog clamp range set per frame by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FogClamp {
    pub min: u32,
    pub max: u32,
}

impl Default for FogClamp {
    fn default() -> Self {
        Self {
            min: 0,
            max: 0xFFFF_FFFF,
        }
    }
}

impl FogClamp {
    /// True when the range clamps anything (anything but 0..=0xFFFFFFFF)
    pub fn is_active(&self) -> bool {
        self.min != 0 || self.max != 0xFFFF_FFFF
    }
}

/// Renderer settings that influence pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RenderFlags {
    /// Sort translucent polygons per strip instead of per list
    pub per_strip_sorting: bool,
    pub fog_clamp: FogClamp,
}

/// Rasterizer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RasterizationState {
    pub cull_mode: CullMode,
    pub front_face: wgpu::FrontFace,
    pub polygon_mode: wgpu::PolygonMode,
}

impl RasterizationState {
    pub fn for_cull_mode(cull_mode: CullMode) -> Self {
        Self {
            cull_mode,
            front_face: wgpu::FrontFace::Ccw,
            polygon_mode: wgpu::PolygonMode::Fill,
        }
    }

    pub fn to_wgpu(&self, topology: wgpu::PrimitiveTopology) -> wgpu::PrimitiveState {
        wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: self.front_face,
            cull_mode: self.cull_mode.to_wgpu(),
            unclipped_depth: false,
            polygon_mode: self.polygon_mode,
            conservative: false,
        }
    }
}

/// Stencil behaviour for one face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StencilFaceState {
    pub fail_op: wgpu::StencilOperation,
    pub depth_fail_op: wgpu::StencilOperation,
    pub pass_op: wgpu::StencilOperation,
    pub compare: wgpu::CompareFunction,
    pub compare_mask: u32,
    pub write_mask: u32,
}

impl StencilFaceState {
    /// Always passes and never modifies the stencil buffer
    pub const NOP: Self = Self {
        fail_op: wgpu::StencilOperation::Keep,
        depth_fail_op: wgpu::StencilOperation::Keep,
        pass_op: wgpu::StencilOperation::Keep,
        compare: wgpu::CompareFunction::Always,
        compare_mask: 0,
        write_mask: 0,
    };

    /// Shadow-flagged polygons: masks restricted to the high stencil bit
    pub const SHADOW: Self = Self {
        fail_op: wgpu::StencilOperation::Keep,
        depth_fail_op: wgpu::StencilOperation::Keep,
        pass_op: wgpu::StencilOperation::Keep,
        compare: wgpu::CompareFunction::Always,
        compare_mask: 0x80,
        write_mask: 0x80,
    };

    fn to_wgpu(self) -> wgpu::StencilFaceState {
        wgpu::StencilFaceState {
            compare: self.compare,
            fail_op: self.fail_op,
            depth_fail_op: self.depth_fail_op,
            pass_op: self.pass_op,
        }
    }
}

/// Depth and stencil configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilState {
    pub depth_test_enable: bool,
    pub depth_write_enable: bool,
    pub depth_compare: wgpu::CompareFunction,
    pub stencil_test_enable: bool,
    pub front: StencilFaceState,
    pub back: StencilFaceState,
}

impl DepthStencilState {
    /// Generate the wgpu depth/stencil state for a depth buffer format
    ///
    /// wgpu shares one mask pair between both faces; the front face masks
    /// are used since the back face is always the no-op state.
    pub fn to_wgpu(&self, format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
        let stencil = if self.stencil_test_enable {
            wgpu::StencilState {
                front: self.front.to_wgpu(),
                back: self.back.to_wgpu(),
                read_mask: self.front.compare_mask,
                write_mask: self.front.write_mask,
            }
        } else {
            wgpu::StencilState::default()
        };

        wgpu::DepthStencilState {
            format,
            depth_write_enabled: self.depth_write_enable,
            depth_compare: if self.depth_test_enable {
                self.depth_compare
            } else {
                wgpu::CompareFunction::Always
            },
            stencil,
            bias: wgpu::DepthBiasState::default(),
        }
    }
}

/// Blend configuration of the single color attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorBlendAttachment {
    pub blend_enable: bool,
    pub src_color_factor: wgpu::BlendFactor,
    pub dst_color_factor: wgpu::BlendFactor,
    pub color_op: wgpu::BlendOperation,
    pub src_alpha_factor: wgpu::BlendFactor,
    pub dst_alpha_factor: wgpu::BlendFactor,
    pub alpha_op: wgpu::BlendOperation,
    pub write_mask: wgpu::ColorWrites,
}

impl ColorBlendAttachment {
    /// Blending disabled, all channels written
    pub const OPAQUE: Self = Self {
        blend_enable: false,
        src_color_factor: wgpu::BlendFactor::Zero,
        dst_color_factor: wgpu::BlendFactor::Zero,
        color_op: wgpu::BlendOperation::Add,
        src_alpha_factor: wgpu::BlendFactor::Zero,
        dst_alpha_factor: wgpu::BlendFactor::Zero,
        alpha_op: wgpu::BlendOperation::Add,
        write_mask: wgpu::ColorWrites::ALL,
    };

    pub fn to_wgpu_blend(&self) -> Option<wgpu::BlendState> {
        self.blend_enable.then(|| wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: self.src_color_factor,
                dst_factor: self.dst_color_factor,
                operation: self.color_op,
            },
            alpha: wgpu::BlendComponent {
                src_factor: self.src_alpha_factor,
                dst_factor: self.dst_alpha_factor,
                operation: self.alpha_op,
            },
        })
    }

    pub fn to_wgpu(&self, format: wgpu::TextureFormat) -> wgpu::ColorTargetState {
        wgpu::ColorTargetState {
            format,
            blend: self.to_wgpu_blend(),
            write_mask: self.write_mask,
        }
    }
}

/// State supplied at draw time instead of being baked into the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DynamicState {
    Viewport,
    Scissor,
}

/// Attachment formats of the render pass the pipelines are used in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetLayout {
    pub color_format: wgpu::TextureFormat,
    pub depth_stencil_format: wgpu::TextureFormat,
    pub sample_count: u32,
}

impl Default for RenderTargetLayout {
    fn default() -> Self {
        Self {
            color_format: wgpu::TextureFormat::Rgba8Unorm,
            depth_stencil_format: wgpu::TextureFormat::Depth24PlusStencil8,
            sample_count: 1,
        }
    }
}
