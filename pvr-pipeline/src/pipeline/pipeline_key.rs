//! Pipeline key types for caching
//!
//! A key holds every input the policy resolvers and shader derivation read,
//! so two polygons with equal keys always resolve to identical pipelines.

use crate::poly_param::{CullMode, ListType, PolyParam, ShadingInstruction, TileClipMode};
use crate::render_state::RenderFlags;

/// Key for pipeline cache lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub list_type: ListType,
    pub sort_triangles: bool,
    pub per_strip_sorting: bool,
    pub fog_clamp_active: bool,

    // Parameter control word
    pub gouraud: bool,
    pub offset: bool,
    pub texture: bool,
    pub shadow: bool,

    // ISP word
    pub cull_mode: CullMode,
    pub depth_mode: u8,
    pub z_write_disable: bool,

    // TSP word
    pub src_instr: u8,
    pub dst_instr: u8,
    pub shader_instr: ShadingInstruction,
    pub filter_mode: u8,
    pub color_clamp: bool,
    pub use_alpha: bool,
    pub ignore_tex_alpha: bool,

    pub clip_mode: TileClipMode,
    pub bump_map: bool,
}

impl PipelineKey {
    /// Create a key from the draw inputs and the current render flags
    pub fn new(
        list_type: ListType,
        sort_triangles: bool,
        pp: &PolyParam,
        flags: &RenderFlags,
    ) -> Self {
        Self {
            list_type,
            sort_triangles,
            per_strip_sorting: flags.per_strip_sorting,
            fog_clamp_active: flags.fog_clamp.is_active(),
            gouraud: pp.pcw.gouraud(),
            offset: pp.pcw.offset(),
            texture: pp.pcw.texture(),
            shadow: pp.pcw.shadow(),
            cull_mode: pp.isp.cull_mode(),
            depth_mode: pp.isp.depth_mode() as u8,
            z_write_disable: pp.isp.z_write_disable(),
            src_instr: pp.tsp.src_instr() as u8,
            dst_instr: pp.tsp.dst_instr() as u8,
            shader_instr: pp.tsp.shading_instruction(),
            filter_mode: pp.tsp.filter_mode() as u8,
            color_clamp: pp.tsp.color_clamp(),
            use_alpha: pp.tsp.use_alpha(),
            ignore_tex_alpha: pp.tsp.ignore_tex_alpha(),
            clip_mode: pp.tile_clip.mode(),
            bump_map: pp.is_bump_map(),
        }
    }
}
