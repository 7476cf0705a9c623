//! Shader variant keys
//!
//! The shader cache compiles one module per distinct parameter struct, so the
//! derivation below must be total and deterministic.

use crate::poly_param::{FogMode, ListType, PolyParam, ShadingInstruction};
use crate::render_state::FogClamp;

/// Fog mode handed to every fragment shader
// TODO: derive from `Tsp::fog_ctrl` once the fog table texture is bound
pub const FIXED_FOG_MODE: FogMode = FogMode::None;

/// Vertex shader variant key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexShaderParams {
    pub gouraud: bool,
}

impl VertexShaderParams {
    pub fn derive(pp: &PolyParam) -> Self {
        Self {
            gouraud: pp.pcw.gouraud(),
        }
    }
}

/// Fragment shader variant key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FragmentShaderParams {
    pub alpha_test: bool,
    pub bump_map: bool,
    pub color_clamp: bool,
    /// 1 inside the tile clip region, -1 outside, 0 disabled
    pub clip_test: i8,
    pub fog: FogMode,
    pub gouraud: bool,
    pub ignore_tex_alpha: bool,
    pub offset: bool,
    pub shader_instr: ShadingInstruction,
    pub texture: bool,
    pub trilinear: bool,
    pub use_alpha: bool,
}

impl FragmentShaderParams {
    /// Derive the fragment variant for a polygon
    pub fn derive(list_type: ListType, pp: &PolyParam, fog_clamp: FogClamp) -> Self {
        let punch_through = list_type == ListType::PunchThrough;
        let texture = pp.pcw.texture();
        Self {
            alpha_test: punch_through,
            bump_map: pp.is_bump_map(),
            color_clamp: pp.tsp.color_clamp() && fog_clamp.is_active(),
            clip_test: pp.tile_clip.mode().clip_test(),
            fog: FIXED_FOG_MODE,
            gouraud: pp.pcw.gouraud(),
            ignore_tex_alpha: pp.tsp.ignore_tex_alpha(),
            offset: pp.pcw.offset(),
            shader_instr: pp.tsp.shading_instruction(),
            texture,
            // Discard-based punch-through does not mix with mip blending
            trilinear: texture && pp.tsp.filter_mode() > 1 && !punch_through,
            use_alpha: pp.tsp.use_alpha(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly_param::{Pcw, Tcw, TileClip, Tsp};

    const TEXTURED: u32 = 1 << 3;
    const TRILINEAR_FILTER: u32 = 2 << 13;

    #[test]
    fn test_clip_test_from_tile_clip() {
        let mut pp = PolyParam::default();
        let expected = [(0, 0), (1, 0), (2, 1), (3, -1), (0xF, 0)];
        for (mode, clip) in expected {
            pp.tile_clip = TileClip(mode << 28);
            let params = FragmentShaderParams::derive(ListType::Opaque, &pp, FogClamp::default());
            assert_eq!(params.clip_test, clip, "tile clip mode {}", mode);
        }
    }

    #[test]
    fn test_alpha_test_only_for_punch_through() {
        let pp = PolyParam::default();
        let pt = FragmentShaderParams::derive(ListType::PunchThrough, &pp, FogClamp::default());
        let tr = FragmentShaderParams::derive(ListType::Translucent, &pp, FogClamp::default());
        assert!(pt.alpha_test);
        assert!(!tr.alpha_test);
    }

    #[test]
    fn test_color_clamp_needs_active_fog_range() {
        let pp = PolyParam {
            tsp: Tsp(1 << 21),
            ..Default::default()
        };
        let trivial = FragmentShaderParams::derive(ListType::Opaque, &pp, FogClamp::default());
        assert!(!trivial.color_clamp);

        let clamped = FogClamp {
            min: 0x10,
            max: 0xFFFF_FFFF,
        };
        let params = FragmentShaderParams::derive(ListType::Opaque, &pp, clamped);
        assert!(params.color_clamp);

        let no_flag = PolyParam::default();
        let params = FragmentShaderParams::derive(ListType::Opaque, &no_flag, clamped);
        assert!(!params.color_clamp);
    }

    #[test]
    fn test_trilinear_rules() {
        let pp = PolyParam {
            pcw: Pcw(TEXTURED),
            tsp: Tsp(TRILINEAR_FILTER),
            ..Default::default()
        };
        let fc = FogClamp::default();
        let trilinear =
            |list, pp: &PolyParam| FragmentShaderParams::derive(list, pp, fc).trilinear;
        assert!(trilinear(ListType::Opaque, &pp));
        assert!(trilinear(ListType::Translucent, &pp));
        assert!(!trilinear(ListType::PunchThrough, &pp));

        let bilinear = PolyParam {
            tsp: Tsp(1 << 13),
            ..pp
        };
        assert!(!trilinear(ListType::Opaque, &bilinear));

        let untextured = PolyParam {
            pcw: Pcw(0),
            ..pp
        };
        assert!(!trilinear(ListType::Opaque, &untextured));
    }

    #[test]
    fn test_copied_fields() {
        let pp = PolyParam {
            pcw: Pcw((1 << 1) | (1 << 2) | TEXTURED),
            tsp: Tsp((1 << 19) | (1 << 20) | (2 << 6) | (3 << 22)),
            tcw: Tcw(4 << 27),
            ..Default::default()
        };
        let params = FragmentShaderParams::derive(ListType::Opaque, &pp, FogClamp::default());
        assert!(params.gouraud);
        assert!(params.offset);
        assert!(params.texture);
        assert!(params.ignore_tex_alpha);
        assert!(params.use_alpha);
        assert!(params.bump_map);
        assert_eq!(params.shader_instr, ShadingInstruction::DecalAlpha);
        // Fog control is not consulted yet
        assert_eq!(params.fog, FIXED_FOG_MODE);

        assert!(VertexShaderParams::derive(&pp).gouraud);
        assert!(!VertexShaderParams::derive(&PolyParam::default()).gouraud);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let pp = PolyParam {
            pcw: Pcw(0xFFFF_FFFF),
            tsp: Tsp(0xDEAD_BEEF),
            tcw: Tcw(0x1234_5678),
            tile_clip: TileClip(0x3000_0000),
            ..Default::default()
        };
        let fc = FogClamp { min: 1, max: 2 };
        let a = FragmentShaderParams::derive(ListType::Translucent, &pp, fc);
        let b = FragmentShaderParams::derive(ListType::Translucent, &pp, fc);
        assert_eq!(a, b);
    }
}
