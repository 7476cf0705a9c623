//! Polygon parameter bitfields
//!
//! Value records over the raw 32-bit words written by the tile accelerator.
//! Every logical field is reached through an accessor so the policy
//! resolvers never shift or mask raw integers themselves.

/// Extract `width` bits starting at `shift`
#[inline]
const fn bits(word: u32, shift: u32, width: u32) -> u32 {
    (word >> shift) & ((1 << width) - 1)
}

#[inline]
const fn bit(word: u32, shift: u32) -> bool {
    (word >> shift) & 1 != 0
}

/// Polygon list the parameter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ListType {
    Opaque = 0,
    OpaqueModifierVolume = 1,
    Translucent = 2,
    TranslucentModifierVolume = 3,
    PunchThrough = 4,
}

impl ListType {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(ListType::Opaque),
            1 => Some(ListType::OpaqueModifierVolume),
            2 => Some(ListType::Translucent),
            3 => Some(ListType::TranslucentModifierVolume),
            4 => Some(ListType::PunchThrough),
            _ => None,
        }
    }

    /// Parse a list name as used on the command line and in logs
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "opaque" | "op" => Some(ListType::Opaque),
            "opaque-modvol" | "om" => Some(ListType::OpaqueModifierVolume),
            "translucent" | "tr" => Some(ListType::Translucent),
            "translucent-modvol" | "tm" => Some(ListType::TranslucentModifierVolume),
            "punch-through" | "punchthrough" | "pt" => Some(ListType::PunchThrough),
            _ => None,
        }
    }
}

/// Face culling requested by the ISP word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CullMode {
    #[default]
    None = 0,
    /// Cull only polygons below the area threshold; not a face cull
    Small = 1,
    /// Cull counter-clockwise (front) faces
    Front = 2,
    /// Cull clockwise (back) faces
    Back = 3,
}

impl CullMode {
    pub fn from_u32(value: u32) -> Self {
        match value & 3 {
            1 => CullMode::Small,
            2 => CullMode::Front,
            3 => CullMode::Back,
            _ => CullMode::None,
        }
    }

    pub fn to_wgpu(self) -> Option<wgpu::Face> {
        match self {
            CullMode::None | CullMode::Small => None,
            CullMode::Front => Some(wgpu::Face::Front),
            CullMode::Back => Some(wgpu::Face::Back),
        }
    }
}

/// Texture pixel format from the TCW word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PixelFormat {
    Argb1555 = 0,
    Rgb565 = 1,
    Argb4444 = 2,
    Yuv422 = 3,
    BumpMap = 4,
    Pal4 = 5,
    Pal8 = 6,
    Reserved = 7,
}

impl PixelFormat {
    pub fn from_u32(value: u32) -> Self {
        match value & 7 {
            0 => PixelFormat::Argb1555,
            1 => PixelFormat::Rgb565,
            2 => PixelFormat::Argb4444,
            3 => PixelFormat::Yuv422,
            4 => PixelFormat::BumpMap,
            5 => PixelFormat::Pal4,
            6 => PixelFormat::Pal8,
            _ => PixelFormat::Reserved,
        }
    }
}

/// Fog control field of the TSP word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FogMode {
    Table = 0,
    Vertex = 1,
    None = 2,
    TableMode2 = 3,
}

impl FogMode {
    pub fn from_u32(value: u32) -> Self {
        match value & 3 {
            0 => FogMode::Table,
            1 => FogMode::Vertex,
            2 => FogMode::None,
            _ => FogMode::TableMode2,
        }
    }
}

/// Texture/color combine instruction of the TSP word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ShadingInstruction {
    Decal = 0,
    Modulate = 1,
    DecalAlpha = 2,
    ModulateAlpha = 3,
}

impl ShadingInstruction {
    pub fn from_u32(value: u32) -> Self {
        match value & 3 {
            0 => ShadingInstruction::Decal,
            1 => ShadingInstruction::Modulate,
            2 => ShadingInstruction::DecalAlpha,
            _ => ShadingInstruction::ModulateAlpha,
        }
    }
}

/// Clip behaviour selected by the top nibble of the tile-clip word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileClipMode {
    /// Clip test always passes
    #[default]
    Disabled,
    /// Render only inside the clip rectangle
    Inside,
    /// Render only outside the clip rectangle
    Outside,
}

impl TileClipMode {
    pub fn from_u32(value: u32) -> Self {
        match value {
            2 => TileClipMode::Inside,
            3 => TileClipMode::Outside,
            _ => TileClipMode::Disabled,
        }
    }

    /// Signed clip-test value consumed by the fragment shader
    pub fn clip_test(self) -> i8 {
        match self {
            TileClipMode::Disabled => 0,
            TileClipMode::Inside => 1,
            TileClipMode::Outside => -1,
        }
    }
}

/// Parameter control word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pcw(pub u32);

impl Pcw {
    #[inline]
    pub fn gouraud(self) -> bool {
        bit(self.0, 1)
    }

    #[inline]
    pub fn offset(self) -> bool {
        bit(self.0, 2)
    }

    #[inline]
    pub fn texture(self) -> bool {
        bit(self.0, 3)
    }

    #[inline]
    pub fn shadow(self) -> bool {
        bit(self.0, 7)
    }

    /// Raw three-bit list type field
    #[inline]
    pub fn list_type_bits(self) -> u32 {
        bits(self.0, 24, 3)
    }

    pub fn list_type(self) -> Option<ListType> {
        ListType::from_u32(self.list_type_bits())
    }
}

/// Image synthesis processor word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IspTsp(pub u32);

impl IspTsp {
    #[inline]
    pub fn z_write_disable(self) -> bool {
        bit(self.0, 26)
    }

    #[inline]
    pub fn cull_mode(self) -> CullMode {
        CullMode::from_u32(bits(self.0, 27, 2))
    }

    /// Index into the depth compare table (0-7)
    #[inline]
    pub fn depth_mode(self) -> u32 {
        bits(self.0, 29, 3)
    }
}

/// Texture and shading processor word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tsp(pub u32);

impl Tsp {
    #[inline]
    pub fn shading_instruction(self) -> ShadingInstruction {
        ShadingInstruction::from_u32(bits(self.0, 6, 2))
    }

    /// 0 point, 1 bilinear, 2 and 3 trilinear passes
    #[inline]
    pub fn filter_mode(self) -> u32 {
        bits(self.0, 13, 2)
    }

    #[inline]
    pub fn ignore_tex_alpha(self) -> bool {
        bit(self.0, 19)
    }

    #[inline]
    pub fn use_alpha(self) -> bool {
        bit(self.0, 20)
    }

    #[inline]
    pub fn color_clamp(self) -> bool {
        bit(self.0, 21)
    }

    #[inline]
    pub fn fog_ctrl(self) -> FogMode {
        FogMode::from_u32(bits(self.0, 22, 2))
    }

    #[inline]
    pub fn dst_instr(self) -> u32 {
        bits(self.0, 26, 3)
    }

    #[inline]
    pub fn src_instr(self) -> u32 {
        bits(self.0, 29, 3)
    }
}

/// Texture control word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tcw(pub u32);

impl Tcw {
    #[inline]
    pub fn pixel_format(self) -> PixelFormat {
        PixelFormat::from_u32(bits(self.0, 27, 3))
    }
}

/// Tile clip word; the low bits hold the clip rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileClip(pub u32);

impl TileClip {
    #[inline]
    pub fn mode(self) -> TileClipMode {
        TileClipMode::from_u32(self.0 >> 28)
    }
}

/// Decoded per-polygon parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PolyParam {
    pub pcw: Pcw,
    pub isp: IspTsp,
    pub tsp: Tsp,
    pub tcw: Tcw,
    pub tile_clip: TileClip,
}

impl PolyParam {
    #[inline]
    pub fn is_bump_map(&self) -> bool {
        self.tcw.pixel_format() == PixelFormat::BumpMap
    }
}
