//! Vertex record and wgpu buffer layout
//!
//! All polygons share a single interleaved stream, so there is exactly one
//! layout regardless of which shading features a polygon uses.

use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};

/// Shader locations for each attribute
const LOC_POSITION: u32 = 0;
const LOC_BASE_COLOR: u32 = 1;
const LOC_OFFSET_COLOR: u32 = 2;
const LOC_TEX_COORD: u32 = 3;

/// One vertex as produced by the display-list decoder
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Base color, RGBA8
    pub col: [u8; 4],
    /// Offset (specular) color, RGBA8
    pub spc: [u8; 4],
    pub u: f32,
    pub v: f32,
}

static VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 4] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: offset_of!(Vertex, x) as u64,
        shader_location: LOC_POSITION,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Uint8x4,
        offset: offset_of!(Vertex, col) as u64,
        shader_location: LOC_BASE_COLOR,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Uint8x4,
        offset: offset_of!(Vertex, spc) as u64,
        shader_location: LOC_OFFSET_COLOR,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: offset_of!(Vertex, u) as u64,
        shader_location: LOC_TEX_COORD,
    },
];

impl Vertex {
    /// Size of one vertex in the stream
    pub const STRIDE: u64 = size_of::<Vertex>() as u64;

    /// Buffer layout for binding slot 0
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_stride() {
        assert_eq!(Vertex::STRIDE, 28);
    }

    #[test]
    fn test_attribute_offsets() {
        let layout = Vertex::buffer_layout();
        let offsets: Vec<_> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 16, 20]);

        let locations: Vec<_> = layout
            .attributes
            .iter()
            .map(|a| a.shader_location)
            .collect();
        assert_eq!(locations, vec![0, 1, 2, 3]);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
    }

    #[test]
    fn test_vertex_is_pod() {
        let v = Vertex {
            x: 1.0,
            col: [0xFF, 0, 0, 0xFF],
            ..Default::default()
        };
        let bytes = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 28);
        assert_eq!(&bytes[12..16], &[0xFF, 0, 0, 0xFF]);
    }
}
