//! Blend instruction translation and color blend policy

use crate::error::PipelineError;
use crate::poly_param::{ListType, Tsp};
use crate::render_state::ColorBlendAttachment;

/// Which side of the blend equation an instruction is resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendSlot {
    Source,
    Destination,
}

/// Translate a 3-bit hardware blend instruction into a blend factor
///
/// Instructions 2 and 3 ("other color") refer to the opposite operand:
/// the destination color when resolving the source slot and vice versa.
///
/// # Errors
///
/// Returns `PipelineError::InvalidBlendInstruction` if `instr` is not 0-7.
pub fn resolve_blend_factor(
    instr: u32,
    slot: BlendSlot,
) -> Result<wgpu::BlendFactor, PipelineError> {
    let src = slot == BlendSlot::Source;
    let factor = match instr {
        0 => wgpu::BlendFactor::Zero,
        1 => wgpu::BlendFactor::One,
        2 if src => wgpu::BlendFactor::Dst,
        2 => wgpu::BlendFactor::Src,
        3 if src => wgpu::BlendFactor::OneMinusDst,
        3 => wgpu::BlendFactor::OneMinusSrc,
        4 => wgpu::BlendFactor::SrcAlpha,
        5 => wgpu::BlendFactor::OneMinusSrcAlpha,
        6 => wgpu::BlendFactor::DstAlpha,
        7 => wgpu::BlendFactor::OneMinusDstAlpha,
        _ => return Err(PipelineError::InvalidBlendInstruction(instr)),
    };
    Ok(factor)
}

/// Resolve the color attachment blend state for a polygon
///
/// Punch-through polygons get the same blend wiring as translucent ones;
/// some titles rely on punch-through blending.
/// Alpha reuses the color factors since the hardware has no separate alpha
/// blend instruction.
pub fn resolve_color_blend(
    list_type: ListType,
    tsp: Tsp,
) -> Result<ColorBlendAttachment, PipelineError> {
    match list_type {
        ListType::Translucent | ListType::PunchThrough => {
            let src = resolve_blend_factor(tsp.src_instr(), BlendSlot::Source)?;
            let dst = resolve_blend_factor(tsp.dst_instr(), BlendSlot::Destination)?;
            Ok(ColorBlendAttachment {
                blend_enable: true,
                src_color_factor: src,
                dst_color_factor: dst,
                color_op: wgpu::BlendOperation::Add,
                src_alpha_factor: src,
                dst_alpha_factor: dst,
                alpha_op: wgpu::BlendOperation::Add,
                write_mask: wgpu::ColorWrites::ALL,
            })
        }
        _ => Ok(ColorBlendAttachment::OPAQUE),
    }
}
