//! pvr-pipeline - pipeline state inspector
//!
//! Resolves raw polygon parameter words to the pipeline state and cache key
//! they would produce, without creating a GPU device.
//!
//! # Usage
//!
//! ```bash
//! pvr-pipeline --list translucent --tsp 0x94000000 --isp 0x60000000
//! pvr-pipeline --list pt --pcw 0x0000008A --config pipeline.toml
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use pvr_pipeline::PipelineConfig;
use pvr_pipeline::pipeline::{FixedFunctionState, PipelineKey};
use pvr_pipeline::poly_param::{IspTsp, ListType, Pcw, PolyParam, Tcw, TileClip, Tsp};

#[derive(Parser)]
#[command(name = "pvr-pipeline")]
#[command(author, version, about = "Inspect PowerVR polygon pipeline state")]
struct Args {
    /// Polygon list (opaque, translucent, punch-through, ...)
    #[arg(long, short = 'l', default_value = "opaque")]
    list: String,

    /// Sort translucent triangles
    #[arg(long)]
    sort_triangles: bool,

    /// Parameter control word
    #[arg(long, value_parser = parse_word, default_value = "0")]
    pcw: u32,

    /// ISP/TSP instruction word
    #[arg(long, value_parser = parse_word, default_value = "0")]
    isp: u32,

    /// TSP instruction word
    #[arg(long, value_parser = parse_word, default_value = "0")]
    tsp: u32,

    /// Texture control word
    #[arg(long, value_parser = parse_word, default_value = "0")]
    tcw: u32,

    /// Tile clip word
    #[arg(long, value_parser = parse_word, default_value = "0")]
    tile_clip: u32,

    /// Pipeline configuration file (TOML)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
}

/// Parse a decimal or 0x-prefixed hexadecimal word
fn parse_word(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid word '{}': {}", s, e))
}

fn load_config(path: &Path) -> Result<PipelineConfig> {
    PipelineConfig::load(path)
        .with_context(|| format!("loading {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let list_type = ListType::from_name(&args.list)
        .ok_or_else(|| anyhow!("unknown list type '{}'", args.list))?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    let flags = config.render_flags();
    tracing::debug!("Render flags: {:?}", flags);

    let pp = PolyParam {
        pcw: Pcw(args.pcw),
        isp: IspTsp(args.isp),
        tsp: Tsp(args.tsp),
        tcw: Tcw(args.tcw),
        tile_clip: TileClip(args.tile_clip),
    };

    if let Some(pcw_list) = pp.pcw.list_type().filter(|&l| l != list_type) {
        tracing::warn!(
            "PCW encodes list {:?} but {:?} was requested",
            pcw_list,
            list_type
        );
    }

    let key = PipelineKey::new(list_type, args.sort_triangles, &pp, &flags);
    let state = FixedFunctionState::resolve(list_type, args.sort_triangles, &pp, &flags)?;

    println!("{:#?}", key);
    println!("{:#?}", state);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word() {
        assert_eq!(parse_word("0x80000000"), Ok(0x8000_0000));
        assert_eq!(parse_word("0XFF"), Ok(0xFF));
        assert_eq!(parse_word("42"), Ok(42));
        assert!(parse_word("0xZZ").is_err());
        assert!(parse_word("-1").is_err());
    }
}
