//! PowerVR pipeline state compiler
//!
//! Translates the fixed-function polygon state of the PowerVR tile
//! accelerator (ISP/TSP/TCW words, parameter control word, tile clip) into
//! cached wgpu render pipelines.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod poly_param;
pub mod render_state;
pub mod vertex;

pub use config::PipelineConfig;
pub use error::{ConfigError, PipelineError};
pub use pipeline::{PipelineBackend, PipelineKey, PipelineManager, SharedPipelineManager};
pub use poly_param::{ListType, PolyParam};
pub use render_state::{FogClamp, RenderFlags};
