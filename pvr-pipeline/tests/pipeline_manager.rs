//! Pipeline manager integration tests against a recording backend

use std::cell::{Cell, RefCell};

use pvr_pipeline::pipeline::{FragmentShaderParams, PipelineDescriptor, VertexShaderParams};
use pvr_pipeline::poly_param::{IspTsp, Pcw, TileClip, Tsp};
use pvr_pipeline::{
    ListType, PipelineBackend, PipelineConfig, PipelineError, PipelineManager, PolyParam,
};

/// Records every shader key and descriptor it is asked to build
#[derive(Default)]
struct RecordingBackend {
    fragment_keys: RefCell<Vec<FragmentShaderParams>>,
    builds: Cell<u32>,
}

impl PipelineBackend for RecordingBackend {
    type ShaderModule = u32;
    type Pipeline = (u32, wgpu::CompareFunction, bool);

    fn create_vertex_shader(&self, params: &VertexShaderParams) -> Result<u32, PipelineError> {
        Ok(params.gouraud as u32)
    }

    fn create_fragment_shader(&self, params: &FragmentShaderParams) -> Result<u32, PipelineError> {
        let mut keys = self.fragment_keys.borrow_mut();
        keys.push(*params);
        Ok(keys.len() as u32)
    }

    fn create_pipeline(
        &self,
        desc: &PipelineDescriptor<u32>,
    ) -> Result<Self::Pipeline, PipelineError> {
        let id = self.builds.get();
        self.builds.set(id + 1);
        Ok((
            id,
            desc.state.depth_stencil.depth_compare,
            desc.state.depth_stencil.depth_write_enable,
        ))
    }
}

fn scene() -> Vec<(ListType, bool, PolyParam)> {
    let opaque = PolyParam {
        pcw: Pcw((1 << 1) | (1 << 3)),
        isp: IspTsp(3 << 29),
        tsp: Tsp(2 << 13),
        ..Default::default()
    };
    let shadowed = PolyParam {
        pcw: Pcw((1 << 1) | (1 << 3) | (1 << 7)),
        ..opaque
    };
    let foliage = PolyParam {
        isp: IspTsp((6 << 29) | (1 << 26)),
        tsp: Tsp((4 << 29) | (5 << 26)),
        ..opaque
    };
    let glass = PolyParam {
        tsp: Tsp((4 << 29) | (5 << 26) | (2 << 13)),
        tile_clip: TileClip(3 << 28),
        ..opaque
    };

    vec![
        (ListType::Opaque, false, opaque),
        (ListType::Opaque, false, shadowed),
        (ListType::PunchThrough, false, foliage),
        (ListType::Translucent, true, glass),
        (ListType::Opaque, false, opaque),
        (ListType::Translucent, true, glass),
    ]
}

#[test]
fn frame_builds_each_state_once() {
    let mut manager = PipelineManager::new(RecordingBackend::default(), Default::default());
    let scene = scene();

    for _frame in 0..3 {
        for (list, sort, pp) in &scene {
            manager.get_or_create(*list, *sort, pp).unwrap();
        }
    }

    assert_eq!(manager.len(), 4);
    assert_eq!(manager.backend().builds.get(), 4);
}

#[test]
fn punch_through_writes_depth_despite_z_write_disable() {
    let mut manager = PipelineManager::new(RecordingBackend::default(), Default::default());
    let scene = scene();
    let (list, sort, foliage) = &scene[2];

    let &(_, compare, write) = manager.get_or_create(*list, *sort, foliage).unwrap();
    assert_eq!(compare, wgpu::CompareFunction::GreaterEqual);
    assert!(write);
}

#[test]
fn prewarm_then_draw_builds_nothing() {
    let mut manager = PipelineManager::new(RecordingBackend::default(), Default::default());
    let scene = scene();

    let built = manager
        .prewarm(scene.iter().map(|(list, sort, pp)| (*list, *sort, pp)))
        .unwrap();
    assert_eq!(built, 4);

    for (list, sort, pp) in &scene {
        manager.get_or_create(*list, *sort, pp).unwrap();
    }
    assert_eq!(manager.backend().builds.get(), 4);
}

#[test]
fn fragment_keys_follow_polygon_state() {
    let mut manager = PipelineManager::new(RecordingBackend::default(), Default::default());
    for (list, sort, pp) in &scene() {
        manager.get_or_create(*list, *sort, pp).unwrap();
    }

    let keys = manager.backend().fragment_keys.borrow();
    // Opaque and shadowed opaque share a fragment variant
    assert_eq!(keys.len(), 3);
    assert!(keys.iter().any(|k| k.alpha_test && !k.trilinear));
    assert!(keys.iter().any(|k| k.clip_test == -1 && k.trilinear));
    assert!(keys.iter().all(|k| k.gouraud && k.texture));
}

#[test]
fn config_flags_drive_depth_writes() {
    let config = PipelineConfig::from_toml_str("[sorting]\nper_strip = true").unwrap();
    let mut manager = PipelineManager::new(RecordingBackend::default(), config.render_flags());
    let scene = scene();
    let (list, sort, glass) = &scene[3];

    let &(_, _, write) = manager.get_or_create(*list, *sort, glass).unwrap();
    assert!(write);
}
