//! Интерфейсы внешних collaborators (рендер, аудио) + headless реализации

use bevy::prelude::*;
use std::collections::HashMap;

use crate::components::ObstacleKind;

/// Что рисовать для entity (геометрия и материалы на стороне backend'а)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum VisualKind {
    Goblin,
    Troll,
    Projectile,
    HealthPack,
    /// Цилиндр вдоль локальной Y, центр посередине луча
    LaserBeam { length: f32 },
    ImpactMarker,
    Obstacle(ObstacleKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Laser,
    GoblinStep,
    TrollStep,
    TrollLand,
    HealthPickup,
}

/// Event: fire-and-forget звук (фильтруется mute flag)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundRequested(pub SoundEffect);

/// Непрозрачный handle визуала, выданный backend'ом
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl From<&Transform> for Pose {
    fn from(transform: &Transform) -> Self {
        Self {
            translation: transform.translation,
            rotation: transform.rotation,
        }
    }
}

/// Рендер collaborator (scene graph, меши, камера)
pub trait RenderBackend: Send + Sync + 'static {
    fn create_visual(&mut self, kind: VisualKind, pose: Pose) -> VisualHandle;
    fn destroy_visual(&mut self, handle: VisualHandle);
    fn set_pose(&mut self, handle: VisualHandle, pose: Pose);
    fn set_camera(&mut self, pose: Pose);
    fn set_weapon_opacity(&mut self, opacity: f32);
}

/// Аудио collaborator
pub trait AudioSink: Send + Sync + 'static {
    fn play_effect(&mut self, effect: SoundEffect);
}

/// Backend без окна: только учёт живых handles
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    next_id: u64,
    live: HashMap<VisualHandle, VisualKind>,
}

impl HeadlessRenderer {
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl RenderBackend for HeadlessRenderer {
    fn create_visual(&mut self, kind: VisualKind, pose: Pose) -> VisualHandle {
        self.next_id += 1;
        let handle = VisualHandle(self.next_id);
        self.live.insert(handle, kind);
        crate::logger::log(&format!(
            "🖼️ create {:?} → {:?} at {:.1?}",
            kind, handle, pose.translation
        ));
        handle
    }

    fn destroy_visual(&mut self, handle: VisualHandle) {
        if self.live.remove(&handle).is_none() {
            crate::logger::log_warning(&format!("⚠️ destroy of unknown visual {:?}", handle));
        }
    }

    fn set_pose(&mut self, _handle: VisualHandle, _pose: Pose) {}

    fn set_camera(&mut self, _pose: Pose) {}

    fn set_weapon_opacity(&mut self, _opacity: f32) {}
}

#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play_effect(&mut self, effect: SoundEffect) {
        crate::logger::log(&format!("🔈 {:?}", effect));
    }
}

/// Resource: backend + соответствие Entity → VisualHandle
#[derive(Resource)]
pub struct RenderBridge {
    backend: Box<dyn RenderBackend>,
    handles: HashMap<Entity, VisualHandle>,
}

impl RenderBridge {
    pub fn new(backend: impl RenderBackend) -> Self {
        Self {
            backend: Box::new(backend),
            handles: HashMap::new(),
        }
    }

    pub fn handle(&self, entity: Entity) -> Option<VisualHandle> {
        self.handles.get(&entity).copied()
    }

    pub fn visual_count(&self) -> usize {
        self.handles.len()
    }

    pub(crate) fn create(&mut self, entity: Entity, kind: VisualKind, pose: Pose) {
        let handle = self.backend.create_visual(kind, pose);
        // Повторный Added (VisualKind вставлен заново): старый визуал заменяется
        if let Some(previous) = self.handles.insert(entity, handle) {
            self.backend.destroy_visual(previous);
        }
    }

    pub(crate) fn set_pose(&mut self, entity: Entity, pose: Pose) {
        if let Some(handle) = self.handles.get(&entity) {
            self.backend.set_pose(*handle, pose);
        }
    }

    pub(crate) fn destroy(&mut self, entity: Entity) -> bool {
        match self.handles.remove(&entity) {
            Some(handle) => {
                self.backend.destroy_visual(handle);
                true
            }
            None => false,
        }
    }

    pub(crate) fn backend_mut(&mut self) -> &mut dyn RenderBackend {
        self.backend.as_mut()
    }
}

#[derive(Resource)]
pub struct AudioBridge {
    sink: Box<dyn AudioSink>,
}

impl AudioBridge {
    pub fn new(sink: impl AudioSink) -> Self {
        Self { sink: Box::new(sink) }
    }

    pub(crate) fn play(&mut self, effect: SoundEffect) {
        self.sink.play_effect(effect);
    }
}
