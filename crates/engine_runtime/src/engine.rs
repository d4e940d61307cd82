//! The engine context and main loop.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use engine_scene::{EventDispatcher, GameEvent, Scene};
use engine_systems::{CollisionInfo, InputSystem, PhysicsSystem, RenderSystem};
use tracing::{debug, error, info};

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Physics step length in seconds.
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Owns the scene, the subsystems, and the loop that drives them.
///
/// Lifecycle is `new` → [`initialize`](Engine::initialize) →
/// [`run`](Engine::run) → [`shutdown`](Engine::shutdown). Everything the
/// engine touches hangs off this object; callers that want two engines get
/// two engines.
pub struct Engine {
    config: EngineConfig,
    scene: Scene,
    events: EventDispatcher,
    render: RenderSystem,
    physics: PhysicsSystem,
    input: InputSystem,
    // Contacts forwarded out of the physics callback during the step loop,
    // drained into GameEvents once per frame.
    collision_sink: Rc<RefCell<Vec<CollisionInfo>>>,
    // f64 so exact-multiple-of-a-step chunkings never round below the
    // boundary and drop a step.
    accumulator: f64,
    time: f32,
    frames: u64,
    fps: f32,
    fps_timer: f32,
    fps_frames: u32,
    running: bool,
    initialized: bool,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            scene: Scene::new(),
            events: EventDispatcher::new(),
            render: RenderSystem::new(),
            physics: PhysicsSystem::new(),
            input: InputSystem::new(),
            collision_sink: Rc::new(RefCell::new(Vec::new())),
            accumulator: 0.0,
            time: 0.0,
            frames: 0,
            fps: 0.0,
            fps_timer: 0.0,
            fps_frames: 0,
            running: false,
            initialized: false,
        }
    }

    /// Bring all subsystems up. Idempotent once initialized.
    ///
    /// A subsystem failure aborts startup and leaves the engine
    /// uninitialized.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        if self.initialized {
            return Ok(());
        }

        if let Err(err) = self.render.initialize(
            self.config.window_width,
            self.config.window_height,
            self.config.window_title.clone(),
        ) {
            error!(%err, "render system failed to initialize");
            return Err(err.into());
        }
        if let Err(err) = self.physics.initialize() {
            error!(%err, "physics system failed to initialize");
            return Err(err.into());
        }
        self.physics.set_gravity(self.config.gravity);

        let sink = Rc::clone(&self.collision_sink);
        self.physics
            .set_collision_callback(move |info| sink.borrow_mut().push(*info));

        self.initialized = true;
        info!(
            width = self.config.window_width,
            height = self.config.window_height,
            "engine initialized"
        );
        Ok(())
    }

    /// Run the main loop on the wall clock until [`stop`](Engine::stop) is
    /// called or `max_frames` is reached.
    pub fn run(&mut self) -> Result<(), EngineError> {
        if !self.initialized {
            return Err(EngineError::NotInitialized);
        }

        self.running = true;
        info!("entering main loop");

        let mut last = Instant::now();
        while self.running {
            let now = Instant::now();
            let delta_time = now.duration_since(last).as_secs_f32();
            last = now;

            self.advance(delta_time);

            if self.config.max_frames != 0 && self.frames >= self.config.max_frames {
                debug!(frames = self.frames, "frame cap reached");
                self.running = false;
            }
        }

        info!(frames = self.frames, "main loop exited");
        Ok(())
    }

    /// Advance the engine by one frame of `delta_time` seconds.
    ///
    /// Physics consumes whole [`FIXED_TIMESTEP`] slices from an accumulator;
    /// gameplay and AI run once on the full frame delta. The leftover
    /// accumulator fraction goes to the renderer as the interpolation
    /// factor. No-op while uninitialized.
    pub fn advance(&mut self, delta_time: f32) {
        if !self.initialized {
            return;
        }

        self.frames += 1;
        self.time += delta_time;
        self.update_fps(delta_time);

        self.input.update();

        self.accumulator += f64::from(delta_time);
        while self.accumulator >= f64::from(FIXED_TIMESTEP) {
            self.physics.update(FIXED_TIMESTEP);
            self.accumulator -= f64::from(FIXED_TIMESTEP);
        }

        let collisions: Vec<CollisionInfo> =
            self.collision_sink.borrow_mut().drain(..).collect();
        for info in collisions {
            self.events
                .dispatch(&GameEvent::Collision { a: info.a, b: info.b });
        }

        self.scene.update(delta_time, self.physics.gravity());
        for event in self.scene.drain_events() {
            self.events.dispatch(&event);
        }
        self.scene.flush_destroyed();

        let interpolation = (self.accumulator / f64::from(FIXED_TIMESTEP)) as f32;
        self.render.render(&self.scene, interpolation);
    }

    /// Ask the main loop to exit after the current frame.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Tear down subsystems and drop all scene objects.
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }
        self.running = false;
        self.scene.clear();
        self.collision_sink.borrow_mut().clear();
        self.physics.shutdown();
        self.render.shutdown();
        self.initialized = false;
        info!(frames = self.frames, "engine shut down");
    }

    fn update_fps(&mut self, delta_time: f32) {
        self.fps_frames += 1;
        self.fps_timer += delta_time;
        if self.fps_timer >= 1.0 {
            self.fps = self.fps_frames as f32 / self.fps_timer;
            self.fps_frames = 0;
            self.fps_timer = 0.0;
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn events_mut(&mut self) -> &mut EventDispatcher {
        &mut self.events
    }

    #[must_use]
    pub fn input(&self) -> &InputSystem {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputSystem {
        &mut self.input
    }

    #[must_use]
    pub fn physics(&self) -> &PhysicsSystem {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsSystem {
        &mut self.physics
    }

    #[must_use]
    pub fn render(&self) -> &RenderSystem {
        &self.render
    }

    pub fn render_mut(&mut self) -> &mut RenderSystem {
        &mut self.render
    }

    /// Frames-per-second over the most recently completed one-second window.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Total seconds advanced since initialization.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Total frames advanced since initialization.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("frames", &self.frames)
            .field("time", &self.time)
            .field("objects", &self.scene.len())
            .field("initialized", &self.initialized)
            .field("running", &self.running)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use engine_math::Vec3;
    use engine_scene::ObjectId;

    use super::*;

    fn initialized_engine() -> Engine {
        let mut engine = Engine::new(EngineConfig::default());
        engine.initialize().unwrap();
        engine
    }

    #[test]
    fn test_run_before_initialize_fails() {
        let mut engine = Engine::new(EngineConfig::default());
        assert!(matches!(engine.run(), Err(EngineError::NotInitialized)));
    }

    #[test]
    fn test_initialize_aborts_on_bad_window() {
        let config = EngineConfig::new().with_window(0, 720, "bad");
        let mut engine = Engine::new(config);
        assert!(engine.initialize().is_err());
        assert!(!engine.is_initialized());
    }

    #[test]
    fn test_advance_before_initialize_is_noop() {
        let mut engine = Engine::new(EngineConfig::default());
        engine.advance(0.1);
        assert_eq!(engine.frames(), 0);
    }

    #[test]
    fn test_physics_consumes_whole_fixed_slices() {
        let mut engine = initialized_engine();
        engine.advance(FIXED_TIMESTEP * 2.5);
        assert_eq!(engine.physics().steps(), 2);

        // The half slice left over combines with the next frame; landing
        // exactly on the step boundary must run the step.
        engine.advance(FIXED_TIMESTEP * 0.5);
        assert_eq!(engine.physics().steps(), 3);
    }

    #[test]
    fn test_step_boundary_does_not_drift() {
        let mut engine = initialized_engine();
        for _ in 0..4 {
            engine.advance(FIXED_TIMESTEP * 0.25);
        }
        assert_eq!(engine.physics().steps(), 1);

        for _ in 0..8 {
            engine.advance(FIXED_TIMESTEP * 0.25);
        }
        assert_eq!(engine.physics().steps(), 3);
    }

    #[test]
    fn test_short_frame_runs_no_physics_step() {
        let mut engine = initialized_engine();
        engine.advance(FIXED_TIMESTEP * 0.25);
        assert_eq!(engine.physics().steps(), 0);
        assert_eq!(engine.frames(), 1);
    }

    #[test]
    fn test_run_stops_at_frame_cap() {
        let config = EngineConfig::new().with_max_frames(3);
        let mut engine = Engine::new(config);
        engine.initialize().unwrap();
        engine.run().unwrap();
        assert_eq!(engine.frames(), 3);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_fps_counter_uses_one_second_window() {
        let mut engine = initialized_engine();
        engine.advance(0.5);
        assert_eq!(engine.fps(), 0.0);
        engine.advance(0.5);
        assert!((engine.fps() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_scene_events_reach_subscribers() {
        let mut engine = initialized_engine();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.events_mut().subscribe(move |event: &GameEvent| {
            sink.borrow_mut().push(*event);
        });

        let player = engine.scene_mut().spawn_player("hero");
        if let Some(character) = engine
            .scene_mut()
            .get_mut(player)
            .and_then(|object| object.character_mut())
        {
            character.add_experience(100);
        }
        engine.advance(FIXED_TIMESTEP);

        let seen = seen.borrow();
        assert!(
            seen.iter()
                .any(|event| matches!(event, GameEvent::LevelUp { level: 2, .. }))
        );
    }

    #[test]
    fn test_physics_collisions_reach_subscribers() {
        let mut engine = initialized_engine();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.events_mut().subscribe(move |event: &GameEvent| {
            sink.borrow_mut().push(*event);
        });

        let contact = CollisionInfo {
            a: ObjectId::from_raw(1),
            b: ObjectId::from_raw(2),
            contact_point: Vec3::ZERO,
            contact_normal: Vec3::new(0.0, 1.0, 0.0),
            penetration_depth: 0.05,
        };
        engine.physics_mut().report_collision(contact);
        engine.advance(FIXED_TIMESTEP);

        assert_eq!(
            seen.borrow().as_slice(),
            [GameEvent::Collision {
                a: contact.a,
                b: contact.b
            }]
        );

        // Already drained; the next frame delivers nothing new.
        engine.advance(FIXED_TIMESTEP);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_shutdown_clears_scene_and_subsystems() {
        let mut engine = initialized_engine();
        engine.scene_mut().spawn("prop");
        engine.shutdown();
        assert!(!engine.is_initialized());
        assert!(engine.scene().is_empty());
        assert!(!engine.physics().is_initialized());
    }
}
