use std::fmt::Display;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::config::ViewerConfig;
use crate::core::{CameraState, Mesh};
use crate::pipeline::{project, segments, InputEvent, Surface, ViewerKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Index of the mesh on screen after `elapsed`, each mesh staying up for `dwell`.
pub fn active_mesh_index(elapsed: Duration, dwell: Duration, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let dwell_ms = dwell.as_millis().max(1);
    ((elapsed.as_millis() / dwell_ms) % count as u128) as usize
}

/// Frame timing over the whole run.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    pub frames: u64,
    /// Frames whose work took longer than the budget
    pub overruns: u64,
    pub busy: Duration,
}

impl FrameStats {
    pub fn record(&mut self, work: Duration, budget: Duration) {
        self.frames += 1;
        self.busy += work;
        if work > budget {
            self.overruns += 1;
        }
    }

    pub fn average(&self) -> Duration {
        if self.frames == 0 {
            return Duration::ZERO;
        }
        self.busy / self.frames as u32
    }
}

impl Display for FrameStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Frames: {} | Avg work: {:.2}ms | Over budget: {}",
            self.frames,
            self.average().as_secs_f32() * 1000.0,
            self.overruns
        )
    }
}

/// Owns the camera and the mesh list, and drives one tick at a time.
pub struct Viewer {
    config: ViewerConfig,
    meshes: Vec<Mesh>,
    camera: CameraState,
    last_index: Option<usize>,
    stats: FrameStats,
}

impl Viewer {
    pub fn new(config: ViewerConfig, meshes: Vec<Mesh>) -> Self {
        let camera = CameraState::new(config.initial_distance);
        Self {
            config,
            meshes,
            camera,
            last_index: None,
            stats: FrameStats::default(),
        }
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn handle_event(&mut self, event: InputEvent) -> LoopControl {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(ViewerKey::Quit) => return LoopControl::Quit,
            InputEvent::KeyDown(ViewerKey::Pause) => {
                self.camera.is_rotating = false;
                debug!("Rotation paused at {:.0} degrees", self.camera.rotation_degrees);
            }
            InputEvent::KeyUp(ViewerKey::Pause) => {
                self.camera.is_rotating = true;
                debug!("Rotation resumed");
            }
            _ => {}
        }
        LoopControl::Continue
    }

    /// Keys that act for as long as they are held.
    pub fn apply_held_keys<S: Surface>(&mut self, surface: &S) -> LoopControl {
        if surface.is_key_down(ViewerKey::ZoomIn) {
            self.camera.dolly(self.config.dolly_speed);
        }
        if surface.is_key_down(ViewerKey::ZoomOut) {
            self.camera.dolly(-self.config.dolly_speed);
        }
        if surface.is_key_down(ViewerKey::Quit) {
            return LoopControl::Quit;
        }
        LoopControl::Continue
    }

    /// Projects the mesh due at `elapsed` and draws its edges. Returns its index.
    pub fn draw<S: Surface>(&mut self, surface: &mut S, elapsed: Duration) -> Option<usize> {
        surface.clear(self.config.background);

        let index = active_mesh_index(elapsed, self.config.dwell, self.meshes.len());
        let mesh = self.meshes.get(index)?;
        if self.last_index != Some(index) {
            debug!("Showing mesh {} {:?}", index, mesh.name);
            self.last_index = Some(index);
        }

        let projected = project(
            &mesh.vertices,
            &self.camera,
            self.config.viewport(),
            self.config.focal_length(),
        );
        for seg in segments(mesh, &projected) {
            surface.draw_line(seg.start, seg.end, seg.color);
        }
        Some(index)
    }

    /// One full tick minus the frame-rate sleep: input, camera update, draw,
    /// present. `elapsed` is the time since the loop started.
    pub fn tick<S: Surface>(
        &mut self,
        surface: &mut S,
        elapsed: Duration,
    ) -> crate::Result<LoopControl> {
        for event in surface.poll_events() {
            if self.handle_event(event) == LoopControl::Quit {
                return Ok(LoopControl::Quit);
            }
        }
        if self.apply_held_keys(surface) == LoopControl::Quit {
            return Ok(LoopControl::Quit);
        }

        self.camera.advance_rotation(self.config.rotation_speed);

        self.draw(surface, elapsed);
        surface.present()?;
        Ok(LoopControl::Continue)
    }

    /// Runs ticks at the configured rate until a quit. A slow frame is not
    /// made up for, the next one just starts late.
    pub fn run<S: Surface>(&mut self, surface: &mut S) -> crate::Result<()> {
        let budget = self.config.frame_budget();
        let start = Instant::now();
        info!(
            "Viewing {} meshes at {} fps",
            self.meshes.len(),
            self.config.target_fps
        );

        loop {
            let frame_start = Instant::now();
            if self.tick(surface, frame_start - start)? == LoopControl::Quit {
                break;
            }

            let work = frame_start.elapsed();
            self.stats.record(work, budget);
            if let Some(wait) = budget.checked_sub(work) {
                thread::sleep(wait);
            }
        }

        info!("{}", self.stats);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;
    use approx::assert_relative_eq;
    use glam::Vec2;
    use std::collections::{HashSet, VecDeque};

    #[derive(Default)]
    struct RecordingSurface {
        events: VecDeque<Vec<InputEvent>>,
        held: HashSet<ViewerKey>,
        lines: Vec<(Vec2, Vec2, Color)>,
        clears: usize,
        presents: usize,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, _color: Color) {
            self.clears += 1;
            self.lines.clear();
        }
        fn draw_line(&mut self, start: Vec2, end: Vec2, color: Color) {
            self.lines.push((start, end, color));
        }
        fn present(&mut self) -> crate::Result<()> {
            self.presents += 1;
            Ok(())
        }
        fn poll_events(&mut self) -> Vec<InputEvent> {
            self.events.pop_front().unwrap_or_default()
        }
        fn is_key_down(&self, key: ViewerKey) -> bool {
            self.held.contains(&key)
        }
    }

    fn tri(name: &str, color: Color) -> Mesh {
        let src = format!("o {name}\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        Mesh::parse(&src).unwrap().with_color(color)
    }

    fn viewer(meshes: Vec<Mesh>) -> Viewer {
        Viewer::new(ViewerConfig::default(), meshes)
    }

    #[test]
    fn active_index_cycles_with_dwell() {
        let dwell = Duration::from_millis(2000);
        let at = |ms| active_mesh_index(Duration::from_millis(ms), dwell, 3);
        assert_eq!(at(0), 0);
        assert_eq!(at(1999), 0);
        assert_eq!(at(2500), 1);
        assert_eq!(at(4000), 2);
        assert_eq!(at(6500), 0);
        assert_eq!(active_mesh_index(Duration::from_secs(9), dwell, 1), 0);
        assert_eq!(active_mesh_index(Duration::from_secs(9), dwell, 0), 0);
    }

    #[test]
    fn tick_draws_every_edge_and_presents() {
        let mut v = viewer(vec![tri("a", Color::RED)]);
        let mut surface = RecordingSurface::default();
        let ctl = v.tick(&mut surface, Duration::ZERO).unwrap();
        assert_eq!(ctl, LoopControl::Continue);
        assert_eq!(surface.lines.len(), 3);
        assert!(surface.lines.iter().all(|l| l.2 == Color::RED));
        assert_eq!((surface.clears, surface.presents), (1, 1));
        assert_relative_eq!(v.camera().rotation_degrees, 1.0);
    }

    #[test]
    fn mesh_switches_after_dwell() {
        let mut v = viewer(vec![tri("a", Color::RED), tri("b", Color::BLUE)]);
        let mut surface = RecordingSurface::default();
        assert_eq!(v.draw(&mut surface, Duration::from_millis(100)), Some(0));
        assert_eq!(surface.lines[0].2, Color::RED);
        assert_eq!(v.draw(&mut surface, Duration::from_millis(2100)), Some(1));
        assert_eq!(surface.lines[0].2, Color::BLUE);
    }

    #[test]
    fn quit_event_and_quit_key_end_the_loop() {
        let mut v = viewer(vec![tri("a", Color::RED)]);
        let mut surface = RecordingSurface::default();
        surface.events.push_back(vec![InputEvent::Quit]);
        assert_eq!(v.tick(&mut surface, Duration::ZERO).unwrap(), LoopControl::Quit);
        assert_eq!(surface.presents, 0);

        surface.held.insert(ViewerKey::Quit);
        assert_eq!(v.tick(&mut surface, Duration::ZERO).unwrap(), LoopControl::Quit);
    }

    #[test]
    fn holding_pause_freezes_rotation_until_release() {
        let mut v = viewer(vec![tri("a", Color::RED)]);
        let mut surface = RecordingSurface::default();
        v.tick(&mut surface, Duration::ZERO).unwrap();
        v.tick(&mut surface, Duration::ZERO).unwrap();
        assert_relative_eq!(v.camera().rotation_degrees, 2.0);

        surface
            .events
            .push_back(vec![InputEvent::KeyDown(ViewerKey::Pause)]);
        for _ in 0..5 {
            v.tick(&mut surface, Duration::ZERO).unwrap();
        }
        assert!(!v.camera().is_rotating);
        assert_relative_eq!(v.camera().rotation_degrees, 2.0);

        surface
            .events
            .push_back(vec![InputEvent::KeyUp(ViewerKey::Pause)]);
        v.tick(&mut surface, Duration::ZERO).unwrap();
        assert!(v.camera().is_rotating);
        assert_relative_eq!(v.camera().rotation_degrees, 3.0);
    }

    #[test]
    fn zoom_keys_dolly_each_tick() {
        let mut v = viewer(vec![tri("a", Color::RED)]);
        let mut surface = RecordingSurface::default();
        surface.held.insert(ViewerKey::ZoomIn);
        v.tick(&mut surface, Duration::ZERO).unwrap();
        v.tick(&mut surface, Duration::ZERO).unwrap();
        assert_relative_eq!(v.camera().distance, 5.0 - 0.8, epsilon = 1e-5);

        surface.held.clear();
        surface.held.insert(ViewerKey::ZoomOut);
        v.tick(&mut surface, Duration::ZERO).unwrap();
        assert_relative_eq!(v.camera().distance, 5.0 - 0.4, epsilon = 1e-5);
    }

    #[test]
    fn run_stops_on_quit_and_counts_frames() {
        let mut v = viewer(vec![tri("a", Color::RED)]);
        let mut surface = RecordingSurface::default();
        surface.events.push_back(Vec::new());
        surface.events.push_back(Vec::new());
        surface.events.push_back(vec![InputEvent::Quit]);
        v.run(&mut surface).unwrap();
        assert_eq!(surface.presents, 2);
        assert_eq!(v.stats().frames, 2);
    }

    #[test]
    fn frame_stats() {
        let mut stats = FrameStats::default();
        assert_eq!(stats.average(), Duration::ZERO);
        let budget = Duration::from_millis(11);
        stats.record(Duration::from_millis(4), budget);
        stats.record(Duration::from_millis(20), budget);
        assert_eq!(stats.frames, 2);
        assert_eq!(stats.overruns, 1);
        assert_eq!(stats.average(), Duration::from_millis(12));
        assert!(stats.to_string().contains("Over budget: 1"));
    }
}
