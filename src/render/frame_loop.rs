use std::{cell::Cell, rc::Rc};

use crate::{
    field::{flow::FlowField, prng::Generator},
    foundation::core::Rgba8,
    foundation::error::{DriftError, DriftResult},
    palette::resolve::{Palette, PaletteCache},
    render::{
        scene::{build_layers, time_step},
        surface::{FrameRGBA, Surface},
        theme::Theme,
        viewport::{ResizeSubscription, Viewport},
    },
    settings::model::Settings,
};

/// Lifecycle of a [`RenderLoop`]. There is no paused state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// What a call to [`RenderLoop::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// A frame was drawn and the next one scheduled.
    Drawn,
    /// Nothing was scheduled (loop stopped or the pending frame was cancelled).
    Idle,
}

/// Cancellation flag for one scheduled frame.
#[derive(Clone, Debug, Default)]
pub struct FrameToken {
    cancelled: Rc<Cell<bool>>,
}

impl FrameToken {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Per-surface frame orchestrator.
///
/// Owns the accumulated time, the scene generator and the backing surface. The host calls
/// [`RenderLoop::tick`] once per display refresh; each tick draws at most one frame and
/// schedules the next unless the loop was stopped in between.
///
/// The generator is created once per settings change and advances across frames, so the
/// animation for a seed depends on the sequence of frames since the last settings change. Theme
/// changes restart the loop without reseeding. Time is never reset.
pub struct RenderLoop {
    viewport: Viewport,
    state: LoopState,
    settings: Settings,
    theme: Theme,
    background: Option<Rgba8>,
    field: FlowField,
    palettes: PaletteCache,
    generator: Generator,
    time: f64,
    frames: u64,
    teardowns: u64,
    surface: Option<Surface>,
    pending: Option<FrameToken>,
    resize: Option<ResizeSubscription>,
}

impl RenderLoop {
    pub fn new(viewport: Viewport, settings: Settings, theme: Theme) -> Self {
        let settings = settings.clamped();
        Self {
            viewport,
            state: LoopState::Stopped,
            field: FlowField::from_settings(&settings),
            generator: Generator::new(settings.seed),
            settings,
            theme,
            background: None,
            palettes: PaletteCache::default(),
            time: 0.0,
            frames: 0,
            teardowns: 0,
            surface: None,
            pending: None,
            resize: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Accumulated animation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Frames drawn since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Completed teardowns (one per mount cycle).
    pub fn teardowns(&self) -> u64 {
        self.teardowns
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Handle of the frame scheduled for the next tick, if any.
    pub fn scheduled_frame(&self) -> Option<FrameToken> {
        self.pending.clone()
    }

    pub fn palette(&mut self) -> Palette {
        self.palettes.get(&self.settings)
    }

    /// Clear color used instead of the theme background, if set.
    pub fn set_background_override(&mut self, background: Option<Rgba8>) {
        self.background = background;
    }

    pub fn background(&self) -> Rgba8 {
        self.background.unwrap_or_else(|| self.theme.background())
    }

    /// Mount (or remount): cancel any in-flight frame, fit the surface to the viewport and
    /// schedule the first frame.
    ///
    /// Surface acquisition failure is fatal: the loop stays stopped and the error is returned.
    #[tracing::instrument(skip(self), fields(state = ?self.state))]
    pub fn start(&mut self) -> DriftResult<()> {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
        if self.resize.is_none() {
            self.resize = Some(self.viewport.subscribe_resize());
        }

        let layout = self.viewport.layout();
        let ratio = self.viewport.pixel_ratio();
        let fitted = match self.surface.as_mut() {
            Some(surface) => surface.resize(layout, ratio).map(|_| ()),
            None => Surface::acquire(layout, ratio).map(|s| self.surface = Some(s)),
        };
        if let Err(err) = fitted {
            tracing::error!(%err, "render surface unavailable");
            self.teardown(true);
            return Err(err);
        }

        self.pending = Some(FrameToken::default());
        self.state = LoopState::Running;
        tracing::debug!(time = self.time, "render loop running");
        Ok(())
    }

    /// Unmount. Cancels the pending frame, then detaches the resize listener, then releases the
    /// surface. Runs at most once per mount cycle; extra calls are no-ops.
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            self.teardown(true);
            tracing::debug!(frames = self.frames, "render loop stopped");
        }
    }

    fn teardown(&mut self, release_surface: bool) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
        self.resize = None;
        if release_surface {
            self.surface = None;
        }
        if self.state == LoopState::Running {
            self.teardowns += 1;
        }
        self.state = LoopState::Stopped;
    }

    /// Tear down and start again, keeping time, generator and the last drawn frame. The surface
    /// is only resized, so a snapshot taken before the next tick still shows the previous frame.
    pub fn restart(&mut self) -> DriftResult<()> {
        if self.state != LoopState::Running {
            return Ok(());
        }
        self.teardown(false);
        tracing::debug!("render loop restarting");
        self.start()
    }

    /// Swap in new settings. Takes effect on the next drawn frame.
    ///
    /// A changed value reseeds the generator and restarts a running loop; an identical value is
    /// a no-op.
    pub fn apply_settings(&mut self, settings: &Settings) -> DriftResult<()> {
        let settings = settings.clamped();
        if settings == self.settings {
            return Ok(());
        }
        self.field = FlowField::from_settings(&settings);
        self.generator = Generator::new(settings.seed);
        self.settings = settings;
        self.restart()
    }

    pub fn set_theme(&mut self, theme: Theme) -> DriftResult<()> {
        if theme == self.theme {
            return Ok(());
        }
        self.theme = theme;
        self.restart()
    }

    /// Handle one display refresh.
    pub fn tick(&mut self) -> DriftResult<FrameStatus> {
        if self.state != LoopState::Running {
            return Ok(FrameStatus::Idle);
        }
        let Some(token) = self.pending.take() else {
            return Ok(FrameStatus::Idle);
        };
        if token.is_cancelled() {
            return Ok(FrameStatus::Idle);
        }

        if self.resize.as_ref().is_some_and(ResizeSubscription::take_pending) {
            let layout = self.viewport.layout();
            let ratio = self.viewport.pixel_ratio();
            let resized = match self.surface.as_mut() {
                Some(surface) => surface.resize(layout, ratio),
                None => Err(DriftError::surface("surface released while running")),
            };
            if let Err(err) = resized {
                tracing::error!(%err, "render surface lost on resize");
                self.teardown(true);
                return Err(err);
            }
        }

        self.draw_frame()?;

        if self.state == LoopState::Running && !token.is_cancelled() {
            self.pending = Some(FrameToken::default());
        }
        Ok(FrameStatus::Drawn)
    }

    fn draw_frame(&mut self) -> DriftResult<()> {
        self.time += time_step(&self.settings);
        let palette = self.palettes.get(&self.settings);
        let background = self.background();
        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| DriftError::surface("no surface mounted"))?;
        let layers = build_layers(
            &self.settings,
            &self.field,
            &palette,
            surface.layout(),
            self.time,
            &mut self.generator,
        );
        surface.draw(background, &layers);
        self.frames += 1;
        Ok(())
    }

    /// Straight-alpha copy of the surface as last drawn.
    pub fn snapshot(&self) -> DriftResult<FrameRGBA> {
        self.surface
            .as_ref()
            .map(Surface::read_rgba8)
            .ok_or_else(|| DriftError::surface("no surface mounted"))
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame_loop.rs"]
mod tests;
