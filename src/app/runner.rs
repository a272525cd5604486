use std::str::FromStr;

use crate::{
    app::interaction::{KeyOutcome, MountedSession},
    foundation::error::DriftResult,
    render::{clock::FrameClock, frame_loop::FrameStatus},
};

/// A key press scheduled before a given frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub frame: u64,
    pub key: char,
}

impl FromStr for KeyEvent {
    type Err = String;

    /// `FRAME:KEY`, e.g. `30:r`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (frame, key) = s
            .split_once(':')
            .ok_or_else(|| format!("expected FRAME:KEY, got \"{s}\""))?;
        let frame = frame
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("invalid frame \"{frame}\": {e}"))?;
        let mut chars = key.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) => Ok(Self { frame, key }),
            _ => Err(format!("expected a single key character, got \"{key}\"")),
        }
    }
}

/// Summary of a headless run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunReport {
    pub frames_drawn: u64,
    /// Accumulated animation time when the run ended.
    pub time: f64,
    /// Effects of scripted keys, tagged with the frame they fired before.
    pub outcomes: Vec<(u64, KeyOutcome)>,
}

/// Drives a mounted session frame by frame, replaying a key script.
#[derive(Debug)]
pub struct Runner<C> {
    clock: C,
    script: Vec<KeyEvent>,
}

impl<C: FrameClock> Runner<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            script: Vec::new(),
        }
    }

    /// Keys are replayed in frame order; keys sharing a frame keep their given order.
    pub fn with_script(mut self, mut script: Vec<KeyEvent>) -> Self {
        script.sort_by_key(|e| e.frame);
        self.script = script;
        self
    }

    /// Run up to `frames` frames. Keys for frame `n` are handled right before frame `n` is drawn.
    /// Stops early if the loop stops.
    #[tracing::instrument(skip(self, session))]
    pub fn run(&mut self, session: &mut MountedSession<'_>, frames: u64) -> DriftResult<RunReport> {
        let mut report = RunReport::default();
        let mut next_key = 0;

        for frame in 0..frames {
            self.clock.wait_for_frame();

            while let Some(event) = self.script.get(next_key).filter(|e| e.frame == frame) {
                next_key += 1;
                if let Some(outcome) = session.handle_key(event.key)? {
                    report.outcomes.push((frame, outcome));
                }
            }

            match session.tick()? {
                FrameStatus::Drawn => report.frames_drawn += 1,
                FrameStatus::Idle => {
                    tracing::debug!(frame, "render loop idle, ending run");
                    break;
                }
            }
        }

        report.time = session.render().time();
        Ok(report)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/runner.rs"]
mod tests;
