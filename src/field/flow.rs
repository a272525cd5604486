use crate::settings::model::Settings;

/// Frequency constants of the flow field, derived once per [`Settings`] value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowField {
    /// Primary spatial frequency (from `complexity`).
    pub spatial: f64,
    /// Secondary spatial frequency (from `density`).
    pub secondary: f64,
    /// Temporal frequency (from `speed`).
    pub temporal: f64,
}

impl FlowField {
    const JITTER: f64 = 0.35;

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            spatial: 1.5 + settings.complexity * 6.0,
            secondary: 0.75 + settings.density * 3.0,
            temporal: 0.25 + settings.speed * 1.75,
        }
    }

    /// Scalar deflection in `[-1, 1]` at a normalized grid coordinate.
    ///
    /// `draw` is one value from the scene generator; it adds a small perturbation so that
    /// identical settings with different seeds still diverge.
    pub fn sample(&self, x_norm: f64, y_norm: f64, t: f64, draw: f64) -> f64 {
        let w = self.temporal;
        let a = (x_norm * self.spatial + t * w).sin() + (y_norm * self.spatial - t * w * 0.8).cos();
        let b = 0.5 * ((x_norm + y_norm) * self.secondary + t * w * 0.5).sin();
        let jitter = (draw - 0.5) * Self::JITTER;
        (a + b + jitter).sin()
    }

    /// Screen-space direction for a field value: the scalar is read as a fraction of a full turn.
    pub fn direction(value: f64) -> (f64, f64) {
        let angle = value * std::f64::consts::TAU;
        (angle.cos(), angle.sin())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/flow.rs"]
mod tests;
