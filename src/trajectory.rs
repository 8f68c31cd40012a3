//! Trajectory buffer produced by the integrator.
//!
//! Index 0 is the initial condition and index `i` is the state after `i`
//! integration steps, so insertion order is the simulated time axis.
//! Only the integrator appends; everything else reads.

use bevy::math::DVec2;

use crate::types::VehicleState;

/// Fraction of a step within which a time counts as landing on a sample.
const INDEX_SNAP: f64 = 1e-9;

/// Ordered, append-only sequence of vehicle states at a fixed time step.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    step_size: f64,
    states: Vec<VehicleState>,
}

/// Axis-aligned bounding box of the vehicle rear axle path (meters).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathBounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl PathBounds {
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }
}

impl Trajectory {
    /// Start a trajectory holding only the initial state.
    pub(crate) fn start(initial: VehicleState, step_size: f64, step_count: usize) -> Self {
        let mut states = Vec::new();
        // Best effort; the step loop grows the buffer if this fails
        let _ = states.try_reserve_exact(step_count.saturating_add(1));
        states.push(initial);
        Self { step_size, states }
    }

    pub(crate) fn push(&mut self, state: VehicleState) {
        self.states.push(state);
    }

    /// Hand the recorded states over, e.g. as partial results of a failed run.
    pub(crate) fn into_states(self) -> Vec<VehicleState> {
        self.states
    }

    /// Integration step size the trajectory was produced with (seconds).
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Number of states, always `steps() + 1`.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: a trajectory holds at least its initial state.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of integration steps taken.
    pub fn steps(&self) -> usize {
        self.states.len() - 1
    }

    pub fn initial(&self) -> &VehicleState {
        &self.states[0]
    }

    pub fn last(&self) -> &VehicleState {
        &self.states[self.states.len() - 1]
    }

    pub fn get(&self, index: usize) -> Option<&VehicleState> {
        self.states.get(index)
    }

    pub fn states(&self) -> &[VehicleState] {
        &self.states
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VehicleState> {
        self.states.iter()
    }

    /// Simulated time of sample `index` (seconds).
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 * self.step_size
    }

    /// Total simulated time covered (seconds).
    pub fn duration(&self) -> f64 {
        self.time_at(self.steps())
    }

    /// Index of the last sample at or before time `t`, clamped to the run.
    ///
    /// Times within rounding error of a sample time resolve to that sample,
    /// so `index_at(time_at(i)) == i`.
    pub fn index_at(&self, t: f64) -> usize {
        if t.is_nan() || t <= 0.0 {
            return 0;
        }
        let steps = t / self.step_size;
        let nearest = steps.round();
        let index = if (steps - nearest).abs() <= INDEX_SNAP { nearest } else { steps.floor() };
        (index as usize).min(self.steps())
    }

    /// State at time `t` for display, linearly interpolated between samples.
    ///
    /// Times outside `[0, duration]` clamp to the first/last sample. This
    /// never feeds back into integration.
    pub fn sample_at(&self, t: f64) -> VehicleState {
        let index = self.index_at(t);
        let a = self.states[index];
        if t.is_nan() {
            return a;
        }
        let Some(b) = self.states.get(index + 1) else {
            return a;
        };

        let frac = ((t - self.time_at(index)) / self.step_size).clamp(0.0, 1.0);
        let lerp = |p: f64, q: f64| p + (q - p) * frac;
        VehicleState {
            x: lerp(a.x, b.x),
            y: lerp(a.y, b.y),
            heading: lerp(a.heading, b.heading),
            hitch: lerp(a.hitch, b.hitch),
        }
    }

    /// Bounding box of the rear axle positions.
    pub fn bounds(&self) -> PathBounds {
        let first = self.initial().position();
        self.states.iter().fold(
            PathBounds {
                min: first,
                max: first,
            },
            |b, s| PathBounds {
                min: b.min.min(s.position()),
                max: b.max.max(s.position()),
            },
        )
    }

    /// All states with angles wrapped into (-π, π].
    pub fn normalized_states(&self) -> Vec<VehicleState> {
        self.states.iter().map(VehicleState::normalized).collect()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a VehicleState;
    type IntoIter = std::slice::Iter<'a, VehicleState>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_line() -> Trajectory {
        let mut t = Trajectory::start(VehicleState::default(), 0.5, 4);
        for i in 1..=4 {
            t.push(VehicleState::new(i as f64, 0.0, 0.0, 0.1 * i as f64));
        }
        t
    }

    #[test]
    fn test_start_holds_initial_only() {
        let initial = VehicleState::new(1.0, 2.0, 3.0, 4.0);
        let t = Trajectory::start(initial, 0.1, 10);
        assert_eq!(t.len(), 1);
        assert_eq!(t.steps(), 0);
        assert_eq!(*t.initial(), initial);
        assert_eq!(*t.last(), initial);
        assert_eq!(t.duration(), 0.0);
    }

    #[test]
    fn test_time_axis() {
        let t = straight_line();
        assert_eq!(t.len(), 5);
        assert_eq!(t.time_at(2), 1.0);
        assert_eq!(t.duration(), 2.0);
        assert_eq!(t.index_at(-1.0), 0);
        assert_eq!(t.index_at(0.74), 1);
        assert_eq!(t.index_at(100.0), 4);
    }

    #[test]
    fn test_index_round_trips_sample_times() {
        // 43 * 0.1 / 0.1 is just below 43 in f64
        let mut t = Trajectory::start(VehicleState::default(), 0.1, 100);
        for _ in 0..100 {
            t.push(VehicleState::default());
        }
        for i in 0..=t.steps() {
            assert_eq!(t.index_at(t.time_at(i)), i, "sample {i}");
        }
        assert_eq!(t.index_at(4.35), 43);
        assert_eq!(t.index_at(4.2999), 42);
    }

    #[test]
    fn test_start_with_huge_count_does_not_reserve_eagerly() {
        let t = Trajectory::start(VehicleState::default(), 0.1, usize::MAX);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_sample_interpolates_between_steps() {
        let t = straight_line();
        let s = t.sample_at(0.25);
        assert!((s.x - 0.5).abs() < 1e-12);
        assert!((s.hitch - 0.05).abs() < 1e-12);

        // Exact sample times return the stored state
        assert_eq!(t.sample_at(1.0), *t.get(2).unwrap());
    }

    #[test]
    fn test_sample_clamps_outside_run() {
        let t = straight_line();
        assert_eq!(t.sample_at(-3.0), *t.initial());
        assert_eq!(t.sample_at(f64::NAN), *t.initial());
        assert_eq!(t.sample_at(50.0), *t.last());
    }

    #[test]
    fn test_bounds() {
        let mut t = Trajectory::start(VehicleState::new(0.0, 1.0, 0.0, 0.0), 0.1, 2);
        t.push(VehicleState::new(-2.0, 3.0, 0.0, 0.0));
        t.push(VehicleState::new(4.0, -1.0, 0.0, 0.0));
        let b = t.bounds();
        assert_eq!(b.min, DVec2::new(-2.0, -1.0));
        assert_eq!(b.max, DVec2::new(4.0, 3.0));
        assert_eq!(b.center(), DVec2::new(1.0, 1.0));
    }
}
