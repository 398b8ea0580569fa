//! ---
//! hostsim_section: "11-simulation"
//! hostsim_subsection: "module"
//! hostsim_type: "source"
//! hostsim_scope: "code"
//! hostsim_description: "Random walk distributions driving simulated field values."
//! hostsim_version: "v0.1.0"
//! hostsim_owner: "tbd"
//! ---
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Normally distributed step size.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    noise: Normal<f64>,
}

impl Step {
    /// # Panics
    ///
    /// When `std_dev` is negative or not finite.
    pub fn normal(mean: f64, std_dev: f64) -> Self {
        Self {
            noise: Normal::new(mean, std_dev).expect("step std_dev must be finite and non-negative"),
        }
    }

    /// Build a step from `(mean, std_dev)` pairs kept in constant tables.
    pub fn from_pair((mean, std_dev): (f64, f64)) -> Self {
        Self::normal(mean, std_dev)
    }

    pub fn mean(&self) -> f64 {
        self.noise.mean()
    }

    pub fn std_dev(&self) -> f64 {
        self.noise.std_dev()
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.noise.sample(rng)
    }
}

/// State machine for a single simulated field.
#[derive(Debug, Clone)]
pub enum RandomWalk {
    /// Walks by `step` and stays inside `[min, max]`.
    Clamped {
        min: f64,
        max: f64,
        step: Step,
        state: f64,
    },
    /// Walks by the absolute value of `step`; never decreases.
    Monotonic { step: Step, state: f64 },
    Constant(f64),
}

impl RandomWalk {
    pub fn clamped(min: f64, max: f64, step: Step, state: f64) -> Self {
        RandomWalk::Clamped {
            min,
            max,
            step,
            state: state.clamp(min, max),
        }
    }

    /// Clamped walk starting at a uniformly drawn point of its range.
    pub fn clamped_from<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64, step: Step) -> Self {
        let state = if max > min { rng.gen_range(min..=max) } else { min };
        Self::clamped(min, max, step, state)
    }

    pub fn monotonic(step: Step, state: f64) -> Self {
        RandomWalk::Monotonic { step, state }
    }

    pub fn constant(value: f64) -> Self {
        RandomWalk::Constant(value)
    }

    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self {
            RandomWalk::Clamped {
                min,
                max,
                step,
                state,
            } => {
                *state = (*state + step.sample(rng)).clamp(*min, *max);
            }
            RandomWalk::Monotonic { step, state } => {
                *state += step.sample(rng).abs();
            }
            RandomWalk::Constant(_) => {}
        }
    }

    pub fn get(&self) -> f64 {
        match self {
            RandomWalk::Clamped { state, .. } | RandomWalk::Monotonic { state, .. } => *state,
            RandomWalk::Constant(value) => *value,
        }
    }
}
