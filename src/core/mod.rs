pub mod coach;
pub mod config;
pub mod estimator;
pub mod guide;
pub mod metronome;

// Hand-placement classification
pub mod placement;
