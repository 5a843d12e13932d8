//! Audio output backends for chordwave.

mod cpal_backend;
mod manual;
mod traits;

pub use cpal_backend::CpalOutput;
pub use manual::ManualOutput;
pub use traits::{AudioError, AudioOutput, SharedRenderer};
