pub mod angle_math;
pub mod config;
pub mod messages;
pub mod outcome;
pub mod participation;
pub mod quota;
pub mod spin;
pub mod wheel;

pub use config::{WheelConfig, WheelVariant};
pub use spin::{Attempt, SpinController, SpinResult, Tick};
pub use wheel::{Segment, Wheel};
