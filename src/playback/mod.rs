//! Presentation side of a run: events are replayed one at a time, each as a timed
//! animation, against a sink that draws them.

pub mod animation;
pub mod queue;
pub mod sink;
pub mod speed;
pub mod terminal;

pub use animation::Pose;
pub use queue::ActionQueue;
pub use sink::{Frame, PresentationSink};
pub use speed::{Speed, SpeedChange};
