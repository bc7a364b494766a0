//! The auto-scroll showcase animator.
//!
//! Drives a horizontally duplicated item strip end to end in a seamless
//! loop. The math is pure and tick-driven: the host owns the clock and the
//! visual property, this crate owns the state machine.

pub mod animator;

pub use animator::{remaining_duration, CarouselAnimator, CarouselState, Phase, BASE_DURATION};
