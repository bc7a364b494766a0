use serde::{Deserialize, Serialize};

/// Seconds for one full traversal starting from rest at offset zero.
pub const BASE_DURATION: f64 = 60.0;

/// Time left to traverse the remaining distance at the baseline linear
/// speed. Resuming from `track_offset` therefore looks exactly like a fresh
/// run that had already reached that point, with no change in speed.
///
/// Derived for strictly linear motion. An eased profile would need this
/// re-derived from the easing's inverse; do not reuse the linear formula.
pub fn remaining_duration(track_offset: f64, distance: f64, base_duration: f64) -> f64 {
    if distance <= 0.0 {
        return 0.0;
    }
    let progress = (track_offset.abs() / distance).clamp(0.0, 1.0);
    base_duration * (1.0 - progress)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Running,
    Paused,
}

/// Read-only snapshot for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarouselState {
    /// Pixels; zero or negative, never below `-distance`.
    pub track_offset: f64,
    /// Seconds left in the current traversal.
    pub remaining: f64,
    pub paused: bool,
}

/// Loops a duplicated item strip so the hand-off from the duplicate back to
/// the original is invisible: offset `-distance` shows the same pixels as
/// offset `0`, so wrapping there is seamless.
///
/// `track_offset` has exactly one writer, [`tick`](Self::tick), plus the
/// pause/resume transitions, which only freeze and unfreeze it.
#[derive(Debug, Clone)]
pub struct CarouselAnimator {
    track_offset: f64,
    container_width: f64,
    content_width: f64,
    base_duration: f64,
    phase: Phase,
}

impl CarouselAnimator {
    /// `content_width` is the duplicated strip's full scrollable width.
    /// When the content already fits (`content <= container`, including the
    /// zero-items case) the animator is inert: it never moves.
    pub fn new(container_width: f64, content_width: f64, base_duration: f64) -> Self {
        Self {
            track_offset: 0.0,
            container_width,
            content_width,
            base_duration: base_duration.max(1e-6),
            phase: Phase::Running,
        }
    }

    /// Total traversable distance. Zero when the content fits.
    pub fn distance(&self) -> f64 {
        (self.content_width - self.container_width).max(0.0)
    }

    pub fn track_offset(&self) -> f64 {
        self.track_offset
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase == Phase::Running && self.distance() > 0.0
    }

    /// Fraction of the traversal already covered, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let d = self.distance();
        if d <= 0.0 {
            0.0
        } else {
            (self.track_offset.abs() / d).clamp(0.0, 1.0)
        }
    }

    pub fn remaining_duration(&self) -> f64 {
        remaining_duration(self.track_offset, self.distance(), self.base_duration)
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            track_offset: self.track_offset,
            remaining: self.remaining_duration(),
            paused: self.phase == Phase::Paused,
        }
    }

    /// Pointer-enter: freeze the offset where it is.
    pub fn pause(&mut self) {
        self.phase = Phase::Paused;
    }

    /// Pointer-leave: motion continues from the frozen offset, not from the
    /// start.
    pub fn resume(&mut self) {
        self.phase = Phase::Running;
    }

    /// Advance the animation by `dt` seconds of linear motion. Crossing
    /// `-distance` wraps back toward zero carrying the overshoot, so the
    /// loop never stutters on a long frame.
    pub fn tick(&mut self, dt: f64) {
        if !self.is_animating() || dt <= 0.0 {
            return;
        }
        let d = self.distance();
        let speed = d / self.base_duration;
        let mut next = self.track_offset - speed * dt;
        while next <= -d {
            next += d;
        }
        self.track_offset = next;
    }

    /// Container or content resized mid-animation. Recomputes the distance
    /// and keeps the current offset, clamped into the new range; the strip
    /// must not snap back to the start.
    pub fn remeasure(&mut self, container_width: f64, content_width: f64) {
        self.container_width = container_width;
        self.content_width = content_width;
        let d = self.distance();
        if d <= 0.0 {
            self.track_offset = 0.0;
        } else {
            self.track_offset = self.track_offset.clamp(-d, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn resume_preserves_position_and_speed() {
        let mut carousel = CarouselAnimator::new(500.0, 1500.0, BASE_DURATION);
        assert!(approx(carousel.distance(), 1000.0));

        // Run 15% of the way: 0.15 * 60s at distance 1000 → offset -150.
        carousel.tick(9.0);
        assert!(approx(carousel.track_offset(), -150.0));

        carousel.pause();
        carousel.tick(100.0); // time passes while hovered
        assert!(approx(carousel.track_offset(), -150.0));

        carousel.resume();
        assert!(approx(carousel.track_offset(), -150.0));
        assert!(approx(carousel.remaining_duration(), BASE_DURATION * 0.85));
    }

    #[test]
    fn fitting_content_never_animates() {
        let mut carousel = CarouselAnimator::new(800.0, 600.0, BASE_DURATION);
        assert!(!carousel.is_animating());
        carousel.tick(5.0);
        assert!(approx(carousel.track_offset(), 0.0));
        assert!(approx(carousel.remaining_duration(), 0.0));
    }

    #[test]
    fn empty_strip_never_animates() {
        let mut carousel = CarouselAnimator::new(800.0, 0.0, BASE_DURATION);
        assert!(!carousel.is_animating());
        carousel.tick(5.0);
        assert!(approx(carousel.track_offset(), 0.0));
    }

    #[test]
    fn wrap_carries_the_overshoot() {
        let mut carousel = CarouselAnimator::new(500.0, 1500.0, 10.0);
        // speed = 100 px/s; 10.5 s covers the full 1000 plus 50 more.
        carousel.tick(10.5);
        assert!(approx(carousel.track_offset(), -50.0));
    }

    #[test]
    fn reaching_the_end_exactly_wraps_to_zero() {
        let mut carousel = CarouselAnimator::new(500.0, 1500.0, 10.0);
        carousel.tick(10.0);
        assert!(approx(carousel.track_offset(), 0.0));
    }

    #[test]
    fn remeasure_keeps_the_current_offset() {
        let mut carousel = CarouselAnimator::new(500.0, 1500.0, 10.0);
        carousel.tick(4.0); // -400
        carousel.remeasure(600.0, 1500.0); // distance shrinks to 900
        assert!(approx(carousel.track_offset(), -400.0));

        carousel.remeasure(1400.0, 1500.0); // distance shrinks below |offset|
        assert!(approx(carousel.track_offset(), -100.0));
    }

    #[test]
    fn remeasure_to_fitting_content_goes_inert() {
        let mut carousel = CarouselAnimator::new(500.0, 1500.0, 10.0);
        carousel.tick(4.0);
        carousel.remeasure(1600.0, 1500.0);
        assert!(!carousel.is_animating());
        assert!(approx(carousel.track_offset(), 0.0));
    }

    #[test]
    fn remaining_duration_is_linear_in_progress() {
        assert!(approx(remaining_duration(0.0, 1000.0, 60.0), 60.0));
        assert!(approx(remaining_duration(-150.0, 1000.0, 60.0), 51.0));
        assert!(approx(remaining_duration(-1000.0, 1000.0, 60.0), 0.0));
        assert!(approx(remaining_duration(-10.0, 0.0, 60.0), 0.0));
    }

    #[test]
    fn paused_snapshot_reports_frozen_state() {
        let mut carousel = CarouselAnimator::new(500.0, 1500.0, BASE_DURATION);
        carousel.tick(9.0);
        carousel.pause();
        let state = carousel.state();
        assert!(state.paused);
        assert!(approx(state.track_offset, -150.0));
        assert!(approx(state.remaining, BASE_DURATION * 0.85));
    }
}
