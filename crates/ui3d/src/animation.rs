//! Highlight animation
//!
//! A highlight run drives one intensity value from a start level to a target
//! level over a fixed duration, reporting each intermediate value and then
//! completion through callbacks. Runs are frame driven: nothing happens until
//! the host calls [`HighlightAnimator::advance`] from its update pass, and
//! callbacks are only ever delivered from inside `advance`.

use std::fmt;
use tracing::trace;

/// Per-frame intensity callback.
pub type UpdateFn = Box<dyn FnMut(f32)>;

/// Called once when a run reaches its target.
pub type CompleteFn = Box<dyn FnOnce()>;

/// Identifies one animation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationHandle(u64);

/// Interpolation curve applied to normalized time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Quadratic ease-out: fast start, gentle landing.
    #[default]
    QuadOut,
}

impl Easing {
    /// Map `t` in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Anything that can run cancellable highlight transitions.
pub trait HighlightAnimator {
    /// Begin a run from `from` to `to` over `duration` seconds.
    fn start(
        &mut self,
        from: f32,
        to: f32,
        duration: f32,
        on_update: UpdateFn,
        on_complete: CompleteFn,
    ) -> AnimationHandle;

    /// Stop delivering callbacks for `handle`. Unknown or finished handles
    /// are ignored.
    fn cancel(&mut self, handle: AnimationHandle);

    /// Whether `handle` will still deliver callbacks.
    fn is_active(&self, handle: AnimationHandle) -> bool;

    /// Step every live run by `dt` seconds.
    fn advance(&mut self, dt: f32);
}

struct Run {
    handle: AnimationHandle,
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    on_update: UpdateFn,
    on_complete: Option<CompleteFn>,
}

impl Run {
    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }
}

/// Frame-stepped tween animator.
pub struct FrameTweenAnimator {
    easing: Easing,
    runs: Vec<Run>,
    next_handle: u64,
}

impl fmt::Debug for FrameTweenAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameTweenAnimator")
            .field("easing", &self.easing)
            .field("live_runs", &self.runs.len())
            .field("next_handle", &self.next_handle)
            .finish()
    }
}

impl Default for FrameTweenAnimator {
    fn default() -> Self {
        Self::new(Easing::default())
    }
}

impl FrameTweenAnimator {
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            runs: Vec::new(),
            next_handle: 1,
        }
    }

    /// Number of runs still delivering callbacks.
    pub fn live_runs(&self) -> usize {
        self.runs.len()
    }
}

impl HighlightAnimator for FrameTweenAnimator {
    fn start(
        &mut self,
        from: f32,
        to: f32,
        duration: f32,
        on_update: UpdateFn,
        on_complete: CompleteFn,
    ) -> AnimationHandle {
        let handle = AnimationHandle(self.next_handle);
        self.next_handle += 1;
        self.runs.push(Run {
            handle,
            from,
            to,
            duration,
            elapsed: 0.0,
            on_update,
            on_complete: Some(on_complete),
        });
        trace!(?handle, from, to, duration, "highlight run started");
        handle
    }

    fn cancel(&mut self, handle: AnimationHandle) {
        let before = self.runs.len();
        self.runs.retain(|run| run.handle != handle);
        if self.runs.len() != before {
            trace!(?handle, "highlight run cancelled");
        }
    }

    fn is_active(&self, handle: AnimationHandle) -> bool {
        self.runs.iter().any(|run| run.handle == handle)
    }

    fn advance(&mut self, dt: f32) {
        let mut finished = Vec::new();

        for run in &mut self.runs {
            run.elapsed += dt.max(0.0);
            let t = run.progress();
            let value = if t >= 1.0 {
                run.to
            } else {
                run.from + (run.to - run.from) * self.easing.apply(t)
            };
            (run.on_update)(value);
            if t >= 1.0 {
                finished.push(run.handle);
            }
        }

        // Retire finished runs before their completion callbacks fire, so a
        // callback that queries the animator sees them as inactive.
        for handle in finished {
            if let Some(index) = self.runs.iter().position(|run| run.handle == handle) {
                let mut run = self.runs.remove(index);
                trace!(?handle, "highlight run complete");
                if let Some(on_complete) = run.on_complete.take() {
                    on_complete();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<f32>>>, UpdateFn) {
        let values = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&values);
        (values, Box::new(move |v| sink.borrow_mut().push(v)))
    }

    fn counter() -> (Rc<Cell<u32>>, CompleteFn) {
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        (count, Box::new(move || sink.set(sink.get() + 1)))
    }

    #[test]
    fn nothing_happens_before_advance() {
        let mut animator = FrameTweenAnimator::default();
        let (values, on_update) = recorder();
        let (done, on_complete) = counter();
        let handle = animator.start(0.5, 1.0, 0.5, on_update, on_complete);

        assert!(animator.is_active(handle));
        assert!(values.borrow().is_empty());
        assert_eq!(done.get(), 0);
    }

    #[test]
    fn linear_run_hits_target_exactly_on_completion() {
        let mut animator = FrameTweenAnimator::new(Easing::Linear);
        let (values, on_update) = recorder();
        let (done, on_complete) = counter();
        let handle = animator.start(0.5, 1.0, 0.5, on_update, on_complete);

        for _ in 0..4 {
            animator.advance(0.125);
        }

        let values = values.borrow();
        assert_eq!(values.len(), 4);
        assert!((values[0] - 0.625).abs() < 1e-6);
        assert!((values[1] - 0.75).abs() < 1e-6);
        assert_eq!(*values.last().unwrap(), 1.0);
        assert_eq!(done.get(), 1);
        assert!(!animator.is_active(handle));
    }

    #[test]
    fn eased_values_are_monotonic() {
        let mut animator = FrameTweenAnimator::default();
        let (values, on_update) = recorder();
        let (_, on_complete) = counter();
        animator.start(0.5, 1.0, 0.5, on_update, on_complete);

        for _ in 0..40 {
            animator.advance(1.0 / 60.0);
        }

        let values = values.borrow();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*values.last().unwrap(), 1.0);
    }

    #[test]
    fn completion_fires_once() {
        let mut animator = FrameTweenAnimator::default();
        let (values, on_update) = recorder();
        let (done, on_complete) = counter();
        animator.start(0.0, 1.0, 0.1, on_update, on_complete);

        animator.advance(0.2);
        animator.advance(0.2);

        assert_eq!(done.get(), 1);
        assert_eq!(values.borrow().len(), 1);
        assert_eq!(animator.live_runs(), 0);
    }

    #[test]
    fn cancel_stops_all_callbacks() {
        let mut animator = FrameTweenAnimator::default();
        let (values, on_update) = recorder();
        let (done, on_complete) = counter();
        let handle = animator.start(0.5, 1.0, 0.5, on_update, on_complete);

        animator.advance(0.1);
        animator.cancel(handle);
        animator.advance(1.0);

        assert_eq!(values.borrow().len(), 1);
        assert_eq!(done.get(), 0);
        assert!(!animator.is_active(handle));

        // Cancelling again is harmless.
        animator.cancel(handle);
    }

    #[test]
    fn zero_duration_completes_on_next_advance() {
        let mut animator = FrameTweenAnimator::default();
        let (values, on_update) = recorder();
        let (done, on_complete) = counter();
        animator.start(0.5, 1.0, 0.0, on_update, on_complete);

        animator.advance(0.0);

        assert_eq!(*values.borrow(), vec![1.0]);
        assert_eq!(done.get(), 1);
    }

    #[test]
    fn handles_are_unique() {
        let mut animator = FrameTweenAnimator::default();
        let a = animator.start(0.0, 1.0, 1.0, Box::new(|_| {}), Box::new(|| {}));
        let b = animator.start(0.0, 1.0, 1.0, Box::new(|_| {}), Box::new(|| {}));
        assert_ne!(a, b);
        animator.cancel(a);
        assert!(!animator.is_active(a));
        assert!(animator.is_active(b));
    }

    #[test]
    fn quad_out_front_loads_progress() {
        assert_eq!(Easing::QuadOut.apply(0.0), 0.0);
        assert_eq!(Easing::QuadOut.apply(1.0), 1.0);
        assert!(Easing::QuadOut.apply(0.5) > Easing::Linear.apply(0.5));
    }
}
