//! Pointer-driven selection of menu regions.
//!
//! Every frame the host reports which regions the camera ray crosses,
//! nearest first. Resting the ray on a region fades its group up; when the
//! fade completes the region becomes the active selection and a
//! preset-changed event is published. A selection commits at most once per
//! dwell: the lock only clears when the ray leaves every region.
//!
//! Intensity levels:
//! - `start`/`idle` (0.5): visible but not selected
//! - `target` (1.0): committed
//! - `interrupted` (0.3): a fade was cut short

use crate::animation::{AnimationHandle, FrameTweenAnimator, HighlightAnimator};
use crate::interaction::{intersect_regions, Ray, RegionId, UIAABB};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, warn};
use vrpong_core::{EventSink, HudEvent, Preset};

/// Intensity setter injected for a region's visual group.
pub type IntensitySetter = Box<dyn FnMut(f32)>;

/// Intensity levels and timing of the highlight fade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightLevels {
    /// Level a fade starts from.
    pub start: f32,
    /// Level a fade ends at; a committed region rests here.
    pub target: f32,
    /// Fade duration in seconds.
    pub duration: f32,
    /// Level the previously committed region drops back to.
    pub idle: f32,
    /// Level forced onto a region whose fade was interrupted.
    pub interrupted: f32,
}

impl Default for HighlightLevels {
    fn default() -> Self {
        Self {
            start: 0.5,
            target: 1.0,
            duration: 0.5,
            idle: 0.5,
            interrupted: 0.3,
        }
    }
}

/// A hit-testable menu region.
pub struct Region {
    group: Preset,
    bounds: UIAABB,
    setter: IntensitySetter,
}

impl Region {
    pub fn new(group: Preset, bounds: UIAABB, setter: impl FnMut(f32) + 'static) -> Self {
        Self {
            group,
            bounds,
            setter: Box::new(setter),
        }
    }

    /// Preset this region commits.
    pub fn group(&self) -> Preset {
        self.group
    }

    pub fn bounds(&self) -> &UIAABB {
        &self.bounds
    }

    fn set_intensity(&mut self, intensity: f32) {
        (self.setter)(intensity);
    }
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("group", &self.group)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

/// Where the machine stands after the last ray update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// No region under the ray.
    Idle,
    /// Ray rests on a region with no fade running and nothing committed this
    /// dwell. Only reported by animators whose runs go live on their first
    /// `advance`; [`FrameTweenAnimator`] runs are live from `start`.
    Hovering(RegionId),
    /// A fade toward the region is in flight.
    Committing(RegionId),
    /// The region was committed during the current dwell.
    Committed(RegionId),
}

/// Mutable selection state, shared with in-flight animation callbacks.
#[derive(Debug)]
struct SelectionState {
    regions: Vec<Region>,
    focused: Option<RegionId>,
    active: Option<RegionId>,
    pending: Option<AnimationHandle>,
    locked: bool,
}

impl SelectionState {
    fn set_intensity(&mut self, id: RegionId, intensity: f32) {
        if let Some(region) = self.regions.get_mut(id.0) {
            region.set_intensity(intensity);
        }
    }
}

/// The selection state machine.
pub struct SelectionMachine<A: HighlightAnimator = FrameTweenAnimator> {
    state: Rc<RefCell<SelectionState>>,
    animator: A,
    sink: Rc<dyn EventSink>,
    levels: HighlightLevels,
}

impl<A: HighlightAnimator> fmt::Debug for SelectionMachine<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionMachine")
            .field("state", &self.state.borrow())
            .field("levels", &self.levels)
            .finish_non_exhaustive()
    }
}

impl<A: HighlightAnimator> SelectionMachine<A> {
    /// Build the machine over a finalized region set. Region ids are the
    /// indices into `regions`.
    pub fn new(
        regions: Vec<Region>,
        animator: A,
        sink: Rc<dyn EventSink>,
        levels: HighlightLevels,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(SelectionState {
                regions,
                focused: None,
                active: None,
                pending: None,
                locked: false,
            })),
            animator,
            sink,
            levels,
        }
    }

    /// Mark `id` as already selected without fading or publishing, e.g. to
    /// reflect the mode the game booted in.
    pub fn with_initial_active(self, id: RegionId) -> Self {
        {
            let mut state = self.state.borrow_mut();
            if id.0 < state.regions.len() {
                state.active = Some(id);
            } else {
                warn!(region = id.0, "initial selection outside region set; ignored");
            }
        }
        self
    }

    /// Feed one frame of ray intersections, nearest first.
    pub fn on_ray_update(&mut self, hits: &[RegionId]) {
        let Some(&nearest) = hits.first() else {
            self.leave();
            return;
        };

        let animating = self.is_animating();
        {
            let state = self.state.borrow();
            if nearest.0 >= state.regions.len() {
                warn!(region = nearest.0, "ray hit an unknown region; ignoring tick");
                return;
            }
            if state.locked {
                return;
            }
            if animating && (state.focused == Some(nearest) || state.active == Some(nearest)) {
                return;
            }
        }

        if animating {
            self.interrupt();
        }
        self.begin(nearest);
    }

    /// Hit-test `ray` against the region set and feed the result.
    pub fn on_ray(&mut self, ray: &Ray) {
        let hits = {
            let state = self.state.borrow();
            intersect_regions(
                ray,
                state
                    .regions
                    .iter()
                    .enumerate()
                    .map(|(index, region)| (RegionId(index), region.bounds())),
            )
        };
        let ids: Vec<RegionId> = hits.into_iter().map(|hit| hit.region).collect();
        self.on_ray_update(&ids);
    }

    /// Advance the highlight animation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.animator.advance(dt);
    }

    pub fn focused(&self) -> Option<RegionId> {
        self.state.borrow().focused
    }

    /// Last committed region.
    pub fn active(&self) -> Option<RegionId> {
        self.state.borrow().active
    }

    /// Preset of the last committed region.
    pub fn active_group(&self) -> Option<Preset> {
        let state = self.state.borrow();
        state.active.map(|id| state.regions[id.0].group)
    }

    /// Whether a commit already fired during the current dwell.
    pub fn is_locked(&self) -> bool {
        self.state.borrow().locked
    }

    /// Whether a highlight fade is in flight.
    pub fn is_animating(&self) -> bool {
        self.state
            .borrow()
            .pending
            .is_some_and(|handle| self.animator.is_active(handle))
    }

    pub fn phase(&self) -> SelectionPhase {
        let animating = self.is_animating();
        let state = self.state.borrow();
        match state.focused {
            None => SelectionPhase::Idle,
            Some(id) if animating => SelectionPhase::Committing(id),
            Some(id) if state.locked && state.active == Some(id) => SelectionPhase::Committed(id),
            Some(id) => SelectionPhase::Hovering(id),
        }
    }

    pub fn region_count(&self) -> usize {
        self.state.borrow().regions.len()
    }

    pub fn group_of(&self, id: RegionId) -> Option<Preset> {
        self.state.borrow().regions.get(id.0).map(Region::group)
    }

    pub fn levels(&self) -> &HighlightLevels {
        &self.levels
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// The ray left every region: end the dwell and cut any fade short.
    fn leave(&mut self) {
        if self.is_animating() {
            self.interrupt();
        }
        let mut state = self.state.borrow_mut();
        state.locked = false;
        state.pending = None;
        if let Some(id) = state.focused.take() {
            debug!(region = id.0, "ray left menu");
        }
    }

    /// Cancel the fade in flight and drop its group to the interrupted level
    /// at once.
    fn interrupt(&mut self) {
        let mut state = self.state.borrow_mut();
        if let Some(handle) = state.pending.take() {
            self.animator.cancel(handle);
        }
        if let Some(id) = state.focused {
            state.set_intensity(id, self.levels.interrupted);
            debug!(region = id.0, "highlight interrupted");
        }
    }

    fn begin(&mut self, target: RegionId) {
        self.state.borrow_mut().focused = Some(target);

        let on_update = {
            let state = Rc::clone(&self.state);
            Box::new(move |intensity: f32| {
                state.borrow_mut().set_intensity(target, intensity);
            })
        };
        let on_complete = {
            let state = Rc::clone(&self.state);
            let sink = Rc::clone(&self.sink);
            let idle = self.levels.idle;
            Box::new(move || {
                let group = {
                    let mut state = state.borrow_mut();
                    if let Some(previous) = state.active.filter(|&previous| previous != target) {
                        state.set_intensity(previous, idle);
                    }
                    state.active = Some(target);
                    state.locked = true;
                    state.pending = None;
                    state.regions[target.0].group
                };
                info!(preset = %group, "preset committed");
                sink.publish(HudEvent::PresetChanged(group));
            })
        };

        let handle = self.animator.start(
            self.levels.start,
            self.levels.target,
            self.levels.duration,
            on_update,
            on_complete,
        );
        self.state.borrow_mut().pending = Some(handle);
        debug!(region = target.0, "highlight started");
    }
}
