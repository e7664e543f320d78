//! HUD - the in-scene mode menu and countdown

use crate::animation::FrameTweenAnimator;
use crate::components::{group_setter, CountdownOverlay, MenuButton, Transform3D};
use crate::config::HudConfig;
use crate::font::GlyphMeasure;
use crate::interaction::{Ray, RegionId};
use crate::selection::{Region, SelectionMachine, SelectionPhase};
use glam::{Affine3A, Quat, Vec3};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, warn};
use vrpong_core::{EventSink, Preset};

/// Everything that only exists once the font is available.
struct HudScene {
    measure: Box<dyn GlyphMeasure>,
    container: Transform3D,
    buttons: Vec<MenuButton>,
    selection: SelectionMachine<FrameTweenAnimator>,
    countdown: CountdownOverlay,
}

/// The in-scene menu the player aims at to pick a game mode.
///
/// A freshly created HUD ignores ray updates and countdown calls until
/// [`Hud::setup`] has been given glyph metrics.
pub struct Hud {
    config: HudConfig,
    sink: Rc<dyn EventSink>,
    scene: Option<HudScene>,
}

impl fmt::Debug for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hud")
            .field("initialized", &self.is_initialized())
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl Hud {
    pub fn new(config: HudConfig, sink: Rc<dyn EventSink>) -> Self {
        Self {
            config,
            sink,
            scene: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.scene.is_some()
    }

    pub fn config(&self) -> &HudConfig {
        &self.config
    }

    /// Build the menu once glyph metrics are available.
    pub fn setup(&mut self, measure: Box<dyn GlyphMeasure>) {
        if self.scene.is_some() {
            warn!("HUD already set up; ignoring second setup");
            return;
        }

        let container = Transform3D::new(Vec3::from(self.config.container_position))
            .with_rotation(Quat::from_rotation_y(self.config.container_yaw));
        let to_world = container.to_affine();

        let buttons: Vec<MenuButton> = self
            .config
            .buttons
            .iter()
            .map(|spec| MenuButton::from_spec(spec, self.config.caption_size, measure.as_ref()))
            .collect();

        let regions = buttons
            .iter()
            .map(|button| {
                Region::new(
                    button.preset,
                    button.world_bounds(&to_world),
                    group_setter(button.group()),
                )
            })
            .collect();

        let mut selection = SelectionMachine::new(
            regions,
            FrameTweenAnimator::default(),
            Rc::clone(&self.sink),
            self.config.highlight,
        );
        if let Some(initial) = self.config.initial_selection {
            match buttons.iter().position(|b| b.preset == initial) {
                Some(index) => selection = selection.with_initial_active(RegionId(index)),
                None => warn!(preset = %initial, "initial selection has no button"),
            }
        }

        let countdown = CountdownOverlay::new(&self.config.countdown);

        info!(buttons = buttons.len(), "HUD ready");
        self.scene = Some(HudScene {
            measure,
            container,
            buttons,
            selection,
            countdown,
        });
    }

    /// Feed this frame's camera ray. No-op until set up.
    pub fn camera_ray_updated(&mut self, ray: &Ray) {
        match self.scene.as_mut() {
            Some(scene) => scene.selection.on_ray(ray),
            None => debug!("camera ray before HUD setup; ignored"),
        }
    }

    /// Ray from the configured camera position through `target`.
    pub fn ray_towards(&self, target: Vec3) -> Ray {
        Ray::towards(Vec3::from(self.config.camera_position), target)
    }

    /// Advance HUD animations by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if let Some(scene) = self.scene.as_mut() {
            scene.selection.tick(dt);
        }
    }

    pub fn show_countdown(&mut self, initial: &str) {
        match self.scene.as_mut() {
            Some(scene) => scene.countdown.show(initial, scene.measure.as_ref()),
            None => debug!("countdown before HUD setup; ignored"),
        }
    }

    pub fn set_countdown(&mut self, value: &str) {
        match self.scene.as_mut() {
            Some(scene) => scene.countdown.set(value, scene.measure.as_ref()),
            None => debug!("countdown before HUD setup; ignored"),
        }
    }

    pub fn hide_countdown(&mut self) {
        match self.scene.as_mut() {
            Some(scene) => scene.countdown.hide(),
            None => debug!("countdown before HUD setup; ignored"),
        }
    }

    pub fn countdown(&self) -> Option<&CountdownOverlay> {
        self.scene.as_ref().map(|scene| &scene.countdown)
    }

    pub fn buttons(&self) -> &[MenuButton] {
        match &self.scene {
            Some(scene) => &scene.buttons,
            None => &[],
        }
    }

    /// Current intensity of the button bound to `preset`.
    pub fn button_opacity(&self, preset: Preset) -> Option<f32> {
        self.buttons()
            .iter()
            .find(|button| button.preset == preset)
            .map(MenuButton::opacity)
    }

    /// World-space center of the button bound to `preset`.
    pub fn button_center(&self, preset: Preset) -> Option<Vec3> {
        let scene = self.scene.as_ref()?;
        let to_world: Affine3A = scene.container.to_affine();
        scene
            .buttons
            .iter()
            .find(|button| button.preset == preset)
            .map(|button| button.world_bounds(&to_world).center())
    }

    /// Last committed preset.
    pub fn selected_preset(&self) -> Option<Preset> {
        self.scene
            .as_ref()
            .and_then(|scene| scene.selection.active_group())
    }

    pub fn phase(&self) -> SelectionPhase {
        self.scene
            .as_ref()
            .map_or(SelectionPhase::Idle, |scene| scene.selection.phase())
    }

    /// Preset of the region the phase refers to.
    pub fn phase_preset(&self) -> Option<Preset> {
        let scene = self.scene.as_ref()?;
        match scene.selection.phase() {
            SelectionPhase::Idle => None,
            SelectionPhase::Hovering(id)
            | SelectionPhase::Committing(id)
            | SelectionPhase::Committed(id) => scene.selection.group_of(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedAdvance;
    use vrpong_core::{EventBus, HudEvent};

    fn ready_hud() -> (Hud, std::sync::mpsc::Receiver<HudEvent>) {
        let bus = Rc::new(EventBus::new());
        let rx = bus.subscribe();
        let mut hud = Hud::new(HudConfig::default(), bus);
        hud.setup(Box::new(FixedAdvance::default()));
        (hud, rx)
    }

    #[test]
    fn calls_before_setup_are_ignored() {
        let bus = Rc::new(EventBus::new());
        let rx = bus.subscribe();
        let mut hud = Hud::new(HudConfig::default(), bus);

        let ray = hud.ray_towards(Vec3::new(0.0, 1.0, 1.0));
        hud.camera_ray_updated(&ray);
        hud.tick(1.0);
        hud.show_countdown("3");
        hud.set_countdown("2");
        hud.hide_countdown();

        assert!(!hud.is_initialized());
        assert!(hud.buttons().is_empty());
        assert!(hud.countdown().is_none());
        assert_eq!(hud.phase(), SelectionPhase::Idle);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn container_half_turn_mirrors_buttons() {
        let (hud, _rx) = ready_hud();
        let normal = hud.button_center(Preset::Normal).unwrap();
        let insane = hud.button_center(Preset::Insane).unwrap();
        assert!((normal - Vec3::new(0.7, 1.0, 1.0)).length() < 1e-4);
        assert!((insane - Vec3::new(-0.7, 1.0, 1.0)).length() < 1e-4);
    }

    #[test]
    fn aiming_at_a_button_focuses_it() {
        let (mut hud, _rx) = ready_hud();
        let target = hud.button_center(Preset::PingPong).unwrap();
        let ray = hud.ray_towards(target);
        hud.camera_ray_updated(&ray);
        assert_eq!(hud.phase_preset(), Some(Preset::PingPong));
        assert!(matches!(hud.phase(), SelectionPhase::Committing(_)));
    }

    #[test]
    fn second_setup_is_ignored() {
        let (mut hud, _rx) = ready_hud();
        hud.setup(Box::new(FixedAdvance::new(0.1, 0.1)));
        assert_eq!(hud.buttons().len(), 3);
    }

    #[test]
    fn initial_selection_from_config() {
        let bus = Rc::new(EventBus::new());
        let config = HudConfig {
            initial_selection: Some(Preset::Insane),
            ..HudConfig::default()
        };
        let mut hud = Hud::new(config, bus);
        hud.setup(Box::new(FixedAdvance::default()));
        assert_eq!(hud.selected_preset(), Some(Preset::Insane));
    }

    #[test]
    fn countdown_is_shown_and_hidden() {
        let (mut hud, _rx) = ready_hud();
        hud.show_countdown("3");
        assert!(hud.countdown().unwrap().is_visible());
        hud.set_countdown("2");
        assert_eq!(hud.countdown().unwrap().text().text(), "2");
        hud.hide_countdown();
        assert!(!hud.countdown().unwrap().is_visible());
    }
}
