use vrpong_core::{Preset, SimTick};
use vrpong_testkit::{EventRecord, JsonlSink, RecordingSink};
use vrpong_ui3d::{FixedAdvance, Hud, HudConfig};

#[test]
fn committed_presets_can_be_written_to_event_log() {
    let path = std::env::temp_dir().join("vrpong-eventlog.jsonl");
    let mut sink = JsonlSink::create(&path).expect("can create temp log");

    let recorder = RecordingSink::shared();
    let mut hud = Hud::new(HudConfig::default(), recorder.clone());
    hud.setup(Box::new(FixedAdvance::default()));

    let target = hud.button_center(Preset::Insane).expect("insane button");
    let ray = hud.ray_towards(target);
    let mut tick = SimTick::ZERO;
    for _ in 0..40 {
        tick = tick.advance(1);
        hud.camera_ray_updated(&ray);
        hud.tick(1.0 / 60.0);
    }

    let events = recorder.events();
    assert_eq!(events.len(), 1);
    sink.write(&EventRecord::from_event(tick, &events[0]))
        .expect("can write event");

    let log = std::fs::read_to_string(&path).expect("can read log back");
    assert_eq!(
        log.trim(),
        r#"{"tick":40,"kind":"preset_changed","payload":"Insane"}"#
    );
}

#[test]
fn shipped_config_is_valid() {
    let config = HudConfig::load_from_path(std::path::Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/config/hud.toml"
    )));
    assert!(config.validate().is_ok());
    assert_eq!(config, HudConfig::default());
}
