use std::fs::{self, File};
use std::io::BufWriter;

use deskshell::apps::AppId;
use deskshell::config::ShellConfig;
use deskshell::geometry::SnapZone;
use deskshell::shell::ShellController;
use deskshell::tracing_sub;

// Installs the global subscriber, so it is the only test in this binary.
#[test]
fn lifecycle_events_reach_the_log_file_and_snapshot_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("deskshell.log");
    tracing_sub::init(Some(&log), false).unwrap();

    let mut shell = ShellController::<AppId>::new(ShellConfig::default());
    shell.open(AppId::Snake);
    shell.snap(AppId::Snake, Some(SnapZone::Left));
    // unknown ids are silent
    shell.close(AppId::Settings);

    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("opened window"));
    assert!(contents.contains("Snake"));
    assert!(!contents.contains("Settings"));

    let snapshot = dir.path().join("desk.json");
    let writer = BufWriter::new(File::create(&snapshot).unwrap());
    serde_json::to_writer_pretty(writer, &shell.snapshot()).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&snapshot).unwrap()).unwrap();
    assert_eq!(json["order"], serde_json::json!(["snake"]));
    assert_eq!(json["windows"]["snake"]["layout"]["mode"], "snapped");
    assert_eq!(json["windows"]["snake"]["layout"]["zone"], "left");
}
