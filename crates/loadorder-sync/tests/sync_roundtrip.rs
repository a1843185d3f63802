//! End-to-end scenarios for plugin list synchronization on real profile
//! directories.

use loadorder_core::traits::{GameInfo, ModResolver, PluginRegistry, ReportSink};
use loadorder_core::{MemoryRegistry, ModId, PluginName, PluginState};
use loadorder_sync::{ACTIVE_FILE, GamePluginSync, ORDER_FILE};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

struct FakeGame {
    primary: Vec<PluginName>,
    data_dir: PathBuf,
}

impl GameInfo for FakeGame {
    fn primary_plugins(&self) -> Vec<PluginName> {
        self.primary.clone()
    }

    fn data_directory(&self) -> PathBuf {
        self.data_dir.clone()
    }
}

struct NoMods;

impl ModResolver for NoMods {
    fn mod_owning(&self, _origin: &ModId) -> Option<PathBuf> {
        None
    }
}

struct SilentReport;

impl ReportSink for SilentReport {
    fn report_error(&self, _message: &str) {}
}

/// Profile fixture: a profile dir, a data dir and a synchronizer with
/// primary plugins `A.esm`, `B.esm`.
struct Fixture {
    _tmp: TempDir,
    profile: PathBuf,
    data_dir: PathBuf,
    sync: GamePluginSync,
}

impl Fixture {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let profile = tmp.path().join("profile");
        let data_dir = tmp.path().join("data");
        fs::create_dir(&profile).unwrap();
        fs::create_dir(&data_dir).unwrap();

        let sync = GamePluginSync::new(
            &profile,
            Box::new(FakeGame {
                primary: vec![PluginName::new("A.esm"), PluginName::new("B.esm")],
                data_dir: data_dir.clone(),
            }),
            Box::new(NoMods),
            Box::new(SilentReport),
        );

        Self {
            _tmp: tmp,
            profile,
            data_dir,
            sync,
        }
    }

    /// Creates a module file in the data directory with an mtime offset
    /// (seconds) from now.
    fn install(&self, name: &str, offset_secs: i64) {
        let path = self.data_dir.join(name);
        File::create(&path).unwrap();
        let mtime = if offset_secs >= 0 {
            SystemTime::now() + Duration::from_secs(offset_secs.unsigned_abs())
        } else {
            SystemTime::now() - Duration::from_secs(offset_secs.unsigned_abs())
        };
        set_mtime(&path, mtime);
    }
}

fn set_mtime(path: &Path, mtime: SystemTime) {
    OpenOptions::new()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}

fn registry_with(names: &[&str]) -> MemoryRegistry {
    let mut registry = MemoryRegistry::new();
    for name in names {
        registry.insert(PluginName::new(*name), PluginState::Inactive, None);
    }
    registry
}

fn as_strings(order: &[PluginName]) -> Vec<&str> {
    order.iter().map(PluginName::as_str).collect()
}

#[test]
fn derived_order_with_active_set_assigns_expected_states() {
    let mut fixture = Fixture::new();
    fixture.install("A.esm", -4000);
    fixture.install("B.esm", -3500);
    fixture.install("C.esp", -3000);
    fixture.install("D.esp", -2000);
    fs::write(
        fixture.profile.join(ACTIVE_FILE),
        "# generated\r\nA.esm\r\nC.esp\r\n",
    )
    .unwrap();

    let mut registry = registry_with(&["A.esm", "B.esm", "C.esp", "D.esp"]);
    let order = fixture.sync.read(&mut registry);

    assert_eq!(as_strings(&order), vec!["A.esm", "B.esm", "C.esp", "D.esp"]);
    assert_eq!(registry.state(&PluginName::new("A.esm")), PluginState::Active);
    assert_eq!(registry.state(&PluginName::new("B.esm")), PluginState::Active);
    assert_eq!(registry.state(&PluginName::new("C.esp")), PluginState::Active);
    assert_eq!(registry.state(&PluginName::new("D.esp")), PluginState::Inactive);
}

#[test]
fn explicit_order_pins_primary_in_front() {
    let mut fixture = Fixture::new();
    fs::write(
        fixture.profile.join(ORDER_FILE),
        "# generated\r\nD.esp\r\nC.esp\r\na.esm\r\n",
    )
    .unwrap();

    let mut registry = registry_with(&["A.esm", "B.esm", "C.esp", "D.esp"]);
    let order = fixture.sync.read(&mut registry);

    assert_eq!(as_strings(&order), vec!["A.esm", "B.esm", "D.esp", "C.esp"]);
}

#[test]
fn write_then_read_round_trips() {
    let mut fixture = Fixture::new();
    fixture.install("A.esm", -5000);
    fixture.install("B.esm", -4500);
    fixture.install("New.esp", -1000);
    fixture.install("Old.esp", -4000);

    let mut registry = registry_with(&["A.esm", "B.esm", "New.esp", "Old.esp"]);
    let first = fixture.sync.read(&mut registry);
    assert_eq!(as_strings(&first), vec!["A.esm", "B.esm", "Old.esp", "New.esp"]);

    registry.set_state(&PluginName::new("Old.esp"), PluginState::Active);
    fixture.sync.write(&registry).unwrap();

    // a second read now goes through the freshly written loadorder.txt
    let second = fixture.sync.read(&mut registry);
    assert_eq!(as_strings(&second), as_strings(&first));
    assert_eq!(
        registry.state(&PluginName::new("Old.esp")),
        PluginState::Active
    );
    assert_eq!(
        registry.state(&PluginName::new("New.esp")),
        PluginState::Inactive
    );
}

#[test]
fn redundant_write_leaves_files_untouched() {
    let mut fixture = Fixture::new();
    fixture.install("A.esm", -5000);
    fixture.install("B.esm", -4500);
    fixture.install("Mod.esp", -1000);

    let mut registry = registry_with(&["A.esm", "B.esm", "Mod.esp"]);
    fixture.sync.read(&mut registry);
    fixture.sync.write(&registry).unwrap();

    let order_path = fixture.profile.join(ORDER_FILE);
    let active_path = fixture.profile.join(ACTIVE_FILE);
    // age the files so a timestamp change is observable
    let old = SystemTime::now() - Duration::from_secs(9000);
    set_mtime(&order_path, old);
    set_mtime(&active_path, old);
    let order_mtime = fs::metadata(&order_path).unwrap().modified().unwrap();
    let active_mtime = fs::metadata(&active_path).unwrap().modified().unwrap();

    fixture.sync.write(&registry).unwrap();

    assert_eq!(
        fs::metadata(&order_path).unwrap().modified().unwrap(),
        order_mtime
    );
    assert_eq!(
        fs::metadata(&active_path).unwrap().modified().unwrap(),
        active_mtime
    );
}

#[test]
fn external_active_edit_triggers_rederivation() {
    let mut fixture = Fixture::new();
    fixture.install("A.esm", -5000);
    fixture.install("B.esm", -4500);
    fixture.install("Early.esp", -4000);
    fixture.install("Late.esp", -1000);

    let mut registry = registry_with(&["A.esm", "B.esm", "Early.esp", "Late.esp"]);
    fixture.sync.read(&mut registry);
    fixture.sync.write(&registry).unwrap();

    // an external tool rewrites plugins.txt without touching loadorder.txt
    let active_path = fixture.profile.join(ACTIVE_FILE);
    fs::write(&active_path, "# external tool\r\nLate.esp\r\n").unwrap();
    set_mtime(&active_path, SystemTime::now() + Duration::from_secs(3600));
    set_mtime(
        &fixture.profile.join(ORDER_FILE),
        SystemTime::now() - Duration::from_secs(3600),
    );

    let order = fixture.sync.read(&mut registry);

    // order re-derived from module times, active flags from the edited file
    assert_eq!(
        as_strings(&order),
        vec!["A.esm", "B.esm", "Early.esp", "Late.esp"]
    );
    assert_eq!(
        registry.state(&PluginName::new("Late.esp")),
        PluginState::Active
    );
    assert_eq!(
        registry.state(&PluginName::new("Early.esp")),
        PluginState::Inactive
    );
}

#[test]
fn external_order_edit_wins_over_stale_active() {
    let mut fixture = Fixture::new();
    fixture.install("A.esm", -5000);
    fixture.install("B.esm", -4500);
    fixture.install("X.esp", -4000);
    fixture.install("Y.esp", -3000);

    let mut registry = registry_with(&["A.esm", "B.esm", "X.esp", "Y.esp"]);
    fixture.sync.read(&mut registry);
    fixture.sync.write(&registry).unwrap();

    // external tool reorders loadorder.txt
    let order_path = fixture.profile.join(ORDER_FILE);
    fs::write(&order_path, "# external tool\r\nY.esp\r\nX.esp\r\n").unwrap();
    set_mtime(&order_path, SystemTime::now() + Duration::from_secs(3600));

    let order = fixture.sync.read(&mut registry);
    assert_eq!(as_strings(&order), vec!["A.esm", "B.esm", "Y.esp", "X.esp"]);
}

#[test]
fn missing_records_survive_reconciliation() {
    let mut fixture = Fixture::new();
    fixture.install("A.esm", -5000);
    fixture.install("B.esm", -4500);
    fs::write(
        fixture.profile.join(ACTIVE_FILE),
        "# generated\r\nGone.esp\r\n",
    )
    .unwrap();

    let mut registry = registry_with(&["A.esm", "B.esm"]);
    registry.insert(PluginName::new("Gone.esp"), PluginState::Missing, None);

    fixture.sync.read(&mut registry);

    assert_eq!(
        registry.state(&PluginName::new("Gone.esp")),
        PluginState::Missing
    );
}
