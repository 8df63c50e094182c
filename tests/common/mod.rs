// Shared test helpers for integration tests
#![allow(dead_code)]

use sim_harness::config::HarnessConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// A stand-in for the simulator. It prints `RandomSeed = <seed>` when a seed
/// is passed, then the contents of `<artifact>.out` next to the script, where
/// `<artifact>` is the value of `-pf` or `-cf`. If `<artifact>.exit` exists
/// its content is used as the exit code.
pub const FAKE_SIMULATOR: &str = r#"#!/bin/sh
dir="$(dirname "$0")"
key=""
seed=""
while [ $# -gt 0 ]; do
  case "$1" in
    -pf|-cf) key="$2"; shift ;;
    -seed) seed="$2"; shift ;;
  esac
  shift
done
if [ -n "$seed" ]; then echo "RandomSeed = $seed"; fi
if [ -f "$dir/$key.out" ]; then cat "$dir/$key.out"; fi
if [ -f "$dir/$key.exit" ]; then exit "$(cat "$dir/$key.exit")"; fi
exit 0
"#;

/// Output of a clean acceptance run: seed 42, 3 delivered, 2.0 real seconds.
pub const STANDARD_OUTPUT: &str = "\
Simulator starting
RandomSeed = 42
Delivered: 3
Stranded: 1
Total: 4
Runtime monitor generated 7 warnings
Simulation finished: 3600.0s simulation seconds, 2.0 real seconds
";

/// Output of an acceptance run that aborted on a safety violation.
pub const SAFETY_OUTPUT: &str = "\
RandomSeed = 42
[Safety] @12.5: door forced
Delivered: 3
Stranded: 1
Total: 4
1.5 real seconds
";

/// Output of a complete verbose acceptance run.
pub const VERBOSE_OUTPUT: &str = "\
RandomSeed = 7
Delivered: 10
Stranded: 0
Total: 10
Average_delivery_time: 10.5
Maximum_delivery_time: 20.25
Delivery_performance_score: 1.5
Average_satisfaction_score: 80.5
Min_satisfaction_score: 40.0
Satisfaction_performance_score: 0.75
Proj11RuntimeMonitor generated 4 warnings
Stopped at floor with no calls = 1
Doors opened at floor with no calls = 2
Lantern not lit when doors opened with calls for another floor = 0
Lantern changed direction while doors open = 0
Car serviced a call in a different direction than lantern = 0
Drive did not use fast speed = 1
Doors nudged before reversal = 0
3600.0s simulation seconds
2.5 real seconds
";

/// Writes an executable shell script.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, body).expect("Failed to write script");
    let mut permissions = fs::metadata(&path).expect("Failed to stat script").permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&path, permissions).expect("Failed to chmod script");
    path
}

/// A temporary workspace holding the fake simulator, its canned outputs and
/// a manifest.
pub struct Workspace {
    pub dir: TempDir,
    pub simulator: PathBuf,
}

impl Workspace {
    #[cfg(unix)]
    pub fn new() -> Self {
        let dir = tempdir().expect("Failed to create temporary directory");
        let simulator = write_script(dir.path(), "fake-java", FAKE_SIMULATOR);
        Self { dir, simulator }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Registers the text printed for the artifact `key` (e.g. `foo.pass`).
    pub fn output(&self, key: &str, text: &str) -> &Self {
        fs::write(self.path().join(format!("{key}.out")), text).expect("Failed to write output");
        self
    }

    /// Like [`Workspace::output`], for output that is not valid UTF-8.
    pub fn output_bytes(&self, key: &str, bytes: &[u8]) -> &Self {
        fs::write(self.path().join(format!("{key}.out")), bytes).expect("Failed to write output");
        self
    }

    pub fn exit_code(&self, key: &str, code: i32) -> &Self {
        fs::write(self.path().join(format!("{key}.exit")), code.to_string())
            .expect("Failed to write exit code");
        self
    }

    pub fn manifest(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).expect("Failed to write manifest");
        path
    }

    /// A configuration that launches the fake simulator.
    pub fn config(&self) -> HarnessConfig {
        HarnessConfig {
            java_path: self.simulator.to_string_lossy().into_owned(),
            classpath: self.path().to_string_lossy().into_owned(),
            ..HarnessConfig::default()
        }
    }

    /// Writes `Harness.toml` into the workspace for CLI tests.
    pub fn write_config_file(&self, config: &HarnessConfig) -> PathBuf {
        let path = self.path().join("Harness.toml");
        fs::write(&path, config.to_toml().expect("Failed to serialize config"))
            .expect("Failed to write Harness.toml");
        path
    }
}
