use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

#[allow(dead_code)]
pub const CRM_CSV: &str = "\
name,phone_number,company
Ada Lovelace,001-431-560-3386,Analytical Engines
Grace Hopper, 0044 20 7946 0958 ,COBOL Inc
";

#[allow(dead_code)]
pub fn run_callbrief(args: &[&str]) -> Output {
    TestEnv::new().run(args)
}

pub struct TestEnv {
    home: TempDir,
    config: TempDir,
    data: TempDir,
    work: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temporary HOME dir"),
            config: tempfile::tempdir().expect("create temporary XDG config dir"),
            data: tempfile::tempdir().expect("create temporary XDG data dir"),
            work: tempfile::tempdir().expect("create temporary work dir"),
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], envs: &[(&str, &str)]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_callbrief"));
        cmd.args(args)
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env("XDG_DATA_HOME", self.data.path())
            .env_remove("CALLBRIEF_GEMINI_API_KEY")
            .env_remove("GEMINI_API_KEY")
            .env_remove("RUST_LOG");
        for (key, value) in envs {
            cmd.env(key, value);
        }
        cmd.output().expect("failed to execute callbrief binary")
    }

    /// Write a file into the scratch directory and return its path.
    #[allow(dead_code)]
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.work.path().join(name);
        std::fs::write(&path, contents).expect("write scratch file");
        path
    }

    #[allow(dead_code)]
    pub fn config_path(&self) -> PathBuf {
        let output = self.run(&["config", "path"]);
        assert!(
            output.status.success(),
            "config path should succeed\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );

        let path = String::from_utf8_lossy(&output.stdout);
        PathBuf::from(path.trim())
    }

    #[allow(dead_code)]
    pub fn write_config(&self, contents: &str) {
        let config_path = self.config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).expect("create config parent directory");
        }
        std::fs::write(&config_path, contents).expect("write config file");
    }
}
