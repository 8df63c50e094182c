//! # Command Module Unit Tests / Command 模块单元测试
//!
//! This module contains unit tests for process capture, command-line rendering
//! and the simulator argument lists built by the run invoker.
//!
//! 此模块包含进程捕获、命令行渲染以及运行调用器构建的模拟器参数列表的单元测试。

use sim_harness::config::{HarnessConfig, RunOptions, TestMode};
use sim_harness::core::execution::Invocation;
use sim_harness::infra::command::{render_command_line, spawn_and_capture};
use sim_harness::models::TestCase;
use tokio::process::Command;

#[cfg(test)]
mod spawn_and_capture_tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_and_capture_successful_command() {
        let mut cmd = Command::new("echo");
        cmd.arg("Hello, World!");

        let (status_result, output) = spawn_and_capture(cmd).await;

        assert!(status_result.unwrap().success());
        assert_eq!(output, "Hello, World!\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_and_capture_merges_stderr() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo 'Test output'; echo 'Test error' >&2"]);

        let (status_result, output) = spawn_and_capture(cmd).await;

        assert!(status_result.is_ok());
        assert!(output.contains("Test output"));
        assert!(output.contains("Test error"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_and_capture_failing_command_keeps_output() {
        // 非零退出码时输出仍然保留
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo 'Passed: 1'; exit 3"]);

        let (status_result, output) = spawn_and_capture(cmd).await;

        let status = status_result.unwrap();
        assert!(!status.success());
        assert_eq!(status.code(), Some(3));
        assert!(output.contains("Passed: 1"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_and_capture_keeps_output_after_invalid_utf8() {
        // \351 is a lone Latin-1 byte, not valid UTF-8
        let mut cmd = Command::new("sh");
        cmd.args([
            "-c",
            "printf 'Building caf\\351 elevator\\n'; echo 'RandomSeed = 42'; echo '2.0 real seconds'",
        ]);

        let (status_result, output) = spawn_and_capture(cmd).await;

        assert!(status_result.unwrap().success());
        assert_eq!(
            output,
            "Building caf\u{FFFD} elevator\nRandomSeed = 42\n2.0 real seconds\n"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_and_capture_strips_carriage_returns() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "printf 'Passed: 1\\r\\nFailed: 0'"]);

        let (_, output) = spawn_and_capture(cmd).await;

        assert_eq!(output, "Passed: 1\nFailed: 0\n");
    }

    #[tokio::test]
    async fn test_spawn_and_capture_nonexistent_command() {
        let cmd = Command::new("this_command_does_not_exist_12345");

        let (status_result, output) = spawn_and_capture(cmd).await;

        assert!(status_result.is_err());
        assert!(output.is_empty());
    }
}

#[cfg(test)]
mod render_command_line_tests {
    use super::*;

    #[test]
    fn test_plain_arguments() {
        let args = vec!["-cp".to_string(), "/sim/code".to_string()];
        assert_eq!(render_command_line("java", &args), "java -cp /sim/code");
    }

    #[test]
    fn test_arguments_with_spaces_are_quoted() {
        let args = vec!["-head".to_string(), "my header".to_string()];
        let line = render_command_line("/usr/bin/java", &args);
        assert_eq!(shlex::split(&line).unwrap(), vec!["/usr/bin/java", "-head", "my header"]);
    }
}

#[cfg(test)]
mod invocation_tests {
    use super::*;

    fn config() -> HarnessConfig {
        HarnessConfig {
            java_path: "/usr/bin/java".to_string(),
            classpath: "/sim/code".to_string(),
            ..HarnessConfig::default()
        }
    }

    fn case(primary: &str, secondary: &str) -> TestCase {
        TestCase {
            name: "T1".to_string(),
            primary_artifact: primary.to_string(),
            secondary_artifact: secondary.to_string(),
        }
    }

    #[test]
    fn test_acceptance_arguments() {
        let options = RunOptions::new(TestMode::Acceptance);
        let invocation =
            Invocation::build(&case("foo.pass", "bar.RuntimeMonitor"), &config(), &options).unwrap();

        assert_eq!(invocation.program, "/usr/bin/java");
        assert_eq!(
            invocation.args,
            [
                "-cp",
                "/sim/code",
                "simulator.framework.Elevator",
                "-head",
                "headerfile",
                "-pf",
                "foo.pass",
                "-monitor",
                "bar.RuntimeMonitor",
                "-fs",
                "5.0",
                "-b",
                "200",
            ]
        );
    }

    #[test]
    fn test_acceptance_seed_and_no_building_size() {
        let options = RunOptions {
            seed: Some(1234),
            ..RunOptions::new(TestMode::Acceptance)
        };
        let config = HarnessConfig {
            building_size: None,
            ..config()
        };
        let invocation =
            Invocation::build(&case("foo.pass", "bar.RuntimeMonitor"), &config, &options).unwrap();

        assert!(!invocation.args.contains(&"-b".to_string()));
        assert_eq!(invocation.args[invocation.args.len() - 2..], ["-seed", "1234"]);
    }

    #[test]
    fn test_integration_arguments() {
        let options = RunOptions {
            seed: Some(9),
            ..RunOptions::new(TestMode::Integration)
        };
        let invocation = Invocation::build(&case("foo.cf", "bar.mf"), &config(), &options).unwrap();

        assert_eq!(
            invocation.args,
            [
                "-cp",
                "/sim/code",
                "simulator.framework.Elevator",
                "-head",
                "headerfile",
                "-cf",
                "foo.cf",
                "-mf",
                "bar.mf",
            ]
        );
    }

    #[test]
    fn test_relative_classpath_is_made_absolute() {
        let config = HarnessConfig {
            classpath: "sim/code".to_string(),
            ..config()
        };
        let invocation = Invocation::build(
            &case("foo.pass", "bar.RuntimeMonitor"),
            &config,
            &RunOptions::new(TestMode::Acceptance),
        )
        .unwrap();

        let expected = std::env::current_dir().unwrap().join("sim/code");
        assert_eq!(invocation.args[1], expected.to_string_lossy());
    }

    #[test]
    fn test_arguments_are_deterministic() {
        let options = RunOptions::new(TestMode::Acceptance);
        let case = case("foo.pass", "bar.RuntimeMonitor");
        let first = Invocation::build(&case, &config(), &options).unwrap();
        let second = Invocation::build(&case, &config(), &options).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.command_line(), second.command_line());
    }
}
