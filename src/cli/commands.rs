//! # Commands / 命令
//!
//! - `run` - Runs an acceptance or integration batch / 运行验收或集成测试批次
//! - `init` - Creates a `Harness.toml` / 创建 `Harness.toml`

pub mod init;
pub mod run;
