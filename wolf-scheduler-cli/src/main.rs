mod commands;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "wolf-scheduler")]
#[command(about = "Wolf Scheduler 课程与日程规划工具")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 启用详细日志
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 列出课程目录
    Catalog {
        /// 课程记录文件
        #[arg(short, long)]
        catalog: PathBuf,

        /// 以JSON格式输出
        #[arg(long)]
        json: bool,
    },

    /// 按课程代码与班级号查找课程
    Find {
        /// 课程记录文件
        #[arg(short, long)]
        catalog: PathBuf,

        /// 课程代码，如 CSC216
        name: String,

        /// 三位班级号，如 001
        section: String,

        /// 以JSON格式输出
        #[arg(long)]
        json: bool,
    },

    /// 启动交互式排课会话
    Plan {
        /// 课程记录文件
        #[arg(short, long)]
        catalog: PathBuf,

        /// 从脚本文件读取会话命令（默认读取标准输入）
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 设置日志级别
    let log_level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("wolf_scheduler_cli={log_level},wolf_scheduler_core={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Catalog { catalog, json } => commands::catalog_command(&catalog, json),

        Commands::Find {
            catalog,
            name,
            section,
            json,
        } => commands::find_command(&catalog, &name, &section, json),

        Commands::Plan { catalog, script } => commands::plan_command(&catalog, script.as_deref()),
    }
}
