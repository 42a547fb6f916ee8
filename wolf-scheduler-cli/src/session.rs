use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use wolf_scheduler_core::prelude::*;

use crate::commands::{print_long_rows, print_short_rows};

/// 会话中的一行命令
#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand)]
enum SessionCommand {
    /// 从课程目录选课
    AddCourse {
        /// 课程代码
        name: String,
        /// 班级号
        section: String,
    },

    /// 添加个人周期事件
    AddEvent {
        /// 事件标题
        title: String,
        /// 上课日，如 MWF 或 SU
        days: String,
        /// 开始时间 (HHMM)
        start: u16,
        /// 结束时间 (HHMM)
        end: u16,
        /// 每N周重复 (1-4)
        weekly_repeat: u8,
        /// 事件详情
        #[arg(default_value = "")]
        details: String,
    },

    /// 按序号移除日程条目
    Remove {
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },

    /// 修改日程标题
    Rename { title: String },

    /// 清空日程并恢复默认标题
    Reset,

    /// 显示当前日程
    Show {
        /// 显示学分、教师与详情
        #[arg(long)]
        full: bool,
    },

    /// 列出课程目录
    Catalog,

    /// 导出日程到记录文件
    Export { file: PathBuf },

    /// 结束会话
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    scheduler: Scheduler,
}

impl Session {
    pub const fn new(scheduler: Scheduler) -> Self {
        Self { scheduler }
    }

    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// 执行一行命令；被拒绝的操作只输出原因，会话继续
    pub fn execute_line(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let tokens = match split_line(line) {
            Ok(tokens) if tokens.is_empty() => return Ok(Flow::Continue),
            Ok(tokens) => tokens,
            Err(message) => {
                writeln!(out, "✗ {message}")?;
                return Ok(Flow::Continue);
            }
        };

        let command = match SessionLine::try_parse_from(tokens) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };

        self.execute(command, out)
    }

    fn execute(&mut self, command: SessionCommand, out: &mut impl Write) -> Result<Flow> {
        match command {
            SessionCommand::AddCourse { name, section } => {
                match self.scheduler.add_course(&name, &section) {
                    Ok(true) => writeln!(out, "✓ 已选课 {name}-{section}")?,
                    Ok(false) => writeln!(out, "✗ 课程目录中没有 {name}-{section}")?,
                    Err(e) => writeln!(out, "✗ {e}")?,
                }
            }

            SessionCommand::AddEvent {
                title,
                days,
                start,
                end,
                weekly_repeat,
                details,
            } => match self
                .scheduler
                .add_event(&title, &days, start, end, weekly_repeat, &details)
            {
                Ok(()) => writeln!(out, "✓ 已添加事件 {title}")?,
                Err(e) => writeln!(out, "✗ {e}")?,
            },

            SessionCommand::Remove { index } => {
                let removed =
                    usize::try_from(index).is_ok_and(|i| self.scheduler.remove_activity(i));
                if removed {
                    writeln!(out, "✓ 已移除第 {index} 项")?;
                } else {
                    writeln!(out, "✗ 无效的序号: {index}")?;
                }
            }

            SessionCommand::Rename { title } => {
                self.scheduler.set_title(title);
                writeln!(out, "✓ 日程标题: {}", self.scheduler.title())?;
            }

            SessionCommand::Reset => {
                self.scheduler.reset_schedule();
                writeln!(out, "✓ 日程已清空")?;
            }

            SessionCommand::Show { full } => {
                writeln!(
                    out,
                    "{} ({} 项):",
                    self.scheduler.title(),
                    self.scheduler.schedule().len()
                )?;
                if full {
                    print_long_rows(out, &self.scheduler.full_schedule_rows())?;
                } else {
                    print_short_rows(out, &self.scheduler.schedule_rows())?;
                }
            }

            SessionCommand::Catalog => {
                print_short_rows(out, &self.scheduler.catalog_rows())?;
            }

            SessionCommand::Export { file } => match self.scheduler.export_schedule(&file) {
                Ok(()) => writeln!(out, "✓ 日程已导出到: {}", file.display())?,
                Err(e) => writeln!(out, "✗ {e}")?,
            },

            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }
}

/// 按空白切分命令行，双引号内的空白保留
fn split_line(line: &str) -> std::result::Result<Vec<String>, &'static str> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut pending = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                pending = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if pending {
                    tokens.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }

    if in_quotes {
        return Err("引号未闭合");
    }
    if pending {
        tokens.push(current);
    }
    Ok(tokens)
}
