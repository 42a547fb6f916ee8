use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::Path,
};

use anyhow::{Context, Result};
use wolf_scheduler_core::prelude::*;

use crate::session::{Flow, Session};

fn load_scheduler(catalog: &Path) -> Result<Scheduler> {
    Scheduler::from_record_file(catalog)
        .with_context(|| format!("无法读取课程记录文件: {}", catalog.display()))
}

/// 打印简要行：名称、班级、标题、上课时间
pub fn print_short_rows(out: &mut impl Write, rows: &[ShortRow]) -> io::Result<()> {
    for (index, [name, section, title, meeting]) in rows.iter().enumerate() {
        writeln!(out, "  {index:>2}  {name:<7} {section:<4} {title:<40} {meeting}")?;
    }
    Ok(())
}

/// 打印完整行：额外包含学分、教师与事件详情
pub fn print_long_rows(out: &mut impl Write, rows: &[LongRow]) -> io::Result<()> {
    for (index, [name, section, title, credits, instructor, meeting, details]) in
        rows.iter().enumerate()
    {
        write!(out, "  {index:>2}  {name:<7} {section:<4} {title:<40} ")?;
        writeln!(out, "{credits:<2} {instructor:<10} {meeting}  {details}")?;
    }
    Ok(())
}

/// 列出课程目录命令
pub fn catalog_command(catalog: &Path, json: bool) -> Result<()> {
    let scheduler = load_scheduler(catalog)?;

    if json {
        println!("{}", serde_json::to_string_pretty(scheduler.catalog())?);
        return Ok(());
    }

    let rows = scheduler.catalog_rows();
    if rows.is_empty() {
        println!("课程目录为空");
    } else {
        println!("课程目录 ({} 个教学班):", rows.len());
        print_short_rows(&mut io::stdout().lock(), &rows)?;
    }
    Ok(())
}

/// 查找课程命令
pub fn find_command(catalog: &Path, name: &str, section: &str, json: bool) -> Result<()> {
    let scheduler = load_scheduler(catalog)?;

    let Some(course) = scheduler.find_course(name, section) else {
        println!("未找到课程: {name}-{section}");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(course)?);
    } else {
        print_long_rows(&mut io::stdout().lock(), &[course.long_row()])?;
    }
    Ok(())
}

/// 交互式排课会话命令
pub fn plan_command(catalog: &Path, script: Option<&Path>) -> Result<()> {
    let scheduler = load_scheduler(catalog)?;
    println!(
        "✓ 已加载 {} 个教学班，输入 help 查看可用命令",
        scheduler.catalog().len()
    );

    let interactive = script.is_none();
    let reader: Box<dyn BufRead> = match script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("无法打开脚本: {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut session = Session::new(scheduler);
    let mut stdout = io::stdout().lock();
    let mut lines = reader.lines();

    loop {
        if interactive {
            write!(stdout, "{}> ", session.scheduler().title())?;
            stdout.flush()?;
        }
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if session.execute_line(&line, &mut stdout)? == Flow::Quit {
            break;
        }
    }

    Ok(())
}
