//! Flat record files.
//!
//! One activity per line, comma separated, no escaping:
//!
//! ```text
//! CSC216,Software Dev. Fundamentals,001,3,sesmith5,MW,1330,1445
//! CSC290,Special Topics,601,1,jtetterton,A
//! Lunch,MWF,1200,1300,1,Talley
//! ```
//!
//! Course lines can be read back; event lines are only ever written.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
    str::{self, FromStr},
};

use crate::{
    Error, Result,
    activity::{ARRANGED_SYMBOL, Activity, Schedulable},
    catalog::Catalog,
    course::Course,
};

/// Parses one course line.
pub fn parse_course(line: &str) -> Result<Course> {
    let mut fields = line.split(',');
    let mut next = |what: &str| {
        fields
            .next()
            .ok_or_else(|| Error::record(format!("missing {what}")))
    };

    let name = next("name")?;
    let title = next("title")?;
    let section = next("section")?;
    let credits = parse_number(next("credits")?, "credits")?;
    let instructor_id = next("instructor id")?;
    let days = next("meeting days")?;

    let course = if days.len() == 1 && days.starts_with(ARRANGED_SYMBOL) {
        Course::arranged(name, title, section, credits, instructor_id)?
    } else {
        let start = parse_number(next("start time")?, "start time")?;
        let end = parse_number(next("end time")?, "end time")?;
        Course::new(name, title, section, credits, instructor_id, days, start, end)?
    };

    if fields.next().is_some() {
        return Err(Error::record("unexpected trailing fields"));
    }
    Ok(course)
}

fn parse_number<T: FromStr>(field: &str, what: &str) -> Result<T> {
    field
        .parse()
        .map_err(|_| Error::record(format!("{what} is not a number: {field:?}")))
}

/// Reads course records in file order.
///
/// Lines that fail to parse or validate are skipped, as are later repeats of
/// a `(name, section)` pair already read.
pub fn read_course_records(mut reader: impl BufRead) -> Result<Vec<Course>> {
    let mut courses = Vec::new();
    let mut skipped = 0usize;
    let mut buf = Vec::new();

    for index in 1usize.. {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let Ok(line) = str::from_utf8(&buf) else {
            skipped += 1;
            tracing::debug!("跳过第{}行记录: 不是有效的UTF-8", index);
            continue;
        };
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }
        match parse_course(line) {
            Ok(course) => courses.push(course),
            Err(e) => {
                skipped += 1;
                tracing::debug!("跳过第{}行记录: {}", index, e);
            }
        }
    }

    let read = courses.len();
    let courses = Catalog::from_courses(courses).into_courses();
    tracing::info!(
        "读取课程记录: {} 条有效, {} 条无效, {} 条重复",
        courses.len(),
        skipped,
        read - courses.len()
    );
    Ok(courses)
}

pub fn read_course_records_from_path(path: impl AsRef<Path>) -> Result<Vec<Course>> {
    let file = File::open(path.as_ref())?;
    read_course_records(BufReader::new(file))
}

/// Writes one canonical record line per activity.
pub fn write_activity_records(mut writer: impl Write, activities: &[Activity]) -> Result<()> {
    for activity in activities {
        writeln!(writer, "{}", activity.to_record())?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_activity_records_to_path(
    path: impl AsRef<Path>,
    activities: &[Activity],
) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_activity_records(BufWriter::new(file), activities)
}
