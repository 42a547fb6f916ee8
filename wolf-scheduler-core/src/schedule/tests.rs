use super::*;
use crate::{activity::ActivityKind, course::Course};

fn catalog() -> Catalog {
    Catalog::from_courses([
        Course::new(
            "CSC216",
            "Software Dev. Fundamentals",
            "001",
            3,
            "sesmith5",
            "MW",
            1330,
            1445,
        )
        .unwrap(),
        Course::new(
            "CSC216",
            "Software Dev. Fundamentals",
            "002",
            3,
            "sesmith5",
            "TH",
            1330,
            1445,
        )
        .unwrap(),
        Course::new("CSC116", "Intro to Java", "001", 3, "jdyoung2", "MW", 910, 1100).unwrap(),
        Course::new("CSC226", "Discrete Math", "001", 3, "tmbarnes", "MWF", 1445, 1535).unwrap(),
        Course::arranged("CSC290", "Special Topics", "601", 1, "jtetterton").unwrap(),
    ])
}

#[test]
fn test_new_schedule_is_empty_with_default_title() {
    let schedule = Schedule::new();
    assert!(schedule.is_empty());
    assert_eq!(schedule.title(), DEFAULT_TITLE);
    assert!(schedule.short_rows().is_empty());
}

#[test]
fn test_add_course_from_catalog() {
    let catalog = catalog();
    let mut schedule = Schedule::new();

    assert!(schedule.add_course(&catalog, "CSC216", "001").unwrap());
    assert_eq!(schedule.len(), 1);
    assert_eq!(
        schedule.short_rows()[0],
        ["CSC216", "001", "Software Dev. Fundamentals", "MW 1:30PM-2:45PM"]
    );
}

#[test]
fn test_add_missing_course_returns_false() {
    let catalog = catalog();
    let mut schedule = Schedule::new();
    schedule.add_course(&catalog, "CSC116", "001").unwrap();

    assert!(!schedule.add_course(&catalog, "CSC216", "009").unwrap());
    assert!(!schedule.add_course(&catalog, "MA141", "001").unwrap());
    assert_eq!(schedule.len(), 1);
}

#[test]
fn test_duplicate_enrollment_uses_name_only() {
    let catalog = catalog();
    let mut schedule = Schedule::new();

    schedule.add_course(&catalog, "CSC216", "001").unwrap();
    let err = schedule.add_course(&catalog, "CSC216", "002").unwrap_err();
    assert!(matches!(err, Error::DuplicateEnrollment(ref name) if name == "CSC216"));
    assert_eq!(err.to_string(), "You are already enrolled in CSC216");
    assert_eq!(schedule.len(), 1);

    // 不同班级没有时间冲突，换一个新日程即可同时存在
    let mut other = Schedule::new();
    other.add_course(&catalog, "CSC216", "002").unwrap();
    other.add_course(&catalog, "CSC116", "001").unwrap();
    assert_eq!(other.len(), 2);
}

#[test]
fn test_disjoint_sections_do_not_conflict() {
    let catalog = catalog();
    let first = catalog.find("CSC216", "001").unwrap();
    let second = catalog.find("CSC216", "002").unwrap();
    assert!(first.check_conflict(second).is_ok());
    assert!(second.check_conflict(first).is_ok());
}

#[test]
fn test_conflicting_course_rejected() {
    let catalog = catalog();
    let mut schedule = Schedule::new();

    schedule.add_course(&catalog, "CSC216", "001").unwrap();
    // CSC226 starts at 14:45, the exact minute CSC216 ends
    let err = schedule.add_course(&catalog, "CSC226", "001").unwrap_err();
    assert!(matches!(
        err,
        Error::Conflict {
            kind: ActivityKind::Course,
            ..
        }
    ));
    assert_eq!(schedule.len(), 1);
}

#[test]
fn test_arranged_course_fits_anywhere() {
    let catalog = catalog();
    let mut schedule = Schedule::new();

    schedule.add_course(&catalog, "CSC216", "001").unwrap();
    schedule.add_course(&catalog, "CSC116", "001").unwrap();
    assert!(schedule.add_course(&catalog, "CSC290", "601").unwrap());
    assert_eq!(schedule.short_rows()[2][3], "Arranged");
}

#[test]
fn test_add_event() {
    let catalog = catalog();
    let mut schedule = Schedule::new();
    schedule.add_course(&catalog, "CSC216", "001").unwrap();

    schedule
        .add_event("Lunch", "MTWHF", 1200, 1300, 1, "Talley")
        .unwrap();
    assert_eq!(schedule.len(), 2);
    assert_eq!(
        schedule.long_rows()[1],
        [
            "",
            "",
            "Lunch",
            "",
            "",
            "MTWHF 12:00PM-1:00PM (every 1 weeks)",
            "Talley"
        ]
    );
}

#[test]
fn test_duplicate_event_rejected() {
    let mut schedule = Schedule::new();
    schedule.add_event("Lunch", "MW", 1200, 1300, 1, "").unwrap();

    let err = schedule
        .add_event("Lunch", "SU", 1200, 1300, 2, "weekend")
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateEvent(ref title) if title == "Lunch"));
    assert_eq!(
        err.to_string(),
        "You have already created an event called Lunch"
    );
    assert_eq!(schedule.len(), 1);
}

#[test]
fn test_conflicting_event_rejected() {
    let catalog = catalog();
    let mut schedule = Schedule::new();
    schedule.add_course(&catalog, "CSC216", "001").unwrap();

    let err = schedule
        .add_event("Office Hours", "W", 1400, 1500, 1, "")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Conflict {
            kind: ActivityKind::Event,
            ref with
        } if with == "Software Dev. Fundamentals"
    ));
    assert_eq!(schedule.len(), 1);
}

#[test]
fn test_invalid_event_never_reaches_schedule() {
    let mut schedule = Schedule::new();
    schedule.add_event("Lunch", "MW", 1200, 1300, 1, "").unwrap();

    // 同名且字段非法：先报字段错误而不是重复
    let err = schedule.add_event("Lunch", "MW", 1200, 1300, 9, "").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(schedule.len(), 1);
}

#[test]
fn test_scan_checks_duplicate_before_conflict_per_entry() {
    let catalog = catalog();

    // 第一个条目既重名又冲突：报重复
    let mut schedule = Schedule::new();
    schedule.add_event("Gym", "M", 1300, 1500, 1, "").unwrap();
    let err = schedule.add_event("Gym", "M", 1400, 1430, 1, "").unwrap_err();
    assert!(matches!(err, Error::DuplicateEvent(_)));

    // 第一个条目冲突、第二个条目重名：扫描在第一个条目处终止
    let mut schedule = Schedule::new();
    schedule.add_course(&catalog, "CSC216", "001").unwrap();
    schedule.add_event("Gym", "F", 800, 900, 1, "").unwrap();
    let err = schedule.add_event("Gym", "M", 1400, 1430, 1, "").unwrap_err();
    assert!(matches!(err, Error::Conflict { .. }));
    assert_eq!(schedule.len(), 2);
}

#[test]
fn test_remove_bounds() {
    let catalog = catalog();
    let mut schedule = Schedule::new();
    assert!(!schedule.remove(0));

    schedule.add_course(&catalog, "CSC216", "001").unwrap();
    schedule.add_course(&catalog, "CSC116", "001").unwrap();
    schedule.add_event("Lunch", "MW", 1200, 1300, 1, "").unwrap();

    assert!(!schedule.remove(3));
    assert_eq!(schedule.len(), 3);

    assert!(schedule.remove(1));
    assert_eq!(schedule.len(), 2);
    let titles: Vec<_> = schedule.activities().iter().map(|a| a.title()).collect();
    assert_eq!(titles, ["Software Dev. Fundamentals", "Lunch"]);
}

#[test]
fn test_reset_is_idempotent() {
    let catalog = catalog();
    let mut schedule = Schedule::new();
    schedule.rename("Spring Plan");
    schedule.add_course(&catalog, "CSC216", "001").unwrap();

    schedule.reset();
    assert!(schedule.is_empty());
    assert_eq!(schedule.title(), DEFAULT_TITLE);

    schedule.reset();
    assert!(schedule.is_empty());
    assert_eq!(schedule.title(), DEFAULT_TITLE);
}

#[test]
fn test_rename() {
    let mut schedule = Schedule::new();
    schedule.rename("Fall 2026");
    assert_eq!(schedule.title(), "Fall 2026");
    schedule.rename("");
    assert_eq!(schedule.title(), "");
}
