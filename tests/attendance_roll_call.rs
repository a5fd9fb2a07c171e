mod common;

use rust_schooldesk::errors::SchoolDeskError;
use rust_schooldesk::models::attendance::{
    entities::AttendanceStatus,
    requests::{AttendanceListParams, RecordAttendanceRequest, RollCallMark, RollCallRequest},
};
use rust_schooldesk::services::dashboard::summary::build_summary;

use common::{date, memory_storage, seed_school};

#[tokio::test]
async fn re_marking_the_same_lesson_replaces_the_status() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;
    let lesson = date(2025, 3, 10);

    let first = storage
        .record_attendance(RecordAttendanceRequest {
            student_id: school.ana_id,
            subject_id: school.math_id,
            lesson_date: lesson,
            status: AttendanceStatus::Absent,
        })
        .await
        .expect("first mark");

    let second = storage
        .record_attendance(RecordAttendanceRequest {
            student_id: school.ana_id,
            subject_id: school.math_id,
            lesson_date: lesson,
            status: AttendanceStatus::Justified,
        })
        .await
        .expect("second mark");

    assert_eq!(second.id, first.id);
    assert_eq!(second.status, AttendanceStatus::Justified);

    let listed = storage
        .list_attendance(AttendanceListParams {
            class_id: school.class_id,
            lesson_date: lesson,
            subject_id: None,
        })
        .await
        .expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, AttendanceStatus::Justified);
}

#[tokio::test]
async fn roll_call_records_the_whole_class_in_name_order() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;
    let lesson = date(2025, 3, 11);

    let recorded = storage
        .record_roll_call(RollCallRequest {
            subject_id: school.history_id,
            lesson_date: lesson,
            marks: vec![
                RollCallMark {
                    student_id: school.carla_id,
                    status: AttendanceStatus::Present,
                },
                RollCallMark {
                    student_id: school.ana_id,
                    status: AttendanceStatus::Absent,
                },
                RollCallMark {
                    student_id: school.bruno_id,
                    status: AttendanceStatus::Present,
                },
            ],
        })
        .await
        .expect("roll call");
    assert_eq!(recorded, 3);

    let listed = storage
        .list_attendance(AttendanceListParams {
            class_id: school.class_id,
            lesson_date: lesson,
            subject_id: Some(school.history_id),
        })
        .await
        .expect("list");
    let names: Vec<&str> = listed.iter().map(|a| a.student_name.as_str()).collect();
    assert_eq!(names, ["Ana", "Bruno", "Carla"]);
    assert_eq!(listed[0].status, AttendanceStatus::Absent);
}

#[tokio::test]
async fn roll_call_with_unknown_student_writes_nothing() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;
    let lesson = date(2025, 3, 12);

    let err = storage
        .record_roll_call(RollCallRequest {
            subject_id: school.math_id,
            lesson_date: lesson,
            marks: vec![
                RollCallMark {
                    student_id: school.ana_id,
                    status: AttendanceStatus::Present,
                },
                RollCallMark {
                    student_id: 424_242,
                    status: AttendanceStatus::Present,
                },
            ],
        })
        .await
        .expect_err("unknown student");
    assert!(matches!(err, SchoolDeskError::InvalidReference(_)));

    let listed = storage
        .list_attendance(AttendanceListParams {
            class_id: school.class_id,
            lesson_date: lesson,
            subject_id: None,
        })
        .await
        .expect("list");
    assert!(listed.is_empty());
}

#[tokio::test]
async fn dashboard_attendance_rate_uses_weights() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;
    let today = chrono::Local::now().date_naive();

    storage
        .record_roll_call(RollCallRequest {
            subject_id: school.math_id,
            lesson_date: today,
            marks: vec![
                RollCallMark {
                    student_id: school.ana_id,
                    status: AttendanceStatus::Present,
                },
                RollCallMark {
                    student_id: school.bruno_id,
                    status: AttendanceStatus::Present,
                },
                RollCallMark {
                    student_id: school.carla_id,
                    status: AttendanceStatus::Justified,
                },
            ],
        })
        .await
        .expect("roll call");

    // 窗口外的缺勤不计入
    storage
        .record_attendance(RecordAttendanceRequest {
            student_id: school.ana_id,
            subject_id: school.history_id,
            lesson_date: today - chrono::Duration::days(45),
            status: AttendanceStatus::Absent,
        })
        .await
        .expect("old mark");

    let summary = build_summary(&storage, today, 30).await.expect("summary");
    assert_eq!(summary.attendance_by_class.len(), 1);
    let class = &summary.attendance_by_class[0];
    assert_eq!(class.class_id, Some(school.class_id));
    assert_eq!(class.marks, 3);
    assert!((class.rate - (1.0 + 1.0 + 0.8) / 3.0).abs() < 1e-9);

    assert_eq!(summary.counts.students, 3);
    assert_eq!(summary.counts.subjects, 2);
    assert_eq!(summary.counts.classes, 1);
    assert_eq!(summary.attendance_window_days, 30);
}
