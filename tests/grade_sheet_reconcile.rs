mod common;

use rust_schooldesk::errors::SchoolDeskError;
use rust_schooldesk::models::grades::{
    requests::{GradeListParams, GradeSheetQuery},
    sheet::{GradeSheet, GradeSheetRow, GradeSheetSummary},
};

use common::{memory_storage, seed_school};

fn sheet(subject_id: i64, term: i32, rows: &[(i64, Option<f64>)]) -> GradeSheet {
    GradeSheet {
        subject_id,
        term,
        rows: rows
            .iter()
            .map(|&(student_id, score)| GradeSheetRow { student_id, score })
            .collect(),
    }
}

#[tokio::test]
async fn insert_update_then_delete_a_single_grade() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;

    let summary = storage
        .reconcile_grade_sheet(&sheet(school.math_id, 1, &[(school.ana_id, Some(8.5))]))
        .await
        .expect("insert");
    assert_eq!(summary.inserted, 1);
    let first = storage
        .find_grade(school.ana_id, school.math_id, 1)
        .await
        .expect("find")
        .expect("grade exists");
    assert_eq!(first.score, 8.5);

    let summary = storage
        .reconcile_grade_sheet(&sheet(school.math_id, 1, &[(school.ana_id, Some(9.0))]))
        .await
        .expect("update");
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.inserted, 0);
    let second = storage
        .find_grade(school.ana_id, school.math_id, 1)
        .await
        .expect("find")
        .expect("grade exists");
    assert_eq!(second.score, 9.0);
    // 更新不产生新行
    assert_eq!(second.id, first.id);

    let summary = storage
        .reconcile_grade_sheet(&sheet(school.math_id, 1, &[(school.ana_id, None)]))
        .await
        .expect("delete");
    assert_eq!(summary.deleted, 1);
    assert!(
        storage
            .find_grade(school.ana_id, school.math_id, 1)
            .await
            .expect("find")
            .is_none()
    );
}

#[tokio::test]
async fn applying_the_same_sheet_twice_changes_nothing_the_second_time() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;

    let submitted = sheet(
        school.math_id,
        2,
        &[
            (school.ana_id, Some(7.0)),
            (school.bruno_id, None),
            (school.carla_id, Some(10.0)),
        ],
    );

    let first = storage.reconcile_grade_sheet(&submitted).await.expect("first");
    assert_eq!(first.inserted, 2);
    assert_eq!(first.unchanged, 1);

    let second = storage.reconcile_grade_sheet(&submitted).await.expect("second");
    assert_eq!(second.writes(), 0);
    assert_eq!(second.unchanged, 3);

    let page = storage
        .list_recent_grades(GradeListParams {
            subject_id: Some(school.math_id),
            ..Default::default()
        })
        .await
        .expect("list");
    assert_eq!(page.pagination.total, 2);
}

#[tokio::test]
async fn empty_sheet_is_a_no_op() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;

    storage
        .reconcile_grade_sheet(&sheet(school.math_id, 1, &[(school.ana_id, Some(6.0))]))
        .await
        .expect("seed grade");

    let summary = storage
        .reconcile_grade_sheet(&sheet(school.math_id, 1, &[]))
        .await
        .expect("empty sheet");
    assert_eq!(summary, GradeSheetSummary::default());
    assert!(
        storage
            .find_grade(school.ana_id, school.math_id, 1)
            .await
            .expect("find")
            .is_some()
    );
}

#[tokio::test]
async fn out_of_range_values_reject_the_whole_sheet() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;

    let err = storage
        .reconcile_grade_sheet(&sheet(
            school.math_id,
            1,
            &[(school.ana_id, Some(7.5)), (school.bruno_id, Some(10.5))],
        ))
        .await
        .expect_err("score above range");
    assert!(matches!(err, SchoolDeskError::Validation(_)));

    let err = storage
        .reconcile_grade_sheet(&sheet(school.math_id, 5, &[(school.ana_id, Some(7.5))]))
        .await
        .expect_err("term out of range");
    assert!(matches!(err, SchoolDeskError::Validation(_)));

    let err = storage
        .reconcile_grade_sheet(&sheet(school.math_id, 1, &[(school.ana_id, Some(f64::NAN))]))
        .await
        .expect_err("nan score");
    assert!(matches!(err, SchoolDeskError::Validation(_)));

    assert!(
        storage
            .find_grade(school.ana_id, school.math_id, 1)
            .await
            .expect("find")
            .is_none()
    );
}

#[tokio::test]
async fn failing_row_rolls_back_the_sheet() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;

    storage
        .reconcile_grade_sheet(&sheet(school.math_id, 3, &[(school.bruno_id, Some(4.0))]))
        .await
        .expect("seed grade");

    let err = storage
        .reconcile_grade_sheet(&sheet(
            school.math_id,
            3,
            &[
                (school.ana_id, Some(9.5)),
                (school.bruno_id, None),
                (999_999, Some(5.0)),
            ],
        ))
        .await
        .expect_err("unknown student");
    assert!(matches!(
        err,
        SchoolDeskError::InvalidReference(_) | SchoolDeskError::Reconciliation(_)
    ));

    // 整张表回滚：没有新增，也没有删除
    assert!(
        storage
            .find_grade(school.ana_id, school.math_id, 3)
            .await
            .expect("find")
            .is_none()
    );
    let bruno = storage
        .find_grade(school.bruno_id, school.math_id, 3)
        .await
        .expect("find")
        .expect("bruno keeps his grade");
    assert_eq!(bruno.score, 4.0);
}

#[tokio::test]
async fn students_outside_the_sheet_keep_their_grades() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;

    storage
        .reconcile_grade_sheet(&sheet(
            school.history_id,
            1,
            &[(school.ana_id, Some(6.5)), (school.carla_id, Some(8.0))],
        ))
        .await
        .expect("seed grades");

    let summary = storage
        .reconcile_grade_sheet(&sheet(school.history_id, 1, &[(school.ana_id, None)]))
        .await
        .expect("delete ana");
    assert_eq!(summary.deleted, 1);

    let carla = storage
        .find_grade(school.carla_id, school.history_id, 1)
        .await
        .expect("find")
        .expect("carla untouched");
    assert_eq!(carla.score, 8.0);

    // 其他科目与学期也不受影响
    assert!(
        storage
            .find_grade(school.carla_id, school.math_id, 1)
            .await
            .expect("find")
            .is_none()
    );
}

#[tokio::test]
async fn duplicate_rows_keep_the_last_value() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;

    let summary = storage
        .reconcile_grade_sheet(&sheet(
            school.math_id,
            4,
            &[(school.ana_id, Some(3.0)), (school.ana_id, Some(6.0))],
        ))
        .await
        .expect("reconcile");
    assert_eq!(summary.inserted, 1);

    let grade = storage
        .find_grade(school.ana_id, school.math_id, 4)
        .await
        .expect("find")
        .expect("grade exists");
    assert_eq!(grade.score, 6.0);
}

#[tokio::test]
async fn baseline_lists_the_class_by_name_with_missing_scores() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;

    storage
        .reconcile_grade_sheet(&sheet(school.math_id, 1, &[(school.bruno_id, Some(5.5))]))
        .await
        .expect("seed grade");

    let baseline = storage
        .get_grade_sheet_baseline(GradeSheetQuery {
            class_id: school.class_id,
            subject_id: school.math_id,
            term: 1,
        })
        .await
        .expect("baseline");

    let names: Vec<&str> = baseline.rows.iter().map(|r| r.student_name.as_str()).collect();
    assert_eq!(names, ["Ana", "Bruno", "Carla"]);
    let scores: Vec<Option<f64>> = baseline.rows.iter().map(|r| r.score).collect();
    assert_eq!(scores, [None, Some(5.5), None]);
}

#[tokio::test]
async fn recent_grades_are_newest_first_and_filterable() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;

    storage
        .reconcile_grade_sheet(&sheet(school.math_id, 1, &[(school.ana_id, Some(7.0))]))
        .await
        .expect("math");
    storage
        .reconcile_grade_sheet(&sheet(school.history_id, 2, &[(school.carla_id, Some(9.0))]))
        .await
        .expect("history");

    let all = storage
        .list_recent_grades(GradeListParams::default())
        .await
        .expect("list");
    assert_eq!(all.pagination.total, 2);
    // 同一秒写入时按 id 倒序
    assert_eq!(all.items[0].student_name, "Carla");
    assert_eq!(all.items[0].subject_name, "História");

    let term_two = storage
        .list_recent_grades(GradeListParams {
            term: Some(2),
            class_id: Some(school.class_id),
            ..Default::default()
        })
        .await
        .expect("filtered");
    assert_eq!(term_two.items.len(), 1);
    assert_eq!(term_two.items[0].score, 9.0);
}
