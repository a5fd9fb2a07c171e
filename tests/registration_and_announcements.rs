mod common;

use rust_schooldesk::errors::SchoolDeskError;
use rust_schooldesk::models::{
    announcements::{entities::NewAnnouncement, requests::AnnouncementListQuery},
    classes::requests::ClassQueryParams,
    students::requests::{CreateStudentRequest, StudentListParams},
    teachers::requests::AssignTeacherRequest,
    users::{
        entities::UserRole,
        requests::{CreateUserRequest, UserListQuery},
    },
};

use common::{date, memory_storage, seed_school};

#[tokio::test]
async fn duplicate_email_subject_and_assignment_conflict() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;

    let err = storage
        .create_user(CreateUserRequest {
            name: "Outra Marta".to_string(),
            email: "marta@escola.test".to_string(),
            password: "hash".to_string(),
            role: UserRole::Teacher,
        })
        .await
        .expect_err("duplicate email");
    assert!(matches!(err, SchoolDeskError::Conflict(_)));

    let err = storage
        .create_subject("Matemática")
        .await
        .expect_err("duplicate subject");
    assert!(matches!(err, SchoolDeskError::Conflict(_)));

    let assignment = AssignTeacherRequest {
        teacher_id: school.teacher_id,
        class_id: school.class_id,
        subject_id: school.math_id,
    };
    storage
        .assign_teacher(assignment)
        .await
        .expect("first assignment");
    let err = storage
        .assign_teacher(AssignTeacherRequest {
            teacher_id: school.teacher_id,
            class_id: school.class_id,
            subject_id: school.math_id,
        })
        .await
        .expect_err("duplicate assignment");
    assert!(matches!(err, SchoolDeskError::Conflict(_)));
}

#[tokio::test]
async fn student_with_missing_class_is_an_invalid_reference() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;

    let err = storage
        .create_student(CreateStudentRequest {
            full_name: "Diego".to_string(),
            birth_date: date(2013, 1, 2),
            class_id: Some(9_999),
            guardian_id: Some(school.guardian_id),
        })
        .await
        .expect_err("missing class");
    assert!(matches!(err, SchoolDeskError::InvalidReference(_)));
}

#[tokio::test]
async fn teacher_read_paths_follow_assignments() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;

    for subject_id in [school.math_id, school.history_id] {
        storage
            .assign_teacher(AssignTeacherRequest {
                teacher_id: school.teacher_id,
                class_id: school.class_id,
                subject_id,
            })
            .await
            .expect("assign");
    }

    let classes = storage
        .list_teacher_classes(school.teacher_id)
        .await
        .expect("classes");
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].name, "7A");

    let subjects = storage
        .list_teacher_subjects(school.teacher_id, school.class_id)
        .await
        .expect("subjects");
    let names: Vec<&str> = subjects.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["História", "Matemática"]);

    assert!(
        storage
            .list_teacher_classes(school.guardian_id)
            .await
            .expect("none")
            .is_empty()
    );
}

#[tokio::test]
async fn supporting_lists_filter_by_class_and_role() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;

    let students = storage
        .list_students_with_pagination(StudentListParams {
            page: None,
            size: None,
            class_id: Some(school.class_id),
            guardian_id: None,
            search: Some("an".to_string()),
        })
        .await
        .expect("students");
    assert_eq!(students.pagination.total, 1);
    assert_eq!(students.items[0].full_name, "Ana");

    let guardians = storage
        .list_users_with_pagination(UserListQuery {
            page: None,
            size: None,
            role: Some(UserRole::Guardian),
            search: None,
        })
        .await
        .expect("guardians");
    assert_eq!(guardians.items.len(), 1);
    assert_eq!(guardians.items[0].id, school.guardian_id);

    let classes = storage
        .list_classes(ClassQueryParams {
            academic_year: Some(2024),
            search: None,
        })
        .await
        .expect("classes");
    assert!(classes.is_empty());
}

#[tokio::test]
async fn audience_filter_includes_general_announcements() {
    let storage = memory_storage().await;
    let school = seed_school(&storage).await;

    for (title, audience) in [
        ("Reunião de pais", Some(UserRole::Guardian)),
        ("Conselho de classe", Some(UserRole::Teacher)),
        ("Feriado", None),
    ] {
        storage
            .create_announcement(NewAnnouncement {
                title: title.to_string(),
                message: "Detalhes na secretaria".to_string(),
                audience,
                issuer_id: school.manager_id,
            })
            .await
            .expect("announce");
    }

    let for_guardians = storage
        .list_announcements_with_pagination(AnnouncementListQuery {
            page: None,
            size: None,
            audience: Some(UserRole::Guardian),
        })
        .await
        .expect("guardian list");
    let titles: Vec<&str> = for_guardians.items.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"Reunião de pais"));
    assert!(titles.contains(&"Feriado"));

    let everything = storage
        .list_announcements_with_pagination(AnnouncementListQuery {
            page: None,
            size: None,
            audience: None,
        })
        .await
        .expect("all");
    assert_eq!(everything.pagination.total, 3);
    // 最新在前
    assert_eq!(everything.items[0].title, "Feriado");
}
