pub mod announcements;

pub mod attendance;

pub mod classes;

pub mod dashboard;

pub mod grades;

pub mod students;

pub mod subjects;

pub mod system;

pub mod teachers;

pub mod users;

pub use announcements::configure_announcement_routes;
pub use attendance::configure_attendance_routes;
pub use classes::configure_classes_routes;
pub use dashboard::configure_dashboard_routes;
pub use grades::configure_grade_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teacher_routes;
pub use users::configure_user_routes;
