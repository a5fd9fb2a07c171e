// 业务错误码，写入 ApiResponse.code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    ValidationFailed = 1001,
    ReferenceNotFound = 1002,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,
    ProfileInvalid = 1601,

    // 用户 2xxx
    UserEmailInvalid = 2001,
    UserPasswordInvalid = 2002,
    UserAlreadyExists = 2003,
    UserCreationFailed = 2004,

    // 基础档案 3xxx
    ClassCreationFailed = 3001,
    StudentCreationFailed = 3101,
    SubjectAlreadyExists = 3201,
    SubjectCreationFailed = 3202,
    AssignmentAlreadyExists = 3301,
    AssignmentCreationFailed = 3302,

    // 成绩 / 考勤 / 公告 4xxx
    GradeSheetInvalid = 4001,
    GradeSheetFailed = 4002,
    AttendanceInvalid = 4101,
    AttendanceFailed = 4102,
    AnnouncementInvalid = 4201,
    AnnouncementFailed = 4202,

    // 系统维护 5xxx
    ResetDisabled = 5001,
    ResetFailed = 5002,
}
