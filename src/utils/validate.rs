use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

/// 学年允许范围
pub const ACADEMIC_YEARS: std::ops::RangeInclusive<i32> = 2000..=2100;

const MAX_NAME_CHARS: usize = 200;

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码长度 8~128 个字符
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    let len = password.chars().count();
    if len < 8 {
        return Err("Password must be at least 8 characters long");
    }
    if len > 128 {
        return Err("Password must be at most 128 characters long");
    }
    Ok(())
}

/// 姓名、班级名、科目名等：去除首尾空白后非空，且不超过 200 个字符
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be empty");
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err("Name must be at most 200 characters long");
    }
    Ok(())
}

pub fn validate_academic_year(year: i32) -> Result<(), &'static str> {
    if !ACADEMIC_YEARS.contains(&year) {
        return Err("Academic year must be between 2000 and 2100");
    }
    Ok(())
}

pub fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Result<(), &'static str> {
    if birth_date > today {
        return Err("Birth date cannot be in the future");
    }
    Ok(())
}
