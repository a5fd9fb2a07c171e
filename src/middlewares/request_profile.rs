/*!
 * 请求档案中间件
 *
 * 界面在请求头中携带当前选择的档案：
 *
 * - `X-Profile-Role`: `manager` / `teacher` / `guardian`
 * - `X-Profile-User`: 用户 ID
 *
 * 缺失的请求头使用配置中的默认档案。解析后的档案存入请求扩展，
 * 处理程序通过 `RequestProfile::extract_profile` 读取。非法取值返回 400。
 *
 * 档案只是请求范围内的上下文，不做任何身份校验。
 */

use crate::config::{AppConfig, ProfileConfig};
use crate::models::users::entities::{SelectedProfile, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, warn};

pub const PROFILE_ROLE_HEADER: &str = "X-Profile-Role";
pub const PROFILE_USER_HEADER: &str = "X-Profile-User";

#[derive(Clone)]
pub struct RequestProfile;

/// 由请求头与默认配置得出档案
pub fn resolve_profile(
    role_header: Option<&str>,
    user_header: Option<&str>,
    defaults: &ProfileConfig,
) -> Result<SelectedProfile, String> {
    let role = match role_header {
        Some(raw) => raw
            .parse::<UserRole>()
            .map_err(|_| format!("Invalid {PROFILE_ROLE_HEADER}: '{raw}'"))?,
        None => defaults.default_role.parse::<UserRole>().unwrap_or_else(|_| {
            warn!(
                "Invalid default profile role '{}', falling back to manager",
                defaults.default_role
            );
            UserRole::Manager
        }),
    };

    let user_id = match user_header {
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(id) if id > 0 => id,
            _ => return Err(format!("Invalid {PROFILE_USER_HEADER}: '{raw}'")),
        },
        None => defaults.default_user_id,
    };

    Ok(SelectedProfile { role, user_id })
}

fn header_value<'a>(req: &'a ServiceRequest, name: &str) -> Result<Option<&'a str>, String> {
    match req.headers().get(name) {
        Some(value) => value
            .to_str()
            .map(Some)
            .map_err(|_| format!("Invalid {name}: not valid ASCII")),
        None => Ok(None),
    }
}

fn profile_from_request(req: &ServiceRequest) -> Result<SelectedProfile, String> {
    let role = header_value(req, PROFILE_ROLE_HEADER)?;
    let user = header_value(req, PROFILE_USER_HEADER)?;
    resolve_profile(role, user, &AppConfig::get().profile)
}

impl<S, B> Transform<S, ServiceRequest> for RequestProfile
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestProfileMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestProfileMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestProfileMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestProfileMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            match profile_from_request(&req) {
                Ok(profile) => {
                    debug!(
                        "Request profile: role={}, user={}",
                        profile.role, profile.user_id
                    );
                    req.extensions_mut().insert(profile);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    debug!("Rejected request profile for {}: {}", req.path(), err);
                    let response = HttpResponse::BadRequest()
                        .json(ApiResponse::error_empty(ErrorCode::ProfileInvalid, err));
                    Ok(req.into_response(response.map_into_right_body()))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取档案
impl RequestProfile {
    pub fn extract_profile(req: &actix_web::HttpRequest) -> Option<SelectedProfile> {
        req.extensions().get::<SelectedProfile>().copied()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        Self::extract_profile(req).map(|p| p.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ProfileConfig {
        ProfileConfig {
            default_role: "manager".into(),
            default_user_id: 1,
        }
    }

    #[test]
    fn test_missing_headers_use_defaults() {
        let profile = resolve_profile(None, None, &defaults()).unwrap();
        assert_eq!(
            profile,
            SelectedProfile {
                role: UserRole::Manager,
                user_id: 1
            }
        );
    }

    #[test]
    fn test_headers_override_defaults() {
        let profile = resolve_profile(Some("teacher"), Some("42"), &defaults()).unwrap();
        assert_eq!(profile.role, UserRole::Teacher);
        assert_eq!(profile.user_id, 42);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(resolve_profile(Some("aluno"), None, &defaults()).is_err());
        assert!(resolve_profile(None, Some("abc"), &defaults()).is_err());
        assert!(resolve_profile(None, Some("0"), &defaults()).is_err());
    }
}
