use crate::config::HttpConfig;
use crate::json;
use crate::logger;
use crate::models::{NewUser, ServiceInfo, User};
use crate::response;
use chrono::Utc;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};

/// Every created user answers with this id. Nothing is stored, so there is
/// no counter to advance; see DESIGN.md.
const CREATED_USER_ID: u64 = 3;

const HOME_PAGE: &str = "Welcome!\n\
    This server backs a semester project: a Medical Appointment Scheduling System.\n\
    For now it exposes a few informational pages and a small mock JSON API while the scheduling side is still on the drawing board.\n\n";

const ABOUT_PAGE: &str = "About Page\n\
    This service is the lab build for the appointment scheduler project.\n\
    The pages here are placeholders; the interesting part is meant to be the booking logic that comes later in the semester.\n\n";

const CONTACT_PAGE: &str = "Contact Page\n\
    Email: team@medsched.example\n\
    Phone #: 555-0142";

const HOBBY_PAGE: &str = "Hobby Page\n\
    Favourite pastime around here is fishing. Quiet water, a line, and no pager going off.\n\n";

pub fn home(http_config: &HttpConfig) -> Response<Full<Bytes>> {
    response::build_text_response(HOME_PAGE, http_config)
}

pub fn about(http_config: &HttpConfig) -> Response<Full<Bytes>> {
    response::build_text_response(ABOUT_PAGE, http_config)
}

pub fn contact(http_config: &HttpConfig) -> Response<Full<Bytes>> {
    response::build_text_response(CONTACT_PAGE, http_config)
}

pub fn hobby(http_config: &HttpConfig) -> Response<Full<Bytes>> {
    response::build_text_response(HOBBY_PAGE, http_config)
}

fn service_info() -> ServiceInfo {
    ServiceInfo {
        app_name: "Medical Appointment Scheduling System".to_string(),
        version: "1.0.0".to_string(),
        author: "MedSched Team".to_string(),
        endpoints: ["/", "/about", "/contact", "/hobby", "/api/info", "/api/users"]
            .iter()
            .map(ToString::to_string)
            .collect(),
        description: "A system for scheduling medical appointments".to_string(),
    }
}

/// `GET /api/info` service metadata. Any other method gets a 405 envelope.
pub fn api_info(method: &Method) -> Response<Full<Bytes>> {
    if *method != Method::GET {
        return json::write_json_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }
    write_or_500(StatusCode::OK, &service_info())
}

/// `/api/users` method dispatch: GET lists, POST creates.
pub async fn users<B>(req: Request<B>) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match *req.method() {
        Method::GET => list_users(),
        Method::POST => create_user(req.into_body()).await,
        _ => json::write_json_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
    }
}

fn list_users() -> Response<Full<Bytes>> {
    // Regenerated per call; timestamps are fresh, ids are stable.
    let users = vec![
        User {
            id: 1,
            username: "john_doe".to_string(),
            email: "john@example.com".to_string(),
            created_at: Utc::now(),
        },
        User {
            id: 2,
            username: "jane_smith".to_string(),
            email: "jane@example.com".to_string(),
            created_at: Utc::now(),
        },
    ];

    write_or_500(StatusCode::OK, &users)
}

async fn create_user<B>(body: B) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let new_user: NewUser = match json::read_json(body).await {
        Ok(decoded) => decoded,
        Err(err) => {
            return json::write_json_error(
                StatusCode::BAD_REQUEST,
                &format!("Invalid JSON format: {err}"),
            );
        }
    };

    if new_user.username.is_empty() || new_user.email.is_empty() {
        return json::write_json_error(StatusCode::BAD_REQUEST, "Username and email are required");
    }

    let user = User {
        id: CREATED_USER_ID,
        username: new_user.username,
        email: new_user.email,
        created_at: Utc::now(),
    };

    write_or_500(StatusCode::CREATED, &user)
}

/// Encode failure is the codec caller's problem (the codec never writes a
/// response for it): log and fall back to a plain 500.
fn write_or_500<T: serde::Serialize>(status: StatusCode, payload: &T) -> Response<Full<Bytes>> {
    match json::write_json(status, payload, &[]) {
        Ok(resp) => resp,
        Err(err) => {
            logger::log_error(&format!("Failed to serialize response: {err}"));
            response::build_500_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::json::MAX_BODY_SIZE;
    use crate::models::ErrorResponse;
    use http_body_util::BodyExt;

    fn request(method: Method, path: &str, body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(path)
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    async fn body_bytes(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[test]
    fn test_home_page_mentions_project() {
        let config = test_config();
        let response = home(&config.http);
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_api_info_get() {
        let response = api_info(&Method::GET);
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_info_payload() {
        let response = api_info(&Method::GET);
        let info: ServiceInfo = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(info.app_name, "Medical Appointment Scheduling System");
        assert_eq!(info.version, "1.0.0");
        assert!(info.endpoints.contains(&"/api/users".to_string()));
    }

    #[tokio::test]
    async fn test_api_info_wrong_method() {
        let response = api_info(&Method::POST);
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let envelope: ErrorResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(envelope.error, "Method Not Allowed");
        assert_eq!(envelope.status, 405);
    }

    #[tokio::test]
    async fn test_get_users_returns_two_fixed_users() {
        let response = users(request(Method::GET, "/api/users", "")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let listed: Vec<User> = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, 1);
        assert_eq!(listed[0].username, "john_doe");
        assert_eq!(listed[1].id, 2);
        assert_eq!(listed[1].username, "jane_smith");
    }

    #[tokio::test]
    async fn test_create_user_returns_201_with_fixed_id() {
        let before = Utc::now();
        let response = users(request(
            Method::POST,
            "/api/users",
            r#"{"username":"a","email":"b@x.com"}"#,
        ))
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let created: User = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(created.id, 3);
        assert_eq!(created.username, "a");
        assert_eq!(created.email, "b@x.com");
        assert!(created.created_at >= before);
    }

    #[tokio::test]
    async fn test_create_user_id_never_advances() {
        for _ in 0..3 {
            let response = users(request(
                Method::POST,
                "/api/users",
                r#"{"username":"a","email":"b@x.com"}"#,
            ))
            .await;
            let created: User = serde_json::from_slice(&body_bytes(response).await).unwrap();
            assert_eq!(created.id, 3);
        }
    }

    #[tokio::test]
    async fn test_create_user_missing_fields() {
        let response = users(request(Method::POST, "/api/users", r#"{"username":"a"}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let envelope: ErrorResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(envelope.message, "Username and email are required");

        let response = users(request(Method::POST, "/api/users", r#"{"email":"b@x.com"}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_user_rejects_concatenated_bodies() {
        let response = users(request(
            Method::POST,
            "/api/users",
            r#"{"username":"a","email":"b@x.com"}{"username":"c","email":"d@x.com"}"#,
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let envelope: ErrorResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(envelope.message.contains("single JSON object"));
    }

    #[tokio::test]
    async fn test_create_user_rejects_oversized_body() {
        let oversized = " ".repeat(MAX_BODY_SIZE + 1);
        let response = users(request(Method::POST, "/api/users", &oversized)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_users_wrong_method() {
        let response = users(request(Method::DELETE, "/api/users", "")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let envelope: ErrorResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(envelope.status, 405);
        assert_eq!(envelope.message, "Method not allowed");
    }
}
