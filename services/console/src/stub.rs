use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use olahire::profile::{ResumeProfile, SignupForm};
use olahire::remote::{
    ApplicantMatch, ApplicationStatus, InMemoryRemote, JobDraft, JobNumber, JobPosting,
    LoginGrant, RemoteCollaborator, RemoteError,
};
use olahire::session::ApplicantId;
use serde::Deserialize;
use serde_json::json;

pub(crate) type SharedRemote = Arc<InMemoryRemote>;

/// HTTP rendition of the backend contract, backed by the in-memory remote.
/// Front-end development runs against this while the real backend is
/// elsewhere.
pub(crate) fn router(remote: SharedRemote) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/api/v1/login", post(login))
        .route("/api/v1/admin-login", post(admin_login))
        .route("/api/v1/signup", post(signup))
        .route("/api/v1/jobs", get(jobs).post(post_job))
        .route("/api/v1/jobs/:job_number", get(job).delete(delete_job))
        .route("/api/v1/companies/:company/jobs", get(company_jobs))
        .route(
            "/api/v1/companies/:company/applicants",
            get(company_applicants),
        )
        .route(
            "/api/v1/applicants/:applicant_id/applications",
            get(my_applications).post(apply),
        )
        .route(
            "/api/v1/applicants/:applicant_id/jobs/:job_number/status",
            put(put_status),
        )
        .route(
            "/api/v1/applicants/:applicant_id/profile",
            get(fetch_profile).put(save_profile).delete(delete_profile),
        )
        .with_state(remote)
}

/// Wire form of [`RemoteError`]; the variants map straight onto the status
/// classes the client's taxonomy was built from.
#[derive(Debug)]
pub(crate) struct StubError(RemoteError);

impl From<RemoteError> for StubError {
    fn from(value: RemoteError) -> Self {
        Self(value)
    }
}

impl IntoResponse for StubError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RemoteError::Unauthorized => StatusCode::UNAUTHORIZED,
            RemoteError::NotFound => StatusCode::NOT_FOUND,
            RemoteError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RemoteError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

fn bearer(headers: &HeaderMap) -> Result<String, StubError> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned)
        .ok_or(StubError(RemoteError::Unauthorized))
}

#[derive(Debug, Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
struct ApplyBody {
    job_number: String,
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn login(
    State(remote): State<SharedRemote>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<LoginGrant>, StubError> {
    let grant = remote
        .login(&credentials.email, &credentials.password)
        .await?;
    Ok(Json(grant))
}

async fn admin_login(
    State(remote): State<SharedRemote>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<LoginGrant>, StubError> {
    let grant = remote
        .admin_login(&credentials.email, &credentials.password)
        .await?;
    Ok(Json(grant))
}

async fn signup(
    State(remote): State<SharedRemote>,
    Json(form): Json<SignupForm>,
) -> Result<StatusCode, StubError> {
    remote.signup(&form).await?;
    Ok(StatusCode::CREATED)
}

async fn jobs(State(remote): State<SharedRemote>) -> Result<Json<Vec<JobPosting>>, StubError> {
    Ok(Json(remote.jobs().await?))
}

async fn job(
    State(remote): State<SharedRemote>,
    Path(job_number): Path<String>,
) -> Result<Json<JobPosting>, StubError> {
    Ok(Json(remote.job(&JobNumber(job_number)).await?))
}

async fn post_job(
    State(remote): State<SharedRemote>,
    headers: HeaderMap,
    Json(draft): Json<JobDraft>,
) -> Result<(StatusCode, Json<JobPosting>), StubError> {
    let credential = bearer(&headers)?;
    let posting = remote.post_job(&draft, &credential).await?;
    Ok((StatusCode::CREATED, Json(posting)))
}

async fn delete_job(
    State(remote): State<SharedRemote>,
    headers: HeaderMap,
    Path(job_number): Path<String>,
) -> Result<StatusCode, StubError> {
    let credential = bearer(&headers)?;
    remote.delete_job(&JobNumber(job_number), &credential).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn company_jobs(
    State(remote): State<SharedRemote>,
    headers: HeaderMap,
    Path(company): Path<String>,
) -> Result<Json<Vec<JobPosting>>, StubError> {
    let credential = bearer(&headers)?;
    Ok(Json(remote.company_jobs(&company, &credential).await?))
}

async fn company_applicants(
    State(remote): State<SharedRemote>,
    headers: HeaderMap,
    Path(company): Path<String>,
) -> Result<Json<Vec<ApplicantMatch>>, StubError> {
    let credential = bearer(&headers)?;
    let rows = remote.applicants_for_company(&company, &credential).await?;
    Ok(Json(rows))
}

async fn apply(
    State(remote): State<SharedRemote>,
    headers: HeaderMap,
    Path(applicant_id): Path<String>,
    Json(body): Json<ApplyBody>,
) -> Result<(StatusCode, Json<ApplicantMatch>), StubError> {
    let credential = bearer(&headers)?;
    let row = remote
        .apply(
            &ApplicantId(applicant_id),
            &JobNumber(body.job_number),
            &credential,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn my_applications(
    State(remote): State<SharedRemote>,
    headers: HeaderMap,
    Path(applicant_id): Path<String>,
) -> Result<Json<Vec<ApplicantMatch>>, StubError> {
    let credential = bearer(&headers)?;
    let rows = remote
        .my_applications(&ApplicantId(applicant_id), &credential)
        .await?;
    Ok(Json(rows))
}

async fn put_status(
    State(remote): State<SharedRemote>,
    headers: HeaderMap,
    Path((applicant_id, job_number)): Path<(String, String)>,
    Json(body): Json<StatusBody>,
) -> Result<StatusCode, StubError> {
    let credential = bearer(&headers)?;
    remote
        .put_applicant_status(
            &ApplicantId(applicant_id),
            &JobNumber(job_number),
            body.status,
            &credential,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn fetch_profile(
    State(remote): State<SharedRemote>,
    headers: HeaderMap,
    Path(applicant_id): Path<String>,
) -> Result<Json<ResumeProfile>, StubError> {
    let credential = bearer(&headers)?;
    let profile = remote
        .fetch_profile(&ApplicantId(applicant_id), &credential)
        .await?;
    Ok(Json(profile))
}

async fn save_profile(
    State(remote): State<SharedRemote>,
    headers: HeaderMap,
    Path(applicant_id): Path<String>,
    Json(profile): Json<ResumeProfile>,
) -> Result<StatusCode, StubError> {
    let credential = bearer(&headers)?;
    if profile.applicant_id.0 != applicant_id {
        return Err(StubError(RemoteError::Rejected(
            "profile applicant does not match the path".to_string(),
        )));
    }
    remote.save_profile(&profile, &credential).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_profile(
    State(remote): State<SharedRemote>,
    headers: HeaderMap,
    Path(applicant_id): Path<String>,
) -> Result<StatusCode, StubError> {
    let credential = bearer(&headers)?;
    remote
        .delete_profile(&ApplicantId(applicant_id), &credential)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
