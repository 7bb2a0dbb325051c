//! HTTP API port and reqwest adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ClientError;
use crate::types::RemoteAttendanceRecord;

/// Port over the attendance HTTP facade.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceApi: Send + Sync {
    async fn create_session(
        &self,
        subject: &str,
        section: &str,
        course: &str,
    ) -> Result<Uuid, ClientError>;

    async fn generate_otp(&self, session_id: &Uuid) -> Result<String, ClientError>;

    /// Returns the server's confirmation message.
    async fn mark_attendance(
        &self,
        name: &str,
        roll_no: &str,
        otp: &str,
        session_id: &Uuid,
    ) -> Result<String, ClientError>;

    async fn fetch_attendance(
        &self,
        session_id: &Uuid,
    ) -> Result<Vec<RemoteAttendanceRecord>, ClientError>;
}

pub struct HttpAttendanceApi {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct StartSessionBody<'a> {
    subject: &'a str,
    section: &'a str,
    course: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateOtpBody<'a> {
    session_id: &'a Uuid,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkAttendanceBody<'a> {
    name: &'a str,
    roll_no: &'a str,
    otp: &'a str,
    session_id: &'a Uuid,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionIdResponse {
    session_id: Uuid,
}

#[derive(Deserialize)]
struct OtpResponse {
    otp: String,
}

#[derive(Deserialize)]
struct MessageResponse {
    message: String,
}

impl HttpAttendanceApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Map a non-success response to `ClientError::Api`, surfacing the
    /// server's message verbatim.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<MessageResponse>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl AttendanceApi for HttpAttendanceApi {
    async fn create_session(
        &self,
        subject: &str,
        section: &str,
        course: &str,
    ) -> Result<Uuid, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/start-session", self.base_url))
            .json(&StartSessionBody {
                subject,
                section,
                course,
            })
            .send()
            .await?;

        let body: SessionIdResponse = Self::check(response).await?.json().await?;
        Ok(body.session_id)
    }

    async fn generate_otp(&self, session_id: &Uuid) -> Result<String, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/generate-otp", self.base_url))
            .json(&GenerateOtpBody { session_id })
            .send()
            .await?;

        let body: OtpResponse = Self::check(response).await?.json().await?;
        Ok(body.otp)
    }

    async fn mark_attendance(
        &self,
        name: &str,
        roll_no: &str,
        otp: &str,
        session_id: &Uuid,
    ) -> Result<String, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/mark-attendance", self.base_url))
            .json(&MarkAttendanceBody {
                name,
                roll_no,
                otp,
                session_id,
            })
            .send()
            .await?;

        let body: MessageResponse = Self::check(response).await?.json().await?;
        Ok(body.message)
    }

    async fn fetch_attendance(
        &self,
        session_id: &Uuid,
    ) -> Result<Vec<RemoteAttendanceRecord>, ClientError> {
        let response = self
            .http
            .get(format!(
                "{}/api/session/{}/attendance",
                self.base_url, session_id
            ))
            .send()
            .await?;

        let body: Vec<RemoteAttendanceRecord> = Self::check(response).await?.json().await?;
        Ok(body)
    }
}
