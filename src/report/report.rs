use serde::Serialize;

/// How a report came to be. Not part of the serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Response,
    TransportFailure,
    Malformed,
    /// The check task ended without producing a report.
    Aborted,
}

/// Terminal result of checking one URL.
///
/// Fields are private so a report cannot be altered once built. The
/// constructors are the only ways to obtain one and each keeps
/// `success` and `status_code` consistent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlReport {
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_time: Option<f64>,
    success: bool,
    #[serde(skip)]
    kind: ReportKind,
}

impl UrlReport {
    /// An HTTP response arrived, whatever its status.
    pub fn succeeded(url: impl Into<String>, status_code: u16, response_time: f64) -> Self {
        Self {
            url: url.into(),
            status_code: Some(status_code),
            response_time: Some(response_time),
            success: true,
            kind: ReportKind::Response,
        }
    }

    /// Every attempt failed at the transport level; `response_time` is the final attempt's.
    pub fn failed(url: impl Into<String>, response_time: f64) -> Self {
        Self {
            url: url.into(),
            status_code: None,
            response_time: Some(response_time),
            success: false,
            kind: ReportKind::TransportFailure,
        }
    }

    /// No request was made.
    pub fn malformed(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_code: None,
            response_time: None,
            success: false,
            kind: ReportKind::Malformed,
        }
    }

    /// The check never reported back, so nothing is known about the URL.
    pub fn aborted(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_code: None,
            response_time: None,
            success: false,
            kind: ReportKind::Aborted,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn response_time(&self) -> Option<f64> {
        self.response_time
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }
}
