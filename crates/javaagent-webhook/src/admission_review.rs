use k8s_openapi::api::core::v1::Pod;

use crate::admission_request::AdmissionRequest;
use crate::admission_response::AdmissionResponse;
use crate::constants::{ADMISSION_REVIEW_API_VERSION, ADMISSION_REVIEW_KIND};
use crate::errors::{Result, WebhookError};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionReview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<AdmissionRequest>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<AdmissionResponse>,
}

impl Default for AdmissionReview {
    fn default() -> Self {
        AdmissionReview {
            api_version: Some(String::from(ADMISSION_REVIEW_API_VERSION)),
            kind: Some(String::from(ADMISSION_REVIEW_KIND)),
            request: None,
            response: None,
        }
    }
}

/// An inbound review whose request carried a well formed Pod.
#[derive(Clone, Debug)]
pub struct DecodedReview {
    kind: Option<String>,
    api_version: Option<String>,
    pub request: AdmissionRequest,
    pub pod: Pod,
}

impl DecodedReview {
    /// Attach `response` to the envelope the request arrived in.
    pub fn into_review(self, response: AdmissionResponse) -> AdmissionReview {
        AdmissionReview {
            kind: self.kind,
            api_version: self.api_version,
            request: Some(self.request),
            response: Some(response),
        }
    }
}

/// Decode an inbound AdmissionReview.
///
/// `Ok(None)` is returned when the envelope has no `request`, or the body
/// is a JSON `null`: there is nothing to mutate and the caller should
/// answer with an empty body.
pub fn decode(body: &[u8]) -> Result<Option<DecodedReview>> {
    let Some(review) = serde_json::from_slice::<Option<AdmissionReview>>(body)
        .map_err(WebhookError::EnvelopeDecode)?
    else {
        return Ok(None);
    };

    let Some(request) = review.request else {
        return Ok(None);
    };
    let pod = request.pod()?;

    Ok(Some(DecodedReview {
        kind: review.kind,
        api_version: review.api_version,
        request,
        pod,
    }))
}

pub fn encode(review: &AdmissionReview) -> Result<Vec<u8>> {
    serde_json::to_vec(review).map_err(WebhookError::Serialization)
}
