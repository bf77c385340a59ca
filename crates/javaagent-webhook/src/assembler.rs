use base64::{Engine as _, engine::general_purpose};

use crate::admission_request::AdmissionRequest;
use crate::admission_response::{AdmissionResponse, AdmissionResponseStatus, PatchType};
use crate::errors::{Result, WebhookError};
use crate::patch::{self, PatchOperation};

/// Wrap `patch` into the response for `request`.
///
/// Requests are always allowed: failures happen before this point and are
/// reported to the caller as errors, never as a denial.
pub fn assemble(request: &AdmissionRequest, patch: &[PatchOperation]) -> Result<AdmissionResponse> {
    let patch = patch::to_json(patch)
        .map(|json| general_purpose::STANDARD.encode(json))
        .map_err(WebhookError::Serialization)?;

    Ok(AdmissionResponse {
        uid: request.uid.clone(),
        allowed: true,
        patch_type: Some(PatchType::JSONPatch),
        patch: Some(patch),
        status: Some(AdmissionResponseStatus::success()),
    })
}
