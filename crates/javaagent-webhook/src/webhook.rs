use tracing::{debug, info};

use crate::admission_review;
use crate::assembler;
use crate::config::InjectionConfig;
use crate::errors::Result;
use crate::planner;

/// Turns inbound AdmissionReview bodies into mutated ones.
///
/// It holds no state besides the configuration, a single instance can
/// serve concurrent requests.
#[derive(Clone, Debug, Default)]
pub struct Webhook {
    config: InjectionConfig,
}

impl Webhook {
    pub fn new(config: InjectionConfig) -> Self {
        Webhook { config }
    }

    pub fn config(&self) -> &InjectionConfig {
        &self.config
    }

    /// Process the raw body of an AdmissionReview.
    ///
    /// An empty body is returned when the review has no request.
    pub fn mutate(&self, body: &[u8]) -> Result<Vec<u8>> {
        if self.config.debug {
            info!(body = %String::from_utf8_lossy(body), "recv");
        }

        let response_body = match admission_review::decode(body)? {
            Some(decoded) => {
                let patch = planner::plan(&decoded.pod, &self.config);
                let response = assembler::assemble(&decoded.request, &patch)?;
                debug!(uid = %response.uid, "pod mutated");
                admission_review::encode(&decoded.into_review(response))?
            }
            None => {
                debug!("admission review without request, nothing to do");
                Vec::new()
            }
        };

        if self.config.debug {
            info!(body = %String::from_utf8_lossy(&response_body), "resp");
        }

        Ok(response_body)
    }
}
