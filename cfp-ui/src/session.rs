//! Per-user client state: at most one result, replaced wholesale on success.

use cfp_core::footprint::FootprintResult;
use cfp_core::lifestyle::LifestyleInput;
use chrono::{DateTime, Local};
use log::{error, info, warn};

use crate::transport::{ClientError, EstimateTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Transient message shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    fn failure(title: &str, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            title: title.to_string(),
            description: description.into(),
        }
    }
}

/// A result together with the moment it arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct Completed {
    pub result: FootprintResult,
    pub received_at: DateTime<Local>,
}

#[derive(Debug, Default)]
pub struct Session {
    current: Option<Completed>,
    loading: bool,
    notice: Option<Notice>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Completed> {
        self.current.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Validate `input` and mark a call as in flight.
    ///
    /// Invalid input is refused with a validation notice; the caller must not
    /// contact the transport then. Pair a successful `begin` with [`finish`].
    ///
    /// [`finish`]: Session::finish
    pub fn begin(&mut self, input: &LifestyleInput) -> Result<(), Notice> {
        if let Err(e) = input.validate() {
            warn!("Submission blocked: {:?}", input.invalid_fields());
            let notice = Notice::failure("Invalid Input", e.to_string());
            self.notice = Some(notice.clone());
            return Err(notice);
        }
        self.loading = true;
        Ok(())
    }

    /// Record the outcome of the call started by [`Session::begin`].
    ///
    /// On failure the previous result, if any, is kept as it was.
    pub fn finish(&mut self, outcome: Result<FootprintResult, ClientError>) -> &Notice {
        self.loading = false;
        let notice = match outcome {
            Ok(result) => {
                info!("Received prediction: {:.2} tons", result.carbon_footprint);
                self.current = Some(Completed {
                    result,
                    received_at: Local::now(),
                });
                Notice {
                    kind: NoticeKind::Success,
                    title: "Analysis Complete".to_string(),
                    description: "Your carbon footprint has been calculated using AI.".to_string(),
                }
            }
            Err(e) => {
                error!("Calculation error: {}", e);
                Notice::failure("Calculation Failed", e.to_string())
            }
        };
        self.notice.insert(notice)
    }

    /// Validate and submit `input` in one step.
    pub async fn submit<T: EstimateTransport>(
        &mut self,
        transport: &T,
        input: &LifestyleInput,
    ) -> &Notice {
        if let Err(notice) = self.begin(input) {
            return self.notice.insert(notice);
        }
        let outcome = transport.submit(input).await;
        self.finish(outcome)
    }
}
