use std::future::Future;
use std::pin::Pin;

pub type DialogFuture<'a> = Pin<Box<dyn Future<Output = Option<usize>> + Send + 'a>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A question with a fixed set of answers. The answer is the index into `options`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub severity: Severity,
    pub message: String,
    pub options: Vec<String>,
    pub cancel_id: Option<usize>,
}

impl ConfirmRequest {
    pub fn new(severity: Severity, message: impl Into<String>, options: &[&str]) -> Self {
        Self {
            severity,
            message: message.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            cancel_id: None,
        }
    }

    pub fn with_cancel_id(mut self, cancel_id: usize) -> Self {
        self.cancel_id = Some(cancel_id);
        self
    }

    /// True when `choice` picked the first option and that option is not the cancel one.
    pub fn accepted(&self, choice: Option<usize>) -> bool {
        choice == Some(0) && self.cancel_id != Some(0)
    }
}

pub trait DialogService: Send + Sync {
    /// `None` when the prompt was dismissed without a choice.
    fn confirm(&self, request: ConfirmRequest) -> DialogFuture<'_>;

    fn notify(&self, severity: Severity, message: &str);
}
