//! 对话框适配器
//!
//! - TerminalDialog: 命令行下从 stdin 读取选择
//! - ScriptedDialog: 预置答案，记录所有提示（测试用）

use crate::kernel::services::ports::dialog::{ConfirmRequest, DialogFuture, DialogService, Severity};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use tokio::io::{AsyncBufReadExt, BufReader};

pub struct TerminalDialog {
    assume_yes: bool,
}

impl TerminalDialog {
    pub fn new() -> Self {
        Self { assume_yes: false }
    }

    /// Answers every prompt with its first option without reading stdin.
    pub fn assume_yes() -> Self {
        Self { assume_yes: true }
    }
}

impl Default for TerminalDialog {
    fn default() -> Self {
        Self::new()
    }
}

/// Accepts a 1-based option number or a case-insensitive option prefix.
pub fn parse_choice(input: &str, options: &[String]) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(n) = input.parse::<usize>() {
        return (1..=options.len()).contains(&n).then(|| n - 1);
    }
    let lower = input.to_lowercase();
    options
        .iter()
        .position(|option| option.to_lowercase().starts_with(&lower))
}

impl DialogService for TerminalDialog {
    fn confirm(&self, request: ConfirmRequest) -> DialogFuture<'_> {
        Box::pin(async move {
            if self.assume_yes {
                return Some(0);
            }
            eprintln!("[{}] {}", request.severity.label(), request.message);
            for (idx, option) in request.options.iter().enumerate() {
                eprintln!("  {}) {}", idx + 1, option);
            }
            let mut line = String::new();
            let mut reader = BufReader::new(tokio::io::stdin());
            match reader.read_line(&mut line).await {
                Ok(0) => None,
                Ok(_) => parse_choice(&line, &request.options),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read confirmation");
                    None
                }
            }
        })
    }

    fn notify(&self, severity: Severity, message: &str) {
        eprintln!("[{}] {}", severity.label(), message);
    }
}

#[derive(Default)]
pub struct ScriptedDialog {
    answers: Mutex<VecDeque<Option<usize>>>,
    prompts: Mutex<Vec<ConfirmRequest>>,
    notices: Mutex<Vec<(Severity, String)>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl ScriptedDialog {
    /// Prompts beyond the scripted answers are treated as dismissed.
    pub fn new(answers: impl IntoIterator<Item = Option<usize>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn prompts(&self) -> Vec<ConfirmRequest> {
        lock(&self.prompts).clone()
    }

    pub fn notices(&self) -> Vec<(Severity, String)> {
        lock(&self.notices).clone()
    }
}

impl DialogService for ScriptedDialog {
    fn confirm(&self, request: ConfirmRequest) -> DialogFuture<'_> {
        let answer = lock(&self.answers).pop_front().flatten();
        lock(&self.prompts).push(request);
        Box::pin(async move { answer })
    }

    fn notify(&self, severity: Severity, message: &str) {
        lock(&self.notices).push((severity, message.to_string()));
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/dialog.rs"]
mod tests;
