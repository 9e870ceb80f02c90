// src/services/side_effect.rs

use std::future::Future;

/// Outcome of a best-effort call (notification, webhook).
///
/// Failures are logged when they happen and never turn into an `AppError`;
/// handlers are free to drop the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    Delivered,
    Failed(String),
}

impl SideEffect {
    pub async fn attempt<F>(label: &'static str, call: F) -> Self
    where
        F: Future<Output = anyhow::Result<()>>,
    {
        match call.await {
            Ok(()) => SideEffect::Delivered,
            Err(err) => {
                tracing::warn!(side_effect = label, error = %err, "best-effort call failed");
                SideEffect::Failed(err.to_string())
            }
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, SideEffect::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failure_is_captured_not_raised() {
        let outcome = SideEffect::attempt("webhook", async { anyhow::bail!("connection refused") }).await;
        assert_eq!(outcome, SideEffect::Failed("connection refused".into()));
        assert!(!outcome.is_delivered());

        let outcome = SideEffect::attempt("webhook", async { Ok(()) }).await;
        assert!(outcome.is_delivered());
    }
}
