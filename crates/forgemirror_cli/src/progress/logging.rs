use forgemirror::sync::SyncProgress;

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: SyncProgress) {
        match event {
            SyncProgress::SyncStarted { kind, from, to } => {
                tracing::info!(kind = %kind.plural(), from = %from, to = %to, "Syncing");
            }

            SyncProgress::FetchedSource { kind, count } => {
                tracing::info!(kind = %kind.plural(), count, "Fetched source entities");
            }

            SyncProgress::Created { kind, name } => {
                tracing::info!(kind = %kind, name = %name, "Created");
            }

            SyncProgress::WouldCreate { kind, name } => {
                tracing::info!(kind = %kind, name = %name, "Would create (dry run)");
            }

            SyncProgress::AlreadyPresent { kind, name } => {
                tracing::debug!(kind = %kind, name = %name, "Already present");
            }

            SyncProgress::Skipped { kind, name, reason } => {
                tracing::debug!(kind = %kind, name = %name, reason = %reason, "Skipped");
            }

            SyncProgress::Failed { kind, name, error } => {
                tracing::warn!(kind = %kind, name = %name, error = %error, "Failed");
            }

            SyncProgress::SyncComplete {
                kind,
                from,
                to,
                created,
                already_present,
                skipped,
                failed,
            } => {
                tracing::info!(
                    kind = %kind.plural(),
                    from = %from,
                    to = %to,
                    created,
                    already_present,
                    skipped,
                    failed,
                    "Sync complete"
                );
            }

            SyncProgress::SyncAborted { kind, error } => {
                tracing::error!(kind = %kind.plural(), error = %error, "Sync aborted");
            }

            SyncProgress::MirrorStarted { from, to, repo } => {
                tracing::info!(from = %from, to = %to, repo = %repo, "Mirroring code");
            }

            SyncProgress::Cloning { path } => {
                tracing::info!(path = %path, "Cloning scratch repository");
            }

            SyncProgress::BranchesFound { count } => {
                tracing::info!(count, "Found branches");
            }

            SyncProgress::BranchPushed { branch } => {
                tracing::info!(branch = %branch, "Pushed");
            }

            SyncProgress::BranchWouldPush { branch } => {
                tracing::info!(branch = %branch, "Would push (dry run)");
            }

            SyncProgress::BranchFailed { branch, error } => {
                tracing::warn!(branch = %branch, error = %error, "Push failed");
            }

            SyncProgress::MirrorComplete {
                from,
                to,
                pushed,
                failed,
            } => {
                tracing::info!(from = %from, to = %to, pushed, failed, "Mirror complete");
            }

            SyncProgress::MirrorAborted { from, to, error } => {
                tracing::error!(from = %from, to = %to, error = %error, "Mirror aborted");
            }

            SyncProgress::Warning { message } => {
                tracing::warn!(message = %message, "Warning");
            }

            _ => {}
        }
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}
