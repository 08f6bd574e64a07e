//! Handlers bound to the built-in actions

use std::sync::Arc;

use async_trait::async_trait;

use super::{ActionContext, ActionHandler};
use crate::client::ScanApi;
use crate::error::Result;
use crate::host::ReportSurface;
use crate::scan::ScanWorkflow;

/// Opens the report form
pub struct ReportScamHandler {
    surface: Arc<dyn ReportSurface>,
}

impl ReportScamHandler {
    pub fn new(surface: Arc<dyn ReportSurface>) -> Self {
        Self { surface }
    }
}

#[async_trait]
impl ActionHandler for ReportScamHandler {
    async fn handle(&self, _context: &ActionContext) -> Result<()> {
        self.surface.open_report_form().await
    }
}

/// Starts a scan of the link the action was invoked on
pub struct ScanLinkHandler<C: ScanApi + 'static> {
    workflow: Arc<ScanWorkflow<C>>,
}

impl<C: ScanApi + 'static> ScanLinkHandler<C> {
    pub fn new(workflow: Arc<ScanWorkflow<C>>) -> Self {
        Self { workflow }
    }
}

#[async_trait]
impl<C: ScanApi + 'static> ActionHandler for ScanLinkHandler<C> {
    async fn handle(&self, context: &ActionContext) -> Result<()> {
        match context.link_url.as_deref() {
            Some(url) => {
                log::debug!("URL to scan: {}", url);
                let outcome = self.workflow.submit(url).await;
                log::debug!("Scan submission outcome: {:?}", outcome);
            }
            None => log::warn!("scan-link invoked without a target link"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{MockScanClient, completed};
    use crate::config::PollingConfig;
    use crate::dispatch::{ActionId, Dispatcher, Invocation};
    use crate::host::MenuRegistry;
    use crate::host::recording::{RecordingNotifier, RecordingSurface};
    use crate::scan::ScanOutcome;

    fn dispatcher_with(
        client: MockScanClient,
    ) -> (
        Dispatcher,
        Arc<ScanWorkflow<MockScanClient>>,
        Arc<MockScanClient>,
        Arc<RecordingSurface>,
    ) {
        let client = Arc::new(client);
        let workflow = Arc::new(ScanWorkflow::new(
            client.clone(),
            Arc::new(RecordingNotifier::new()),
            PollingConfig::default(),
        ));
        let surface = Arc::new(RecordingSurface::default());

        let mut dispatcher = Dispatcher::new(Arc::new(MenuRegistry::new()));
        dispatcher.register_handler(
            ActionId::ReportScam,
            Arc::new(ReportScamHandler::new(surface.clone())),
        );
        dispatcher.register_handler(
            ActionId::ScanLink,
            Arc::new(ScanLinkHandler::new(workflow.clone())),
        );
        (dispatcher, workflow, client, surface)
    }

    #[tokio::test(start_paused = true)]
    async fn test_scan_link_runs_workflow() {
        let client = MockScanClient::new()
            .with_analysis(Ok(completed(0, 1, 50)))
            .await;
        let (dispatcher, workflow, client, surface) = dispatcher_with(client);

        let routed = dispatcher
            .on_action_invoked("scan-link", &ActionContext::for_link("https://l.example"))
            .await;

        assert_eq!(routed, Invocation::Handled(ActionId::ScanLink));
        assert_eq!(client.submitted_urls().await, vec!["https://l.example"]);
        assert_eq!(surface.opened(), 0);

        let results = workflow.wait_pending().await;
        assert!(matches!(results[0], ScanOutcome::Completed { .. }));
    }

    #[tokio::test]
    async fn test_scan_link_without_url_sends_nothing() {
        let (dispatcher, workflow, client, _surface) =
            dispatcher_with(MockScanClient::new());

        dispatcher
            .on_action_invoked("scan-link", &ActionContext::default())
            .await;

        assert_eq!(client.call_counts().await.submit_url, 0);
        assert_eq!(workflow.pending_count().await, 0);
    }

    #[tokio::test]
    async fn test_report_scam_opens_surface() {
        let (dispatcher, _workflow, client, surface) =
            dispatcher_with(MockScanClient::new());

        dispatcher
            .on_action_invoked("reportScam", &ActionContext::default())
            .await;

        assert_eq!(surface.opened(), 1);
        assert_eq!(client.call_counts().await.submit_url, 0);
    }
}
