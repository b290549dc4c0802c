use std::sync::Arc;

use historian_core::{HistorianError, RequestContext};
use historian_protocol::alertstate::{AlertStateQueryRequest, QueryResponse};
use historian_protocol::frame::Frame;
use tracing::{debug, instrument, warn};

use crate::auth::authorize;
use crate::engine::{EngineError, Historian};
use crate::projector::project_frame;
use crate::query::{build_history_query, HistoryQuery};

/// Request handlers for the alert state history API.
pub struct AlertStateHandlers<H: ?Sized> {
    historian: Arc<H>,
}

impl<H: ?Sized> Clone for AlertStateHandlers<H> {
    fn clone(&self) -> Self {
        Self {
            historian: Arc::clone(&self.historian),
        }
    }
}

impl<H: Historian + ?Sized> AlertStateHandlers<H> {
    pub fn new(historian: Arc<H>) -> Self {
        Self { historian }
    }

    /// Runs an alert state query for the caller in `ctx`.
    ///
    /// The engine is only called once the caller is known; its result is
    /// either projected completely or rejected.
    #[instrument(skip_all, fields(org_id = tracing::field::Empty))]
    pub async fn alert_state_query(
        &self,
        ctx: &RequestContext,
        req: AlertStateQueryRequest,
    ) -> Result<QueryResponse, HistorianError> {
        let caller = authorize(ctx)?;
        tracing::Span::current().record("org_id", caller.org_id);

        let query = build_history_query(&req, caller);
        debug!(
            rule_uid = %query.rule_uid,
            dashboard_uid = %query.dashboard_uid,
            panel_id = query.panel_id,
            limit = query.limit,
            label_filters = query.labels.len(),
            "built alert state history query"
        );

        let frame = self.run_query(ctx, &query).await.map_err(|err| {
            warn!(error = %err, "historian query failed");
            HistorianError::engine(err.to_string())
        })?;

        let response = project_frame(&frame).map_err(|err| {
            warn!(error = %err, rows = frame.rows(), "historian returned malformed frame");
            HistorianError::from(err)
        })?;

        debug!(entries = response.len(), "alert state query completed");
        Ok(response)
    }

    async fn run_query(
        &self,
        ctx: &RequestContext,
        query: &HistoryQuery,
    ) -> Result<Frame, EngineError> {
        let call = self.historian.query(ctx, query);
        match ctx.deadline() {
            Some(deadline) => tokio::time::timeout_at(deadline, call)
                .await
                .map_err(|_| EngineError::DeadlineExceeded)?,
            None => call.await,
        }
    }
}
