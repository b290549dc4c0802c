use historian_core::{CallerIdentity, HistorianError, RequestContext};
use tracing::warn;

/// Returns the caller attached to the context.
///
/// Having a caller is the only requirement here; finer-grained access
/// checks belong to the engine.
pub fn authorize(ctx: &RequestContext) -> Result<&CallerIdentity, HistorianError> {
    ctx.caller().ok_or_else(|| {
        warn!("alert state query rejected: no caller identity");
        HistorianError::Unauthenticated
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_anonymous_context() {
        let err = authorize(&RequestContext::anonymous()).unwrap_err();
        assert!(matches!(err, HistorianError::Unauthenticated));
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn returns_attached_caller() {
        let ctx = RequestContext::with_caller(CallerIdentity::new(123, "user-1"));
        assert_eq!(authorize(&ctx).unwrap().org_id, 123);
    }
}
