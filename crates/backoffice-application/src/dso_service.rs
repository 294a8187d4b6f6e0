//! Generic named-procedure calls.

use std::sync::Arc;

use backoffice_core::gateway::{ApiResponse, ProcRequest, ProcedureGateway};
use backoffice_core::{BackofficeError, Result};
use serde_json::Value;

/// Callback run with a successful procedure response.
pub type SuccessCallback<'a> = &'a (dyn Fn(&ApiResponse) + Send + Sync);
/// Callback run with a failed procedure call's error.
pub type ErrorCallback<'a> = &'a (dyn Fn(&BackofficeError) + Send + Sync);

/// Thin pass-through to the procedure endpoint. No retries, no batching.
#[derive(Clone)]
pub struct DsoService {
    gateway: Arc<dyn ProcedureGateway>,
}

impl DsoService {
    pub fn new(gateway: Arc<dyn ProcedureGateway>) -> Self {
        Self { gateway }
    }

    /// Calls `proc_name` with `params`.
    ///
    /// The callbacks run in addition to the returned result; the error is
    /// still returned after `on_error` has seen it.
    pub async fn call_proc(
        &self,
        proc_name: &str,
        params: Value,
        on_success: Option<SuccessCallback<'_>>,
        on_error: Option<ErrorCallback<'_>>,
    ) -> Result<ApiResponse> {
        let request = ProcRequest::new(proc_name, params);

        match self.gateway.call_proc(&request).await {
            Ok(response) => {
                if let Some(on_success) = on_success {
                    on_success(&response);
                }
                Ok(response)
            }
            Err(e) => {
                tracing::debug!("[DsoService] {} failed: {}", proc_name, e);
                if let Some(on_error) = on_error {
                    on_error(&e);
                }
                Err(e)
            }
        }
    }

    /// [`DsoService::call_proc`] without callbacks.
    pub async fn call(&self, proc_name: &str, params: Value) -> Result<ApiResponse> {
        self.call_proc(proc_name, params, None, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct EchoGateway {
        fail: bool,
        requests: Mutex<Vec<ProcRequest>>,
    }

    #[async_trait]
    impl ProcedureGateway for EchoGateway {
        async fn call_proc(&self, request: &ProcRequest) -> Result<ApiResponse> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                Err(BackofficeError::http(500, None))
            } else {
                Ok(ApiResponse::new(200, json!({ "data": [request.params.clone()] })))
            }
        }
    }

    fn service(fail: bool) -> (DsoService, Arc<EchoGateway>) {
        let gateway = Arc::new(EchoGateway {
            fail,
            requests: Mutex::new(Vec::new()),
        });
        (DsoService::new(gateway.clone()), gateway)
    }

    #[tokio::test]
    async fn test_success_runs_callback_and_returns() {
        let (dso, gateway) = service(false);
        let seen = AtomicUsize::new(0);
        let on_success = |response: &ApiResponse| {
            assert_eq!(response.status, 200);
            seen.fetch_add(1, Ordering::SeqCst);
        };

        let response = dso
            .call_proc("HR_SEL_EMP", json!({ "p_org": 3 }), Some(&on_success), None)
            .await
            .unwrap();

        assert_eq!(response.payload(), Some(&json!([{ "p_org": 3 }])));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(gateway.requests.lock().unwrap()[0].proc_name, "HR_SEL_EMP");
    }

    #[tokio::test]
    async fn test_error_runs_callback_then_returns_error() {
        let (dso, _) = service(true);
        let seen = AtomicUsize::new(0);
        let on_error = |e: &BackofficeError| {
            assert_eq!(e.status(), Some(500));
            seen.fetch_add(1, Ordering::SeqCst);
        };

        let err = dso
            .call_proc("BROKEN", json!({}), None, Some(&on_error))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_call_without_callbacks() {
        let (dso, gateway) = service(false);
        dso.call("ANY", Value::Null).await.unwrap();
        assert_eq!(gateway.requests.lock().unwrap().len(), 1);
    }
}
