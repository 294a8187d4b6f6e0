//! Toast helpers.

use std::sync::Arc;

use backoffice_core::notification::{Notifier, Severity, TOAST_LIFE_MS, Toast};

use crate::locale_service::LocaleService;

/// Emits translated toasts through a [`Notifier`].
#[derive(Clone)]
pub struct MessageService {
    locale: LocaleService,
    notifier: Arc<dyn Notifier>,
}

impl MessageService {
    pub fn new(locale: LocaleService, notifier: Arc<dyn Notifier>) -> Self {
        Self { locale, notifier }
    }

    pub fn show_info(&self, message: &str) {
        self.show(Severity::Info, message);
    }

    pub fn show_error(&self, message: &str) {
        self.show(Severity::Error, message);
    }

    pub fn show_success(&self, message: &str) {
        self.show(Severity::Success, message);
    }

    /// `message` is a catalog key; unknown keys are shown verbatim.
    fn show(&self, severity: Severity, message: &str) {
        self.notifier.notify(Toast {
            severity,
            summary: self.locale.t(severity.summary_key()),
            detail: self.locale.t(message),
            life_ms: TOAST_LIFE_MS,
        });
    }
}
