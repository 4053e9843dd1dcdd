//! Report vocabulary backed by a Fluent bundle.
//!
//! Only the pt-BR resource ships with the crate. It is embedded at compile
//! time so the report never depends on the working directory.

use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use tracing::warn;
use unic_langid::LanguageIdentifier;

const REPORT_LOCALE: &str = "pt-BR";
const REPORT_RESOURCE: &str = include_str!("../locales/pt-BR/report.ftl");

/// Message store for report text
pub struct ReportMessages {
    bundle: FluentBundle<FluentResource>,
}

impl ReportMessages {
    /// Build the bundle from the embedded pt-BR resource
    pub fn new() -> Self {
        Self::from_source(REPORT_RESOURCE)
    }

    /// Build a bundle from raw Fluent source; entries that fail to parse are skipped
    pub fn from_source(source: &str) -> Self {
        let locale: LanguageIdentifier = REPORT_LOCALE.parse().unwrap_or_default();
        let mut bundle = FluentBundle::new(vec![locale]);
        bundle.set_use_isolating(false);

        let resource = match FluentResource::try_new(source.to_string()) {
            Ok(resource) => resource,
            Err((resource, errors)) => {
                warn!(error_count = errors.len(), "Report messages contain syntax errors");
                resource
            }
        };

        if let Err(errors) = bundle.add_resource(resource) {
            warn!(error_count = errors.len(), "Duplicate report message ids");
        }

        Self { bundle }
    }

    /// Get a message, substituting `args` into its placeables
    pub fn get_message(&self, key: &str, args: &[(&str, &str)]) -> String {
        let msg = match self.bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let fluent_args = FluentArgs::from_iter(
            args.iter()
                .map(|(k, v)| (*k, FluentValue::from(*v))),
        );

        let mut errors = vec![];
        let value = self
            .bundle
            .format_pattern(pattern, Some(&fluent_args), &mut errors);
        if !errors.is_empty() {
            warn!(key = %key, error_count = errors.len(), "Report message formatted with errors");
        }
        value.into_owned()
    }

    pub fn has_message(&self, key: &str) -> bool {
        self.bundle.has_message(key)
    }
}

impl Default for ReportMessages {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static REPORT_MESSAGES: ReportMessages = ReportMessages::new();
}

/// Convenience function to get a report message without arguments
pub fn t(key: &str) -> String {
    REPORT_MESSAGES.with(|messages| messages.get_message(key, &[]))
}

/// Convenience function to get a report message with arguments
pub fn t_args(key: &str, args: &[(&str, &str)]) -> String {
    REPORT_MESSAGES.with(|messages| messages.get_message(key, args))
}
