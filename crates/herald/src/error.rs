use std::borrow::Cow;

/// Errors raised by the facade: configuration loading and default-instance setup.
///
/// Emitter operations themselves never fail.
#[derive(Debug, thiserror::Error)]
pub enum HeraldError {
    /// Building or deserializing a configuration failed.
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: ::config::ConfigError, context: Option<Cow<'static, str>> },

    /// The process-wide emitter was already created.
    #[error("Already initialized{}: {message}", format_context(.context))]
    AlreadyInitialized { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Result alias for facade operations.
pub type Result<T> = std::result::Result<T, HeraldError>;

/// Attaches a human-readable context to an error on its way up.
pub trait HeraldErrorExt<T> {
    /// # Errors
    /// Returns the original error, converted into [`HeraldError`], with `context` attached.
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T>;
}

impl<T> HeraldErrorExt<T> for Result<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                HeraldError::Config { context: c, .. }
                | HeraldError::AlreadyInitialized { context: c, .. } => {
                    *c = Some(context.into());
                },
            }
            e
        })
    }
}

impl<T> HeraldErrorExt<T> for std::result::Result<T, ::config::ConfigError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T> {
        self.map_err(|source| HeraldError::Config { source, context: Some(context.into()) })
    }
}

impl From<::config::ConfigError> for HeraldError {
    fn from(source: ::config::ConfigError) -> Self {
        Self::Config { source, context: None }
    }
}

#[allow(clippy::ref_option)]
fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_rendered() {
        let err: Result<()> = Err(HeraldError::AlreadyInitialized {
            message: "default emitter exists".into(),
            context: None,
        });
        let err = err.context("init").unwrap_err();
        assert_eq!(err.to_string(), "Already initialized (init): default emitter exists");
    }

    #[test]
    fn config_errors_convert() {
        let raw: std::result::Result<(), _> =
            Err(::config::ConfigError::Message("boom".to_owned()));
        let err = raw.context("Loading").unwrap_err();
        assert!(matches!(err, HeraldError::Config { context: Some(_), .. }));
        assert_eq!(err.to_string(), "Config error (Loading): boom");
    }
}
