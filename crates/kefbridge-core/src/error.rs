use thiserror::Error;

/// Errors from accessory reconciliation.
///
/// Handler construction and registry failures propagate to the caller;
/// everything that happens *after* a handler is bound (device errors
/// during get/set or polling) is logged and swallowed instead.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] kefbridge_api::Error),

    #[error("accessory registry error: {message}")]
    Registry { message: String },
}
