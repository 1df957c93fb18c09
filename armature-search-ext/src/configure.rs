//! Applying a configurator closure to a fresh request.

use armature_action::{ActionError, Result};

/// What a configurator may return.
///
/// `()` always succeeds. A `Result` lets a configurator abort the action;
/// the error is handed back to the caller unchanged.
pub trait ConfigureOutcome {
    /// Convert into the configuration result.
    fn into_result(self) -> Result<()>;
}

impl ConfigureOutcome for () {
    fn into_result(self) -> Result<()> {
        Ok(())
    }
}

impl ConfigureOutcome for Result<()> {
    fn into_result(self) -> Result<()> {
        self
    }
}

/// Run `configurator` against `request` and return the configured request.
///
/// The request is the configurator's only argument, so setters can be called
/// without naming anything else:
///
/// ```rust
/// use armature_search::IndexRequest;
/// use armature_search_ext::configure;
///
/// let request = configure(IndexRequest::default(), |r| {
///     r.index("posts").doc_type("article").id("1");
/// })
/// .unwrap();
/// assert_eq!(request.id.as_deref(), Some("1"));
/// ```
pub fn configure<R, F, O>(mut request: R, configurator: F) -> Result<R>
where
    F: FnOnce(&mut R) -> O,
    O: ConfigureOutcome,
{
    configurator(&mut request).into_result()?;
    Ok(request)
}

/// Reject an empty positional identifier.
pub(crate) fn require_identifier(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        Err(ActionError::null_argument(name))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Target {
        name: Option<String>,
        count: u32,
    }

    #[test]
    fn test_configurator_mutates_request() {
        let target = configure(Target::default(), |t| {
            t.name = Some("posts".to_string());
            t.count += 2;
        })
        .unwrap();

        assert_eq!(target.name.as_deref(), Some("posts"));
        assert_eq!(target.count, 2);
    }

    #[test]
    fn test_empty_configurator_leaves_request_unchanged() {
        let target = configure(Target { count: 7, ..Target::default() }, |_| {}).unwrap();
        assert_eq!(target.count, 7);
    }

    #[test]
    fn test_configurator_error_is_returned_unchanged() {
        let error = ActionError::Parse("bad".to_string());
        let result = configure(Target::default(), |_| Err::<(), _>(error.clone()));
        assert_eq!(result, Err(error));
    }

    #[test]
    fn test_require_identifier() {
        assert!(require_identifier("index", "posts").is_ok());
        assert_eq!(
            require_identifier("index", ""),
            Err(ActionError::NullArgument("index cannot be null".to_string()))
        );
    }
}
