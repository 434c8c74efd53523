//! Authenticated caller identity

/// A caller whose token verified successfully.
///
/// There is no public constructor: the only way to obtain an `Identity` is
/// through [`super::TokenAuthenticator::authenticate`], so holding one is proof
/// that a valid token was presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    subject_id: String,
}

impl Identity {
    pub(crate) fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
        }
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }
}
