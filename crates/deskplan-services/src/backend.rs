use crate::ServiceError;

/// An image ready to travel to a backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// One element of a multimodal prompt.
#[derive(Clone, Debug)]
pub enum PromptPart {
    Text(String),
    Image(EncodedImage),
}

/// A text-generation endpoint accepting interleaved text and images.
///
/// Implementations are blocking and perform a single attempt; callers
/// decide what happens on failure.
pub trait TextBackend {
    fn generate(&self, parts: &[PromptPart]) -> Result<String, ServiceError>;
}

impl<T: TextBackend + ?Sized> TextBackend for &T {
    fn generate(&self, parts: &[PromptPart]) -> Result<String, ServiceError> {
        (**self).generate(parts)
    }
}

impl<T: TextBackend + ?Sized> TextBackend for Box<T> {
    fn generate(&self, parts: &[PromptPart]) -> Result<String, ServiceError> {
        (**self).generate(parts)
    }
}

/// Backend that answers every prompt with the same canned reply.
///
/// Used to replay recorded service output offline.
#[derive(Clone, Debug)]
pub struct StaticBackend {
    reply: Result<String, String>,
}

impl StaticBackend {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
        }
    }

    /// Backend whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
        }
    }
}

impl TextBackend for StaticBackend {
    fn generate(&self, _parts: &[PromptPart]) -> Result<String, ServiceError> {
        self.reply.clone().map_err(ServiceError::Backend)
    }
}
