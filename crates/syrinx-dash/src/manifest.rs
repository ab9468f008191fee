use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

use crate::{
    error::{CreationError, CreationResult},
    representation::Representation,
    writer::write_manifest,
};

/// The set of representations backing one synthesized manifest document.
///
/// Consumed once into a [`ManifestHandle`]; the generated text then lives
/// for the context's lifetime.
#[derive(Clone, Debug)]
pub struct ManifestBuildContext {
    representations: Vec<Representation>,
    duration: Option<Duration>,
}

impl ManifestBuildContext {
    /// # Errors
    ///
    /// A manifest needs at least one representation.
    pub fn new(representations: Vec<Representation>) -> CreationResult<Self> {
        if representations.is_empty() {
            return Err(CreationError::could_not_add_element(
                "MPD",
                "no representations to synthesize a manifest from",
            ));
        }
        Ok(Self {
            representations,
            duration: None,
        })
    }

    /// Sets the presentation duration emitted on the root element.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn representations(&self) -> &[Representation] {
        &self.representations
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Combined size of the underlying resources, without any network call.
    /// `-1` when any representation's size is unreported.
    #[must_use]
    pub fn total_content_length(&self) -> i64 {
        let mut total: i64 = 0;
        for representation in &self.representations {
            match representation.content_length {
                Some(len) => total = total.saturating_add(len as i64),
                None => return -1,
            }
        }
        total
    }
}

/// Shared, lazily generated manifest.
///
/// Generation runs once, on first access to the text; every later access
/// returns the cached document. The memo cell is single-writer-wins:
/// concurrent first accesses may both generate, one result is published and
/// the other discarded. Failures surface before anything is published, so a
/// cached read never fails.
#[derive(Clone, Debug)]
pub struct ManifestHandle {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    context: ManifestBuildContext,
    text: OnceLock<String>,
}

impl ManifestHandle {
    #[must_use]
    pub fn new(context: ManifestBuildContext) -> Self {
        Self {
            inner: Arc::new(Inner {
                context,
                text: OnceLock::new(),
            }),
        }
    }

    pub fn context(&self) -> &ManifestBuildContext {
        &self.inner.context
    }

    /// The manifest text, generating it on first call.
    ///
    /// # Errors
    ///
    /// Returns [`CreationError`] when a representation cannot be attached;
    /// only possible before a document has been cached.
    pub fn cached_manifest_str(&self) -> CreationResult<&str> {
        if let Some(text) = self.inner.text.get() {
            return Ok(text);
        }
        let generated = write_manifest(&self.inner.context)?;
        Ok(self.inner.text.get_or_init(|| generated))
    }
}

/// Two handles are the same manifest only when they share a context.
impl PartialEq for ManifestHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
