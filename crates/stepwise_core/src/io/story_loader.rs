//! Story text loaders.

use log::{debug, error};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

/// Story loading errors.
#[derive(Debug)]
pub enum StoryLoadError {
    NotFound(String),
    Io { path: String, source: io::Error },
}

impl Display for StoryLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "story not found: {path}"),
            Self::Io { path, source } => write!(f, "failed to read story `{path}`: {source}"),
        }
    }
}

impl Error for StoryLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Fetches raw story text by logical path.
pub trait StoryLoader: Debug + Send + Sync {
    fn load_story_as_text(&self, story_path: &str) -> Result<String, StoryLoadError>;
}

/// Loads stories from files below a resource root directory.
///
/// The root defaults to the process working directory, so logical paths are
/// resolved the same way bundled resources are laid out in the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFromResources {
    root: PathBuf,
}

impl Default for LoadFromResources {
    fn default() -> Self {
        Self::new(".")
    }
}

impl LoadFromResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File system location for a logical path.
    pub fn resource_path(&self, story_path: &str) -> PathBuf {
        story_path
            .trim_start_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

impl StoryLoader for LoadFromResources {
    fn load_story_as_text(&self, story_path: &str) -> Result<String, StoryLoadError> {
        let path = self.resource_path(story_path);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                debug!(
                    "event=story_load module=io status=ok path={} bytes={}",
                    story_path,
                    text.len()
                );
                Ok(text)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                error!(
                    "event=story_load module=io status=error error_code=not_found path={}",
                    story_path
                );
                Err(StoryLoadError::NotFound(story_path.to_string()))
            }
            Err(err) => {
                error!(
                    "event=story_load module=io status=error error_code=io path={} error={}",
                    story_path, err
                );
                Err(StoryLoadError::Io {
                    path: story_path.to_string(),
                    source: err,
                })
            }
        }
    }
}

/// Serves story texts registered in memory, keyed by logical path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadFromMemory {
    stories: HashMap<String, String>,
}

impl LoadFromMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the text for `story_path`.
    pub fn with_story(mut self, story_path: impl Into<String>, text: impl Into<String>) -> Self {
        self.stories.insert(story_path.into(), text.into());
        self
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}

impl StoryLoader for LoadFromMemory {
    fn load_story_as_text(&self, story_path: &str) -> Result<String, StoryLoadError> {
        self.stories
            .get(story_path)
            .cloned()
            .ok_or_else(|| StoryLoadError::NotFound(story_path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadFromMemory, LoadFromResources, StoryLoadError, StoryLoader};

    #[test]
    fn loads_story_below_resource_root() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir_all(dir.path().join("org/example")).expect("story dir");
        std::fs::write(
            dir.path().join("org/example/cars.story"),
            "Scenario: drive\nGiven a car\n",
        )
        .expect("write story");

        let loader = LoadFromResources::new(dir.path());
        let text = loader
            .load_story_as_text("org/example/cars.story")
            .expect("story should load");
        assert!(text.starts_with("Scenario: drive"));

        let leading_slash = loader
            .load_story_as_text("/org/example/cars.story")
            .expect("leading slash is ignored");
        assert_eq!(leading_slash, text);
    }

    #[test]
    fn missing_story_is_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let loader = LoadFromResources::new(dir.path());
        let err = loader
            .load_story_as_text("missing.story")
            .expect_err("missing story must fail");
        assert!(matches!(err, StoryLoadError::NotFound(path) if path == "missing.story"));
    }

    #[test]
    fn default_root_is_working_directory() {
        assert_eq!(LoadFromResources::default().root(), std::path::Path::new("."));
    }

    #[test]
    fn memory_loader_serves_registered_texts() {
        let loader = LoadFromMemory::new()
            .with_story("a.story", "first")
            .with_story("a.story", "second");
        assert_eq!(loader.len(), 1);
        assert_eq!(
            loader.load_story_as_text("a.story").expect("registered"),
            "second"
        );
        assert!(matches!(
            loader.load_story_as_text("b.story"),
            Err(StoryLoadError::NotFound(_))
        ));
    }
}
