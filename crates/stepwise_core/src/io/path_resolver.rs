//! Story path resolution from story names.
//!
//! A story name is a Rust type path such as `my_app::stories::ICanLogIn`
//! (what `std::any::type_name` returns for a story type). Module segments
//! become directories and the type name becomes the file name.

use heck::ToSnakeCase;
use std::fmt::Debug;

const DEFAULT_EXTENSION: &str = ".story";

/// Derives a logical story path from a story name.
pub trait StoryPathResolver: Debug + Send + Sync {
    fn resolve(&self, story_name: &str) -> String;
}

/// Resolves `a::b::ICanLogIn` to `a/b/i_can_log_in.story`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnderscoredCamelCaseResolver {
    extension: String,
}

impl Default for UnderscoredCamelCaseResolver {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION)
    }
}

impl UnderscoredCamelCaseResolver {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl StoryPathResolver for UnderscoredCamelCaseResolver {
    fn resolve(&self, story_name: &str) -> String {
        resolve_with(story_name, &self.extension, |name| name.to_snake_case())
    }
}

/// Resolves `a::b::ICanLogIn` to `a/b/ICanLogIn.story`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasePreservingResolver {
    extension: String,
}

impl Default for CasePreservingResolver {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION)
    }
}

impl CasePreservingResolver {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl StoryPathResolver for CasePreservingResolver {
    fn resolve(&self, story_name: &str) -> String {
        resolve_with(story_name, &self.extension, str::to_string)
    }
}

fn resolve_with(story_name: &str, extension: &str, file_name: impl Fn(&str) -> String) -> String {
    // Generic arguments are not part of the story location.
    let name = story_name
        .split('<')
        .next()
        .unwrap_or_default()
        .trim();
    let mut segments: Vec<&str> = name.split("::").filter(|s| !s.is_empty()).collect();
    let Some(last) = segments.pop() else {
        return extension.to_string();
    };

    let mut path = segments.join("/");
    if !path.is_empty() {
        path.push('/');
    }
    path.push_str(&file_name(last));
    path.push_str(extension);
    path
}

#[cfg(test)]
mod tests {
    use super::{CasePreservingResolver, StoryPathResolver, UnderscoredCamelCaseResolver};

    #[test]
    fn resolves_type_path_to_underscored_story_path() {
        let resolver = UnderscoredCamelCaseResolver::default();
        assert_eq!(
            resolver.resolve("my_app::stories::ICanLogIn"),
            "my_app/stories/i_can_log_in.story"
        );
        assert_eq!(resolver.resolve("ICanLogIn"), "i_can_log_in.story");
    }

    #[test]
    fn custom_extension_and_generics() {
        let resolver = UnderscoredCamelCaseResolver::new(".feature");
        assert_eq!(resolver.extension(), ".feature");
        assert_eq!(
            resolver.resolve("app::Checkout<app::Cart>"),
            "app/checkout.feature"
        );
    }

    #[test]
    fn acronyms_and_digits_split_sensibly() {
        let resolver = UnderscoredCamelCaseResolver::new("");
        assert_eq!(resolver.resolve("HTTPServer"), "http_server");
        assert_eq!(resolver.resolve("Story2Things"), "story2_things");
        assert_eq!(resolver.resolve("already_snake"), "already_snake");
        assert_eq!(resolver.resolve("web::Snake_Case"), "web/snake_case");
    }

    #[test]
    fn case_preserving_keeps_type_name() {
        let resolver = CasePreservingResolver::default();
        assert_eq!(
            resolver.resolve("my_app::stories::ICanLogIn"),
            "my_app/stories/ICanLogIn.story"
        );
    }

    #[test]
    fn empty_name_resolves_to_bare_extension() {
        assert_eq!(UnderscoredCamelCaseResolver::default().resolve(""), ".story");
    }
}
