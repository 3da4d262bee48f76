use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    const MIN_GRAPHEMES: usize = 2;
    const MAX_GRAPHEMES: usize = 256;

    pub fn parse(name: String) -> Result<Self, InvalidNameError> {
        let trimmed = name.trim();
        let is_empty_or_whitespace = trimmed.is_empty();

        // Surrounding whitespace does not count toward the length limits.
        let graphemes = trimmed.graphemes(true).count();
        let is_too_short = graphemes < Self::MIN_GRAPHEMES;
        let is_too_long = graphemes > Self::MAX_GRAPHEMES;

        let forbidden_characters = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];
        let has_forbidden_characters = name.chars().any(|g| forbidden_characters.contains(&g));

        if is_empty_or_whitespace || is_too_short || is_too_long || has_forbidden_characters {
            Err(InvalidNameError(name))
        } else {
            Ok(Self(name))
        }
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Carries the rejected name back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0:?} is not a valid user name")]
pub struct InvalidNameError(pub String);

impl InvalidNameError {
    pub fn name(&self) -> &str {
        &self.0
    }
}
