//! Message bundles read from a directory at runtime.
//!
//! The directory holds one `{locale}.json` file per locale, so translators
//! can update copy without a rebuild.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::i18n::{Locale, MessageBundle};
use crate::ports::{I18nError, MessageSource};

#[derive(Debug, Clone)]
pub struct FileMessageSource {
    dir: PathBuf,
}

impl FileMessageSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, locale: Locale) -> PathBuf {
        self.dir.join(format!("{}.json", locale.tag()))
    }
}

#[async_trait]
impl MessageSource for FileMessageSource {
    async fn load(&self, locale: Locale) -> Result<MessageBundle, I18nError> {
        let path = self.path_for(locale);
        tracing::debug!(path = %path.display(), "Loading message bundle");

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(I18nError::BundleMissing(locale.tag().to_string()));
            }
            Err(e) => return Err(I18nError::io(locale, e.to_string())),
        };

        MessageBundle::from_json(locale, &raw).map_err(|e| I18nError::malformed(locale, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn loads_bundle_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("ar.json"),
            r#"{ "nav": { "home": "الرئيسية" } }"#,
        )
        .unwrap();

        let bundle = FileMessageSource::new(dir.path()).load(Locale::Ar).await.unwrap();
        assert_eq!(bundle.lookup("nav", "home"), Some("الرئيسية"));
    }

    #[tokio::test]
    async fn missing_file_is_bundle_missing() {
        let dir = TempDir::new().unwrap();
        let err = FileMessageSource::new(dir.path()).load(Locale::En).await.unwrap_err();
        assert!(matches!(err, I18nError::BundleMissing(tag) if tag == "en"));
    }

    #[tokio::test]
    async fn malformed_file_is_reported() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("en.json"), "{ not json").unwrap();

        let err = FileMessageSource::new(dir.path()).load(Locale::En).await.unwrap_err();
        assert!(matches!(err, I18nError::Malformed { .. }));
    }
}
