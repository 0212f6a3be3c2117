//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the listener binds.

use tracing::warn;

/// Warn when the directory holding view templates is missing.
///
/// `template_prefix` is the view resolver prefix; only its directory part is
/// checked, so `templates/` and `templates/product_` both check `templates`.
pub async fn ensure_template_dir(template_prefix: &str) -> anyhow::Result<()> {
    let dir = template_dir(template_prefix);
    match tokio::fs::metadata(&dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!("template location {dir} is not a directory")),
        Err(_) => {
            warn!(%dir, "template directory not found; views will fail to render");
            Ok(())
        }
    }
}

fn template_dir(prefix: &str) -> String {
    match prefix.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => prefix[..idx].to_string(),
        None => ".".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_dir_strips_file_part() {
        assert_eq!(template_dir("templates/"), "templates");
        assert_eq!(template_dir("templates/product_"), "templates");
        assert_eq!(template_dir("/WEB-INF/jsp/"), "/WEB-INF/jsp");
        assert_eq!(template_dir("/"), "/");
        assert_eq!(template_dir("views_"), ".");
    }

    #[tokio::test]
    async fn missing_dir_only_warns() {
        assert!(ensure_template_dir("/definitely/not/here/").await.is_ok());
    }

    #[tokio::test]
    async fn file_in_place_of_dir_is_an_error() {
        let file = std::env::temp_dir().join(format!("tpl-check-{}", std::process::id()));
        tokio::fs::write(&file, b"x").await.unwrap();
        let prefix = format!("{}/", file.display());
        assert!(ensure_template_dir(&prefix).await.is_err());
        let _ = tokio::fs::remove_file(&file).await;
    }
}
