//! Video-embed provider URL templates.
//!
//! The catalog is a JSON document with one template map per media kind:
//!
//! ```json
//! { "movie": { "alpha": "https://alpha.example/embed/movie/{{mediaId}}" },
//!   "tv":    { "alpha": "https://alpha.example/embed/tv/{{mediaId}}/{{seasonNumber}}/{{episodeNumber}}" } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{MediaKind, TitleKey};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("valid placeholder regex"));

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("unknown {kind} provider: {name}")]
    UnknownProvider { kind: MediaKind, name: String },
    #[error("template for {provider} has unresolved placeholder {placeholder}")]
    UnresolvedPlaceholder { provider: String, placeholder: String },
    #[error("read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Provider name → URL template, per media kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedCatalog {
    #[serde(default)]
    pub movie: BTreeMap<String, String>,
    #[serde(default)]
    pub tv: BTreeMap<String, String>,
}

/// Episode selection for TV embeds. Movies ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Episode {
    pub season: u32,
    pub episode: u32,
}

impl Default for Episode {
    fn default() -> Self {
        Self {
            season: 1,
            episode: 1,
        }
    }
}

impl EmbedCatalog {
    pub fn from_json(raw: &str) -> Result<Self, EmbedError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, EmbedError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    fn templates(&self, kind: MediaKind) -> &BTreeMap<String, String> {
        match kind {
            MediaKind::Movie => &self.movie,
            MediaKind::Tv => &self.tv,
        }
    }

    /// Provider names available for a media kind, sorted.
    pub fn providers(&self, kind: MediaKind) -> Vec<&str> {
        self.templates(kind).keys().map(String::as_str).collect()
    }

    /// Build the embed URL for `title` on `provider`.
    pub fn render(
        &self,
        title: TitleKey,
        provider: &str,
        episode: Episode,
    ) -> Result<String, EmbedError> {
        let template =
            self.templates(title.kind)
                .get(provider)
                .ok_or_else(|| EmbedError::UnknownProvider {
                    kind: title.kind,
                    name: provider.to_string(),
                })?;

        let mut unresolved = None;
        let url = PLACEHOLDER.replace_all(template, |caps: &Captures| {
            let value = match (&caps[1], title.kind) {
                ("mediaId", _) => Some(title.id.to_string()),
                ("seasonNumber", MediaKind::Tv) => Some(episode.season.to_string()),
                ("episodeNumber", MediaKind::Tv) => Some(episode.episode.to_string()),
                _ => None,
            };
            value.unwrap_or_else(|| {
                if unresolved.is_none() {
                    unresolved = Some(caps[1].to_string());
                }
                String::new()
            })
        });

        match unresolved {
            Some(placeholder) => Err(EmbedError::UnresolvedPlaceholder {
                provider: provider.to_string(),
                placeholder,
            }),
            None => Ok(url.into_owned()),
        }
    }
}
