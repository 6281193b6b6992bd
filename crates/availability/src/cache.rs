use std::collections::HashMap;

use marquee_core::release::ClassificationResult;
use marquee_core::types::TitleKey;

/// Session-lifetime memo of classification results per title.
///
/// Entries never expire; callers decide when to [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct ClassificationCache {
    entries: HashMap<TitleKey, ClassificationResult>,
}

impl ClassificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &TitleKey) -> Option<&ClassificationResult> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: TitleKey, result: ClassificationResult) {
        self.entries.insert(key, result);
    }

    /// Drop every entry, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use marquee_core::release::ReleaseLabel;

    use super::*;

    fn result(label: ReleaseLabel) -> ClassificationResult {
        ClassificationResult {
            release_type: label,
            certification: Some("PG".into()),
        }
    }

    #[test]
    fn keys_distinguish_media_kind() {
        let mut cache = ClassificationCache::new();
        cache.set(TitleKey::movie(42), result(ReleaseLabel::Cam));
        cache.set(TitleKey::tv(42), result(ReleaseLabel::Hd));

        assert_eq!(cache.len(), 2);
        assert_eq!(
            cache.get(&TitleKey::movie(42)).map(|r| r.release_type),
            Some(ReleaseLabel::Cam)
        );
        assert_eq!(
            cache.get(&TitleKey::tv(42)).map(|r| r.release_type),
            Some(ReleaseLabel::Hd)
        );
        assert!(cache.get(&TitleKey::movie(7)).is_none());
    }

    #[test]
    fn set_overwrites_and_clear_empties() {
        let mut cache = ClassificationCache::new();
        cache.set(TitleKey::movie(1), result(ReleaseLabel::NotReleasedYet));
        cache.set(TitleKey::movie(1), result(ReleaseLabel::Hd));
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get(&TitleKey::movie(1)).map(|r| r.release_type),
            Some(ReleaseLabel::Hd)
        );

        assert_eq!(cache.clear(), 1);
        assert!(cache.is_empty());
        assert_eq!(cache.clear(), 0);
    }
}
