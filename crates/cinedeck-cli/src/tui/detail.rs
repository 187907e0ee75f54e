//! Detail view state: one title, its seasons and episodes.

use cinedeck_api::provider::{MediaDetails, MediaKind, MediaSummary, ProviderError};
use cinedeck_core::episodes::EpisodePicker;
use cinedeck_core::playback::PlayTarget;

/// Load state of the detail record.
#[derive(Debug, Clone)]
pub enum DetailLoad {
    /// Request in flight.
    Loading,
    /// Details loaded. Episodes live in the picker.
    Ready(MediaDetails),
    /// Request failed.
    Failed(ProviderError),
}

/// State of the detail screen.
#[derive(Debug, Clone)]
pub struct DetailState {
    /// Listing entry the view was opened from.
    pub summary: MediaSummary,
    /// Detail record load state.
    pub load: DetailLoad,
    picker: Option<EpisodePicker>,
}

impl DetailState {
    /// Opens the view for `summary` in the loading state.
    #[must_use]
    pub const fn new(summary: MediaSummary) -> Self {
        Self {
            summary,
            load: DetailLoad::Loading,
            picker: None,
        }
    }

    /// Kind and ID shown.
    #[must_use]
    pub const fn target(&self) -> (MediaKind, u64) {
        (self.summary.kind, self.summary.id)
    }

    /// `true` when the view shows `kind`/`id`.
    #[must_use]
    pub fn is_for(&self, kind: MediaKind, id: u64) -> bool {
        self.target() == (kind, id)
    }

    /// `true` after a failed load.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.load, DetailLoad::Failed(_))
    }

    /// Goes back to loading before a retry.
    pub fn reload(&mut self) {
        self.load = DetailLoad::Loading;
        self.picker = None;
    }

    /// Stores the fetched record.
    pub fn finish(&mut self, result: Result<MediaDetails, ProviderError>) {
        match result {
            Ok(mut details) => {
                if details.summary.kind == MediaKind::Tv {
                    let episodes = std::mem::take(&mut details.episodes);
                    let seasons = details.season_count.unwrap_or(0);
                    self.picker = Some(EpisodePicker::new(episodes, seasons));
                }
                self.load = DetailLoad::Ready(details);
            }
            Err(err) => self.load = DetailLoad::Failed(err),
        }
    }

    /// Episode selection (TV only, once loaded).
    #[must_use]
    pub const fn picker(&self) -> Option<&EpisodePicker> {
        self.picker.as_ref()
    }

    /// Selects the previous season.
    pub fn previous_season(&mut self) {
        if let Some(picker) = &mut self.picker {
            picker.select_season(picker.season().saturating_sub(1));
        }
    }

    /// Selects the next season.
    pub fn next_season(&mut self) {
        if let Some(picker) = &mut self.picker {
            picker.select_season(picker.season().saturating_add(1));
        }
    }

    /// Selects the previous episode.
    pub fn previous_episode(&mut self) {
        if let Some(picker) = &mut self.picker {
            picker.previous_episode();
        }
    }

    /// Selects the next episode.
    pub fn next_episode(&mut self) {
        if let Some(picker) = &mut self.picker {
            picker.next_episode();
        }
    }

    /// What playback would start.
    #[must_use]
    pub fn play_target(&self) -> PlayTarget {
        let (kind, id) = self.target();
        PlayTarget::new(
            kind,
            id,
            self.picker.as_ref().map(EpisodePicker::season),
            self.picker.as_ref().map(EpisodePicker::episode),
        )
    }
}

#[cfg(test)]
mod tests {
    use cinedeck_api::provider::Episode;

    use super::*;

    fn show() -> MediaSummary {
        MediaSummary {
            id: 1396,
            title: String::from("Breaking Bad"),
            year: Some(2008),
            rating: 8.9,
            poster: None,
            genres: vec![String::from("Drama")],
            description: String::new(),
            kind: MediaKind::Tv,
        }
    }

    fn details() -> MediaDetails {
        let ep = |season, episode| Episode {
            season,
            episode,
            title: format!("S{season}E{episode}"),
            runtime_min: Some(47),
        };
        MediaDetails {
            summary: show(),
            runtime_min: None,
            season_count: Some(2),
            episodes: vec![ep(1, 1), ep(1, 2), ep(2, 1)],
        }
    }

    #[test]
    fn test_finish_builds_episode_picker() {
        // Arrange
        let mut detail = DetailState::new(show());

        // Act
        detail.finish(Ok(details()));

        // Assert
        let picker = detail.picker().map(EpisodePicker::season_count);
        assert_eq!(picker, Some(2));
        assert!(matches!(detail.load, DetailLoad::Ready(ref d) if d.episodes.is_empty()));
    }

    #[test]
    fn test_play_target_follows_selection() {
        // Arrange
        let mut detail = DetailState::new(show());
        detail.finish(Ok(details()));

        // Act
        detail.next_episode();
        detail.next_season();

        // Assert
        assert_eq!(
            detail.play_target(),
            PlayTarget::Episode {
                id: 1396,
                season: 2,
                episode: 1
            }
        );
    }

    #[test]
    fn test_failure_and_reload() {
        // Arrange
        let mut detail = DetailState::new(show());

        // Act
        detail.finish(Err(ProviderError::Timeout(String::from("slow"))));
        let failed = detail.is_failed();
        detail.reload();

        // Assert
        assert!(failed);
        assert!(matches!(detail.load, DetailLoad::Loading));
    }
}
