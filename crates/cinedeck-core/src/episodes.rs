//! Season and episode selection for TV detail views.

use cinedeck_api::provider::Episode;

/// Selected season/episode over a series' episode list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodePicker {
    episodes: Vec<Episode>,
    season_count: u32,
    season: u32,
    episode: u32,
}

impl EpisodePicker {
    /// Starts at season 1, episode 1.
    #[must_use]
    pub const fn new(episodes: Vec<Episode>, season_count: u32) -> Self {
        Self {
            episodes,
            season_count,
            season: 1,
            episode: 1,
        }
    }

    /// Number of seasons.
    #[must_use]
    pub const fn season_count(&self) -> u32 {
        self.season_count
    }

    /// Selected season.
    #[must_use]
    pub const fn season(&self) -> u32 {
        self.season
    }

    /// Selected episode number.
    #[must_use]
    pub const fn episode(&self) -> u32 {
        self.episode
    }

    /// Episodes of the selected season, in list order.
    #[must_use]
    pub fn current_season(&self) -> Vec<&Episode> {
        self.episodes
            .iter()
            .filter(|e| e.season == self.season)
            .collect()
    }

    /// Selected episode record, if the list has it.
    #[must_use]
    pub fn selected(&self) -> Option<&Episode> {
        self.episodes
            .iter()
            .find(|e| e.season == self.season && e.episode == self.episode)
    }

    /// Selects `season` (clamped to the season count) and resets the
    /// episode to 1.
    pub fn select_season(&mut self, season: u32) {
        self.season = season.clamp(1, self.season_count.max(1));
        self.episode = 1;
    }

    /// Selects `episode` within the current season.
    pub const fn select_episode(&mut self, episode: u32) {
        self.episode = if episode == 0 { 1 } else { episode };
    }

    /// Moves to the next episode in the season, if any.
    pub fn next_episode(&mut self) {
        let season = self.current_season();
        if let Some(next) = season
            .iter()
            .map(|e| e.episode)
            .filter(|n| *n > self.episode)
            .min()
        {
            self.episode = next;
        }
    }

    /// Moves to the previous episode in the season, if any.
    pub fn previous_episode(&mut self) {
        let season = self.current_season();
        if let Some(prev) = season
            .iter()
            .map(|e| e.episode)
            .filter(|n| *n < self.episode)
            .max()
        {
            self.episode = prev;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ep(season: u32, episode: u32) -> Episode {
        Episode {
            season,
            episode,
            title: format!("S{season}E{episode}"),
            runtime_min: None,
        }
    }

    fn picker() -> EpisodePicker {
        EpisodePicker::new(vec![ep(1, 1), ep(1, 2), ep(1, 3), ep(2, 1), ep(2, 2)], 2)
    }

    #[test]
    fn test_starts_at_first_episode() {
        let picker = picker();
        assert_eq!((picker.season(), picker.episode()), (1, 1));
        assert_eq!(picker.current_season().len(), 3);
    }

    #[test]
    fn test_season_change_resets_episode() {
        // Arrange
        let mut picker = picker();
        picker.select_episode(3);

        // Act
        picker.select_season(2);

        // Assert
        assert_eq!(picker.episode(), 1);
        assert_eq!(picker.current_season().len(), 2);
        assert_eq!(picker.selected().map(|e| e.title.as_str()), Some("S2E1"));
    }

    #[test]
    fn test_season_is_clamped() {
        // Arrange
        let mut picker = picker();

        // Act
        picker.select_season(9);

        // Assert
        assert_eq!(picker.season(), 2);
    }

    #[test]
    fn test_episode_navigation_stays_in_season() {
        // Arrange
        let mut picker = picker();

        // Act
        picker.next_episode();
        picker.next_episode();
        picker.next_episode();

        // Assert
        assert_eq!(picker.episode(), 3);
        picker.previous_episode();
        assert_eq!(picker.episode(), 2);
    }
}
