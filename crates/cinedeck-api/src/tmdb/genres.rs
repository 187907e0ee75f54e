//! TMDB genre ID tables.
//!
//! Listing endpoints only return `genre_ids`; these tables resolve them
//! without an extra `genre/*/list` round trip.

/// Movie genres as returned by `genre/movie/list`.
const MOVIE_GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

/// TV genres as returned by `genre/tv/list`.
const TV_GENRES: &[(u32, &str)] = &[
    (10759, "Action & Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (10762, "Kids"),
    (9648, "Mystery"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
    (37, "Western"),
];

fn lookup(table: &[(u32, &'static str)], id: u32) -> Option<&'static str> {
    table
        .iter()
        .find_map(|&(genre_id, name)| (genre_id == id).then_some(name))
}

/// Resolves a movie genre ID to its name.
#[must_use]
pub fn movie_genre_name(id: u32) -> Option<&'static str> {
    lookup(MOVIE_GENRES, id)
}

/// Resolves a TV genre ID to its name.
#[must_use]
pub fn tv_genre_name(id: u32) -> Option<&'static str> {
    lookup(TV_GENRES, id)
}

/// Returns the sorted, de-duplicated union of movie and TV genre names.
#[must_use]
pub fn all_genre_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = MOVIE_GENRES
        .iter()
        .chain(TV_GENRES)
        .map(|&(_, name)| name)
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}
