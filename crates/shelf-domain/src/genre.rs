//! Genre choices offered by the create and edit forms

/// Genres the forms let a user pick from.
///
/// Validation only requires a non-empty genre, so books created elsewhere may
/// carry values outside this list.
pub const GENRES: &[&str] = &[
    "Fiction",
    "Non-Fiction",
    "Science Fiction",
    "Fantasy",
    "Mystery",
    "Thriller",
    "Romance",
    "Horror",
    "Biography",
    "History",
    "Science",
    "Self-Help",
    "Poetry",
    "Children",
];

/// Whether `genre` is one of the form choices
pub fn is_known_genre(genre: &str) -> bool {
    GENRES.contains(&genre)
}
