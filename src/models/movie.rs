//! Movie model

use serde::{Deserialize, Deserializer, Serialize};

/// Movie as listed by `GET /movies` and `GET /movies/{id}`.
///
/// Read-only on the client; fetched fresh for every view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "ImagePath", default)]
    pub image_path: String,
    #[serde(rename = "Director", default)]
    pub director: Director,
    #[serde(rename = "Genre", default)]
    pub genre: Genre,
    #[serde(rename = "Featured", default)]
    pub featured: bool,
}

/// Director embedded in a movie
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Bio", default)]
    pub bio: String,
    /// Birth year; the API stores it either as a number or a string
    #[serde(rename = "Birth", default, deserialize_with = "string_or_number")]
    pub birth_year: Option<String>,
}

/// Genre embedded in a movie
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<StringOrNumber> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_movie_from_api_json() {
        let movie: MovieRecord = serde_json::from_value(json!({
            "_id": "m1",
            "Title": "Inception",
            "Description": "A thief who steals corporate secrets.",
            "ImagePath": "https://img.example/inception.jpg",
            "Director": { "Name": "Christopher Nolan", "Bio": "British director", "Birth": 1970 },
            "Genre": { "Name": "Sci-Fi", "Description": "Science fiction" },
            "Featured": true
        }))
        .unwrap();

        assert_eq!(movie.id, "m1");
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.director.name, "Christopher Nolan");
        assert_eq!(movie.director.birth_year.as_deref(), Some("1970"));
        assert_eq!(movie.genre.name, "Sci-Fi");
        assert!(movie.featured);
    }

    #[test]
    fn test_movie_birth_as_string_and_missing() {
        let movie: MovieRecord = serde_json::from_value(json!({
            "_id": "m2",
            "Title": "Heat",
            "Director": { "Name": "Michael Mann", "Birth": "1943" }
        }))
        .unwrap();
        assert_eq!(movie.director.birth_year.as_deref(), Some("1943"));
        assert!(!movie.featured);
        assert_eq!(movie.genre, Genre::default());

        let movie: MovieRecord = serde_json::from_value(json!({
            "_id": "m3",
            "Title": "Alien",
            "Director": { "Name": "Ridley Scott" }
        }))
        .unwrap();
        assert_eq!(movie.director.birth_year, None);
    }

    #[test]
    fn test_movie_without_id_is_rejected() {
        let result: Result<MovieRecord, _> =
            serde_json::from_value(json!({ "Title": "Untitled" }));
        assert!(result.is_err());
    }
}
