use std::{collections::HashMap, fs::File, io::Read, path::Path};

use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
};

#[derive(Debug, Deserialize)]
struct MovieRow {
    title: String,
    #[serde(default)]
    overview: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreditRow {
    title: String,
}

/// Loads the movies and credits CSV files and joins them on `title`
pub fn load_corpus(
    movies_path: impl AsRef<Path>,
    credits_path: impl AsRef<Path>,
) -> AppResult<Vec<MovieRecord>> {
    let movies = open(movies_path.as_ref())?;
    let credits = open(credits_path.as_ref())?;
    let records = load_corpus_from_readers(movies, credits)?;

    tracing::info!(
        movies_path = %movies_path.as_ref().display(),
        credits_path = %credits_path.as_ref().display(),
        records = records.len(),
        "Corpus loaded"
    );

    Ok(records)
}

fn open(path: &Path) -> AppResult<File> {
    File::open(path)
        .map_err(|e| AppError::Corpus(format!("Cannot open {}: {}", path.display(), e)))
}

/// Joins movie rows with credit rows on `title`
///
/// Inner join: a movie row is emitted once for every credit row sharing its
/// title, in movie-file order. Movies without credits are dropped. Missing
/// overviews become empty strings.
pub fn load_corpus_from_readers<M: Read, C: Read>(
    movies: M,
    credits: C,
) -> AppResult<Vec<MovieRecord>> {
    let mut credits_reader = csv::Reader::from_reader(credits);
    require_columns(&mut credits_reader, "credits", &["title"])?;

    let mut credit_counts: HashMap<String, usize> = HashMap::new();
    for row in credits_reader.deserialize::<CreditRow>() {
        *credit_counts.entry(row?.title).or_insert(0) += 1;
    }

    let mut movies_reader = csv::Reader::from_reader(movies);
    require_columns(&mut movies_reader, "movies", &["title", "overview"])?;

    let mut records = Vec::new();
    for row in movies_reader.deserialize::<MovieRow>() {
        let row = row?;
        let matches = credit_counts.get(&row.title).copied().unwrap_or(0);
        let overview = row.overview.unwrap_or_default();
        for _ in 0..matches {
            records.push(MovieRecord::new(row.title.clone(), overview.clone()));
        }
    }

    Ok(records)
}

fn require_columns<R: Read>(
    reader: &mut csv::Reader<R>,
    dataset: &str,
    columns: &[&str],
) -> AppResult<()> {
    let headers = reader.headers()?;
    for column in columns {
        if !headers.iter().any(|h| h == *column) {
            return Err(AppError::Corpus(format!(
                "{} dataset is missing the '{}' column",
                dataset, column
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIES: &str = "\
budget,id,overview,title
237000000,19995,\"In the 22nd century, a paraplegic Marine is dispatched to the moon Pandora.\",Avatar
300000000,285,\"Captain Barbossa, long believed to be dead, has come back to life.\",Pirates of the Caribbean: At World's End
0,1,,Untold
100,2,A lonely robot,No Credits
";

    const CREDITS: &str = "\
movie_id,title,cast,crew
19995,Avatar,\"[{\"\"name\"\": \"\"Sam Worthington\"\"}]\",[]
285,Pirates of the Caribbean: At World's End,[],[]
1,Untold,[],[]
";

    #[test]
    fn test_join_on_title() {
        let records = load_corpus_from_readers(MOVIES.as_bytes(), CREDITS.as_bytes()).unwrap();
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Avatar", "Pirates of the Caribbean: At World's End", "Untold"]
        );
        assert!(records[0].overview.starts_with("In the 22nd century"));
    }

    #[test]
    fn test_missing_overview_becomes_empty() {
        let records = load_corpus_from_readers(MOVIES.as_bytes(), CREDITS.as_bytes()).unwrap();
        assert_eq!(records[2].overview, "");
    }

    #[test]
    fn test_duplicate_credit_titles_multiply_rows() {
        let movies = "title,overview\nThe Host,A monster rises from the river\nHeat,A heist crew\n";
        let credits = "title\nThe Host\nThe Host\nHeat\n";
        let records = load_corpus_from_readers(movies.as_bytes(), credits.as_bytes()).unwrap();
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["The Host", "The Host", "Heat"]);
    }

    #[test]
    fn test_missing_overview_column_is_fatal() {
        let movies = "title,budget\nAvatar,1\n";
        let credits = "title\nAvatar\n";
        let err = load_corpus_from_readers(movies.as_bytes(), credits.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Corpus(_)));
    }

    #[test]
    fn test_missing_title_column_is_fatal() {
        let movies = "title,overview\nAvatar,Blue people\n";
        let credits = "movie_id,cast\n1,[]\n";
        let err = load_corpus_from_readers(movies.as_bytes(), credits.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Corpus(_)));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = load_corpus("/nonexistent/movies.csv", "/nonexistent/credits.csv").unwrap_err();
        assert!(matches!(err, AppError::Corpus(_)));
    }

    #[test]
    fn test_empty_datasets() {
        let records =
            load_corpus_from_readers("title,overview\n".as_bytes(), "title\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }
}
