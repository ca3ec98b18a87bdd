use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use std::{fmt::Write, sync::Arc};

use crate::{
    models::MovieCard,
    routes::{AppState, NOT_FOUND_MESSAGE},
    services::enrichment,
};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub title: Option<String>,
}

/// Outcome of the "Recommend" action rendered below the form
#[derive(Debug, PartialEq)]
pub enum Gallery {
    /// No title was submitted yet
    Idle,
    NotFound,
    Cards(Vec<MovieCard>),
}

/// Handler for the HTML gallery page
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
) -> Html<String> {
    let selected = params
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let gallery = match selected {
        None => Gallery::Idle,
        Some(title) => {
            let titles = state.engine.recommend(title);
            if titles.is_empty() {
                Gallery::NotFound
            } else {
                Gallery::Cards(
                    enrichment::enrich(state.metadata_provider.as_ref(), titles).await,
                )
            }
        }
    };

    Html(render_page(&state.engine.titles(), selected, &gallery))
}

/// Renders the full page: title selector, trigger button and result gallery
pub fn render_page(titles: &[&str], selected: Option<&str>, gallery: &Gallery) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Movie Recommendation System</title>\n\
         <style>\
         .gallery{display:grid;grid-template-columns:repeat(5,1fr);gap:1rem}\
         .card img{width:100%}\
         .notice{color:#a15c00}\
         </style>\n</head>\n<body>\n\
         <h1>Movie Recommendation System</h1>\n\
         <p>Discover similar movies with posters, ratings, genres, and trailers!</p>\n\
         <form method=\"get\" action=\"/\">\n\
         <label for=\"title\">Search for a movie:</label>\n\
         <select id=\"title\" name=\"title\">\n",
    );

    let selected_lower = selected.map(str::to_lowercase);
    for title in titles {
        let is_selected = selected_lower.as_deref() == Some(title.to_lowercase().as_str());
        let _ = writeln!(
            html,
            "<option value=\"{0}\"{1}>{0}</option>",
            escape_html(title),
            if is_selected { " selected" } else { "" }
        );
    }
    html.push_str("</select>\n<button type=\"submit\">Recommend</button>\n</form>\n");

    match gallery {
        Gallery::Idle => {}
        Gallery::NotFound => {
            let _ = writeln!(html, "<p class=\"notice\">{}</p>", NOT_FOUND_MESSAGE);
        }
        Gallery::Cards(cards) => {
            html.push_str("<h2>Recommended Movies:</h2>\n<div class=\"gallery\">\n");
            for card in cards {
                html.push_str(&render_card(card));
            }
            html.push_str("</div>\n");
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// One gallery card: poster, "title (year)", "rating | genres", trailer link
pub fn render_card(card: &MovieCard) -> String {
    let info = &card.info;
    let trailer = match &info.trailer {
        Some(url) => format!("<a href=\"{}\">Watch Trailer</a>", escape_html(url)),
        None => "<small>No trailer available</small>".to_string(),
    };

    format!(
        "<div class=\"card\">\n<img src=\"{poster}\" alt=\"{title}\">\n\
         <p><strong>{title} ({year})</strong></p>\n\
         <p><small>{rating} | {genres}</small></p>\n{trailer}\n</div>\n",
        poster = escape_html(&info.poster),
        title = escape_html(&card.title),
        year = escape_html(info.year_label()),
        rating = escape_html(&info.rating_label()),
        genres = escape_html(info.genres_label()),
        trailer = trailer,
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
