use chrono::{DateTime, NaiveDateTime, Utc};

use crate::model::Album;


/// Parses `2020-12-31T18:00` style dates in UTC.
pub fn date(s: &str) -> DateTime<Utc> {
    let s = if s.len() == 10 {
        format!("{}T00:00", s)
    } else {
        s.to_owned()
    };
    NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M")
        .unwrap()
        .and_utc()
}

pub fn album(folder_name: &str, start: &str, end: &str) -> Album {
    Album {
        owner: "tony@stark.com".into(),
        folder_name: folder_name.into(),
        name: folder_name.into(),
        start: date(start),
        end: date(end),
    }
}

pub fn folder_names(albums: &[Album]) -> Vec<&str> {
    albums.iter().map(|album| album.folder_name.as_str()).collect()
}

/// Quarters of 2020/2021 with a gap around new year, plus holidays bridging it.
pub fn christmas_fixture() -> Vec<Album> {
    vec![
        album("2020-Q4", "2020-10-01", "2020-12-31T18:00"),
        album("ChristmasHolidays", "2020-12-18", "2021-01-04"),
        album("2021-Q1", "2021-01-01T18:00", "2021-04-01"),
    ]
}
