use tracing::debug;
use url::form_urlencoded;

/// Query parameters that drive scriptless UI state on rendered pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Carousel position (`?slide=`).
    pub slide: Option<usize>,
    /// Accordion toggles, applied in order (`?open=0,2`).
    pub open: Vec<usize>,
    /// Expert profile to show on the about page (`?expert=`).
    pub expert: Option<usize>,
    pub sent: bool,
    pub subscribed: bool,
    pub page: Option<u32>,
    /// Zoom in percent (`?zoom=150`).
    pub zoom: Option<u32>,
}

impl ViewOptions {
    /// Unparseable values are dropped rather than failing the request.
    pub fn from_query(query: &str) -> Self {
        let mut options = Self::default();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match &*key {
                "slide" => options.slide = parse_number(&key, &value),
                "expert" => options.expert = parse_number(&key, &value),
                "page" => options.page = parse_number(&key, &value),
                "zoom" => options.zoom = parse_number(&key, &value),
                "open" => options.open.extend(
                    value
                        .split(',')
                        .filter(|part| !part.trim().is_empty())
                        .filter_map(|part| parse_number::<usize>(&key, part)),
                ),
                "sent" => options.sent = is_flag(&value),
                "subscribed" => options.subscribed = is_flag(&value),
                _ => debug!(%key, "ignoring unknown query parameter"),
            }
        }
        options
    }

    pub fn from_path(path_and_query: &str) -> Self {
        match path_and_query.split_once('?') {
            Some((_, query)) => Self::from_query(query),
            None => Self::default(),
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            debug!(key, value, "ignoring malformed query value");
            None
        }
    }
}

fn is_flag(value: &str) -> bool {
    matches!(value, "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_parameters() {
        let options = ViewOptions::from_query("slide=3&open=0,2&open=4&expert=1&sent=1&page=2&zoom=150");
        assert_eq!(options.slide, Some(3));
        assert_eq!(options.open, vec![0, 2, 4]);
        assert_eq!(options.expert, Some(1));
        assert!(options.sent);
        assert!(!options.subscribed);
        assert_eq!(options.page, Some(2));
        assert_eq!(options.zoom, Some(150));
    }

    #[test]
    fn malformed_values_are_dropped() {
        let options = ViewOptions::from_query("?slide=-1&open=a,1,%20&zoom=big&utm_source=x");
        assert_eq!(options.slide, None);
        assert_eq!(options.open, vec![1]);
        assert_eq!(options.zoom, None);
    }

    #[test]
    fn reads_query_from_full_path() {
        assert_eq!(ViewOptions::from_path("/services/mssp?open=1").open, vec![1]);
        assert_eq!(ViewOptions::from_path("/services/mssp"), ViewOptions::default());
    }
}
