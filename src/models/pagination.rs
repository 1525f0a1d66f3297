//! Page requests (`page`, `size`, `sort` query parameters) and the pagination
//! headers returned with collection responses.

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 1000;
/// Highest page index whose offset still fits an `i64` at any page size.
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub dir: SortDir,
}

/// A zero-based page of a sorted collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort: Vec<SortOrder>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: DEFAULT_PAGE_SIZE, sort: Vec::new() }
    }
}

impl PageRequest {
    /// Read `page`, `size` and every `sort` pair. Malformed numbers fall back to defaults.
    ///
    /// `sort` takes the form `prop[,prop...][,asc|desc]` and may repeat.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut request = PageRequest::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" => {
                    if let Ok(p) = value.trim().parse::<i64>() {
                        request.page = p.clamp(0, MAX_PAGE);
                    }
                }
                "size" => {
                    if let Ok(s) = value.trim().parse::<i64>() {
                        request.size = s.clamp(1, MAX_PAGE_SIZE);
                    }
                }
                "sort" => request.sort.extend(parse_sort(value)),
                _ => {}
            }
        }
        request
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

fn parse_sort(value: &str) -> Vec<SortOrder> {
    let mut tokens: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    let dir = match tokens.last().map(|t| t.to_ascii_lowercase()) {
        Some(t) if t == "desc" => {
            tokens.pop();
            SortDir::Desc
        }
        Some(t) if t == "asc" => {
            tokens.pop();
            SortDir::Asc
        }
        _ => SortDir::Asc,
    };
    tokens
        .into_iter()
        .map(|property| SortOrder { property: property.to_string(), dir })
        .collect()
}

pub fn total_pages(total: i64, size: i64) -> i64 {
    if size <= 0 {
        return 0;
    }
    (total + size - 1) / size
}

/// Build the `Link` header for `page` out of `total` elements.
///
/// `base_url` is the absolute collection URL without a query string; `query`
/// holds the request's other parameters, which are carried over so that
/// filters and sorting survive navigation.
pub fn link_header(base_url: &str, query: &[(String, String)], page: &PageRequest, total: i64) -> String {
    let pages = total_pages(total, page.size);
    let mut links = Vec::new();
    if page.page < pages - 1 {
        links.push(page_link(base_url, query, page.page + 1, page.size, "next"));
    }
    if page.page > 0 {
        links.push(page_link(base_url, query, page.page - 1, page.size, "prev"));
    }
    let last = if pages > 0 { pages - 1 } else { 0 };
    links.push(page_link(base_url, query, last, page.size, "last"));
    links.push(page_link(base_url, query, 0, page.size, "first"));
    links.join(",")
}

fn page_link(base_url: &str, query: &[(String, String)], page: i64, size: i64, rel: &str) -> String {
    let mut pairs: Vec<(String, String)> = query
        .iter()
        .filter(|(k, _)| k != "page" && k != "size")
        .cloned()
        .collect();
    pairs.push(("page".to_string(), page.to_string()));
    pairs.push(("size".to_string(), size.to_string()));
    let qs = serde_urlencoded::to_string(&pairs).unwrap_or_default();
    format!("<{base_url}?{qs}>; rel=\"{rel}\"")
}
