//! Search query model and URL construction

/// Sort orders accepted by Reddit's search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Relevance,
    Hot,
    Top,
    New,
    Comments,
}

impl SortBy {
    pub const ALL: [SortBy; 5] = [
        SortBy::Relevance,
        SortBy::Hot,
        SortBy::Top,
        SortBy::New,
        SortBy::Comments,
    ];

    /// Value sent as the `sort` query parameter
    pub fn as_param(self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::Hot => "hot",
            SortBy::Top => "top",
            SortBy::New => "new",
            SortBy::Comments => "comments",
        }
    }

    /// Label shown next to the radio button
    pub fn label(self) -> &'static str {
        match self {
            SortBy::Relevance => "Relevance",
            SortBy::Hot => "Hot",
            SortBy::Top => "Top",
            SortBy::New => "Latest",
            SortBy::Comments => "Comments",
        }
    }
}

/// Values offered by the limit selector
pub const LIMIT_CHOICES: [u32; 5] = [5, 10, 25, 50, 100];

/// Index into [`LIMIT_CHOICES`] selected on startup
pub const DEFAULT_LIMIT_INDEX: usize = 2;

/// One submission's worth of form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub sort_by: SortBy,
    pub limit: u32,
}

impl SearchQuery {
    /// Build the full request URL with every value percent-encoded
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}?q={}&sort={}&limit={}",
            endpoint,
            urlencoding::encode(&self.term),
            self.sort_by.as_param(),
            self.limit
        )
    }
}
