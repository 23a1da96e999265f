use serde::{Deserialize, Serialize};

/// Column headers, in output order, for every ads sheet.
pub const COLUMNS: [&str; 13] = [
    "Ad ID",
    "Brand Name",
    "Ad Industry",
    "CTR",
    "Ad Objective",
    "Total Likes",
    "Total Comments",
    "Total Shares",
    "Video Url",
    "Video Cover URL",
    "Video Duration",
    "Landing Page",
    "Ad Description",
];

/// One ad, flattened from its listing summary and detail record, with every
/// string field already stripped of control characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdRecord {
    pub ad_id: String,
    pub brand_name: Option<String>,
    /// Resolved name of the ad's own industry key, or `"-"`.
    pub industry: String,
    /// Click-through rate as a fraction; `0.0` when the API omits it.
    pub ctr: f64,
    pub objective: Option<String>,
    pub likes: Option<i64>,
    pub comments: Option<i64>,
    pub shares: Option<i64>,
    /// The `720p` rendition URL.
    pub video_url: Option<String>,
    pub video_cover_url: Option<String>,
    /// Seconds.
    pub video_duration: Option<f64>,
    pub landing_page: Option<String>,
    pub description: Option<String>,
}

/// Records collected for one configured industry occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustrySheet {
    /// Industry id exactly as configured.
    pub industry_id: String,
    /// Resolved industry name, or `Industry_<id>` when unresolved.
    pub name: String,
    /// Position of this industry in the configured list; tells repeated ids
    /// apart.
    pub occurrence: usize,
    pub records: Vec<AdRecord>,
}

/// Ordered per-industry record sets; one entry per configured industry,
/// so a repeated id yields repeated entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    pub sheets: Vec<IndustrySheet>,
}

impl ResultTable {
    /// Starts a new, empty sheet and returns it for filling.
    pub fn push_sheet(&mut self, industry_id: &str, name: &str) -> &mut IndustrySheet {
        let occurrence = self.sheets.len();
        self.sheets.push(IndustrySheet {
            industry_id: industry_id.to_owned(),
            name: name.to_owned(),
            occurrence,
            records: Vec::new(),
        });
        let last = self.sheets.len() - 1;
        &mut self.sheets[last]
    }

    /// First sheet with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&IndustrySheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Total records across all sheets.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.sheets.iter().map(|s| s.records.len()).sum()
    }

    pub fn records(&self) -> impl Iterator<Item = &AdRecord> {
        self.sheets.iter().flat_map(|s| s.records.iter())
    }
}
