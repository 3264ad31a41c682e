use serde::Serialize;
use tabled::Tabled;

/// Output for ask command
#[derive(Debug, Serialize)]
pub struct AskOutput {
    pub message: String,
    pub reply: String,
    /// `remote`, `offline` or `failure`
    pub source: String,
    pub language: String,
    pub destination: Option<String>,
}

/// Output for navigate command
#[derive(Debug, Serialize)]
pub struct NavigateOutput {
    pub destination_id: String,
    pub destination: String,
    pub from: [f64; 2],
    pub distance_km: f64,
    pub bearing_degrees: f64,
    pub direction: String,
    pub instruction: String,
}

/// One phrasebook line
#[derive(Debug, Serialize, Tabled)]
pub struct PhraseRow {
    #[tabled(rename = "Language")]
    pub language: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Phrase")]
    pub phrase: String,
}

/// One configuration entry and where it came from
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
