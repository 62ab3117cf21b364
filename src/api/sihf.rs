use reqwest::Client;
use tracing::{debug, info};

use crate::error::IngestError;

const SUMMARY_REFERER: &str = "http://www.sihf.ch/de/game-center/";
const DETAIL_REFERER: &str = "http://www.sihf.ch/de/game-center/game/";

/// League selection of the summary table: NL A, NL B, national team, cup, CHL
const SUMMARY_SEARCH_QUERY: &str = "1,2,8,10,11//1,2,8,81,90";

/// Client for the SIHF statistics API. Returns raw response bodies; decoding
/// is left to the caller.
pub struct SihfClient {
    client: Client,
    base_url: String,
    language: String,
}

impl SihfClient {
    /// Create a new SIHF client
    pub fn new(base_url: &str, language: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        }
    }

    /// Fetch today's game table for all followed leagues
    pub async fn fetch_summaries(&self) -> Result<Vec<u8>, IngestError> {
        let url = format!(
            "{}/Statistic/api/cms/table?alias=today&size=today&searchQuery={}&filterQuery=&orderBy=gameLeague&orderByDescending=false&take=20&filterBy=League&skip=0&language={}",
            self.base_url,
            urlencoding::encode(SUMMARY_SEARCH_QUERY),
            urlencoding::encode(&self.language)
        );

        info!("Fetching game summaries from SIHF");
        self.get(&url, SUMMARY_REFERER).await
    }

    /// Fetch events and players of one game
    pub async fn fetch_details(&self, game_id: u64) -> Result<Vec<u8>, IngestError> {
        let url = format!(
            "{}/statistic/api/cms/gameoverview?alias=gameDetail&language={}&searchQuery={}",
            self.base_url,
            urlencoding::encode(&self.language),
            game_id
        );

        info!("Fetching details of game {}", game_id);
        self.get(&url, DETAIL_REFERER).await
    }

    async fn get(&self, url: &str, referer: &str) -> Result<Vec<u8>, IngestError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Referer", referer)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(IngestError::HttpStatus {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        debug!("Received {} bytes", body.len());

        Ok(body.to_vec())
    }
}
