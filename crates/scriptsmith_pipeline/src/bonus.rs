//! Highest-tier extras: thumbnail ideas and a video description.

use crate::ModelGateway;
use scriptsmith_core::{BackendId, BonusContent};
use scriptsmith_error::ScriptsmithResult;
use tracing::{debug, instrument, warn};

const THUMBNAIL_MAX_TOKENS: u32 = 200;
const DESCRIPTION_MAX_TOKENS: u32 = 300;

async fn request_bonus(gateway: &mut ModelGateway, title: &str) -> ScriptsmithResult<BonusContent> {
    let thumbnail_prompt = format!(
        "Generate 3 thumbnail ideas for: {title}\n\n\
         Format:\n\
         1. [Visual] | [Text]\n\
         2. [Visual] | [Text]\n\
         3. [Visual] | [Text]"
    );
    let thumbnail_ideas = gateway
        .invoke_required(BackendId::Premium, "bonus", &thumbnail_prompt, THUMBNAIL_MAX_TOKENS)
        .await?;

    let description_prompt = format!(
        "Write YouTube video description for: {title}\n\n\
         Include:\n\
         - Hook paragraph (50 words)\n\
         - 5 hashtags\n\n\
         Max 150 words total."
    );
    let video_description = gateway
        .invoke_required(BackendId::Premium, "bonus", &description_prompt, DESCRIPTION_MAX_TOKENS)
        .await?;

    Ok(BonusContent::new(thumbnail_ideas, video_description))
}

/// Generate thumbnail ideas and a video description.
///
/// Returns `None` when either call fails; the run carries on without extras.
#[instrument(skip(gateway), fields(title = %title))]
pub async fn generate_bonus(gateway: &mut ModelGateway, title: &str) -> Option<BonusContent> {
    match request_bonus(gateway, title).await {
        Ok(bonus) => {
            debug!("Bonus content generated");
            Some(bonus)
        }
        Err(e) => {
            warn!(error = %e, "Bonus content failed, continuing without it");
            None
        }
    }
}
