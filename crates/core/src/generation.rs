//! Generation-request constants, validation, and the signed-URL policy.

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Generation types
// ---------------------------------------------------------------------------

/// Slide-deck generation (one image per page).
pub const TYPE_PPT: &str = "ppt";
/// Infographic generation.
pub const TYPE_INFOGRAPHIC: &str = "infographic";
/// Architecture-diagram generation (single image).
pub const TYPE_ARCHITECTURE: &str = "architecture";
/// Comic generation (one image per scene).
pub const TYPE_COMIC: &str = "comic";

/// All valid generation types.
pub const VALID_TYPES: &[&str] = &[TYPE_PPT, TYPE_INFOGRAPHIC, TYPE_ARCHITECTURE, TYPE_COMIC];

// ---------------------------------------------------------------------------
// Generation defaults
// ---------------------------------------------------------------------------

/// Default number of pages / scenes when the request omits one.
pub const DEFAULT_PAGE_COUNT: u32 = 5;
/// Hard ceiling on pages per generation to keep fan-outs bounded.
pub const MAX_PAGE_COUNT: u32 = 20;
/// How many image-generation jobs may run concurrently per request.
pub const MAX_CONCURRENT_IMAGES: usize = 3;

/// Render size for comic panels (2K, landscape).
pub const COMIC_PANEL_SIZE: &str = "2560x1440";
/// Render size for deck pages and diagrams (4K, landscape).
pub const DECK_PAGE_SIZE: &str = "4096x2304";

// ---------------------------------------------------------------------------
// Signed-URL policy
// ---------------------------------------------------------------------------

/// Lifetime of presigned artifact URLs: 30 days.
pub const SIGNED_URL_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Age after which stored URLs are considered stale and regenerated: 27
/// days, leaving a 3-day safety margin before the signature expires.
pub const SIGNED_URL_REFRESH_AGE_SECS: i64 = 27 * 24 * 60 * 60;

/// Whether a record created at `created_at` needs its signed URLs refreshed.
pub fn needs_url_refresh(created_at: Timestamp, now: Timestamp) -> bool {
    (now - created_at).num_seconds() > SIGNED_URL_REFRESH_AGE_SECS
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a prompt or story is non-empty after trimming.
pub fn validate_prompt(prompt: &str) -> Result<(), CoreError> {
    if prompt.trim().is_empty() {
        return Err(CoreError::Validation(
            "Prompt must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate a requested page / scene count.
pub fn validate_page_count(count: u32) -> Result<(), CoreError> {
    if count == 0 {
        return Err(CoreError::Validation(
            "Page count must be at least 1".to_string(),
        ));
    }
    if count > MAX_PAGE_COUNT {
        return Err(CoreError::Validation(format!(
            "Page count must not exceed {MAX_PAGE_COUNT}"
        )));
    }
    Ok(())
}

/// Validate that a generation type is one of the known constants.
pub fn validate_generation_type(gen_type: &str) -> Result<(), CoreError> {
    if VALID_TYPES.contains(&gen_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid generation type '{gen_type}'. Must be one of: {}",
            VALID_TYPES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    // -- validate_prompt ------------------------------------------------------

    #[test]
    fn non_empty_prompt_is_valid() {
        assert!(validate_prompt("a mountain village at dawn").is_ok());
    }

    #[test]
    fn empty_prompt_rejected() {
        assert!(validate_prompt("").is_err());
    }

    #[test]
    fn whitespace_only_prompt_rejected() {
        assert!(validate_prompt("   \n\t ").is_err());
    }

    // -- validate_page_count --------------------------------------------------

    #[test]
    fn page_count_in_range_is_valid() {
        assert!(validate_page_count(1).is_ok());
        assert!(validate_page_count(DEFAULT_PAGE_COUNT).is_ok());
        assert!(validate_page_count(MAX_PAGE_COUNT).is_ok());
    }

    #[test]
    fn zero_page_count_rejected() {
        assert!(validate_page_count(0).is_err());
    }

    #[test]
    fn excessive_page_count_rejected() {
        assert!(validate_page_count(MAX_PAGE_COUNT + 1).is_err());
    }

    // -- validate_generation_type ---------------------------------------------

    #[test]
    fn known_types_are_valid() {
        for t in VALID_TYPES {
            assert!(validate_generation_type(t).is_ok());
        }
    }

    #[test]
    fn unknown_type_rejected() {
        assert!(validate_generation_type("poster").is_err());
    }

    // -- needs_url_refresh ----------------------------------------------------

    #[test]
    fn fresh_record_does_not_need_refresh() {
        let now = chrono::Utc::now();
        assert!(!needs_url_refresh(now - Duration::days(1), now));
    }

    #[test]
    fn record_just_under_threshold_does_not_need_refresh() {
        let now = chrono::Utc::now();
        let created = now - Duration::seconds(SIGNED_URL_REFRESH_AGE_SECS - 60);
        assert!(!needs_url_refresh(created, now));
    }

    #[test]
    fn record_past_threshold_needs_refresh() {
        let now = chrono::Utc::now();
        let created = now - Duration::seconds(SIGNED_URL_REFRESH_AGE_SECS + 60);
        assert!(needs_url_refresh(created, now));
    }
}
