/// Public lobby link for a listing
pub fn lobby_url(base_url: &str, listing_id: &str) -> String {
    format!("{}/lobby/{}", base_url.trim_end_matches('/'), listing_id)
}
