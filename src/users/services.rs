use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use regex::Regex;

/// Username reserved for the system account; never surfaced as a peer.
pub const SYSTEM_USERNAME: &str = "tokenpay";

pub(crate) fn is_valid_username(username: &str) -> bool {
    lazy_static! {
        static ref USERNAME_RE: Regex = Regex::new(r"^[a-z0-9_.]{3,30}$").unwrap();
    }
    USERNAME_RE.is_match(username)
}

/// Lowercase normalization applied to every client-supplied username.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Uniform pick over usernames, excluding the system account. The reserved
/// name is filtered out before drawing so the pick always terminates.
pub fn pick_random_peer(usernames: &[String]) -> Option<String> {
    let eligible: Vec<&String> = usernames
        .iter()
        .filter(|u| u.as_str() != SYSTEM_USERNAME)
        .collect();
    eligible
        .choose(&mut rand::thread_rng())
        .map(|u| (*u).clone())
}
