//! Browser probe and user-agent parsing.

use crate::domain::{BrowserInfo, UNKNOWN};
use crate::ports::HostEnvironment;

/// Name reported when no engine signature matches.
pub const UNKNOWN_BROWSER: &str = "Unknown";

/// One entry of the ordered signature table.
struct EngineSignature {
    name: &'static str,
    /// Tokens identifying the engine; the version follows the matched token.
    tokens: &'static [&'static str],
    /// Token whose version is preferred over the matched token's, if present.
    version_token: Option<&'static str>,
}

// Order matters: several signatures are substrings of others (every Chrome
// UA also carries "Safari/", every Edge UA carries "Chrome/").
const SIGNATURES: &[EngineSignature] = &[
    EngineSignature {
        name: "Firefox",
        tokens: &["Firefox/", "FxiOS/"],
        version_token: None,
    },
    EngineSignature {
        name: "Edge",
        tokens: &["Edg/", "Edge/", "EdgA/", "EdgiOS/"],
        version_token: None,
    },
    EngineSignature {
        name: "Chrome",
        tokens: &["Chrome/", "CriOS/"],
        version_token: None,
    },
    EngineSignature {
        name: "Safari",
        tokens: &["Safari/"],
        version_token: Some("Version/"),
    },
    EngineSignature {
        name: "Opera",
        tokens: &["OPR/", "Opera/", "Opera "],
        version_token: Some("Version/"),
    },
];

/// Extract the browser name and version from a user-agent string.
///
/// Signatures are checked in priority order Firefox, Edge, Chrome, Safari,
/// Opera; the first match wins. Returns `("Unknown", "unknown")` when none
/// matches.
pub fn parse_user_agent(user_agent: &str) -> (String, String) {
    for signature in SIGNATURES {
        let Some(token) = signature
            .tokens
            .iter()
            .find(|token| user_agent.contains(**token))
        else {
            continue;
        };

        let version = signature
            .version_token
            .and_then(|vt| version_after(user_agent, vt))
            .or_else(|| version_after(user_agent, token))
            .unwrap_or_else(|| UNKNOWN.to_string());

        return (signature.name.to_string(), version);
    }

    (UNKNOWN_BROWSER.to_string(), UNKNOWN.to_string())
}

/// Dotted numeric run immediately following `token`.
fn version_after(user_agent: &str, token: &str) -> Option<String> {
    let start = user_agent.find(token)? + token.len();
    let version: String = user_agent[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let version = version.trim_end_matches('.');
    (!version.is_empty()).then(|| version.to_string())
}

/// Read browser identification and locale/privacy flags from the host.
pub fn probe_browser(host: &dyn HostEnvironment) -> BrowserInfo {
    let (name, version) = host
        .user_agent()
        .map_or_else(|| (UNKNOWN_BROWSER.to_string(), UNKNOWN.to_string()), |ua| {
            parse_user_agent(&ua)
        });

    let mut languages: Vec<String> = host
        .languages()
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    let language = host
        .language()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .or_else(|| languages.first().cloned());

    if languages.is_empty() {
        if let Some(ref primary) = language {
            languages.push(primary.clone());
        }
    }

    let do_not_track = host
        .do_not_track()
        .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "yes"));

    BrowserInfo {
        name,
        version,
        language: language.unwrap_or_else(|| UNKNOWN.to_string()),
        languages,
        cookies_enabled: host.cookies_enabled().unwrap_or(false),
        do_not_track,
        online: host.online().unwrap_or(false),
    }
}
