use async_trait::async_trait;
use common::{
    api::{self, Breach, CheckBreaches, CheckBreachesRet},
    consts::BREACH_MAX_SOURCES,
};
use eyre::{eyre, WrapErr};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::{request_dispatcher::Handler, state::State};

const DEMO_EMAILS: [&str; 3] = ["test@example.com", "demo@example.com", "breach@example.com"];
const DEMO_FOUND: u64 = 6_300_000;
const DEFAULT_LOGO: &str = "https://haveibeenpwned.com/Content/Images/PwnedLogos/Breach.png";

#[derive(Deserialize, Debug)]
struct LeakCheckResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    found: u64,
    #[serde(default)]
    fields: Vec<String>,
    #[serde(default)]
    sources: Vec<LeakCheckSource>,
}

#[derive(Deserialize, Debug)]
struct LeakCheckSource {
    name: Option<String>,
    date: Option<String>,
    entries: Option<u64>,
}

pub fn is_demo_email(email: &str) -> bool {
    let email = email.to_lowercase();
    DEMO_EMAILS.contains(&email.as_str())
}

pub fn demo_breaches() -> Vec<Breach> {
    vec![
        Breach {
            name: "DemoBreachData".to_owned(),
            title: "Demo Breach".to_owned(),
            domain: "demo-service.com".to_owned(),
            breach_date: "2023-01-15".to_owned(),
            added_date: "2023-02-01".to_owned(),
            description: "This is a simulated breach for educational purposes. In a real scenario, this would contain information about an actual data breach.".to_owned(),
            data_classes: ["Email addresses", "Passwords", "Names", "IP addresses"].map(String::from).to_vec(),
            logo_path: "https://haveibeenpwned.com/Content/Images/PwnedLogos/Adobe.png".to_owned(),
            pwn_count: 5_430_000,
            is_verified: true,
            demo: true,
            found: DEMO_FOUND,
        },
        Breach {
            name: "AnotherDemoBreachData".to_owned(),
            title: "Another Demo Breach".to_owned(),
            domain: "another-demo.com".to_owned(),
            breach_date: "2022-11-20".to_owned(),
            added_date: "2022-12-05".to_owned(),
            description: "Another simulated breach for demonstration. This represents how multiple breaches would be displayed.".to_owned(),
            data_classes: ["Email addresses", "Geographic locations", "Phone numbers"].map(String::from).to_vec(),
            logo_path: "https://haveibeenpwned.com/Content/Images/PwnedLogos/Yahoo.png".to_owned(),
            pwn_count: 870_000,
            is_verified: true,
            demo: true,
            found: DEMO_FOUND,
        },
    ]
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn data_classes(fields: &[String]) -> Vec<String> {
    if fields.is_empty() {
        return vec!["Email addresses".to_owned()];
    }
    fields
        .iter()
        .map(|field| match field.as_str() {
            "username" => "Usernames".to_owned(),
            "email" => "Email addresses".to_owned(),
            "password" => "Passwords".to_owned(),
            "first_name" | "last_name" | "name" => "Names".to_owned(),
            "phone" => "Phone numbers".to_owned(),
            "address" => "Addresses".to_owned(),
            "ip" | "ip1" | "ip2" => "IP addresses".to_owned(),
            other => capitalize(other),
        })
        .collect()
}

fn into_breaches(resp: LeakCheckResponse) -> Vec<Breach> {
    if !resp.success {
        warn!("LeakCheck response not successful: {:?}", resp);
        return vec![];
    }
    info!("LeakCheck found {} breaches", resp.found);
    if resp.found == 0 {
        return vec![];
    }

    let classes = data_classes(&resp.fields);
    resp.sources
        .into_iter()
        .take(BREACH_MAX_SOURCES)
        .map(|source| {
            let name = source.name.unwrap_or_else(|| "Unknown Source".to_owned());
            Breach {
                title: name.clone(),
                domain: name.to_lowercase().replace([' ', '.'], ""),
                breach_date: source.date.unwrap_or_else(|| "2023-01-01".to_owned()),
                added_date: "2023-01-01".to_owned(),
                description: format!("Your data was found in the {} breach.", name),
                data_classes: classes.clone(),
                logo_path: DEFAULT_LOGO.to_owned(),
                pwn_count: source.entries.unwrap_or(resp.found),
                is_verified: true,
                demo: false,
                found: resp.found,
                name,
            }
        })
        .collect()
}

impl State {
    async fn leakcheck_lookup(&self, email: &str) -> eyre::Result<LeakCheckResponse> {
        let resp = self
            .http_client
            .get(&self.config.leakcheck_url)
            .query(&[("check", email)])
            .send()
            .await
            .wrap_err("LeakCheck request failed")?;

        let status = resp.status();
        if !status.is_success() {
            return Err(eyre!("LeakCheck responded with status code {}", status));
        }
        resp.json().await.wrap_err("failed to parse LeakCheck response")
    }

    /// Lookup failures are logged and read as "no breach found".
    pub async fn check_breach(&self, email: &str) -> Vec<Breach> {
        let masked: String = email.chars().take(3).collect();
        info!("Checking breaches for email: {}***", masked);

        if self.config.demo_breaches && is_demo_email(email) {
            return demo_breaches();
        }

        match self.leakcheck_lookup(email).await {
            Ok(resp) => into_breaches(resp),
            Err(e) => {
                error!("Error checking LeakCheck API: {:#}", e);
                vec![]
            }
        }
    }
}

#[async_trait]
impl Handler for CheckBreaches {
    async fn handle(self, state: &State) -> api::Result<Self::Ret> {
        Ok(CheckBreachesRet {
            breaches: state.check_breach(&self.email).await,
        })
    }

    fn fallback(e: &api::Error) -> Option<serde_json::Value> {
        match e {
            api::Error::NoEmailProvided => serde_json::to_value(api::NoEmailRet::default()).ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn demo_emails_ignore_case() {
        assert!(is_demo_email("Demo@Example.com"));
        assert!(!is_demo_email("someone@example.com"));
    }

    #[test]
    fn sources_map_to_breaches() {
        let resp: LeakCheckResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "found": 3,
            "fields": ["username", "ip1", "dob"],
            "sources": [
                {"name": "Some Site.com", "date": "2019-04"},
                {"entries": 7}
            ]
        }))
        .unwrap();
        let breaches = into_breaches(resp);
        assert_eq!(breaches.len(), 2);
        assert_eq!(breaches[0].name, "Some Site.com");
        assert_eq!(breaches[0].domain, "somesitecom");
        assert_eq!(breaches[0].breach_date, "2019-04");
        assert_eq!(breaches[0].pwn_count, 3);
        assert_eq!(breaches[0].data_classes, ["Usernames", "IP addresses", "Dob"]);
        assert_eq!(breaches[1].name, "Unknown Source");
        assert_eq!(breaches[1].pwn_count, 7);
        assert!(breaches.iter().all(|b| b.found == 3 && !b.demo));
    }

    #[test]
    fn at_most_twenty_sources() {
        let sources: Vec<_> = (0..30).map(|i| serde_json::json!({"name": format!("s{}", i)})).collect();
        let resp: LeakCheckResponse =
            serde_json::from_value(serde_json::json!({"success": true, "found": 30, "sources": sources})).unwrap();
        assert_eq!(into_breaches(resp).len(), BREACH_MAX_SOURCES);
    }

    #[test]
    fn nothing_found_ignores_sources() {
        let resp: LeakCheckResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "found": 0,
            "sources": [{"name": "Stale Source"}]
        }))
        .unwrap();
        assert!(into_breaches(resp).is_empty());
    }

    #[test]
    fn unsuccessful_lookup_is_empty() {
        let resp: LeakCheckResponse = serde_json::from_value(serde_json::json!({"success": false, "error": "limit"})).unwrap();
        assert!(into_breaches(resp).is_empty());
    }

    #[tokio::test]
    async fn demo_lookup_skips_network() {
        let config = Config {
            leakcheck_url: "http://127.0.0.1:9/unreachable".to_owned(),
            ..Config::default()
        };
        let state = State::new(config).unwrap();
        let breaches = state.check_breach("breach@example.com").await;
        assert_eq!(breaches.len(), 2);
        assert!(breaches.iter().all(|b| b.demo && b.found == DEMO_FOUND));
    }

    #[tokio::test]
    async fn unreachable_api_yields_empty_list() {
        let config = Config {
            leakcheck_url: "http://127.0.0.1:9/unreachable".to_owned(),
            ..Config::default()
        };
        let state = State::new(config).unwrap();
        assert!(state.check_breach("someone@example.org").await.is_empty());
    }
}
