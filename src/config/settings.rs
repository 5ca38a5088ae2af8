//! Runtime configuration loader.

use std::{fmt, fs, net::SocketAddr, path::Path, str::FromStr, time::Duration};

use anyhow::{anyhow, Context, Result};
use http::HeaderValue;
use log::info;
use rust_decimal::Decimal;
use solana_sdk::{pubkey, pubkey::Pubkey};

use crate::utils::amount::{parse_sol, sol_to_lamports, AmountPolicy, AMOUNT_PLACEHOLDER};

pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.json";
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEFAULT_RECIPIENT: Pubkey = pubkey!("AczLKrdS6hFGNoTWg9AaS9xhuPfZgVTPxL2W8XzZMDjH");

pub const ENV_RPC_URL: &str = "SOLANA_RPC_URL";
pub const ENV_RECIPIENT: &str = "TIPJAR_RECIPIENT";
pub const ENV_BIND: &str = "TIPJAR_BIND";

/// ------------------------------------------------------------------
/// Main Settings object
/// ------------------------------------------------------------------
#[derive(Clone, PartialEq)]
pub struct Settings {
    /* -------- infrastructure ------------------------ */
    pub bind_addr: SocketAddr,
    pub rpc_url: String,
    pub rpc_timeout: Duration,
    pub blockchain_id: String,

    /* -------- transfer ------------------------------ */
    pub recipient: Pubkey,
    pub amount_policy: AmountPolicy,

    /* -------- action metadata ----------------------- */
    pub icon: String,
    pub title: String,
    pub description: String,
    pub label: String,
    pub offered_amounts_sol: Vec<Decimal>,
    pub custom_amount: bool,
    pub custom_amount_label: String,
    pub thank_you_message: String,

    /* -------- page ---------------------------------- */
    pub page_title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            rpc_timeout: Duration::from_secs(5),
            blockchain_id: "solana".to_string(),
            recipient: DEFAULT_RECIPIENT,
            amount_policy: AmountPolicy::Strict,
            icon: "/tipjar.png".to_string(),
            title: "Dar propina".to_string(),
            description: "¡Apoya mi trabajo con Solana Colombia!".to_string(),
            label: "Enviar".to_string(),
            offered_amounts_sol: vec![Decimal::new(1, 2), Decimal::new(1, 1)],
            custom_amount: true,
            custom_amount_label: "Cantidad de SOL".to_string(),
            thank_you_message: "Gracias por tu propina de {amount} SOL!".to_string(),
            page_title: "Tip Jar | Solana Colombia".to_string(),
        }
    }
}

impl Settings {
    /// --------------------------------------------------------------
    /// Read a settings JSON file. Keys that are absent keep defaults.
    /// --------------------------------------------------------------
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading settings file {:?}", path.as_ref()))?;
        let json: serde_json::Value = serde_json::from_str(&raw)
            .with_context(|| format!("parsing settings file {:?}", path.as_ref()))?;
        Self::from_json(&json)
    }

    /// --------------------------------------------------------------
    /// Load `path` if it exists, else defaults; then apply the environment.
    /// --------------------------------------------------------------
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut settings = if path.as_ref().exists() {
            info!("[CONFIG] Loading settings from {:?}", path.as_ref());
            Self::load_from_file(&path)?
        } else {
            info!("[CONFIG] {:?} not found, using defaults", path.as_ref());
            Self::default()
        };
        settings.apply_env()?;
        Ok(settings)
    }

    /// --------------------------------------------------------------
    /// Load from `config/settings.json` (or defaults) plus environment.
    /// --------------------------------------------------------------
    pub fn load() -> Result<Self> {
        Self::load_or_default(DEFAULT_SETTINGS_PATH)
    }

    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        let mut s = Self::default();

        /* -------- infrastructure --------------------------------- */
        if let Some(bind) = json["bind_addr"].as_str() {
            s.set_bind_addr(bind)?;
        }
        if let Some(url) = json["rpc_url"].as_str() {
            s.set_rpc_url(url)?;
        }
        if let Some(ms) = json["rpc_timeout_ms"].as_u64() {
            s.rpc_timeout = Duration::from_millis(ms);
        }
        if let Some(id) = json["blockchain_id"].as_str() {
            s.blockchain_id = id.to_string();
        }

        /* -------- transfer --------------------------------------- */
        if let Some(recipient) = json["recipient"].as_str() {
            s.set_recipient(recipient)?;
        }
        if let Some(policy) = json["amount_policy"].as_str() {
            s.amount_policy = AmountPolicy::from_str(policy)
                .map_err(|_| anyhow!("unknown amount_policy `{policy}` (strict|lenient)"))?;
        }

        /* -------- action metadata -------------------------------- */
        let text = |key: &str, slot: &mut String| {
            if let Some(v) = json[key].as_str() {
                *slot = v.to_string();
            }
        };
        text("icon", &mut s.icon);
        text("title", &mut s.title);
        text("description", &mut s.description);
        text("label", &mut s.label);
        text("custom_amount_label", &mut s.custom_amount_label);
        text("thank_you_message", &mut s.thank_you_message);
        text("page_title", &mut s.page_title);

        if let Some(custom) = json["custom_amount"].as_bool() {
            s.custom_amount = custom;
        }
        if let Some(amounts) = json["offered_amounts_sol"].as_array() {
            s.offered_amounts_sol = amounts
                .iter()
                .map(|v| match v {
                    serde_json::Value::String(raw) => parse_sol(raw),
                    other => parse_sol(&other.to_string()),
                })
                .collect::<Result<_, _>>()
                .context("parsing offered_amounts_sol")?;
        }

        s.validate()?;
        Ok(s)
    }

    /// --------------------------------------------------------------
    /// Environment overrides: SOLANA_RPC_URL, TIPJAR_RECIPIENT, TIPJAR_BIND.
    /// --------------------------------------------------------------
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = present(ENV_RPC_URL) {
            self.set_rpc_url(&url).context(ENV_RPC_URL)?;
        }
        if let Some(recipient) = present(ENV_RECIPIENT) {
            self.set_recipient(&recipient).context(ENV_RECIPIENT)?;
        }
        if let Some(bind) = present(ENV_BIND) {
            self.set_bind_addr(&bind).context(ENV_BIND)?;
        }
        Ok(())
    }

    pub fn set_rpc_url(&mut self, url: &str) -> Result<()> {
        let parsed = url::Url::parse(url).with_context(|| format!("invalid rpc_url `{url}`"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow!("rpc_url `{url}` must be http or https"));
        }
        self.rpc_url = url.to_string();
        Ok(())
    }

    pub fn set_recipient(&mut self, recipient: &str) -> Result<()> {
        self.recipient = Pubkey::from_str(recipient.trim())
            .with_context(|| format!("invalid recipient `{recipient}`"))?;
        Ok(())
    }

    pub fn set_bind_addr(&mut self, bind: &str) -> Result<()> {
        self.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind_addr `{bind}`"))?;
        Ok(())
    }

    /// --------------------------------------------------------------
    /// Cross-field checks that individual setters can't do.
    /// --------------------------------------------------------------
    pub fn validate(&self) -> Result<()> {
        if self.offered_amounts_sol.is_empty() && !self.custom_amount {
            return Err(anyhow!(
                "no tip amounts offered: set offered_amounts_sol or enable custom_amount"
            ));
        }
        for amount in &self.offered_amounts_sol {
            match sol_to_lamports(*amount) {
                Some(lamports) if lamports > 0 => {}
                _ => return Err(anyhow!("offered amount {amount} SOL is not a valid tip")),
            }
        }
        if self.rpc_timeout.is_zero() {
            return Err(anyhow!("rpc_timeout_ms must be greater than zero"));
        }
        HeaderValue::from_str(&self.blockchain_id)
            .map_err(|_| anyhow!("blockchain_id `{}` is not a valid header value", self.blockchain_id))?;
        Ok(())
    }

    /// Confirmation text returned with a built transaction.
    pub fn thank_you(&self, amount: impl fmt::Display) -> String {
        self.thank_you_message
            .replace(AMOUNT_PLACEHOLDER, &amount.to_string())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("bind_addr", &self.bind_addr)
            .field("rpc_url", &self.rpc_url)
            .field("recipient", &self.recipient.to_string())
            .field("amount_policy", &self.amount_policy)
            .field("offered_amounts_sol", &self.offered_amounts_sol)
            .field("custom_amount", &self.custom_amount)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_original_deployment() {
        let s = Settings::default();
        assert_eq!(s.recipient.to_string(), "AczLKrdS6hFGNoTWg9AaS9xhuPfZgVTPxL2W8XzZMDjH");
        assert_eq!(s.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(
            s.offered_amounts_sol,
            vec![Decimal::from_str("0.01").unwrap(), Decimal::from_str("0.1").unwrap()]
        );
        assert_eq!(s.amount_policy, AmountPolicy::Strict);
        s.validate().unwrap();
    }

    #[test]
    fn empty_json_is_all_defaults() {
        assert_eq!(Settings::from_json(&json!({})).unwrap(), Settings::default());
    }

    #[test]
    fn json_overrides_individual_keys() {
        let recipient = Pubkey::new_unique();
        let s = Settings::from_json(&json!({
            "bind_addr": "127.0.0.1:8080",
            "rpc_url": "https://api.mainnet-beta.solana.com",
            "rpc_timeout_ms": 1500,
            "recipient": recipient.to_string(),
            "amount_policy": "lenient",
            "title": "Tip me",
            "offered_amounts_sol": [0.5, "2"],
            "custom_amount": false
        }))
        .unwrap();

        assert_eq!(s.bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(s.rpc_url, "https://api.mainnet-beta.solana.com");
        assert_eq!(s.rpc_timeout, Duration::from_millis(1500));
        assert_eq!(s.recipient, recipient);
        assert_eq!(s.amount_policy, AmountPolicy::Lenient);
        assert_eq!(s.title, "Tip me");
        assert_eq!(s.description, Settings::default().description);
        assert_eq!(
            s.offered_amounts_sol,
            vec![Decimal::from_str("0.5").unwrap(), Decimal::from(2)]
        );
        assert!(!s.custom_amount);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(Settings::from_json(&json!({ "recipient": "not-a-key" })).is_err());
        assert!(Settings::from_json(&json!({ "rpc_url": "ftp://example.com" })).is_err());
        assert!(Settings::from_json(&json!({ "rpc_url": "no scheme" })).is_err());
        assert!(Settings::from_json(&json!({ "amount_policy": "sloppy" })).is_err());
        assert!(Settings::from_json(&json!({ "offered_amounts_sol": [0] })).is_err());
        assert!(Settings::from_json(&json!({ "rpc_timeout_ms": 0 })).is_err());
        assert!(Settings::from_json(&json!({
            "offered_amounts_sol": [],
            "custom_amount": false
        }))
        .is_err());
    }

    #[test]
    fn environment_overrides_file_values() {
        let recipient = Pubkey::new_unique();
        let env: HashMap<&str, String> = HashMap::from([
            (ENV_RPC_URL, "http://localhost:8899".to_string()),
            (ENV_RECIPIENT, recipient.to_string()),
            (ENV_BIND, "  ".to_string()),
        ]);

        let mut s = Settings::default();
        s.apply_env_from(|k| env.get(k).cloned()).unwrap();

        assert_eq!(s.rpc_url, "http://localhost:8899");
        assert_eq!(s.recipient, recipient);
        assert_eq!(s.bind_addr, Settings::default().bind_addr);
    }

    #[test]
    fn bad_environment_value_names_the_variable() {
        let mut s = Settings::default();
        let err = s
            .apply_env_from(|k| (k == ENV_RECIPIENT).then(|| "xyz".to_string()))
            .unwrap_err();
        assert!(format!("{err:#}").contains(ENV_RECIPIENT));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let s = Settings::load_or_default("does/not/exist/settings.json").unwrap();
        assert_eq!(s.title, Settings::default().title);
    }

    #[test]
    fn load_from_file_reads_json() {
        let path = std::env::temp_dir().join(format!("tipjar-settings-{}.json", std::process::id()));
        fs::write(&path, r#"{ "label": "Send", "custom_amount": false }"#).unwrap();
        let s = Settings::load_from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(s.label, "Send");
        assert!(!s.custom_amount);
    }

    #[test]
    fn thank_you_substitutes_amount() {
        let s = Settings::default();
        assert_eq!(s.thank_you("0.01"), "Gracias por tu propina de 0.01 SOL!");
    }
}
