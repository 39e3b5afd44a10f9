use crate::{
    directory::Employee,
    error::{KioskError, KioskResult},
};
use chrono::Duration;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TIP_INTERVAL_SECS: u64 = 6;
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 1;
/// Upper bound for any interval: one day.
pub const MAX_INTERVAL_SECS: u64 = 86_400;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KioskConfig {
    pub device_id:   String,
    pub location_id: String,
    pub staff:       Vec<Employee>,
    #[serde(default)]
    pub tips:        Vec<String>,
    #[serde(default = "default_tip_interval")]
    pub tip_interval_secs: u64,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

fn default_tip_interval() -> u64     { DEFAULT_TIP_INTERVAL_SECS }
fn default_refresh_interval() -> u64 { DEFAULT_REFRESH_INTERVAL_SECS }

fn interval(field: &str, secs: u64) -> KioskResult<Duration> {
    if secs > MAX_INTERVAL_SECS {
        return Err(KioskError::Config(format!(
            "{field} must be at most {MAX_INTERVAL_SECS}, got {secs}"
        )));
    }
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| KioskError::Config(format!("{field} out of range: {secs}")))
}

impl KioskConfig {
    /// Load from `<data_dir>/kiosk.json`.
    /// In tests, use KioskConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/kiosk.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: KioskConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> KioskResult<()> {
        if self.device_id.trim().is_empty() {
            return Err(KioskError::Config("device_id is empty".into()));
        }
        if self.location_id.trim().is_empty() {
            return Err(KioskError::Config("location_id is empty".into()));
        }
        if self.refresh_interval_secs == 0 {
            return Err(KioskError::Config("refresh_interval_secs must be > 0".into()));
        }
        self.tip_interval()?;
        self.refresh_interval()?;
        Ok(())
    }

    /// Tip rotation period. Zero disables rotation.
    pub fn tip_interval(&self) -> KioskResult<Duration> {
        interval("tip_interval_secs", self.tip_interval_secs)
    }

    pub fn refresh_interval(&self) -> KioskResult<Duration> {
        interval("refresh_interval_secs", self.refresh_interval_secs)
    }

    /// Config with hardcoded defaults for use in tests.
    pub fn default_test() -> Self {
        Self {
            device_id:   "WINDOW-KIOSK-01".into(),
            location_id: "STORE-123".into(),
            staff: vec![
                Employee::new("1001", "Alex Kim"),
                Employee::new("1002", "Maria Lopez"),
                Employee::new("1003", "Omar Hassan"),
                Employee::new("1004", "Sara Nilsson"),
            ],
            tips: vec![
                "Greet with a smile and confirm the order clearly.".into(),
                "Repeat the customer's customizations to avoid mistakes.".into(),
                "Offer sauces and napkins without waiting to be asked.".into(),
                "Hand over payment, change and receipt neatly.".into(),
                "Keep the window area clean; wipe down between cars when possible.".into(),
                "While waiting: set expectations and thank the customer for their patience.".into(),
            ],
            tip_interval_secs: DEFAULT_TIP_INTERVAL_SECS,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}
