use crate::errors::{Error, Result};
use crate::handler::footer::{ClockStyle, FooterFormat, DEFAULT_START_DATE};

use chrono::NaiveDate;
use serenity::model::id::{GuildId, RoleId, UserId};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Settings {
    pub token: String,
    pub channels_path: PathBuf,
    pub start_date: NaiveDate,
    pub clock: ClockStyle,
    /// may use /stats anywhere
    pub owner_id: Option<UserId>,
    /// /stats is registered only here when set
    pub owner_guild_id: Option<GuildId>,
    /// holders may use /stats
    pub stats_role_id: Option<RoleId>,
}

impl Settings {
    pub fn from_env() -> Result<Settings> {
        Settings::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        // empty values count as unset
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = var("DISCORD_TOKEN")
            .ok_or(Error::ConstStr("Expected DISCORD_TOKEN in the environment"))?;

        let start_text = var("RELAY_START_DATE").unwrap_or_else(|| DEFAULT_START_DATE.to_string());
        let start_date = NaiveDate::parse_from_str(start_text.trim(), "%Y-%m-%d").map_err(|why| {
            Error::Config(format!("RELAY_START_DATE {start_text:?} is not a date: {why}"))
        })?;

        let clock = match var("RELAY_CLOCK") {
            Some(text) => text.parse().map_err(Error::Config)?,
            None => ClockStyle::default(),
        };

        Ok(Settings {
            token,
            channels_path: var("RELAY_CHANNELS_PATH")
                .map_or_else(|| PathBuf::from(db::DEFAULT_CONFIG_PATH), PathBuf::from),
            start_date,
            clock,
            owner_id: parse_snowflake(&var, "BOT_OWNER_ID")?.map(UserId),
            owner_guild_id: parse_snowflake(&var, "BOT_OWNER_GUILD_ID")?.map(GuildId),
            stats_role_id: parse_snowflake(&var, "STATS_ROLE_ID")?.map(RoleId),
        })
    }

    pub fn footer(&self) -> FooterFormat {
        FooterFormat::new(self.start_date, self.clock)
    }
}

fn parse_snowflake<F>(var: &F, key: &str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{key} {value:?} is not a discord id")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[("DISCORD_TOKEN", "abc")]).unwrap();
        assert_eq!(settings.token, "abc");
        assert_eq!(settings.channels_path, PathBuf::from(db::DEFAULT_CONFIG_PATH));
        assert_eq!(settings.start_date, NaiveDate::from_ymd_opt(2024, 10, 27).unwrap());
        assert_eq!(settings.clock, ClockStyle::TwelveHour);
        assert_eq!(settings.owner_id, None);
        assert_eq!(settings.owner_guild_id, None);
        assert_eq!(settings.stats_role_id, None);
    }

    #[test]
    fn test_missing_token() {
        assert!(settings(&[]).is_err());
        assert!(settings(&[("DISCORD_TOKEN", "  ")]).is_err());
    }

    #[test]
    fn test_all_values() {
        let settings = settings(&[
            ("DISCORD_TOKEN", "abc"),
            ("RELAY_CHANNELS_PATH", "/data/channels.json"),
            ("RELAY_START_DATE", "2025-01-01"),
            ("RELAY_CLOCK", "24h"),
            ("BOT_OWNER_ID", "767540134572458076"),
            ("BOT_OWNER_GUILD_ID", "1027958226387472467"),
            ("STATS_ROLE_ID", " 55 "),
        ])
        .unwrap();

        assert_eq!(settings.channels_path, PathBuf::from("/data/channels.json"));
        assert_eq!(settings.start_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(settings.clock, ClockStyle::TwentyFourHour);
        assert_eq!(settings.owner_id, Some(UserId(767540134572458076)));
        assert_eq!(settings.owner_guild_id, Some(GuildId(1027958226387472467)));
        assert_eq!(settings.stats_role_id, Some(RoleId(55)));
    }

    #[test]
    fn test_bad_values() {
        assert!(matches!(
            settings(&[("DISCORD_TOKEN", "abc"), ("RELAY_START_DATE", "10/27/2024")]),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            settings(&[("DISCORD_TOKEN", "abc"), ("RELAY_CLOCK", "noon")]),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            settings(&[("DISCORD_TOKEN", "abc"), ("BOT_OWNER_ID", "fish")]),
            Err(Error::Config(_))
        ));
    }
}
