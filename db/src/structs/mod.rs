use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelConfig {
    #[serde(default, with = "snowflake_map")]
    pub primary_channel: BTreeMap<u64, u64>,
    #[serde(default, with = "snowflake_map")]
    pub relay_channels: BTreeMap<u64, u64>,
}

mod snowflake_map {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Snowflake {
        Text(String),
        Number(u64),
    }

    fn parse_snowflake<E: Error>(text: &str) -> Result<u64, E> {
        text.trim()
            .parse()
            .map_err(|_| E::custom(format!("invalid snowflake {text:?}")))
    }

    pub fn serialize<S>(map: &BTreeMap<u64, u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(map.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<u64, u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        BTreeMap::<String, Snowflake>::deserialize(deserializer)?
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Snowflake::Text(text) => parse_snowflake::<D::Error>(&text)?,
                    Snowflake::Number(n) => n,
                };
                Ok((parse_snowflake::<D::Error>(&key)?, value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_string_snowflakes() {
        let config: ChannelConfig = serde_json::from_str(
            r#"{
                "primaryChannel": { "1027958226387472467": "1027958227016601601" },
                "relayChannels": { "20": "21", "30": "31" }
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.primary_channel.get(&1027958226387472467),
            Some(&1027958227016601601)
        );
        assert_eq!(config.relay_channels.len(), 2);
        assert_eq!(config.relay_channels.get(&30), Some(&31));
    }

    #[test]
    fn test_reads_number_snowflakes() {
        let config: ChannelConfig =
            serde_json::from_str(r#"{ "primaryChannel": {}, "relayChannels": { "5": 6 } }"#)
                .unwrap();
        assert_eq!(config.relay_channels.get(&5), Some(&6));
    }

    #[test]
    fn test_missing_mapping_defaults_empty() {
        let config: ChannelConfig =
            serde_json::from_str(r#"{ "relayChannels": { "5": "6" } }"#).unwrap();
        assert!(config.primary_channel.is_empty());
        assert_eq!(config.relay_channels.len(), 1);
    }

    #[test]
    fn test_rejects_garbage_snowflake() {
        assert!(serde_json::from_str::<ChannelConfig>(
            r#"{ "primaryChannel": { "abc": "1" }, "relayChannels": {} }"#
        )
        .is_err());
    }

    #[test]
    fn test_writes_strings() {
        let mut config = ChannelConfig::default();
        config.relay_channels.insert(7, 8);
        let json: serde_json::Value = serde_json::to_value(&config).unwrap();
        assert_eq!(json["relayChannels"]["7"], "8");
        assert!(json["primaryChannel"].as_object().unwrap().is_empty());
    }
}
