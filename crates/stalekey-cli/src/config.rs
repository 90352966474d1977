//! 環境変数からの設定読み込み
//!
//! 読むのは起動時の 1 回だけ。値の取得元は関数で差し替えられるので、
//! テストではプロセスの環境変数に触らない。

use stalekey_aws::AwsSettings;
use stalekey_core::domain::PolicyDefaults;

pub const CLI_TIME_LIMIT: &str = "AWS_CLI_TIME_LIMIT";
pub const LOGIN_PROFILE_TIME_LIMIT: &str = "AWS_LOGIN_PROFILE_TIME_LIMIT";
pub const SQS_REQUEST_URL: &str = "AWS_SQS_REQUEST_URL";
pub const SNS_ALERT_TOPIC_ARN: &str = "AWS_SNS_ALERT_TOPIC_ARN";
pub const ENDPOINT_URL: &str = "STALEKEY_AWS_ENDPOINT_URL";
pub const LOG_FORMAT: &str = "STALEKEY_LOG_FORMAT";
pub const DRY_RUN: &str = "STALEKEY_DRY_RUN";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be set")]
    Missing { name: &'static str },

    #[error("{name} must be a whole number of days, got {value:?}")]
    InvalidDays { name: &'static str, value: String },

    #[error("{name} must be one of {expected}, got {value:?}")]
    InvalidChoice {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// 依頼と通知の送り先
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Aws {
        queue_url: String,
        alert_topic_arn: String,
    },
    /// キューにも SNS にも送らず、送るはずだった内容をログに出す
    DryRun,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub defaults: PolicyDefaults,
    pub output: Output,
    pub aws: AwsSettings,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 空文字列は未設定と同じ扱い
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let defaults = PolicyDefaults::new(
            days(CLI_TIME_LIMIT, get(CLI_TIME_LIMIT))?,
            days(LOGIN_PROFILE_TIME_LIMIT, get(LOGIN_PROFILE_TIME_LIMIT))?,
        );

        let dry_run = match get(DRY_RUN).as_deref().map(str::trim) {
            None | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(ConfigError::InvalidChoice {
                    name: DRY_RUN,
                    expected: "0, 1, true, false",
                    value: other.to_string(),
                });
            }
        };

        let output = if dry_run {
            Output::DryRun
        } else {
            Output::Aws {
                queue_url: get(SQS_REQUEST_URL).ok_or(ConfigError::Missing {
                    name: SQS_REQUEST_URL,
                })?,
                alert_topic_arn: get(SNS_ALERT_TOPIC_ARN).ok_or(ConfigError::Missing {
                    name: SNS_ALERT_TOPIC_ARN,
                })?,
            }
        };

        let log_format = match get(LOG_FORMAT).as_deref().map(str::trim) {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidChoice {
                    name: LOG_FORMAT,
                    expected: "text, json",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            defaults,
            output,
            aws: AwsSettings {
                region: None,
                endpoint_url: get(ENDPOINT_URL),
            },
            log_format,
        })
    }
}

/// 未設定は `None`。設定されているのに数値でなければ起動時にエラーにする。
fn days(name: &'static str, raw: Option<String>) -> Result<Option<u32>, ConfigError> {
    raw.map(|value| {
        value
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidDays { name, value })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| env.get(name).cloned())
    }

    const QUEUE: (&str, &str) = (SQS_REQUEST_URL, "https://sqs.eu-west-1.amazonaws.com/1/requests");
    const TOPIC: (&str, &str) = (SNS_ALERT_TOPIC_ARN, "arn:aws:sns:eu-west-1:1:alerts");

    #[test]
    fn reads_defaults_and_outputs() {
        let config = load(&[
            (CLI_TIME_LIMIT, "30"),
            (LOGIN_PROFILE_TIME_LIMIT, "90"),
            QUEUE,
            TOPIC,
        ])
        .unwrap();
        assert_eq!(config.defaults, PolicyDefaults::new(Some(30), Some(90)));
        assert_eq!(
            config.output,
            Output::Aws {
                queue_url: QUEUE.1.to_string(),
                alert_topic_arn: TOPIC.1.to_string(),
            }
        );
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn missing_defaults_are_allowed() {
        let config = load(&[QUEUE, TOPIC, (CLI_TIME_LIMIT, "")]).unwrap();
        assert_eq!(config.defaults, PolicyDefaults::default());
    }

    #[rstest]
    #[case::word(CLI_TIME_LIMIT, "thirty")]
    #[case::negative(LOGIN_PROFILE_TIME_LIMIT, "-5")]
    #[case::fraction(CLI_TIME_LIMIT, "1.5")]
    fn invalid_default_fails_fast(#[case] name: &'static str, #[case] value: &str) {
        let err = load(&[QUEUE, TOPIC, (name, value)]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDays {
                name,
                value: value.to_string()
            }
        );
    }

    #[rstest]
    #[case::no_queue(&[TOPIC], SQS_REQUEST_URL)]
    #[case::no_topic(&[QUEUE], SNS_ALERT_TOPIC_ARN)]
    fn outputs_are_required_outside_dry_run(
        #[case] pairs: &[(&str, &str)],
        #[case] missing: &'static str,
    ) {
        assert_eq!(
            load(pairs).unwrap_err(),
            ConfigError::Missing { name: missing }
        );
    }

    #[test]
    fn dry_run_needs_no_outputs() {
        let config = load(&[(DRY_RUN, "1"), (LOG_FORMAT, "json")]).unwrap();
        assert_eq!(config.output, Output::DryRun);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let err = load(&[QUEUE, TOPIC, (LOG_FORMAT, "xml")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidChoice { name, .. } if name == LOG_FORMAT));
    }
}
