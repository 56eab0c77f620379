use crate::cli::{ConfigCommands, OutputFormat};
use crate::config::{config_paths, Config};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde_json::json;
use std::path::Path;
use user_core::UserApi;

/// Config commands that never touch the network
pub fn handle_config_local(
    action: &ConfigCommands,
    config: &Config,
    explicit_path: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(config)?);
                }
                OutputFormat::Text => {
                    let unset = "(not set)".dimmed().to_string();
                    println!(
                        "{}: {}",
                        "API URL".dimmed(),
                        config.url.as_deref().unwrap_or(&unset)
                    );
                    let timeout = config
                        .timeout_secs
                        .map(|s| format!("{}s", s))
                        .unwrap_or_else(|| unset.clone());
                    println!("{}: {}", "Timeout".dimmed(), timeout);
                    println!(
                        "{}: {}",
                        "Log filter".dimmed(),
                        config.log.as_deref().unwrap_or(&unset)
                    );
                }
            }
            Ok(())
        }
        ConfigCommands::Path => {
            let paths = config_paths(explicit_path);
            match format {
                OutputFormat::Json => {
                    let entries: Vec<_> = paths
                        .iter()
                        .map(|p| json!({ "path": p.display().to_string(), "exists": p.exists() }))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&entries)?);
                }
                OutputFormat::Text => {
                    for path in paths {
                        let marker = if path.exists() {
                            "found".green().to_string()
                        } else {
                            "missing".dimmed().to_string()
                        };
                        println!("{} [{}]", path.display(), marker);
                    }
                }
            }
            Ok(())
        }
        ConfigCommands::Test => bail!("'config test' needs an API connection"),
    }
}

/// `config test`: list users to prove the API is reachable
pub fn handle_config_test(client: &dyn UserApi, format: OutputFormat) -> Result<()> {
    let users = client
        .list_users()
        .with_context(|| format!("Failed to reach {}", client.base_url()))?;

    match format {
        OutputFormat::Json => {
            let result = json!({
                "success": true,
                "url": client.base_url(),
                "users": users.len()
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text => {
            println!(
                "Connected to {} ({} users)",
                client.base_url().cyan(),
                users.len()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use user_core::{User, UserStatus};
    use user_mock::MockClient;

    #[test]
    fn local_handler_refuses_connection_test() {
        let err = handle_config_local(
            &ConfigCommands::Test,
            &Config::default(),
            None,
            OutputFormat::Text,
        )
        .unwrap_err();
        assert!(err.to_string().contains("needs an API connection"));
    }

    #[test]
    fn connection_test_lists_once() {
        let api = MockClient::new(vec![User {
            user_id: 1,
            user_name: "a".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@example.com".to_string(),
            user_status: UserStatus::Active,
            department: "Ops".to_string(),
        }]);
        handle_config_test(&api, OutputFormat::Json).unwrap();
        assert_eq!(api.call_count(user_mock::Method::List), 1);
    }

    #[test]
    fn connection_test_reports_failure() {
        let api = MockClient::empty();
        api.fail_next(user_mock::Method::List, 503, "down");
        let err = handle_config_test(&api, OutputFormat::Text).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to reach mock://memory: "));
    }
}
