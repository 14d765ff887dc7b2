mod bars;
mod chain;
mod contract;
mod details;
mod features;
mod indices;
mod prev;
mod quote;
mod search;
mod status;

use std::sync::Arc;

use serde_json::Value;
use time::Date;
use wheeltrack_core::{ClientConfig, PolygonClient, ReqwestHttpClient};

use wheeltrack_core::ValidationError;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::settings::EnvSettingsStore;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let settings = EnvSettingsStore::new();
    let config = ClientConfig::from_settings(&settings);
    let client = PolygonClient::new(config, Arc::new(ReqwestHttpClient::new()));

    match &cli.command {
        Command::Quote(args) => quote::run(args, &client).await,
        Command::Prev(args) => prev::run(args, &client).await,
        Command::Bars(args) => bars::run(args, &client).await,
        Command::Search(args) => search::run(args, &client).await,
        Command::Details(args) => details::run(args, &client).await,
        Command::Chain(args) => chain::run(args, &client).await,
        Command::Contract(args) => contract::run(args, &client).await,
        Command::Indices(args) => indices::run(args, &client).await,
        Command::Status => status::run(&client).await,
        Command::Features => features::run(&client),
    }
}

/// Parse a YYYY-MM-DD argument.
fn parse_date(value: &str) -> Result<Date, CliError> {
    let mut parts = value.splitn(3, '-');
    let parsed = match (parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day)) => {
            let year: i32 = year
                .parse()
                .map_err(|_| invalid_date(value))?;
            let month: u8 = month
                .parse()
                .map_err(|_| invalid_date(value))?;
            let day: u8 = day
                .parse()
                .map_err(|_| invalid_date(value))?;
            let month = time::Month::try_from(month).map_err(|_| invalid_date(value))?;
            Date::from_calendar_date(year, month, day).map_err(|_| invalid_date(value))?
        }
        _ => return Err(invalid_date(value)),
    };
    Ok(parsed)
}

fn invalid_date(value: &str) -> CliError {
    CliError::Validation(ValidationError::InvalidDate {
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        let date = parse_date("2026-08-30").expect("must parse");
        assert_eq!(date.year(), 2026);
        assert_eq!(u8::from(date.month()), 8);
        assert_eq!(date.day(), 30);
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_date("2026/08/30").is_err());
        assert!(parse_date("2026-13-01").is_err());
        assert!(parse_date("yesterday").is_err());
    }
}
