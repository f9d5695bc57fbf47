//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use std::path::PathBuf;

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use lens_config::LensConfig;

#[test]
fn loads_provider_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[providers]
alpha_vantage_key = "av-key"
bls_key = "bls-key"
sec_api_token = "sec-token"
timeout_secs = 5
"#,
        )?;

        let config: LensConfig = Figment::from(Serialized::defaults(LensConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.providers.alpha_vantage_key, "av-key");
        assert_eq!(config.providers.bls_key, "bls-key");
        assert_eq!(config.providers.sec_api_token, "sec-token");
        assert_eq!(config.providers.timeout_secs, 5);
        assert_eq!(
            config.providers.bls_url,
            "https://api.bls.gov/publicAPI/v2/timeseries/data/"
        );
        assert!(config.providers.alpha_vantage_configured());
        assert!(config.providers.bls_configured());
        assert!(config.providers.sec_api_configured());
        Ok(())
    });
}

#[test]
fn loads_harvest_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[harvest]
signals_dir = "/var/lib/founderlens/signals"
symbol = "XLK"
ticker = "UBER"
cik = "1543151"
labor_series = ["CUUR0000SA0", "OEUM000000015125211"]
start_year = 2018
end_year = 2024
throttle_secs = 12
"#,
        )?;

        let config: LensConfig = Figment::from(Serialized::defaults(LensConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(
            config.harvest.signals_dir,
            PathBuf::from("/var/lib/founderlens/signals")
        );
        assert_eq!(config.harvest.symbol, "XLK");
        assert_eq!(config.harvest.ticker, "UBER");
        assert_eq!(config.harvest.cik, "1543151");
        assert_eq!(config.harvest.labor_series.len(), 2);
        assert_eq!(config.harvest.start_year, 2018);
        assert_eq!(config.harvest.throttle_secs, 12);
        // untouched fields keep their defaults
        assert_eq!(config.harvest.form_type, "10-K");
        assert_eq!(config.harvest.section, "1A");
        Ok(())
    });
}

#[test]
fn loads_scoring_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[scoring]
model_command = "python3"
model_args = ["models/predict.py"]
recommendation = "Ship a smaller wedge."
chart_prefix = [1, 2, 3, 4, 5]

[dataset]
path = "data/companies.csv"
"#,
        )?;

        let config: LensConfig = Figment::from(Serialized::defaults(LensConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.scoring.is_configured());
        assert_eq!(config.scoring.model_args, vec!["models/predict.py"]);
        assert_eq!(config.scoring.recommendation, "Ship a smaller wedge.");
        assert_eq!(config.scoring.chart_prefix, [1, 2, 3, 4, 5]);
        assert_eq!(config.scoring.timeout_secs, 30);
        assert_eq!(config.dataset.path, PathBuf::from("data/companies.csv"));
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".founderlens")?;
        jail.create_file(
            ".founderlens/config.toml",
            r#"
[harvest]
symbol = "SMH"
"#,
        )?;

        let config = LensConfig::load().expect("config loads");
        assert_eq!(config.harvest.symbol, "SMH");
        Ok(())
    });
}

#[test]
fn invalid_year_range_fails_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".founderlens")?;
        jail.create_file(
            ".founderlens/config.toml",
            r#"
[harvest]
start_year = 2030
end_year = 2020
"#,
        )?;

        assert!(LensConfig::load().is_err());
        Ok(())
    });
}
