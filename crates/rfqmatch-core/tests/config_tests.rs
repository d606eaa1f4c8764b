use rfqmatch_core::config::MatchConfig;
use rfqmatch_core::Error;

#[test]
fn default_config_is_valid() {
    let config = MatchConfig::default();
    config.validate().expect("defaults validate");
    assert_eq!(config.top_k, 5);
    assert!((config.vector_weight - 0.7).abs() < 1e-6);
    assert!((config.lexical_weight - 0.3).abs() < 1e-6);
}

#[test]
fn zero_top_k_rejected() {
    let err = MatchConfig::new(0, 0.7, 0.3, 0.6).expect_err("top_k = 0 must fail");
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn negative_weight_rejected() {
    let err = MatchConfig::new(5, -0.1, 0.3, 0.6).expect_err("negative weight must fail");
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn non_finite_weight_rejected() {
    let err = MatchConfig::new(5, f32::NAN, 0.3, 0.6).expect_err("NaN weight must fail");
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn threshold_out_of_range_rejected() {
    assert!(MatchConfig::new(5, 0.7, 0.3, 1.5).is_err());
    assert!(MatchConfig::new(5, 0.7, 0.3, -0.1).is_err());
}

#[test]
fn threshold_bounds_accepted() {
    assert!(MatchConfig::new(5, 0.7, 0.3, 0.0).is_ok());
    assert!(MatchConfig::new(5, 0.7, 0.3, 1.0).is_ok());
}

#[test]
fn weights_need_not_sum_to_one() {
    // Weights are independent multipliers; callers control the scale.
    assert!(MatchConfig::new(5, 2.0, 3.0, 0.6).is_ok());
}

#[test]
fn exact_match_bonus_out_of_range_rejected() {
    let config = MatchConfig {
        exact_match_bonus: 1.5,
        ..MatchConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn partial_json_fills_defaults() {
    let config: MatchConfig = serde_json::from_str(r#"{"top_k": 3}"#).expect("parse");
    assert_eq!(config.top_k, 3);
    assert!((config.similarity_threshold - 0.6).abs() < 1e-6);
}

#[test]
fn layered_config_reads_env_override() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
                [match]
                top_k = 7
            "#,
        )?;
        jail.set_env("APP_MATCH__TOP_K", "9");
        let config = rfqmatch_core::config::Config::load().expect("load");
        let match_config: MatchConfig = config.get("match").expect("match section");
        assert_eq!(match_config.top_k, 9, "env var wins over file");
        Ok(())
    });
}
