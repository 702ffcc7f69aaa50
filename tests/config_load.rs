// tests/config_load.rs
use std::{env, fs};

use wellness_monitor::api::AppState;
use wellness_monitor::config::{AppConfig, ENV_CONFIG_PATH, ENV_RECOMMENDATION_WINDOW};
use wellness_monitor::SentimentLabel;

#[test]
fn from_path_reads_all_sections() {
    let dir = tempfile::tempdir().unwrap();
    let lex = dir.path().join("lexicon.json");
    fs::write(&lex, r#"{"calm": "positive"}"#).unwrap();

    let p = dir.path().join("wellness.toml");
    fs::write(
        &p,
        format!(
            r#"
[windows]
recommendation = 2
weekly = 14
recent = 3

[store]
capacity = 50
seed_demo = true

[lexicon]
path = "{}"
"#,
            lex.display().to_string().replace('\\', "/")
        ),
    )
    .unwrap();

    let cfg = AppConfig::from_path(&p).unwrap();
    assert_eq!(cfg.windows.recommendation, 2);
    assert_eq!(cfg.windows.weekly, 14);
    assert_eq!(cfg.store.capacity, 50);

    let state = AppState::from_config(&cfg).unwrap();
    assert_eq!(state.store.len(), 7);
    assert_eq!(state.classifier.classify("calm"), SentimentLabel::Positive);
    assert_eq!(state.windows.recent, 3);
}

#[test]
fn missing_lexicon_file_fails_bootstrap() {
    let cfg = AppConfig::from_toml_str("[lexicon]\npath = \"/definitely/not/here.json\"\n").unwrap();
    assert!(AppState::from_config(&cfg).is_err());
}

#[serial_test::serial]
#[test]
fn load_uses_env_then_fallbacks() {
    // Izoluj CWD, ať test nečte reálný repo config/
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();

    env::remove_var(ENV_CONFIG_PATH);
    env::remove_var(ENV_RECOMMENDATION_WINDOW);

    // 1) Bez ničeho → výchozí hodnoty
    let cfg = AppConfig::load().unwrap();
    assert_eq!(cfg, AppConfig::default());

    // 2) Fallback na ./config/wellness.toml
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(cfg_dir.join("wellness.toml"), "[windows]\nweekly = 10\n").unwrap();
    assert_eq!(AppConfig::load().unwrap().windows.weekly, 10);

    // 3) ENV cesta má přednost
    let p_env = tmp.path().join("other.toml");
    fs::write(&p_env, "[windows]\nweekly = 21\n").unwrap();
    env::set_var(ENV_CONFIG_PATH, p_env.display().to_string());
    assert_eq!(AppConfig::load().unwrap().windows.weekly, 21);

    // 4) Neexistující ENV cesta je chyba
    env::set_var(ENV_CONFIG_PATH, tmp.path().join("nope.toml").display().to_string());
    assert!(AppConfig::load().is_err());
    env::remove_var(ENV_CONFIG_PATH);

    // 5) Override okna
    env::set_var(ENV_RECOMMENDATION_WINDOW, "5");
    assert_eq!(AppConfig::load().unwrap().windows.recommendation, 5);
    env::remove_var(ENV_RECOMMENDATION_WINDOW);

    // Zpět do původního CWD
    env::set_current_dir(&old).unwrap();
}
