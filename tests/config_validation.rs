use assert_fs::prelude::*;

use export_mover::config::validate_cron_expression;
use export_mover::{Category, Config};

fn config_in(td: &assert_fs::TempDir) -> Config {
    Config::new(td.path().join("tmp"), td.path().join("export"))
}

#[test]
fn defaults_in_fresh_dirs_validate() {
    let td = assert_fs::TempDir::new().unwrap();
    config_in(&td).validate().unwrap();
    assert!(!td.path().join("export").exists(), "validation creates nothing");
}

#[test]
fn same_directory_is_rejected() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("shared").create_dir_all().unwrap();
    let cfg = Config::new(td.path().join("shared"), td.path().join("shared/."));
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("same path"), "{err}");
}

#[test]
fn nested_directories_are_rejected() {
    let td = assert_fs::TempDir::new().unwrap();
    let cfg = Config::new(td.path().join("export/tmp"), td.path().join("export"));
    assert!(cfg.validate().is_err());
    let cfg = Config::new(td.path().join("tmp"), td.path().join("tmp/export"));
    assert!(cfg.validate().is_err());
}

#[test]
fn bad_cron_names_the_category() {
    let td = assert_fs::TempDir::new().unwrap();
    let mut cfg = config_in(&td);
    cfg.schedules.set(Category::OwnAndBen, "61 * * * * *");
    let err = cfg.validate().unwrap_err();
    assert!(format!("{err:#}").contains("own-and-ben"), "{err:#}");
}

#[test]
fn disabled_schedule_is_not_parsed() {
    let td = assert_fs::TempDir::new().unwrap();
    let mut cfg = config_in(&td);
    cfg.schedules.set(Category::Outpay, "off");
    cfg.validate().unwrap();
}

#[test]
fn cron_syntax_is_seconds_first() {
    validate_cron_expression("*/4 * * * * *").unwrap();
    validate_cron_expression("0 0 2 * * MON-FRI").unwrap();
    assert!(validate_cron_expression("not cron").is_err());
}
